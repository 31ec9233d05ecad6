//! In-progress menu presentation for a single user.

use std::fmt;
use std::sync::Arc;

use super::{Action, ContextStore, Label, MenuFrame, MenuId, MenuOption, TextFormatter, UserId};
use crate::error::MenuError;
use crate::Result;

/// A menu being built for, or already presented to, one user.
///
/// Views are mutated through the fluent builder methods while registered
/// transformers run, and are treated as sealed once rendered. The grid is
/// row-major: selection indices count through row 0 left to right, then
/// row 1, and so on.
#[derive(Clone)]
pub struct MenuView {
    menu_id: MenuId,
    user: UserId,
    context: ContextStore,
    title: String,
    body: String,
    grid: Vec<Vec<MenuOption>>,
    formatter: Arc<dyn TextFormatter>,
}

impl MenuView {
    pub fn new(
        menu_id: MenuId,
        user: UserId,
        context: ContextStore,
        formatter: Arc<dyn TextFormatter>,
    ) -> Self {
        Self {
            menu_id,
            user,
            context,
            title: String::new(),
            body: String::new(),
            grid: Vec::new(),
            formatter,
        }
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn context(&self) -> &ContextStore {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ContextStore {
        &mut self.context
    }

    pub fn title_text(&self) -> &str {
        &self.title
    }

    pub fn body_text(&self) -> &str {
        &self.body
    }

    pub fn grid(&self) -> &[Vec<MenuOption>] {
        &self.grid
    }

    /// Format `pattern` for this view's user.
    pub fn format(&self, pattern: &str, values: &[&dyn fmt::Display]) -> String {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.formatter.format(&self.user, pattern, &values)
    }

    pub fn title(&mut self, pattern: &str, values: &[&dyn fmt::Display]) -> &mut Self {
        self.title = self.format(pattern, values);
        self
    }

    pub fn body(&mut self, pattern: &str, values: &[&dyn fmt::Display]) -> &mut Self {
        self.body = self.format(pattern, values);
        self
    }

    // Grid construction

    /// Start a new, empty row.
    pub fn row(&mut self) -> &mut Self {
        self.grid.push(Vec::new());
        self
    }

    /// Append to the current row, creating the first row if needed.
    pub fn add_option(&mut self, option: MenuOption) -> &mut Self {
        match self.grid.last_mut() {
            Some(row) => row.push(option),
            None => self.grid.push(vec![option]),
        }
        self
    }

    /// Append an option built from the view itself.
    pub fn add_option_with<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&MenuView) -> MenuOption,
    {
        let option = build(self);
        self.add_option(option)
    }

    /// Append to the current row, then start a new one.
    pub fn add_option_row(&mut self, option: MenuOption) -> &mut Self {
        self.add_option(option).row()
    }

    /// Append `options` as a row of their own.
    ///
    /// A new row is only started when the current one already has options,
    /// so a trailing empty row from [`row`](Self::row) gets filled instead.
    pub fn add_options_row<I>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = MenuOption>,
    {
        self.break_row();
        let options: Vec<MenuOption> = options.into_iter().collect();
        match self.grid.last_mut() {
            Some(row) => row.extend(options),
            None => self.grid.push(options),
        }
        self
    }

    /// Like [`add_options_row`](Self::add_options_row), wrapping onto further
    /// rows whenever a row reaches `max_per_row` options (at least one).
    pub fn add_options_row_wrapped<I>(&mut self, max_per_row: usize, options: I) -> &mut Self
    where
        I: IntoIterator<Item = MenuOption>,
    {
        let max_per_row = max_per_row.max(1);
        self.break_row();

        for option in options {
            if self.grid.last().is_some_and(|row| row.len() >= max_per_row) {
                self.row();
            }
            self.add_option(option);
        }
        self
    }

    /// Replace the whole grid.
    pub fn set_options(&mut self, grid: Vec<Vec<MenuOption>>) -> &mut Self {
        self.grid = grid;
        self
    }

    pub fn option_row(&self, row: usize) -> Option<&[MenuOption]> {
        self.grid.get(row).map(Vec::as_slice)
    }

    /// Replace an existing row, or append one when `row` is one past the end.
    pub fn set_option_row<I>(&mut self, row: usize, options: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = MenuOption>,
    {
        let options = options.into_iter().collect();
        match row.cmp(&self.grid.len()) {
            std::cmp::Ordering::Less => self.grid[row] = options,
            std::cmp::Ordering::Equal => self.grid.push(options),
            std::cmp::Ordering::Greater => {
                return Err(MenuError::CellOutOfBounds { col: 0, row });
            }
        }
        Ok(self)
    }

    pub fn option_at(&self, col: usize, row: usize) -> Option<&MenuOption> {
        self.grid.get(row).and_then(|cells| cells.get(col))
    }

    /// Replace the option in an existing cell.
    pub fn set_option_at(&mut self, col: usize, row: usize, option: MenuOption) -> Result<&mut Self> {
        let cell = self
            .grid
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(MenuError::CellOutOfBounds { col, row })?;
        *cell = option;
        Ok(self)
    }

    // Label conveniences; patterns go through the formatter.

    /// Add an option that only closes the menu.
    pub fn add_none(&mut self, pattern: &str, values: &[&dyn fmt::Display]) -> &mut Self {
        let label = self.format(pattern, values);
        self.add_option(MenuOption::none(label))
    }

    pub fn add_icon(&mut self, icon: char, action: Action) -> &mut Self {
        self.add_option(MenuOption::new(Label::Icon(icon), action))
    }

    pub fn add_action(
        &mut self,
        pattern: &str,
        action: Action,
        values: &[&dyn fmt::Display],
    ) -> &mut Self {
        let label = self.format(pattern, values);
        self.add_option(MenuOption::new(label, action))
    }

    pub fn add_user_action<F>(
        &mut self,
        pattern: &str,
        f: F,
        values: &[&dyn fmt::Display],
    ) -> &mut Self
    where
        F: Fn(&UserId) + Send + Sync + 'static,
    {
        self.add_action(pattern, Action::user(f), values)
    }

    // Selection

    /// Total number of options across all rows.
    pub fn option_count(&self) -> usize {
        self.grid.iter().map(Vec::len).sum()
    }

    /// Map a linear selection index to `(col, row)` grid coordinates.
    pub fn flatten_index(&self, index: i32) -> Option<(usize, usize)> {
        let index = usize::try_from(index).ok()?;
        let mut cumulative = 0;

        for (row, cells) in self.grid.iter().enumerate() {
            cumulative += cells.len();
            if cumulative > index {
                return Some((index - (cumulative - cells.len()), row));
            }
        }
        None
    }

    /// Option at a linear selection index.
    pub fn option_by_index(&self, index: i32) -> Option<&MenuOption> {
        let (col, row) = self.flatten_index(index)?;
        self.option_at(col, row)
    }

    /// Snapshot of what the transport should show.
    pub fn frame(&self) -> MenuFrame {
        MenuFrame {
            menu_id: self.menu_id,
            user: self.user.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
            options: self
                .grid
                .iter()
                .map(|row| row.iter().map(MenuOption::button).collect())
                .collect(),
        }
    }

    fn break_row(&mut self) {
        if self.grid.last().is_some_and(|row| !row.is_empty()) {
            self.row();
        }
    }
}

impl fmt::Debug for MenuView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuView")
            .field("menu_id", &self.menu_id)
            .field("user", &self.user)
            .field("title", &self.title)
            .field("body", &self.body)
            .field("grid", &self.grid)
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::PlainFormatter;

    fn view() -> MenuView {
        MenuView::new(
            MenuId::from_raw(1),
            UserId::new("alice"),
            ContextStore::new(),
            Arc::new(PlainFormatter),
        )
    }

    fn labels(view: &MenuView) -> Vec<Vec<String>> {
        view.frame().options
    }

    #[test]
    fn test_add_option_creates_first_row() {
        let mut v = view();
        v.add_option(MenuOption::none("A"));
        assert_eq!(labels(&v), vec![vec!["A"]]);
    }

    #[test]
    fn test_add_option_row() {
        let mut v = view();
        v.add_option_row(MenuOption::none("A"))
            .add_option(MenuOption::none("B"));
        assert_eq!(labels(&v), vec![vec!["A"], vec!["B"]]);
    }

    #[test]
    fn test_add_options_row_packs_after_empty_row() {
        let mut v = view();
        v.add_option_row(MenuOption::none("A"))
            .add_options_row([MenuOption::none("B"), MenuOption::none("C")])
            .add_options_row([MenuOption::none("D")]);
        assert_eq!(labels(&v), vec![vec!["A"], vec!["B", "C"], vec!["D"]]);
    }

    #[test]
    fn test_add_options_row_wrapped() {
        let mut v = view();
        v.add_options_row_wrapped(
            2,
            [
                MenuOption::none("X"),
                MenuOption::none("Y"),
                MenuOption::none("Z"),
            ],
        );
        assert_eq!(labels(&v), vec![vec!["X", "Y"], vec!["Z"]]);
    }

    #[test]
    fn test_add_options_row_wrapped_starts_new_row() {
        let mut v = view();
        v.add_option(MenuOption::none("A")).add_options_row_wrapped(
            1,
            [MenuOption::none("B"), MenuOption::none("C")],
        );
        assert_eq!(labels(&v), vec![vec!["A"], vec!["B"], vec!["C"]]);
    }

    #[test]
    fn test_wrapped_zero_is_treated_as_one() {
        let mut v = view();
        v.add_options_row_wrapped(0, [MenuOption::none("A"), MenuOption::none("B")]);
        assert_eq!(labels(&v), vec![vec!["A"], vec!["B"]]);
    }

    #[test]
    fn test_flatten_row_major() {
        let mut v = view();
        v.add_options_row([MenuOption::none("A"), MenuOption::none("B")])
            .add_options_row([MenuOption::none("C")]);

        assert_eq!(v.option_count(), 3);
        assert_eq!(v.flatten_index(0), Some((0, 0)));
        assert_eq!(v.flatten_index(1), Some((1, 0)));
        assert_eq!(v.flatten_index(2), Some((0, 1)));
        assert_eq!(v.flatten_index(3), None);
        assert_eq!(v.flatten_index(-1), None);
        assert_eq!(v.option_by_index(2).map(MenuOption::button), Some("C".into()));
    }

    #[test]
    fn test_flatten_skips_empty_rows_and_uneven_lengths() {
        let mut v = view();
        v.add_option(MenuOption::none("A"))
            .row()
            .row()
            .add_options_row([
                MenuOption::none("B"),
                MenuOption::none("C"),
                MenuOption::none("D"),
            ])
            .add_options_row([MenuOption::none("E")]);

        let flat: Vec<String> = (0..v.option_count() as i32)
            .filter_map(|i| v.option_by_index(i).map(MenuOption::button))
            .collect();
        assert_eq!(flat, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(v.flatten_index(3), Some((2, 2)));
    }

    #[test]
    fn test_empty_grid_resolves_nothing() {
        let v = view();
        assert_eq!(v.flatten_index(0), None);
        assert!(v.option_by_index(0).is_none());
    }

    #[test]
    fn test_cell_access() {
        let mut v = view();
        v.add_options_row([MenuOption::none("A"), MenuOption::none("B")]);

        v.set_option_at(1, 0, MenuOption::none("B*")).unwrap();
        assert_eq!(v.option_at(1, 0).unwrap().button(), "B*");
        assert!(v.option_at(2, 0).is_none());

        let err = v.set_option_at(0, 4, MenuOption::none("?")).unwrap_err();
        assert!(matches!(err, MenuError::CellOutOfBounds { col: 0, row: 4 }));
    }

    #[test]
    fn test_set_option_row() {
        let mut v = view();
        v.add_option(MenuOption::none("A"));
        v.set_option_row(0, [MenuOption::none("B"), MenuOption::none("C")])
            .unwrap()
            .set_option_row(1, [MenuOption::none("D")])
            .unwrap();

        assert_eq!(labels(&v), vec![vec!["B", "C"], vec!["D"]]);
        assert_eq!(v.option_row(1).map(<[MenuOption]>::len), Some(1));
        assert!(v.set_option_row(5, Vec::new()).is_err());
    }

    #[test]
    fn test_title_and_body_formatting() {
        let mut v = view();
        v.title("Shop {0}", &[&"north"]).body("{0} coins", &[&12]);
        assert_eq!(v.title_text(), "Shop north");
        assert_eq!(v.body_text(), "12 coins");
    }

    #[test]
    fn test_label_conveniences() {
        let mut v = view();
        v.add_none("Close", &[])
            .add_icon('*', Action::None)
            .add_user_action("Kick {0}", |_| {}, &[&"bob"])
            .add_option_with(|view| MenuOption::none(format!("Hi {}", view.user())));

        assert_eq!(labels(&v), vec![vec!["Close", "*", "Kick bob", "Hi alice"]]);
    }
}
