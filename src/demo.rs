//! Demonstration menus served by the binary.
//!
//! The main menu greets the user and links to a counter menu whose state
//! lives entirely in the view context: every press shows the counter again
//! with the incremented value.

use std::sync::{Arc, Weak};

use tracing::warn;

use crate::api::ConnectionHub;
use crate::menu::{Action, ContextKey, Menu, MenuDispatcher, MenuOption, TextFormatter, UserId};
use crate::Result;

/// Current value of the counter menu.
pub const COUNT: ContextKey<u32> = ContextKey::new("count");

/// Handles to the registered demo menus.
pub struct DemoMenus {
    pub main: Arc<Menu>,
    pub counter: Arc<Menu>,
}

/// Build the demo menus and register them with `dispatcher`.
pub fn install(
    dispatcher: &MenuDispatcher,
    hub: Arc<ConnectionHub>,
    formatter: Arc<dyn TextFormatter>,
) -> Result<DemoMenus> {
    let main = dispatcher.register(
        Menu::with_formatter(hub.clone(), formatter.clone())
            .closed(notice(&hub, &formatter, "menu.closed")),
    )?;
    let counter = dispatcher.register(Menu::with_formatter(hub.clone(), formatter.clone()))?;

    let to_counter = Arc::downgrade(&counter);
    let greet_hub = Arc::downgrade(&hub);
    let greet_formatter = formatter.clone();
    main.register_transformer(move |view| {
        let user = view.user().clone();
        view.title("menu.main.title", &[])
            .body("menu.main.body", &[&user]);

        let hub = greet_hub.clone();
        let formatter = greet_formatter.clone();
        view.add_user_action(
            "menu.main.greet",
            move |user| {
                if let Some(hub) = hub.upgrade() {
                    let text = formatter.format(user, "menu.main.hello", &[user.to_string()]);
                    if let Err(e) = hub.notify(user, text) {
                        warn!(%user, error = %e, "failed to send greeting");
                    }
                }
            },
            &[],
        )
        .row();

        let counter = to_counter.clone();
        view.add_user_action(
            "menu.main.counter",
            move |user| show_with_count(&counter, user, 0),
            &[],
        )
        .row()
        .add_none("menu.close", &[]);
    })?;

    let to_main = Arc::downgrade(&main);
    let to_self = Arc::downgrade(&counter);
    counter.register_transformer(move |view| {
        let count = *view.context().get_or(COUNT, &0);
        view.title("menu.counter.title", &[])
            .body("menu.counter.body", &[&count]);

        let again = to_self.clone();
        let back = to_main.clone();
        view.add_options_row([
            MenuOption::view(view.format("menu.counter.increment", &[]), move |view| {
                show_with_count(&again, view.user(), count.saturating_add(1));
            }),
            MenuOption::user(view.format("menu.counter.back", &[]), move |user| {
                if let Some(main) = back.upgrade() {
                    if let Err(e) = main.show(user) {
                        warn!(%user, error = %e, "failed to show main menu");
                    }
                }
            }),
        ]);
    })?;

    Ok(DemoMenus { main, counter })
}

fn show_with_count(menu: &Weak<Menu>, user: &UserId, count: u32) {
    if let Some(menu) = menu.upgrade() {
        if let Err(e) = menu.show_with(user, COUNT, count) {
            warn!(%user, count, error = %e, "failed to show counter menu");
        }
    }
}

fn notice(hub: &Arc<ConnectionHub>, formatter: &Arc<dyn TextFormatter>, key: &'static str) -> Action {
    let hub = Arc::downgrade(hub);
    let formatter = formatter.clone();
    Action::user(move |user| {
        if let Some(hub) = hub.upgrade() {
            if let Err(e) = hub.notify(user, formatter.format(user, key, &[])) {
                warn!(%user, key, error = %e, "failed to send notice");
            }
        }
    })
}
