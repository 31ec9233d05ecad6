//! Localization collaborator for menu text.
//!
//! Patterns handed to [`MenuView::title`](crate::menu::MenuView::title) and
//! friends are treated as bundle keys by [`BundleFormatter`]: the user's
//! locale comes from a [`LocaleProvider`] (usually the transport, which
//! learns it when the client connects), the key is looked up in a
//! [`Bundle`], and positional values are substituted.

mod bundle;

use std::sync::Arc;

pub use bundle::Bundle;

use crate::menu::{TextFormatter, UserId};

/// Source of per-user locale codes.
pub trait LocaleProvider: Send + Sync {
    fn locale(&self, user: &UserId) -> Option<String>;
}

/// [`TextFormatter`] backed by a [`Bundle`].
#[derive(Clone)]
pub struct BundleFormatter {
    bundle: Arc<Bundle>,
    locales: Arc<dyn LocaleProvider>,
}

impl BundleFormatter {
    pub fn new(bundle: Arc<Bundle>, locales: Arc<dyn LocaleProvider>) -> Self {
        Self { bundle, locales }
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }
}

impl TextFormatter for BundleFormatter {
    fn format(&self, user: &UserId, pattern: &str, values: &[String]) -> String {
        let locale = self
            .locales
            .locale(user)
            .unwrap_or_else(|| self.bundle.default_locale().to_string());
        self.bundle.format(pattern, &locale, values)
    }
}
