//! Per-locale message bundles loaded from `.properties` files.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::MenuError;
use crate::menu::substitute;
use crate::Result;

const FILE_PREFIX: &str = "bundle_";
const FILE_EXTENSION: &str = "properties";

/// Message catalog keyed by locale code.
///
/// Locale codes use underscores (`en`, `pt_BR`). Lookups fall back to the
/// default locale's catalog and finally to the key itself, so a missing
/// translation shows up as its key rather than failing.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Supported locales, in load order.
    locales: Vec<String>,
    catalogs: HashMap<String, HashMap<String, String>>,
    default_locale: String,
}

impl Bundle {
    /// Create an empty bundle; every lookup echoes its key.
    pub fn empty(default_locale: impl Into<String>) -> Self {
        Self {
            locales: Vec::new(),
            catalogs: HashMap::new(),
            default_locale: default_locale.into(),
        }
    }

    /// Load every `bundle_<locale>.properties` file in `dir`.
    ///
    /// A missing directory yields an empty bundle.
    pub fn load(dir: &Path, default_locale: impl Into<String>) -> Result<Self> {
        let mut bundle = Self::empty(default_locale);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "bundle directory missing; using keys as text");
            return Ok(bundle);
        }

        let mut files: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == FILE_EXTENSION))
            .collect();
        files.sort();

        for path in files {
            let Some(locale) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.strip_prefix(FILE_PREFIX))
            else {
                continue;
            };

            let content = std::fs::read_to_string(&path)?;
            let catalog = parse_properties(&content)
                .map_err(|line| MenuError::InvalidBundle(format!("{}:{}", path.display(), line)))?;
            bundle.insert(locale, catalog);
        }

        info!(
            locales = bundle.locales.len(),
            default = %bundle.default_locale,
            "loaded message bundles"
        );
        Ok(bundle)
    }

    /// Add or replace the catalog of one locale.
    pub fn insert(&mut self, locale: &str, catalog: HashMap<String, String>) {
        if !self.locales.iter().any(|l| l == locale) {
            self.locales.push(locale.to_string());
        }
        self.catalogs.insert(locale.to_string(), catalog);
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Pick the supported locale for a client-reported code.
    ///
    /// The first supported locale that prefixes `code` wins (`en_US` picks
    /// `en`); anything else maps to the default locale.
    pub fn locale<'a>(&'a self, code: &str) -> &'a str {
        let code = code.replace('-', "_");
        self.locales
            .iter()
            .find(|locale| code.starts_with(locale.as_str()))
            .map(String::as_str)
            .unwrap_or(&self.default_locale)
    }

    /// Look up `key`, falling back to the default locale, then to `key`.
    pub fn get<'a>(&'a self, key: &'a str, locale: &str) -> &'a str {
        self.lookup(key, locale).unwrap_or(key)
    }

    /// Look up `key` and substitute positional values into it.
    pub fn format(&self, key: &str, locale: &str, values: &[String]) -> String {
        substitute(self.get(key, locale), values)
    }

    fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        let locale = self.locale(locale);
        self.catalogs
            .get(locale)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| {
                self.catalogs
                    .get(&self.default_locale)
                    .and_then(|catalog| catalog.get(key))
            })
            .map(String::as_str)
    }
}

/// Parse `key=value` lines; `#` and `!` start comments.
///
/// The key ends at the first `=` or `:`, whichever comes first.
///
/// Returns the 1-based number of the first malformed line on error.
fn parse_properties(content: &str) -> std::result::Result<HashMap<String, String>, usize> {
    let mut catalog = HashMap::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let split = line.find(['=', ':']).ok_or(number + 1)?;
        let (key, value) = (&line[..split], &line[split + 1..]);
        let key = key.trim();
        if key.is_empty() {
            return Err(number + 1);
        }
        catalog.insert(key.to_string(), value.trim().replace("\\n", "\n"));
    }

    Ok(catalog)
}
