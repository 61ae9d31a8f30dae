//! Locale resolution for localizable announcement fields.
//!
//! A field is either plain text or a map of locale code to text. Resolving a
//! map walks a fixed fallback chain, first hit wins:
//!
//! 1. the requested locale
//! 2. the site's default locale
//! 3. `en`
//! 4. the first entry in declaration order
//!
//! Plain text ignores the locale entirely. Missing values and empty maps
//! resolve to `None`.
//!
//! The site's default locale comes from the host's locale table and is held
//! in a [`DefaultLocale`] context that resolves it lazily and can be
//! invalidated when the host configuration reloads.

use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};

use crate::config::LocalizableString;

/// Key of the host locale table entry that describes the default locale.
const ROOT_LOCALE_KEY: &str = "root";

/// Universal fallback locale.
pub const FALLBACK_LOCALE: &str = "en";

/// Environment variable carrying the host locale table as JSON.
pub const LOCALES_ENV_VAR: &str = "STARLIGHT_LOCALES";

/// Resolve a localizable value for `locale`, falling back as described in
/// the module docs.
pub fn resolve<'a>(
    value: Option<&'a LocalizableString>,
    locale: Option<&str>,
    default_locale: Option<&str>,
) -> Option<&'a str> {
    match value? {
        LocalizableString::Plain(text) => Some(text.as_str()),
        LocalizableString::PerLocale(map) => resolve_map(map, locale, default_locale),
    }
}

fn resolve_map<'a>(
    map: &'a IndexMap<String, String>,
    locale: Option<&str>,
    default_locale: Option<&str>,
) -> Option<&'a str> {
    let lookup = |key: Option<&str>| {
        key.and_then(|k| map.get(k))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    };

    lookup(locale)
        .or_else(|| lookup(default_locale))
        .or_else(|| lookup(Some(FALLBACK_LOCALE)))
        .or_else(|| map.values().next().map(String::as_str))
}

impl LocalizableString {
    pub fn resolve(&self, locale: Option<&str>, default_locale: Option<&str>) -> Option<&str> {
        resolve(Some(self), locale, default_locale)
    }
}

#[derive(Debug, Deserialize)]
struct HostLocale {
    #[serde(default)]
    lang: Option<String>,
}

/// Derive the default locale from the host's locale table.
///
/// The table is JSON shaped like `{"root": {"lang": "en"}, "fr": {...}}`.
/// The root entry's `lang` wins; a table without one defaults to `en`, and
/// so does a table that fails to parse (with a warning).
pub fn default_locale_from_host(locales_json: &str) -> String {
    match serde_json::from_str::<IndexMap<String, HostLocale>>(locales_json) {
        Ok(locales) => locales
            .get(ROOT_LOCALE_KEY)
            .and_then(|root| root.lang.clone())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string()),
        Err(err) => {
            tracing::warn!("failed to parse host locales: {err}");
            FALLBACK_LOCALE.to_string()
        }
    }
}

#[derive(Debug)]
struct DefaultLocaleState {
    source: Option<String>,
    resolved: Option<Option<String>>,
}

/// Process-scoped default locale.
///
/// Resolved from its source on first use and cached until
/// [`invalidate`](Self::invalidate) or [`reload`](Self::reload). Without a
/// source there is no default locale.
#[derive(Debug)]
pub struct DefaultLocale {
    state: Mutex<DefaultLocaleState>,
}

impl DefaultLocale {
    /// Context reading the host locale table `source` on first use.
    pub fn new(source: Option<String>) -> Self {
        Self {
            state: Mutex::new(DefaultLocaleState {
                source: source.filter(|s| !s.is_empty()),
                resolved: None,
            }),
        }
    }

    /// Context reading the host locale table from `STARLIGHT_LOCALES`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(LOCALES_ENV_VAR).ok())
    }

    /// Context with a fixed, already-known default locale.
    pub fn fixed(locale: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(DefaultLocaleState {
                source: None,
                resolved: Some(Some(locale.into())),
            }),
        }
    }

    pub fn get(&self) -> Option<String> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(resolved) = &state.resolved {
            return resolved.clone();
        }
        let resolved = state.source.as_deref().map(default_locale_from_host);
        tracing::debug!(default_locale = ?resolved, "resolved default locale");
        state.resolved = Some(resolved.clone());
        resolved
    }

    /// Drop the cached value; the next [`get`](Self::get) re-reads the source.
    pub fn invalidate(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .resolved = None;
    }

    /// Swap in a new host locale table, as on a configuration reload.
    pub fn reload(&self, source: Option<String>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.source = source.filter(|s| !s.is_empty());
        state.resolved = None;
    }
}

impl Default for DefaultLocale {
    fn default() -> Self {
        Self::new(None)
    }
}
