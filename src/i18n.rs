//! UI strings for the banner chrome.
//!
//! Announcement content is localized by the site author through
//! [`LocalizableString`](crate::config::LocalizableString); this module only
//! covers the fixed labels around it: the dismiss button, the link
//! affordance, and the rotation indicator.
//!
//! Lookups fall back from the exact locale to its base language (`fr-CA` →
//! `fr`) and then to English.

use serde_json::{Map, Value};

use crate::locale::FALLBACK_LOCALE;

/// Locales with built-in UI strings.
pub const LOCALES: [&str; 5] = ["en", "fr", "es", "de", "nl"];

/// A translatable UI label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiString {
    Dismiss,
    LearnMore,
    IndicatorLabel,
    /// Accepts `{current}` and `{total}` placeholders.
    GoToAnnouncement,
}

impl UiString {
    pub const ALL: [UiString; 4] = [
        Self::Dismiss,
        Self::LearnMore,
        Self::IndicatorLabel,
        Self::GoToAnnouncement,
    ];

    /// Key under which the host's translation system stores this string.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dismiss => "starlightAnnouncement.dismiss",
            Self::LearnMore => "starlightAnnouncement.learnMore",
            Self::IndicatorLabel => "starlightAnnouncement.indicatorLabel",
            Self::GoToAnnouncement => "starlightAnnouncement.goToAnnouncement",
        }
    }
}

fn lookup(locale: &str, key: UiString) -> Option<&'static str> {
    use UiString::*;
    let text = match (locale, key) {
        ("en", Dismiss) => "Dismiss",
        ("en", LearnMore) => "Learn more",
        ("en", IndicatorLabel) => "Announcement navigation",
        ("en", GoToAnnouncement) => "Go to announcement {current} of {total}",
        ("fr", Dismiss) => "Fermer",
        ("fr", LearnMore) => "En savoir plus",
        ("fr", IndicatorLabel) => "Navigation des annonces",
        ("fr", GoToAnnouncement) => "Aller à l'annonce {current} sur {total}",
        ("es", Dismiss) => "Cerrar",
        ("es", LearnMore) => "Saber mas",
        ("es", IndicatorLabel) => "Navegación de anuncios",
        ("es", GoToAnnouncement) => "Ir al anuncio {current} de {total}",
        ("de", Dismiss) => "Schliessen",
        ("de", LearnMore) => "Mehr erfahren",
        ("de", IndicatorLabel) => "Ankündigungsnavigation",
        ("de", GoToAnnouncement) => "Zur Ankündigung {current} von {total}",
        ("nl", Dismiss) => "Sluiten",
        ("nl", LearnMore) => "Meer informatie",
        ("nl", IndicatorLabel) => "Aankondigingsnavigatie",
        ("nl", GoToAnnouncement) => "Ga naar aankondiging {current} van {total}",
        _ => return None,
    };
    Some(text)
}

/// Translate a UI label, falling back to the base language, then English.
pub fn translate(key: UiString, locale: Option<&str>) -> &'static str {
    let locale = locale.unwrap_or(FALLBACK_LOCALE);
    let base = locale.split(['-', '_']).next().unwrap_or(locale);
    lookup(locale, key)
        .or_else(|| lookup(base, key))
        .or_else(|| lookup(FALLBACK_LOCALE, key))
        .unwrap_or_default()
}

/// Accessible label of the indicator dot for item `current` (1-based).
pub fn go_to_label(locale: Option<&str>, current: usize, total: usize) -> String {
    translate(UiString::GoToAnnouncement, locale)
        .replace("{current}", &current.to_string())
        .replace("{total}", &total.to_string())
}

/// All built-in strings as `{locale: {key: text}}`, for injection into the
/// host's translation system.
pub fn translations_json() -> Value {
    let mut locales = Map::new();
    for locale in LOCALES {
        let strings: Map<String, Value> = UiString::ALL
            .into_iter()
            .filter_map(|key| lookup(locale, key).map(|text| (key.key().to_string(), text.into())))
            .collect();
        locales.insert(locale.to_string(), Value::Object(strings));
    }
    Value::Object(locales)
}
