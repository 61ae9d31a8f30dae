//! Announcement configuration module.
//!
//! Defines the canonical, fully-defaulted configuration shared read-only by
//! every page-view resolution, and loads it from `announcements.toml` or a
//! JSON file.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! enabled = true
//! displayMode = "stack"        # "stack" | "first" | "rotate"
//! rotateInterval = 5000        # milliseconds, at least 500
//! showRotateIndicator = true
//!
//! [[announcements]]
//! id = "welcome"               # unique, [A-Za-z0-9_-]+
//! content = "Version 2 is out!"
//! variant = "tip"              # "note" | "tip" | "caution" | "danger"
//! dismissible = true
//! startDate = "2025-06-01"     # ISO 8601, optional
//! endDate = "2025-06-30"       # inclusive through the whole day (UTC)
//! showOn = ["/**"]
//! hideOn = ["/blog/**"]
//!
//! [announcements.link]
//! text = { en = "Read more", fr = "En savoir plus" }
//! href = "/releases/v2"
//! ```
//!
//! ## Loading
//!
//! Files are read into an untyped tree and handed to
//! [`validate`](crate::validate::validate), which reports every violation at
//! once instead of stopping at the first bad field. Unknown keys are rejected
//! to catch typos early.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::validate::{self, ValidationError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Text that is either the same for every locale or given per locale.
///
/// Per-locale maps keep their declaration order; the last step of the
/// locale fallback chain picks the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizableString {
    Plain(String),
    PerLocale(IndexMap<String, String>),
}

impl From<&str> for LocalizableString {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for LocalizableString {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizableString {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::PerLocale(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Call-to-action link attached to an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: LocalizableString,
    /// Never an executable-script URL; enforced at validation time.
    pub href: String,
}

/// Visual variant, matching the host's aside styles. No effect on targeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Note,
    Tip,
    Caution,
    Danger,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Self::Note, Self::Tip, Self::Caution, Self::Danger];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Caution => "caution",
            Self::Danger => "danger",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

/// How several simultaneously active announcements are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Every active announcement at once, in list order.
    #[default]
    Stack,
    /// Only the first active announcement.
    First,
    /// One at a time, advancing on a timer or by user navigation.
    Rotate,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [Self::Stack, Self::First, Self::Rotate];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::First => "first",
            Self::Rotate => "rotate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

pub const DEFAULT_ROTATE_INTERVAL_MS: u64 = 5000;
pub const MIN_ROTATE_INTERVAL_MS: u64 = 500;

/// A single configured banner with its targeting rules.
///
/// Declared once at configuration time and never mutated afterwards. The
/// `id` keys dismissal persistence, so changing what an id means silently
/// orphans visitors' dismissal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub content: LocalizableString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default = "default_true")]
    pub dismissible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default = "default_show_on")]
    pub show_on: Vec<String>,
    #[serde(default)]
    pub hide_on: Vec<String>,
}

impl Announcement {
    /// An announcement with every optional field at its default.
    pub fn new(id: impl Into<String>, content: impl Into<LocalizableString>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            link: None,
            variant: Variant::default(),
            dismissible: true,
            start_date: None,
            end_date: None,
            show_on: default_show_on(),
            hide_on: Vec::new(),
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_show_on() -> Vec<String> {
    vec!["/**".to_string()]
}

fn default_rotate_interval() -> u64 {
    DEFAULT_ROTATE_INTERVAL_MS
}

/// Canonical, post-validation configuration.
///
/// Produced once and shared read-only; announcement ids are pairwise
/// distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub display_mode: DisplayMode,
    /// Milliseconds between automatic advances in rotate mode.
    #[serde(default = "default_rotate_interval")]
    pub rotate_interval: u64,
    #[serde(default = "default_true")]
    pub show_rotate_indicator: bool,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display_mode: DisplayMode::default(),
            rotate_interval: DEFAULT_ROTATE_INTERVAL_MS,
            show_rotate_indicator: true,
            announcements: Vec::new(),
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// On-disk config formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// `.json` files are JSON, everything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Convert a TOML tree into the untyped JSON tree the validator walks.
///
/// TOML datetimes become their ISO 8601 string form.
pub fn toml_to_json(value: toml::Value) -> serde_json::Value {
    use serde_json::Value as Json;
    match value {
        toml::Value::String(s) => Json::String(s),
        toml::Value::Integer(i) => Json::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        toml::Value::Boolean(b) => Json::Bool(b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(items) => Json::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Json::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Parse config text into the raw, unvalidated tree.
pub fn parse_raw(content: &str, format: Format) -> Result<serde_json::Value, ConfigError> {
    match format {
        Format::Toml => {
            let value: toml::Value = toml::from_str(content)?;
            Ok(toml_to_json(value))
        }
        Format::Json => Ok(serde_json::from_str(content)?),
    }
}

/// Parse and validate config text.
pub fn parse_config(content: &str, format: Format) -> Result<PluginConfig, ConfigError> {
    let raw = parse_raw(content, format)?;
    Ok(validate::validate(&raw)?)
}

/// Load and validate a config file, picking the format from its extension.
pub fn load_config(path: &Path) -> Result<PluginConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, Format::from_path(path))
}

/// Returns a fully-commented stock `announcements.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Announcement Configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Set to false to turn every announcement off without deleting them.
enabled = true

# How several active announcements are shown:
#   "stack"  - all of them, one above the other
#   "first"  - only the first one in list order
#   "rotate" - one at a time, cycling every rotateInterval
displayMode = "stack"

# Milliseconds between rotations (rotate mode only). Minimum 500.
rotateInterval = 5000

# Show the dot indicators in rotate mode (only when 2+ are active).
showRotateIndicator = true

# ---------------------------------------------------------------------------
# Announcements
# ---------------------------------------------------------------------------
# Each announcement needs a unique id (letters, digits, '-' and '_'). The id
# remembers dismissals, so do not reuse an id for different content.
#
# [[announcements]]
# id = "welcome"
# content = "Welcome to the new docs!"
# # or per locale:
# # content = { en = "Welcome!", fr = "Bienvenue !" }
# variant = "note"          # note | tip | caution | danger
# dismissible = true
# startDate = "2025-06-01"  # ISO 8601; omit for no start
# endDate = "2025-06-30"    # inclusive through the end of the day (UTC)
# showOn = ["/**"]          # glob patterns; * within a segment, ** across
# hideOn = []               # takes precedence over showOn
#
# [announcements.link]
# text = "Learn more"
# href = "/getting-started"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = PluginConfig::default();
        assert!(config.enabled);
        assert_eq!(config.display_mode, DisplayMode::Stack);
        assert_eq!(config.rotate_interval, 5000);
        assert!(config.show_rotate_indicator);
        assert!(config.announcements.is_empty());
    }

    #[test]
    fn new_announcement_has_defaults() {
        let a = Announcement::new("welcome", "Hello");
        assert_eq!(a.variant, Variant::Note);
        assert!(a.dismissible);
        assert_eq!(a.show_on, vec!["/**"]);
        assert!(a.hide_on.is_empty());
        assert_eq!(a.content, LocalizableString::Plain("Hello".into()));
    }

    #[test]
    fn variant_and_mode_parse() {
        assert_eq!(Variant::parse("danger"), Some(Variant::Danger));
        assert_eq!(Variant::parse("Danger"), None);
        assert_eq!(DisplayMode::parse("rotate"), Some(DisplayMode::Rotate));
        assert_eq!(DisplayMode::parse("carousel"), None);
    }

    #[test]
    fn localizable_string_serializes_untagged() {
        let plain = LocalizableString::from("Hi");
        assert_eq!(serde_json::to_string(&plain).unwrap(), r#""Hi""#);

        let map: LocalizableString = [("fr", "Salut"), ("en", "Hi")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"fr":"Salut","en":"Hi"}"#
        );
    }

    #[test]
    fn announcement_serializes_camel_case() {
        let mut a = Announcement::new("a", "x");
        a.start_date = Some("2025-06-01".into());
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["startDate"], "2025-06-01");
        assert_eq!(json["showOn"][0], "/**");
        assert!(json.get("endDate").is_none());
        assert!(json.get("link").is_none());
    }

    // =========================================================================
    // Loading tests
    // =========================================================================

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("announcements")), Format::Toml);
    }

    #[test]
    fn toml_datetime_becomes_string() {
        let value: toml::Value = toml::from_str("d = 2025-06-01").unwrap();
        let json = toml_to_json(value);
        assert_eq!(json["d"], "2025-06-01");
    }

    #[test]
    fn toml_tables_keep_declaration_order() {
        let value: toml::Value = toml::from_str("[m]\nfr = \"a\"\nen = \"b\"\nde = \"c\"").unwrap();
        let json = toml_to_json(value);
        let keys: Vec<&String> = json["m"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["fr", "en", "de"]);
    }

    #[test]
    fn parse_config_toml() {
        let config = parse_config(
            r#"
displayMode = "rotate"
rotateInterval = 3000

[[announcements]]
id = "welcome"
content = { en = "Hi", fr = "Salut" }
endDate = 2025-06-30
"#,
            Format::Toml,
        )
        .unwrap();
        assert_eq!(config.display_mode, DisplayMode::Rotate);
        assert_eq!(config.rotate_interval, 3000);
        assert_eq!(config.announcements.len(), 1);
        assert_eq!(config.announcements[0].end_date.as_deref(), Some("2025-06-30"));
    }

    #[test]
    fn parse_config_json() {
        let config = parse_config(
            r#"{"displayMode": "first", "announcements": [{"id": "a", "content": "x"}]}"#,
            Format::Json,
        )
        .unwrap();
        assert_eq!(config.display_mode, DisplayMode::First);
        assert_eq!(config.announcements[0].id, "a");
    }

    #[test]
    fn invalid_toml_is_error() {
        let result = parse_config("this is not valid toml [[[", Format::Toml);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_values_are_error() {
        let result = parse_config("rotateInterval = 100", Format::Toml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("announcements.toml");
        fs::write(
            &path,
            r#"
[[announcements]]
id = "a"
content = "x"
"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.announcements.len(), 1);
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).unwrap();
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config = parse_config(stock_config_toml(), Format::Toml).unwrap();
        assert_eq!(config, PluginConfig::default());
    }
}
