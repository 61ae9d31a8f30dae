//! Configuration validation.
//!
//! Turns raw, untyped user input into a canonical [`PluginConfig`], or fails
//! with every violation found, each tagged with the path of the offending
//! field (`announcements[2].id`, `announcements[0].showOn[1]`, ...).
//!
//! ## Rules
//!
//! | Field | Rule | Default |
//! |-------|------|---------|
//! | `enabled` | boolean | `true` |
//! | `displayMode` | `stack`, `first` or `rotate` | `stack` |
//! | `rotateInterval` | integer ≥ 500 (ms); smaller values are rejected, not clamped | `5000` |
//! | `showRotateIndicator` | boolean | `true` |
//! | `announcements[].id` | non-empty, `[A-Za-z0-9_-]+`, unique across the list | required |
//! | `announcements[].content` | string or non-empty locale map | required |
//! | `announcements[].link.href` | no `javascript:`, `data:` or `vbscript:` scheme | |
//! | `announcements[].variant` | `note`, `tip`, `caution` or `danger` | `note` |
//! | `announcements[].dismissible` | boolean | `true` |
//! | `announcements[].startDate/endDate` | parseable ISO 8601 | unset |
//! | `announcements[].showOn/hideOn` | lists of valid glob patterns | `["/**"]` / `[]` |
//!
//! `null` counts as absent. Unknown keys are rejected.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::config::{
    Announcement, DisplayMode, Link, LocalizableString, MIN_ROTATE_INTERVAL_MS, PluginConfig,
    Variant, default_show_on,
};
use crate::{matcher, schedule};

const CONFIG_KEYS: [&str; 5] = [
    "enabled",
    "displayMode",
    "rotateInterval",
    "showRotateIndicator",
    "announcements",
];

const ANNOUNCEMENT_KEYS: [&str; 9] = [
    "id",
    "content",
    "link",
    "variant",
    "dismissible",
    "startDate",
    "endDate",
    "showOn",
    "hideOn",
];

const LINK_KEYS: [&str; 2] = ["text", "href"];

const UNSAFE_URL_SCHEMES: [&str; 3] = ["javascript:", "data:", "vbscript:"];

/// One violation, located by the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Aggregate validation failure carrying one issue per violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid announcement configuration: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

fn summarize(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Issues reported for exactly `path`.
    pub fn issues_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |issue| issue.path == path)
    }
}

/// Whether `id` is a valid announcement id: non-empty `[A-Za-z0-9_-]+`.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Whether `href` is free of executable-script URL schemes.
pub fn is_safe_href(href: &str) -> bool {
    let normalized = href.trim().to_ascii_lowercase();
    !UNSAFE_URL_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

/// Validate raw configuration and produce the canonical form.
///
/// `null` input is the empty configuration.
pub fn validate(raw: &Value) -> Result<PluginConfig, ValidationError> {
    let mut v = Validator::default();
    let config = v.config(raw);
    match config {
        Some(config) if v.issues.is_empty() => Ok(config),
        _ => Err(ValidationError { issues: v.issues }),
    }
}

fn field(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn index(parent: &str, i: usize) -> String {
    format!("{parent}[{i}]")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Present, non-null value of `key`.
fn get<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

#[derive(Default)]
struct Validator {
    issues: Vec<Issue>,
}

impl Validator {
    fn issue(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn expected(&mut self, path: String, expected: &str, found: &Value) {
        self.issue(path, format!("expected {expected}, found {}", type_name(found)));
    }

    fn object<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(obj) => Some(obj),
            other => {
                self.expected(path.to_string(), "an object", other);
                None
            }
        }
    }

    fn reject_unknown(&mut self, path: &str, obj: &Map<String, Value>, known: &[&str]) {
        for key in obj.keys().filter(|k| !known.contains(&k.as_str())) {
            self.issue(
                field(path, key),
                format!("unknown field, expected one of: {}", known.join(", ")),
            );
        }
    }

    fn bool(&mut self, obj: &Map<String, Value>, path: &str, key: &str, default: bool) -> bool {
        match get(obj, key) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.expected(field(path, key), "a boolean", other);
                default
            }
        }
    }

    fn string<'a>(&mut self, path: String, value: &'a Value) -> Option<&'a str> {
        match value {
            Value::String(s) => Some(s),
            other => {
                self.expected(path, "a string", other);
                None
            }
        }
    }

    fn config(&mut self, raw: &Value) -> Option<PluginConfig> {
        if raw.is_null() {
            return Some(PluginConfig::default());
        }
        let obj = self.object("", raw)?;
        self.reject_unknown("", obj, &CONFIG_KEYS);

        let mut config = PluginConfig {
            enabled: self.bool(obj, "", "enabled", true),
            show_rotate_indicator: self.bool(obj, "", "showRotateIndicator", true),
            ..PluginConfig::default()
        };

        if let Some(value) = get(obj, "displayMode")
            && let Some(mode) = self.string("displayMode".into(), value)
        {
            match DisplayMode::parse(mode) {
                Some(mode) => config.display_mode = mode,
                None => self.issue(
                    "displayMode",
                    format!("invalid display mode {mode:?}, expected stack, first or rotate"),
                ),
            }
        }

        if let Some(value) = get(obj, "rotateInterval")
            && let Some(interval) = self.rotate_interval(value)
        {
            config.rotate_interval = interval;
        }

        if let Some(value) = get(obj, "announcements") {
            config.announcements = self.announcements(value);
        }

        Some(config)
    }

    fn rotate_interval(&mut self, value: &Value) -> Option<u64> {
        let path = "rotateInterval";
        let Value::Number(n) = value else {
            self.expected(path.into(), "an integer", value);
            return None;
        };
        let interval = if let Some(u) = n.as_u64() {
            i128::from(u)
        } else if let Some(i) = n.as_i64() {
            i128::from(i)
        } else {
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => f as i128,
                _ => {
                    self.issue(path, "rotation interval must be an integer");
                    return None;
                }
            }
        };
        if interval < i128::from(MIN_ROTATE_INTERVAL_MS) {
            self.issue(
                path,
                format!("rotation interval must be at least {MIN_ROTATE_INTERVAL_MS}ms, got {interval}"),
            );
            return None;
        }
        match u64::try_from(interval) {
            Ok(interval) => Some(interval),
            Err(_) => {
                self.issue(path, format!("rotation interval is too large, got {interval}"));
                None
            }
        }
    }

    fn announcements(&mut self, value: &Value) -> Vec<Announcement> {
        let path = "announcements";
        let Value::Array(items) = value else {
            self.expected(path.into(), "an array", value);
            return Vec::new();
        };

        let mut announcements = Vec::with_capacity(items.len());
        let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            if let Some(id) = item.get("id").and_then(Value::as_str)
                && is_valid_id(id)
            {
                positions.entry(id).or_default().push(i);
            }
            if let Some(announcement) = self.announcement(&index(path, i), item) {
                announcements.push(announcement);
            }
        }
        self.duplicates(path, positions);
        announcements
    }

    /// Every position of a shared id gets an issue naming the others.
    fn duplicates(&mut self, path: &str, positions: HashMap<&str, Vec<usize>>) {
        let mut duplicated: Vec<(&str, Vec<usize>)> = positions
            .into_iter()
            .filter(|(_, at)| at.len() > 1)
            .collect();
        duplicated.sort_by_key(|(_, at)| at[0]);

        for (id, at) in duplicated {
            for &i in &at {
                let others = at
                    .iter()
                    .filter(|&&j| j != i)
                    .map(|&j| index(path, j))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.issue(
                    field(&index(path, i), "id"),
                    format!(
                        "duplicate announcement id {id:?}, also used at {others}; each announcement must have a unique id"
                    ),
                );
            }
        }
    }

    fn announcement(&mut self, path: &str, value: &Value) -> Option<Announcement> {
        let obj = self.object(path, value)?;
        self.reject_unknown(path, obj, &ANNOUNCEMENT_KEYS);

        let id = self.id(path, obj);
        let content = match get(obj, "content") {
            Some(value) => self.localizable(field(path, "content"), value),
            None => {
                self.issue(field(path, "content"), "missing required field");
                None
            }
        };
        let link = get(obj, "link").map(|value| self.link(&field(path, "link"), value));

        let variant = match get(obj, "variant") {
            None => Some(Variant::default()),
            Some(value) => self
                .string(field(path, "variant"), value)
                .and_then(|raw| {
                    let parsed = Variant::parse(raw);
                    if parsed.is_none() {
                        self.issue(
                            field(path, "variant"),
                            format!("invalid variant {raw:?}, expected note, tip, caution or danger"),
                        );
                    }
                    parsed
                }),
        };

        let dismissible = self.bool(obj, path, "dismissible", true);
        let start_date = self.date(path, obj, "startDate");
        let end_date = self.date(path, obj, "endDate");
        let show_on = self.patterns(path, obj, "showOn").unwrap_or_else(default_show_on);
        let hide_on = self.patterns(path, obj, "hideOn").unwrap_or_default();

        Some(Announcement {
            id: id?,
            content: content?,
            link: link.flatten(),
            variant: variant?,
            dismissible,
            start_date,
            end_date,
            show_on,
            hide_on,
        })
    }

    fn id(&mut self, path: &str, obj: &Map<String, Value>) -> Option<String> {
        let path = field(path, "id");
        let Some(value) = get(obj, "id") else {
            self.issue(path, "missing required field");
            return None;
        };
        let id = self.string(path.clone(), value)?;
        if id.is_empty() {
            self.issue(path, "announcement id cannot be empty");
            return None;
        }
        if !is_valid_id(id) {
            self.issue(
                path,
                format!(
                    "announcement id {id:?} must contain only alphanumeric characters, hyphens, and underscores"
                ),
            );
            return None;
        }
        Some(id.to_string())
    }

    fn localizable(&mut self, path: String, value: &Value) -> Option<LocalizableString> {
        match value {
            Value::String(s) => Some(LocalizableString::Plain(s.clone())),
            Value::Object(map) => {
                if map.is_empty() {
                    self.issue(path, "locale map must have at least one entry");
                    return None;
                }
                let before = self.issues.len();
                let mut out = indexmap::IndexMap::with_capacity(map.len());
                for (locale, text) in map {
                    if locale.is_empty() {
                        self.issue(path.clone(), "locale code cannot be empty");
                        continue;
                    }
                    if let Some(text) = self.string(field(&path, locale), text) {
                        out.insert(locale.clone(), text.to_string());
                    }
                }
                (self.issues.len() == before).then_some(LocalizableString::PerLocale(out))
            }
            other => {
                self.expected(path, "a string or a locale map", other);
                None
            }
        }
    }

    fn link(&mut self, path: &str, value: &Value) -> Option<Link> {
        let obj = self.object(path, value)?;
        self.reject_unknown(path, obj, &LINK_KEYS);

        let text = match get(obj, "text") {
            Some(value) => self.localizable(field(path, "text"), value),
            None => {
                self.issue(field(path, "text"), "missing required field");
                None
            }
        };

        let href_path = field(path, "href");
        let href = match get(obj, "href") {
            Some(value) => self.string(href_path.clone(), value).and_then(|href| {
                if is_safe_href(href) {
                    Some(href.to_string())
                } else {
                    self.issue(
                        href_path,
                        "javascript:, data:, and vbscript: URLs are not allowed",
                    );
                    None
                }
            }),
            None => {
                self.issue(href_path, "missing required field");
                None
            }
        };

        Some(Link {
            text: text?,
            href: href?,
        })
    }

    fn date(&mut self, path: &str, obj: &Map<String, Value>, key: &str) -> Option<String> {
        let path = field(path, key);
        let raw = self.string(path.clone(), get(obj, key)?)?;
        if schedule::parse_date(raw).is_none() {
            self.issue(
                path,
                format!(
                    "invalid date {raw:?}, use ISO 8601 (YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss)"
                ),
            );
            return None;
        }
        Some(raw.to_string())
    }

    /// `None` when absent or invalid; issues are recorded for the latter.
    fn patterns(&mut self, path: &str, obj: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
        let path = field(path, key);
        let value = get(obj, key)?;
        let Value::Array(items) = value else {
            self.expected(path, "an array of glob patterns", value);
            return None;
        };

        let before = self.issues.len();
        let mut patterns = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let Some(pattern) = self.string(index(&path, i), item) else {
                continue;
            };
            match matcher::compile(pattern) {
                Ok(_) => patterns.push(pattern.to_string()),
                Err(err) => self.issue(index(&path, i), err.to_string()),
            }
        }
        (self.issues.len() == before).then_some(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issues(raw: Value) -> Vec<Issue> {
        validate(&raw).unwrap_err().issues
    }

    fn paths(raw: Value) -> Vec<String> {
        issues(raw).into_iter().map(|i| i.path).collect()
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn null_and_empty_are_defaults() {
        assert_eq!(validate(&Value::Null).unwrap(), PluginConfig::default());
        assert_eq!(validate(&json!({})).unwrap(), PluginConfig::default());
    }

    #[test]
    fn announcement_defaults_filled() {
        let config = validate(&json!({"announcements": [{"id": "a", "content": "x"}]})).unwrap();
        let a = &config.announcements[0];
        assert_eq!(a.variant, Variant::Note);
        assert!(a.dismissible);
        assert_eq!(a.show_on, vec!["/**"]);
        assert!(a.hide_on.is_empty());
        assert_eq!(a.link, None);
        assert_eq!(a.start_date, None);
    }

    #[test]
    fn full_config_is_canonicalized() {
        let config = validate(&json!({
            "enabled": false,
            "displayMode": "rotate",
            "rotateInterval": 800,
            "showRotateIndicator": false,
            "announcements": [{
                "id": "launch_2025",
                "content": {"en": "Launch!", "fr": "Lancement !"},
                "link": {"text": "Read", "href": "  https://example.com "},
                "variant": "danger",
                "dismissible": false,
                "startDate": "2025-06-01",
                "endDate": "2025-06-30T12:00:00Z",
                "showOn": ["/guides/**"],
                "hideOn": ["/guides/legacy/*"]
            }]
        }))
        .unwrap();
        assert!(!config.enabled);
        assert_eq!(config.display_mode, DisplayMode::Rotate);
        assert_eq!(config.rotate_interval, 800);
        assert!(!config.show_rotate_indicator);
        let a = &config.announcements[0];
        assert_eq!(a.variant, Variant::Danger);
        assert!(!a.dismissible);
        assert_eq!(a.link.as_ref().unwrap().text, LocalizableString::from("Read"));
        assert_eq!(a.hide_on, vec!["/guides/legacy/*"]);
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let config = validate(&json!({"displayMode": null, "announcements": null})).unwrap();
        assert_eq!(config, PluginConfig::default());
    }

    // =========================================================================
    // Top-level rules
    // =========================================================================

    #[test]
    fn root_must_be_object() {
        assert_eq!(paths(json!([1, 2])), vec![""]);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert_eq!(paths(json!({"displaymode": "stack"})), vec!["displaymode"]);
        assert_eq!(
            paths(json!({"announcements": [{"id": "a", "content": "x", "showon": []}]})),
            vec!["announcements[0].showon"]
        );
    }

    #[test]
    fn invalid_display_mode() {
        assert_eq!(paths(json!({"displayMode": "carousel"})), vec!["displayMode"]);
        assert_eq!(paths(json!({"displayMode": 3})), vec!["displayMode"]);
    }

    #[test]
    fn rotate_interval_minimum_is_enforced_not_clamped() {
        let found = issues(json!({"rotateInterval": 499}));
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("at least 500ms"));
        assert!(validate(&json!({"rotateInterval": 500})).is_ok());
    }

    #[test]
    fn rotate_interval_must_be_integer() {
        assert_eq!(paths(json!({"rotateInterval": 1500.5})), vec!["rotateInterval"]);
        assert_eq!(paths(json!({"rotateInterval": "fast"})), vec!["rotateInterval"]);
        assert_eq!(
            validate(&json!({"rotateInterval": 1500.0})).unwrap().rotate_interval,
            1500
        );
    }

    #[test]
    fn rotate_interval_beyond_i64_is_still_an_integer() {
        assert_eq!(
            validate(&json!({"rotateInterval": u64::MAX})).unwrap().rotate_interval,
            u64::MAX
        );
        let found = issues(json!({"rotateInterval": 1e30}));
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("too large"));
        assert!(issues(json!({"rotateInterval": -1}))[0].message.contains("at least 500ms"));
    }

    #[test]
    fn enabled_must_be_boolean() {
        assert_eq!(paths(json!({"enabled": "yes"})), vec!["enabled"]);
    }

    // =========================================================================
    // Announcement rules
    // =========================================================================

    #[test]
    fn id_rules() {
        assert_eq!(
            paths(json!({"announcements": [{"content": "x"}]})),
            vec!["announcements[0].id"]
        );
        let empty = issues(json!({"announcements": [{"id": "", "content": "x"}]}));
        assert_eq!(empty.len(), 1);
        assert!(empty[0].message.contains("cannot be empty"));
        assert_eq!(
            paths(json!({"announcements": [{"id": "has space", "content": "x"}]})),
            vec!["announcements[0].id"]
        );
        assert!(validate(&json!({"announcements": [{"id": "A-b_9", "content": "x"}]})).is_ok());
    }

    #[test]
    fn content_rules() {
        assert_eq!(
            paths(json!({"announcements": [{"id": "a"}]})),
            vec!["announcements[0].content"]
        );
        assert_eq!(
            paths(json!({"announcements": [{"id": "a", "content": {}}]})),
            vec!["announcements[0].content"]
        );
        assert_eq!(
            paths(json!({"announcements": [{"id": "a", "content": {"en": 1}}]})),
            vec!["announcements[0].content.en"]
        );
        assert_eq!(
            paths(json!({"announcements": [{"id": "a", "content": 42}]})),
            vec!["announcements[0].content"]
        );
    }

    #[test]
    fn unsafe_hrefs_rejected() {
        for href in [
            "javascript:alert(1)",
            "  JavaScript:alert(1)",
            "data:text/html,hi",
            "VBSCRIPT:msgbox",
        ] {
            let raw = json!({"announcements": [{
                "id": "a", "content": "x", "link": {"text": "t", "href": href}
            }]});
            assert_eq!(paths(raw), vec!["announcements[0].link.href"], "{href}");
        }
    }

    #[test]
    fn safe_hrefs_accepted() {
        assert!(is_safe_href("/docs"));
        assert!(is_safe_href("https://example.com/javascript:"));
        assert!(is_safe_href("mailto:team@example.com"));
    }

    #[test]
    fn link_requires_text_and_href() {
        let raw = json!({"announcements": [{"id": "a", "content": "x", "link": {}}]});
        assert_eq!(
            paths(raw),
            vec!["announcements[0].link.text", "announcements[0].link.href"]
        );
    }

    #[test]
    fn invalid_variant() {
        assert_eq!(
            paths(json!({"announcements": [{"id": "a", "content": "x", "variant": "warning"}]})),
            vec!["announcements[0].variant"]
        );
    }

    #[test]
    fn unparsable_dates_rejected() {
        let raw = json!({"announcements": [{
            "id": "a", "content": "x", "startDate": "June 1st", "endDate": "2025-02-30"
        }]});
        assert_eq!(
            paths(raw),
            vec!["announcements[0].startDate", "announcements[0].endDate"]
        );
    }

    #[test]
    fn iso_dates_with_offsets_and_partial_dates_accepted() {
        let forms = [
            "2025-06-01T09:00Z",
            "2025-06-01T09:00+02:00",
            "2025-06-01T09:00:00.000+0200",
            "2025-06",
        ];
        for form in forms {
            let raw = json!({"announcements": [{"id": "a", "content": "x", "startDate": form}]});
            let config = validate(&raw).unwrap_or_else(|err| panic!("{form}: {err}"));
            assert_eq!(config.announcements[0].start_date.as_deref(), Some(form));
        }
    }

    #[test]
    fn malformed_patterns_rejected() {
        let raw = json!({"announcements": [{
            "id": "a", "content": "x", "showOn": ["/ok/**", "/bad/[x"], "hideOn": [7]
        }]});
        assert_eq!(
            paths(raw),
            vec!["announcements[0].showOn[1]", "announcements[0].hideOn[0]"]
        );
    }

    #[test]
    fn patterns_must_be_array() {
        assert_eq!(
            paths(json!({"announcements": [{"id": "a", "content": "x", "showOn": "/**"}]})),
            vec!["announcements[0].showOn"]
        );
    }

    // =========================================================================
    // Cross-field rules
    // =========================================================================

    #[test]
    fn duplicate_ids_cite_every_position() {
        let raw = json!({"announcements": [
            {"id": "welcome", "content": "a"},
            {"id": "other", "content": "b"},
            {"id": "welcome", "content": "c"}
        ]});
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(err.issues_at("announcements[0].id").count(), 1);
        assert_eq!(err.issues_at("announcements[2].id").count(), 1);
        assert!(err.issues[0].message.contains("announcements[2]"));
        assert!(err.issues[1].message.contains("announcements[0]"));
    }

    #[test]
    fn every_violation_is_reported() {
        let raw = json!({
            "rotateInterval": 100,
            "displayMode": "spin",
            "announcements": [
                {"id": "bad id", "content": "x"},
                {"id": "b", "content": "x", "link": {"text": "t", "href": "javascript:x"}},
                {"id": "c", "content": "x", "endDate": "whenever"}
            ]
        });
        assert_eq!(
            paths(raw),
            vec![
                "displayMode",
                "rotateInterval",
                "announcements[0].id",
                "announcements[1].link.href",
                "announcements[2].endDate",
            ]
        );
    }

    #[test]
    fn error_display_lists_issues() {
        let err = validate(&json!({"rotateInterval": 1})).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("invalid announcement configuration"));
        assert!(text.contains("rotateInterval: rotation interval must be at least 500ms"));
    }
}
