//! Shared test utilities for the starlight-announce test suite.
//!
//! Builders for announcements and rendered items, plus fixed UTC instants so
//! targeting tests never depend on the wall clock.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let a = announcement("welcome").show_on(&["/guides/**"]).hide_on(&["/guides/old/*"]);
//! let now = utc("2025-06-15T12:00:00Z");
//! ```

use chrono::{DateTime, Utc};

use crate::config::Announcement;
use crate::display::RenderedAnnouncement;

/// Parse an RFC 3339 timestamp. Panics on bad input.
pub fn utc(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap_or_else(|e| panic!("bad test timestamp {timestamp:?}: {e}"))
        .with_timezone(&Utc)
}

/// Announcement `id` with content `"<id> content"` and all defaults.
pub fn announcement(id: &str) -> Announcement {
    Announcement::new(id, format!("{id} content"))
}

/// Builder-style tweaks for test announcements.
pub trait AnnouncementExt {
    fn show_on(self, patterns: &[&str]) -> Self;
    fn hide_on(self, patterns: &[&str]) -> Self;
    fn between(self, start: Option<&str>, end: Option<&str>) -> Self;
}

impl AnnouncementExt for Announcement {
    fn show_on(mut self, patterns: &[&str]) -> Self {
        self.show_on = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    fn hide_on(mut self, patterns: &[&str]) -> Self {
        self.hide_on = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    fn between(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }
}

/// Rendered, dismissible note with id `id`.
pub fn rendered(id: &str) -> RenderedAnnouncement {
    RenderedAnnouncement {
        id: id.to_string(),
        content: Some(format!("{id} content")),
        link: None,
        variant: Default::default(),
        dismissible: true,
    }
}

/// Ids of a list of announcements, in order.
pub fn ids<'a>(announcements: impl IntoIterator<Item = &'a Announcement>) -> Vec<&'a str> {
    announcements.into_iter().map(|a| a.id.as_str()).collect()
}
