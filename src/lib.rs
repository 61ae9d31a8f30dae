//! # Starlight Announce
//!
//! Announcement banners for documentation sites: validate what the site
//! author configured, then decide on every page visit which banners are
//! active, in which language, in what order, and how they are presented.
//!
//! # Architecture: Validate Once, Resolve per Visit
//!
//! ```text
//! announcements.toml ─▶ validate ─▶ PluginConfig (shared, read-only)
//!                                        │
//!      path, locale, now ─▶ targeting ◀──┘
//!                               │
//!                    active announcements ─▶ locale ─▶ display ─▶ Banner
//!                                                         ▲
//!                                             dismissal ──┘
//! ```
//!
//! Validation is the only fallible step on the way in, and it fails loudly:
//! every violation is reported with the path of the offending field and the
//! host refuses to start. After that, resolution is a set of total
//! functions: a missing translation resolves to `None`, a path that matches
//! nothing yields an empty banner.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Canonical data model, config file loading, stock `announcements.toml` |
//! | [`validate`] | Raw input → canonical config, with field-path-annotated issues |
//! | [`matcher`] | Path normalization, glob compilation, bounded LRU matcher cache |
//! | [`schedule`] | ISO 8601 parsing and the UTC start/end-of-day window check |
//! | [`locale`] | Locale fallback chain and the process-scoped default locale |
//! | [`targeting`] | Active-announcement filtering and the [`Announcer`](targeting::Announcer) engine |
//! | [`display`] | Stack / first / rotate presentation and the rotation state machine |
//! | [`dismissal`] | Per-visitor dismissal stores |
//! | [`module`] | Runtime configuration module for the rendering layer |
//! | [`i18n`] | Built-in UI labels (dismiss, learn more, indicator) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Invalid Dates Fail Validation
//!
//! An unparsable `startDate` or `endDate` is a configuration error, never a
//! silently hidden banner. The schedule check still guards against dates
//! that bypassed validation (a hand-edited runtime manifest): such an
//! announcement is treated as inactive and a warning is logged.
//!
//! ## `enabled = false` Short-Circuits
//!
//! A disabled configuration resolves to no active announcements at all,
//! rather than computing them and hiding the result.
//!
//! ## Explicit Context Instead of Globals
//!
//! The matcher cache and the default locale are owned by an
//! [`Announcer`](targeting::Announcer), not module-level statics, so tests
//! build isolated instances and a configuration reload has an obvious place
//! to invalidate state.

pub mod config;
pub mod dismissal;
pub mod display;
pub mod i18n;
pub mod locale;
pub mod matcher;
pub mod module;
pub mod output;
pub mod schedule;
pub mod targeting;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
