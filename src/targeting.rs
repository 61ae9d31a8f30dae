//! Targeting: which announcements are active for a page visit.
//!
//! An announcement is admitted for a path at an instant iff
//!
//! 1. its scheduling window contains the instant, and
//! 2. no `hideOn` pattern matches the path, and
//! 3. at least one `showOn` pattern matches the path.
//!
//! `hideOn` is checked first and wins ties. Both lists see the same
//! normalized path. Filtering is stable: active announcements keep their
//! configured order.
//!
//! [`active_announcements`] is a pure function of its inputs, with the clock
//! injected, so it can run concurrently for independent page views against
//! the one shared configuration. [`Announcer`] bundles that configuration
//! with the matcher cache and default-locale context a host needs per
//! process.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{Announcement, PluginConfig};
use crate::dismissal::DismissalStore;
use crate::display::{Banner, RenderedAnnouncement, RenderedLink};
use crate::locale::DefaultLocale;
use crate::matcher::{MatcherCache, normalize_path};
use crate::schedule;

/// Whether the path targeting rules of `announcement` admit `path`.
pub fn should_show_on_path(announcement: &Announcement, path: &str, matchers: &MatcherCache) -> bool {
    let path = normalize_path(path);
    admits_normalized(announcement, &path, matchers)
}

fn admits_normalized(announcement: &Announcement, path: &str, matchers: &MatcherCache) -> bool {
    if matchers.matches_normalized(path, &announcement.hide_on) {
        return false;
    }
    !announcement.show_on.is_empty() && matchers.matches_normalized(path, &announcement.show_on)
}

/// Announcements active for `path` at `now`, in configured order.
pub fn active_announcements<'a>(
    announcements: &'a [Announcement],
    path: &str,
    now: DateTime<Utc>,
    matchers: &MatcherCache,
) -> Vec<&'a Announcement> {
    let path = normalize_path(path);
    announcements
        .iter()
        .filter(|a| {
            schedule::is_within_date_range(a.start_date.as_deref(), a.end_date.as_deref(), now)
        })
        .filter(|a| admits_normalized(a, &path, matchers))
        .collect()
}

/// Render-time inputs supplied by the host for one page view.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub path: String,
    pub locale: Option<String>,
    pub now: DateTime<Utc>,
}

impl PageRequest {
    pub fn new(path: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            locale: None,
            now,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Per-process announcement engine.
///
/// Holds the validated configuration (shared read-only), the bounded glob
/// matcher cache, and the default-locale context. Safe to share across
/// threads serving independent page views.
#[derive(Debug)]
pub struct Announcer {
    config: Arc<PluginConfig>,
    matchers: MatcherCache,
    default_locale: DefaultLocale,
}

impl Announcer {
    pub fn new(config: PluginConfig, default_locale: DefaultLocale) -> Self {
        Self::from_shared(Arc::new(config), default_locale)
    }

    pub fn from_shared(config: Arc<PluginConfig>, default_locale: DefaultLocale) -> Self {
        Self {
            config,
            matchers: MatcherCache::new(),
            default_locale,
        }
    }

    pub fn config(&self) -> &Arc<PluginConfig> {
        &self.config
    }

    pub fn matchers(&self) -> &MatcherCache {
        &self.matchers
    }

    pub fn default_locale(&self) -> &DefaultLocale {
        &self.default_locale
    }

    /// Active announcements for `path` at `now`.
    ///
    /// A disabled configuration short-circuits: nothing is ever active.
    pub fn active(&self, path: &str, now: DateTime<Utc>) -> Vec<&Announcement> {
        if !self.config.enabled {
            return Vec::new();
        }
        let active = active_announcements(&self.config.announcements, path, now, &self.matchers);
        tracing::debug!(
            path,
            active = active.len(),
            configured = self.config.announcements.len(),
            "resolved active announcements"
        );
        active
    }

    /// Localize `announcement` for `locale`.
    pub fn render(&self, announcement: &Announcement, locale: Option<&str>) -> RenderedAnnouncement {
        let default_locale = self.default_locale.get();
        let default_locale = default_locale.as_deref();
        RenderedAnnouncement {
            id: announcement.id.clone(),
            content: announcement
                .content
                .resolve(locale, default_locale)
                .map(str::to_string),
            link: announcement.link.as_ref().map(|link| RenderedLink {
                text: link.text.resolve(locale, default_locale).map(str::to_string),
                href: link.href.clone(),
            }),
            variant: announcement.variant,
            dismissible: announcement.dismissible,
        }
    }

    /// Build the banner for one page view, skipping what the visitor has
    /// already dismissed.
    ///
    /// `started` anchors the rotation timer.
    pub fn banner(
        &self,
        request: &PageRequest,
        dismissals: &dyn DismissalStore,
        started: Instant,
    ) -> Banner {
        let locale = request.locale.as_deref();
        let items = self
            .active(&request.path, request.now)
            .into_iter()
            .filter(|a| !dismissals.is_dismissed(&a.id))
            .map(|a| self.render(a, locale))
            .collect();
        Banner::new(
            self.config.display_mode,
            Duration::from_millis(self.config.rotate_interval),
            self.config.show_rotate_indicator,
            request.locale.clone(),
            items,
            started,
        )
    }
}
