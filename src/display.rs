//! Presentation of the active announcements for one page view.
//!
//! A [`Banner`] is built per page view from the announcements that survived
//! targeting, already localized. What it shows depends on the display mode:
//!
//! - **stack**: every active announcement, in list order
//! - **first**: only the first active announcement
//! - **rotate**: one at a time, driven by a [`Rotation`]
//!
//! # Rotation State Machine
//!
//! ```text
//!            N > 0                 timer fires
//!   Idle ───────────▶ Showing(0) ───────────────▶ Showing((i + 1) mod N)
//!    ▲                    │  go_to(k) / next / previous ─▶ Showing(k), timer restarted
//!    └────────────────────┘  last item dismissed (N = 0), timer cancelled
//! ```
//!
//! Dismissing an item re-derives `N` and clamps the index to `N - 1`.
//!
//! The timer is logical: callers feed it the current [`Instant`] through
//! [`Banner::tick`], so the machine is deterministic under test. Manual
//! navigation restarts the timer rather than racing a pending automatic
//! advance, and the timer only runs while there is something to rotate to
//! (`N > 1`).

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::{DisplayMode, Variant};
use crate::dismissal::{DismissalError, DismissalStore};
use crate::i18n::{self, UiString};

/// Link with its text resolved for the page's locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLink {
    pub text: Option<String>,
    pub href: String,
}

/// An active announcement with every localizable field resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedAnnouncement {
    pub id: String,
    /// `None` when no locale fallback produced any text.
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<RenderedLink>,
    pub variant: Variant,
    pub dismissible: bool,
}

/// Single-shot timer measured against caller-supplied instants.
#[derive(Debug, Clone)]
pub struct RotationTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl RotationTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// (Re)arm the timer to fire one interval after `now`. An interval too
    /// long to represent never fires.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    Idle,
    Showing(usize),
}

/// Rotate-mode state machine over `len` active items.
#[derive(Debug, Clone)]
pub struct Rotation {
    len: usize,
    state: RotationState,
    timer: RotationTimer,
}

impl Rotation {
    pub fn new(len: usize, interval: Duration, now: Instant) -> Self {
        let mut rotation = Self {
            len,
            state: if len == 0 {
                RotationState::Idle
            } else {
                RotationState::Showing(0)
            },
            timer: RotationTimer::new(interval),
        };
        rotation.rearm(now);
        rotation
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn current(&self) -> Option<usize> {
        match self.state {
            RotationState::Idle => None,
            RotationState::Showing(i) => Some(i),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn timer(&self) -> &RotationTimer {
        &self.timer
    }

    fn rearm(&mut self, now: Instant) {
        if self.len > 1 {
            self.timer.restart(now);
        } else {
            self.timer.cancel();
        }
    }

    /// Advance if the timer is due. Returns whether the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.is_due(now) {
            return false;
        }
        let RotationState::Showing(i) = self.state else {
            self.timer.cancel();
            return false;
        };
        self.state = RotationState::Showing((i + 1) % self.len);
        self.timer.restart(now);
        true
    }

    /// Show item `k` and restart the timer. Out-of-range `k` is ignored.
    pub fn go_to(&mut self, k: usize, now: Instant) -> bool {
        if k >= self.len {
            return false;
        }
        self.state = RotationState::Showing(k);
        self.rearm(now);
        true
    }

    pub fn next(&mut self, now: Instant) -> bool {
        match self.current() {
            Some(i) => self.go_to((i + 1) % self.len, now),
            None => false,
        }
    }

    pub fn previous(&mut self, now: Instant) -> bool {
        match self.current() {
            Some(i) => self.go_to((i + self.len - 1) % self.len, now),
            None => false,
        }
    }

    /// Account for the item at `removed` leaving the active set.
    ///
    /// The shown item stays shown if it survives; if it was the one removed,
    /// its successor slides into place, clamped to the new last index.
    pub fn remove(&mut self, removed: usize, now: Instant) {
        if removed >= self.len {
            return;
        }
        self.len -= 1;
        let RotationState::Showing(i) = self.state else {
            return;
        };
        self.state = if self.len == 0 {
            RotationState::Idle
        } else if removed < i {
            RotationState::Showing(i - 1)
        } else {
            RotationState::Showing(i.min(self.len - 1))
        };
        self.rearm(now);
    }

    /// Tear down: cancel the timer for good.
    pub fn stop(&mut self) {
        self.timer.cancel();
    }
}

/// Position indicator shown in rotate mode when more than one item is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    /// 0-based index of the shown item.
    pub current: usize,
    pub total: usize,
    pub label: String,
    /// Accessible label per dot, in item order.
    pub item_labels: Vec<String>,
}

/// Everything rendered for one page view.
#[derive(Debug, Clone)]
pub struct Banner {
    mode: DisplayMode,
    show_indicator: bool,
    locale: Option<String>,
    items: Vec<RenderedAnnouncement>,
    rotation: Option<Rotation>,
}

impl Banner {
    pub fn new(
        mode: DisplayMode,
        rotate_interval: Duration,
        show_indicator: bool,
        locale: Option<String>,
        items: Vec<RenderedAnnouncement>,
        now: Instant,
    ) -> Self {
        let rotation =
            (mode == DisplayMode::Rotate).then(|| Rotation::new(items.len(), rotate_interval, now));
        Self {
            mode,
            show_indicator,
            locale,
            items,
            rotation,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Every active, undismissed announcement, shown or not.
    pub fn active(&self) -> &[RenderedAnnouncement] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rotation(&self) -> Option<&Rotation> {
        self.rotation.as_ref()
    }

    /// What is rendered right now.
    pub fn visible(&self) -> &[RenderedAnnouncement] {
        match self.mode {
            DisplayMode::Stack => self.items.as_slice(),
            DisplayMode::First => &self.items[..self.items.len().min(1)],
            DisplayMode::Rotate => match self.rotation.as_ref().and_then(Rotation::current) {
                Some(i) => &self.items[i..=i],
                None => &[],
            },
        }
    }

    pub fn indicator(&self) -> Option<Indicator> {
        if !self.show_indicator || self.items.len() < 2 {
            return None;
        }
        let current = self.rotation.as_ref()?.current()?;
        let total = self.items.len();
        let locale = self.locale();
        Some(Indicator {
            current,
            total,
            label: i18n::translate(UiString::IndicatorLabel, locale).to_string(),
            item_labels: (1..=total)
                .map(|n| i18n::go_to_label(locale, n, total))
                .collect(),
        })
    }

    pub fn dismiss_label(&self) -> &'static str {
        i18n::translate(UiString::Dismiss, self.locale())
    }

    pub fn learn_more_label(&self) -> &'static str {
        i18n::translate(UiString::LearnMore, self.locale())
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.rotation.as_mut().is_some_and(|r| r.tick(now))
    }

    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        self.rotation.as_mut().is_some_and(|r| r.go_to(index, now))
    }

    pub fn next(&mut self, now: Instant) -> bool {
        self.rotation.as_mut().is_some_and(|r| r.next(now))
    }

    pub fn previous(&mut self, now: Instant) -> bool {
        self.rotation.as_mut().is_some_and(|r| r.previous(now))
    }

    /// Dismiss announcement `id`: record it in `store` and drop it from the
    /// active set.
    ///
    /// Returns `Ok(false)` when `id` is not active or not dismissible.
    pub fn dismiss(
        &mut self,
        id: &str,
        store: &mut dyn DismissalStore,
        now: Instant,
    ) -> Result<bool, DismissalError> {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };
        if !self.items[position].dismissible {
            return Ok(false);
        }
        store.dismiss(id)?;
        self.items.remove(position);
        if let Some(rotation) = self.rotation.as_mut() {
            rotation.remove(position, now);
        }
        Ok(true)
    }

    /// Tear the banner down; no timer survives it.
    pub fn teardown(&mut self) {
        if let Some(rotation) = self.rotation.as_mut() {
            rotation.stop();
        }
    }
}
