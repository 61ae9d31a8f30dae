//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Config
//!     enabled: yes
//!     displayMode: rotate (every 5000ms, indicator on)
//!
//! Announcements
//! 001 welcome [note, dismissible]
//!     Show on: /**
//!     Hide on: /blog/**
//!     Window: 2025-06-01 → 2025-06-30
//! ```
//!
//! ## Resolve
//!
//! ```text
//! /guides/intro (fr) → 2 active, rotate
//! 001 welcome [note] ◀ shown
//!     Bonjour !
//!     Link: En savoir plus → /news
//! 002 launch [tip]
//!     Lancement
//! Indicator: 1 of 2
//! ```

use crate::config::{Announcement, DisplayMode, PluginConfig};
use crate::display::{Banner, RenderedAnnouncement};
use crate::validate::ValidationError;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn announcement_header(index: usize, a: &Announcement) -> String {
    let mut tags = vec![a.variant.as_str()];
    if a.dismissible {
        tags.push("dismissible");
    }
    format!("{} {} [{}]", format_index(index), a.id, tags.join(", "))
}

/// Format a validated configuration for `check`.
pub fn format_check_output(config: &PluginConfig) -> Vec<String> {
    let mut lines = vec!["Config".to_string()];
    lines.push(format!("{}enabled: {}", indent(1), yes_no(config.enabled)));
    let mode = match config.display_mode {
        DisplayMode::Rotate => format!(
            "rotate (every {}ms, indicator {})",
            config.rotate_interval,
            if config.show_rotate_indicator { "on" } else { "off" }
        ),
        other => other.as_str().to_string(),
    };
    lines.push(format!("{}displayMode: {}", indent(1), mode));

    lines.push(String::new());
    lines.push("Announcements".to_string());
    if config.announcements.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, a) in config.announcements.iter().enumerate() {
        lines.push(announcement_header(i + 1, a));
        lines.push(format!("{}Show on: {}", indent(1), a.show_on.join(", ")));
        if !a.hide_on.is_empty() {
            lines.push(format!("{}Hide on: {}", indent(1), a.hide_on.join(", ")));
        }
        if a.start_date.is_some() || a.end_date.is_some() {
            lines.push(format!(
                "{}Window: {} → {}",
                indent(1),
                a.start_date.as_deref().unwrap_or("…"),
                a.end_date.as_deref().unwrap_or("…"),
            ));
        }
    }
    lines
}

pub fn print_check_output(config: &PluginConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

/// Format a validation failure, one issue per line.
pub fn format_validation_error(err: &ValidationError) -> Vec<String> {
    let mut lines = vec![format!(
        "Invalid configuration ({} {})",
        err.issues.len(),
        if err.issues.len() == 1 { "issue" } else { "issues" }
    )];
    lines.extend(err.issues.iter().map(|issue| format!("{}{}", indent(1), issue)));
    lines
}

pub fn print_validation_error(err: &ValidationError) {
    for line in format_validation_error(err) {
        eprintln!("{}", line);
    }
}

fn rendered_lines(index: usize, item: &RenderedAnnouncement, shown: bool) -> Vec<String> {
    let marker = if shown { " ◀ shown" } else { "" };
    let mut lines = vec![format!(
        "{} {} [{}]{}",
        format_index(index),
        item.id,
        item.variant.as_str(),
        marker
    )];
    lines.push(format!(
        "{}{}",
        indent(1),
        item.content.as_deref().unwrap_or("(no content for this locale)")
    ));
    if let Some(link) = &item.link {
        lines.push(format!(
            "{}Link: {} → {}",
            indent(1),
            link.text.as_deref().unwrap_or("(no text)"),
            link.href
        ));
    }
    lines
}

/// Format the banner of one page view for `resolve`.
pub fn format_banner(path: &str, banner: &Banner) -> Vec<String> {
    let locale = banner
        .locale()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default();
    let mut lines = vec![format!(
        "{}{} → {} active, {}",
        path,
        locale,
        banner.active().len(),
        banner.mode().as_str()
    )];

    let visible: Vec<&str> = banner.visible().iter().map(|a| a.id.as_str()).collect();
    for (i, item) in banner.active().iter().enumerate() {
        let shown = banner.mode() != DisplayMode::Stack && visible.contains(&item.id.as_str());
        lines.extend(rendered_lines(i + 1, item, shown));
    }

    if let Some(indicator) = banner.indicator() {
        lines.push(format!(
            "Indicator: {} of {}",
            indicator.current + 1,
            indicator.total
        ));
    }
    lines
}

pub fn print_banner(path: &str, banner: &Banner) {
    for line in format_banner(path, banner) {
        println!("{}", line);
    }
}
