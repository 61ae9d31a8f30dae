//! Runtime module generation.
//!
//! The rendering layer consumes the validated configuration without
//! re-running validation. This module serializes the canonical top-level
//! fields two ways:
//!
//! - as JavaScript module source served under [`VIRTUAL_MODULE_ID`]:
//!
//!   ```text
//!   export const enabled = true;
//!   export const displayMode = "rotate";
//!   export const rotateInterval = 5000;
//!   export const showRotateIndicator = true;
//!   export const announcements = [{"id":"welcome",...}];
//!   ```
//!
//! - as a JSON manifest with the same fields, which [`parse_manifest`] reads
//!   back at render time.

use serde_json::json;
use thiserror::Error;

use crate::config::PluginConfig;

/// Import specifier the rendering layer uses for the configuration.
pub const VIRTUAL_MODULE_ID: &str = "virtual:starlight-announcement/config";

/// Resolved id of the virtual module; the NUL prefix keeps other resolvers
/// away from it.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:starlight-announcement/config";

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Map an import specifier to the resolved virtual module id.
pub fn resolve_id(id: &str) -> Option<&'static str> {
    (id == VIRTUAL_MODULE_ID).then_some(RESOLVED_VIRTUAL_MODULE_ID)
}

/// JavaScript source of the runtime configuration module.
pub fn runtime_module_source(config: &PluginConfig) -> Result<String, ModuleError> {
    Ok(format!(
        "export const enabled = {};\n\
         export const displayMode = {};\n\
         export const rotateInterval = {};\n\
         export const showRotateIndicator = {};\n\
         export const announcements = {};\n",
        serde_json::to_string(&config.enabled)?,
        serde_json::to_string(&config.display_mode)?,
        serde_json::to_string(&config.rotate_interval)?,
        serde_json::to_string(&config.show_rotate_indicator)?,
        serde_json::to_string(&config.announcements)?,
    ))
}

/// Load the module for `resolved_id`, if it is ours.
pub fn load(resolved_id: &str, config: &PluginConfig) -> Result<Option<String>, ModuleError> {
    if resolved_id != RESOLVED_VIRTUAL_MODULE_ID {
        return Ok(None);
    }
    runtime_module_source(config).map(Some)
}

/// Pretty JSON manifest of the canonical configuration.
pub fn to_manifest_json(config: &PluginConfig) -> Result<String, ModuleError> {
    let manifest = json!({
        "enabled": config.enabled,
        "displayMode": config.display_mode,
        "rotateInterval": config.rotate_interval,
        "showRotateIndicator": config.show_rotate_indicator,
        "announcements": config.announcements,
    });
    Ok(serde_json::to_string_pretty(&manifest)?)
}

/// Read a manifest produced by [`to_manifest_json`].
///
/// No validation runs here; the manifest is trusted to come from a
/// validated configuration.
pub fn parse_manifest(json: &str) -> Result<PluginConfig, ModuleError> {
    Ok(serde_json::from_str(json)?)
}
