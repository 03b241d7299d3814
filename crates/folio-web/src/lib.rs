#![forbid(unsafe_code)]

//! WASM frontend for the folio portfolio page.
//!
//! On load the module scans the document, mounts a [`folio_core::Portfolio`],
//! and wires DOM listeners so every interaction flows through the model:
//! - click/keydown on the menu controls and navigation links,
//! - window scroll,
//! - skills-section visibility (`IntersectionObserver`),
//! - image load errors,
//! - contact form submit, delegated to the hosted EmailJS client.
//!
//! Effects returned by the model are applied through `web-sys`; async work
//! (script load, send, timers) is spawned on the browser event loop and
//! reported back to the model as events.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod email;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{layout_json, start};

use folio_core::PageConfig;
use folio_core::config::LogLevel;

/// Element id of the inline JSON config block. Fixed, since the block is
/// read before any config exists.
pub const CONFIG_BLOCK_ID: &str = "folio-config";

/// Config from the inline config block, if any.
///
/// A malformed block is reported back alongside the defaults so the caller
/// can log it once logging is up.
#[must_use]
pub fn config_or_default(raw: Option<&str>) -> (PageConfig, Option<folio_core::ConfigError>) {
    match raw.map(str::trim).filter(|text| !text.is_empty()) {
        None => (PageConfig::default(), None),
        Some(text) => match PageConfig::from_json(text) {
            Ok(config) => (config, None),
            Err(err) => (PageConfig::default(), Some(err)),
        },
    }
}

/// `tracing` level for a configured log level.
#[must_use]
pub const fn tracing_level(level: LogLevel) -> tracing::Level {
    match level {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

/// Whether an image already finished loading without producing a picture.
///
/// Images that failed before the listeners were attached have fired their
/// only `error` event; mount replays those from the element's state.
#[must_use]
pub fn image_load_failed(complete: bool, natural_width: u32, src: &str) -> bool {
    complete && natural_width == 0 && !src.is_empty()
}

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
pub fn start() {}
