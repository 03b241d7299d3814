#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every field has a default matching the portfolio page markup, so a host
//! can deserialize a partial JSON object and only override what differs.
//!
//! ```ignore
//! let config = PageConfig::from_json(r#"{ "scroll": { "header_threshold_px": 80.0 } }"#)?;
//! assert_eq!(config.scroll.header_threshold_px, 80.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for a mounted page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Most verbose level the host forwards to the browser console.
    pub log_level: LogLevel,
    pub selectors: Selectors,
    pub classes: ClassNames,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub image: ImageFallbackConfig,
    pub email: EmailClientConfig,
    pub notification: NotificationConfig,
}

impl PageConfig {
    /// Parse a (possibly partial) JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// CSS selectors the host uses to scan the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub header: String,
    pub menu: String,
    pub toggle: String,
    pub close: String,
    pub nav_link: String,
    pub sections: String,
    pub skills_section: String,
    pub skill_bar: String,
    pub images: String,
    /// Element id (not a selector) of the contact form.
    pub contact_form_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: ".header".into(),
            menu: ".nav__menu".into(),
            toggle: ".nav__toggle".into(),
            close: ".nav__close".into(),
            nav_link: ".nav__link".into(),
            sections: "section[id]".into(),
            skills_section: ".skills-section".into(),
            skill_bar: ".skill__progress".into(),
            images: "img".into(),
            contact_form_id: "contact-form".into(),
        }
    }
}

/// Class names toggled by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub menu_open: String,
    pub header_scrolled: String,
    pub link_active: String,
    pub notification: String,
    pub notification_error: String,
    pub notification_visible: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            menu_open: "show".into(),
            header_scrolled: "scrolled".into(),
            link_active: "active".into(),
            notification: "notification".into(),
            notification_error: "error".into(),
            notification_visible: "show".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Header gets the scrolled class when the offset is strictly above this.
    pub header_threshold_px: f64,
    /// Distance subtracted from a section's top to open its activation window.
    pub section_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold_px: 50.0,
            section_offset_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the skills section that must be visible, in `0.0..=1.0`.
    pub visibility_threshold: f64,
    /// Delay added per bar index.
    pub stagger_step_ms: u64,
}

impl RevealConfig {
    #[must_use]
    pub const fn stagger_step(&self) -> Duration {
        Duration::from_millis(self.stagger_step_ms)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.2,
            stagger_step_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFallbackConfig {
    pub placeholder_src: String,
    pub fallback_alt: String,
}

impl Default for ImageFallbackConfig {
    fn default() -> Self {
        Self {
            placeholder_src: "https://via.placeholder.com/300x200?text=Image+Not+Found".into(),
            fallback_alt: "Image not available".into(),
        }
    }
}

/// Identifiers for the hosted email client (EmailJS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailClientConfig {
    pub sdk_url: String,
    /// Global the SDK installs on `window`.
    pub global_name: String,
    pub public_key: String,
    pub service_id: String,
    pub template_id: String,
}

impl Default for EmailClientConfig {
    fn default() -> Self {
        Self {
            sdk_url: "https://cdn.emailjs.com/dist/email.min.js".into(),
            global_name: "emailjs".into(),
            public_key: "G0iq-bLzqAU94-4zW".into(),
            service_id: "service_85m638d".into(),
            template_id: "template_i0uv1gm".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay before the visible class is added, so the CSS transition runs.
    pub enter_delay_ms: u64,
    /// Time from creation until the panel starts leaving.
    pub display_ms: u64,
    /// Exit transition length; the node is removed after it.
    pub exit_ms: u64,
    pub success_message: String,
    pub failure_message: String,
}

impl NotificationConfig {
    #[must_use]
    pub const fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }

    #[must_use]
    pub const fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    #[must_use]
    pub const fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 10,
            display_ms: 4000,
            exit_ms: 500,
            success_message: "Message Sent Successfully! I will reach u soon 📧🚀".into(),
            failure_message: "Failed to send message. Please try again. 😔".into(),
        }
    }
}
