#![forbid(unsafe_code)]

//! Document snapshot taken by the host at mount time.

use serde::{Deserialize, Serialize};

use crate::notify::NotificationId;

/// What the host found when it scanned the document.
///
/// Indices into `nav_links`, `sections`, `skill_bars` and images are the
/// identities used by [`NodeRef`] and the events that carry an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub header: bool,
    pub menu: bool,
    /// The menu contains at least one navigation link to focus on open.
    pub menu_has_link: bool,
    pub toggle: bool,
    pub close: bool,
    /// Raw `href` of every navigation link, in document order.
    pub nav_links: Vec<String>,
    /// Id of every section carrying one, in document order.
    pub sections: Vec<String>,
    pub skills_section: bool,
    /// Raw `data-width` of every skill bar, in document order.
    pub skill_bars: Vec<Option<String>>,
    /// Number of images present at mount.
    pub images: usize,
    pub contact_form: bool,
    /// The email client global already exists on the page.
    pub email_client_loaded: bool,
}

/// Element handle that crosses the model/host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "node", content = "index", rename_all = "snake_case")]
pub enum NodeRef {
    Header,
    Menu,
    Toggle,
    /// First navigation link inside the menu.
    MenuFirstLink,
    NavLink(usize),
    SkillsSection,
    SkillBar(usize),
    Image(usize),
    Notification(NotificationId),
}

/// Geometry of one section, measured by the host at scroll time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    /// Offset of the section's top edge from the document top, in px.
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}
