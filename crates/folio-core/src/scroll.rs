#![forbid(unsafe_code)]

//! Scroll reactions: header style and active navigation link.
//!
//! Both are recomputed on every scroll tick without throttling. Only changes
//! relative to the previous tick are emitted; the first tick always emits.
//!
//! # Activation window
//!
//! A section is current when `top - offset_px < scroll <= top - offset_px + height`.
//! When several sections map to the same link the last one in document order
//! wins.

use crate::config::{ClassNames, ScrollConfig};
use crate::effect::Effect;
use crate::layout::{NodeRef, PageLayout, SectionBounds};

/// Whether the header should carry the scrolled class at `offset`.
#[must_use]
pub fn header_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Whether `offset` falls inside a section's activation window.
#[must_use]
pub fn in_activation_window(offset: f64, bounds: SectionBounds, section_offset: f64) -> bool {
    let top = bounds.top - section_offset;
    offset > top && offset <= top + bounds.height
}

/// Index of the first link whose `href` contains `section_id`.
fn link_for_section(nav_links: &[String], section_id: &str) -> Option<usize> {
    if section_id.is_empty() {
        return None;
    }
    nav_links.iter().position(|href| href.contains(section_id))
}

#[derive(Debug, Clone)]
pub struct ScrollReactor {
    has_header: bool,
    config: ScrollConfig,
    scrolled_class: String,
    active_class: String,
    /// Link index driven by each section, aligned with the layout sections.
    section_links: Vec<Option<usize>>,
    scrolled: Option<bool>,
    active: Vec<Option<bool>>,
}

impl ScrollReactor {
    #[must_use]
    pub fn new(layout: &PageLayout, config: &ScrollConfig, classes: &ClassNames) -> Self {
        if !layout.header {
            crate::warn!("header not found; scroll styling disabled");
        }
        let section_links = layout
            .sections
            .iter()
            .map(|id| link_for_section(&layout.nav_links, id))
            .collect();
        Self {
            has_header: layout.header,
            config: config.clone(),
            scrolled_class: classes.header_scrolled.clone(),
            active_class: classes.link_active.clone(),
            section_links,
            scrolled: None,
            active: vec![None; layout.nav_links.len()],
        }
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled.unwrap_or(false)
    }

    /// Links currently carrying the active class.
    #[must_use]
    pub fn active_links(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, state)| (*state == Some(true)).then_some(i))
            .collect()
    }

    /// React to a scroll to `offset`. `sections` is aligned with the layout.
    pub fn tick(&mut self, offset: f64, sections: &[SectionBounds]) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.has_header {
            let scrolled = header_scrolled(offset, self.config.header_threshold_px);
            if self.scrolled != Some(scrolled) {
                self.scrolled = Some(scrolled);
                effects.push(Effect::SetClass {
                    node: NodeRef::Header,
                    class: self.scrolled_class.clone(),
                    on: scrolled,
                });
            }
        }

        let mut desired: Vec<Option<bool>> = vec![None; self.active.len()];
        for (section, link) in self.section_links.iter().enumerate() {
            let (Some(link), Some(bounds)) = (link, sections.get(section)) else {
                continue;
            };
            desired[*link] = Some(in_activation_window(
                offset,
                *bounds,
                self.config.section_offset_px,
            ));
        }

        for (link, wanted) in desired.into_iter().enumerate() {
            let Some(on) = wanted else { continue };
            if self.active[link] != Some(on) {
                self.active[link] = Some(on);
                effects.push(Effect::SetClass {
                    node: NodeRef::NavLink(link),
                    class: self.active_class.clone(),
                    on,
                });
            }
        }

        effects
    }
}
