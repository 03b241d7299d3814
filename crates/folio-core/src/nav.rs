#![forbid(unsafe_code)]

//! Navigation menu: open/close with focus management and in-page links.

use crate::config::ClassNames;
use crate::effect::Effect;
use crate::event::Activation;
use crate::layout::{NodeRef, PageLayout};

/// Target section id of a navigation link `href`.
///
/// Everything after the first `#`; empty when the link has no fragment.
#[must_use]
pub fn link_target(href: &str) -> &str {
    href.split_once('#').map_or("", |(_, fragment)| fragment)
}

/// Menu state plus what the page offers to drive it.
#[derive(Debug, Clone)]
pub struct Navigation {
    has_menu: bool,
    has_toggle: bool,
    has_close: bool,
    menu_has_link: bool,
    open: bool,
    targets: Vec<String>,
    open_class: String,
}

impl Navigation {
    #[must_use]
    pub fn new(layout: &PageLayout, classes: &ClassNames) -> Self {
        if !layout.toggle {
            crate::error!("nav toggle not found");
        }
        if !layout.menu {
            crate::error!("nav menu not found");
        }
        if !layout.close {
            crate::error!("nav close not found");
        }
        Self {
            has_menu: layout.menu,
            has_toggle: layout.toggle,
            has_close: layout.close,
            menu_has_link: layout.menu_has_link,
            open: false,
            targets: layout
                .nav_links
                .iter()
                .map(|href| link_target(href).to_owned())
                .collect(),
            open_class: classes.menu_open.clone(),
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Section id a link points at, if it has one.
    #[must_use]
    pub fn target(&self, index: usize) -> Option<&str> {
        self.targets
            .get(index)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn open(&mut self, via: Activation) -> Vec<Effect> {
        let mut effects = Vec::new();
        if via == Activation::Key {
            effects.push(Effect::PreventDefault);
        }
        if !self.has_toggle || !self.has_menu {
            return effects;
        }
        self.open = true;
        effects.push(self.menu_class(true));
        if self.menu_has_link {
            effects.push(Effect::Focus {
                node: NodeRef::MenuFirstLink,
            });
        }
        crate::info!(?via, "menu opened");
        effects
    }

    pub fn close(&mut self, via: Activation) -> Vec<Effect> {
        let mut effects = Vec::new();
        match via {
            Activation::Key => effects.push(Effect::PreventDefault),
            // Click-to-close is only wired when the menu exists.
            Activation::Click if !self.has_menu => return effects,
            Activation::Click => {}
        }
        if !self.has_close {
            return effects;
        }
        if self.has_menu {
            self.open = false;
            effects.push(self.menu_class(false));
        }
        if self.has_toggle {
            effects.push(Effect::Focus {
                node: NodeRef::Toggle,
            });
        }
        crate::info!(?via, "menu closed");
        effects
    }

    /// A navigation link was clicked: scroll to its section and close the menu.
    pub fn activate_link(&mut self, index: usize) -> Vec<Effect> {
        let mut effects = vec![Effect::PreventDefault];
        let Some(section_id) = self.target(index).map(str::to_owned) else {
            crate::debug!(index, "nav link has no in-page target");
            return effects;
        };
        effects.push(Effect::ScrollIntoView { section_id });
        if self.has_menu {
            self.open = false;
            effects.push(self.menu_class(false));
        }
        effects
    }

    fn menu_class(&self, on: bool) -> Effect {
        Effect::SetClass {
            node: NodeRef::Menu,
            class: self.open_class.clone(),
            on,
        }
    }
}
