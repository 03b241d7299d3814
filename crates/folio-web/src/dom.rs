#![forbid(unsafe_code)]

//! Document scan: resolve configured selectors to elements once at mount.

use folio_core::config::Selectors;
use folio_core::{NodeRef, PageLayout, SectionBounds};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlImageElement};

/// Elements found at mount, indexed the same way as the [`PageLayout`].
pub(crate) struct Nodes {
    pub(crate) header: Option<Element>,
    pub(crate) menu: Option<Element>,
    pub(crate) toggle: Option<Element>,
    pub(crate) close: Option<Element>,
    pub(crate) menu_first_link: Option<Element>,
    pub(crate) nav_links: Vec<Element>,
    pub(crate) sections: Vec<HtmlElement>,
    pub(crate) skills_section: Option<Element>,
    pub(crate) skill_bars: Vec<HtmlElement>,
    pub(crate) images: Vec<HtmlImageElement>,
    pub(crate) contact_form: Option<HtmlFormElement>,
}

impl Nodes {
    pub(crate) fn scan(document: &Document, selectors: &Selectors) -> Self {
        let menu = query_one(document, &selectors.menu);
        let menu_first_link = menu.as_ref().and_then(|menu| {
            menu.query_selector(&selectors.nav_link)
                .map_err(|err| tracing::warn!(selector = %selectors.nav_link, ?err, "bad selector"))
                .ok()
                .flatten()
        });
        let sections: Vec<HtmlElement> = query_all(document, &selectors.sections)
            .into_iter()
            .filter(|section: &HtmlElement| !section.id().is_empty())
            .collect();
        Self {
            header: query_one(document, &selectors.header),
            menu,
            toggle: query_one(document, &selectors.toggle),
            close: query_one(document, &selectors.close),
            menu_first_link,
            nav_links: query_all(document, &selectors.nav_link),
            sections,
            skills_section: query_one(document, &selectors.skills_section),
            skill_bars: query_all(document, &selectors.skill_bar),
            images: query_all(document, &selectors.images),
            contact_form: document
                .get_element_by_id(&selectors.contact_form_id)
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok()),
        }
    }

    pub(crate) fn layout(&self, email_client_loaded: bool) -> PageLayout {
        PageLayout {
            header: self.header.is_some(),
            menu: self.menu.is_some(),
            menu_has_link: self.menu_first_link.is_some(),
            toggle: self.toggle.is_some(),
            close: self.close.is_some(),
            nav_links: self
                .nav_links
                .iter()
                .map(|link| link.get_attribute("href").unwrap_or_default())
                .collect(),
            sections: self.sections.iter().map(|section| section.id()).collect(),
            skills_section: self.skills_section.is_some(),
            skill_bars: self
                .skill_bars
                .iter()
                .map(|bar| bar.get_attribute("data-width"))
                .collect(),
            images: self.images.len(),
            contact_form: self.contact_form.is_some(),
            email_client_loaded,
        }
    }

    /// Current geometry of every section, aligned with the layout.
    pub(crate) fn section_bounds(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|section| {
                SectionBounds::new(
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                )
            })
            .collect()
    }

    /// Resolve a model node. Notifications are tracked by the host instead.
    pub(crate) fn get(&self, node: NodeRef) -> Result<Element, JsValue> {
        let found = match node {
            NodeRef::Header => self.header.clone(),
            NodeRef::Menu => self.menu.clone(),
            NodeRef::Toggle => self.toggle.clone(),
            NodeRef::MenuFirstLink => self.menu_first_link.clone(),
            NodeRef::NavLink(i) => self.nav_links.get(i).cloned(),
            NodeRef::SkillsSection => self.skills_section.clone(),
            NodeRef::SkillBar(i) => self.skill_bars.get(i).map(|bar| bar.clone().into()),
            NodeRef::Image(i) => self.images.get(i).map(|img| img.clone().into()),
            NodeRef::Notification(_) => None,
        };
        found.ok_or_else(|| JsValue::from_str(&format!("no element for {node:?}")))
    }
}

fn query_one(document: &Document, selector: &str) -> Option<Element> {
    document
        .query_selector(selector)
        .map_err(|err| tracing::warn!(%selector, ?err, "bad selector"))
        .ok()
        .flatten()
}

fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = document.query_selector_all(selector) else {
        tracing::warn!(%selector, "bad selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}
