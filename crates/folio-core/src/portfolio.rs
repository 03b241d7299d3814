#![forbid(unsafe_code)]

//! The page model.
//!
//! [`Portfolio`] owns every piece of transient page state and turns
//! [`PageEvent`]s into [`Effect`]s. The host drives it:
//!
//! 1. Scan the document into a [`PageLayout`] and call [`Portfolio::mount`].
//! 2. Apply the returned startup effects.
//! 3. For every DOM callback, timer, or settled promise, call
//!    [`Portfolio::update`] and apply the returned effects in order.
//!
//! The model never blocks and never touches the DOM, so the whole page can be
//! exercised in plain unit tests.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::{Activation, PageConfig, PageEvent, PageLayout, Portfolio};
//!
//! let (mut page, startup) = Portfolio::mount(layout, PageConfig::default());
//! host.apply(startup);
//! let effects = page.update(PageEvent::OpenMenu { via: Activation::Click });
//! host.apply(effects);
//! ```

use crate::config::PageConfig;
use crate::contact::ContactForm;
use crate::effect::Effect;
use crate::event::PageEvent;
use crate::image::ImageFallback;
use crate::layout::PageLayout;
use crate::nav::Navigation;
use crate::notify::{Notifier, stylesheet};
use crate::reveal::RevealAnimator;
use crate::scroll::ScrollReactor;

#[derive(Debug, Clone)]
pub struct Portfolio {
    config: PageConfig,
    nav: Navigation,
    scroll: ScrollReactor,
    reveal: RevealAnimator,
    images: ImageFallback,
    contact: ContactForm,
    notifier: Notifier,
}

impl Portfolio {
    /// Build the model from a document scan. Returns the startup effects.
    #[must_use]
    pub fn mount(layout: PageLayout, config: PageConfig) -> (Self, Vec<Effect>) {
        let _span = crate::info_span!("mount").entered();
        let page = Self {
            nav: Navigation::new(&layout, &config.classes),
            scroll: ScrollReactor::new(&layout, &config.scroll, &config.classes),
            reveal: RevealAnimator::new(&layout, &config.reveal),
            images: ImageFallback::new(layout.images, &config.image),
            contact: ContactForm::new(
                layout.contact_form,
                layout.email_client_loaded,
                &config.email,
            ),
            notifier: Notifier::new(&config.notification, &config.classes),
            config,
        };

        let mut effects = vec![Effect::InjectStyles {
            css: stylesheet(&page.config.classes),
        }];
        effects.extend(page.reveal.mount());
        crate::info!(
            links = layout.nav_links.len(),
            sections = layout.sections.len(),
            images = layout.images,
            "page mounted"
        );
        (page, effects)
    }

    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub const fn nav(&self) -> &Navigation {
        &self.nav
    }

    #[must_use]
    pub const fn scroll(&self) -> &ScrollReactor {
        &self.scroll
    }

    #[must_use]
    pub const fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    #[must_use]
    pub const fn images(&self) -> &ImageFallback {
        &self.images
    }

    #[must_use]
    pub const fn contact(&self) -> &ContactForm {
        &self.contact
    }

    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Handle one event.
    pub fn update(&mut self, event: PageEvent) -> Vec<Effect> {
        match event {
            PageEvent::OpenMenu { via } => self.nav.open(via),
            PageEvent::CloseMenu { via } => self.nav.close(via),
            PageEvent::NavLinkActivated { index } => self.nav.activate_link(index),
            PageEvent::ScrollTick { offset, sections } => self.scroll.tick(offset, &sections),
            PageEvent::SectionVisible { intersecting } => self.reveal.on_visible(intersecting),
            PageEvent::ImageError { index, src } => self.images.on_error(index, &src),
            PageEvent::SubmitForm { fields } => self.contact.submit(&fields),
            PageEvent::ClientLoaded => self.contact.on_client_loaded(),
            PageEvent::ClientLoadFailed { reason } => {
                self.contact.on_client_load_failed(&reason, &mut self.notifier)
            }
            PageEvent::ClientMissing { submission } => self.contact.on_client_missing(submission),
            PageEvent::SendSettled {
                submission,
                outcome,
            } => self
                .contact
                .on_send_settled(submission, &outcome, &mut self.notifier),
            PageEvent::NotificationTimer { id, stage } => self.notifier.on_timer(id, stage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::event::Activation;
    use crate::layout::NodeRef;

    #[test]
    fn empty_page_only_injects_styles() {
        let (_, effects) = Portfolio::mount(PageLayout::default(), PageConfig::default());
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::InjectStyles { .. }));
    }

    #[test]
    fn empty_page_tolerates_every_event() {
        let (mut page, _) = Portfolio::mount(PageLayout::default(), PageConfig::default());
        assert!(page.update(PageEvent::OpenMenu { via: Activation::Click }).is_empty());
        assert!(page.update(PageEvent::SectionVisible { intersecting: true }).is_empty());
        assert!(page.update(PageEvent::ImageError {
            index: 0,
            src: "a.png".into()
        }).is_empty());
        assert!(page.update(PageEvent::SubmitForm { fields: vec![] }).is_empty());
        assert!(page.update(PageEvent::ClientLoaded).is_empty());
        assert!(
            page.update(PageEvent::ScrollTick {
                offset: 100.0,
                sections: vec![]
            })
            .is_empty()
        );
    }

    #[test]
    fn mount_observes_skills_when_present() {
        let layout = PageLayout {
            skills_section: true,
            skill_bars: vec![Some("80".into())],
            ..PageLayout::default()
        };
        let (_, effects) = Portfolio::mount(layout, PageConfig::default());
        assert_eq!(
            effects[1],
            Effect::ObserveVisibility {
                node: NodeRef::SkillsSection,
                threshold: 0.2,
            }
        );
    }
}
