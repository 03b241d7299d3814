#![forbid(unsafe_code)]

//! Effect application and DOM listener wiring.
//!
//! The host owns the model behind a `RefCell`. The borrow is only held for
//! the duration of [`Portfolio::update`]; effects are applied afterwards, so
//! anything an effect triggers can dispatch again safely.

use std::cell::RefCell;
use std::collections::HashMap;

use folio_core::effect::{percent_css, seconds_css};
use folio_core::{Activation, Effect, NodeRef, NotificationId, PageConfig, PageEvent, Portfolio};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, EventTarget, FormData, HtmlElement, HtmlFormElement,
    HtmlImageElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use crate::dom::Nodes;
use crate::email;
use crate::image_load_failed;
use crate::wasm::dispatch;

type Listener = Closure<dyn FnMut(Event)>;
type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub(crate) struct Host {
    window: Window,
    document: Document,
    config: PageConfig,
    nodes: Nodes,
    page: RefCell<Portfolio>,
    notifications: RefCell<HashMap<NotificationId, Element>>,
    observer: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
    listeners: RefCell<Vec<Listener>>,
}

impl Host {
    /// Scan the document and mount the model. Returns the host and the
    /// startup effects, which must be applied once the host is reachable.
    pub(crate) fn mount(window: Window, document: Document, config: PageConfig) -> (Self, Vec<Effect>) {
        let nodes = Nodes::scan(&document, &config.selectors);
        let client_loaded = email::client_present(&window, &config.email.global_name);
        let layout = nodes.layout(client_loaded);
        let (page, startup) = Portfolio::mount(layout, config.clone());
        let host = Self {
            window,
            document,
            config,
            nodes,
            page: RefCell::new(page),
            notifications: RefCell::new(HashMap::new()),
            observer: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        };
        (host, startup)
    }

    pub(crate) fn layout_json(&self) -> Option<String> {
        let client_loaded = email::client_present(&self.window, &self.config.email.global_name);
        serde_json::to_string(&self.nodes.layout(client_loaded)).ok()
    }

    /// Feed one event to the model and apply what it returns.
    ///
    /// `dom_event` is the DOM event being handled, if any, for
    /// [`Effect::PreventDefault`].
    pub(crate) fn dispatch(&self, event: PageEvent, dom_event: Option<&Event>) {
        tracing::trace!(?event, "dispatch");
        let effects = self.page.borrow_mut().update(event);
        self.apply_all(effects, dom_event);
    }

    pub(crate) fn apply_all(&self, effects: Vec<Effect>, dom_event: Option<&Event>) {
        for effect in effects {
            let kind = effect_name(&effect);
            if let Err(err) = self.apply(effect, dom_event) {
                tracing::warn!(effect = kind, ?err, "effect failed");
            }
        }
    }

    fn apply(&self, effect: Effect, dom_event: Option<&Event>) -> Result<(), JsValue> {
        match effect {
            Effect::PreventDefault => {
                if let Some(event) = dom_event {
                    event.prevent_default();
                }
            }
            Effect::SetClass { node, class, on } => {
                self.element(node)?
                    .class_list()
                    .toggle_with_force(&class, on)?;
            }
            Effect::Focus { node } => {
                self.element(node)?.dyn_into::<HtmlElement>()?.focus()?;
            }
            Effect::ScrollIntoView { section_id } => {
                let Some(section) = self.document.get_element_by_id(&section_id) else {
                    tracing::debug!(%section_id, "scroll target not found");
                    return Ok(());
                };
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                section.scroll_into_view_with_scroll_into_view_options(&options);
            }
            Effect::ObserveVisibility { node, threshold } => self.observe(node, threshold)?,
            Effect::StopObserving { node } => {
                let target = self.element(node)?;
                if let Some((observer, _)) = self.observer.borrow().as_ref() {
                    observer.unobserve(&target);
                }
            }
            Effect::SetBarWidth {
                index,
                percent,
                delay,
            } => {
                let bar = self.element(NodeRef::SkillBar(index))?.dyn_into::<HtmlElement>()?;
                let style = bar.style();
                style.set_property("width", &percent_css(percent))?;
                style.set_property("transition-delay", &seconds_css(delay))?;
            }
            Effect::SetImage { index, src, alt } => {
                let image: HtmlImageElement = self.element(NodeRef::Image(index))?.dyn_into()?;
                image.set_src(&src);
                image.set_alt(&alt);
            }
            Effect::InjectStyles { css } => {
                let style = self.document.create_element("style")?;
                style.set_text_content(Some(&css));
                self.head()?.append_child(&style)?;
            }
            Effect::LoadScript { url } => {
                let document = self.document.clone();
                let window = self.window.clone();
                let global = self.config.email.global_name.clone();
                spawn_local(async move {
                    let event = match email::load_script(&document, &url).await {
                        Ok(()) if email::client_present(&window, &global) => PageEvent::ClientLoaded,
                        Ok(()) => PageEvent::ClientLoadFailed {
                            reason: format!("`{global}` is not defined after loading {url}"),
                        },
                        Err(err) => PageEvent::ClientLoadFailed {
                            reason: err.into_reason(),
                        },
                    };
                    dispatch(event, None);
                });
            }
            Effect::InitClient { public_key } => {
                email::init(&self.window, &self.config.email.global_name, &public_key)?;
            }
            Effect::SendForm {
                submission,
                service_id,
                template_id,
            } => {
                let form = self.form()?;
                let window = self.window.clone();
                let global = self.config.email.global_name.clone();
                spawn_local(async move {
                    if !email::client_present(&window, &global) {
                        dispatch(PageEvent::ClientMissing { submission }, None);
                        return;
                    }
                    let outcome =
                        email::send_form(&window, &global, &service_id, &template_id, &form).await;
                    dispatch(PageEvent::SendSettled { submission, outcome }, None);
                });
            }
            Effect::ResetForm => self.form()?.reset(),
            Effect::CreateNotification {
                id,
                message,
                classes,
            } => {
                let panel = self.document.create_element("div")?;
                panel.set_class_name(&classes.join(" "));
                panel.set_text_content(Some(&message));
                self.document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no <body>"))?
                    .append_child(&panel)?;
                self.notifications.borrow_mut().insert(id, panel);
            }
            Effect::RemoveNode { node } => {
                self.element(node)?.remove();
                if let NodeRef::Notification(id) = node {
                    self.notifications.borrow_mut().remove(&id);
                }
            }
            Effect::Schedule { after, event } => {
                let fire = Closure::once_into_js(move || dispatch(event, None));
                let millis = i32::try_from(after.as_millis()).unwrap_or(i32::MAX);
                self.window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        fire.unchecked_ref(),
                        millis,
                    )?;
            }
        }
        Ok(())
    }

    fn element(&self, node: NodeRef) -> Result<Element, JsValue> {
        match node {
            NodeRef::Notification(id) => self
                .notifications
                .borrow()
                .get(&id)
                .cloned()
                .ok_or_else(|| JsValue::from_str(&format!("notification {} is gone", id.0))),
            other => self.nodes.get(other),
        }
    }

    fn form(&self) -> Result<HtmlFormElement, JsValue> {
        self.nodes
            .contact_form
            .clone()
            .ok_or_else(|| JsValue::from_str("contact form not found"))
    }

    fn head(&self) -> Result<Element, JsValue> {
        self.document
            .head()
            .map(Into::into)
            .ok_or_else(|| JsValue::from_str("document has no <head>"))
    }

    fn observe(&self, node: NodeRef, threshold: f64) -> Result<(), JsValue> {
        let target = self.element(node)?;
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    dispatch(
                        PageEvent::SectionVisible {
                            intersecting: entry.is_intersecting(),
                        },
                        None,
                    );
                }
            },
        ));
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(&target);
        *self.observer.borrow_mut() = Some((observer, callback));
        Ok(())
    }

    /// Attach every DOM listener the layout calls for.
    pub(crate) fn attach_listeners(&self) -> Result<(), JsValue> {
        let nodes = &self.nodes;

        if let (Some(toggle), Some(_)) = (&nodes.toggle, &nodes.menu) {
            self.listen(toggle, "click", |event| {
                dispatch(PageEvent::OpenMenu { via: Activation::Click }, Some(&event));
            })?;
        }
        if let Some(toggle) = &nodes.toggle {
            self.listen(toggle, "keydown", |event| {
                if let Some(via) = key_activation(&event) {
                    dispatch(PageEvent::OpenMenu { via }, Some(&event));
                }
            })?;
        }
        if let (Some(close), Some(_)) = (&nodes.close, &nodes.menu) {
            self.listen(close, "click", |event| {
                dispatch(PageEvent::CloseMenu { via: Activation::Click }, Some(&event));
            })?;
        }
        if let Some(close) = &nodes.close {
            self.listen(close, "keydown", |event| {
                if let Some(via) = key_activation(&event) {
                    dispatch(PageEvent::CloseMenu { via }, Some(&event));
                }
            })?;
        }

        for (index, link) in nodes.nav_links.iter().enumerate() {
            self.listen(link, "click", move |event| {
                dispatch(PageEvent::NavLinkActivated { index }, Some(&event));
            })?;
        }

        self.listen(&self.window, "scroll", |event| {
            crate::wasm::with_host(|host| {
                let offset = host.window.scroll_y().unwrap_or(0.0);
                let sections = host.nodes.section_bounds();
                host.dispatch(PageEvent::ScrollTick { offset, sections }, Some(&event));
            });
        })?;

        for (index, image) in nodes.images.iter().enumerate() {
            let failed = image.clone();
            self.listen(image, "error", move |event| {
                let src = failed.src();
                dispatch(PageEvent::ImageError { index, src }, Some(&event));
            })?;
        }

        if let Some(form) = nodes.contact_form.clone() {
            let target = form.clone();
            self.listen(&target, "submit", move |event| {
                let fields = form_fields(&form);
                dispatch(PageEvent::SubmitForm { fields }, Some(&event));
            })?;
        }
        Ok(())
    }

    /// Report images whose load already failed before their `error`
    /// listener existed.
    pub(crate) fn replay_failed_images(&self) {
        let failed: Vec<(usize, String)> = self
            .nodes
            .images
            .iter()
            .enumerate()
            .filter_map(|(index, image)| {
                let src = image.src();
                image_load_failed(image.complete(), image.natural_width(), &src)
                    .then_some((index, src))
            })
            .collect();
        for (index, src) in failed {
            tracing::debug!(index, %src, "image failed before mount");
            self.dispatch(PageEvent::ImageError { index, src }, None);
        }
    }

    fn listen(
        &self,
        target: &EventTarget,
        kind: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let listener: Listener = Closure::wrap(Box::new(handler));
        target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.borrow_mut().push(listener);
        Ok(())
    }
}

fn key_activation(event: &Event) -> Option<Activation> {
    event
        .dyn_ref::<KeyboardEvent>()
        .and_then(|key| Activation::from_key(&key.key()))
}

/// Snapshot of the form's entries for diagnostics. File inputs are elided.
fn form_fields(form: &HtmlFormElement) -> Vec<(String, String)> {
    let Ok(data) = FormData::new_with_form(form) else {
        return Vec::new();
    };
    let Ok(Some(entries)) = js_sys::try_iter(&data) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let pair: Array = entry.dyn_into().ok()?;
            let key = pair.get(0).as_string()?;
            let value = pair.get(1).as_string().unwrap_or_else(|| "[file]".into());
            Some((key, value))
        })
        .collect()
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::PreventDefault => "prevent_default",
        Effect::SetClass { .. } => "set_class",
        Effect::Focus { .. } => "focus",
        Effect::ScrollIntoView { .. } => "scroll_into_view",
        Effect::ObserveVisibility { .. } => "observe_visibility",
        Effect::StopObserving { .. } => "stop_observing",
        Effect::SetBarWidth { .. } => "set_bar_width",
        Effect::SetImage { .. } => "set_image",
        Effect::InjectStyles { .. } => "inject_styles",
        Effect::LoadScript { .. } => "load_script",
        Effect::InitClient { .. } => "init_client",
        Effect::SendForm { .. } => "send_form",
        Effect::ResetForm => "reset_form",
        Effect::CreateNotification { .. } => "create_notification",
        Effect::RemoveNode { .. } => "remove_node",
        Effect::Schedule { .. } => "schedule",
    }
}
