#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::PageEvent;
use wasm_bindgen::prelude::*;
use web_sys::Event;

use crate::host::Host;
use crate::{CONFIG_BLOCK_ID, config_or_default, console, tracing_level};

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

/// Module entry point: mount once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = when_ready() {
        web_sys::console::error_1(&err);
    }
}

/// JSON snapshot of what the mounted page found in the document.
#[wasm_bindgen(js_name = folioLayout)]
pub fn layout_json() -> Option<String> {
    HOST.with(|slot| slot.borrow().as_ref().and_then(|host| host.layout_json()))
}

/// Run `f` against the mounted host. Events arriving before mount are dropped.
pub(crate) fn with_host(f: impl FnOnce(&Host)) {
    // Clone out of the slot so nested dispatches never contend for it.
    let host = HOST.with(|slot| slot.borrow().clone());
    match host {
        Some(host) => f(&host),
        None => tracing::debug!("event before mount dropped"),
    }
}

pub(crate) fn dispatch(event: PageEvent, dom_event: Option<&Event>) {
    with_host(|host| host.dispatch(event, dom_event));
}

fn when_ready() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(report_mount);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        report_mount();
    }
    Ok(())
}

fn report_mount() {
    if let Err(err) = mount() {
        tracing::error!(?err, "mount failed");
        web_sys::console::error_1(&err);
    }
}

fn mount() -> Result<(), JsValue> {
    if HOST.with(|slot| slot.borrow().is_some()) {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let raw = document
        .get_element_by_id(CONFIG_BLOCK_ID)
        .and_then(|block| block.text_content());
    let (config, config_err) = config_or_default(raw.as_deref());
    console::init(tracing_level(config.log_level));
    if let Some(err) = config_err {
        tracing::error!(%err, "ignoring config block, using defaults");
    }

    let (host, startup) = Host::mount(window, document, config);
    let host = Rc::new(host);
    HOST.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&host)));
    host.attach_listeners()?;
    host.apply_all(startup, None);
    host.replay_failed_images();
    tracing::info!("folio page ready");
    Ok(())
}
