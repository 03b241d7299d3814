#![forbid(unsafe_code)]

//! Bridge to the hosted EmailJS client.
//!
//! The SDK is a plain script that installs a global object exposing
//! `init(publicKey)` and `sendForm(serviceId, templateId, form) -> Promise`.
//! Everything here goes through `Reflect` so the global may be absent until
//! the script has loaded.

use folio_core::{ContactError, SendOutcome};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlFormElement, HtmlScriptElement, Window};

/// Whether the client global is already defined.
pub(crate) fn client_present(window: &Window, global: &str) -> bool {
    Reflect::get(window, &JsValue::from_str(global)).is_ok_and(|client| !client.is_undefined())
}

/// Append a `<script>` for `url` and wait for it to load or fail.
pub(crate) async fn load_script(document: &Document, url: &str) -> Result<(), ContactError> {
    let load_err = |err: JsValue| ContactError::Load(describe(&err));
    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(load_err)?
        .dyn_into()
        .map_err(|_| ContactError::Load("script element has unexpected type".into()))?;
    script.set_src(url);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    let head = document
        .head()
        .ok_or_else(|| ContactError::Load("document has no <head>".into()))?;
    head.append_child(&script).map_err(load_err)?;

    JsFuture::from(loaded)
        .await
        .map(|_| ())
        .map_err(|_| ContactError::Load(format!("failed to fetch {url}")))
}

/// Call `init(publicKey)` on the client global.
pub(crate) fn init(window: &Window, global: &str, public_key: &str) -> Result<(), JsValue> {
    let client = client(window, global)?;
    method(&client, "init")?.call1(&client, &JsValue::from_str(public_key))?;
    Ok(())
}

/// Call `sendForm(serviceId, templateId, form)` and wait for it to settle.
pub(crate) async fn send_form(
    window: &Window,
    global: &str,
    service_id: &str,
    template_id: &str,
    form: &HtmlFormElement,
) -> SendOutcome {
    match try_send_form(window, global, service_id, template_id, form).await {
        Ok(response) => SendOutcome::Delivered {
            response: describe(&response),
        },
        Err(err) => SendOutcome::Rejected {
            reason: describe(&err),
        },
    }
}

async fn try_send_form(
    window: &Window,
    global: &str,
    service_id: &str,
    template_id: &str,
    form: &HtmlFormElement,
) -> Result<JsValue, JsValue> {
    let client = client(window, global)?;
    let pending = method(&client, "sendForm")?.call3(
        &client,
        &JsValue::from_str(service_id),
        &JsValue::from_str(template_id),
        form,
    )?;
    let promise: Promise = pending.dyn_into()?;
    JsFuture::from(promise).await
}

fn client(window: &Window, global: &str) -> Result<JsValue, JsValue> {
    let client = Reflect::get(window, &JsValue::from_str(global))?;
    if client.is_undefined() {
        return Err(JsValue::from_str(&format!("`{global}` is not loaded")));
    }
    Ok(client)
}

fn method(client: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(client, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("`{name}` is not a function")))
}

/// Human-readable text for a JS value: EmailJS `{ status, text }` responses,
/// `Error` objects, strings, or the debug form as a last resort.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    let status = Reflect::get(value, &JsValue::from_str("status"))
        .ok()
        .and_then(|v| v.as_f64());
    let text = Reflect::get(value, &JsValue::from_str("text"))
        .ok()
        .and_then(|v| v.as_string());
    match (status, text) {
        (Some(status), Some(text)) => format!("{status} {text}"),
        (Some(status), None) => status.to_string(),
        (None, Some(text)) => text,
        (None, None) => format!("{value:?}"),
    }
}
