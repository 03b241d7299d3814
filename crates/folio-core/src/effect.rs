#![forbid(unsafe_code)]

//! Effects returned by the page model for the host to perform.
//!
//! Effects are applied in order. A host that fails to apply one effect
//! (missing node, rejected DOM call) logs it and continues with the rest.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::contact::SubmissionId;
use crate::event::PageEvent;
use crate::layout::NodeRef;
use crate::notify::NotificationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Suppress the default action of the DOM event being handled.
    PreventDefault,
    SetClass {
        node: NodeRef,
        class: String,
        on: bool,
    },
    Focus {
        node: NodeRef,
    },
    /// Smooth-scroll the element with this id into view.
    ScrollIntoView {
        section_id: String,
    },
    /// Start reporting visibility of `node` as [`PageEvent::SectionVisible`].
    ObserveVisibility {
        node: NodeRef,
        threshold: f64,
    },
    StopObserving {
        node: NodeRef,
    },
    /// Set a skill bar's target width and transition delay.
    SetBarWidth {
        index: usize,
        percent: f64,
        delay: Duration,
    },
    SetImage {
        index: usize,
        src: String,
        alt: String,
    },
    /// Append a stylesheet to the document head.
    InjectStyles {
        css: String,
    },
    /// Fetch and execute a script; report back with
    /// [`PageEvent::ClientLoaded`] or [`PageEvent::ClientLoadFailed`].
    LoadScript {
        url: String,
    },
    InitClient {
        public_key: String,
    },
    /// Hand the contact form to the email client; report back with
    /// [`PageEvent::SendSettled`].
    SendForm {
        submission: SubmissionId,
        service_id: String,
        template_id: String,
    },
    ResetForm,
    CreateNotification {
        id: NotificationId,
        message: String,
        classes: Vec<String>,
    },
    RemoveNode {
        node: NodeRef,
    },
    /// Dispatch `event` back into the model after `after`.
    Schedule {
        after: Duration,
        event: PageEvent,
    },
}

/// CSS value for a bar width, e.g. `75%`.
#[must_use]
pub fn percent_css(percent: f64) -> String {
    format!("{percent}%")
}

/// CSS value for a transition delay, e.g. `0.3s`.
#[must_use]
pub fn seconds_css(delay: Duration) -> String {
    format!("{}s", delay.as_secs_f64())
}
