#![forbid(unsafe_code)]

//! Canonical page events.
//!
//! The host translates DOM callbacks (click, keydown, scroll, intersection,
//! image error, submit, timers, promise settlement) into [`PageEvent`] values
//! and feeds them to [`crate::Portfolio::update`].

use serde::{Deserialize, Serialize};

use crate::contact::SubmissionId;
use crate::layout::SectionBounds;
use crate::notify::{NotificationId, NotificationStage};

/// How a control was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Click,
    /// Enter or Space while the control has focus.
    Key,
}

impl Activation {
    /// Map a DOM `KeyboardEvent.key` to an activation.
    ///
    /// Only Enter and Space activate a control.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " => Some(Self::Key),
            _ => None,
        }
    }
}

/// Result of the email client's send call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SendOutcome {
    Delivered { response: String },
    Rejected { reason: String },
}

/// One event fed to the page model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    OpenMenu {
        via: Activation,
    },
    CloseMenu {
        via: Activation,
    },
    NavLinkActivated {
        index: usize,
    },
    /// Window scrolled; `sections` is aligned with [`crate::PageLayout::sections`].
    ScrollTick {
        offset: f64,
        sections: Vec<SectionBounds>,
    },
    /// Visibility callback for the skills section.
    SectionVisible {
        intersecting: bool,
    },
    /// Image `index` failed to load; `src` is the URL that failed.
    ImageError {
        index: usize,
        src: String,
    },
    /// Contact form submitted; `fields` is a snapshot for diagnostics.
    SubmitForm {
        fields: Vec<(String, String)>,
    },
    ClientLoaded,
    ClientLoadFailed {
        reason: String,
    },
    /// A send was due but the client global is gone from the page.
    ClientMissing {
        submission: SubmissionId,
    },
    SendSettled {
        submission: SubmissionId,
        outcome: SendOutcome,
    },
    NotificationTimer {
        id: NotificationId,
        stage: NotificationStage,
    },
}
