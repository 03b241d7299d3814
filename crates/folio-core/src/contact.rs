#![forbid(unsafe_code)]

//! Contact form submission through the hosted email client.
//!
//! Each submit is one attempt: intercept, make sure the client is loaded,
//! send, report. The client is a page-wide resource with a guarded lifecycle:
//!
//! ```text
//! Absent ──submit──▶ Loading ──loaded──▶ Ready (initialized once)
//!    ▲                  │  ▲                  │
//!    └──────failed──────┘  └────missing───────┘
//! ```
//!
//! "Missing" is the host finding the client global gone when a send is due;
//! the submission is parked again and the script reloaded.
//!
//! Submissions that arrive while a load is in flight are parked behind it
//! instead of starting a second load, so the script is requested and the
//! client initialized at most once per successful load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EmailClientConfig;
use crate::effect::Effect;
use crate::error::ContactError;
use crate::event::SendOutcome;
use crate::notify::Notifier;

/// Identifier for one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Absent,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Parked behind an in-flight client load.
    AwaitingClient,
    /// Handed to the client; waiting for it to settle.
    Sending,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    enabled: bool,
    client: ClientState,
    email: EmailClientConfig,
    next_id: u64,
    pending: BTreeMap<SubmissionId, SubmissionPhase>,
}

impl ContactForm {
    /// `client_loaded` is true when the client global already exists at
    /// mount; it is then used as-is without initialization.
    #[must_use]
    pub fn new(form_present: bool, client_loaded: bool, email: &EmailClientConfig) -> Self {
        if !form_present {
            crate::warn!("contact form not found; submissions disabled");
        }
        Self {
            enabled: form_present,
            client: if client_loaded {
                ClientState::Ready
            } else {
                ClientState::Absent
            },
            email: email.clone(),
            next_id: 1,
            pending: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn client_state(&self) -> ClientState {
        self.client
    }

    #[must_use]
    pub fn phase(&self, id: SubmissionId) -> Option<SubmissionPhase> {
        self.pending.get(&id).copied()
    }

    /// Submissions that have not settled yet.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn submit(&mut self, fields: &[(String, String)]) -> Vec<Effect> {
        if !self.enabled {
            crate::debug!("submit event without a contact form");
            return Vec::new();
        }
        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        crate::debug!(submission = id.0, ?fields, "contact form submitted");

        let mut effects = vec![Effect::PreventDefault];
        match self.client {
            ClientState::Ready => {
                self.pending.insert(id, SubmissionPhase::Sending);
                effects.push(self.send(id));
            }
            ClientState::Loading => {
                crate::debug!(submission = id.0, "waiting on in-flight client load");
                self.pending.insert(id, SubmissionPhase::AwaitingClient);
            }
            ClientState::Absent => {
                crate::info!(url = %self.email.sdk_url, "loading email client");
                self.client = ClientState::Loading;
                self.pending.insert(id, SubmissionPhase::AwaitingClient);
                effects.push(Effect::LoadScript {
                    url: self.email.sdk_url.clone(),
                });
            }
        }
        effects
    }

    /// The client script finished loading: initialize it and send everything
    /// that was waiting on it.
    pub fn on_client_loaded(&mut self) -> Vec<Effect> {
        if self.client != ClientState::Loading {
            crate::debug!(state = ?self.client, "ignoring client load report");
            return Vec::new();
        }
        self.client = ClientState::Ready;
        let mut effects = vec![Effect::InitClient {
            public_key: self.email.public_key.clone(),
        }];
        let waiting = self.take_waiting();
        for id in waiting {
            self.pending.insert(id, SubmissionPhase::Sending);
            effects.push(self.send(id));
        }
        effects
    }

    /// The client script could not be loaded: fail every waiting submission.
    pub fn on_client_load_failed(&mut self, reason: &str, notifier: &mut Notifier) -> Vec<Effect> {
        if self.client != ClientState::Loading {
            crate::debug!(state = ?self.client, "ignoring client load failure");
            return Vec::new();
        }
        self.client = ClientState::Absent;
        let err = ContactError::Load(reason.to_owned());
        let mut effects = Vec::new();
        for id in self.take_waiting() {
            crate::error!(submission = id.0, error = %err, "form submission error");
            effects.extend(notifier.failure());
        }
        effects
    }

    /// The host found no client global when sending `id`: reload the client
    /// and park the submission behind it.
    pub fn on_client_missing(&mut self, id: SubmissionId) -> Vec<Effect> {
        if self.pending.get(&id) != Some(&SubmissionPhase::Sending) {
            crate::debug!(submission = id.0, "ignoring missing-client report");
            return Vec::new();
        }
        self.pending.insert(id, SubmissionPhase::AwaitingClient);
        if self.client == ClientState::Loading {
            return Vec::new();
        }
        crate::warn!(submission = id.0, url = %self.email.sdk_url, "email client gone; reloading");
        self.client = ClientState::Loading;
        vec![Effect::LoadScript {
            url: self.email.sdk_url.clone(),
        }]
    }

    pub fn on_send_settled(
        &mut self,
        id: SubmissionId,
        outcome: &SendOutcome,
        notifier: &mut Notifier,
    ) -> Vec<Effect> {
        if self.pending.get(&id) != Some(&SubmissionPhase::Sending) {
            crate::debug!(submission = id.0, "ignoring settlement of unknown submission");
            return Vec::new();
        }
        self.pending.remove(&id);
        match outcome {
            SendOutcome::Delivered { response } => {
                crate::info!(submission = id.0, %response, "form submitted successfully");
                let mut effects = notifier.success();
                effects.push(Effect::ResetForm);
                effects
            }
            SendOutcome::Rejected { reason } => {
                let err = ContactError::Send(reason.clone());
                crate::error!(submission = id.0, error = %err, "form submission error");
                notifier.failure()
            }
        }
    }

    fn send(&self, submission: SubmissionId) -> Effect {
        Effect::SendForm {
            submission,
            service_id: self.email.service_id.clone(),
            template_id: self.email.template_id.clone(),
        }
    }

    /// Remove and return parked submissions in submission order.
    fn take_waiting(&mut self) -> Vec<SubmissionId> {
        let waiting: Vec<SubmissionId> = self
            .pending
            .iter()
            .filter(|(_, phase)| **phase == SubmissionPhase::AwaitingClient)
            .map(|(id, _)| *id)
            .collect();
        for id in &waiting {
            self.pending.remove(id);
        }
        waiting
    }
}
