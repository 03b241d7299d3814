#![forbid(unsafe_code)]

//! Core: the portfolio page as a deterministic, host-driven model.
//!
//! Design goals:
//! - **Explicit state**: everything the page remembers lives in [`Portfolio`].
//! - **Typed boundary**: DOM callbacks arrive as [`PageEvent`]s, DOM work
//!   leaves as [`Effect`]s addressed by [`NodeRef`].
//! - **No blocking / no threads**: asynchronous work (script load, send,
//!   timers) is performed by the host and reported back as events.
//!
//! `folio-web` binds this model to a real document through `wasm-bindgen`.

pub mod config;
pub mod contact;
pub mod effect;
pub mod error;
pub mod event;
pub mod image;
pub mod layout;
pub mod logging;
pub mod nav;
pub mod notify;
pub mod portfolio;
pub mod reveal;
pub mod scroll;

pub use config::PageConfig;
pub use contact::{ClientState, SubmissionId};
pub use effect::Effect;
pub use error::{ConfigError, ContactError};
pub use event::{Activation, PageEvent, SendOutcome};
pub use layout::{NodeRef, PageLayout, SectionBounds};
pub use notify::{NotificationId, NotificationStage};
pub use portfolio::Portfolio;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, info_span, warn};
