#![forbid(unsafe_code)]

//! Error types.
//!
//! Failures never escape to the page: the model turns them into log lines
//! and error notifications.

/// Configuration could not be read.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON config block is malformed or has wrongly-typed fields.
    Parse(serde_json::Error),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid page config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}

/// A contact submission failed.
///
/// The reason strings come from the host and are opaque to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// The email client script could not be fetched or executed.
    Load(String),
    /// The email client rejected the send.
    Send(String),
}

impl core::fmt::Display for ContactError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Load(reason) => write!(f, "failed to load email client: {reason}"),
            Self::Send(reason) => write!(f, "failed to send message: {reason}"),
        }
    }
}

impl ContactError {
    /// The host-supplied reason, without the display prefix.
    #[must_use]
    pub fn into_reason(self) -> String {
        match self {
            Self::Load(reason) | Self::Send(reason) => reason,
        }
    }
}

impl std::error::Error for ContactError {}
