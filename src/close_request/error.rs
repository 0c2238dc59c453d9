//! Errors raised while running a close request

use super::SubscriptionId;

/// Errors that abort a close request
///
/// Both variants leave the document open: the host treats a failed dispatch
/// exactly like a veto.
#[derive(Debug)]
pub enum CloseRequestError {
    /// The document to close does not exist (unknown id or absent reference)
    InvalidArgument(String),
    /// An observer returned an error; observers after it were not invoked
    Observer {
        subscription: SubscriptionId,
        source: anyhow::Error,
    },
}

impl CloseRequestError {
    pub(crate) fn missing_document(what: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("no document to close: {}", what))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument(msg) => format!("Cannot close: {}", msg),
            Self::Observer { source, .. } => format!("Close aborted: {}", source),
        }
    }
}

impl std::fmt::Display for CloseRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Self::Observer {
                subscription,
                source,
            } => write!(f, "observer {} failed: {}", subscription.0, source),
        }
    }
}

impl std::error::Error for CloseRequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Observer { source, .. } => Some(&**source),
        }
    }
}
