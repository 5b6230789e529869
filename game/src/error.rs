//! Error taxonomy for remote sync and local validation.
//!
//! ERROR HANDLING
//! ==============
//! Every variant is handled the same way at the UI boundary: log it, show a
//! blocking message built by [`SyncError::user_message`], and leave session
//! state untouched. Only [`SyncError::Validation`] is produced without a
//! network round-trip.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a remote sync operation or its local precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),
    /// Response body was not JSON or did not match the expected shape.
    #[error("malformed response: {0}")]
    ResponseParse(String),
    /// Well-formed response carrying an application-level `error` field.
    #[error("server rejected request: {0}")]
    ServerRejected(String),
    /// A local precondition failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Local precondition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// At least one answer slot still holds the empty sentinel.
    #[error("Please fill in every slot before checking your answer.")]
    IncompleteAnswer,
    /// The operation needs an active game in a matching phase.
    #[error("No game is in progress.")]
    NoActiveGame,
}

/// Remote operation a failure is reported against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    CreateGame,
    FlipCard,
    CheckPair,
    CheckAnswer,
    Resync,
    AbandonGame,
}

impl Operation {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::CreateGame => "creating the game",
            Self::FlipCard => "flipping the card",
            Self::CheckPair => "checking the pair",
            Self::CheckAnswer => "checking the answer",
            Self::Resync => "refreshing the game",
            Self::AbandonGame => "abandoning the game",
        }
    }
}

impl SyncError {
    /// Text for the blocking notification shown to the user.
    #[must_use]
    pub fn user_message(&self, op: Operation) -> String {
        match self {
            Self::ServerRejected(text) => format!("Error: {text}"),
            Self::Validation(err) => err.to_string(),
            Self::Network(_) | Self::ResponseParse(_) => {
                format!("Something went wrong while {}.", op.describe())
            }
        }
    }

    /// Whether the request reached the server and was refused by it.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ServerRejected(_))
    }
}
