use std::fmt;

use thiserror::Error;

/// Every call the client makes to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListChannels,
    AddChannel,
    RemoveChannel,
    Reindex,
    Search,
    Autocomplete,
    RecordClick,
}

impl Operation {
    /// Message shown when the engine fails without explaining why.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ListChannels => "Failed to fetch channels",
            Self::AddChannel => "Failed to add channel",
            Self::RemoveChannel => "Failed to remove channel",
            Self::Reindex => "Failed to reindex channels",
            Self::Search => "Search failed",
            Self::Autocomplete => "Failed to fetch suggestions",
            Self::RecordClick => "Failed to update click count",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ListChannels => "list channels",
            Self::AddChannel => "add channel",
            Self::RemoveChannel => "remove channel",
            Self::Reindex => "reindex",
            Self::Search => "search",
            Self::Autocomplete => "autocomplete",
            Self::RecordClick => "record click",
        };
        f.write_str(name)
    }
}

/// Failure of a single engine call. `Display` is the user-visible message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("{source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response carrying an `{error}` message, shown verbatim.
    #[error("{message}")]
    Rejected {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// Non-2xx response with no usable error payload.
    #[error("{}", .operation.fallback_message())]
    Unexplained { operation: Operation, status: u16 },

    /// 2xx response whose body could not be decoded.
    #[error("{}", .operation.fallback_message())]
    Malformed {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected locally before any request was issued.
    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Transport { operation, .. }
            | Self::Rejected { operation, .. }
            | Self::Unexplained { operation, .. }
            | Self::Malformed { operation, .. } => Some(*operation),
            Self::InvalidInput(_) => None,
        }
    }

    /// HTTP status, when the engine answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Unexplained { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_shows_server_message_verbatim() {
        let err = ApiError::Rejected {
            operation: Operation::AddChannel,
            status: 500,
            message: "Failed to extract channel ID: bad url".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to extract channel ID: bad url");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_unexplained_falls_back_per_operation() {
        let add = ApiError::Unexplained {
            operation: Operation::AddChannel,
            status: 502,
        };
        assert_eq!(add.to_string(), "Failed to add channel");

        let search = ApiError::Unexplained {
            operation: Operation::Search,
            status: 500,
        };
        assert_eq!(search.to_string(), "Search failed");
        assert_eq!(search.operation(), Some(Operation::Search));
    }

    #[test]
    fn test_malformed_uses_fallback_message() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ApiError::Malformed {
            operation: Operation::Reindex,
            source,
        };
        assert_eq!(err.to_string(), "Failed to reindex channels");
        assert_eq!(err.status(), None);
    }
}
