//! Error types for node queries.

/// RPC code for an unknown block, transaction or address.
pub const RPC_INVALID_ADDRESS_OR_KEY: i64 = -5;

/// RPC code for an out-of-range or malformed parameter.
pub const RPC_INVALID_PARAMETER: i64 = -8;

/// Errors that can occur when querying the node.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// The node rejected the call.
    #[error("{message}. Code:{code}")]
    Rpc { code: i64, message: String },

    /// The node could not be reached or the connection dropped.
    #[error("node unreachable: {0}")]
    Transport(String),

    /// The node answered with an HTTP error and no JSON-RPC body.
    #[error("node answered with HTTP status {0}")]
    Http(u16),

    /// The response did not have the expected shape.
    #[error("invalid node response: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NodeError {
    /// Creates a new RPC error.
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Creates a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a new decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Returns the RPC error code, if the node produced one.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the requested block or height does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.rpc_code(),
            Some(RPC_INVALID_ADDRESS_OR_KEY) | Some(RPC_INVALID_PARAMETER)
        )
    }

    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http(status) => *status >= 500,
            _ => false,
        }
    }
}
