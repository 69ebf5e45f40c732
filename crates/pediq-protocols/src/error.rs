use thiserror::Error;

use pediq_core::error::InvalidInput;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
}
