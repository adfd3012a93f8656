use thiserror::Error;

use super::HandlerError;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Handler failed: {0}")]
    Handler(#[from] HandlerError),
}

pub type InvokeResult = Result<(), InvokeError>;
