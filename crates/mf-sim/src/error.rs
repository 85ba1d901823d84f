use mf_core::{CoreError, RouteKey};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("lifecycle callback `{0}` is not configured")]
    CallbackNotConfigured(&'static str),

    #[error("congestion count for route {0} would drop below zero")]
    CongestionUnderflow(RouteKey),
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
