//! Client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Core error: {0}")]
    Core(#[from] dauth_core::DauthError),
}
