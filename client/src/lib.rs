//! Client for the Blacklist Alliance phone lookup API.
//!
//! ```no_run
//! use blacklist_alliance_client::{Client, ClientError};
//!
//! let client = Client::builder()
//!     .endpoint("https://api.blacklistalliance.com")
//!     .api_key("secret")
//!     .build()?;
//!
//! match client.lookup("11231234567") {
//!     Ok(result) => println!("{:?} -> {:?}", result.sid(), result.message()),
//!     Err(ClientError::InvalidPhoneNumber(msg)) => eprintln!("bad number: {}", msg),
//!     Err(err) => return Err(err),
//! }
//! # Ok::<(), ClientError>(())
//! ```
pub use crate::classify::{classify, ServiceFailure};
pub use crate::http::{Client, ClientBuilder, HttpClient, PathEncoding, ReqwestClient};
pub use crate::responses::*;

pub mod classify;
pub mod http;
pub mod responses;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The transport could not complete the request. `code` carries the HTTP
    /// status when the server answered outside the 2xx range.
    #[error("{message}")]
    Transport { message: String, code: Option<u16> },
    #[error("Response body is empty")]
    EmptyResponse,
    #[error("Error when decoding json response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    InvalidPhoneNumber(String),
    #[error("{0}")]
    InvalidApiKey(String),
    #[error("{0}")]
    Service(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }

    pub fn is_invalid_phone_number(&self) -> bool {
        matches!(self, ClientError::InvalidPhoneNumber(_))
    }

    pub fn is_invalid_api_key(&self) -> bool {
        matches!(self, ClientError::InvalidApiKey(_))
    }

    /// True for failures reported by the service itself in a well-formed body.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidPhoneNumber(_)
                | ClientError::InvalidApiKey(_)
                | ClientError::Service(_)
        )
    }

    /// HTTP status of a failed transport round trip, if the server answered.
    pub fn code(&self) -> Option<u16> {
        match self {
            ClientError::Transport { code, .. } => *code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
