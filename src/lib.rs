//! Typed Rust client for the Cloopen template SMS HTTP API.
//!
//! The crate is split in three layers: a domain layer of strong types and validation,
//! a transport layer for request signing and wire-format details, and a small client
//! layer orchestrating a send and logging it.
//!
//! ```rust,no_run
//! use cloopen::{ClientConfig, CloopenClient, TemplateSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cloopen::CloopenError> {
//!     let config = ClientConfig::new("account-sid", "account-token", "app-id")
//!         .template("login", "100001");
//!     let client = CloopenClient::try_new(config)?;
//!     client
//!         .text(TemplateSms::new("login", "13800138000", ["1234", "5"]))
//!         .await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxError, BoxFuture, ClientConfig, CloopenClient, CloopenClientBuilder, CloopenError,
    DEFAULT_FAILURE_MESSAGE, HttpResponse, HttpTransport, SendLog, SendRecord, TracingSendLog,
};
pub use domain::{
    AccountSid, AccountToken, AppId, PhoneNumber, StatusCode, TemplateId, TemplateSms,
    TemplateSmsResponse, Templates, UnknownTemplate, ValidationError,
};
pub use transport::{CompactTimestamp, SignedCredential, sign};
