//! Typed Rust client for the AlphaSMS XML gateway API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for the
//! XML wire format, and a small client layer orchestrating requests. Each call
//! validates its input, POSTs one XML document, and parses the XML reply.
//!
//! ```rust,no_run
//! use alphasms::{AlphaSmsClient, Auth, MessageLookup, SendMessage, SmsId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), alphasms::AlphaSmsError> {
//!     let client = AlphaSmsClient::builder(Auth::api_key("...")?)
//!         .sender("AlphaName")
//!         .build()?;
//!
//!     let _sent = client.send(SendMessage::new("hello", "380501234567")).await?;
//!     let _status = client
//!         .status(MessageLookup::by_sms_id(SmsId::new("98765")?))
//!         .await?;
//!     let balance = client.balance().await?;
//!     println!("balance: {}", balance.text());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{AlphaSmsClient, AlphaSmsClientBuilder, AlphaSmsError, Auth, ClientConfig};
pub use domain::{
    ApiKey, CallbackUrl, ConfigurationError, GatewayResponse, Login, MessageId, MessageLookup,
    MessageText, MessageType, Password, PhoneNumber, Recipient, SendMessage, SenderName, SmsId,
    ValidationError, XmlElement, generate_message_id,
};
