//! Domain layer: strong types with validation and invariants (no network I/O).

mod id;
mod request;
mod response;
mod validation;
mod value;

pub use id::generate_message_id;
pub use request::{
    MessageLookup, Operation, ResolvedMessage, SendMessage, SendWindow, format_timestamp,
};
pub use response::{GatewayResponse, XmlElement};
pub use validation::{ConfigurationError, ValidationError};
pub use value::{
    ApiKey, CallbackUrl, Login, MessageId, MessageText, MessageType, Password, PhoneNumber,
    Recipient, SenderName, SmsId,
};
