//! Transport layer: XML wire format (request documents and reply parsing).

mod balance;
mod lookup;
mod message;
mod package;
mod response;

pub use balance::encode_balance_request;
pub use lookup::encode_lookup_request;
pub use message::encode_message_request;
pub use response::decode_response;
