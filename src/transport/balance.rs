use crate::domain::Operation;
use crate::transport::package::{Credentials, XmlError, encode_package};

pub fn encode_balance_request(credentials: &Credentials<'_>) -> Result<String, XmlError> {
    encode_package(credentials, Operation::Balance, |_| Ok(()))
}
