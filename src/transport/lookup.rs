use quick_xml::events::{BytesStart, Event};

use crate::domain::{MessageId, MessageLookup, Operation, SmsId};
use crate::transport::package::{Credentials, MSG, XmlError, encode_package};

/// Encode a `status` or `delete` request; `msg` carries whichever ids were supplied.
pub fn encode_lookup_request(
    credentials: &Credentials<'_>,
    operation: Operation,
    lookup: &MessageLookup,
) -> Result<String, XmlError> {
    let mut msg = BytesStart::new(MSG);
    if let Some(id) = lookup.id.as_ref() {
        msg.push_attribute((MessageId::FIELD, id.as_str()));
    }
    if let Some(sms_id) = lookup.sms_id.as_ref() {
        msg.push_attribute((SmsId::FIELD, sms_id.as_str()));
    }

    encode_package(credentials, operation, |writer| {
        writer.write_event(Event::Empty(msg))?;
        Ok(())
    })
}
