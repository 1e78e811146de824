use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::domain::{
    CallbackUrl, MessageId, MessageType, Operation, Recipient, ResolvedMessage, SenderName,
    SendWindow, format_timestamp,
};
use crate::transport::package::{Credentials, MSG, XmlError, encode_package};

/// Encode a `message` request for an already resolved message.
pub fn encode_message_request(
    credentials: &Credentials<'_>,
    message: &ResolvedMessage,
) -> Result<String, XmlError> {
    let type_code = message.message_type().code().to_string();
    let date_beg = message.window().start().map(format_timestamp);
    let date_end = message.window().end().map(format_timestamp);

    let mut msg = BytesStart::new(MSG);
    msg.push_attribute((Recipient::FIELD, message.recipient().raw()));
    msg.push_attribute((SenderName::FIELD, message.sender().as_str()));
    msg.push_attribute((MessageType::FIELD, type_code.as_str()));
    msg.push_attribute((MessageId::FIELD, message.id().as_str()));
    if let Some(url) = message.callback_url() {
        msg.push_attribute((CallbackUrl::FIELD, url.as_str()));
    }
    if let Some(date_beg) = date_beg.as_deref() {
        msg.push_attribute((SendWindow::START_FIELD, date_beg));
    }
    if let Some(date_end) = date_end.as_deref() {
        msg.push_attribute((SendWindow::END_FIELD, date_end));
    }

    encode_package(credentials, Operation::Message, |writer| {
        writer.write_event(Event::Start(msg))?;
        writer.write_event(Event::Text(BytesText::new(message.text().as_str())))?;
        writer.write_event(Event::End(BytesEnd::new(MSG)))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::domain::SendMessage;
    use crate::transport::decode_response;

    use super::*;

    fn resolve(message: SendMessage) -> ResolvedMessage {
        message.resolve(Some("Shop")).unwrap()
    }

    #[test]
    fn encodes_plain_sms() {
        let message = resolve(SendMessage {
            id: Some("1001".to_owned()),
            ..SendMessage::new("Hi", "380501234567")
        });
        let xml = encode_message_request(&[("key", "K")], &message).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<package key="K"><message>"#,
                r#"<msg recipient="380501234567" sender="Shop" type="0" id="1001">Hi</msg>"#,
                r#"</message></package>"#,
            )
        );
    }

    #[test]
    fn encodes_push_url_and_send_window() {
        let message = resolve(SendMessage {
            message_type: Some(MessageType::Push),
            id: Some("7".to_owned()),
            url: Some("https://example.com/promo".to_owned()),
            date_beg: Utc.timestamp_opt(1_409_770_256, 0).single(),
            date_end: Utc.timestamp_opt(1_409_770_291, 0).single(),
            ..SendMessage::new("Open me", "380501234567")
        });
        let xml = encode_message_request(&[("key", "K")], &message).unwrap();
        assert!(
            xml.contains(concat!(
                r#"<msg recipient="380501234567" sender="Shop" type="2" id="7" "#,
                r#"url="https://example.com/promo" "#,
                r#"date_beg="2014-09-03T18:50:56+0000" date_end="2014-09-03T18:51:31+0000">"#,
                r#"Open me</msg>"#,
            )),
            "got {xml}"
        );
    }

    #[test]
    fn escapes_message_text() {
        let message = resolve(SendMessage::new("5 < 6 & \"quoted\"", "380501234567"));
        let xml = encode_message_request(&[("key", "K")], &message).unwrap();
        assert!(xml.contains("5 &lt; 6 &amp;"), "got {xml}");

        let parsed = decode_response(&xml).unwrap();
        let msg = parsed
            .root()
            .child("message")
            .and_then(|it| it.child("msg"))
            .unwrap();
        assert_eq!(msg.text, "5 < 6 & \"quoted\"");
    }

    #[test]
    fn reparsed_request_recovers_operation_and_attributes() {
        let message = resolve(SendMessage {
            message_type: Some(MessageType::Voice),
            id: Some("55".to_owned()),
            ..SendMessage::new("Call me", "380501234567")
        });
        let xml =
            encode_message_request(&[("login", "user"), ("password", "pass")], &message).unwrap();

        let parsed = decode_response(&xml).unwrap();
        let root = parsed.root();
        assert_eq!(root.name, "package");
        assert_eq!(root.attribute("login"), Some("user"));
        assert_eq!(root.attribute("password"), Some("pass"));
        assert_eq!(root.children.len(), 1);

        let operation = &root.children[0];
        assert_eq!(operation.name, "message");
        assert_eq!(operation.children_named("msg").count(), 1);

        let msg = operation.child("msg").unwrap();
        assert_eq!(
            msg.attributes,
            vec![
                ("recipient".to_owned(), "380501234567".to_owned()),
                ("sender".to_owned(), "Shop".to_owned()),
                ("type".to_owned(), "3".to_owned()),
                ("id".to_owned(), "55".to_owned()),
            ]
        );
        assert_eq!(msg.text, "Call me");
    }
}
