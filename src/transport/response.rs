use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::domain::{GatewayResponse, XmlElement};
use crate::transport::package::XmlError;

/// Parse a gateway reply into an element tree.
///
/// Rejects anything that is not a single well-formed document element: missing or
/// repeated roots, mismatched or unclosed tags, and stray text outside the root.
pub fn decode_response(xml: &str) -> Result<GatewayResponse, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut open = Vec::<XmlElement>::new();
    let mut root = None::<XmlElement>;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(XmlError::MultipleRoots);
                }
                open.push(element_from(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from(&start)?;
                close_element(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                let element = open.pop().ok_or(XmlError::UnexpectedEnd)?;
                close_element(&mut open, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                append_text(&mut open, &text)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                append_text(&mut open, std::str::from_utf8(&bytes)?)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.pop() {
        return Err(XmlError::Unclosed { name: element.name });
    }
    root.map(GatewayResponse::new).ok_or(XmlError::MissingRoot)
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        ..Default::default()
    })
}

fn close_element(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(open: &mut [XmlElement], text: &str) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(XmlError::TextOutsideRoot),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_balance_reply() {
        let parsed = decode_response("<response>100.50</response>").unwrap();
        assert_eq!(parsed.root().name, "response");
        assert_eq!(parsed.text(), "100.50");
    }

    #[test]
    fn decodes_nested_reply_with_declaration() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<package>
  <status>
    <msg id="1001" sms_id="98765" sms_count="1" date_completed="2014-09-03T18:51:31+0300">102</msg>
  </status>
</package>"#;
        let parsed = decode_response(xml).unwrap();
        let msg = parsed
            .root()
            .child("status")
            .and_then(|it| it.child("msg"))
            .unwrap();
        assert_eq!(msg.attribute("sms_id"), Some("98765"));
        assert_eq!(msg.attribute("sms_count"), Some("1"));
        assert_eq!(msg.text, "102");
    }

    #[test]
    fn unescapes_text_and_attributes() {
        let parsed =
            decode_response(r#"<error code="a&amp;b">bad &lt;sender&gt;</error>"#).unwrap();
        assert_eq!(parsed.root().attribute("code"), Some("a&b"));
        assert_eq!(parsed.text(), "bad <sender>");
    }

    #[test]
    fn decodes_cdata() {
        let parsed = decode_response("<response><![CDATA[1 < 2]]></response>").unwrap();
        assert_eq!(parsed.text(), "1 < 2");
    }

    #[test]
    fn rejects_plain_text() {
        assert!(matches!(
            decode_response("Internal error"),
            Err(XmlError::TextOutsideRoot)
        ));
    }

    #[test]
    fn rejects_empty_body() {
        assert!(matches!(decode_response("  "), Err(XmlError::MissingRoot)));
    }

    #[test]
    fn rejects_unclosed_root() {
        assert!(decode_response("<response>100.50").is_err());
    }

    #[test]
    fn rejects_mismatched_tags() {
        assert!(decode_response("<response>100.50</balance>").is_err());
    }

    #[test]
    fn rejects_multiple_roots() {
        assert!(matches!(
            decode_response("<a/><b/>"),
            Err(XmlError::MultipleRoots)
        ));
    }
}
