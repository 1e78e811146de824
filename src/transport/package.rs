use quick_xml::Writer;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::domain::Operation;

/// Root element of every request document.
pub const PACKAGE: &str = "package";
/// Element carrying per-message data under the operation element.
pub const MSG: &str = "msg";

/// Credential attributes placed on `package`, in document order.
pub type Credentials<'a> = [(&'static str, &'a str)];

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("failed to write XML: {0}")]
    Write(#[from] std::io::Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("text outside of the root element")]
    TextOutsideRoot,

    #[error("element <{name}> is not closed")]
    Unclosed { name: String },

    #[error("unexpected closing tag")]
    UnexpectedEnd,
}

/// Write `<package ...credentials><operation>…</operation></package>`.
///
/// `body` writes the content of the operation element.
pub fn encode_package<F>(
    credentials: &Credentials<'_>,
    operation: Operation,
    body: F,
) -> Result<String, XmlError>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<(), XmlError>,
{
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut package = BytesStart::new(PACKAGE);
    for &(name, value) in credentials {
        package.push_attribute((name, value));
    }
    writer.write_event(Event::Start(package))?;

    let tag = operation.tag();
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    body(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;

    writer.write_event(Event::End(BytesEnd::new(PACKAGE)))?;

    String::from_utf8(writer.into_inner()).map_err(|err| XmlError::Utf8(err.utf8_error()))
}
