/// One element of a parsed gateway reply.
///
/// Attributes keep document order. `text` is the concatenated, unescaped character
/// data directly inside this element (surrounding whitespace trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Successfully parsed XML reply from the gateway.
///
/// The gateway's reply schema is not modelled beyond the element tree; callers read
/// the fields they need through [`XmlElement`] helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    root: XmlElement,
}

impl GatewayResponse {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// The document element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Text content of the document element (e.g. the balance amount).
    pub fn text(&self) -> &str {
        &self.root.text
    }

    pub fn into_root(self) -> XmlElement {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlElement {
        XmlElement {
            name: "package".to_owned(),
            attributes: vec![("key".to_owned(), "K".to_owned())],
            text: String::new(),
            children: vec![
                XmlElement {
                    attributes: vec![("id".to_owned(), "1".to_owned())],
                    ..XmlElement::new("msg")
                },
                XmlElement {
                    attributes: vec![("id".to_owned(), "2".to_owned())],
                    ..XmlElement::new("msg")
                },
                XmlElement::new("balance"),
            ],
        }
    }

    #[test]
    fn attribute_lookup() {
        let root = sample();
        assert_eq!(root.attribute("key"), Some("K"));
        assert_eq!(root.attribute("login"), None);
    }

    #[test]
    fn child_helpers() {
        let root = sample();
        assert_eq!(
            root.child("msg").and_then(|it| it.attribute("id")),
            Some("1")
        );
        assert_eq!(root.children_named("msg").count(), 2);
        assert!(root.child("status").is_none());
    }

    #[test]
    fn response_text_reads_root() {
        let response = GatewayResponse::new(XmlElement {
            text: "100.50".to_owned(),
            ..XmlElement::new("response")
        });
        assert_eq!(response.text(), "100.50");
        assert_eq!(response.root().name, "response");
    }
}
