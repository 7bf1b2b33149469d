//! Tree-shaped markup documents.
//!
//! Views build a [`Document`] as a plain value; it is only serialized to text
//! when the response is rendered. Empty elements self-close (`<a/>`), text and
//! attribute values are escaped on output.

use std::fmt::{self, Display, Formatter, Write};

/// XHTML 1.0 Strict doctype emitted by [`Document::xhtml`].
pub const XHTML_DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">";

/// XHTML namespace attached to the root `html` element.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// A markup element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute. Attributes are written in insertion order.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add an attribute only when `value` is `Some`.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"", name)?;
            escape(f, value, true)?;
            f.write_char('"')?;
        }

        if self.children.is_empty() {
            return f.write_str("/>");
        }

        f.write_char('>')?;
        for child in &self.children {
            match child {
                Node::Element(element) => Display::fmt(element, f)?,
                Node::Text(text) => escape(f, text, false)?,
            }
        }
        write!(f, "</{}>", self.name)
    }
}

/// A complete document: optional doctype followed by a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    doctype: Option<String>,
    root: Element,
}

impl Document {
    /// A bare document; serializes to exactly the root element.
    pub fn new(root: Element) -> Self {
        Self { doctype: None, root }
    }

    /// An XHTML page. The root gets the XHTML namespace unless it already has one.
    pub fn xhtml(root: Element) -> Self {
        let root = if root.attribute("xmlns").is_some() {
            root
        } else {
            root.attr("xmlns", XHTML_NAMESPACE)
        };
        Self {
            doctype: Some(XHTML_DOCTYPE.to_string()),
            root,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(doctype) = &self.doctype {
            writeln!(f, "{}", doctype)?;
        }
        Display::fmt(&self.root, f)
    }
}

fn escape(f: &mut Formatter<'_>, value: &str, attribute: bool) -> fmt::Result {
    for c in value.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if attribute => f.write_str("&quot;")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element_self_closes() {
        assert_eq!(Document::new(Element::new("a")).to_string(), "<a/>");
    }

    #[test]
    fn test_nested_elements_and_attributes() {
        let doc = Document::new(
            Element::new("p")
                .attr("class", "note")
                .text("hi ")
                .child(Element::new("b").text("there")),
        );
        assert_eq!(doc.to_string(), r#"<p class="note">hi <b>there</b></p>"#);
    }

    #[test]
    fn test_escaping() {
        let element = Element::new("a")
            .attr("href", "x?a=1&b=\"2\"")
            .text("<1 & 2>");
        assert_eq!(
            element.to_string(),
            r#"<a href="x?a=1&amp;b=&quot;2&quot;">&lt;1 &amp; 2&gt;</a>"#
        );
    }

    #[test]
    fn test_xhtml_adds_doctype_and_namespace() {
        let doc = Document::xhtml(Element::new("html"));
        let text = doc.to_string();
        assert!(text.starts_with("<!DOCTYPE html"));
        assert!(text.ends_with(r#"<html xmlns="http://www.w3.org/1999/xhtml"/>"#));
    }

    #[test]
    fn test_attr_opt() {
        let element = Element::new("tr")
            .attr_opt("class", Some("highlight"))
            .attr_opt("id", None::<&str>);
        assert_eq!(element.to_string(), r#"<tr class="highlight"/>"#);
    }
}
