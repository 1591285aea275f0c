//! Namecheap XML envelope parsing
//!
//! Responses are small, so they are parsed into a plain element tree
//! (name, attributes, text, children) and queried by element name.
//!
//! ```xml
//! <ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
//!   <Errors />
//!   <RequestedCommand>namecheap.domains.check</RequestedCommand>
//!   <CommandResponse Type="namecheap.domains.check">
//!     <DomainCheckResult Domain="example.com" Available="true" />
//!   </CommandResponse>
//! </ApiResponse>
//! ```

use domreg_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// One XML element with everything below it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local name (namespace prefix stripped)
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content
    pub text: String,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute parsed as a Namecheap boolean ("true"/"false")
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Non-empty attribute value, owned
    pub fn attr_owned(&self, name: &str) -> Option<String> {
        self.attr(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Direct children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First descendant (depth-first, self included) with the given name
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// All descendants (depth-first, self included) with the given name
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect(name, found);
        }
    }
}

/// Parse an XML document into its root element
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::malformed(format!(
                "Invalid XML at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| Error::malformed(format!("Invalid XML text: {}", e)))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::malformed("Unbalanced closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::malformed("Unexpected end of XML document"));
    }

    root.ok_or_else(|| Error::malformed("Empty XML document"))
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute
            .map_err(|e| Error::malformed(format!("Invalid attribute on <{}>: {}", name, e)))?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::malformed(format!("Invalid attribute value on <{}>: {}", name, e)))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        ..Default::default()
    })
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::malformed("Multiple root elements")),
    }
    Ok(())
}

/// Parse an API envelope and return its `CommandResponse` element
///
/// # Returns
///
/// - `Ok(Element)`: `Status="OK"` and a command response is present
/// - `Err(Error::Registrar)`: `Status="ERROR"`, carrying the first error
///   number and all error texts
/// - `Err(Error::MalformedResponse)`: anything else
pub fn parse_envelope(xml: &str) -> Result<Element> {
    let root = parse_document(xml)?;

    if root.name != "ApiResponse" {
        return Err(Error::malformed(format!(
            "Expected <ApiResponse>, got <{}>",
            root.name
        )));
    }

    let status = root.attr("Status").unwrap_or_default();

    if status.eq_ignore_ascii_case("ERROR") {
        return Err(envelope_error(&root));
    }

    if !status.eq_ignore_ascii_case("OK") {
        return Err(Error::malformed(format!(
            "Unexpected response status: '{}'",
            status
        )));
    }

    root.children
        .into_iter()
        .find(|child| child.name == "CommandResponse")
        .ok_or_else(|| Error::malformed("Response has no <CommandResponse>"))
}

fn envelope_error(root: &Element) -> Error {
    let errors: Vec<&Element> = root
        .child("Errors")
        .map(|errors| errors.children_named("Error").collect())
        .unwrap_or_default();

    let Some(first) = errors.first() else {
        return Error::registrar("", "Unknown error");
    };

    let code = first.attr("Number").unwrap_or_default();
    let message = errors
        .iter()
        .map(|error| error.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    if message.is_empty() {
        Error::registrar(code, "Unknown error")
    } else {
        Error::registrar(code, message)
    }
}
