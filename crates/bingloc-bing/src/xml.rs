//! SOAP response XML to JSON-value conversion and request-text escaping.
//!
//! The converter builds a plain element tree: an element with child elements
//! becomes a mapping keyed by local name (namespace prefixes stripped), an
//! element with only character data becomes a string. Repeated sibling
//! elements of the same name are promoted to a sequence — which is exactly
//! how the one-result-vs-many-results ambiguity enters the raw fragments
//! that [`crate::normalize::normalize`] resolves.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Escapes text for embedding in a hand-built request document.
///
/// The namespaced search/geocode requests are assembled as raw payloads, so
/// escaping is not done by any serializer; all user text must pass through
/// here before insertion.
#[must_use]
pub fn escape_text(raw: &str) -> String {
    quick_xml::escape::escape(raw).into_owned()
}

/// An element being assembled while its subtree is still open.
struct OpenElement {
    name: String,
    children: Vec<(String, Value)>,
    text: String,
}

impl OpenElement {
    fn new(name: String) -> Self {
        OpenElement {
            name,
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Collapses the finished element into a value.
    ///
    /// Mixed content does not occur in these SOAP payloads; when child
    /// elements are present any surrounding character data is whitespace and
    /// is dropped.
    fn into_named_value(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            Value::String(self.text)
        } else {
            fold_children(self.children)
        };
        (self.name, value)
    }
}

/// Folds ordered `(name, value)` child pairs into a mapping, promoting
/// repeated names to a sequence in document order.
fn fold_children(children: Vec<(String, Value)>) -> Value {
    let mut map = Map::new();
    for (name, value) in children {
        match map.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(name, value);
            }
        }
    }
    Value::Object(map)
}

/// Parses an XML document into a nested JSON value.
///
/// The returned value is a mapping from the root element's local name to its
/// converted subtree. Attributes are ignored; the lookup responses carry all
/// data in element content.
///
/// # Errors
///
/// Returns the underlying `quick_xml::Error` when the document is not
/// well-formed XML.
pub fn to_value(xml: &str) -> Result<Value, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = vec![OpenElement::new(String::new())];
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push(OpenElement::new(name));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push((name, Value::String(String::new())));
                }
            }
            Event::Text(e) => {
                let text = e.unescape().unwrap_or_default();
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    let finished = stack.pop().expect("stack holds the open element");
                    let named = finished.into_named_value();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(named);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let root = stack.pop().expect("document root frame always present");
    Ok(fold_children(root.children))
}

/// Navigates a nested value by successive mapping keys.
///
/// Returns `None` as soon as any step is missing, so adapters can probe deep
/// response paths without caring which intermediate piece was absent.
#[must_use]
pub fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}
