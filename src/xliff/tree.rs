/*!
 * Owned XML element tree.
 *
 * Each element keeps two text slots:
 * - `text`: the text directly inside the element, before its first child
 * - `tail`: the text after the element's closing tag, before its next sibling
 *
 * Mixed content is therefore fully described by elements alone, which keeps
 * cloning a plain structural copy and lets the same walker run over a source
 * subtree and its clone with identical results.
 */

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use quick_xml::Writer;

use crate::errors::XliffError;

/// A single attribute, stored with its qualified name as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An XML element with its text, tail and element children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified name as written in the document (e.g. `trans-unit`, `x:source`)
    pub name: String,

    /// Namespace URI the name resolved to, if any
    pub namespace: Option<String>,

    /// Attributes in document order, namespace declarations included
    pub attributes: Vec<Attribute>,

    /// Text before the first child
    pub text: Option<String>,

    /// Text after the closing tag
    pub tail: Option<String>,

    /// Element children in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an empty element bound to a namespace
    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    /// Name without its prefix
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Prefix of the qualified name, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Whether this element has the given namespace and local name
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name() == local_name
    }

    /// Change the local name, keeping the prefix and namespace
    pub fn rename_local(&mut self, local_name: &str) {
        self.name = match self.prefix() {
            Some(prefix) => format!("{}:{}", prefix, local_name),
            None => local_name.to_string(),
        };
    }

    /// Value of an attribute by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Index of the first direct child matching namespace and local name
    pub fn child_position(&self, namespace: &str, local_name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.is(namespace, local_name))
    }

    /// First direct child matching namespace and local name
    pub fn find_child(&self, namespace: &str, local_name: &str) -> Option<&Element> {
        self.child_position(namespace, local_name)
            .map(|index| &self.children[index])
    }

    /// Element at an index path relative to this element
    pub fn node_at(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Mutable element at an index path relative to this element
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// Index paths of every descendant matching namespace and local name, in document order
    pub fn descendant_paths(&self, namespace: &str, local_name: &str) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        self.collect_paths(namespace, local_name, &mut current, &mut paths);
        paths
    }

    fn collect_paths(
        &self,
        namespace: &str,
        local_name: &str,
        current: &mut Vec<usize>,
        paths: &mut Vec<Vec<usize>>,
    ) {
        for (index, child) in self.children.iter().enumerate() {
            current.push(index);
            if child.is(namespace, local_name) {
                paths.push(current.clone());
            }
            child.collect_paths(namespace, local_name, current, paths);
            current.pop();
        }
    }

    /// Concatenated text content of the subtree, markup ignored
    ///
    /// The element's own tail is not part of its content.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text_content(&mut out);
        out
    }

    fn push_text_content(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.push_text_content(out);
            if let Some(tail) = &child.tail {
                out.push_str(tail);
            }
        }
    }
}

/// Parse UTF-8 XML bytes into the root element
pub fn parse(bytes: &[u8]) -> Result<Element, XliffError> {
    let source = std::str::from_utf8(bytes)?;
    let mut reader = NsReader::from_str(source);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let namespace = resolve_namespace(resolved)?;

        match event {
            Event::Start(start) => {
                let element = element_from_start(&start, namespace)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start, namespace)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XliffError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let raw = cdata.into_inner();
                let text = std::str::from_utf8(&raw)?;
                append_text(&mut stack, text)?;
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions and doctype carry no translatable text
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XliffError::Malformed(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    root.ok_or(XliffError::MissingRoot)
}

fn resolve_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>, XliffError> {
    match resolved {
        ResolveResult::Bound(namespace) => {
            Ok(Some(std::str::from_utf8(namespace.0)?.to_string()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(XliffError::Malformed(format!(
            "unknown namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn element_from_start(
    start: &BytesStart<'_>,
    namespace: Option<String>,
) -> Result<Element, XliffError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        attributes.push(Attribute {
            name: std::str::from_utf8(attr.key.as_ref())?.to_string(),
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(Element {
        name,
        namespace,
        attributes,
        ..Element::default()
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XliffError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XliffError::Malformed(format!(
            "multiple root elements, found <{}>",
            element.name
        ))),
    }
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), XliffError> {
    let Some(current) = stack.last_mut() else {
        // Prolog and epilog whitespace is not kept
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(XliffError::Malformed(
            "text outside of the root element".to_string(),
        ));
    };

    let slot = match current.children.last_mut() {
        Some(last_child) => &mut last_child.tail,
        None => &mut current.text,
    };
    slot.get_or_insert_with(String::new).push_str(text);
    Ok(())
}

/// Serialize a root element to UTF-8 bytes with an XML declaration
pub fn to_bytes(root: &Element) -> Result<Vec<u8>, XliffError> {
    let mut writer = Writer::new(Vec::new());
    write_document(&mut writer, root).map_err(|e| XliffError::Write(e.to_string()))?;
    Ok(writer.into_inner())
}

fn write_document(writer: &mut Writer<Vec<u8>>, root: &Element) -> quick_xml::Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    write_element(writer, root, false)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    with_tail: bool,
) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(text) = text {
            write_text(writer, text)?;
        }
        for child in &element.children {
            write_element(writer, child, true)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }

    if with_tail {
        if let Some(tail) = element.tail.as_deref().filter(|t| !t.is_empty()) {
            write_text(writer, tail)?;
        }
    }
    Ok(())
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> quick_xml::Result<()> {
    // Only markup-significant characters need escaping in character data
    let escaped = quick_xml::escape::partial_escape(text);
    writer.write_event(Event::Text(BytesText::from_escaped(escaped)))
}
