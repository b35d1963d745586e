use ego_tree::{NodeId, Tree};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::NormalizeError;

/// One node of the generic markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

pub type Node<'a> = ego_tree::NodeRef<'a, Markup>;

/// A parsed document: elements and text in document order, no schema knowledge.
#[derive(Debug)]
pub struct MarkupTree {
    tree: Tree<Markup>,
}

impl MarkupTree {
    pub fn parse(bytes: &[u8]) -> Result<Self, NormalizeError> {
        let xml = std::str::from_utf8(bytes)?;
        Self::parse_str(xml.strip_prefix('\u{feff}').unwrap_or(xml))
    }

    pub fn parse_str(xml: &str) -> Result<Self, NormalizeError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut tree = Tree::new(Markup::Document);
        let mut stack: Vec<NodeId> = vec![tree.root().id()];

        loop {
            let event = reader.read_event().map_err(|e| NormalizeError::Malformed {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;
            let position = reader.buffer_position() as u64;
            match event {
                Event::Start(ref start) => {
                    let element = read_element(start, position)?;
                    let id = append(&mut tree, &stack, Markup::Element(element), position)?;
                    stack.push(id);
                }
                Event::Empty(ref start) => {
                    let element = read_element(start, position)?;
                    append(&mut tree, &stack, Markup::Element(element), position)?;
                }
                Event::End(_) => {
                    if stack.len() <= 1 {
                        return Err(NormalizeError::Malformed {
                            position,
                            message: "closing tag without an open element".to_string(),
                        });
                    }
                    stack.pop();
                }
                Event::Text(ref text) => {
                    if stack.len() > 1 {
                        let value = text
                            .unescape()
                            .map(|t| t.into_owned())
                            .unwrap_or_else(|_| String::from_utf8_lossy(text).into_owned());
                        append(&mut tree, &stack, Markup::Text(value), position)?;
                    }
                }
                Event::CData(ref cdata) => {
                    if stack.len() > 1 {
                        let value = String::from_utf8_lossy(cdata).into_owned();
                        append(&mut tree, &stack, Markup::Text(value), position)?;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.len() > 1 {
            return Err(NormalizeError::Malformed {
                position: reader.buffer_position() as u64,
                message: "document ended with unclosed elements".to_string(),
            });
        }

        Ok(Self { tree })
    }

    /// The outermost element, whatever its name.
    pub fn root_element(&self) -> Option<Node<'_>> {
        self.tree
            .root()
            .children()
            .find(|child| matches!(child.value(), Markup::Element(_)))
    }
}

fn read_element(start: &BytesStart<'_>, position: u64) -> Result<Element, NormalizeError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| NormalizeError::Malformed {
            position,
            message: e.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        attrs.push((key, value));
    }
    Ok(Element { name, attrs })
}

fn append(
    tree: &mut Tree<Markup>,
    stack: &[NodeId],
    value: Markup,
    position: u64,
) -> Result<NodeId, NormalizeError> {
    let parent = stack.last().and_then(|id| tree.get_mut(*id));
    match parent {
        Some(mut parent) => Ok(parent.append(value).id()),
        None => Err(NormalizeError::Malformed {
            position,
            message: "lost track of the open element".to_string(),
        }),
    }
}

pub fn element<'a>(node: &Node<'a>) -> Option<&'a Element> {
    match node.value() {
        Markup::Element(element) => Some(element),
        _ => None,
    }
}

pub fn name<'a>(node: &Node<'a>) -> Option<&'a str> {
    element(node).map(|e| e.name.as_str())
}

pub fn attr<'a>(node: &Node<'a>, key: &str) -> Option<&'a str> {
    element(node)?
        .attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn child_elements<'a>(node: &Node<'a>) -> impl Iterator<Item = Node<'a>> {
    node.children().filter(|child| element(child).is_some())
}

pub fn children_named<'a>(node: &Node<'a>, tag: &'a str) -> impl Iterator<Item = Node<'a>> {
    child_elements(node).filter(move |child| name(child) == Some(tag))
}

/// Nearest preceding sibling that is an element, skipping text between tags.
pub fn prev_element<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    node.prev_siblings().find(|sibling| element(sibling).is_some())
}

/// All descendant text, concatenated exactly as written.
pub fn raw_text(node: &Node<'_>) -> String {
    node.descendants()
        .filter_map(|n| match n.value() {
            Markup::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Descendant text with whitespace runs collapsed to single spaces.
pub fn inline_text(node: &Node<'_>) -> String {
    normalize_text(&raw_text(node))
}

/// Paragraph-level text: each direct child contributes one paragraph, joined by `separator`.
pub fn block_text(node: &Node<'_>, separator: &str) -> String {
    node.children()
        .map(|child| match child.value() {
            Markup::Text(text) => normalize_text(text),
            _ => inline_text(&child),
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Keeps line breaks but trims each line and drops blank ones.
pub fn line_text(node: &Node<'_>) -> String {
    raw_text(node)
        .lines()
        .map(normalize_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// No text anywhere below, and no nested element carrying attributes
/// (`<patcit dnum="..."/>` holds its data in attributes).
pub fn is_blank(node: &Node<'_>) -> bool {
    node.descendants().skip(1).all(|n| match n.value() {
        Markup::Text(text) => text.trim().is_empty(),
        Markup::Element(element) => element.attrs.is_empty(),
        Markup::Document => true,
    })
}

pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
