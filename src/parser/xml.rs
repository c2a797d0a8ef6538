//! Attribute helpers shared by the catalog parsers.
//!
//! Catalog documents carry all their data in attributes. Text attributes are
//! optional and copied as written; numeric attributes are optional too, but a
//! value that is present and not a number is an error.

use roxmltree::{Document, Node};
use std::collections::BTreeMap;

use crate::error::{CatalogError, Result};

/// Parses a document, naming it in the error.
pub fn parse_document<'input>(document: &str, text: &'input str) -> Result<Document<'input>> {
    Document::parse(text).map_err(|source| CatalogError::Xml {
        document: document.to_string(),
        source,
    })
}

/// Optional text attribute.
pub fn text_attr(node: Node, attr: &str) -> Option<String> {
    node.attribute(attr).map(str::to_string)
}

/// Required text attribute.
pub fn required_attr<'a>(node: Node<'a, '_>, attr: &'static str, element: &'static str) -> Result<&'a str> {
    node.attribute(attr)
        .ok_or(CatalogError::MissingAttribute { element, attr })
}

/// Optional numeric attribute. Missing or blank values yield `None`.
pub fn number_attr(node: Node, attr: &'static str, element: &'static str) -> Result<Option<f64>> {
    match node.attribute(attr).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| CatalogError::InvalidNumber {
                element,
                attr,
                value: value.to_string(),
            }),
    }
}

/// All descendant elements (including `node` itself) with a tag name.
pub fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .filter(move |n| n.is_element() && n.has_tag_name(name))
}

/// Direct element children with a tag name.
pub fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.has_tag_name(name))
}

/// First descendant element with a tag name.
pub fn first_element<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'a str) -> Option<Node<'a, 'input>> {
    elements(node, name).next()
}

/// Maps the tag name of every descendant element to its text content.
///
/// Later elements with the same name overwrite earlier ones.
pub fn text_map(node: Node) -> BTreeMap<String, String> {
    node.descendants()
        .filter(|n| n.is_element() && *n != node)
        .map(|n| (n.tag_name().name().to_string(), element_text(n)))
        .collect()
}

/// Concatenated text of an element and its descendants.
pub fn element_text(node: Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}
