//! Namespace-agnostic element lookup over roxmltree documents.
//!
//! CPL, PKL and ASSETMAP schemas changed namespace across SMPTE revisions, so
//! elements are matched by local name only.

use std::str::FromStr;

use roxmltree::Node;
use uuid::Uuid;

use crate::error::{ImfError, Result};

pub(crate) fn is_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| is_element(n, name))
}

pub(crate) fn children<'a, 'i: 'a>(
    node: Node<'a, 'i>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    node.children().filter(move |n| is_element(n, name))
}

pub(crate) fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub(crate) fn required_child<'a, 'i>(
    node: Node<'a, 'i>,
    element: &'static str,
    context: &str,
) -> Result<Node<'a, 'i>> {
    child(node, element).ok_or_else(|| ImfError::MissingElement {
        element,
        context: context.to_string(),
    })
}

pub(crate) fn required_text<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    context: &str,
) -> Result<&'a str> {
    child_text(node, element).ok_or_else(|| ImfError::MissingElement {
        element,
        context: context.to_string(),
    })
}

pub(crate) fn parse_uuid(value: &str, element: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| ImfError::InvalidValue {
        element: element.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn parse_number<T: FromStr>(value: &str, element: &str) -> Result<T> {
    value.parse().map_err(|_| ImfError::InvalidValue {
        element: element.to_string(),
        value: value.to_string(),
        reason: "not a valid number".into(),
    })
}

pub(crate) fn parse_bool(value: &str, element: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ImfError::InvalidValue {
            element: element.to_string(),
            value: value.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}

pub(crate) fn expect_root(node: Node<'_, '_>, expected: &'static str) -> Result<()> {
    if is_element(&node, expected) {
        Ok(())
    } else {
        Err(ImfError::UnexpectedDocument {
            expected,
            found: node.tag_name().name().to_string(),
        })
    }
}
