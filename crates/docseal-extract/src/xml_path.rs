//! Absolute simple-path selection over parsed XML
//!
//! Supports paths of the form `/p:Order/p:Item/@sku`: one element step
//! per `/`-segment, an optional trailing `@name` attribute step, and
//! prefixes resolved through the config's namespace map. Unprefixed
//! names match elements and attributes with no namespace. There are no
//! descendant, wildcard, or predicate steps.

use std::collections::BTreeMap;

use docseal_canonical::{XmlDocument, XmlElement, XmlNode};
use docseal_core::{SealError, SealResult};

/// One resolved element step
struct Step {
    namespace: Option<String>,
    local_name: String,
}

/// A parsed selection path
struct SimplePath {
    steps: Vec<Step>,
    attribute: Option<Step>,
}

/// Select the first match of a path, rendered as text
///
/// Elements render as their concatenated trimmed character data,
/// attributes as their trimmed value.
pub fn select_first(
    document: &XmlDocument,
    path: &str,
    namespaces: &BTreeMap<String, String>,
) -> SealResult<Option<String>> {
    Ok(select_all(document, path, namespaces)?.into_iter().next())
}

/// Select every match of a path, rendered as text
pub fn select_all(
    document: &XmlDocument,
    path: &str,
    namespaces: &BTreeMap<String, String>,
) -> SealResult<Vec<String>> {
    let parsed = parse_path(path, namespaces)?;
    let Some((root_step, descent)) = parsed.steps.split_first() else {
        return Ok(Vec::new());
    };
    if !matches_step(&document.root, root_step) {
        return Ok(Vec::new());
    }

    let mut matches = vec![&document.root];
    for step in descent {
        let mut next = Vec::new();
        for element in matches {
            next.extend(
                element
                    .children
                    .iter()
                    .filter_map(|node| match node {
                        XmlNode::Element(child) if matches_step(child, step) => Some(child),
                        _ => None,
                    }),
            );
        }
        matches = next;
    }

    let rendered = matches
        .into_iter()
        .filter_map(|element| match &parsed.attribute {
            Some(step) => element
                .attributes
                .iter()
                .find(|attribute| {
                    attribute.namespace.as_deref() == step.namespace.as_deref()
                        && attribute.local_name == step.local_name
                })
                .map(|attribute| attribute.value.trim().to_string()),
            None => Some(text_content(element)),
        })
        .collect();
    Ok(rendered)
}

fn matches_step(element: &XmlElement, step: &Step) -> bool {
    element.namespace.as_deref() == step.namespace.as_deref()
        && element.local_name == step.local_name
}

/// Concatenated trimmed character data of an element's direct children
fn text_content(element: &XmlElement) -> String {
    let mut content = String::new();
    for node in &element.children {
        if let XmlNode::Text(text) = node {
            content.push_str(text.trim());
        }
    }
    content
}

fn parse_path(path: &str, namespaces: &BTreeMap<String, String>) -> SealResult<SimplePath> {
    let body = path.strip_prefix('/').ok_or_else(|| {
        SealError::Extraction(format!("path '{path}' must be absolute"))
    })?;

    let mut steps = Vec::new();
    let mut attribute = None;
    let mut segments = body.split('/').peekable();
    while let Some(segment) = segments.next() {
        if segment.is_empty() {
            return Err(SealError::Extraction(format!("empty step in path '{path}'")));
        }
        if let Some(name) = segment.strip_prefix('@') {
            if segments.peek().is_some() {
                return Err(SealError::Extraction(format!(
                    "attribute step must be last in path '{path}'"
                )));
            }
            attribute = Some(resolve_step(name, namespaces)?);
        } else {
            steps.push(resolve_step(segment, namespaces)?);
        }
    }
    Ok(SimplePath { steps, attribute })
}

fn resolve_step(name: &str, namespaces: &BTreeMap<String, String>) -> SealResult<Step> {
    match name.split_once(':') {
        Some((prefix, local_name)) => {
            let uri = namespaces.get(prefix).ok_or_else(|| {
                SealError::Extraction(format!("unknown namespace prefix '{prefix}'"))
            })?;
            Ok(Step {
                namespace: Some(uri.clone()),
                local_name: local_name.to_string(),
            })
        }
        None => Ok(Step {
            namespace: None,
            local_name: name.to_string(),
        }),
    }
}
