//! Parsed HTML document.
//!
//! A thin owner around an html5ever tree. Rewrites consume the document and
//! hand back the rewritten value, so there is never a second live handle to
//! the pre-rewrite tree.

use crate::error::{Error, Result};
use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// A parsed HTML document.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse markup into a document tree.
    ///
    /// HTML parsing never fails; malformed input is repaired the way a
    /// browser would.
    pub fn parse(markup: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(markup);
        Self { dom }
    }

    /// Serialize the tree back to markup.
    pub fn to_html(&self) -> Result<String> {
        let handle: SerializableHandle = self.dom.document.clone().into();
        let mut bytes = Vec::new();
        serialize(&mut bytes, &handle, SerializeOpts::default())
            .map_err(|e| Error::Serialize(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Values of `attr` on every `tag` element, in document order.
    ///
    /// Elements without the attribute yield `None`.
    pub fn attribute_values(&self, tag: &str, attr: &str) -> Vec<Option<String>> {
        self.elements(tag)
            .iter()
            .map(|element| get_attribute(element, attr))
            .collect()
    }

    /// Every `tag` element, in document order.
    pub(crate) fn find_elements(&self, tag: &str) -> Vec<Element> {
        self.elements(tag)
            .into_iter()
            .map(|handle| Element { handle })
            .collect()
    }

    /// Rewrite `attr` on every `tag` element.
    ///
    /// `rewrite` receives the current value and returns the replacement, or
    /// `None` to leave the attribute as it is. Returns the rewritten document
    /// and the number of attributes that changed.
    pub fn map_attribute<F>(self, tag: &str, attr: &str, mut rewrite: F) -> Result<(Self, usize)>
    where
        F: FnMut(&str) -> Result<Option<String>>,
    {
        let mut changed = 0;
        for element in self.elements(tag) {
            if let NodeData::Element { ref attrs, .. } = element.data {
                let mut attrs = attrs.borrow_mut();
                for attribute in attrs.iter_mut().filter(|a| &*a.name.local == attr) {
                    let current = attribute.value.to_string();
                    if let Some(value) = rewrite(&current)? {
                        attribute.value = value.into();
                        changed += 1;
                    }
                }
            }
        }
        Ok((self, changed))
    }

    /// Detach every `tag` element for which `remove` returns true.
    ///
    /// Children of a removed element go with it. Returns the pruned document
    /// and the number of elements removed.
    pub(crate) fn remove_elements<F>(self, tag: &str, mut remove: F) -> (Self, usize)
    where
        F: FnMut(&Element) -> bool,
    {
        let removed = remove_matching(&self.dom.document, tag, &mut remove);
        (self, removed)
    }

    fn elements(&self, tag: &str) -> Vec<Handle> {
        let mut found = Vec::new();
        collect_elements(&self.dom.document, tag, &mut found);
        found
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// Read-only view of one element.
pub(crate) struct Element {
    handle: Handle,
}

impl Element {
    pub(crate) fn attr(&self, name: &str) -> Option<String> {
        get_attribute(&self.handle, name)
    }
}

fn get_attribute(handle: &Handle, name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn collect_elements(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == tag {
            found.push(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        collect_elements(child, tag, found);
    }
}

fn remove_matching<F>(node: &Handle, tag: &str, remove: &mut F) -> usize
where
    F: FnMut(&Element) -> bool,
{
    let mut removed = 0;
    node.children.borrow_mut().retain(|child| {
        let is_tag = matches!(child.data, NodeData::Element { ref name, .. } if &*name.local == tag);
        if is_tag && remove(&Element { handle: child.clone() }) {
            child.parent.set(None);
            removed += 1;
            false
        } else {
            true
        }
    });
    for child in node.children.borrow().iter() {
        removed += remove_matching(child, tag, remove);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html><head><link rel="stylesheet" href="a.css"></head>
<body><img src="one.png"><p><img src="two.png" alt="x"></p><img alt="none"></body></html>"#;

    #[test]
    fn test_attribute_values_in_document_order() {
        let doc = Document::parse(SAMPLE);
        assert_eq!(
            doc.attribute_values("img", "src"),
            vec![Some("one.png".to_string()), Some("two.png".to_string()), None]
        );
        assert_eq!(
            doc.attribute_values("link", "href"),
            vec![Some("a.css".to_string())]
        );
    }

    #[test]
    fn test_map_attribute_counts_changes() {
        let doc = Document::parse(SAMPLE);
        let (doc, changed) = doc
            .map_attribute("img", "src", |value| {
                Ok((value == "two.png").then(|| "three.png".to_string()))
            })
            .unwrap();

        assert_eq!(changed, 1);
        assert_eq!(
            doc.attribute_values("img", "src"),
            vec![Some("one.png".to_string()), Some("three.png".to_string()), None]
        );
    }

    #[test]
    fn test_map_attribute_propagates_errors() {
        let doc = Document::parse(SAMPLE);
        let result = doc.map_attribute("img", "src", |_| Err(Error::InvalidPath("x".into())));
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_to_html_keeps_rewrites() {
        let doc = Document::parse(SAMPLE);
        let (doc, _) = doc
            .map_attribute("img", "src", |_| Ok(Some("file:///x/pic.png".to_string())))
            .unwrap();
        let html = doc.to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<img src="file:///x/pic.png">"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="a.css">"#));
    }

    #[test]
    fn test_remove_elements_drops_matches_only() {
        let doc = Document::parse(
            r#"<head><link rel="stylesheet" href="a.css"><link rel="icon" href="i.ico"></head>
            <body><div><link rel="stylesheet" href="b.css"></div><img src="one.png"></body>"#,
        );

        let (doc, removed) =
            doc.remove_elements("link", |link| link.attr("rel").as_deref() == Some("stylesheet"));

        assert_eq!(removed, 2);
        assert_eq!(doc.attribute_values("link", "href"), vec![Some("i.ico".to_string())]);
        assert_eq!(doc.attribute_values("img", "src"), vec![Some("one.png".to_string())]);
        let html = doc.to_html().unwrap();
        assert!(!html.contains("a.css"));
        assert!(!html.contains("b.css"));
    }

    #[test]
    fn test_parse_repairs_fragments() {
        let doc = Document::parse("<img src=lonely.png>");
        let html = doc.to_html().unwrap();
        assert!(html.contains("<html>"));
        assert!(html.contains(r#"<img src="lonely.png">"#));
    }
}
