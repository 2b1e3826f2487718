//! Rewrites every explicit page-break signal in `word/document.xml` into a
//! synthetic `w:t` carrying [`PAGE_BREAK_SENTINEL`].
//!
//! The XML is parsed once with roxmltree to locate break elements by
//! namespace and local name; the output is the original text with only those
//! element ranges spliced, so paragraph and run boundaries are untouched.

use std::ops::Range;

use super::{is_wml, is_wml_ns, toggle_on, wml_attribute};
use crate::error::Result;
use crate::model::PAGE_BREAK_SENTINEL;

/// Main document XML after sentinel substitution.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedXml {
    xml: String,
    breaks: BreakTally,
}

impl NormalizedXml {
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    pub fn into_string(self) -> String {
        self.xml
    }

    pub fn breaks(&self) -> BreakTally {
        self.breaks
    }
}

/// Number of substituted constructs, by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BreakTally {
    pub manual: usize,
    pub last_rendered: usize,
    pub break_before: usize,
    pub section: usize,
}

impl BreakTally {
    pub fn total(&self) -> usize {
        self.manual + self.last_rendered + self.break_before + self.section
    }
}

enum BreakKind<'a> {
    Manual,
    LastRendered,
    BreakBefore,
    /// `w:sectPr` inside a paragraph's `w:pPr`: the section ends after that paragraph.
    ParagraphSection(roxmltree::Node<'a, 'a>),
    Section,
}

struct Edit {
    range: Range<usize>,
    text: String,
}

pub fn normalize(xml: &str) -> Result<NormalizedXml> {
    let doc = roxmltree::Document::parse(xml)?;

    let mut edits: Vec<Edit> = Vec::new();
    let mut tally = BreakTally::default();
    let mut replaced_until = 0;

    for node in doc.descendants().filter(|n| n.is_element()) {
        let range = node.range();
        if range.start < replaced_until {
            continue;
        }
        let Some(kind) = break_kind(node) else {
            continue;
        };
        let prefix = prefix_for(node);
        match kind {
            BreakKind::ParagraphSection(para) => {
                tally.section += 1;
                match closing_tag_start(xml, para.range()) {
                    Some(at) => {
                        edits.push(Edit {
                            range: range.clone(),
                            text: String::new(),
                        });
                        edits.push(Edit {
                            range: at..at,
                            text: sentinel_run(&prefix),
                        });
                    }
                    None => edits.push(Edit {
                        range: range.clone(),
                        text: sentinel_text(&prefix),
                    }),
                }
            }
            other => {
                match other {
                    BreakKind::Manual => tally.manual += 1,
                    BreakKind::LastRendered => tally.last_rendered += 1,
                    BreakKind::BreakBefore => tally.break_before += 1,
                    _ => tally.section += 1,
                }
                edits.push(Edit {
                    range: range.clone(),
                    text: sentinel_text(&prefix),
                });
            }
        }
        replaced_until = range.end;
    }

    edits.sort_by_key(|e| e.range.start);

    let mut out = String::with_capacity(xml.len() + edits.len() * 64);
    let mut cursor = 0;
    for edit in &edits {
        out.push_str(&xml[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&xml[cursor..]);

    log::debug!(
        "Normalized breaks: manual={}, last-rendered={}, break-before={}, section={}",
        tally.manual,
        tally.last_rendered,
        tally.break_before,
        tally.section
    );

    Ok(NormalizedXml {
        xml: out,
        breaks: tally,
    })
}

fn break_kind<'a>(node: roxmltree::Node<'a, 'a>) -> Option<BreakKind<'a>> {
    if !is_wml_ns(node.tag_name().namespace()) || in_revision_record(node) {
        return None;
    }
    let parent = node.parent_element();
    match node.tag_name().name() {
        "br" if wml_attribute(node, "type") == Some("page") => Some(BreakKind::Manual),
        "lastRenderedPageBreak" => Some(BreakKind::LastRendered),
        "pageBreakBefore" if toggle_on(node) && parent.is_some_and(|p| is_wml(p, "pPr")) => {
            Some(BreakKind::BreakBefore)
        }
        "sectPr" => match parent
            .filter(|p| is_wml(*p, "pPr"))
            .and_then(|ppr| ppr.parent_element())
            .filter(|p| is_wml(*p, "p"))
        {
            Some(para) => Some(BreakKind::ParagraphSection(para)),
            None => Some(BreakKind::Section),
        },
        _ => None,
    }
}

/// Tracked deletions, moved-away content and recorded formatting describe the
/// old state of the document, not a live break.
fn in_revision_record(node: roxmltree::Node) -> bool {
    node.ancestors().skip(1).any(|a| {
        is_wml_ns(a.tag_name().namespace())
            && matches!(
                a.tag_name().name(),
                "del" | "moveFrom" | "pPrChange" | "rPrChange" | "sectPrChange"
            )
    })
}

/// `"w:"` for a prefixed WordprocessingML namespace, `""` when it is the default namespace.
fn prefix_for(node: roxmltree::Node) -> String {
    node.tag_name()
        .namespace()
        .and_then(|ns| node.lookup_prefix(ns))
        .filter(|p| !p.is_empty())
        .map(|p| format!("{p}:"))
        .unwrap_or_default()
}

fn closing_tag_start(xml: &str, element: Range<usize>) -> Option<usize> {
    let source = xml.get(element.clone())?;
    if source.ends_with("/>") {
        return None;
    }
    source.rfind("</").map(|i| element.start + i)
}

fn sentinel_text(prefix: &str) -> String {
    format!("<{prefix}t xml:space=\"preserve\">{PAGE_BREAK_SENTINEL}</{prefix}t>")
}

fn sentinel_run(prefix: &str) -> String {
    format!("<{prefix}r>{}</{prefix}r>", sentinel_text(prefix))
}
