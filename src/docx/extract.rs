//! Paragraph-by-paragraph text extraction from normalized `word/document.xml`.

use std::ops::Range;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use super::normalize::{NormalizedXml, normalize};
use super::{MC_NS, collect_block_nodes, is_wml, is_wml_ns, wml};
use crate::error::Result;
use crate::model::{EMPTY_PARAGRAPH_TEXT, PAGE_BREAK_SENTINEL, ParagraphUnit};
use crate::options::EngineOptions;

/// Normalize and extract, never failing: XML that does not parse as a whole
/// is retried one paragraph span at a time.
pub fn extract_document(main_xml: &str, options: &EngineOptions) -> Vec<ParagraphUnit> {
    match normalize(main_xml).and_then(|n| extract_paragraphs(&n, options)) {
        Ok(units) => units,
        Err(e) => {
            log::warn!("word/document.xml is not well-formed ({e}), recovering per paragraph");
            recover_paragraphs(main_xml, options)
        }
    }
}

pub fn extract_paragraphs(
    normalized: &NormalizedXml,
    options: &EngineOptions,
) -> Result<Vec<ParagraphUnit>> {
    let doc = roxmltree::Document::parse(normalized.as_str())?;
    let root = doc.root_element();
    let body = wml(root, "body").unwrap_or(root);
    let units = extract_blocks(body, options);
    log::debug!("Extracted {} paragraph units", units.len());
    Ok(units)
}

fn extract_blocks(parent: roxmltree::Node, options: &EngineOptions) -> Vec<ParagraphUnit> {
    let mut units = Vec::new();
    for node in collect_block_nodes(parent) {
        if is_wml(node, "p") {
            units.push(paragraph_unit(node, options));
        } else if is_wml(node, "tbl") {
            units.push(table_unit(node, options));
        }
    }
    units
}

#[derive(Default)]
struct Collected {
    text: String,
    /// Byte offset in `text` of the first drawing, picture or object.
    non_text_at: Option<usize>,
}

fn paragraph_unit(para: roxmltree::Node, options: &EngineOptions) -> ParagraphUnit {
    let mut collected = Collected::default();
    collect_text(para, &mut collected);

    let mut tables = Vec::new();
    find_tables(para, &mut tables);
    let summaries: Vec<String> = tables
        .into_iter()
        .filter_map(|tbl| table_summary(tbl, options))
        .collect();
    let has_table = !summaries.is_empty();
    for summary in &summaries {
        collected.text.push_str(summary);
    }

    finish_unit(collected, has_table, options)
}

fn table_unit(tbl: roxmltree::Node, options: &EngineOptions) -> ParagraphUnit {
    let mut collected = Collected::default();
    // Breaks inside cells still have to reach the segmenter.
    let sentinels = tbl
        .descendants()
        .filter(|n| is_wml(*n, "t") && n.text() == Some(PAGE_BREAK_SENTINEL))
        .count();
    let summary = table_summary(tbl, options);
    let has_table = summary.is_some();
    if let Some(summary) = summary {
        collected.text.push_str(&summary);
    } else {
        collected.text.push_str(&PAGE_BREAK_SENTINEL.repeat(sentinels));
        if tbl.descendants().any(is_non_text_element) {
            collected.non_text_at = Some(collected.text.len());
        }
    }
    finish_unit(collected, has_table, options)
}

fn finish_unit(collected: Collected, has_table: bool, options: &EngineOptions) -> ParagraphUnit {
    let Collected {
        mut text,
        non_text_at,
    } = collected;

    let has_visible_text = text
        .split(PAGE_BREAK_SENTINEL)
        .any(|segment| !segment.trim().is_empty());

    let mut has_non_text_content = false;
    if !has_visible_text {
        if let Some(at) = non_text_at {
            text.insert_str(at, &format!(" {} ", options.non_text_placeholder));
            has_non_text_content = true;
        }
    }

    let mut text = collapse_whitespace(&text);
    if !has_visible_text && !has_non_text_content {
        text.push_str(EMPTY_PARAGRAPH_TEXT);
    }

    ParagraphUnit {
        text,
        has_table,
        has_non_text_content,
        unreadable: false,
    }
}

/// Run text in document order. Nested paragraphs (text boxes, cells) are
/// separated by a space; tables are left to [`table_summary`].
fn collect_text(node: roxmltree::Node, out: &mut Collected) {
    for child in node.children().filter(|n| n.is_element()) {
        let tag = child.tag_name();
        if tag.namespace() == Some(MC_NS) && tag.name() == "Fallback" {
            continue;
        }
        if is_non_text_element(child) && out.non_text_at.is_none() {
            out.non_text_at = Some(out.text.len());
        }
        if !is_wml_ns(tag.namespace()) {
            collect_text(child, out);
            continue;
        }
        let in_run = child.parent_element().is_some_and(|p| is_wml(p, "r"));
        match tag.name() {
            "t" => out.text.push_str(child.text().unwrap_or("")),
            "tab" | "br" | "cr" if in_run => out.text.push(' '),
            "tbl" | "delText" | "instrText" | "pPrChange" | "rPrChange" => {}
            "p" => {
                out.text.push(' ');
                collect_text(child, out);
                out.text.push(' ');
            }
            _ => collect_text(child, out),
        }
    }
}

fn is_non_text_element(node: roxmltree::Node) -> bool {
    is_wml(node, "drawing") || is_wml(node, "pict") || is_wml(node, "object")
}

/// Outermost tables below `node`; a table's own nested tables belong to its cells.
fn find_tables<'a>(node: roxmltree::Node<'a, 'a>, out: &mut Vec<roxmltree::Node<'a, 'a>>) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() == Some(MC_NS) && child.tag_name().name() == "Fallback" {
            continue;
        }
        if is_wml(child, "tbl") {
            out.push(child);
        } else {
            find_tables(child, out);
        }
    }
}

/// `" [Bảng: cell1 | cell2 ] "`, or `None` when no cell holds any text.
fn table_summary(tbl: roxmltree::Node, options: &EngineOptions) -> Option<String> {
    let mut cells = Vec::new();
    for row in collect_block_nodes(tbl).into_iter().filter(|n| is_wml(*n, "tr")) {
        for cell in collect_block_nodes(row).into_iter().filter(|n| is_wml(*n, "tc")) {
            let text = collapse_whitespace(&cell_text(cell));
            if !text.is_empty() {
                cells.push(text);
            }
        }
    }
    if cells.is_empty() {
        return None;
    }
    Some(format!(" [{}: {} ] ", options.table_label, cells.join(" | ")))
}

/// All text in a cell, nested tables included, in document order.
fn cell_text(cell: roxmltree::Node) -> String {
    let mut out = String::new();
    for node in cell.descendants().filter(|n| n.is_element()) {
        if node
            .ancestors()
            .any(|a| a.tag_name().namespace() == Some(MC_NS) && a.tag_name().name() == "Fallback")
        {
            continue;
        }
        if is_wml(node, "t") {
            out.push_str(node.text().unwrap_or(""));
        } else if matches!(node.tag_name().name(), "tab" | "br" | "cr")
            && is_wml_ns(node.tag_name().namespace())
            && node.parent_element().is_some_and(|r| is_wml(r, "r"))
        {
            out.push(' ');
        } else if is_wml(node, "p") && !out.is_empty() {
            out.push(' ');
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Per-paragraph recovery for a main document that does not parse as a whole.
/// Each `w:p` span is wrapped in the document's root start tag (for its
/// namespace declarations) and run through the normal pipeline on its own;
/// spans that still fail become a placeholder unit.
fn recover_paragraphs(xml: &str, options: &EngineOptions) -> Vec<ParagraphUnit> {
    let Some(scan) = scan_paragraphs(xml) else {
        log::warn!("No root element in word/document.xml");
        return Vec::new();
    };

    let mut units = Vec::with_capacity(scan.spans.len());
    let mut failed = 0;
    for span in scan.spans {
        let wrapped = format!("{}{span}</{}>", scan.root_tag, scan.root_name);
        match normalize(&wrapped).and_then(|n| extract_paragraphs(&n, options)) {
            Ok(found) if !found.is_empty() => units.extend(found),
            Ok(_) | Err(_) => {
                failed += 1;
                units.push(ParagraphUnit::unreadable());
            }
        }
    }
    log::warn!(
        "Recovered {} paragraph units ({} unreadable, replaced by placeholders)",
        units.len(),
        failed
    );
    units
}

/// Top-level `w:p` spans of a document that may not be well-formed, plus the
/// root start tag they are re-parsed under.
struct ParagraphScan<'x> {
    root_tag: &'x str,
    root_name: String,
    spans: Vec<&'x str>,
}

enum Step {
    Open { paragraph: bool, name: Vec<u8> },
    Empty { paragraph: bool },
    Close { paragraph: bool },
    Eof,
    Other,
}

/// Paragraphs are matched by local name and resolved namespace. Paragraphs
/// nested inside a paragraph (text boxes) stay inside their parent's span; an
/// unterminated trailing paragraph is returned as-is so it can fail on its own.
fn scan_paragraphs(xml: &str) -> Option<ParagraphScan<'_>> {
    let mut reader = NsReader::from_str(xml);
    reader.check_end_names(false);

    let mut root: Option<(Range<usize>, String)> = None;
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    loop {
        let before = reader.buffer_position() as usize;
        let step = match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => Step::Open {
                paragraph: is_wml_paragraph(&ns, e.local_name().as_ref()),
                name: e.name().as_ref().to_vec(),
            },
            Ok((ns, Event::Empty(e))) => Step::Empty {
                paragraph: is_wml_paragraph(&ns, e.local_name().as_ref()),
            },
            Ok((ns, Event::End(e))) => Step::Close {
                paragraph: is_wml_paragraph(&ns, e.local_name().as_ref()),
            },
            Ok((_, Event::Eof)) => Step::Eof,
            Ok(_) => Step::Other,
            Err(e) => {
                log::warn!("Paragraph scan stopped at byte {before}: {e}");
                Step::Eof
            }
        };
        let after = reader.buffer_position() as usize;

        match step {
            Step::Open { name, .. } if root.is_none() => {
                root = Some((before..after, String::from_utf8_lossy(&name).into_owned()));
            }
            Step::Open { paragraph: true, .. } => {
                if depth == 0 {
                    start = before;
                }
                depth += 1;
            }
            Step::Empty { paragraph: true } if depth == 0 && root.is_some() => {
                spans.push(&xml[before..after]);
            }
            Step::Close { paragraph: true } if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&xml[start..after]);
                }
            }
            Step::Eof => break,
            _ => {}
        }
    }
    if depth > 0 {
        spans.push(&xml[start..]);
    }

    let (range, root_name) = root?;
    Some(ParagraphScan {
        root_tag: &xml[range],
        root_name,
        spans,
    })
}

fn is_wml_paragraph(ns: &ResolveResult, local_name: &[u8]) -> bool {
    local_name == b"p"
        && matches!(ns, ResolveResult::Bound(Namespace(uri))
            if is_wml_ns(std::str::from_utf8(uri).ok()))
}
