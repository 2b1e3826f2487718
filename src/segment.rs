use crate::model::{PAGE_BREAK_SENTINEL, PLACEHOLDER_BLOCK, Page, ParagraphUnit};

/// Assemble pages from paragraph units, closing a page at every sentinel.
///
/// A sentinel with nothing on either side still closes a page, so adjacent
/// breaks produce adjacent placeholder pages. An unreadable unit keeps its
/// place as a placeholder block. The result is never empty.
pub fn segment_pages(units: &[ParagraphUnit]) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut current = Page::default();

    for unit in units {
        if unit.unreadable {
            current.blocks.push(PLACEHOLDER_BLOCK.to_string());
            continue;
        }
        let segments: Vec<&str> = unit.text.split(PAGE_BREAK_SENTINEL).collect();
        let last = segments.len() - 1;
        for (i, segment) in segments.iter().enumerate() {
            let trimmed = segment.trim();
            if !trimmed.is_empty() {
                current.blocks.push(format!("<p>{}</p>", escape_html(trimmed)));
            }
            if i < last {
                let page = std::mem::take(&mut current);
                pages.push(if page.is_empty() { Page::placeholder() } else { page });
            }
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }

    for page in &mut pages {
        let html = page.blocks.concat();
        let trimmed = html.trim();
        if trimmed.is_empty() || trimmed == "<p></p>" {
            *page = Page::placeholder();
        }
    }
    if pages.is_empty() {
        pages.push(Page::placeholder());
    }

    log::debug!("Segmented {} paragraph units into {} pages", units.len(), pages.len());
    pages
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
