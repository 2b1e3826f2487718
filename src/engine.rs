use std::time::Instant;

use crate::container::{DocumentContainer, PartName};
use crate::docx::extract_document;
use crate::error::Result;
use crate::estimate::{byte_size_estimate, measure, weighted_estimate};
use crate::metadata::trusted_page_count;
use crate::model::{CountMethod, Page, PageCountResult, ParagraphUnit};
use crate::options::EngineOptions;
use crate::segment::segment_pages;

fn load_paragraphs(bytes: &[u8], options: &EngineOptions) -> Result<Vec<ParagraphUnit>> {
    let container = DocumentContainer::from_bytes(bytes)?;
    let main_xml = container.require_part(PartName::MainDocument)?;
    Ok(extract_document(main_xml, options))
}

pub fn split_into_pages(bytes: &[u8], options: &EngineOptions) -> Vec<String> {
    let t0 = Instant::now();

    let pages = match load_paragraphs(bytes, options) {
        Ok(units) => segment_pages(&units),
        Err(e) => {
            log::warn!("Cannot split document ({e}), returning a single placeholder page");
            vec![Page::placeholder()]
        }
    };

    log::info!(
        "Split into {} pages in {:.1}ms",
        pages.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    pages.iter().map(Page::to_html).collect()
}

/// Trusted metadata, then explicit breaks, then the weighted heuristic, then
/// raw byte size. Always returns a count of at least 1.
pub fn estimate_page_count(bytes: &[u8], options: &EngineOptions) -> PageCountResult {
    let t0 = Instant::now();
    let result = run_fallback_chain(bytes, options);
    log::info!(
        "Page count {} via {} in {:.1}ms",
        result.page_count,
        result.method_used,
        t0.elapsed().as_secs_f64() * 1000.0
    );
    result
}

fn run_fallback_chain(bytes: &[u8], options: &EngineOptions) -> PageCountResult {
    let byte_fallback = || PageCountResult {
        page_count: byte_size_estimate(bytes.len(), options),
        method_used: CountMethod::ByteSizeFallback,
        signals: None,
    };

    let container = match DocumentContainer::from_bytes(bytes) {
        Ok(container) => container,
        Err(e) => {
            log::warn!("{e}; falling back to byte size");
            return byte_fallback();
        }
    };

    if let Some(pages) = trusted_page_count(container.get_part(PartName::AppProperties)) {
        return PageCountResult {
            page_count: pages,
            method_used: CountMethod::TrustedMetadata,
            signals: None,
        };
    }

    let Some(main_xml) = container.get_part(PartName::MainDocument) else {
        log::warn!("No {} in container; falling back to byte size", PartName::MainDocument.path());
        return byte_fallback();
    };

    let units = extract_document(main_xml, options);
    let signals = measure(&units, bytes.len(), options);
    log::debug!("Signals: {signals:?}");

    if signals.explicit_breaks > 0 {
        return PageCountResult {
            page_count: signals.explicit_breaks.saturating_add(1),
            method_used: CountMethod::ExplicitBreaks,
            signals: Some(signals),
        };
    }

    PageCountResult {
        page_count: weighted_estimate(&signals, options),
        method_used: CountMethod::HeuristicWeighted,
        signals: Some(signals),
    }
}
