//! Page-count estimates from structural signals, used when a document has
//! neither trusted metadata nor explicit breaks.

use crate::model::{ParagraphUnit, Signals};
use crate::options::EngineOptions;

/// `ceil(value / per_page)`, never below 1.
fn per_page(value: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = value.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn byte_size_estimate(byte_length: usize, options: &EngineOptions) -> u32 {
    per_page(byte_length as u64, options.bytes_per_page)
}

/// Measurements over the extracted paragraphs and the raw input size.
pub fn measure(units: &[ParagraphUnit], byte_length: usize, options: &EngineOptions) -> Signals {
    let mut non_empty_paragraphs: u32 = 0;
    let mut total_chars: u64 = 0;
    let mut explicit_breaks: u32 = 0;

    for unit in units {
        explicit_breaks += unit.sentinel_count() as u32;
        let visible = unit.visible_text();
        if !visible.is_empty() {
            non_empty_paragraphs += 1;
            total_chars += visible.chars().count() as u64;
        }
    }

    Signals {
        paragraph_estimate: per_page(u64::from(non_empty_paragraphs), options.paragraphs_per_page),
        char_estimate: per_page(total_chars, options.chars_per_page),
        byte_size_estimate: byte_size_estimate(byte_length, options),
        explicit_breaks,
        non_empty_paragraphs,
        total_chars,
        byte_length: byte_length as u64,
    }
}

/// `round(wp * paragraphs + wc * chars + wb * bytes)`, floored at 1.
pub fn weighted_estimate(signals: &Signals, options: &EngineOptions) -> u32 {
    let w = options.weights;
    let combined = w.paragraph * f64::from(signals.paragraph_estimate)
        + w.chars * f64::from(signals.char_estimate)
        + w.bytes * f64::from(signals.byte_size_estimate);
    let rounded = combined.round();
    if rounded.is_finite() && rounded >= 1.0 {
        rounded.min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}
