pub mod container;
pub mod docx;
mod engine;
mod error;
pub mod estimate;
pub mod metadata;
mod model;
mod options;
pub mod segment;

pub use error::{Error, Result};
pub use model::{
    CountMethod, EMPTY_PARAGRAPH_TEXT, PAGE_BREAK_SENTINEL, PLACEHOLDER_BLOCK, Page,
    PageCountResult, ParagraphUnit, Signals,
};
pub use options::{EngineOptions, EstimatorWeights};

use std::path::Path;

/// Split a DOCX package into per-page HTML fragments, one per explicit page
/// break region. Inputs that are not a DOCX package yield one placeholder page.
pub fn split_into_pages(bytes: &[u8]) -> Vec<String> {
    engine::split_into_pages(bytes, &EngineOptions::default())
}

pub fn split_into_pages_with_options(bytes: &[u8], options: &EngineOptions) -> Vec<String> {
    engine::split_into_pages(bytes, options)
}

/// Best-effort page count of a DOCX package. Never fails; see [`CountMethod`]
/// for which source the count came from.
pub fn estimate_page_count(bytes: &[u8]) -> PageCountResult {
    engine::estimate_page_count(bytes, &EngineOptions::default())
}

pub fn estimate_page_count_with_options(bytes: &[u8], options: &EngineOptions) -> PageCountResult {
    engine::estimate_page_count(bytes, options)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })
}

pub fn split_file_into_pages(path: &Path, options: &EngineOptions) -> Result<Vec<String>> {
    let bytes = read_input(path)?;
    Ok(engine::split_into_pages(&bytes, options))
}

pub fn estimate_file_page_count(path: &Path, options: &EngineOptions) -> Result<PageCountResult> {
    let bytes = read_input(path)?;
    Ok(engine::estimate_page_count(&bytes, options))
}
