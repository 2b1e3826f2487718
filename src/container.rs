use std::collections::HashMap;
use std::io::{Cursor, Read};

use crate::error::{Error, Result};

/// Parts of the OOXML package the engine reads. Everything else is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartName {
    MainDocument,
    AppProperties,
}

impl PartName {
    pub const ALL: [PartName; 2] = [PartName::MainDocument, PartName::AppProperties];

    pub fn path(self) -> &'static str {
        match self {
            PartName::MainDocument => "word/document.xml",
            PartName::AppProperties => "docProps/app.xml",
        }
    }

    /// Case-insensitive match of a zip entry name against the known part paths.
    pub fn from_entry_name(name: &str) -> Option<PartName> {
        let normalized = name.replace('\\', "/");
        let normalized = normalized.trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|part| part.path().eq_ignore_ascii_case(normalized))
    }
}

/// Decompressed text of the recognised parts of one DOCX package.
#[derive(Debug)]
pub struct DocumentContainer {
    parts: HashMap<PartName, String>,
}

impl DocumentContainer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = HashMap::new();

        for i in 0..zip.len() {
            let mut entry = match zip.by_index(i) {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable zip entry #{i}: {e}");
                    continue;
                }
            };
            if entry.is_dir() {
                continue;
            }
            let Some(part) = PartName::from_entry_name(entry.name()) else {
                continue;
            };
            if parts.contains_key(&part) {
                log::debug!("Duplicate entry for {}, keeping the first", part.path());
                continue;
            }
            let mut raw = Vec::new();
            if let Err(e) = entry.read_to_end(&mut raw) {
                log::warn!("Failed to decompress {}: {e}", part.path());
                continue;
            }
            let text = String::from_utf8_lossy(&raw);
            let text = text.strip_prefix('\u{feff}').unwrap_or(&text).to_string();
            parts.insert(part, text);
        }

        log::debug!(
            "Opened container: {} entries, {} known parts",
            zip.len(),
            parts.len()
        );
        Ok(Self { parts })
    }

    pub fn get_part(&self, part: PartName) -> Option<&str> {
        self.parts.get(&part).map(String::as_str)
    }

    pub fn require_part(&self, part: PartName) -> Result<&str> {
        self.get_part(part)
            .ok_or(Error::MissingPart(part.path()))
    }
}
