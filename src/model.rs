use serde::Serialize;

/// Uniform marker the break normalizer substitutes for every explicit page break.
pub const PAGE_BREAK_SENTINEL: &str = "[[PAGE_BREAK]]";

/// Block used for a page (or paragraph) with nothing to show.
pub const PLACEHOLDER_BLOCK: &str = "<p>&nbsp;</p>";

/// Text of a paragraph that carried no text and no drawing.
pub const EMPTY_PARAGRAPH_TEXT: &str = "\u{a0}";

/// One logical paragraph (or body-level table) extracted from the main document.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphUnit {
    /// Run text in document order, followed by any table summary. May embed sentinels.
    pub text: String,
    pub has_table: bool,
    pub has_non_text_content: bool,
    /// The paragraph's XML could not be read; it still occupies a placeholder block.
    pub unreadable: bool,
}

impl ParagraphUnit {
    pub fn unreadable() -> Self {
        Self {
            text: EMPTY_PARAGRAPH_TEXT.to_string(),
            has_table: false,
            has_non_text_content: false,
            unreadable: true,
        }
    }

    pub fn sentinel_count(&self) -> usize {
        self.text.matches(PAGE_BREAK_SENTINEL).count()
    }

    /// Text with sentinels removed and edges trimmed. `char::is_whitespace`
    /// covers the non-breaking space, so placeholder paragraphs come out empty.
    pub fn visible_text(&self) -> String {
        self.text
            .split(PAGE_BREAK_SENTINEL)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_blank(&self) -> bool {
        self.visible_text().is_empty()
    }
}

/// An ordered list of escaped `<p>` blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub blocks: Vec<String>,
}

impl Page {
    pub fn placeholder() -> Self {
        Self {
            blocks: vec![PLACEHOLDER_BLOCK.to_string()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Never returns an empty string: a page without content renders as the placeholder block.
    pub fn to_html(&self) -> String {
        let html = self.blocks.join("\n");
        let trimmed = html.trim();
        if trimmed.is_empty() || trimmed == "<p></p>" {
            PLACEHOLDER_BLOCK.to_string()
        } else {
            html
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CountMethod {
    TrustedMetadata,
    ExplicitBreaks,
    HeuristicWeighted,
    ByteSizeFallback,
}

impl std::fmt::Display for CountMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CountMethod::TrustedMetadata => "trusted metadata",
            CountMethod::ExplicitBreaks => "explicit breaks",
            CountMethod::HeuristicWeighted => "weighted heuristic",
            CountMethod::ByteSizeFallback => "byte-size fallback",
        };
        f.write_str(name)
    }
}

/// Intermediate measurements behind a page count, for diagnostic display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub paragraph_estimate: u32,
    pub char_estimate: u32,
    pub byte_size_estimate: u32,
    pub explicit_breaks: u32,
    pub non_empty_paragraphs: u32,
    pub total_chars: u64,
    pub byte_length: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageCountResult {
    pub page_count: u32,
    pub method_used: CountMethod,
    pub signals: Option<Signals>,
}
