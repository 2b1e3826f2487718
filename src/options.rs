//! Engine configuration.

/// Relative weight of each heuristic signal in the combined estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorWeights {
    pub paragraph: f64,
    pub chars: f64,
    pub bytes: f64,
}

impl Default for EstimatorWeights {
    fn default() -> Self {
        Self {
            paragraph: 0.4,
            chars: 0.4,
            bytes: 0.2,
        }
    }
}

/// Presentation strings and estimator tuning used by both engine operations.
#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// Label inside a table summary, e.g. `[Bảng: A | B ]`.
    pub table_label: String,
    /// Text emitted for a paragraph that only holds drawings, pictures or objects.
    pub non_text_placeholder: String,
    pub paragraphs_per_page: u32,
    pub chars_per_page: u32,
    pub bytes_per_page: u32,
    pub weights: EstimatorWeights,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            table_label: "Bảng".to_string(),
            non_text_placeholder: "[Hình ảnh/Đối tượng]".to_string(),
            paragraphs_per_page: 25,
            chars_per_page: 2500,
            bytes_per_page: 50_000,
            weights: EstimatorWeights::default(),
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_label(mut self, label: impl Into<String>) -> Self {
        self.table_label = label.into();
        self
    }

    pub fn with_non_text_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.non_text_placeholder = placeholder.into();
        self
    }

    pub fn with_paragraphs_per_page(mut self, n: u32) -> Self {
        self.paragraphs_per_page = n.max(1);
        self
    }

    pub fn with_chars_per_page(mut self, n: u32) -> Self {
        self.chars_per_page = n.max(1);
        self
    }

    pub fn with_bytes_per_page(mut self, n: u32) -> Self {
        self.bytes_per_page = n.max(1);
        self
    }

    pub fn with_weights(mut self, weights: EstimatorWeights) -> Self {
        self.weights = weights;
        self
    }
}
