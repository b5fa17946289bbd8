
pub const NOT_CLASSIFIED: &str = "not classified";
pub const ERROR_CATEGORY: &str = "error";

/// Category and confidence returned by the classification webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub category: String,
    /// Classifier certainty, expected in `0.0..=1.0`.
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(category: impl Into<String>, confidence: f64) -> Self {
        Self {
            category: category.into(),
            confidence,
        }
    }

    /// Builds a result from the optional response fields. A blank category counts as missing.
    pub fn from_fields(category: Option<String>, confidence: Option<f64>) -> Self {
        let category = category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| NOT_CLASSIFIED.to_string());
        Self {
            category,
            confidence: confidence.filter(|c| c.is_finite()).unwrap_or(0.0),
        }
    }

    pub fn error() -> Self {
        Self::new(ERROR_CATEGORY, 0.0)
    }

    pub fn is_error(&self) -> bool {
        self.category == ERROR_CATEGORY
    }

    pub fn display_category(&self) -> String {
        self.category.to_uppercase()
    }

    /// Percentage with one decimal. Ties round up, not to even.
    pub fn display_confidence(&self) -> String {
        let percent = self.confidence * 100.0;
        let tenths = (percent * 10.0).round() / 10.0;
        format!("{tenths:.1}%")
    }
}
