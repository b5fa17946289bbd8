use serde::{Deserialize, Serialize};

use crate::domain::ClassificationResult;

#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    pub texto: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub confianca: Option<Confidence>,
}

/// Webhooks built from low-code flows sometimes send the score as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Confidence {
    fn value(&self) -> Option<f64> {
        match self {
            Confidence::Number(n) => Some(*n),
            Confidence::Text(s) => s.trim().parse::<f64>().ok(),
            Confidence::Other(_) => None,
        }
    }
}

impl From<ClassifyResponse> for ClassificationResult {
    fn from(response: ClassifyResponse) -> Self {
        let confidence = response.confianca.as_ref().and_then(Confidence::value);
        ClassificationResult::from_fields(response.categoria, confidence)
    }
}

pub fn parse_body(body: &str) -> Result<ClassificationResult, serde_json::Error> {
    let response: ClassifyResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_message_under_texto() {
        let body = serde_json::to_value(ClassifyRequest {
            texto: "Quero alugar um apartamento",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"texto": "Quero alugar um apartamento"}));
    }

    #[test]
    fn parses_full_response() {
        let result = parse_body(r#"{"categoria":"locação","confianca":0.87}"#).unwrap();
        assert_eq!(result, ClassificationResult::new("locação", 0.87));
    }

    #[test]
    fn null_and_missing_fields_use_defaults() {
        let result = parse_body(r#"{"categoria":null}"#).unwrap();
        assert_eq!(result.display_category(), "NOT CLASSIFIED");
        assert_eq!(result.confidence, 0.0);

        let result = parse_body("{}").unwrap();
        assert_eq!(result.category, "not classified");
    }

    #[test]
    fn accepts_string_confidence() {
        let result = parse_body(r#"{"categoria":"venda","confianca":"0.5"}"#).unwrap();
        assert_eq!(result.display_confidence(), "50.0%");

        let result = parse_body(r#"{"categoria":"venda","confianca":"alta"}"#).unwrap();
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn unexpected_confidence_type_counts_as_zero() {
        let result = parse_body(r#"{"categoria":"venda","confianca":true}"#).unwrap();
        assert_eq!(result.category, "venda");
        assert_eq!(result.display_confidence(), "0.0%");

        let result = parse_body(r#"{"categoria":"venda","confianca":{"valor":0.9}}"#).unwrap();
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_body("<html>oops</html>").is_err());
        assert!(parse_body("").is_err());
    }
}
