use serde::{Deserialize, Serialize};

/// Body of `POST /analizar-codigo`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisRequest {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "lenguaje")]
    pub language: String,
}

/// Response body; `language` is the normalised tag, supported or not.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationResult {
    #[serde(rename = "lenguaje")]
    pub language: String,
    #[serde(rename = "valido")]
    pub valid: bool,
    #[serde(rename = "mensaje")]
    pub message: String,
}

/// What a single validator decides about a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub message: String,
}

impl Verdict {
    pub fn valid(message: impl Into<String>) -> Self {
        Verdict {
            valid: true,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Verdict {
            valid: false,
            message: message.into(),
        }
    }

    pub fn into_result(self, language: String) -> ValidationResult {
        ValidationResult {
            language,
            valid: self.valid,
            message: self.message,
        }
    }
}
