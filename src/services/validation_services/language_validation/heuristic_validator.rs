//! Pattern checks standing in for real parsers.
//!
//! None of these are authoritative: any Swift snippet containing `func` passes,
//! any text with a `class Foo` passes as C#. They exist so clients keep getting
//! the answers they always got for these languages.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::validator::SyntaxValidator;
use crate::models::{error_models::ValidatorError, validation_models::Verdict};

static JAVA_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+class\s+\w+").expect("valid regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<\s*html.*?>").expect("valid regex"));
static CSS_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[a-zA-Z0-9\-]+\s*\{").expect("valid regex"));
static CSHARP_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"class\s+\w+").expect("valid regex"));

const SQL_KEYWORDS: &[&str] = &["SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP"];

pub enum Pattern {
    Regex(&'static Lazy<Regex>),
    /// Case-sensitive substring.
    Contains(&'static str),
    /// Any keyword found in the uppercased snippet.
    AnyKeyword(&'static [&'static str]),
}

impl Pattern {
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Pattern::Regex(regex) => regex.is_match(code),
            Pattern::Contains(needle) => code.contains(needle),
            Pattern::AnyKeyword(keywords) => {
                let upper = code.to_uppercase();
                keywords.iter().any(|keyword| upper.contains(keyword))
            }
        }
    }
}

pub struct HeuristicValidator {
    pattern: Pattern,
    success_message: &'static str,
    failure_message: &'static str,
}

impl HeuristicValidator {
    pub fn new(pattern: Pattern, success_message: &'static str, failure_message: &'static str) -> Self {
        HeuristicValidator {
            pattern,
            success_message,
            failure_message,
        }
    }

    pub fn java() -> Self {
        HeuristicValidator::new(
            Pattern::Regex(&JAVA_CLASS),
            "Clase Java válida (validación básica).",
            "No se detecta clase Java válida.",
        )
    }

    pub fn swift() -> Self {
        HeuristicValidator::new(
            Pattern::Contains("func"),
            "Código Swift válido (validación básica).",
            "No se detectaron funciones Swift.",
        )
    }

    pub fn sql() -> Self {
        HeuristicValidator::new(
            Pattern::AnyKeyword(SQL_KEYWORDS),
            "Código SQL válido (validación básica).",
            "Código SQL inválido o sin palabras clave.",
        )
    }

    pub fn kotlin() -> Self {
        HeuristicValidator::new(
            Pattern::Contains("fun "),
            "Código Kotlin válido (validación básica).",
            "No se detectaron funciones Kotlin.",
        )
    }

    pub fn html() -> Self {
        HeuristicValidator::new(
            Pattern::Regex(&HTML_TAG),
            "Código HTML válido (validación básica).",
            "No se detectó etiqueta HTML.",
        )
    }

    pub fn css() -> Self {
        HeuristicValidator::new(
            Pattern::Regex(&CSS_RULE),
            "Código CSS válido (validación básica).",
            "Código CSS inválido.",
        )
    }

    pub fn csharp() -> Self {
        HeuristicValidator::new(
            Pattern::Regex(&CSHARP_CLASS),
            "Código C# válido (validación básica).",
            "No se detectó clase en C#.",
        )
    }

    pub fn check(&self, code: &str) -> Verdict {
        if self.pattern.matches(code) {
            Verdict::valid(self.success_message)
        } else {
            Verdict::invalid(self.failure_message)
        }
    }
}

#[async_trait]
impl SyntaxValidator for HeuristicValidator {
    async fn validate(&self, code: &str) -> Result<Verdict, ValidatorError> {
        Ok(self.check(code))
    }
}
