use std::str::FromStr;

use tracing::info;

use crate::{
    models::{
        error_models::ValidatorError,
        language_models::{SupportedLanguage, normalize_language},
        validation_models::{AnalysisRequest, ValidationResult, Verdict},
    },
    services::validation_services::language_validation::ValidatorRegistry,
    utils::helper_utils::preview_code,
};

/// Routes a request to the validator for its language.
pub struct ValidationService {
    registry: ValidatorRegistry,
}

impl ValidationService {
    pub fn new(registry: ValidatorRegistry) -> Self {
        ValidationService { registry }
    }

    /// Unknown languages are an ordinary negative result, never an error.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<ValidationResult, ValidatorError> {
        let language = normalize_language(&request.language);

        let validator = match SupportedLanguage::from_str(&language)
            .ok()
            .and_then(|supported| self.registry.get(supported))
        {
            Some(validator) => validator,
            None => {
                info!(language = %language, "unsupported language");
                return Ok(unsupported(language));
            }
        };

        let verdict = validator.validate(&request.code).await?;
        info!(
            language = %language,
            valid = verdict.valid,
            code = %preview_code(&request.code),
            "analysis finished"
        );
        Ok(verdict.into_result(language))
    }
}

fn unsupported(language: String) -> ValidationResult {
    let message = format!("Lenguaje '{}' no soportado.", language);
    Verdict::invalid(message).into_result(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::{config_models::Config, execution_models::TIMEOUT_MESSAGE};
    use crate::services::execution_services::process_runner::ToolRunner;
    use crate::services::validation_services::language_validation::external_tool_validator::{
        PHP_MISSING_TAG_MESSAGE, tests::ScriptedRunner,
    };

    fn service(runner: Arc<ScriptedRunner>) -> ValidationService {
        let runner: Arc<dyn ToolRunner> = runner;
        ValidationService::new(ValidatorRegistry::from_config(&Config::default(), runner))
    }

    fn request(code: &str, language: &str) -> AnalysisRequest {
        AnalysisRequest {
            code: code.to_string(),
            language: language.to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_language_echoes_the_tag() {
        let result = service(ScriptedRunner::replying(0, "", ""))
            .analyze(&request("IDENTIFICATION DIVISION.", " COBOL "))
            .await
            .unwrap();
        assert_eq!(result.language, "cobol");
        assert!(!result.valid);
        assert_eq!(result.message, "Lenguaje 'cobol' no soportado.");
    }

    #[tokio::test]
    async fn language_tag_is_case_and_space_insensitive() {
        let svc = service(ScriptedRunner::replying(0, "", ""));
        let mut results = Vec::new();
        for tag in ["python", "Python", "PYTHON", " python "] {
            results.push(svc.analyze(&request("def f(:", tag)).await.unwrap());
        }
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(results[0].language, "python");
        assert!(!results[0].valid);
        assert!(results[0].message.starts_with("Error de sintaxis en Python: "));
    }

    #[tokio::test]
    async fn css_rule_is_accepted() {
        let result = service(ScriptedRunner::replying(0, "", ""))
            .analyze(&request("body { color: red; }", "css"))
            .await
            .unwrap();
        assert_eq!(
            result,
            ValidationResult {
                language: "css".to_string(),
                valid: true,
                message: "Código CSS válido (validación básica).".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn heuristic_languages_never_spawn_tools() {
        let runner = ScriptedRunner::replying(0, "", "");
        let svc = service(runner.clone());
        for (code, tag) in [
            ("public class A {}", "java"),
            ("func a() {}", "swift"),
            ("select 1", "sql"),
            ("fun a() {}", "kotlin"),
            ("<html></html>", "html"),
            ("class A {}", "c#"),
            ("x = 1", "python"),
        ] {
            assert!(svc.analyze(&request(code, tag)).await.unwrap().valid, "{tag}");
        }
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn php_without_tag_skips_the_linter() {
        let runner = ScriptedRunner::replying(0, "No syntax errors detected", "");
        let result = service(runner.clone())
            .analyze(&request("echo 1;", "PHP"))
            .await
            .unwrap();
        assert!(!result.valid);
        assert_eq!(result.message, PHP_MISSING_TAG_MESSAGE);
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn tool_timeout_becomes_a_result() {
        let result = service(ScriptedRunner::timing_out())
            .analyze(&request("fn main() { loop {} }", "rust"))
            .await
            .unwrap();
        assert!(!result.valid);
        assert_eq!(result.message, TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    async fn symbolic_tags_route_to_tools() {
        let runner = ScriptedRunner::replying(0, "", "");
        let result = service(runner.clone())
            .analyze(&request("int main() { return 0; }", "C++"))
            .await
            .unwrap();
        assert_eq!(result.language, "c++");
        assert_eq!(result.message, "Código C++ válido.");
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_tool_propagates() {
        let err = service(ScriptedRunner::missing())
            .analyze(&request("console.log(1)", "javascript"))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidatorError::Spawn { .. }));
    }
}
