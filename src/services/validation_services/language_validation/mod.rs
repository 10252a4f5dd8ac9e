pub mod external_tool_validator;
pub mod heuristic_validator;
pub mod python_validator;
pub mod validator;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{
    config_models::{Config, ToolOverride},
    language_models::SupportedLanguage,
};
use crate::services::execution_services::process_runner::ToolRunner;
use external_tool_validator::ExternalToolValidator;
use heuristic_validator::HeuristicValidator;
use python_validator::PythonValidator;
use validator::SyntaxValidator;

/// One validator per supported language, built once at startup.
pub struct ValidatorRegistry {
    validators: HashMap<SupportedLanguage, Arc<dyn SyntaxValidator>>,
}

impl ValidatorRegistry {
    pub fn from_config(config: &Config, runner: Arc<dyn ToolRunner>) -> Self {
        let timeout = config.tool_timeout();
        let validators = SupportedLanguage::ALL
            .into_iter()
            .filter_map(|language| {
                let tool_override = config.tools.get(language.as_str());
                get_validator(language, tool_override, runner.clone(), timeout)
                    .map(|validator| (language, validator))
            })
            .collect();
        ValidatorRegistry { validators }
    }

    pub fn get(&self, language: SupportedLanguage) -> Option<Arc<dyn SyntaxValidator>> {
        self.validators.get(&language).cloned()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

pub fn get_validator(
    language: SupportedLanguage,
    tool_override: Option<&ToolOverride>,
    runner: Arc<dyn ToolRunner>,
    timeout: Duration,
) -> Option<Arc<dyn SyntaxValidator>> {
    let validator: Arc<dyn SyntaxValidator> = match language {
        SupportedLanguage::Python => Arc::new(PythonValidator),
        SupportedLanguage::Java => Arc::new(HeuristicValidator::java()),
        SupportedLanguage::Swift => Arc::new(HeuristicValidator::swift()),
        SupportedLanguage::Sql => Arc::new(HeuristicValidator::sql()),
        SupportedLanguage::Kotlin => Arc::new(HeuristicValidator::kotlin()),
        SupportedLanguage::Html => Arc::new(HeuristicValidator::html()),
        SupportedLanguage::Css => Arc::new(HeuristicValidator::css()),
        SupportedLanguage::CSharp => Arc::new(HeuristicValidator::csharp()),
        _ => Arc::new(ExternalToolValidator::for_language(
            language,
            tool_override,
            runner,
            timeout,
        )?),
    };
    Some(validator)
}
