use async_trait::async_trait;

use crate::models::{error_models::ValidatorError, validation_models::Verdict};

/// Decides whether a snippet is syntactically valid for one language.
///
/// Syntax problems are a `Verdict` with `valid == false`; `Err` is reserved
/// for faults on the host (missing tool, broken parser) that the caller
/// should see as a server error.
#[async_trait]
pub trait SyntaxValidator: Send + Sync {
    async fn validate(&self, code: &str) -> Result<Verdict, ValidatorError>;
}
