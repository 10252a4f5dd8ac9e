use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::validator::SyntaxValidator;
use crate::models::{
    config_models::ToolOverride,
    error_models::ValidatorError,
    execution_models::{ToolCommand, ToolOutput},
    language_models::SupportedLanguage,
    validation_models::Verdict,
};
use crate::services::execution_services::process_runner::ToolRunner;

/// `ruby -c` prints this on stdout when the file parses.
pub const RUBY_SUCCESS_MARKER: &str = "Syntax OK";
/// `php -l` prints this on stdout when the file parses.
pub const PHP_SUCCESS_MARKER: &str = "No syntax errors detected";

pub const PHP_OPEN_TAG: &str = "<?php";
pub const PHP_MISSING_TAG_MESSAGE: &str = "El código PHP debe incluir la etiqueta <?php";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessCheck {
    ExitCode { message: &'static str },
    /// Exit status is ignored; the tool's output becomes the message.
    StdoutMarker(&'static str),
}

/// Checked before any process is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFragment {
    pub fragment: &'static str,
    pub message: &'static str,
}

pub struct ExternalToolValidator {
    command: ToolCommand,
    success: SuccessCheck,
    required: Option<RequiredFragment>,
    runner: Arc<dyn ToolRunner>,
    timeout: Duration,
}

impl ExternalToolValidator {
    pub fn new(
        command: ToolCommand,
        success: SuccessCheck,
        runner: Arc<dyn ToolRunner>,
        timeout: Duration,
    ) -> Self {
        ExternalToolValidator {
            command,
            success,
            required: None,
            runner,
            timeout,
        }
    }

    pub fn requiring(mut self, required: RequiredFragment) -> Self {
        self.required = Some(required);
        self
    }

    /// Built-in checker for `language`, or `None` if it is not tool-backed.
    /// An override swaps program and arguments but keeps how input is fed
    /// and how success is read.
    pub fn for_language(
        language: SupportedLanguage,
        tool_override: Option<&ToolOverride>,
        runner: Arc<dyn ToolRunner>,
        timeout: Duration,
    ) -> Option<Self> {
        let (mut command, success) = default_tool(language)?;
        if let Some(tool) = tool_override {
            command.program = tool.program.clone();
            command.args = tool.args.clone();
        }
        let validator = ExternalToolValidator::new(command, success, runner, timeout);
        Some(match language {
            SupportedLanguage::Php => validator.requiring(RequiredFragment {
                fragment: PHP_OPEN_TAG,
                message: PHP_MISSING_TAG_MESSAGE,
            }),
            _ => validator,
        })
    }

    #[cfg(test)]
    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    fn classify(&self, output: &ToolOutput) -> Verdict {
        if output.timed_out {
            return Verdict::invalid(output.stderr.clone());
        }
        let valid = match &self.success {
            SuccessCheck::ExitCode { .. } => output.success(),
            SuccessCheck::StdoutMarker(marker) => output.stdout.contains(marker),
        };
        match (&self.success, valid) {
            (SuccessCheck::ExitCode { message }, true) => Verdict::valid(*message),
            (SuccessCheck::StdoutMarker(_), true) => {
                Verdict::valid(output.report().unwrap_or_default())
            }
            (_, false) => Verdict::invalid(self.failure_message(output)),
        }
    }

    fn failure_message(&self, output: &ToolOutput) -> String {
        match output.report() {
            Some(report) => report.to_string(),
            None => format!(
                "{} terminó con código {}",
                self.command.program, output.status
            ),
        }
    }
}

#[async_trait]
impl SyntaxValidator for ExternalToolValidator {
    async fn validate(&self, code: &str) -> Result<Verdict, ValidatorError> {
        if let Some(required) = &self.required {
            if !code.contains(required.fragment) {
                debug!(program = %self.command.program, "required fragment missing, tool not run");
                return Ok(Verdict::invalid(required.message));
            }
        }
        let output = self.runner.run(&self.command, code, self.timeout).await?;
        debug!(
            program = %self.command.program,
            status = output.status,
            timed_out = output.timed_out,
            "tool finished"
        );
        Ok(self.classify(&output))
    }
}

fn default_tool(language: SupportedLanguage) -> Option<(ToolCommand, SuccessCheck)> {
    use SupportedLanguage::*;

    let entry = match language {
        JavaScript => (
            ToolCommand::stdin("node", &["--check"]),
            SuccessCheck::ExitCode {
                message: "Código JavaScript válido.",
            },
        ),
        TypeScript => (
            ToolCommand::file("tsc", &["--noEmit"], "snippet.ts"),
            SuccessCheck::ExitCode {
                message: "Código TypeScript válido.",
            },
        ),
        Rust => (
            ToolCommand::stdin("rustc", &["--emit=metadata", "-"]),
            SuccessCheck::ExitCode {
                message: "Código Rust válido.",
            },
        ),
        Ruby => (
            ToolCommand::stdin("ruby", &["-c"]),
            SuccessCheck::StdoutMarker(RUBY_SUCCESS_MARKER),
        ),
        Php => (
            ToolCommand::stdin("php", &["-l"]),
            SuccessCheck::StdoutMarker(PHP_SUCCESS_MARKER),
        ),
        Go => (
            ToolCommand::file("go", &["vet"], "snippet.go"),
            SuccessCheck::ExitCode {
                message: "Código Go válido.",
            },
        ),
        Cpp => (
            ToolCommand::stdin("g++", &["-x", "c++", "-fsyntax-only", "-"]),
            SuccessCheck::ExitCode {
                message: "Código C++ válido.",
            },
        ),
        Python | Java | Swift | Sql | Kotlin | Html | Css | CSharp => return None,
    };
    Some(entry)
}
