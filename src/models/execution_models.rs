/// Stderr reported for a run that outlived its timeout.
pub const TIMEOUT_MESSAGE: &str = "Timeout expired";

/// Exit status recorded for a run that outlived its timeout.
pub const TIMEOUT_STATUS: i32 = -1;

/// How the snippet reaches the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Stdin,
    /// Written to this file name inside the scratch directory, which is then
    /// appended to the argument list.
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub input: InputMode,
}

impl ToolCommand {
    pub fn stdin(program: &str, args: &[&str]) -> Self {
        ToolCommand {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            input: InputMode::Stdin,
        }
    }

    pub fn file(program: &str, args: &[&str], file_name: &str) -> Self {
        ToolCommand {
            input: InputMode::File(file_name.to_string()),
            ..ToolCommand::stdin(program, args)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ToolOutput {
    pub fn timed_out() -> Self {
        ToolOutput {
            status: TIMEOUT_STATUS,
            stdout: String::new(),
            stderr: TIMEOUT_MESSAGE.to_string(),
            timed_out: true,
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0 && !self.timed_out
    }

    /// Stderr if it says anything, else stdout if it does.
    pub fn report(&self) -> Option<&str> {
        [&self.stderr, &self.stdout]
            .into_iter()
            .find(|stream| !stream.trim().is_empty())
            .map(String::as_str)
    }
}
