use std::path::{Path, PathBuf};

use crate::engine::RankedProject;

/// Command that reopens a project: the IDE launcher with the project path as
/// its only argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub argument: PathBuf,
}

impl LaunchCommand {
    pub fn new(program: impl Into<PathBuf>, argument: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            argument: argument.into(),
        }
    }

    pub fn for_result(result: &RankedProject) -> Self {
        Self::new(&result.app.binary, &result.project.path)
    }

    /// Renders the command for a POSIX shell.
    pub fn to_shell(&self) -> String {
        format!(
            "{} {}",
            shell_quote(&self.program),
            shell_quote(&self.argument)
        )
    }
}

fn shell_quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if !raw.is_empty() && raw.chars().all(is_shell_safe) {
        return raw.to_string();
    }

    format!("'{}'", raw.replace('\'', r"'\''"))
}

fn is_shell_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '/' | '.' | '_' | '-' | '+' | ':' | '@' | ',' | '=')
}
