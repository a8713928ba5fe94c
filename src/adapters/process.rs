//! Subprocess helpers shared by the tool adapters.

use std::process::Command;

use crate::domain::AppError;

fn describe(command: &Command) -> String {
    let mut parts = vec![command.get_program().to_string_lossy().into_owned()];
    parts.extend(command.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run with inherited stdio; fail on spawn error or non-zero exit.
pub(crate) fn stream(command: &mut Command) -> Result<(), AppError> {
    let line = describe(command);
    tracing::debug!(command = %line, "spawning");

    let status = command
        .status()
        .map_err(|e| AppError::ToolFailed { command: line.clone(), details: e.to_string() })?;

    if !status.success() {
        return Err(AppError::ToolFailed { command: line, details: status.to_string() });
    }
    Ok(())
}

/// Run and return stdout verbatim; fail on spawn error or non-zero exit.
pub(crate) fn capture(command: &mut Command) -> Result<String, AppError> {
    let line = describe(command);
    tracing::debug!(command = %line, "spawning");

    let output = command
        .output()
        .map_err(|e| AppError::ToolFailed { command: line.clone(), details: e.to_string() })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AppError::ToolFailed {
            command: line,
            details: if stderr.is_empty() { output.status.to_string() } else { stderr },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn capture_keeps_stdout_verbatim() {
        let out = capture(Command::new("printf").arg("abc  file\\n")).unwrap();
        assert_eq!(out, "abc  file\n");
    }

    #[test]
    fn nonzero_exit_is_tool_failure() {
        let result = capture(&mut Command::new("false"));
        assert!(matches!(result, Err(AppError::ToolFailed { command, .. }) if command == "false"));
    }

    #[test]
    fn missing_program_is_tool_failure() {
        let result = stream(&mut Command::new("stepwise-definitely-not-installed"));
        assert!(matches!(result, Err(AppError::ToolFailed { .. })));
    }
}
