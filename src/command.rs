use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::ExecError;

/// Text captured from a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Display form of the command line that was run.
    pub command: String,
    /// Interleaved stdout and stderr.
    pub output: String,
}

/// Runs an external program to completion and captures its combined output.
///
/// A non-zero exit is an `ExecError::Status` carrying whatever was captured.
pub trait CommandRunner {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput, ExecError>;
}

/// Runs every command through a privilege-escalation tool (`sudo virsh ...`)
/// and echoes the command line and its output to stdout.
#[derive(Debug, Clone)]
pub struct PrivilegedRunner {
    privilege: String,
}

impl PrivilegedRunner {
    pub fn new(privilege: impl Into<String>) -> Self {
        Self {
            privilege: privilege.into(),
        }
    }

    /// Run `<privilege> <argv...>` with stdout and stderr sent to one file.
    fn run_captured(&self, argv: &[String]) -> std::io::Result<(ExitStatus, String)> {
        // Both streams share one file so the child's write order is kept.
        let mut capture = tempfile::tempfile()?;
        let status = Command::new(&self.privilege)
            .args(argv)
            .stdin(Stdio::null())
            .stdout(capture.try_clone()?)
            .stderr(capture.try_clone()?)
            .status()?;

        let mut buf = Vec::new();
        capture.seek(SeekFrom::Start(0))?;
        capture.read_to_end(&mut buf)?;
        Ok((status, String::from_utf8_lossy(&buf).into_owned()))
    }
}

impl CommandRunner for PrivilegedRunner {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput, ExecError> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program.to_string());
        argv.extend_from_slice(args);
        let cmdline = format_command(&self.privilege, &argv);

        println!("Executing command: {cmdline}");
        tracing::trace!("exec: {cmdline}");

        let result = self.run_captured(&argv);
        let captured = result.as_ref().map(|(_, out)| out.as_str()).unwrap_or("");
        println!("Command output:\n{captured}");

        let (status, output) = result.map_err(|source| ExecError::Spawn {
            command: cmdline.clone(),
            source,
        })?;
        tracing::debug!(command = %cmdline, code = ?status.code(), "command finished");

        if !status.success() {
            return Err(ExecError::Status {
                command: cmdline,
                status,
                output,
            });
        }
        Ok(CommandOutput {
            command: cmdline,
            output,
        })
    }
}

pub fn format_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn format_command_joins_with_spaces() {
        assert_eq!(
            format_command("sudo", &args(&["virsh", "list", "--name"])),
            "sudo virsh list --name"
        );
        assert_eq!(format_command("sudo", &[]), "sudo");
    }

    // `env` stands in for the privilege tool: `env sh -c ...` runs sh unchanged.
    #[cfg(unix)]
    #[test]
    fn captures_stdout_and_stderr_together() {
        let runner = PrivilegedRunner::new("env");
        let out = runner
            .execute("sh", &args(&["-c", "echo one; echo two >&2; echo three"]))
            .unwrap();
        assert_eq!(out.output, "one\ntwo\nthree\n");
        assert_eq!(out.command, "env sh -c echo one; echo two >&2; echo three");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_keeps_output() {
        let runner = PrivilegedRunner::new("env");
        let err = runner
            .execute("sh", &args(&["-c", "echo boom >&2; exit 3"]))
            .unwrap_err();
        match &err {
            ExecError::Status { status, output, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(output, "boom\n");
            }
            other => panic!("expected Status, got {other:?}"),
        }
        assert_eq!(err.output(), Some("boom\n"));
    }

    #[test]
    fn missing_privilege_tool_is_spawn_error() {
        let runner = PrivilegedRunner::new("vmclone-definitely-not-a-real-binary");
        let err = runner.execute("true", &[]).unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
        assert_eq!(err.output(), None);
    }
}
