use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CloneError {
    #[error("{message}")]
    Usage { message: String },

    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("missing required commands: {}", .missing.join(", "))]
    #[diagnostic(help("Please install the missing commands and try again."))]
    MissingDependencies { missing: Vec<String> },

    #[error("failed to get list of running VMs")]
    Query {
        #[source]
        source: ExecError,
    },

    #[error("source VM '{name}' is currently running")]
    #[diagnostic(help("stop the VM before cloning"))]
    SourceRunning { name: String },

    #[error("failed to clone VM '{source_vm}' to '{dest}'")]
    CloneFailed {
        source_vm: String,
        dest: String,
        #[source]
        source: ExecError,
    },

    #[error("failed to set hostname of VM '{dest}'")]
    #[diagnostic(help("the cloned VM exists but still carries the source hostname"))]
    HostnameSetFailed {
        dest: String,
        #[source]
        source: ExecError,
    },
}

/// Failure of a single external command invocation.
#[derive(Debug, Error, Diagnostic)]
pub enum ExecError {
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Status {
        command: String,
        status: std::process::ExitStatus,
        output: String,
    },
}

impl ExecError {
    /// Combined output captured before the failure, if the command ran at all.
    pub fn output(&self) -> Option<&str> {
        match self {
            ExecError::Spawn { .. } => None,
            ExecError::Status { output, .. } => Some(output),
        }
    }
}
