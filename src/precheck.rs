use crate::config::ToolsConfig;
use crate::error::CloneError;

/// Decides whether a command name resolves to an executable.
pub trait ToolLocator {
    fn is_available(&self, command: &str) -> bool;
}

/// Looks commands up on the process `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPath;

impl ToolLocator for SearchPath {
    fn is_available(&self, command: &str) -> bool {
        match which::which(command) {
            Ok(path) => {
                tracing::debug!(command, path = %path.display(), "found command");
                true
            }
            Err(e) => {
                tracing::debug!(command, error = %e, "command not found");
                false
            }
        }
    }
}

/// Commands the clone run needs. The hostname tool is only needed when the
/// hostname is actually changed.
pub fn required_commands(tools: &ToolsConfig, skip_hostname_change: bool) -> Vec<&str> {
    let mut required = vec![
        tools.privilege.as_str(),
        tools.clone.as_str(),
        tools.hypervisor.as_str(),
    ];
    if !skip_hostname_change {
        required.push(tools.hostname.as_str());
    }
    required
}

/// Check every required command and report all missing ones at once.
pub fn check_required_commands(
    tools: &ToolsConfig,
    skip_hostname_change: bool,
    locator: &impl ToolLocator,
) -> Result<(), CloneError> {
    let missing: Vec<String> = required_commands(tools, skip_hostname_change)
        .into_iter()
        .filter(|cmd| !locator.is_available(cmd))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CloneError::MissingDependencies { missing })
    }
}
