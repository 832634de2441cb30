//! Running-state check for the source VM.
//!
//! The answer is only valid at the moment of the query: nothing stops the VM
//! from being started between this check and the clone.

use crate::command::CommandRunner;
use crate::config::ToolsConfig;
use crate::error::CloneError;

/// Arguments for `virsh list` that print one running domain name per line.
pub fn list_running_args() -> Vec<String> {
    ["list", "--name", "--state-running"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Whether `vm_name` appears verbatim as a line of `virsh list --name` output.
pub fn parse_running(output: &str, vm_name: &str) -> bool {
    output.trim().split('\n').any(|line| line == vm_name)
}

/// Ask the hypervisor whether `vm_name` is currently running.
pub fn is_vm_running(
    vm_name: &str,
    tools: &ToolsConfig,
    runner: &impl CommandRunner,
) -> Result<bool, CloneError> {
    let out = runner
        .execute(&tools.hypervisor, &list_running_args())
        .map_err(|source| CloneError::Query { source })?;
    let running = parse_running(&out.output, vm_name);
    tracing::debug!(vm = vm_name, running, "checked VM state");
    Ok(running)
}
