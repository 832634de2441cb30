//! Top-level clone sequence.
//!
//! `Start → ArgsValidated → EnvChecked → SourceVerifiedStopped → Cloned →
//! [HostnameSet] → Done`. The first error aborts the run; nothing is retried
//! or rolled back.

use crate::cli::CloneRequest;
use crate::command::CommandRunner;
use crate::config::ToolsConfig;
use crate::error::CloneError;
use crate::precheck::{self, ToolLocator};
use crate::vm_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ArgsValidated,
    EnvChecked,
    SourceVerifiedStopped,
    Cloned,
    HostnameSet,
    Done,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOutcome {
    pub source: String,
    pub dest: String,
    pub hostname_updated: bool,
}

impl CloneOutcome {
    pub fn summary(&self) -> String {
        if self.hostname_updated {
            format!(
                "VM '{}' cloned successfully to '{}' and hostname updated",
                self.source, self.dest
            )
        } else {
            format!(
                "VM '{}' cloned successfully to '{}' (hostname change skipped)",
                self.source, self.dest
            )
        }
    }
}

/// `virt-clone` arguments; `--auto-clone` lets it pick new disk paths.
pub fn clone_args(source: &str, dest: &str) -> Vec<String> {
    vec![
        "--original".into(),
        source.into(),
        "--name".into(),
        dest.into(),
        "--auto-clone".into(),
    ]
}

/// `virt-customize` arguments setting the guest hostname to the domain name.
pub fn hostname_args(dest: &str) -> Vec<String> {
    vec![
        "-d".into(),
        dest.into(),
        "--hostname".into(),
        dest.into(),
    ]
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!(from = ?stage, to = ?next, "stage");
    *stage = next;
}

/// Run the whole clone for an already validated request.
pub fn run(
    request: &CloneRequest,
    tools: &ToolsConfig,
    runner: &impl CommandRunner,
    locator: &impl ToolLocator,
) -> Result<CloneOutcome, CloneError> {
    let mut stage = Stage::Start;
    advance(&mut stage, Stage::ArgsValidated);
    let result = run_stages(request, tools, runner, locator, &mut stage);
    if let Err(e) = &result {
        tracing::debug!(?stage, error = %e, "aborted");
    }
    result
}

fn run_stages(
    request: &CloneRequest,
    tools: &ToolsConfig,
    runner: &impl CommandRunner,
    locator: &impl ToolLocator,
    stage: &mut Stage,
) -> Result<CloneOutcome, CloneError> {
    precheck::check_required_commands(tools, request.skip_hostname_change, locator)?;
    advance(stage, Stage::EnvChecked);

    if vm_state::is_vm_running(&request.source, tools, runner)? {
        return Err(CloneError::SourceRunning {
            name: request.source.clone(),
        });
    }
    advance(stage, Stage::SourceVerifiedStopped);

    println!("Cloning VM '{}' to '{}'...", request.source, request.dest);
    runner
        .execute(&tools.clone, &clone_args(&request.source, &request.dest))
        .map_err(|source| CloneError::CloneFailed {
            source_vm: request.source.clone(),
            dest: request.dest.clone(),
            source,
        })?;
    advance(stage, Stage::Cloned);

    let hostname_updated = !request.skip_hostname_change;
    if hostname_updated {
        println!("Setting hostname of new VM to '{}'...", request.dest);
        runner
            .execute(&tools.hostname, &hostname_args(&request.dest))
            .map_err(|source| CloneError::HostnameSetFailed {
                dest: request.dest.clone(),
                source,
            })?;
        advance(stage, Stage::HostnameSet);
    }

    advance(stage, Stage::Done);
    Ok(CloneOutcome {
        source: request.source.clone(),
        dest: request.dest.clone(),
        hostname_updated,
    })
}
