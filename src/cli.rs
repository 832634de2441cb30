use clap::Parser;
use std::path::PathBuf;

use crate::error::CloneError;

#[derive(Parser, Debug)]
#[command(
    name = "vmclone",
    about = "Clones a KVM virtual machine using virt-clone and sets the new hostname"
)]
pub struct Cli {
    /// Name of the source VM to clone
    #[arg(long, value_name = "NAME")]
    pub source: Option<String>,

    /// Name for the new cloned VM
    #[arg(long, value_name = "NAME")]
    pub dest: Option<String>,

    /// Skip hostname change (for FreeBSD or other unsupported OSes)
    #[arg(long)]
    pub no_hostname_change: bool,

    /// Path to config file (defaults to the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// The single clone operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub source: String,
    pub dest: String,
    pub skip_hostname_change: bool,
}

impl Cli {
    /// Validate the parsed flags into a `CloneRequest`.
    ///
    /// Both names must be present and non-empty; clap alone accepts `--source ""`.
    pub fn resolve(&self) -> Result<CloneRequest, CloneError> {
        let source = non_empty(self.source.as_deref());
        let dest = non_empty(self.dest.as_deref());
        match (source, dest) {
            (Some(source), Some(dest)) => Ok(CloneRequest {
                source: source.to_string(),
                dest: dest.to_string(),
                skip_hostname_change: self.no_hostname_change,
            }),
            _ => Err(CloneError::Usage {
                message: "Both --source and --dest flags are required".into(),
            }),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vmclone").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn resolves_full_request() {
        let req = parse(&["--source", "web01", "--dest", "web02"])
            .resolve()
            .unwrap();
        assert_eq!(
            req,
            CloneRequest {
                source: "web01".into(),
                dest: "web02".into(),
                skip_hostname_change: false,
            }
        );
    }

    #[test]
    fn no_hostname_change_flag() {
        let req = parse(&["--source", "a", "--dest", "b", "--no-hostname-change"])
            .resolve()
            .unwrap();
        assert!(req.skip_hostname_change);
    }

    #[test]
    fn missing_dest_is_usage_error() {
        let err = parse(&["--source", "a"]).resolve().unwrap_err();
        assert!(matches!(err, CloneError::Usage { .. }));
    }

    #[test]
    fn empty_names_are_usage_errors() {
        for args in [
            &["--source", "", "--dest", "b"][..],
            &["--source", "a", "--dest", ""][..],
            &[][..],
        ] {
            assert!(
                matches!(parse(args).resolve(), Err(CloneError::Usage { .. })),
                "expected {args:?} to be rejected"
            );
        }
    }
}
