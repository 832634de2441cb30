use std::path::Path;

use facet::Facet;

use crate::error::CloneError;
use crate::paths;

#[derive(Debug, Clone, Default, Facet)]
#[facet(default)]
pub struct Config {
    #[facet(default)]
    pub tools: ToolsConfig,
}

/// Names of the external executables, resolved through `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
#[facet(default)]
pub struct ToolsConfig {
    #[facet(default = "sudo")]
    pub privilege: String,
    #[facet(default = "virsh")]
    pub hypervisor: String,
    #[facet(default = "virt-clone")]
    pub clone: String,
    #[facet(default = "virt-customize")]
    pub hostname: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            privilege: "sudo".into(),
            hypervisor: "virsh".into(),
            clone: "virt-clone".into(),
            hostname: "virt-customize".into(),
        }
    }
}

fn validate_config(config: &Config) -> Result<(), CloneError> {
    let tools = &config.tools;
    for (key, value) in [
        ("privilege", &tools.privilege),
        ("hypervisor", &tools.hypervisor),
        ("clone", &tools.clone),
        ("hostname", &tools.hostname),
    ] {
        if value.is_empty() {
            return Err(CloneError::Validation {
                message: format!("tools.{key} must not be empty"),
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(CloneError::Validation {
                message: format!("tools.{key} must be a single command name (got '{value}')"),
            });
        }
    }
    Ok(())
}

fn parse_config(contents: &str, path: &Path) -> Result<Config, CloneError> {
    let config: Config = facet_toml::from_str(contents).map_err(|e| CloneError::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

// ── public API ────────────────────────────────────────────

/// Load config from an explicit path. A missing file is an error.
pub fn load_config(path: &Path) -> Result<Config, CloneError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CloneError::ConfigLoad {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&contents, path)
}

/// Load the explicit config if given, else the default file if it exists,
/// else built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config, CloneError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match paths::default_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "loading default config");
            load_config(&path)
        }
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, CloneError> {
        parse_config(toml, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.tools, ToolsConfig::default());
    }

    #[test]
    fn partial_tools_table_keeps_other_defaults() {
        let config = parse("[tools]\nprivilege = \"doas\"\n").unwrap();
        assert_eq!(config.tools.privilege, "doas");
        assert_eq!(config.tools.hypervisor, "virsh");
        assert_eq!(config.tools.clone, "virt-clone");
        assert_eq!(config.tools.hostname, "virt-customize");
    }

    #[test]
    fn empty_tool_name_rejected() {
        let err = parse("[tools]\nclone = \"\"\n").unwrap_err();
        assert!(matches!(err, CloneError::Validation { .. }));
    }

    #[test]
    fn tool_name_with_spaces_rejected() {
        let err = parse("[tools]\nprivilege = \"sudo -n\"\n").unwrap_err();
        assert!(matches!(err, CloneError::Validation { .. }));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = parse("[tools\n").unwrap_err();
        assert!(matches!(err, CloneError::ConfigParse { .. }));
    }

    #[test]
    fn missing_explicit_file_is_load_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/vmclone.toml"))).unwrap_err();
        assert!(matches!(err, CloneError::ConfigLoad { .. }));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vmclone.toml");
        std::fs::write(&path, "[tools]\nhypervisor = \"/usr/local/bin/virsh\"\n").unwrap();
        let config = resolve_config(Some(&path)).unwrap();
        assert_eq!(config.tools.hypervisor, "/usr/local/bin/virsh");
    }
}
