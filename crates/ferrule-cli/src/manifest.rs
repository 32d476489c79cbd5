//! Build manifest parsing (ferrule.toml)
//!
//! The manifest lists the declaration sets of a project, the host to
//! target, and optional per-host capability overrides. Command-line
//! flags always beat manifest values.

use ferrule_codegen::HostCaps;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during manifest parsing
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("Failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid manifest: {0}")]
    Validation(String),
}

/// Build manifest (ferrule.toml)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BuildManifest {
    /// Build settings
    #[serde(default)]
    pub build: BuildSection,

    /// Capability overrides per host profile name
    #[serde(default, rename = "host")]
    pub hosts: HashMap<String, HostOverride>,
}

/// The `[build]` table
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BuildSection {
    /// Declaration-set files or glob patterns
    #[serde(default)]
    pub decls: Vec<String>,

    /// Host profile to target (default "script")
    #[serde(default)]
    pub host: Option<String>,

    /// Directory generated files are written into
    #[serde(default)]
    pub out_dir: Option<String>,
}

/// One `[host.<name>]` table: capability flags to override.
///
/// Absent flags keep the built-in profile's value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HostOverride {
    pub supports_default_args: Option<bool>,
    pub supports_destructors: Option<bool>,
    pub supports_doc_blocks: Option<bool>,
    pub marshals_raw: Option<bool>,
}

impl HostOverride {
    /// Overlay the set flags onto `caps`.
    pub fn apply(&self, caps: &mut HostCaps) {
        if let Some(v) = self.supports_default_args {
            caps.supports_default_args = v;
        }
        if let Some(v) = self.supports_destructors {
            caps.supports_destructors = v;
        }
        if let Some(v) = self.supports_doc_blocks {
            caps.supports_doc_blocks = v;
        }
        if let Some(v) = self.marshals_raw {
            caps.marshals_raw = v;
        }
    }
}

impl BuildManifest {
    /// Parse a manifest from a file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a manifest from a string
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: BuildManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<(), ManifestError> {
        if let Some(host) = &self.build.host {
            if host.is_empty() {
                return Err(ManifestError::Validation(
                    "Host name cannot be empty".to_string(),
                ));
            }
        }

        if let Some(out_dir) = &self.build.out_dir {
            if out_dir.is_empty() {
                return Err(ManifestError::Validation(
                    "Output directory cannot be empty".to_string(),
                ));
            }
        }

        for name in self.hosts.keys() {
            if name.is_empty() {
                return Err(ManifestError::Validation(
                    "Host override table needs a profile name".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let toml = r#"
[build]
decls = ["decls/*.json", "extra.json"]
host = "script"
out_dir = "generated"

[host.script]
supports_destructors = false
marshals_raw = true
"#;

        let manifest = BuildManifest::from_str(toml).unwrap();
        assert_eq!(manifest.build.decls.len(), 2);
        assert_eq!(manifest.build.host.as_deref(), Some("script"));
        assert_eq!(manifest.build.out_dir.as_deref(), Some("generated"));

        let overrides = &manifest.hosts["script"];
        assert_eq!(overrides.supports_destructors, Some(false));
        assert_eq!(overrides.marshals_raw, Some(true));
        assert_eq!(overrides.supports_doc_blocks, None);
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = BuildManifest::from_str("").unwrap();
        assert!(manifest.build.decls.is_empty());
        assert!(manifest.build.host.is_none());
        assert!(manifest.hosts.is_empty());
    }

    #[test]
    fn test_override_applies_only_set_flags() {
        let toml = r#"
[host.script]
supports_doc_blocks = false
"#;
        let manifest = BuildManifest::from_str(toml).unwrap();

        let mut caps = HostCaps::default();
        manifest.hosts["script"].apply(&mut caps);
        assert!(!caps.supports_doc_blocks);
        assert!(caps.supports_destructors);
        assert!(caps.supports_default_args);
    }

    #[test]
    fn test_empty_host_name_rejected() {
        let result = BuildManifest::from_str("[build]\nhost = \"\"\n");
        assert!(matches!(result, Err(ManifestError::Validation(_))));
    }

    #[test]
    fn test_bad_toml_rejected() {
        let result = BuildManifest::from_str("[build\ndecls = 3");
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }
}
