//! Host profiles: what a binding target can do and how its glue looks
//!
//! A profile bundles the capability flags that gate spec derivation
//! with the surface syntax knobs the backend renders with. The
//! built-in profile targets a generic dynamic scripting host; the CLI
//! may override individual capability flags from the manifest.

use crate::emit::{HostBackend, ScriptBackend};
use serde::Serialize;

/// Capability flags of a binding target.
///
/// Flags gate derivation, not rendering: a spec derived for a host
/// without some capability simply never contains the directives (or
/// doc payloads) that capability would enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCaps {
    /// Host call sites may omit parameters that declare a default
    pub supports_default_args: bool,
    /// Host objects get an explicit teardown hook
    pub supports_destructors: bool,
    /// Documentation can be carried into the generated glue
    pub supports_doc_blocks: bool,
    /// Opaque `raw` values can cross the binding boundary
    pub marshals_raw: bool,
}

impl Default for HostCaps {
    fn default() -> Self {
        HostCaps {
            supports_default_args: true,
            supports_destructors: true,
            supports_doc_blocks: true,
            marshals_raw: false,
        }
    }
}

/// Surface syntax of a binding target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxProfile {
    /// Line comment prefix of the host language
    pub comment_prefix: String,
    /// File extension of generated sources, without the dot
    pub file_ext: String,
    /// Name given to the synthesized constructor wrapper
    pub ctor_name: String,
    /// Name given to the synthesized destructor wrapper
    pub dtor_name: String,
}

impl Default for SyntaxProfile {
    fn default() -> Self {
        SyntaxProfile {
            comment_prefix: "#".to_string(),
            file_ext: "bind".to_string(),
            ctor_name: "new".to_string(),
            dtor_name: "destroy".to_string(),
        }
    }
}

/// The closed set of rendering backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// Generic registration-script backend
    #[default]
    Script,
}

impl HostKind {
    /// The backend implementing this kind's rendering contract.
    pub fn backend(&self) -> &'static dyn HostBackend {
        match self {
            HostKind::Script => &ScriptBackend,
        }
    }
}

/// A complete binding target: identity, capabilities, and syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    /// Profile name, used in manifests and generated headers
    pub name: String,
    /// Which backend renders for this profile
    pub kind: HostKind,
    /// Capability flags
    pub caps: HostCaps,
    /// Surface syntax knobs
    pub syntax: SyntaxProfile,
}

impl HostProfile {
    /// The built-in generic scripting host.
    pub fn script() -> Self {
        HostProfile {
            name: "script".to_string(),
            kind: HostKind::Script,
            caps: HostCaps::default(),
            syntax: SyntaxProfile::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_profile_defaults() {
        let profile = HostProfile::script();
        assert_eq!(profile.name, "script");
        assert_eq!(profile.kind, HostKind::Script);
        assert!(profile.caps.supports_destructors);
        assert!(!profile.caps.marshals_raw);
        assert_eq!(profile.syntax.file_ext, "bind");
    }

    #[test]
    fn test_backend_dispatch() {
        assert_eq!(HostKind::Script.backend().name(), "script");
    }
}
