//! Shared input loading for build, check, and inspect.
//!
//! Resolution order for every setting: command-line flag, then
//! manifest value, then built-in default.

use crate::manifest::BuildManifest;
use anyhow::{anyhow, Context};
use ferrule_codegen::HostProfile;
use ferrule_model::DeclSet;
use std::path::Path;

/// Everything a subcommand needs to drive the pipeline.
pub struct BuildInputs {
    /// Merged declaration set, in source order
    pub decls: DeclSet,
    /// Host profile with manifest overrides applied
    pub profile: HostProfile,
    /// Directory generated files go into
    pub out_dir: String,
    /// Expanded declaration-set paths, for status output
    pub sources: Vec<String>,
}

pub fn load(
    decl_args: Vec<String>,
    manifest_path: &str,
    host_flag: Option<String>,
    out_dir_flag: Option<String>,
) -> anyhow::Result<BuildInputs> {
    let manifest = if Path::new(manifest_path).exists() {
        let parsed = BuildManifest::from_file(Path::new(manifest_path))
            .map_err(|e| anyhow!("{}: {}", manifest_path, e))?;
        Some(parsed)
    } else {
        None
    };

    let patterns = if decl_args.is_empty() {
        manifest
            .as_ref()
            .map(|m| m.build.decls.clone())
            .unwrap_or_default()
    } else {
        decl_args
    };
    if patterns.is_empty() {
        anyhow::bail!(
            "no declaration sets given; pass files on the command line \
             or list them under [build] decls in {}",
            manifest_path
        );
    }

    let host_name = host_flag
        .or_else(|| manifest.as_ref().and_then(|m| m.build.host.clone()))
        .unwrap_or_else(|| "script".to_string());
    let mut profile = builtin_profile(&host_name)?;
    if let Some(manifest) = &manifest {
        if let Some(overrides) = manifest.hosts.get(&host_name) {
            overrides.apply(&mut profile.caps);
        }
    }

    let out_dir = out_dir_flag
        .or_else(|| manifest.as_ref().and_then(|m| m.build.out_dir.clone()))
        .unwrap_or_else(|| "bindings".to_string());

    let sources = expand_patterns(&patterns)?;
    let mut decls = DeclSet::default();
    for path in &sources {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read declaration set {}", path))?;
        let set = DeclSet::from_json(&content)
            .with_context(|| format!("Failed to parse declaration set {}", path))?;
        decls.merge(set);
    }

    Ok(BuildInputs {
        decls,
        profile,
        out_dir,
        sources,
    })
}

fn builtin_profile(name: &str) -> anyhow::Result<HostProfile> {
    match name {
        "script" => Ok(HostProfile::script()),
        other => Err(anyhow!(
            "Unknown host profile '{}'. Built-in profiles: script",
            other
        )),
    }
}

/// Expand literal paths and glob patterns into a flat source list.
///
/// Glob matches are sorted per pattern so runs stay deterministic
/// regardless of directory iteration order.
fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<String>> {
    let mut sources = Vec::new();

    for pattern in patterns {
        let is_glob = pattern.chars().any(|c| matches!(c, '*' | '?' | '['));
        if !is_glob {
            if !Path::new(pattern).exists() {
                anyhow::bail!("Declaration set not found: {}", pattern);
            }
            sources.push(pattern.clone());
            continue;
        }

        let mut matched = Vec::new();
        let entries =
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern {}", pattern))?;
        for entry in entries {
            let path = entry.with_context(|| format!("Failed to expand pattern {}", pattern))?;
            matched.push(path.to_string_lossy().into_owned());
        }
        if matched.is_empty() {
            anyhow::bail!("Glob pattern matched no files: {}", pattern);
        }
        matched.sort();
        sources.extend(matched);
    }

    Ok(sources)
}
