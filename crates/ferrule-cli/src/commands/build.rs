//! `ferrule build` — generate binding glue from declaration sets.

use crate::commands::input::{self, BuildInputs};
use crate::commands::report;
use crate::output::{resolve_color_choice, StyledOutput};
use anyhow::Context;
use ferrule_codegen::Pipeline;
use std::path::Path;

pub fn execute(
    decls: Vec<String>,
    manifest: String,
    host: Option<String>,
    out_dir: Option<String>,
    color: String,
) -> anyhow::Result<()> {
    let mut out = StyledOutput::new(resolve_color_choice(Some(&color)));
    let BuildInputs {
        decls,
        profile,
        out_dir,
        sources,
    } = input::load(decls, &manifest, host, out_dir)?;

    out.plain(&format!(
        "Compiling {} declaration set(s) for host ",
        sources.len()
    ));
    out.info(&profile.name);
    out.newline();

    let pipeline = Pipeline::new(profile);
    let units = match pipeline.run(decls) {
        Ok(units) => units,
        Err(failure) => {
            let code = report::report_failure(&mut out, &failure);
            out.flush();
            std::process::exit(code);
        }
    };

    let ext = pipeline.profile().syntax.file_ext.as_str();
    for unit in &units {
        let path = Path::new(&out_dir).join(format!("{}.{}", unit.file_stem, ext));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
        std::fs::write(&path, &unit.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        out.success("  ✓ ");
        out.plain(&format!("{} → {}\n", unit.class_name, path.display()));
    }

    out.bold(&format!(
        "\nGenerated {} file(s) in {}\n",
        units.len(),
        out_dir
    ));
    out.flush();
    Ok(())
}
