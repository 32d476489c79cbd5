//! `ferrule check` — validate declaration sets without writing output.

use crate::commands::input::{self, BuildInputs};
use crate::commands::report;
use crate::output::{resolve_color_choice, StyledOutput};
use ferrule_codegen::Pipeline;

pub fn execute(
    decls: Vec<String>,
    manifest: String,
    host: Option<String>,
    color: String,
) -> anyhow::Result<()> {
    let mut out = StyledOutput::new(resolve_color_choice(Some(&color)));
    let BuildInputs {
        decls,
        profile,
        sources,
        ..
    } = input::load(decls, &manifest, host, None)?;

    out.plain(&format!(
        "Checking {} declaration set(s) for host ",
        sources.len()
    ));
    out.info(&profile.name);
    out.newline();

    let pipeline = Pipeline::new(profile);
    match pipeline.analyze(decls) {
        Ok(analysis) => {
            for node in analysis.graph.ordered() {
                out.success("  ✓ ");
                out.plain(&format!("{}\n", node.name()));
            }
            out.bold(&format!("\n{} class(es) OK\n", analysis.graph.len()));
            out.flush();
            Ok(())
        }
        Err(failure) => {
            let code = report::report_failure(&mut out, &failure);
            out.flush();
            std::process::exit(code);
        }
    }
}
