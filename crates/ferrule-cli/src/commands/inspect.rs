//! `ferrule inspect` — dump the resolved hierarchy, effective method
//! sets, and binding specs for debugging declaration sets.

use crate::commands::input::{self, BuildInputs};
use crate::commands::report;
use crate::output::{resolve_color_choice, StyledOutput};
use anyhow::anyhow;
use ferrule_codegen::{BindingSpec, Directive, Pipeline};
use ferrule_resolver::EffectiveMethod;
use serde::Serialize;

#[derive(Serialize)]
struct ClassReport<'a> {
    name: &'a str,
    parent: Option<&'a str>,
    depth: u32,
    methods: &'a [EffectiveMethod],
    spec: &'a BindingSpec,
}

pub fn execute(
    decls: Vec<String>,
    manifest: String,
    host: Option<String>,
    class: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut out = StyledOutput::new(resolve_color_choice(None));
    let BuildInputs { decls, profile, .. } = input::load(decls, &manifest, host, None)?;

    let pipeline = Pipeline::new(profile);
    let analysis = match pipeline.analyze(decls) {
        Ok(analysis) => analysis,
        Err(failure) => {
            let code = report::report_failure(&mut out, &failure);
            out.flush();
            std::process::exit(code);
        }
    };

    if let Some(name) = &class {
        analysis.graph.lookup(name).map_err(|e| anyhow!("{}", e))?;
    }

    let mut reports = Vec::new();
    for (node, spec) in analysis.graph.ordered().zip(&analysis.specs) {
        if let Some(filter) = &class {
            if node.name() != filter {
                continue;
            }
        }
        let view = analysis.graph.view(node.id());
        reports.push(ClassReport {
            name: node.name(),
            parent: view.parent_name(),
            depth: node.depth(),
            methods: analysis.methods.methods(node.id()),
            spec,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for entry in &reports {
        out.bold(&format!("class {}", entry.name));
        match entry.parent {
            Some(parent) => out.plain(&format!(" : {}  (depth {})\n", parent, entry.depth)),
            None => out.plain(&format!("  (depth {})\n", entry.depth)),
        }

        for method in entry.methods {
            let provider = method.origin.provider(entry.name);
            out.plain(&format!(
                "  method {}/{} via {}\n",
                method.name,
                method.arity(),
                provider
            ));
        }
        for directive in &entry.spec.directives {
            out.dim(&format!("  {}\n", describe(directive)));
        }
        out.newline();
    }
    out.flush();
    Ok(())
}

fn describe(directive: &Directive) -> String {
    match directive {
        Directive::Constructor { name, params } => {
            format!("bind ctor {} ({} arg(s))", name, params.len())
        }
        Directive::Destructor { name } => format!("bind dtor {}", name),
        Directive::Accessor {
            field,
            reader,
            writer,
            ..
        } => format!("bind accessor {} [{} / {}]", field, reader, writer),
        Directive::Method {
            method,
            alias,
            implemented_in,
            ..
        } => format!("bind method {} as {} via {}", method, alias, implemented_in),
    }
}
