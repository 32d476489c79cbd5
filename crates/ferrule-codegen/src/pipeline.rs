//! The full compilation pipeline as one facade
//!
//! Stages run strictly forward: graph assembly, method resolution,
//! spec derivation, emission. Each stage completes over the whole
//! class set before the next starts, and no emitter is ever
//! constructed when an earlier stage failed.

use crate::emit::ClassEmitter;
use crate::error::{BuildFailure, SemanticIssue};
use crate::host::HostProfile;
use crate::spec::{self, BindingSpec};
use ferrule_model::{ClassGraph, ClassGraphBuilder, DeclSet};
use ferrule_resolver::{MethodResolver, ResolvedMethods};

/// Frozen products of every pre-emission stage.
#[derive(Debug)]
pub struct Analysis {
    /// The resolved class hierarchy
    pub graph: ClassGraph,
    /// Effective method sets per class
    pub methods: ResolvedMethods,
    /// Binding specs, aligned with the graph's parents-first order
    pub specs: Vec<BindingSpec>,
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    /// Fully-qualified class name
    pub class_name: String,
    /// Output path stem: the dotted name with dots as separators
    pub file_stem: String,
    /// Rendered glue source
    pub text: String,
}

/// Batch pipeline from declaration sets to rendered glue.
pub struct Pipeline {
    profile: HostProfile,
}

impl Pipeline {
    /// Create a pipeline targeting one host profile.
    pub fn new(profile: HostProfile) -> Self {
        Pipeline { profile }
    }

    /// The host profile this pipeline targets.
    pub fn profile(&self) -> &HostProfile {
        &self.profile
    }

    /// Run every stage up to but excluding emission.
    ///
    /// Structural errors abort with the full assembly batch; semantic
    /// errors abort with every independent failure collected across
    /// the class set.
    pub fn analyze(&self, decls: DeclSet) -> Result<Analysis, BuildFailure> {
        let mut builder = ClassGraphBuilder::new();
        let mut structural = Vec::new();
        for class in decls.classes {
            if let Err(err) = builder.add_class(class) {
                structural.push(err);
            }
        }

        // Resolution still runs over the accepted classes so one batch
        // carries every structural problem, not just the first kind
        let graph = match builder.resolve() {
            Ok(graph) if structural.is_empty() => graph,
            Ok(_) => return Err(BuildFailure::Structural { errors: structural }),
            Err(mut link_errors) => {
                structural.append(&mut link_errors);
                return Err(BuildFailure::Structural { errors: structural });
            }
        };

        let methods = MethodResolver::new(&graph)
            .resolve_all()
            .map_err(|errors| BuildFailure::Semantic {
                errors: errors.into_iter().map(SemanticIssue::from).collect(),
            })?;

        let mut semantic = Vec::new();
        let mut specs = Vec::new();
        for node in graph.ordered() {
            let view = graph.view(node.id());
            match spec::derive(view, methods.methods(node.id()), &self.profile) {
                Ok(spec) => specs.push(spec),
                Err(errors) => semantic.extend(errors.into_iter().map(SemanticIssue::from)),
            }
        }
        if !semantic.is_empty() {
            return Err(BuildFailure::Semantic { errors: semantic });
        }

        Ok(Analysis {
            graph,
            methods,
            specs,
        })
    }

    /// Run the whole pipeline and render every class.
    ///
    /// Units come back in the graph's parents-first order. Emitter
    /// failures surface as [`BuildFailure::Internal`]; with specs
    /// derived by [`Pipeline::analyze`] they indicate a ferrule bug.
    pub fn run(&self, decls: DeclSet) -> Result<Vec<GeneratedUnit>, BuildFailure> {
        let analysis = self.analyze(decls)?;
        let mut units = Vec::with_capacity(analysis.specs.len());

        for (node, binding) in analysis.graph.ordered().zip(&analysis.specs) {
            let view = analysis.graph.view(node.id());
            let text = {
                let mut emitter = ClassEmitter::new();
                emitter.init(view, binding)?;
                emitter.render()?
            };
            units.push(GeneratedUnit {
                class_name: binding.class_name.clone(),
                file_stem: binding.class_name.replace('.', "/"),
                text,
            });
        }

        Ok(units)
    }
}
