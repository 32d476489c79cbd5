//! Binding spec derivation and host glue emission for Ferrule
//!
//! This crate is the back half of the pipeline. It takes the frozen
//! class graph and resolved method sets, derives a host-neutral
//! [`BindingSpec`] per class under a [`HostProfile`], and renders each
//! spec to glue source through a single-use [`ClassEmitter`]. The
//! [`Pipeline`] facade drives all stages for callers that just want
//! declarations in and generated files out.

pub mod emit;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod spec;

pub use emit::{ClassEmitter, HostBackend, ScriptBackend};
pub use error::{BuildFailure, DeriveError, EmitError, SemanticIssue};
pub use host::{HostCaps, HostKind, HostProfile, SyntaxProfile};
pub use pipeline::{Analysis, GeneratedUnit, Pipeline};
pub use spec::{derive, BindingSpec, Directive, FieldArg};
