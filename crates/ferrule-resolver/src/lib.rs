//! Method resolution for the Ferrule binding compiler
//!
//! Consumes a frozen [`ferrule_model::ClassGraph`] and computes each
//! class's effective method set: the fully resolved list of methods a
//! class exposes after inheritance and overrides are applied, with
//! every entry tagged by provenance. Override legality (virtual/final
//! discipline, signature compatibility) is validated here, and all
//! semantic errors across the graph are collected into one batch.

#![warn(missing_docs)]

pub mod error;
pub mod methods;

pub use error::ResolveError;
pub use methods::{EffectiveMethod, MethodOrigin, MethodResolver, ResolvedMethods};
