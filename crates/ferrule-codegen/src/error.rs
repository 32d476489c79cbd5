//! Errors raised while deriving binding specs and emitting glue

use ferrule_model::GraphError;
use ferrule_resolver::ResolveError;
use thiserror::Error;

/// Errors detected while deriving a binding spec for one class.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeriveError {
    /// A bound member uses a `raw` type the host cannot marshal.
    #[error("Class {class} member `{member}` uses a raw type the host cannot marshal")]
    Unmarshalable {
        /// Class the member belongs to
        class: String,
        /// Field or method name
        member: String,
    },
}

/// Lifecycle and consistency violations inside the emitter.
///
/// These are pipeline bugs, not input errors: a correctly driven
/// emitter never produces one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmitError {
    /// The spec names members the viewed class does not have, or
    /// targets a different class entirely.
    #[error("invalid binding spec for class {class}: {detail}")]
    InvalidSpec {
        /// Class the emitter was initialized with
        class: String,
        /// What the spec got wrong
        detail: String,
    },

    /// `init` was called on an emitter that already holds a class.
    #[error("emitter is already initialized for class {class}")]
    AlreadyInitialized {
        /// Class held by the emitter
        class: String,
    },

    /// `render` was called before `init`.
    #[error("emitter was never initialized")]
    Uninitialized,

    /// `render` was called a second time.
    #[error("emitter already rendered class {class}")]
    AlreadyRendered {
        /// Class held by the emitter
        class: String,
    },
}

/// One entry of the semantic error batch.
///
/// Resolution and derivation failures are fatal to their class but not
/// to the run; the pipeline collects the full batch before reporting.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SemanticIssue {
    /// Inheritance or override violation
    #[error("{0}")]
    Resolve(#[from] ResolveError),
    /// Spec derivation failure
    #[error("{0}")]
    Derive(#[from] DeriveError),
}

/// Why a pipeline run produced no output.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildFailure {
    /// The class model itself is malformed; nothing was resolved.
    #[error("class model has {} structural error(s)", .errors.len())]
    Structural {
        /// Every structural error found
        errors: Vec<GraphError>,
    },

    /// The model is well formed but some classes fail resolution or
    /// derivation; the batch covers every independent failure.
    #[error("{} class(es) failed semantic checks", .errors.len())]
    Semantic {
        /// Every semantic issue found
        errors: Vec<SemanticIssue>,
    },

    /// An emitter contract was violated. Callers should treat this as
    /// a bug in ferrule rather than a problem with the input.
    #[error("internal emitter failure: {0}")]
    Internal(#[from] EmitError),
}
