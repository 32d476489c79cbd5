//! Structural errors raised while assembling a class graph

use thiserror::Error;

/// Errors that make a declaration set structurally unusable
///
/// Structural errors are fatal to the whole compilation run: later
/// classes may depend on the broken one, so nothing downstream of the
/// graph is attempted.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    /// Class declared more than once
    #[error("Duplicate class declaration: {name}")]
    DuplicateClass {
        /// Full class name
        name: String,
    },

    /// Identifier is not well formed
    #[error("Invalid identifier: `{name}`")]
    InvalidName {
        /// Offending identifier
        name: String,
    },

    /// Two fields with one name in a single class
    #[error("Duplicate field `{field}` in class {class}")]
    DuplicateField {
        /// Declaring class
        class: String,
        /// Field name
        field: String,
    },

    /// Two methods with one name and arity in a single class
    #[error("Duplicate method `{method}/{arity}` in class {class}")]
    DuplicateMethod {
        /// Declaring class
        class: String,
        /// Method name
        method: String,
        /// Parameter count
        arity: usize,
    },

    /// Parent class is not part of the declaration set
    #[error("Class {class} extends unknown class `{parent}`")]
    UnknownParent {
        /// Declaring class
        class: String,
        /// Missing parent name
        parent: String,
    },

    /// Parent class is declared final
    #[error("Class {class} extends final class {parent}")]
    ParentIsFinal {
        /// Declaring class
        class: String,
        /// Final parent name
        parent: String,
    },

    /// Following parent links does not terminate at a root
    #[error("Inheritance cycle involving class {class}")]
    InheritanceCycle {
        /// First declared class on the cycle
        class: String,
    },

    /// Lookup of a class name that is not in the graph
    #[error("Class not found: {name}")]
    NotFound {
        /// Requested class name
        name: String,
    },
}
