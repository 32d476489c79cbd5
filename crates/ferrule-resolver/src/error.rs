//! Semantic errors raised during method resolution

use thiserror::Error;

/// Errors that make a class hierarchy semantically invalid.
///
/// Semantic errors are fatal to the offending class but independent
/// classes keep resolving, so callers receive the complete batch in
/// one report instead of failing on the first.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// A method is declared both abstract and final
    #[error("Method `{method}` in class {class} is declared both abstract and final")]
    AbstractFinalMethod {
        /// Declaring class
        class: String,
        /// Method name
        method: String,
    },

    /// Override of a method declared final
    #[error("Method `{method}` in class {class} overrides a final method of {parent}")]
    OverrideOfFinal {
        /// Overriding class
        class: String,
        /// Method name
        method: String,
        /// Class providing the final method
        parent: String,
    },

    /// Override of a method that is neither virtual nor abstract
    #[error("Method `{method}` in class {class} overrides a non-virtual method of {parent}")]
    OverrideOfNonVirtual {
        /// Overriding class
        class: String,
        /// Method name
        method: String,
        /// Class providing the overridden method
        parent: String,
    },

    /// Override signature does not line up with the overridden method
    #[error(
        "Method `{method}` in class {class} does not match the signature inherited from {parent}: {detail}"
    )]
    IncompatibleOverride {
        /// Overriding class
        class: String,
        /// Method name
        method: String,
        /// Class providing the overridden method
        parent: String,
        /// What exactly differs
        detail: String,
    },

    /// Non-abstract class whose effective set still has an abstract entry
    #[error(
        "Class {class} is not abstract but method `{method}` (abstract in {declared_in}) has no implementation"
    )]
    UnimplementedAbstract {
        /// Concrete class at fault
        class: String,
        /// Abstract method name
        method: String,
        /// Class carrying the abstract declaration
        declared_in: String,
    },

    /// Field redeclares a name already used by an ancestor
    #[error("Field `{field}` in class {class} shadows a field of {ancestor}")]
    ShadowedField {
        /// Declaring class
        class: String,
        /// Field name
        field: String,
        /// Ancestor owning the shadowed field
        ancestor: String,
    },
}
