//! Class declaration types produced by declaration-set front-ends
//!
//! A declaration set is the flat, order-preserving list of class
//! declarations for one build. Textual front-ends hand sets over as
//! JSON; the shapes here mirror that wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Tags
// ============================================================================

/// Type tag attached to fields, parameters, and return values.
///
/// This is a closed tag alphabet, not a type system: the core never
/// infers or checks value semantics beyond tag equality and, for
/// object tags, the declared class hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    /// No value (return position only)
    #[default]
    Void,
    /// Boolean
    Bool,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// Text string
    Str,
    /// Instance of a declared class, by full name
    Object(String),
    /// Homogeneous list of an element type
    List(Box<TypeTag>),
    /// Host-opaque value that cannot cross the binding boundary
    Raw,
}

impl TypeTag {
    /// Whether this tag is or contains [`TypeTag::Raw`].
    pub fn contains_raw(&self) -> bool {
        match self {
            TypeTag::Raw => true,
            TypeTag::List(elem) => elem.contains_raw(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Void => write!(f, "void"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::Str => write!(f, "str"),
            TypeTag::Object(name) => write!(f, "{}", name),
            TypeTag::List(elem) => write!(f, "list[{}]", elem),
            TypeTag::Raw => write!(f, "raw"),
        }
    }
}

// ============================================================================
// Class Declaration
// ============================================================================

/// One declared class, before resolution.
///
/// Identity is the fully-qualified dotted name. Field and method order
/// is meaningful and preserved through every later stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Fully-qualified dotted class name, e.g. `pets.Dog`
    pub name: String,

    /// Full name of the parent class (None = root class)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Abstract classes cannot be instantiated by the host
    #[serde(default)]
    pub is_abstract: bool,

    /// Final classes cannot be extended
    #[serde(default)]
    pub is_final: bool,

    /// Documentation carried through to the generated glue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// Visibility of a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Accessible only within the declaring class
    Private,
    /// Accessible within the declaring class and subclasses
    Protected,
    /// Accessible from anywhere (default)
    #[default]
    Public,
}

/// Field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,

    /// Declared type of the field
    pub ty: TypeTag,

    /// Visibility modifier (private/protected/public)
    #[serde(default)]
    pub visibility: Visibility,

    /// Force accessor generation even for a private field
    #[serde(default)]
    pub bound: bool,

    /// Host-facing base name override for the accessor pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Documentation for the accessors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// Method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,

    #[serde(default)]
    pub params: Vec<ParamDecl>,

    /// Return type (void when omitted)
    #[serde(default)]
    pub returns: TypeTag,

    /// Virtual methods may be overridden by subclasses
    #[serde(default)]
    pub is_virtual: bool,

    /// Final methods may never be overridden
    #[serde(default)]
    pub is_final: bool,

    /// Abstract methods have no implementation in the declaring class
    #[serde(default)]
    pub is_abstract: bool,

    /// Host-facing name override for the call wrapper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Documentation for the call wrapper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl MethodDecl {
    /// Number of declared parameters.
    ///
    /// Methods are keyed by (name, arity) throughout resolution, so two
    /// declarations with one name but different arities are distinct.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Parameter declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeTag,

    /// Literal rendering of a default value; presence marks the
    /// parameter optional at host call sites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

// ============================================================================
// Declaration Sets
// ============================================================================

/// A complete declaration set for one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclSet {
    /// Class declarations in front-end order
    pub classes: Vec<ClassDecl>,
}

impl DeclSet {
    /// Parse a declaration set from its JSON wire form.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Append every class of `other`, preserving order.
    pub fn merge(&mut self, other: DeclSet) {
        self.classes.extend(other.classes);
    }
}
