//! Class model for the Ferrule binding compiler
//!
//! Declaration sets arrive from external language front-ends as flat
//! lists of class declarations. This crate validates them
//! structurally, links inheritance into a frozen [`ClassGraph`], and
//! exposes the ancestry queries later pipeline stages build on.
//!
//! # Pipeline position
//!
//! ```text
//! declarations -> ClassGraph -> method resolution -> binding specs -> emission
//! ```
//!
//! Everything past the graph consumes it read-only; mutation ends when
//! [`ClassGraphBuilder::resolve`] returns.

pub mod decl;
pub mod error;
pub mod graph;
pub mod name;

pub use decl::{ClassDecl, DeclSet, FieldDecl, MethodDecl, ParamDecl, TypeTag, Visibility};
pub use error::GraphError;
pub use graph::{Ancestors, ClassGraph, ClassGraphBuilder, ClassId, ClassNode, ClassView};
