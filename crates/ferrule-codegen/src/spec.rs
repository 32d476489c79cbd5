//! Binding spec derivation
//!
//! A binding spec is the host-neutral middle layer between a resolved
//! class and rendered glue: an ordered list of directives saying what
//! to bind, under which host-facing names, with which signatures.
//! Derivation is a pure function of (class view, effective methods,
//! host profile); identical inputs produce identical specs.

use crate::error::DeriveError;
use crate::host::{HostCaps, HostKind, HostProfile, SyntaxProfile};
use ferrule_model::name::host_name;
use ferrule_model::{ClassView, FieldDecl, ParamDecl, TypeTag, Visibility};
use ferrule_resolver::EffectiveMethod;
use serde::Serialize;

/// One constructor keyword argument, mirroring a bound field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldArg {
    /// Host-facing argument name
    pub name: String,
    /// Declared field type
    pub ty: TypeTag,
}

/// One thing the backend must bind for a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    /// Synthesized constructor taking every bound field as an optional
    /// keyword argument
    Constructor {
        /// Host-facing constructor name
        name: String,
        /// Keyword arguments, instance fields root class first
        params: Vec<FieldArg>,
    },
    /// Teardown hook; absent when the host lacks destructor support
    Destructor {
        /// Host-facing destructor name
        name: String,
    },
    /// Reader/writer pair for one bound field
    Accessor {
        /// Declared field name
        field: String,
        /// Host-facing reader name
        reader: String,
        /// Host-facing writer name
        writer: String,
        /// Declared field type
        ty: TypeTag,
        /// Accessor documentation, None when the host drops docs
        doc: Option<String>,
    },
    /// Call wrapper for one effective method
    Method {
        /// Declared method name
        method: String,
        /// Host-facing wrapper name
        alias: String,
        /// Effective parameter list
        params: Vec<ParamDecl>,
        /// Effective return type
        returns: TypeTag,
        /// Class whose implementation the wrapper dispatches to
        implemented_in: String,
        /// Whether declared defaults survive into the wrapper
        expand_defaults: bool,
        /// Wrapper documentation, None when the host drops docs
        doc: Option<String>,
    },
}

/// Everything a backend needs to render one class for one host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingSpec {
    /// Fully-qualified class name
    pub class_name: String,
    /// Host profile name the spec was derived for
    pub host: String,
    /// Backend that renders this spec
    pub kind: HostKind,
    /// Surface syntax of the target host
    pub syntax: SyntaxProfile,
    /// Class documentation, None when the host drops docs
    pub class_doc: Option<String>,
    /// What to bind, in render order
    pub directives: Vec<Directive>,
}

/// Derive the binding spec for one class under one host profile.
///
/// Directive order is fixed: constructor, destructor, accessors
/// (instance fields root class first), then method wrappers in
/// effective-set order. Private fields are skipped unless marked
/// `bound`; abstract methods are skipped; abstract classes get no
/// constructor or destructor.
///
/// Fails when a member that would be bound carries a `raw` type and
/// the host cannot marshal raw values. Every such member is reported,
/// not just the first.
pub fn derive(
    view: ClassView<'_>,
    methods: &[EffectiveMethod],
    profile: &HostProfile,
) -> Result<BindingSpec, Vec<DeriveError>> {
    let decl = view.decl();
    let class_name = decl.name.clone();
    let caps = &profile.caps;

    // Accessors cover the whole instance, inherited fields included;
    // shadowing was rejected at resolution so names cannot collide
    let fields: Vec<&FieldDecl> = view
        .fields_root_first()
        .into_iter()
        .filter(|field| is_bound_field(field))
        .collect();

    if !caps.marshals_raw {
        let mut errors = Vec::new();
        for field in &fields {
            if field.ty.contains_raw() {
                errors.push(DeriveError::Unmarshalable {
                    class: class_name.clone(),
                    member: field.name.clone(),
                });
            }
        }
        for method in methods {
            if method.is_abstract {
                continue;
            }
            let touches_raw = method.returns.contains_raw()
                || method.params.iter().any(|p| p.ty.contains_raw());
            if touches_raw {
                errors.push(DeriveError::Unmarshalable {
                    class: class_name.clone(),
                    member: method.name.clone(),
                });
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
    }

    let mut directives = Vec::new();

    // Hosts never instantiate abstract classes, so neither lifecycle
    // wrapper applies to them
    if !decl.is_abstract {
        let params = fields
            .iter()
            .map(|field| FieldArg {
                name: accessor_base(field),
                ty: field.ty.clone(),
            })
            .collect();
        directives.push(Directive::Constructor {
            name: profile.syntax.ctor_name.clone(),
            params,
        });

        if caps.supports_destructors {
            directives.push(Directive::Destructor {
                name: profile.syntax.dtor_name.clone(),
            });
        }
    }

    for field in &fields {
        let base = accessor_base(field);
        directives.push(Directive::Accessor {
            field: field.name.clone(),
            reader: format!("get_{base}"),
            writer: format!("set_{base}"),
            ty: field.ty.clone(),
            doc: doc_payload(&field.doc, caps),
        });
    }

    for method in methods {
        if method.is_abstract {
            continue;
        }
        let alias = method
            .alias
            .clone()
            .unwrap_or_else(|| host_name(&method.name));
        directives.push(Directive::Method {
            method: method.name.clone(),
            alias,
            params: method.params.clone(),
            returns: method.returns.clone(),
            implemented_in: method.origin.provider(&class_name).to_string(),
            expand_defaults: caps.supports_default_args,
            doc: doc_payload(&method.doc, caps),
        });
    }

    Ok(BindingSpec {
        class_name,
        host: profile.name.clone(),
        kind: profile.kind,
        syntax: profile.syntax.clone(),
        class_doc: doc_payload(&decl.doc, caps),
        directives,
    })
}

/// Whether accessors are generated for `field`.
fn is_bound_field(field: &FieldDecl) -> bool {
    field.visibility != Visibility::Private || field.bound
}

/// Host-facing base name of a field: explicit alias, else snake_case.
fn accessor_base(field: &FieldDecl) -> String {
    match &field.alias {
        Some(alias) => alias.clone(),
        None => host_name(&field.name),
    }
}

fn doc_payload(doc: &Option<String>, caps: &HostCaps) -> Option<String> {
    if caps.supports_doc_blocks {
        doc.clone()
    } else {
        None
    }
}
