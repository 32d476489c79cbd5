//! Effective method set computation
//!
//! The resolver walks the class graph parents-first. Each class starts
//! from a copy of its parent's effective set and merges its own
//! declarations on top, keyed by (name, arity): a matching key
//! replaces the inherited entry in place, which keeps ancestor slot
//! ordering stable, and a new key appends in declaration order.

use crate::error::ResolveError;
use ferrule_model::{ClassGraph, ClassId, ClassView, MethodDecl, ParamDecl, TypeTag};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Where an effective method entry came from, relative to one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodOrigin {
    /// Inherited untouched from an ancestor
    Inherited {
        /// Ancestor whose declaration the entry reflects
        from: String,
    },
    /// Replaces an entry previously provided by an ancestor
    Overridden {
        /// Ancestor whose entry was replaced
        declared_in: String,
        /// Class providing the replacement (the viewed class)
        implemented_in: String,
    },
    /// First introduced by the viewed class
    Fresh,
}

impl MethodOrigin {
    /// Class whose declaration stands behind the entry.
    ///
    /// `owner` is the class the effective set belongs to; it is the
    /// answer for `Fresh` and `Overridden` entries.
    pub fn provider<'a>(&'a self, owner: &'a str) -> &'a str {
        match self {
            MethodOrigin::Fresh => owner,
            MethodOrigin::Inherited { from } => from,
            MethodOrigin::Overridden { implemented_in, .. } => implemented_in,
        }
    }
}

/// One entry of a class's effective method set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveMethod {
    /// Declared method name
    pub name: String,
    /// Parameters of the effective signature
    pub params: Vec<ParamDecl>,
    /// Return type of the effective signature
    pub returns: TypeTag,
    /// Host-facing alias, inherited unless re-aliased by an override
    pub alias: Option<String>,
    /// Whether subclasses may override the entry
    pub is_virtual: bool,
    /// Whether the entry still lacks an implementation
    pub is_abstract: bool,
    /// Whether further overrides are forbidden
    pub is_final: bool,
    /// Documentation, inherited unless the override carries its own
    pub doc: Option<String>,
    /// Relationship of the entry to the viewed class
    pub origin: MethodOrigin,
}

impl EffectiveMethod {
    /// Number of parameters of the effective signature.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Effective method sets for every class of one graph.
#[derive(Debug)]
pub struct ResolvedMethods {
    sets: Vec<Vec<EffectiveMethod>>,
}

impl ResolvedMethods {
    /// Effective methods of `id`, in stable slot order: ancestor slots
    /// first (root to nearest parent), then the class's own methods in
    /// declaration order.
    pub fn methods(&self, id: ClassId) -> &[EffectiveMethod] {
        &self.sets[id.index()]
    }
}

/// Resolver - computes effective method sets over a frozen class graph.
///
/// Requires the graph's parents-first iteration order: a class is only
/// merged once its full ancestor chain has been.
pub struct MethodResolver<'g> {
    graph: &'g ClassGraph,
}

impl<'g> MethodResolver<'g> {
    /// Create a resolver over `graph`.
    pub fn new(graph: &'g ClassGraph) -> Self {
        MethodResolver { graph }
    }

    /// Compute effective method sets for every class.
    ///
    /// Semantic errors are collected across the whole graph before
    /// reporting. Descendants of a failed class are skipped without a
    /// second report; they are not independent of the broken ancestor.
    pub fn resolve_all(self) -> Result<ResolvedMethods, Vec<ResolveError>> {
        let mut errors = Vec::new();
        let mut sets: Vec<Vec<EffectiveMethod>> = vec![Vec::new(); self.graph.len()];
        let mut failed: FxHashSet<ClassId> = FxHashSet::default();

        for node in self.graph.ordered() {
            let id = node.id();

            if let Some(parent) = node.parent() {
                if failed.contains(&parent) {
                    failed.insert(id);
                    continue;
                }
            }

            let inherited = match node.parent() {
                Some(parent) => sets[parent.index()].clone(),
                None => Vec::new(),
            };

            match self.merge_class(self.graph.view(id), inherited) {
                Ok(set) => sets[id.index()] = set,
                Err(mut class_errors) => {
                    errors.append(&mut class_errors);
                    failed.insert(id);
                }
            }
        }

        if errors.is_empty() {
            Ok(ResolvedMethods { sets })
        } else {
            Err(errors)
        }
    }

    /// Merge one class's declarations over its inherited set.
    fn merge_class(
        &self,
        view: ClassView<'g>,
        inherited: Vec<EffectiveMethod>,
    ) -> Result<Vec<EffectiveMethod>, Vec<ResolveError>> {
        let mut errors = Vec::new();
        let class_name = view.name().to_string();
        let decl = view.decl();

        // Entries copied from the parent are plain inheritance until an
        // override below says otherwise
        let mut set = inherited;
        if let Some(parent) = view.parent_name() {
            for entry in &mut set {
                let from = entry.origin.provider(parent).to_string();
                entry.origin = MethodOrigin::Inherited { from };
            }
        }

        for method in &decl.methods {
            if method.is_abstract && method.is_final {
                errors.push(ResolveError::AbstractFinalMethod {
                    class: class_name.clone(),
                    method: method.name.clone(),
                });
                continue;
            }

            let slot = set
                .iter()
                .position(|e| e.name == method.name && e.arity() == method.arity());

            match slot {
                Some(pos) => {
                    if let Err(err) = self.check_override(&class_name, method, &set[pos]) {
                        errors.push(err);
                        continue;
                    }

                    // In-class duplicates are rejected at graph assembly,
                    // so the replaced slot always came from an ancestor
                    let declared_in = set[pos].origin.provider(&class_name).to_string();
                    let inherited_alias = set[pos].alias.clone();
                    let inherited_doc = set[pos].doc.clone();

                    set[pos] = EffectiveMethod {
                        name: method.name.clone(),
                        params: method.params.clone(),
                        returns: method.returns.clone(),
                        alias: method.alias.clone().or(inherited_alias),
                        is_virtual: method.is_virtual,
                        is_abstract: method.is_abstract,
                        is_final: method.is_final,
                        doc: method.doc.clone().or(inherited_doc),
                        origin: MethodOrigin::Overridden {
                            declared_in,
                            implemented_in: class_name.clone(),
                        },
                    };
                }
                None => {
                    set.push(EffectiveMethod {
                        name: method.name.clone(),
                        params: method.params.clone(),
                        returns: method.returns.clone(),
                        alias: method.alias.clone(),
                        is_virtual: method.is_virtual,
                        is_abstract: method.is_abstract,
                        is_final: method.is_final,
                        doc: method.doc.clone(),
                        origin: MethodOrigin::Fresh,
                    });
                }
            }
        }

        // A concrete class must leave no abstract entry behind
        if !decl.is_abstract {
            for entry in &set {
                if entry.is_abstract {
                    errors.push(ResolveError::UnimplementedAbstract {
                        class: class_name.clone(),
                        method: entry.name.clone(),
                        declared_in: entry.origin.provider(&class_name).to_string(),
                    });
                }
            }
        }

        // Redeclared ancestor fields would collide in the generated
        // accessor namespace
        for field in &decl.fields {
            if let Some(ancestor) = view
                .ancestors()
                .find(|node| node.decl().fields.iter().any(|f| f.name == field.name))
            {
                errors.push(ResolveError::ShadowedField {
                    class: class_name.clone(),
                    field: field.name.clone(),
                    ancestor: ancestor.name().to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(set)
        } else {
            Err(errors)
        }
    }

    /// Validate that `method` may replace `existing`.
    fn check_override(
        &self,
        class: &str,
        method: &MethodDecl,
        existing: &EffectiveMethod,
    ) -> Result<(), ResolveError> {
        let parent = existing.origin.provider(class).to_string();

        if existing.is_final {
            return Err(ResolveError::OverrideOfFinal {
                class: class.to_string(),
                method: method.name.clone(),
                parent,
            });
        }
        if !existing.is_virtual && !existing.is_abstract {
            return Err(ResolveError::OverrideOfNonVirtual {
                class: class.to_string(),
                method: method.name.clone(),
                parent,
            });
        }
        if method.is_abstract && !existing.is_abstract {
            return Err(ResolveError::IncompatibleOverride {
                class: class.to_string(),
                method: method.name.clone(),
                parent,
                detail: "an implemented method cannot be re-abstracted".to_string(),
            });
        }

        // Parameter types are invariant
        for (own, theirs) in method.params.iter().zip(existing.params.iter()) {
            if own.ty != theirs.ty {
                return Err(ResolveError::IncompatibleOverride {
                    class: class.to_string(),
                    method: method.name.clone(),
                    parent,
                    detail: format!(
                        "parameter `{}` is {} but the overridden method takes {}",
                        own.name, own.ty, theirs.ty
                    ),
                });
            }
        }

        // Returns match exactly, or narrow to a descendant class
        if !self.return_compatible(&method.returns, &existing.returns) {
            return Err(ResolveError::IncompatibleOverride {
                class: class.to_string(),
                method: method.name.clone(),
                parent,
                detail: format!(
                    "returns {} but the overridden method returns {}",
                    method.returns, existing.returns
                ),
            });
        }

        Ok(())
    }

    fn return_compatible(&self, own: &TypeTag, inherited: &TypeTag) -> bool {
        if own == inherited {
            return true;
        }
        match (own, inherited) {
            (TypeTag::Object(sub), TypeTag::Object(sup)) => {
                self.graph.derives_from_names(sub, sup)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrule_model::{ClassDecl, ClassGraph, ClassGraphBuilder};

    fn class(name: &str, parent: Option<&str>) -> ClassDecl {
        ClassDecl {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            is_abstract: false,
            is_final: false,
            doc: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    fn virtual_method(name: &str) -> MethodDecl {
        MethodDecl {
            name: name.to_string(),
            params: Vec::new(),
            returns: TypeTag::Void,
            is_virtual: true,
            is_final: false,
            is_abstract: false,
            alias: None,
            doc: None,
        }
    }

    fn graph_of(classes: Vec<ClassDecl>) -> ClassGraph {
        let mut builder = ClassGraphBuilder::new();
        for decl in classes {
            builder.add_class(decl).unwrap();
        }
        builder.resolve().unwrap()
    }

    #[test]
    fn test_override_replaces_in_place() {
        let mut animal = class("Animal", None);
        animal.methods.push(virtual_method("speak"));
        animal.methods.push(virtual_method("sleep"));

        let mut dog = class("Dog", Some("Animal"));
        dog.methods.push(virtual_method("speak"));

        let graph = graph_of(vec![animal, dog]);
        let resolved = MethodResolver::new(&graph).resolve_all().unwrap();

        let set = resolved.methods(graph.id_of("Dog").unwrap());
        let names: Vec<&str> = set.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["speak", "sleep"]);
        assert_eq!(
            set[0].origin,
            MethodOrigin::Overridden {
                declared_in: "Animal".to_string(),
                implemented_in: "Dog".to_string(),
            }
        );
        assert_eq!(
            set[1].origin,
            MethodOrigin::Inherited {
                from: "Animal".to_string()
            }
        );
    }

    #[test]
    fn test_overloads_occupy_distinct_slots() {
        let mut greeter = class("Greeter", None);
        greeter.methods.push(virtual_method("greet"));
        let mut with_arg = virtual_method("greet");
        with_arg.params.push(ParamDecl {
            name: "name".to_string(),
            ty: TypeTag::Str,
            default: None,
        });
        greeter.methods.push(with_arg);

        let graph = graph_of(vec![greeter]);
        let resolved = MethodResolver::new(&graph).resolve_all().unwrap();
        let set = resolved.methods(graph.id_of("Greeter").unwrap());
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].arity(), 0);
        assert_eq!(set[1].arity(), 1);
    }

    #[test]
    fn test_descendants_of_failed_class_skipped() {
        let mut animal = class("Animal", None);
        let mut locked = virtual_method("speak");
        locked.is_final = true;
        animal.methods.push(locked);

        let mut dog = class("Dog", Some("Animal"));
        dog.methods.push(virtual_method("speak"));

        // Puppy would re-trip the same override error if it were not
        // skipped as a descendant of the broken class
        let mut puppy = class("Puppy", Some("Dog"));
        puppy.methods.push(virtual_method("speak"));

        let graph = graph_of(vec![animal, dog, puppy]);
        let errors = MethodResolver::new(&graph).resolve_all().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ResolveError::OverrideOfFinal { class, .. } if class == "Dog"
        ));
    }
}
