//! Class graph construction and resolution
//!
//! Declarations are collected one class at a time, then `resolve`
//! links parents, rejects cycles, and freezes the set into an
//! immutable [`ClassGraph`]. The frozen graph iterates parents before
//! children, which later passes rely on: a class is never visited
//! before its full ancestor chain.

use crate::decl::{ClassDecl, FieldDecl, MethodDecl};
use crate::error::GraphError;
use crate::name::{is_valid_class_name, is_valid_member_name};
use rustc_hash::{FxHashMap, FxHashSet};

/// Index of a class inside its [`ClassGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(u32);

impl ClassId {
    fn new(index: usize) -> Self {
        ClassId(index as u32)
    }

    /// Position of the class in declaration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A resolved class: its declaration plus hierarchy position.
///
/// Nodes are owned exclusively by the graph and never change after
/// `resolve` returns.
#[derive(Debug, Clone)]
pub struct ClassNode {
    decl: ClassDecl,
    id: ClassId,
    parent: Option<ClassId>,
    depth: u32,
}

impl ClassNode {
    /// The underlying declaration.
    pub fn decl(&self) -> &ClassDecl {
        &self.decl
    }

    /// Identifier of this class.
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Identifier of the parent class, if any.
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Distance from the hierarchy root (roots are depth 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Fully-qualified class name.
    pub fn name(&self) -> &str {
        &self.decl.name
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates class declarations before resolution.
///
/// Only the builder mutates; `resolve` consumes it and returns the
/// frozen graph, so nothing downstream can observe a half-built set.
#[derive(Debug, Default)]
pub struct ClassGraphBuilder {
    classes: Vec<ClassDecl>,
    by_name: FxHashMap<String, usize>,
}

impl ClassGraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classes added so far.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no classes have been added.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Add one class declaration.
    ///
    /// Rejects redeclared class names, malformed identifiers, and
    /// members duplicated within the class. Inheritance is not checked
    /// here; that happens in [`ClassGraphBuilder::resolve`].
    pub fn add_class(&mut self, decl: ClassDecl) -> Result<(), GraphError> {
        if !is_valid_class_name(&decl.name) {
            return Err(GraphError::InvalidName { name: decl.name });
        }
        if self.by_name.contains_key(&decl.name) {
            return Err(GraphError::DuplicateClass { name: decl.name });
        }

        let mut field_names: FxHashSet<&str> = FxHashSet::default();
        for field in &decl.fields {
            if !is_valid_member_name(&field.name) {
                return Err(GraphError::InvalidName {
                    name: field.name.clone(),
                });
            }
            if !field_names.insert(field.name.as_str()) {
                return Err(GraphError::DuplicateField {
                    class: decl.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let mut method_keys: FxHashSet<(&str, usize)> = FxHashSet::default();
        for method in &decl.methods {
            if !is_valid_member_name(&method.name) {
                return Err(GraphError::InvalidName {
                    name: method.name.clone(),
                });
            }
            if !method_keys.insert((method.name.as_str(), method.arity())) {
                return Err(GraphError::DuplicateMethod {
                    class: decl.name.clone(),
                    method: method.name.clone(),
                    arity: method.arity(),
                });
            }
        }

        self.by_name.insert(decl.name.clone(), self.classes.len());
        self.classes.push(decl);
        Ok(())
    }

    /// Resolve inheritance and freeze the graph.
    ///
    /// Links every class to its parent, rejects unknown and final
    /// parents, and detects inheritance cycles. Errors are collected
    /// across the whole set rather than stopping at the first. On
    /// success every node carries a depth and the graph exposes a
    /// deterministic parents-first iteration order.
    pub fn resolve(self) -> Result<ClassGraph, Vec<GraphError>> {
        let mut errors = Vec::new();
        let class_count = self.classes.len();

        // Link parents by name
        let mut parents: Vec<Option<usize>> = Vec::with_capacity(class_count);
        for decl in &self.classes {
            let parent = match &decl.parent {
                Some(parent_name) => match self.by_name.get(parent_name) {
                    Some(&idx) if self.classes[idx].is_final => {
                        errors.push(GraphError::ParentIsFinal {
                            class: decl.name.clone(),
                            parent: parent_name.clone(),
                        });
                        None
                    }
                    Some(&idx) => Some(idx),
                    None => {
                        errors.push(GraphError::UnknownParent {
                            class: decl.name.clone(),
                            parent: parent_name.clone(),
                        });
                        None
                    }
                },
                None => None,
            };
            parents.push(parent);
        }

        // A class sits on a cycle exactly when walking up from it
        // revisits it within the node-count bound
        let mut on_cycle = vec![false; class_count];
        for idx in 0..class_count {
            let mut cursor = parents[idx];
            for _ in 0..class_count {
                match cursor {
                    Some(p) if p == idx => {
                        on_cycle[idx] = true;
                        break;
                    }
                    Some(p) => cursor = parents[p],
                    None => break,
                }
            }
        }

        // One error per cycle, attributed to its first declared member
        let mut reported: FxHashSet<usize> = FxHashSet::default();
        for idx in 0..class_count {
            if !on_cycle[idx] || reported.contains(&idx) {
                continue;
            }
            let mut first = idx;
            let mut cursor = idx;
            loop {
                reported.insert(cursor);
                first = first.min(cursor);
                match parents[cursor] {
                    Some(p) if p == idx => break,
                    Some(p) => cursor = p,
                    None => break,
                }
            }
            errors.push(GraphError::InheritanceCycle {
                class: self.classes[first].name.clone(),
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Depths are well defined once the graph is known acyclic
        let mut depths = vec![0u32; class_count];
        for idx in 0..class_count {
            let mut depth = 0u32;
            let mut cursor = parents[idx];
            while let Some(parent_idx) = cursor {
                depth += 1;
                cursor = parents[parent_idx];
            }
            depths[idx] = depth;
        }

        // Parents-first order: increasing depth, declaration order
        // within a depth
        let mut order: Vec<usize> = (0..class_count).collect();
        order.sort_by_key(|&idx| (depths[idx], idx));

        let mut by_name = FxHashMap::default();
        let mut nodes = Vec::with_capacity(class_count);
        for (idx, decl) in self.classes.into_iter().enumerate() {
            by_name.insert(decl.name.clone(), ClassId::new(idx));
            nodes.push(ClassNode {
                decl,
                id: ClassId::new(idx),
                parent: parents[idx].map(ClassId::new),
                depth: depths[idx],
            });
        }

        Ok(ClassGraph {
            nodes,
            by_name,
            order: order.into_iter().map(ClassId::new).collect(),
        })
    }
}

// ============================================================================
// Frozen Graph
// ============================================================================

/// Immutable, fully linked class hierarchy.
///
/// The parent relation forms a forest: every tree is singly rooted and
/// acyclic, and multiple roots may coexist in one graph.
#[derive(Debug)]
pub struct ClassGraph {
    nodes: Vec<ClassNode>,
    by_name: FxHashMap<String, ClassId>,
    order: Vec<ClassId>,
}

impl ClassGraph {
    /// Number of classes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no classes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node for `id`.
    pub fn node(&self, id: ClassId) -> &ClassNode {
        &self.nodes[id.index()]
    }

    /// Look up a class by its full name.
    pub fn lookup(&self, name: &str) -> Result<&ClassNode, GraphError> {
        self.by_name
            .get(name)
            .map(|&id| &self.nodes[id.index()])
            .ok_or_else(|| GraphError::NotFound {
                name: name.to_string(),
            })
    }

    /// Identifier for a class name, if declared.
    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// Classes in parents-first order.
    pub fn ordered(&self) -> impl Iterator<Item = &ClassNode> + '_ {
        self.order.iter().map(move |&id| &self.nodes[id.index()])
    }

    /// Ancestry-aware view of one class.
    pub fn view(&self, id: ClassId) -> ClassView<'_> {
        ClassView { graph: self, id }
    }

    /// Whether `descendant` is `ancestor` or transitively extends it.
    pub fn derives_from(&self, descendant: ClassId, ancestor: ClassId) -> bool {
        let mut cursor = Some(descendant);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes[id.index()].parent;
        }
        false
    }

    /// [`ClassGraph::derives_from`] over class names; false when
    /// either name is unknown.
    pub fn derives_from_names(&self, descendant: &str, ancestor: &str) -> bool {
        match (self.id_of(descendant), self.id_of(ancestor)) {
            (Some(d), Some(a)) => self.derives_from(d, a),
            _ => false,
        }
    }
}

// ============================================================================
// Class Views
// ============================================================================

/// A class plus the ancestry context needed to answer member queries.
///
/// Views are cheap handles into a frozen graph; copy them freely.
#[derive(Clone, Copy)]
pub struct ClassView<'g> {
    graph: &'g ClassGraph,
    id: ClassId,
}

impl<'g> ClassView<'g> {
    /// The viewed class node.
    pub fn node(&self) -> &'g ClassNode {
        self.graph.node(self.id)
    }

    /// The underlying declaration.
    pub fn decl(&self) -> &'g ClassDecl {
        self.graph.node(self.id).decl()
    }

    /// Fully-qualified class name.
    pub fn name(&self) -> &'g str {
        self.graph.node(self.id).name()
    }

    /// Name of the parent class, if any.
    pub fn parent_name(&self) -> Option<&'g str> {
        self.graph
            .node(self.id)
            .parent()
            .map(|parent| self.graph.node(parent).name())
    }

    /// The graph this view points into.
    pub fn graph(&self) -> &'g ClassGraph {
        self.graph
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self) -> Ancestors<'g> {
        Ancestors {
            graph: self.graph,
            cursor: self.graph.node(self.id).parent(),
        }
    }

    /// This class followed by its ancestors up to the root.
    pub fn chain(&self) -> Ancestors<'g> {
        Ancestors {
            graph: self.graph,
            cursor: Some(self.id),
        }
    }

    /// Find a field by name on this class or any ancestor.
    pub fn find_field(&self, name: &str) -> Option<&'g FieldDecl> {
        self.chain()
            .find_map(|node| node.decl().fields.iter().find(|f| f.name == name))
    }

    /// Find a method by name and arity on this class or any ancestor.
    ///
    /// Walks nearest-first, so an override shadows the declaration it
    /// replaces.
    pub fn find_method(&self, name: &str, arity: usize) -> Option<&'g MethodDecl> {
        self.chain().find_map(|node| {
            node.decl()
                .methods
                .iter()
                .find(|m| m.name == name && m.arity() == arity)
        })
    }

    /// All fields visible on an instance, root class first.
    pub fn fields_root_first(&self) -> Vec<&'g FieldDecl> {
        let mut chain: Vec<&ClassNode> = self.chain().collect();
        chain.reverse();

        let mut fields = Vec::new();
        for node in chain {
            fields.extend(node.decl().fields.iter());
        }
        fields
    }
}

/// Iterator over a class chain toward the root.
pub struct Ancestors<'g> {
    graph: &'g ClassGraph,
    cursor: Option<ClassId>,
}

impl<'g> Iterator for Ancestors<'g> {
    type Item = &'g ClassNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.graph.node(id);
        self.cursor = node.parent();
        Some(node)
    }
}
