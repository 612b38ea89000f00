//! The compiled type graph: a namespace scope tree plus a class arena.
//!
//! Uses `petgraph::DiGraph` for the namespace hierarchy, with
//! `Contains(name)` edges from parent to child scope. Declaration order is
//! kept in an explicit per-scope member list because edge iteration order
//! is not insertion order; the hierarchy edges serve lookup and path
//! reconstruction.
//!
//! The graph is built once (by the parser front-end, or by tests) and is
//! read-only afterwards.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{ClassId, ClassNode, QualifiedName};

/// Errors raised while building a type graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two classes with the same name in one scope.
    #[error("duplicate class '{0}'")]
    DuplicateClass(String),
}

/// Edge types in the scope tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScopeEdge {
    /// Parent scope contains the named child scope.
    Contains(String),
}

/// One declaration-ordered entry of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMember {
    /// A nested namespace.
    Namespace(NodeIndex),
    /// A class declared at this level.
    Class(ClassId),
}

/// Data stored in each namespace node.
#[derive(Debug, Default)]
struct ScopeData {
    /// Members in declaration order; the source of truth for walks.
    order: Vec<ScopeMember>,
    /// Classes at this level by simple name, for lookup.
    classes: FxHashMap<String, ClassId>,
}

/// An immutable, queryable tree of namespaces and classes.
pub struct TypeGraph {
    graph: DiGraph<ScopeData, ScopeEdge>,
    root: NodeIndex,
    classes: Vec<ClassNode>,
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeGraph {
    /// Create an empty graph with a global root scope.
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(ScopeData::default());
        Self {
            graph,
            root,
            classes: Vec::new(),
        }
    }

    /// The root (global) scope.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    // === Scope construction ===

    /// Get or create the namespace at `path`, creating intermediate
    /// namespaces as needed.
    pub fn namespace<S: AsRef<str>>(&mut self, path: &[S]) -> NodeIndex {
        let mut current = self.root;
        for segment in path {
            current = self.get_or_create_child(current, segment.as_ref());
        }
        current
    }

    fn get_or_create_child(&mut self, parent: NodeIndex, name: &str) -> NodeIndex {
        if let Some(child) = self.find_child(parent, name) {
            return child;
        }
        let child = self.graph.add_node(ScopeData::default());
        self.graph
            .add_edge(parent, child, ScopeEdge::Contains(name.to_string()));
        self.graph[parent].order.push(ScopeMember::Namespace(child));
        child
    }

    // === Scope lookup ===

    /// Find a child namespace by name.
    pub fn find_child(&self, parent: NodeIndex, name: &str) -> Option<NodeIndex> {
        for edge in self.graph.edges(parent) {
            let ScopeEdge::Contains(child_name) = edge.weight();
            if child_name == name {
                return Some(edge.target());
            }
        }
        None
    }

    /// Find an existing namespace by path.
    pub fn find_namespace<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeIndex> {
        let mut current = self.root;
        for segment in path {
            current = self.find_child(current, segment.as_ref())?;
        }
        Some(current)
    }

    fn find_parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .next()
            .map(|edge| edge.source())
    }

    fn scope_name(&self, node: NodeIndex) -> Option<&str> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .next()
            .map(|edge| {
                let ScopeEdge::Contains(name) = edge.weight();
                name.as_str()
            })
    }

    /// The namespace path of a scope, root-relative.
    pub fn namespace_path(&self, node: NodeIndex) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = node;
        while current != self.root {
            if let Some(name) = self.scope_name(current) {
                path.push(name.to_string());
            }
            match self.find_parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Declaration-ordered members of a scope.
    pub fn scope_order(&self, node: NodeIndex) -> &[ScopeMember] {
        &self.graph[node].order
    }

    // === Class registration ===

    /// Add a class to a namespace scope. Assigns the class's qualified
    /// name from the scope path.
    pub fn add_class(&mut self, scope: NodeIndex, mut node: ClassNode) -> Result<ClassId, GraphError> {
        if self.graph[scope].classes.contains_key(&node.name) {
            let path = self.namespace_path(scope);
            return Err(GraphError::DuplicateClass(
                QualifiedName::new(node.name.clone(), path).to_string(),
            ));
        }
        node.qualified_name = QualifiedName::new(node.name.clone(), self.namespace_path(scope));

        let id = ClassId::new(self.classes.len());
        self.graph[scope].classes.insert(node.name.clone(), id);
        self.graph[scope].order.push(ScopeMember::Class(id));
        self.classes.push(node);
        Ok(id)
    }

    /// Add a class nested inside another class. The parent acts as a
    /// namespace segment in the child's qualified name.
    pub fn add_nested_class(
        &mut self,
        parent: ClassId,
        mut node: ClassNode,
    ) -> Result<ClassId, GraphError> {
        let parent_qname = self.classes[parent.index()].qualified_name.clone();
        if self.nested_class(parent, &node.name).is_some() {
            return Err(GraphError::DuplicateClass(format!(
                "{}::{}",
                parent_qname, node.name
            )));
        }
        let mut namespace = parent_qname.namespace.clone();
        namespace.push(parent_qname.name.clone());
        node.qualified_name = QualifiedName::new(node.name.clone(), namespace);

        let id = ClassId::new(self.classes.len());
        self.classes.push(node);
        self.classes[parent.index()].nested.push(id);
        Ok(id)
    }

    // === Class access ===

    /// Get a class node by id.
    pub fn class(&self, id: ClassId) -> &ClassNode {
        &self.classes[id.index()]
    }

    /// Number of classes in the arena.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Find a class declared directly in a namespace scope.
    pub fn class_in_scope(&self, scope: NodeIndex, name: &str) -> Option<ClassId> {
        self.graph[scope].classes.get(name).copied()
    }

    /// Find a class nested directly inside another class.
    pub fn nested_class(&self, parent: ClassId, name: &str) -> Option<ClassId> {
        self.classes[parent.index()]
            .nested
            .iter()
            .copied()
            .find(|id| self.classes[id.index()].name == name)
    }

    /// Iterate all classes in arena order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassNode)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, node)| (ClassId::new(i), node))
    }
}

impl std::fmt::Debug for TypeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeGraph")
            .field("scopes", &self.graph.node_count())
            .field("classes", &self.classes.len())
            .finish()
    }
}
