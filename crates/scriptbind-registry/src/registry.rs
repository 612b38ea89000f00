//! UsageRegistry - the closure resolver.
//!
//! Owns the growing set of selected classes and, per class, the selected
//! members. Discovery order is insertion order and is the single ordering
//! both renderers consume, which is what keeps the two artifacts
//! index-consistent with each other and across runs.
//!
//! # Lifecycle
//!
//! One registry per generation run: seed it with [`add_all`] or repeated
//! [`add_selector`] calls, optionally [`expand_closure`], then hand it to
//! the renderers read-only. Selection is monotonic - member sets only grow,
//! and a class rejected by the support classifier is never re-admitted
//! within the run.
//!
//! [`add_all`]: UsageRegistry::add_all
//! [`add_selector`]: UsageRegistry::add_selector
//! [`expand_closure`]: UsageRegistry::expand_closure

use petgraph::graph::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use scriptbind_core::{
    Callable, ClassId, ExclusionRules, QualifiedName, ScopeMember, TypeGraph, TypeRef,
};

use crate::classifier::SupportClassifier;
use crate::selector::{MemberSelect, Selector};

/// One class admitted into the binding surface.
///
/// Member selection is either everything (`add_all`, wildcard selectors)
/// or a named subset; closure-admitted classes start with no members
/// selected at all, so that expansion makes referenced types *declarable*
/// without widening the explicit selection surface.
#[derive(Debug)]
pub struct SelectedClass {
    class: ClassId,
    qualified_name: QualifiedName,
    base: Option<ClassId>,
    select_all: bool,
    members: FxHashSet<String>,
}

impl SelectedClass {
    fn new(class: ClassId, qualified_name: QualifiedName) -> Self {
        Self {
            class,
            qualified_name,
            base: None,
            select_all: false,
            members: FxHashSet::default(),
        }
    }

    /// The underlying class handle.
    pub fn id(&self) -> ClassId {
        self.class
    }

    /// The class's qualified name.
    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// The resolved base class, if the base itself is selected.
    pub fn base(&self) -> Option<ClassId> {
        self.base
    }

    /// Whether every member is selected.
    pub fn has_all_members(&self) -> bool {
        self.select_all
    }

    /// Whether the named member is selected.
    pub fn is_member_selected(&self, name: &str) -> bool {
        self.select_all || self.members.contains(name)
    }
}

/// The closure-computation engine.
pub struct UsageRegistry<'g> {
    graph: &'g TypeGraph,
    classifier: &'g dyn SupportClassifier,
    rules: &'g ExclusionRules,
    /// Selected classes in discovery order.
    selected: Vec<SelectedClass>,
    /// ClassId -> position in `selected`.
    index: FxHashMap<ClassId, usize>,
    /// Classes the classifier turned down. Permanent for the run.
    rejected: FxHashSet<ClassId>,
}

impl<'g> UsageRegistry<'g> {
    /// Create a registry over a graph, a support classifier and the
    /// exclusion rules.
    pub fn new(
        graph: &'g TypeGraph,
        classifier: &'g dyn SupportClassifier,
        rules: &'g ExclusionRules,
    ) -> Self {
        Self {
            graph,
            classifier,
            rules,
            selected: Vec::new(),
            index: FxHashMap::default(),
            rejected: FxHashSet::default(),
        }
    }

    // ==========================================================================
    // Discovery
    // ==========================================================================

    /// Walk the whole namespace tree depth-first in declaration order and
    /// select every supported class with all members.
    ///
    /// This mode assumes everything reachable by containment is wanted; no
    /// expansion pass is needed afterwards. Base links are resolved at the
    /// end of the walk.
    pub fn add_all(&mut self) {
        self.add_scope(self.graph.root());
        for pos in 0..self.selected.len() {
            self.link_base(pos);
        }
    }

    fn add_scope(&mut self, scope: NodeIndex) {
        for member in self.graph.scope_order(scope).to_vec() {
            match member {
                ScopeMember::Namespace(child) => self.add_scope(child),
                ScopeMember::Class(id) => self.add_class_tree(id),
            }
        }
    }

    fn add_class_tree(&mut self, id: ClassId) {
        if self.rejected.contains(&id) || self.index.contains_key(&id) {
            return;
        }
        let Some(pos) = self.admit(id) else { return };
        self.selected[pos].select_all = true;
        // Nested classes are only reachable through a supported parent.
        for nested in self.graph.class(id).nested.clone() {
            self.add_class_tree(nested);
        }
    }

    /// Apply one selector signature (`Type::member` or `Type::*`).
    ///
    /// Unresolved type paths and unknown member names log a warning and
    /// select nothing; duplicate calls are idempotent.
    pub fn add_selector(&mut self, signature: &str) {
        let Some(selector) = Selector::parse(signature) else {
            warn!(signature, "malformed selector, ignoring");
            return;
        };
        let Some(id) = self.resolve_qualified(&selector.type_path) else {
            warn!(signature, "selector type not found, ignoring");
            return;
        };
        // Rejected classes are an expected filtering outcome, not an anomaly.
        let Some(pos) = self.admit(id) else { return };
        match selector.member {
            MemberSelect::All => self.selected[pos].select_all = true,
            MemberSelect::Named(name) => {
                let class = self.graph.class(id);
                if !class.has_member(&name) {
                    warn!(
                        class = %class.qualified_name,
                        member = %name,
                        "selector member not found"
                    );
                }
                self.selected[pos].members.insert(name);
            }
        }
    }

    /// Admit a class if the classifier accepts it. Returns its discovery
    /// position; `None` if it is (or becomes) rejected.
    fn admit(&mut self, id: ClassId) -> Option<usize> {
        if self.rejected.contains(&id) {
            return None;
        }
        if let Some(&pos) = self.index.get(&id) {
            return Some(pos);
        }
        let class = self.graph.class(id);
        if !self.classifier.is_supported(self.graph, class) {
            self.rejected.insert(id);
            return None;
        }
        let pos = self.selected.len();
        debug!(class = %class.qualified_name, "selected");
        self.selected
            .push(SelectedClass::new(id, class.qualified_name.clone()));
        self.index.insert(id, pos);
        Some(pos)
    }

    // ==========================================================================
    // Closure expansion
    // ==========================================================================

    /// Expand the current selection to its type closure.
    ///
    /// Runs a worklist over the discovery list: classes admitted mid-pass
    /// are appended and processed before the pass ends, so the result is a
    /// fixed point - a further call adds nothing. Every class is processed
    /// exactly once; the walk covers its base and the full signature
    /// surface (constructors, fields, method overloads). Types pulled in
    /// here get no members selected; only the default-value propagation
    /// rule marks members during expansion.
    pub fn expand_closure(&mut self) {
        let mut cursor = 0;
        while cursor < self.selected.len() {
            self.expand_at(cursor);
            cursor += 1;
        }
    }

    fn expand_at(&mut self, pos: usize) {
        let graph = self.graph;
        let class = graph.class(self.selected[pos].class);

        if let Some(base) = &class.base {
            if base.is_class() {
                if let Some(base_id) = self.pull(base.name()) {
                    self.selected[pos].base = Some(base_id);
                }
            }
        }
        for ctor in &class.ctors {
            self.walk_callable(ctor);
        }
        for field in &class.fields {
            self.pull_type(&field.ty);
        }
        for method in &class.methods {
            self.walk_callable(method);
        }
    }

    fn walk_callable(&mut self, callable: &Callable) {
        self.pull_type(&callable.ret);
        for param in &callable.params {
            self.pull_type(&param.ty);
            if let Some(default) = &param.default {
                if let Some((owner, member)) = default.member_ref() {
                    self.select_default_ref(&owner, &member);
                }
            }
        }
    }

    fn pull_type(&mut self, ty: &TypeRef) {
        if ty.is_class() {
            let _ = self.pull(ty.name());
        }
    }

    /// Resolve a referenced type by qualified name and admit it with no
    /// members selected.
    fn pull(&mut self, name: &str) -> Option<ClassId> {
        match self.resolve_qualified(name) {
            Some(id) => self.admit(id).map(|_| id),
            None => {
                warn!(type_name = name, "unresolved type reference");
                None
            }
        }
    }

    /// Default-value propagation: the owning type is selected and the
    /// referenced member marked, even under explicit-signature mode, so
    /// the emitted default expression never names an undeclared symbol.
    fn select_default_ref(&mut self, owner: &str, member: &str) {
        let Some(owner_id) = self.resolve_qualified(owner) else {
            warn!(owner, member, "unresolved default-value reference");
            return;
        };
        let Some(pos) = self.admit(owner_id) else { return };
        let class = self.graph.class(owner_id);
        if !class.has_member(member) {
            warn!(
                class = %class.qualified_name,
                member,
                "default-value reference to unknown member"
            );
        }
        if self
            .rules
            .is_member_excluded(&class.qualified_name.to_string(), member)
        {
            return;
        }
        self.selected[pos].members.insert(member.to_string());
    }

    /// Resolve base links without admitting anything new (add_all mode).
    fn link_base(&mut self, pos: usize) {
        let class = self.graph.class(self.selected[pos].class);
        let Some(base) = &class.base else { return };
        if !base.is_class() {
            return;
        }
        if let Some(base_id) = self.resolve_qualified(base.name()) {
            if self.index.contains_key(&base_id) {
                self.selected[pos].base = Some(base_id);
            }
        }
    }

    // ==========================================================================
    // Name resolution
    // ==========================================================================

    /// Resolve a qualified path segment by segment from the compilation
    /// root, namespaces first, then classes; a class acts as a namespace
    /// for its nested classes. Any miss resolves to `None` - callers log.
    pub fn resolve_qualified(&self, path: &str) -> Option<ClassId> {
        enum Cursor {
            Scope(NodeIndex),
            Class(ClassId),
        }
        let mut cursor = Cursor::Scope(self.graph.root());
        let mut matched = false;
        for segment in path.split("::").filter(|s| !s.is_empty()) {
            matched = true;
            cursor = match cursor {
                Cursor::Scope(scope) => {
                    if let Some(child) = self.graph.find_child(scope, segment) {
                        Cursor::Scope(child)
                    } else if let Some(id) = self.graph.class_in_scope(scope, segment) {
                        Cursor::Class(id)
                    } else {
                        return None;
                    }
                }
                Cursor::Class(id) => match self.graph.nested_class(id, segment) {
                    Some(nested) => Cursor::Class(nested),
                    None => return None,
                },
            };
        }
        match cursor {
            Cursor::Class(id) if matched => Some(id),
            _ => None,
        }
    }

    // ==========================================================================
    // Read-back
    // ==========================================================================

    /// Selected classes in discovery order.
    pub fn classes(&self) -> &[SelectedClass] {
        &self.selected
    }

    /// Whether a class is in the selected set.
    pub fn is_selected(&self, id: ClassId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of selected classes.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The graph this registry resolves against.
    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    /// The exclusion rules in effect.
    pub fn rules(&self) -> &'g ExclusionRules {
        self.rules
    }

    /// Deduced headers, discovery-ordered and de-duplicated: per class the
    /// first field's location, else first method's, else first
    /// constructor's, else the class's own declared location. Unknown
    /// locations contribute nothing.
    pub fn deduced_headers(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut headers = Vec::new();
        for sel in &self.selected {
            let loc = self.graph.class(sel.class).header_loc();
            if !loc.is_known() {
                continue;
            }
            let path = loc.normalized_path();
            if seen.insert(path.clone()) {
                headers.push(path);
            }
        }
        headers
    }
}
