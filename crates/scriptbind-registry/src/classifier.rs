//! The support-classification capability.
//!
//! Whether a native type shape can be represented in the generated
//! bindings at all is decided outside the resolver. The capability is
//! injected as a value so the resolver stays testable against synthetic
//! graphs; it is consulted exactly once per class, at first discovery.

use scriptbind_core::{ClassNode, ExclusionRules, TypeGraph};

/// Decides whether a discovered class can be bound.
pub trait SupportClassifier {
    fn is_supported(&self, graph: &TypeGraph, class: &ClassNode) -> bool;
}

impl<F> SupportClassifier for F
where
    F: Fn(&TypeGraph, &ClassNode) -> bool,
{
    fn is_supported(&self, graph: &TypeGraph, class: &ClassNode) -> bool {
        self(graph, class)
    }
}

/// Default classifier: rejects classes in excluded namespaces or on the
/// excluded-type list, accepts everything else.
///
/// The namespace match is against the exact `::`-joined namespace path.
/// Callers with richer rules (incomplete types, unrepresentable layouts)
/// supply their own [`SupportClassifier`] and typically delegate to this
/// one first.
pub struct RuleClassifier<'a> {
    rules: &'a ExclusionRules,
}

impl<'a> RuleClassifier<'a> {
    pub fn new(rules: &'a ExclusionRules) -> Self {
        Self { rules }
    }
}

impl SupportClassifier for RuleClassifier<'_> {
    fn is_supported(&self, _graph: &TypeGraph, class: &ClassNode) -> bool {
        let qname = &class.qualified_name;
        !self.rules.is_namespace_excluded(&qname.namespace_string())
            && !self.rules.is_type_excluded(&qname.to_string())
    }
}
