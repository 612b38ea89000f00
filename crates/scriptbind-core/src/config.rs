//! Generator configuration, consumed as plain data.
//!
//! Loading (files, CLI) is the caller's concern; this module only defines
//! the shapes the pipeline reads.

use rustc_hash::{FxHashMap, FxHashSet};

/// Which classes seed the resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Bind everything reachable by containment.
    #[default]
    All,
    /// Bind exactly these selector signatures (`Type::member`, `Type::*`),
    /// expanded to their type closure.
    Explicit(Vec<String>),
}

/// Exclusion sets consulted during classification and member selection.
///
/// Namespaces match the exact `::`-joined namespace path, types the
/// qualified class name, members the `Type::member` form.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    pub namespaces: FxHashSet<String>,
    pub types: FxHashSet<String>,
    pub members: FxHashSet<String>,
}

impl ExclusionRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespaces.insert(ns.into());
        self
    }

    pub fn exclude_type(mut self, qualified: impl Into<String>) -> Self {
        self.types.insert(qualified.into());
        self
    }

    pub fn exclude_member(mut self, qualified_member: impl Into<String>) -> Self {
        self.members.insert(qualified_member.into());
        self
    }

    pub fn is_namespace_excluded(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    pub fn is_type_excluded(&self, qualified: &str) -> bool {
        self.types.contains(qualified)
    }

    pub fn is_member_excluded(&self, type_qualified: &str, member: &str) -> bool {
        self.members
            .contains(&format!("{type_qualified}::{member}"))
    }
}

/// Everything the driver needs besides the graph and the classifier.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Seed selection strategy.
    pub selection: Selection,
    /// Exclusion sets (see [`ExclusionRules`]).
    pub exclusions: ExclusionRules,
    /// Qualified name -> declaration-side name overrides (dotted form).
    pub decl_renames: FxHashMap<String, String>,
    /// Qualified names whose bindings are written by hand; the generator
    /// emits nothing for them.
    pub handwritten: FxHashSet<String>,
    /// Header paths always included first in the registration unit.
    pub fixed_includes: Vec<String>,
    /// Include-root prefixes stripped from deduced header paths; first
    /// match wins.
    pub include_roots: Vec<String>,
    /// Override for the generated registration function's name.
    pub registration_fn: Option<String>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with everything (the default).
    pub fn select_all(mut self) -> Self {
        self.selection = Selection::All;
        self
    }

    /// Seed with an explicit selector list.
    pub fn select<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = Selection::Explicit(signatures.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_exclusions(mut self, rules: ExclusionRules) -> Self {
        self.exclusions = rules;
        self
    }

    pub fn rename_decl(mut self, qualified: impl Into<String>, target: impl Into<String>) -> Self {
        self.decl_renames.insert(qualified.into(), target.into());
        self
    }

    pub fn handwritten(mut self, qualified: impl Into<String>) -> Self {
        self.handwritten.insert(qualified.into());
        self
    }

    pub fn fixed_include(mut self, path: impl Into<String>) -> Self {
        self.fixed_includes.push(path.into());
        self
    }

    pub fn include_root(mut self, prefix: impl Into<String>) -> Self {
        self.include_roots.push(prefix.into());
        self
    }

    pub fn registration_fn(mut self, name: impl Into<String>) -> Self {
        self.registration_fn = Some(name.into());
        self
    }

    pub fn is_handwritten(&self, qualified: &str) -> bool {
        self.handwritten.contains(qualified)
    }
}
