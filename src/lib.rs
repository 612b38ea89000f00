//! scriptbind - binding-surface generation for a native/script interop
//! layer.
//!
//! Given a compiled class graph, a configuration and a support
//! classifier, the [`Generator`] resolves the minimal-yet-complete set of
//! classes and members to expose, then emits two synchronized artifacts:
//! a native-side registration unit and a scripting-side declaration stub.
//!
//! ```
//! use scriptbind::prelude::*;
//!
//! let mut graph = TypeGraph::new();
//! let scope = graph.namespace(&["Game"]);
//! graph
//!     .add_class(
//!         scope,
//!         ClassNode::new("Player")
//!             .with_field(Field::new("hp", TypeRef::primitive("int"))),
//!     )
//!     .unwrap();
//!
//! let config = GeneratorConfig::new().select_all();
//! let artifacts = Generator::new(&graph, &config).run();
//! assert!(artifacts.registration.contains("Game::Player"));
//! assert!(artifacts.declarations.contains("declare namespace Game"));
//! ```

mod generator;

pub use generator::{GenerateError, GeneratedArtifacts, Generator};

// Re-export the crates the public API is built from.
pub use scriptbind_codegen::{CodeWriter, DeclarationRenderer, NativeBindingRenderer};
pub use scriptbind_core::{
    Callable, ClassId, ClassNode, DefaultValue, ExclusionRules, Field, GeneratorConfig,
    GraphError, MemberTraits, Param, QualifiedName, ScopeMember, Selection, SourceLoc, TypeGraph,
    TypeRef, TypeRefKind,
};
pub use scriptbind_registry::{
    ClassPlan, MemberSelect, MethodGroup, OverloadPlanner, PlannedOverload, RuleClassifier,
    SelectedClass, Selector, SupportClassifier, UsageRegistry, default_suffix_len,
};

/// One-stop imports for generator callers.
pub mod prelude {
    pub use crate::generator::{GenerateError, GeneratedArtifacts, Generator};
    pub use scriptbind_codegen::{DeclarationRenderer, NativeBindingRenderer};
    pub use scriptbind_core::{
        Callable, ClassNode, DefaultValue, ExclusionRules, Field, GeneratorConfig, MemberTraits,
        Param, QualifiedName, Selection, SourceLoc, TypeGraph, TypeRef,
    };
    pub use scriptbind_registry::{RuleClassifier, SupportClassifier, UsageRegistry};
}
