//! Core data model for the scriptbind generator.
//!
//! This crate holds everything the closure resolver and the renderers
//! consume: the compiled type graph ([`TypeGraph`]), its class nodes and
//! members, qualified names, source locations, and the generator
//! configuration. The graph is produced by an external parser (or by test
//! code through the builder API) and is read-only for the rest of the
//! pipeline.

mod class;
mod config;
mod graph;
mod ids;
mod member;
mod qualified_name;
mod span;
mod type_ref;

pub use class::ClassNode;
pub use config::{ExclusionRules, GeneratorConfig, Selection};
pub use graph::{GraphError, ScopeMember, TypeGraph};
pub use ids::ClassId;
pub use member::{Callable, DefaultValue, Field, MemberTraits, Param};
pub use qualified_name::QualifiedName;
pub use span::SourceLoc;
pub use type_ref::{TypeRef, TypeRefKind};
