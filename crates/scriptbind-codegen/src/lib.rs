//! Renderers for the two generated artifacts.
//!
//! Both renderers iterate the registry's selected classes in discovery
//! order and plan members through the same [`OverloadPlanner`], so the
//! native registration unit and the declaration stub stay structurally
//! consistent with each other and across runs.
//!
//! [`OverloadPlanner`]: scriptbind_registry::OverloadPlanner

mod decl;
mod native;
mod writer;

pub use decl::DeclarationRenderer;
pub use native::NativeBindingRenderer;
pub use writer::CodeWriter;
