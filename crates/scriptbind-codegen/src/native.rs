//! The native-side registration unit renderer.
//!
//! Emits one self-contained C++ source unit: fixed includes, deduced
//! per-class includes, then a registration function containing one
//! registration chain per selected class. Multi-overload method groups get
//! disambiguation directives ahead of their chain, binding each overload's
//! exact signature to a generated identifier derived from the class's
//! qualified name and the group's stable index.

use rustc_hash::FxHashSet;

use scriptbind_core::{Callable, ClassNode, GeneratorConfig, TypeGraph};
use scriptbind_registry::{MethodGroup, OverloadPlanner, PlannedOverload, SelectedClass, UsageRegistry};

use crate::writer::CodeWriter;

const DEFAULT_REGISTRATION_FN: &str = "register_all_bindings";

/// Renders the registration descriptor for the native side.
pub struct NativeBindingRenderer<'a> {
    graph: &'a TypeGraph,
    config: &'a GeneratorConfig,
}

impl<'a> NativeBindingRenderer<'a> {
    pub fn new(graph: &'a TypeGraph, config: &'a GeneratorConfig) -> Self {
        Self { graph, config }
    }

    /// Render the full unit for a frozen registry.
    pub fn render(&self, registry: &UsageRegistry) -> String {
        let mut w = CodeWriter::new();
        w.line("// Generated binding registration unit. Do not edit by hand.");
        for include in &self.config.fixed_includes {
            w.line(&format!("#include \"{include}\""));
        }
        for include in self.rewritten_headers(registry) {
            w.line(&format!("#include \"{include}\""));
        }
        w.blank();

        let fn_name = self
            .config
            .registration_fn
            .as_deref()
            .unwrap_or(DEFAULT_REGISTRATION_FN);
        w.line(&format!("void {fn_name}(bind::Registrar& registrar) {{"));
        w.indent();

        let mut first = true;
        for sel in registry.classes() {
            let class = self.graph.class(sel.id());
            if self.config.is_handwritten(&class.qualified_name.to_string()) {
                continue;
            }
            // Abstract with no destructor: declarable only, never registered.
            if class.is_interface_like() {
                continue;
            }
            if !first {
                w.blank();
            }
            first = false;
            self.render_class(&mut w, registry, sel, class);
        }

        w.dedent();
        w.line("}");
        w.finish()
    }

    /// Deduced headers rewritten against the configured include roots:
    /// first matching prefix wins, results de-duplicated in order.
    fn rewritten_headers(&self, registry: &UsageRegistry) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut headers = Vec::new();
        for path in registry.deduced_headers() {
            let rewritten = self.strip_root(&path);
            if seen.insert(rewritten.clone()) {
                headers.push(rewritten);
            }
        }
        headers
    }

    fn strip_root(&self, path: &str) -> String {
        for root in &self.config.include_roots {
            let root = root.replace('\\', "/");
            if let Some(rest) = path.strip_prefix(&root) {
                return rest.trim_start_matches('/').to_string();
            }
        }
        path.to_string()
    }

    fn render_class(
        &self,
        w: &mut CodeWriter,
        registry: &UsageRegistry,
        sel: &SelectedClass,
        class: &ClassNode,
    ) {
        let plan = OverloadPlanner::plan(self.graph, sel, registry.rules());
        let cpp = class.qualified_name.to_string();
        let ident_base = cpp.replace("::", "_");

        w.line(&format!("BIND_TYPE_DECL({cpp});"));
        for group in plan.methods.iter().filter(|g| g.is_overloaded()) {
            for (pos, overload) in group.overloads.iter().enumerate() {
                w.line(&self.overload_directive(&cpp, &ident_base, group, pos, overload));
            }
        }

        w.line(&format!("bind::Class<{cpp}>(\"{cpp}\")"));
        w.indent();

        if let Some(base_id) = sel.base() {
            let base = self.graph.class(base_id).qualified_name.to_string();
            w.line(&format!(".Extends<{base}>()"));
        }

        match plan.ctors.as_slice() {
            [] => {}
            [only] => {
                let types = param_types(only.callable);
                match default_args(only) {
                    Some(defaults) => w.line(&format!(
                        ".Constructor<{types}>(bind::DefaultArgs({defaults}))"
                    )),
                    None => w.line(&format!(".Constructor<{types}>()")),
                }
            }
            many => {
                let signatures: Vec<String> = many
                    .iter()
                    .map(|c| format!("{cpp}({})", param_types(c.callable)))
                    .collect();
                w.line(&format!(
                    ".Constructor(bind::Constructors<{}>())",
                    signatures.join(", ")
                ));
            }
        }

        for group in &plan.methods {
            let verb = if group.is_static() { "Function" } else { "Method" };
            if group.is_overloaded() {
                let idents: Vec<String> = (0..group.overloads.len())
                    .map(|pos| format!("{ident_base}_{}_{pos}", group.index))
                    .collect();
                w.line(&format!(
                    ".{verb}(\"{}\", {})",
                    group.name,
                    idents.join(", ")
                ));
            } else {
                let overload = &group.overloads[0];
                match default_args(overload) {
                    Some(defaults) => w.line(&format!(
                        ".{verb}(\"{name}\", &{cpp}::{name}, bind::DefaultArgs({defaults}))",
                        name = group.name
                    )),
                    None => w.line(&format!(
                        ".{verb}(\"{name}\", &{cpp}::{name})",
                        name = group.name
                    )),
                }
            }
        }

        for field in &plan.fields {
            let accessor = match (field.is_static(), field.is_readonly()) {
                (true, true) => "StaticConst",
                (true, false) => "StaticField",
                (false, true) => "Const",
                (false, false) => "Field",
            };
            w.line(&format!(
                ".{accessor}(\"{name}\", &{cpp}::{name})",
                name = field.name
            ));
        }

        w.line(".Install(registrar);");
        w.dedent();
    }

    fn overload_directive(
        &self,
        cpp: &str,
        ident_base: &str,
        group: &MethodGroup,
        pos: usize,
        overload: &PlannedOverload,
    ) -> String {
        let callable = overload.callable;
        let types = param_types(callable);
        let signature = if callable.is_static() {
            format!("{} (*)({types})", callable.ret.name())
        } else {
            let constness = if callable.is_const() { " const" } else { "" };
            format!("{} ({cpp}::*)({types}){constness}", callable.ret.name())
        };
        let cast = format!("static_cast<{signature}>(&{cpp}::{})", callable.name);
        let ident = format!("{ident_base}_{}_{pos}", group.index);
        match default_args(overload) {
            Some(defaults) => format!(
                "const auto {ident} = bind::Overload({cast}, bind::DefaultArgs({defaults}));"
            ),
            None => format!("const auto {ident} = bind::Overload({cast});"),
        }
    }
}

fn param_types(callable: &Callable) -> String {
    callable
        .params
        .iter()
        .map(|p| p.ty.name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Defaults in their allowed trailing-run form, or `None` when nothing
/// renders.
fn default_args(overload: &PlannedOverload) -> Option<String> {
    if overload.defaults == 0 {
        return None;
    }
    let exprs: Vec<&str> = overload
        .defaulted_params()
        .iter()
        .filter_map(|p| p.default.as_ref())
        .map(|d| d.native.as_str())
        .collect();
    Some(exprs.join(", "))
}
