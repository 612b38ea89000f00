//! The scripting-side declaration stub renderer.
//!
//! Emits TypeScript-flavoured ambient declarations, one namespace wrapper
//! per class so strict discovery order survives even when classes of the
//! same namespace are discovered apart (ambient namespaces reopen).

use scriptbind_core::{ClassNode, GeneratorConfig, QualifiedName, TypeGraph, TypeRef, TypeRefKind};
use scriptbind_registry::{OverloadPlanner, PlannedOverload, SelectedClass, UsageRegistry};

use crate::writer::CodeWriter;

/// Renders the type-declaration stub for the scripting side.
pub struct DeclarationRenderer<'a> {
    graph: &'a TypeGraph,
    config: &'a GeneratorConfig,
}

impl<'a> DeclarationRenderer<'a> {
    pub fn new(graph: &'a TypeGraph, config: &'a GeneratorConfig) -> Self {
        Self { graph, config }
    }

    /// Render the full stub for a frozen registry.
    pub fn render(&self, registry: &UsageRegistry) -> String {
        let mut w = CodeWriter::new();
        w.line("// Generated declaration stub. Do not edit by hand.");
        for sel in registry.classes() {
            let class = self.graph.class(sel.id());
            if self.config.is_handwritten(&class.qualified_name.to_string()) {
                continue;
            }
            w.blank();
            self.render_class(&mut w, registry, sel, class);
        }
        w.finish()
    }

    /// The declaration-side dotted name, after configured renames.
    fn decl_name(&self, qname: &QualifiedName) -> String {
        self.config
            .decl_renames
            .get(&qname.to_string())
            .cloned()
            .unwrap_or_else(|| qname.dotted())
    }

    fn render_class(
        &self,
        w: &mut CodeWriter,
        registry: &UsageRegistry,
        sel: &SelectedClass,
        class: &ClassNode,
    ) {
        let dotted = self.decl_name(&class.qualified_name);
        let (namespace, simple) = match dotted.rsplit_once('.') {
            Some((ns, name)) => (Some(ns.to_string()), name.to_string()),
            None => (None, dotted),
        };

        let heritage = match sel.base() {
            Some(base_id) => {
                let base = self.graph.class(base_id);
                // Interface-like bases are never registered for
                // construction, so subclasses declare them as contracts.
                let keyword = if base.is_interface_like() {
                    "implements"
                } else {
                    "extends"
                };
                format!(" {keyword} {}", self.decl_name(&base.qualified_name))
            }
            None => String::new(),
        };

        match namespace {
            Some(ns) => {
                w.line(&format!("declare namespace {ns} {{"));
                w.indent();
                w.line(&format!("class {simple}{heritage} {{"));
                w.indent();
                self.render_body(w, registry, sel);
                w.dedent();
                w.line("}");
                w.dedent();
                w.line("}");
            }
            None => {
                w.line(&format!("declare class {simple}{heritage} {{"));
                w.indent();
                self.render_body(w, registry, sel);
                w.dedent();
                w.line("}");
            }
        }
    }

    fn render_body(&self, w: &mut CodeWriter, registry: &UsageRegistry, sel: &SelectedClass) {
        let plan = OverloadPlanner::plan(self.graph, sel, registry.rules());

        for ctor in &plan.ctors {
            w.line(&format!("constructor({});", self.params(registry, ctor)));
        }
        for group in &plan.methods {
            for overload in &group.overloads {
                let modifier = if overload.callable.is_static() {
                    "static "
                } else {
                    ""
                };
                w.line(&format!(
                    "{modifier}{}({}): {};",
                    member_name(group.name),
                    self.params(registry, overload),
                    self.ts_type(registry, &overload.callable.ret)
                ));
            }
        }
        for field in &plan.fields {
            let modifier = match (field.is_static(), field.is_readonly()) {
                (true, true) => "static readonly ",
                (true, false) => "static ",
                (false, true) => "readonly ",
                (false, false) => "",
            };
            w.line(&format!(
                "{modifier}{}: {};",
                member_name(&field.name),
                self.ts_type(registry, &field.ty)
            ));
        }
        // Deterministic resource release from the scripting side.
        w.line("dispose(): void;");
    }

    /// Parameter list with the trailing defaulted run rendered optional.
    fn params(&self, registry: &UsageRegistry, overload: &PlannedOverload) -> String {
        let params = &overload.callable.params;
        let first_optional = params.len() - overload.defaults;
        params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if p.ty.is_variadic() {
                    // Spread marker instead of the collision-avoidance prefix.
                    format!("...{}: any[]", p.name)
                } else if i >= first_optional {
                    // The declaration-side default renders as a hint; the
                    // value itself lives on the native side.
                    let hint = p
                        .default
                        .as_ref()
                        .map(|d| format!(" /* = {} */", d.decl))
                        .unwrap_or_default();
                    format!("_{}?: {}{hint}", p.name, self.ts_type(registry, &p.ty))
                } else {
                    format!("_{}: {}", p.name, self.ts_type(registry, &p.ty))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn ts_type(&self, registry: &UsageRegistry, ty: &TypeRef) -> String {
        match ty.kind() {
            TypeRefKind::Variadic => "any[]".to_string(),
            TypeRefKind::Primitive => primitive_ts(ty.name()).to_string(),
            TypeRefKind::Class => match registry.resolve_qualified(ty.name()) {
                Some(id) if registry.is_selected(id) => {
                    self.decl_name(&self.graph.class(id).qualified_name)
                }
                _ => "any".to_string(),
            },
        }
    }
}

/// Member names that are not plain identifiers use indexed-access form.
fn member_name(name: &str) -> String {
    if is_plain_ident(name) {
        name.to_string()
    } else {
        format!("[\"{name}\"]")
    }
}

fn is_plain_ident(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn primitive_ts(name: &str) -> &'static str {
    match name {
        "void" => "void",
        "bool" => "boolean",
        "std::string" | "string" | "char*" | "const char*" => "string",
        "char" | "short" | "int" | "long" | "long long" | "float" | "double" | "size_t"
        | "unsigned" | "unsigned char" | "unsigned short" | "unsigned int" | "unsigned long"
        | "int8_t" | "int16_t" | "int32_t" | "int64_t" | "uint8_t" | "uint16_t" | "uint32_t"
        | "uint64_t" => "number",
        _ => "any",
    }
}
