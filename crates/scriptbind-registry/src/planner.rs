//! Overload grouping and default-argument reconciliation.
//!
//! Groups a selected class's callable members into ordered overload sets
//! and computes, per overload, how many trailing parameters keep their
//! default when rendered into a calling convention that only supports
//! suffix-positioned defaults. Both renderers plan through this module,
//! which is what keeps generated identifiers and indices consistent
//! between the two artifacts.

use scriptbind_core::{Callable, ExclusionRules, Field, Param, TypeGraph};

use crate::registry::SelectedClass;

/// Length of the defaulted suffix of a parameter list.
///
/// Scans from last to first: a parameter keeps its default only if every
/// parameter after it also has one. The first parameter without a default
/// permanently stops earlier defaults from applying - they are silently
/// dropped from rendered output, never diagnosed.
pub fn default_suffix_len(params: &[Param]) -> usize {
    params
        .iter()
        .rev()
        .take_while(|p| p.default.is_some())
        .count()
}

/// One overload with its rendered-default information.
#[derive(Debug, Clone, Copy)]
pub struct PlannedOverload<'g> {
    pub callable: &'g Callable,
    /// Number of trailing parameters whose defaults render.
    pub defaults: usize,
}

impl<'g> PlannedOverload<'g> {
    fn plan(callable: &'g Callable) -> Self {
        Self {
            callable,
            defaults: default_suffix_len(&callable.params),
        }
    }

    /// The parameters whose defaults render, in declaration order.
    pub fn defaulted_params(&self) -> &'g [Param] {
        let params = &self.callable.params;
        &params[params.len() - self.defaults..]
    }
}

/// Same-named methods of one class, grouped for disambiguated
/// registration. The index is stable within the class (first-occurrence
/// order among selected methods) and is what generated identifiers embed.
#[derive(Debug)]
pub struct MethodGroup<'g> {
    pub name: &'g str,
    pub index: usize,
    pub overloads: Vec<PlannedOverload<'g>>,
}

impl MethodGroup<'_> {
    pub fn is_overloaded(&self) -> bool {
        self.overloads.len() > 1
    }

    /// Whether the group registers as a static function.
    pub fn is_static(&self) -> bool {
        self.overloads
            .first()
            .is_some_and(|o| o.callable.is_static())
    }
}

/// A selected class's members, planned for rendering.
#[derive(Debug, Default)]
pub struct ClassPlan<'g> {
    /// Selected constructors (the implicit constructor overload set).
    pub ctors: Vec<PlannedOverload<'g>>,
    /// Method groups in first-occurrence order.
    pub methods: Vec<MethodGroup<'g>>,
    /// Selected fields in declaration order.
    pub fields: Vec<&'g Field>,
}

/// Plans one class's selected members into overload sets.
pub struct OverloadPlanner;

impl OverloadPlanner {
    /// Build the plan for a selected class.
    ///
    /// Excluded members (`Type::member`) are dropped here, uniformly for
    /// both renderers. Constructors are part of the plan only under
    /// full-member selection and never for abstract classes, which cannot
    /// be instantiated.
    pub fn plan<'g>(
        graph: &'g TypeGraph,
        selected: &SelectedClass,
        rules: &ExclusionRules,
    ) -> ClassPlan<'g> {
        let class = graph.class(selected.id());
        let qualified = class.qualified_name.to_string();
        let mut plan = ClassPlan::default();

        if selected.has_all_members() && !class.is_abstract {
            plan.ctors = class.ctors.iter().map(PlannedOverload::plan).collect();
        }

        for method in &class.methods {
            if !selected.is_member_selected(&method.name)
                || rules.is_member_excluded(&qualified, &method.name)
            {
                continue;
            }
            match plan.methods.iter_mut().find(|g| g.name == method.name) {
                Some(group) => group.overloads.push(PlannedOverload::plan(method)),
                None => {
                    let index = plan.methods.len();
                    plan.methods.push(MethodGroup {
                        name: &method.name,
                        index,
                        overloads: vec![PlannedOverload::plan(method)],
                    });
                }
            }
        }

        for field in &class.fields {
            if selected.is_member_selected(&field.name)
                && !rules.is_member_excluded(&qualified, &field.name)
            {
                plan.fields.push(field);
            }
        }

        plan
    }
}
