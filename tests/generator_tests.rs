//! End-to-end tests over the full pipeline: graph -> resolution -> both
//! artifacts.

use scriptbind::prelude::*;

fn loc(path: &str, line: u32) -> SourceLoc {
    SourceLoc::new(path, line)
}

/// Namespace `N` with `class Foo { int hp; }`.
fn single_class_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Foo")
                .at(loc("src/n/Foo.h", 1))
                .with_field(Field::new("hp", TypeRef::primitive("int")).at(loc("src/n/Foo.h", 3))),
        )
        .unwrap();
    graph
}

#[test]
fn include_everything_selects_and_declares() {
    let graph = single_class_graph();
    let config = GeneratorConfig::new().select_all();
    let artifacts = Generator::new(&graph, &config).run();

    assert!(artifacts.registration.contains("bind::Class<N::Foo>(\"N::Foo\")"));
    assert!(artifacts.registration.contains(".Field(\"hp\", &N::Foo::hp)"));
    assert!(artifacts.registration.contains(".Install(registrar);"));

    assert!(artifacts.declarations.contains("declare namespace N {"));
    assert!(artifacts.declarations.contains("class Foo {"));
    assert!(artifacts.declarations.contains("hp: number;"));
    assert!(artifacts.declarations.contains("dispose(): void;"));
}

/// `N::Base` and `N::Foo : N::Base { void Bar(); int hidden; }`.
fn derived_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(n, ClassNode::new("Base").at(loc("src/n/Base.h", 1)))
        .unwrap();
    graph
        .add_class(
            n,
            ClassNode::new("Foo")
                .at(loc("src/n/Foo.h", 1))
                .with_base(TypeRef::class("N::Base"))
                .with_method(
                    Callable::new("Bar", TypeRef::primitive("void")).at(loc("src/n/Foo.h", 4)),
                )
                .with_field(
                    Field::new("hidden", TypeRef::primitive("int")).at(loc("src/n/Foo.h", 6)),
                ),
        )
        .unwrap();
    graph
}

#[test]
fn explicit_member_selector_pulls_base_with_zero_members() {
    let graph = derived_graph();
    let config = GeneratorConfig::new().select(["N::Foo::Bar"]);
    let artifacts = Generator::new(&graph, &config).run();

    // Only Bar is registered on Foo; the unselected field stays out.
    assert!(artifacts.registration.contains(".Method(\"Bar\", &N::Foo::Bar)"));
    assert!(!artifacts.registration.contains("hidden"));
    assert!(artifacts.registration.contains(".Extends<N::Base>()"));

    // The base is admitted for declarability only: a bare registration
    // block with no member clauses.
    assert!(artifacts.registration.contains(
        "bind::Class<N::Base>(\"N::Base\")\n        .Install(registrar);"
    ));
    assert_eq!(artifacts.registration.matches(".Method(").count(), 1);
    assert_eq!(artifacts.registration.matches(".Field(").count(), 0);
}

#[test]
fn wildcard_selects_members_of_one_type_only() {
    let graph = derived_graph();
    let config = GeneratorConfig::new().select(["N::Foo::*"]);
    let artifacts = Generator::new(&graph, &config).run();

    assert!(artifacts.registration.contains(".Method(\"Bar\", &N::Foo::Bar)"));
    assert!(artifacts.registration.contains(".Field(\"hidden\", &N::Foo::hidden)"));
    // Base declared but empty.
    assert!(artifacts.declarations.contains("class Base {\n        dispose(): void;\n    }"));
}

/// Constructor default referencing `N::Consts::kDefault`.
fn default_ref_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Consts").at(loc("src/n/Consts.h", 1)).with_field(
                Field::new("kDefault", TypeRef::primitive("int"))
                    .with_traits(MemberTraits::STATIC | MemberTraits::READONLY)
                    .at(loc("src/n/Consts.h", 2)),
            ),
        )
        .unwrap();
    graph
        .add_class(
            n,
            ClassNode::new("Foo").at(loc("src/n/Foo.h", 1)).with_ctor(
                Callable::new("Foo", TypeRef::class("N::Foo"))
                    .with_param(
                        Param::new("seed", TypeRef::primitive("int")).with_default(
                            DefaultValue::new("N::Consts::kDefault", "N.Consts.kDefault"),
                        ),
                    )
                    .at(loc("src/n/Foo.h", 3)),
            ),
        )
        .unwrap();
    graph
}

#[test]
fn default_expression_reference_is_propagated() {
    let graph = default_ref_graph();
    let config = GeneratorConfig::new().select(["N::Foo::*"]);
    let artifacts = Generator::new(&graph, &config).run();

    // The referenced member is registered even though N::Consts was never
    // selected by a signature.
    assert!(artifacts
        .registration
        .contains(".StaticConst(\"kDefault\", &N::Consts::kDefault)"));
    assert!(artifacts
        .registration
        .contains(".Constructor<int>(bind::DefaultArgs(N::Consts::kDefault))"));

    assert!(artifacts
        .declarations
        .contains("static readonly kDefault: number;"));
    assert!(artifacts
        .declarations
        .contains("constructor(_seed?: number /* = N.Consts.kDefault */);"));
}

/// Abstract-without-destructor base with a concrete subclass.
fn interface_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Shape")
                .with_abstract()
                .without_destructor()
                .at(loc("src/n/Shape.h", 1))
                .with_method(
                    Callable::new("area", TypeRef::primitive("double")).at(loc("src/n/Shape.h", 3)),
                ),
        )
        .unwrap();
    graph
        .add_class(
            n,
            ClassNode::new("Circle")
                .at(loc("src/n/Circle.h", 1))
                .with_base(TypeRef::class("N::Shape"))
                .with_ctor(
                    Callable::new("Circle", TypeRef::class("N::Circle"))
                        .with_param(Param::new("radius", TypeRef::primitive("float")))
                        .at(loc("src/n/Circle.h", 3)),
                ),
        )
        .unwrap();
    graph
}

#[test]
fn interface_like_class_is_declared_but_never_registered() {
    let graph = interface_graph();
    let config = GeneratorConfig::new().select_all();
    let artifacts = Generator::new(&graph, &config).run();

    // No registration block for the abstract-no-destructor shape.
    assert!(!artifacts.registration.contains("bind::Class<N::Shape>"));
    assert!(!artifacts.registration.contains("BIND_TYPE_DECL(N::Shape)"));
    // Subclasses still extend it natively, and implement it in the stub.
    assert!(artifacts.registration.contains(".Extends<N::Shape>()"));
    assert!(artifacts.declarations.contains("class Shape {"));
    assert!(artifacts.declarations.contains("area(): number;"));
    assert!(artifacts.declarations.contains("class Circle implements N.Shape {"));
    assert!(artifacts.declarations.contains("constructor(_radius: number);"));
}

#[test]
fn abstract_with_destructor_still_registers_without_ctors() {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Component")
                .with_abstract()
                .at(loc("src/n/Component.h", 1))
                .with_ctor(Callable::new("Component", TypeRef::class("N::Component")))
                .with_method(Callable::new("tick", TypeRef::primitive("void"))),
        )
        .unwrap();
    let config = GeneratorConfig::new().select_all();
    let artifacts = Generator::new(&graph, &config).run();

    assert!(artifacts.registration.contains("bind::Class<N::Component>"));
    assert!(!artifacts.registration.contains(".Constructor"));
    assert!(artifacts.registration.contains(".Method(\"tick\", &N::Component::tick)"));
}

#[test]
fn overload_groups_get_disambiguation_directives() {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Foo")
                .at(loc("src/n/Foo.h", 1))
                .with_method(
                    Callable::new("update", TypeRef::primitive("void"))
                        .with_param(Param::new("dt", TypeRef::primitive("float"))),
                )
                .with_method(
                    Callable::new("update", TypeRef::primitive("void"))
                        .with_param(Param::new("dt", TypeRef::primitive("float")))
                        .with_param(
                            Param::new("scale", TypeRef::primitive("int"))
                                .with_default(DefaultValue::literal("2")),
                        )
                        .with_traits(MemberTraits::CONST),
                )
                .with_method(
                    Callable::new("create", TypeRef::class("N::Foo"))
                        .with_traits(MemberTraits::STATIC),
                ),
        )
        .unwrap();
    let config = GeneratorConfig::new().select_all();
    let artifacts = Generator::new(&graph, &config).run();

    assert!(artifacts.registration.contains(
        "const auto N_Foo_0_0 = bind::Overload(static_cast<void (N::Foo::*)(float)>(&N::Foo::update));"
    ));
    assert!(artifacts.registration.contains(
        "const auto N_Foo_0_1 = bind::Overload(static_cast<void (N::Foo::*)(float, int) const>(&N::Foo::update), bind::DefaultArgs(2));"
    ));
    assert!(artifacts
        .registration
        .contains(".Method(\"update\", N_Foo_0_0, N_Foo_0_1)"));
    // Static single-overload method registers as a function directly.
    assert!(artifacts
        .registration
        .contains(".Function(\"create\", &N::Foo::create)"));
    // Both overloads appear as separate declaration lines.
    assert!(artifacts
        .declarations
        .contains("update(_dt: number): void;"));
    assert!(artifacts
        .declarations
        .contains("update(_dt: number, _scale?: number /* = 2 */): void;"));
    assert!(artifacts
        .declarations
        .contains("static create(): N.Foo;"));
}

#[test]
fn multiple_constructors_use_the_combinator() {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Vec2")
                .at(loc("src/n/Vec2.h", 1))
                .with_ctor(Callable::new("Vec2", TypeRef::class("N::Vec2")))
                .with_ctor(
                    Callable::new("Vec2", TypeRef::class("N::Vec2"))
                        .with_param(Param::new("x", TypeRef::primitive("float")))
                        .with_param(Param::new("y", TypeRef::primitive("float"))),
                ),
        )
        .unwrap();
    let config = GeneratorConfig::new().select_all();
    let artifacts = Generator::new(&graph, &config).run();

    assert!(artifacts.registration.contains(
        ".Constructor(bind::Constructors<N::Vec2(), N::Vec2(float, float)>())"
    ));
    assert!(artifacts.declarations.contains("constructor();"));
    assert!(artifacts
        .declarations
        .contains("constructor(_x: number, _y: number);"));
}

#[test]
fn trailing_default_suffix_law_in_both_artifacts() {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Foo").at(loc("src/n/Foo.h", 1)).with_method(
                Callable::new("jump", TypeRef::primitive("void"))
                    .with_param(Param::new("a", TypeRef::primitive("int")))
                    .with_param(
                        Param::new("b", TypeRef::primitive("int"))
                            .with_default(DefaultValue::literal("1")),
                    )
                    .with_param(Param::new("c", TypeRef::primitive("int")))
                    .with_param(
                        Param::new("d", TypeRef::primitive("int"))
                            .with_default(DefaultValue::literal("3")),
                    )
                    .with_param(
                        Param::new("e", TypeRef::primitive("int"))
                            .with_default(DefaultValue::literal("4")),
                    ),
            ),
        )
        .unwrap();
    let config = GeneratorConfig::new().select_all();
    let artifacts = Generator::new(&graph, &config).run();

    // Only the trailing run {d, e} renders; b's default is silently dropped.
    assert!(artifacts
        .registration
        .contains(".Method(\"jump\", &N::Foo::jump, bind::DefaultArgs(3, 4))"));
    assert!(artifacts.declarations.contains(
        "jump(_a: number, _b: number, _c: number, _d?: number /* = 3 */, _e?: number /* = 4 */): void;"
    ));
}

#[test]
fn variadic_and_irregular_member_names() {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("Log")
                .at(loc("src/n/Log.h", 1))
                .with_method(
                    Callable::new("printf", TypeRef::primitive("void"))
                        .with_param(Param::new("fmt", TypeRef::primitive("const char*")))
                        .with_param(Param::new("args", TypeRef::variadic())),
                )
                .with_method(
                    Callable::new("operator+", TypeRef::class("N::Log"))
                        .with_param(Param::new("rhs", TypeRef::class("N::Log"))),
                ),
        )
        .unwrap();
    let config = GeneratorConfig::new().select_all();
    let artifacts = Generator::new(&graph, &config).run();

    assert!(artifacts
        .declarations
        .contains("printf(_fmt: string, ...args: any[]): void;"));
    assert!(artifacts
        .declarations
        .contains("[\"operator+\"](_rhs: N.Log): N.Log;"));
}

#[test]
fn includes_are_fixed_then_deduced_with_root_stripping() {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(
            n,
            ClassNode::new("A").with_field(
                Field::new("x", TypeRef::primitive("int")).at(loc("src\\n\\Shared.h", 2)),
            ),
        )
        .unwrap();
    graph
        .add_class(
            n,
            ClassNode::new("B").with_method(
                Callable::new("f", TypeRef::primitive("void")).at(loc("src/n/Shared.h", 9)),
            ),
        )
        .unwrap();
    graph
        .add_class(n, ClassNode::new("C").at(loc("other/n/C.h", 1)))
        .unwrap();

    let config = GeneratorConfig::new()
        .select_all()
        .fixed_include("bindings/Conversions.h")
        .include_root("missing/")
        .include_root("src/");
    let artifacts = Generator::new(&graph, &config).run();

    let fixed = artifacts
        .registration
        .find("#include \"bindings/Conversions.h\"")
        .unwrap();
    // Backslashes normalize, the first matching root strips, duplicates
    // collapse; unmatched paths pass through untouched.
    let shared = artifacts.registration.find("#include \"n/Shared.h\"").unwrap();
    let other = artifacts.registration.find("#include \"other/n/C.h\"").unwrap();
    assert!(fixed < shared && shared < other);
    assert_eq!(artifacts.registration.matches("n/Shared.h").count(), 1);
}

#[test]
fn handwritten_classes_are_skipped_in_both_artifacts() {
    let graph = derived_graph();
    let config = GeneratorConfig::new().select_all().handwritten("N::Base");
    let artifacts = Generator::new(&graph, &config).run();

    assert!(!artifacts.registration.contains("bind::Class<N::Base>"));
    assert!(!artifacts.registration.contains("BIND_TYPE_DECL(N::Base)"));
    // The manual binding is still extended against.
    assert!(artifacts.registration.contains(".Extends<N::Base>()"));
    assert!(!artifacts.declarations.contains("class Base"));
    assert!(artifacts.declarations.contains("class Foo extends N.Base {"));
}

#[test]
fn declaration_renames_apply_to_declaring_and_referencing_sites() {
    let mut graph = TypeGraph::new();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(n, ClassNode::new("Foo").at(loc("src/n/Foo.h", 1)))
        .unwrap();
    graph
        .add_class(
            n,
            ClassNode::new("Bar").at(loc("src/n/Bar.h", 1)).with_field(
                Field::new("target", TypeRef::class("N::Foo")).at(loc("src/n/Bar.h", 2)),
            ),
        )
        .unwrap();
    let config = GeneratorConfig::new()
        .select_all()
        .rename_decl("N::Foo", "Game.FooHandle");
    let artifacts = Generator::new(&graph, &config).run();

    assert!(artifacts.declarations.contains("declare namespace Game {"));
    assert!(artifacts.declarations.contains("class FooHandle {"));
    assert!(artifacts.declarations.contains("target: Game.FooHandle;"));
    // The native side keeps the real qualified name.
    assert!(artifacts.registration.contains("bind::Class<N::Foo>(\"N::Foo\")"));
}

#[test]
fn excluded_members_never_render() {
    let graph = derived_graph();
    let config = GeneratorConfig::new().select_all().with_exclusions(
        ExclusionRules::new().exclude_member("N::Foo::hidden"),
    );
    let artifacts = Generator::new(&graph, &config).run();

    assert!(!artifacts.registration.contains("hidden"));
    assert!(!artifacts.declarations.contains("hidden"));
    assert!(artifacts.registration.contains(".Method(\"Bar\", &N::Foo::Bar)"));
}

#[test]
fn excluded_namespace_rejects_its_classes() {
    let mut graph = TypeGraph::new();
    let internal = graph.namespace(&["N", "Internal"]);
    graph
        .add_class(internal, ClassNode::new("Detail").at(loc("src/d.h", 1)))
        .unwrap();
    let n = graph.namespace(&["N"]);
    graph
        .add_class(n, ClassNode::new("Foo").at(loc("src/f.h", 1)))
        .unwrap();

    let config = GeneratorConfig::new()
        .select_all()
        .with_exclusions(ExclusionRules::new().exclude_namespace("N::Internal"));
    let artifacts = Generator::new(&graph, &config).run();

    assert!(!artifacts.registration.contains("Detail"));
    assert!(artifacts.registration.contains("bind::Class<N::Foo>"));
}

#[test]
fn registration_function_name_is_overridable() {
    let graph = single_class_graph();
    let config = GeneratorConfig::new()
        .select_all()
        .registration_fn("registerGameBindings");
    let artifacts = Generator::new(&graph, &config).run();
    assert!(artifacts
        .registration
        .contains("void registerGameBindings(bind::Registrar& registrar) {"));
    assert!(!artifacts.registration.contains("register_all_bindings"));
}

#[test]
fn custom_classifier_overrides_the_rule_default() {
    let graph = derived_graph();
    let config = GeneratorConfig::new().select_all();
    let reject_bases = |_: &TypeGraph, class: &ClassNode| class.name != "Base";
    let artifacts = Generator::new(&graph, &config)
        .with_classifier(&reject_bases)
        .run();

    assert!(!artifacts.registration.contains("bind::Class<N::Base>"));
    // With the base rejected, the subclass extends nothing.
    assert!(!artifacts.registration.contains(".Extends<"));
    assert!(artifacts.declarations.contains("class Foo {"));
}

#[test]
fn runs_are_byte_identical() {
    let graph = default_ref_graph();
    let config = GeneratorConfig::new()
        .select(["N::Foo::*"])
        .fixed_include("bindings/Conversions.h")
        .include_root("src/");

    let first = Generator::new(&graph, &config).run();
    let second = Generator::new(&graph, &config).run();
    assert_eq!(first, second);
}

#[test]
fn artifacts_write_to_files() {
    let graph = single_class_graph();
    let config = GeneratorConfig::new().select_all();
    let dir = std::env::temp_dir().join("scriptbind_write_test");
    std::fs::create_dir_all(&dir).unwrap();
    let native = dir.join("bindings.cpp");
    let decl = dir.join("bindings.d.ts");

    let artifacts = Generator::new(&graph, &config)
        .run_to_files(&native, &decl)
        .unwrap();
    assert_eq!(std::fs::read_to_string(&native).unwrap(), artifacts.registration);
    assert_eq!(std::fs::read_to_string(&decl).unwrap(), artifacts.declarations);
}
