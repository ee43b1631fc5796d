//! Declaration Model Tests

use kotbridge_codegen::declaration::{
    AnnotationDecl, CompilationRound, Declaration, TypeRef, FLOW_BRIDGE, SUSPEND_BRIDGE,
};
use kotbridge_codegen::testing::FunctionFixture;

#[test]
fn should_parse_a_fully_qualified_name() {
    let type_ref = TypeRef::parse("kotlin.text.Regex");
    assert_eq!(type_ref.package, "kotlin.text");
    assert_eq!(type_ref.name, "Regex");
    assert!(type_ref.argument.is_none());
}

#[test]
fn should_parse_an_unqualified_name_with_an_empty_package() {
    let type_ref = TypeRef::parse("Datum");
    assert_eq!(type_ref.package, "");
    assert_eq!(type_ref.name, "Datum");
}

#[test]
fn should_parse_a_single_generic_argument() {
    let type_ref = TypeRef::parse("kotlinx.coroutines.flow.Flow<kotlin.String>");
    assert_eq!(type_ref.name, "Flow");
    assert_eq!(type_ref.package, "kotlinx.coroutines.flow");
    let element = type_ref.argument.expect("element type");
    assert_eq!(element.fq_name(), "kotlin.String");
}

#[test]
fn should_parse_nested_generic_arguments() {
    let type_ref = TypeRef::parse("kotlin.collections.List<kotlin.collections.List<kotlin.Int>>");
    let outer = type_ref.argument.expect("outer element");
    assert_eq!(outer.name, "List");
    let inner = outer.argument.expect("inner element");
    assert_eq!(inner.fq_name(), "kotlin.Int");
}

#[test]
fn should_render_the_simple_name_with_generic_argument() {
    let type_ref = TypeRef::parse("kotlin.collections.List<kotlin.text.Regex>");
    assert_eq!(type_ref.to_string(), "List<Regex>");
}

#[test]
fn fq_name_should_skip_the_dot_for_unpackaged_types() {
    assert_eq!(TypeRef::parse("Datum").fq_name(), "Datum");
    assert_eq!(TypeRef::unit().fq_name(), "kotlin.Unit");
}

#[test]
fn elements_annotated_with_should_keep_encounter_order() {
    let round = CompilationRound::new(vec![
        FunctionFixture::new("first")
            .suspending()
            .annotation(SUSPEND_BRIDGE)
            .into_declaration(),
        Declaration::Other {
            name: "SomeClass".to_string(),
            annotations: vec![AnnotationDecl::new(SUSPEND_BRIDGE)],
        },
        FunctionFixture::new("second")
            .annotation(FLOW_BRIDGE)
            .into_declaration(),
        FunctionFixture::new("unmarked").into_declaration(),
    ]);

    let suspend_matches: Vec<_> = round.elements_annotated_with(SUSPEND_BRIDGE).collect();
    assert_eq!(suspend_matches.len(), 2);

    let flow_matches: Vec<_> = round.elements_annotated_with(FLOW_BRIDGE).collect();
    assert_eq!(flow_matches.len(), 1);
    match flow_matches[0] {
        Declaration::Function(func) => assert_eq!(func.name, "second"),
        other => panic!("expected a function, got {:?}", other),
    }
}
