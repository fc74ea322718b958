//! Standard functions called through compiled expressions.

use crate::{
    api::{Context, Engine, ExpressionState},
    parser::TreeBuilder,
    resolver::{FunctionRegistry, MapVariableResolver},
    values::{Token, Value},
};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

#[test]
fn test_registered_names() {
    let registry = FunctionRegistry::with_stdlib();
    let names: Vec<String> = registry
        .functions()
        .iter()
        .map(|info| info.function_name().to_string())
        .collect();

    assert_eq!(
        names,
        [
            "BLOOM_ADD",
            "BLOOM_EXISTS",
            "BLOOM_INIT",
            "BLOOM_MERGE",
            "IS_DOMAIN",
            "IS_EMAIL",
            "IS_EMPTY",
            "IS_INTEGER",
            "IS_IP",
            "IS_URL",
            "LENGTH",
            "LIST_ADD",
            "MAP_EXISTS",
            "MAP_GET",
            "SHANNON_ENTROPY",
        ]
    );
}

#[test]
fn test_bloom_round_trip_in_one_expression() {
    crate::test_utils::init_test_logging();

    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let filter = b.call(
        Some("BLOOM"),
        "ADD",
        &[b.call(Some("BLOOM"), "INIT", &[]), b.variable("user")],
    );
    let tree = b.call(Some("BLOOM"), "EXISTS", &[filter, b.string("casey")]);

    let engine = Engine::default();
    let expression = engine.compile(tree).unwrap();
    let context = Context::new();
    let functions = FunctionRegistry::with_stdlib();

    let casey = MapVariableResolver::new().with("user", "casey");
    let state = ExpressionState::new(&context, &casey, &functions);
    assert_eq!(expression.execute(&state).unwrap(), Token::boolean(true));

    let jordan = MapVariableResolver::new().with("user", "jordan");
    let state = ExpressionState::new(&context, &jordan, &functions);
    assert_eq!(expression.execute(&state).unwrap(), Token::boolean(false));
}

#[test]
fn test_map_get_on_record_field() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let tree = b.call(
        Some("MAP"),
        "GET",
        &[b.variable("key"), b.variable("lookup"), b.string("unknown")],
    );

    let lookup = Value::map_from([(Value::from("10.0.0.1"), Value::from("gateway"))]);
    let context = Context::new();
    let functions = FunctionRegistry::with_stdlib();
    let expression = Engine::default().compile(tree).unwrap();

    let hit = MapVariableResolver::new()
        .with("key", "10.0.0.1")
        .with("lookup", lookup.clone());
    let state = ExpressionState::new(&context, &hit, &functions);
    assert_eq!(expression.execute(&state).unwrap(), Token::string("gateway"));

    let miss = MapVariableResolver::new()
        .with("key", "10.0.0.2")
        .with("lookup", lookup);
    let state = ExpressionState::new(&context, &miss, &functions);
    assert_eq!(expression.execute(&state).unwrap(), Token::string("unknown"));
}

#[test]
fn test_validation_feeds_logic() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let tree = b.logical(
        crate::parser::LogicalOp::And,
        b.call(None, "IS_IP", &[b.variable("ip"), b.string("IPV4")]),
        b.not(b.call(None, "IS_EMPTY", &[b.variable("host")])),
    );

    let context = Context::new();
    let functions = FunctionRegistry::with_stdlib();
    let expression = Engine::default().compile(tree).unwrap();

    let record = MapVariableResolver::new()
        .with("ip", "192.168.1.1")
        .with("host", "gateway.example.com");
    let state = ExpressionState::new(&context, &record, &functions);
    assert_eq!(expression.execute(&state).unwrap(), Token::boolean(true));

    let record = MapVariableResolver::new().with("ip", "192.168.1.1");
    let state = ExpressionState::new(&context, &record, &functions);
    assert_eq!(expression.execute(&state).unwrap(), Token::boolean(false));
}
