#![allow(dead_code)]

use once_cell::sync::Lazy;
use stellar::{
    Context, Engine, Error, ExpressionState, FunctionRegistry, MapVariableResolver, Node, Token,
};

pub static ENGINE: Lazy<Engine> = Lazy::new(Engine::default);
pub static FUNCTIONS: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::with_stdlib);
pub static CONTEXT: Lazy<Context> = Lazy::new(Context::new);

/// Compile through the shared engine and run against `variables` with the
/// standard functions.
pub fn run(tree: &Node<'_>, variables: &MapVariableResolver) -> Result<Token, Error> {
    let state = ExpressionState::new(&CONTEXT, variables, &*FUNCTIONS);
    ENGINE.execute(tree, &state)
}

/// Declares a test that builds a tree, runs it and checks the result.
///
/// ```ignore
/// test_case! {
///     name: int_plus_long,
///     tree: |b| b.add(b.int("1"), b.long("2L")),
///     vars: { "x" => 1 },
///     result: Ok(Token::long(3)),
/// }
/// ```
macro_rules! test_case {
    (
        name: $name:ident,
        tree: |$b:ident| $tree:expr,
        $(vars: { $($var:literal => $val:expr),* $(,)? },)?
        result: $result:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let arena = stellar::Bump::new();
            let $b = stellar::TreeBuilder::new(&arena);
            let tree = $tree;
            let variables = stellar::MapVariableResolver::new() $($(.with($var, $val))*)?;
            let result = cases::run(tree, &variables);
            pretty_assertions::assert_eq!(result, $result);
        }
    };
}
