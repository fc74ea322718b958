use stellar::{CompileError, Error, LiteralError, Token, parser::LiteralKind};

#[macro_use]
mod cases;

// ======== Number literals ========

test_case! {
    name: int_literal,
    tree: |b| b.int("1000"),
    result: Ok(Token::int(1000)),
}

test_case! {
    name: double_literal_with_suffix,
    tree: |b| b.double("1000D"),
    result: Ok(Token::double(1000.0)),
}

test_case! {
    name: double_literal_without_suffix,
    tree: |b| b.double("3.25"),
    result: Ok(Token::double(3.25)),
}

test_case! {
    name: long_literal,
    tree: |b| b.long("1000L"),
    result: Ok(Token::long(1000)),
}

test_case! {
    name: lowercase_long_suffix,
    tree: |b| b.long("1000l"),
    result: Ok(Token::long(1000)),
}

test_case! {
    name: float_literal,
    tree: |b| b.float("1000F"),
    result: Ok(Token::float(1000.0)),
}

test_case! {
    name: long_literal_beyond_int_range,
    tree: |b| b.long("9223372036854775807L"),
    result: Ok(Token::long(i64::MAX)),
}

test_case! {
    name: int_literal_out_of_range,
    tree: |b| b.int("2147483648"),
    result: Err(Error::Compile(CompileError::Literal(
        LiteralError::InvalidLiteral {
            kind: LiteralKind::Int,
            text: "2147483648".into(),
        }
    ))),
}

test_case! {
    name: only_one_suffix_is_stripped,
    tree: |b| b.long("10LL"),
    result: Err(Error::Compile(CompileError::Literal(
        LiteralError::InvalidLiteral {
            kind: LiteralKind::Long,
            text: "10LL".into(),
        }
    ))),
}

// ======== Other literals ========

test_case! {
    name: string_literal,
    tree: |b| b.string("hello"),
    result: Ok(Token::string("hello")),
}

test_case! {
    name: boolean_literal,
    tree: |b| b.boolean(false),
    result: Ok(Token::boolean(false)),
}

test_case! {
    name: null_literal,
    tree: |b| b.null(),
    result: Ok(Token::null()),
}

test_case! {
    name: map_literal_later_key_wins,
    tree: |b| b.map(&[
        (b.string("k"), b.int("1")),
        (b.string("k"), b.int("2")),
    ]),
    result: Ok(Token::new(stellar::Value::map_from([(
        stellar::Value::from("k"),
        stellar::Value::Int(2),
    )]))),
}

test_case! {
    name: unrecognized_node_fails_compile,
    tree: |b| b.unrecognized("TernaryExpression", "x ? 1 : 2"),
    result: Err(Error::Compile(CompileError::UnsupportedSyntax {
        rule: "TernaryExpression".into(),
        text: "x ? 1 : 2".into(),
    })),
}
