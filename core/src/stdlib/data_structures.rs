//! Data Structure Functions
//!
//! Inspection and construction of strings, lists and maps. Values are
//! immutable, so functions that "modify" a collection return a new one.

use super::register_native;
use crate::api::Context;
use crate::resolver::{FunctionError, FunctionInfo, FunctionRegistryBuilder};
use crate::values::Value;

// ============================================================================
// Inspection Functions
// ============================================================================

/// True for null, an empty string and an empty collection.
fn is_empty(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    let empty = match args.first() {
        None | Some(Value::Null) => true,
        Some(Value::Str(s)) => s.is_empty(),
        Some(Value::List(items)) => items.is_empty(),
        Some(Value::Map(entries)) => entries.is_empty(),
        Some(_) => false,
    };
    Ok(Value::Bool(empty))
}

/// Character count of a string or entry count of a collection; zero for
/// anything else.
fn length(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    let len = match args.first() {
        Some(Value::Str(s)) => s.chars().count(),
        Some(Value::List(items)) => items.len(),
        Some(Value::Map(entries)) => entries.len(),
        _ => 0,
    };
    i32::try_from(len)
        .map(Value::Int)
        .map_err(|_| FunctionError::InvalidArgument {
            message: "length does not fit in an Integer".into(),
        })
}

// ============================================================================
// List Functions
// ============================================================================

/// A copy of the list with the element appended. A first argument that is
/// not a list comes back unchanged.
fn list_add(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    match args {
        [] => Ok(Value::Null),
        [Value::List(items), element, ..] => {
            let mut items = items.clone();
            items.push(element.clone());
            Ok(Value::List(items))
        }
        [first, ..] => Ok(first.clone()),
    }
}

// ============================================================================
// Map Functions
// ============================================================================

fn map_exists(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    let exists = match args {
        [key, map @ Value::Map(_), ..] if !key.is_null() => map.map_get(key).is_some(),
        _ => false,
    };
    Ok(Value::Bool(exists))
}

/// The value under `key`, else the optional default, else null.
fn map_get(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    FunctionError::check_arity(args, 2, 3)?;
    let default = args.get(2).cloned().unwrap_or(Value::Null);
    let (key, map) = (&args[0], &args[1]);
    if key.is_null() || map.is_null() {
        return Ok(default);
    }
    if map.as_map().is_none() {
        return Err(FunctionError::argument_kind(1, "a map", map));
    }
    match map.map_get(key) {
        Some(value) if !value.is_null() => Ok(value.clone()),
        _ => Ok(default),
    }
}

pub fn register(builder: &mut FunctionRegistryBuilder) {
    register_native(
        builder,
        FunctionInfo::new(
            "IS_EMPTY",
            "Returns true if string or collection is empty or null and false if otherwise.",
        )
        .params(&["input - Object of string or collection type (for example, list)"])
        .returns("True if the string or collection is empty or null and false if otherwise."),
        is_empty,
    );
    register_native(
        builder,
        FunctionInfo::new(
            "LENGTH",
            "Returns the length of a string or size of a collection. Returns 0 for empty or null Strings",
        )
        .params(&["input - Object of string or collection type (e.g. list)"])
        .returns("Integer"),
        length,
    );
    register_native(
        builder,
        FunctionInfo::new("ADD", "Adds an element to a list.")
            .namespace("LIST")
            .params(&["list - List to add element to.", "element - Element to add to list"])
            .returns("Resulting list with the item added at the end."),
        list_add,
    );
    register_native(
        builder,
        FunctionInfo::new("EXISTS", "Checks for existence of a key in a map.")
            .namespace("MAP")
            .params(&["key - The key to check for existence", "map - The map to check"])
            .returns("True if the key is found in the map and false if otherwise."),
        map_exists,
    );
    register_native(
        builder,
        FunctionInfo::new("GET", "Gets the value associated with a key from a map")
            .namespace("MAP")
            .params(&[
                "key - The key",
                "map - The map",
                "default - Optionally the default value to return if the key is not in the map.",
            ])
            .returns("The object associated with the key in the map, else the default, else null."),
        map_get,
    );
}
