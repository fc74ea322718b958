//! Analytics Functions

use super::register_native;
use crate::api::Context;
use crate::resolver::{FunctionError, FunctionInfo, FunctionRegistryBuilder};
use crate::values::Value;
use crate::ToString;
use hashbrown::HashMap;

/// Base-2 Shannon entropy of the characters of a string, in bits.
pub fn shannon_entropy(input: &str) -> f64 {
    let mut frequency: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in input.chars() {
        *frequency.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    frequency
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

fn entropy(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    FunctionError::check_arity(args, 1, 1)?;
    let entropy = match &args[0] {
        Value::Null => 0.0,
        Value::Str(s) => shannon_entropy(s),
        other => shannon_entropy(&other.to_string()),
    };
    Ok(Value::Double(entropy))
}

pub fn register(builder: &mut FunctionRegistryBuilder) {
    register_native(
        builder,
        FunctionInfo::new("ENTROPY", "Computes the base-2 shannon entropy of a string")
            .namespace("SHANNON")
            .params(&["input - String"])
            .returns("The base-2 shannon entropy of the string. The unit of this is bits."),
        entropy,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shannon_entropy() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert_eq!(shannon_entropy("ab"), 1.0);
        assert_eq!(shannon_entropy("abcd"), 2.0);
        assert!((shannon_entropy("aab") - 0.918_295_834_054_489_6).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_function() {
        let context = Context::new();
        assert_eq!(entropy(&[Value::Null], &context).unwrap(), Value::Double(0.0));
        assert_eq!(entropy(&[Value::Int(10)], &context).unwrap(), Value::Double(1.0));
        assert!(matches!(
            entropy(&[], &context),
            Err(FunctionError::Arity { actual: 0, .. })
        ));
    }
}
