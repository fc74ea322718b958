//! Bloom Filter Functions
//!
//! A Bloom filter is an opaque value. It is never modified in place:
//! `BLOOM_ADD` and `BLOOM_MERGE` return new filters, so a filter held in a
//! variable can be shared across executions safely.

use super::register_native;
use crate::api::Context;
use crate::resolver::{FunctionError, FunctionInfo, FunctionRegistryBuilder};
use crate::values::{OpaqueValue, Value};
use crate::{Vec, format};
use core::any::Any;
use core::f64::consts::LN_2;
use xxhash_rust::xxh64::xxh64;

const DEFAULT_EXPECTED_INSERTIONS: i64 = 100_000;
const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;
const MAX_EXPECTED_INSERTIONS: i64 = i32::MAX as i64;

/// Largest filter `BloomFilter::new` will allocate, 256 MiB of bits.
pub const MAX_NUM_BITS: u64 = 1 << 31;

/// Fixed-size Bloom filter over Stellar values.
///
/// Bit positions come from double hashing two xxh64 digests of the value's
/// kind and text, so `1` and `1L` are distinct members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    bits: Vec<u64>,
    num_bits: u64,
    num_hashes: u32,
}

impl BloomFilter {
    /// Size a filter for `expected_insertions` at `false_positive_rate`.
    ///
    /// Fails when the filter would need more than [`MAX_NUM_BITS`] bits or
    /// the allocation itself fails.
    pub fn new(expected_insertions: u64, false_positive_rate: f64) -> Result<Self, FunctionError> {
        let n = expected_insertions.max(1) as f64;
        let optimal_bits = ((-n * false_positive_rate.ln()) / (LN_2 * LN_2)).ceil().max(64.0);
        if !optimal_bits.is_finite() || optimal_bits > MAX_NUM_BITS as f64 {
            return Err(FunctionError::InvalidArgument {
                message: format!(
                    "a bloom filter for {} insertions at rate {} needs {} bits, more than the limit of {}",
                    expected_insertions, false_positive_rate, optimal_bits, MAX_NUM_BITS
                )
                .into(),
            });
        }
        let num_bits = optimal_bits as u64;
        let num_hashes = ((num_bits as f64 / n) * LN_2).round().max(1.0) as u32;
        let words = num_bits.div_ceil(64) as usize;
        let mut bits = Vec::new();
        bits.try_reserve_exact(words)
            .map_err(|err| FunctionError::InvalidArgument {
                message: format!("cannot allocate a bloom filter of {} bits: {}", num_bits, err)
                    .into(),
            })?;
        bits.resize(words, 0);
        Ok(Self {
            bits,
            num_bits,
            num_hashes,
        })
    }

    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    pub fn insert(&mut self, value: &Value) {
        for index in bit_indexes(value, self.num_bits, self.num_hashes) {
            self.bits[(index / 64) as usize] |= 1_u64 << (index % 64);
        }
    }

    /// False means definitely absent; true means probably present.
    pub fn might_contain(&self, value: &Value) -> bool {
        bit_indexes(value, self.num_bits, self.num_hashes)
            .all(|index| self.bits[(index / 64) as usize] & (1_u64 << (index % 64)) != 0)
    }

    /// Union with a filter of the same shape.
    pub fn merge(&mut self, other: &BloomFilter) -> Result<(), FunctionError> {
        if self.num_bits != other.num_bits || self.num_hashes != other.num_hashes {
            return Err(FunctionError::InvalidArgument {
                message: format!(
                    "cannot merge a bloom filter of {} bits and {} hashes into one of {} bits and {} hashes",
                    other.num_bits, other.num_hashes, self.num_bits, self.num_hashes
                )
                .into(),
            });
        }
        for (word, other) in self.bits.iter_mut().zip(&other.bits) {
            *word |= other;
        }
        Ok(())
    }
}

/// Double hashing: the `i`-th index is `h1 + i * h2` modulo the filter size.
fn bit_indexes(value: &Value, num_bits: u64, num_hashes: u32) -> impl Iterator<Item = u64> {
    let key = format!("{}:{}", value.kind(), value);
    let h1 = xxh64(key.as_bytes(), 0);
    let h2 = xxh64(key.as_bytes(), h1) | 1;
    (0..u64::from(num_hashes)).map(move |i| h1.wrapping_add(i.wrapping_mul(h2)) % num_bits)
}

impl OpaqueValue for BloomFilter {
    fn type_name(&self) -> &'static str {
        "BloomFilter"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equals(&self, other: &dyn OpaqueValue) -> bool {
        other.downcast_ref::<BloomFilter>() == Some(self)
    }
}

/// The filter held by `value`, `None` for null, an error for anything else.
fn filter_arg(position: usize, value: &Value) -> Result<Option<&BloomFilter>, FunctionError> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_opaque()
        .and_then(|opaque| opaque.downcast_ref::<BloomFilter>())
        .map(Some)
        .ok_or_else(|| FunctionError::argument_kind(position, "a bloom filter", value))
}

// ============================================================================
// Functions
// ============================================================================

fn bloom_init(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    FunctionError::check_arity(args, 0, 2)?;
    let expected = match args.first() {
        None | Some(Value::Null) => DEFAULT_EXPECTED_INSERTIONS,
        Some(v) => v
            .to_i64()
            .ok_or_else(|| FunctionError::argument_kind(0, "a number", v))?,
    };
    let rate = match args.get(1) {
        None | Some(Value::Null) => DEFAULT_FALSE_POSITIVE_RATE,
        Some(v) => v
            .to_f64()
            .ok_or_else(|| FunctionError::argument_kind(1, "a number", v))?,
    };
    if !(1..=MAX_EXPECTED_INSERTIONS).contains(&expected) {
        return Err(FunctionError::InvalidArgument {
            message: format!(
                "expected insertions must lie in 1..={}, got {}",
                MAX_EXPECTED_INSERTIONS, expected
            )
            .into(),
        });
    }
    if !(rate > 0.0 && rate < 1.0) {
        return Err(FunctionError::InvalidArgument {
            message: format!("false positive rate must lie in (0, 1), got {}", rate).into(),
        });
    }
    Ok(Value::opaque(BloomFilter::new(expected as u64, rate)?))
}

/// A new filter holding the old members plus every non-null value.
fn bloom_add(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    FunctionError::check_arity(args, 1, usize::MAX)?;
    let Some(filter) = filter_arg(0, &args[0])? else {
        return Ok(Value::Null);
    };
    let mut filter = filter.clone();
    for value in args[1..].iter().filter(|value| !value.is_null()) {
        filter.insert(value);
    }
    Ok(Value::opaque(filter))
}

fn bloom_exists(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    let (Some(filter), Some(value)) = (args.first(), args.get(1)) else {
        return Ok(Value::Bool(false));
    };
    let exists = match filter_arg(0, filter)? {
        Some(filter) if !value.is_null() => filter.might_contain(value),
        _ => false,
    };
    Ok(Value::Bool(exists))
}

/// Union of every filter in a list; null when the list holds none.
fn bloom_merge(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    let Some(items) = args.first().and_then(Value::as_list) else {
        return Ok(Value::Null);
    };
    let mut merged: Option<BloomFilter> = None;
    for item in items {
        let Some(filter) = item
            .as_opaque()
            .and_then(|opaque| opaque.downcast_ref::<BloomFilter>())
        else {
            continue;
        };
        match merged.as_mut() {
            Some(merged) => merged.merge(filter)?,
            None => merged = Some(filter.clone()),
        }
    }
    Ok(merged.map(Value::opaque).unwrap_or(Value::Null))
}

pub fn register(builder: &mut FunctionRegistryBuilder) {
    register_native(
        builder,
        FunctionInfo::new("INIT", "Returns an empty bloom filter")
            .namespace("BLOOM")
            .params(&[
                "expectedInsertions - The expected insertions",
                "falsePositiveRate - The false positive rate you are willing to tolerate",
            ])
            .returns("Bloom Filter"),
        bloom_init,
    );
    register_native(
        builder,
        FunctionInfo::new("ADD", "Adds elements to the bloom filter passed in")
            .namespace("BLOOM")
            .params(&["bloom - The bloom filter", "value* - The values to add"])
            .returns("Bloom Filter"),
        bloom_add,
    );
    register_native(
        builder,
        FunctionInfo::new("EXISTS", "If the bloom filter contains the value")
            .namespace("BLOOM")
            .params(&["bloom - The bloom filter", "value - The value to check"])
            .returns("True if the filter might contain the value and false otherwise"),
        bloom_exists,
    );
    register_native(
        builder,
        FunctionInfo::new("MERGE", "Returns a merged bloom filter")
            .namespace("BLOOM")
            .params(&["bloomfilters - A list of bloom filters to merge"])
            .returns("Bloom Filter or null if the list is empty"),
        bloom_merge,
    );
}
