//! Equality and hashing of runtime values.
//!
//! `equal` and `hash_into` are total and agree with each other: values
//! that are `equal` hash identically. They back map keys and the
//! `PartialEq`/`Hash` impls on `Value`.
//!
//! `compare` is the checked form used by `==` and `!=`. It applies the
//! language's rules on top of `equal`: maps only compare against nil,
//! mismatched types are an error, and values containing a map are
//! uncomparable.

use std::hash::{Hash, Hasher};
use std::mem;

use rustc_hash::FxHasher;
use tern_ir::StringLookup;
use tern_stack::ensure_sufficient_stack;

use crate::errors::{
    map_comparison, mismatched_types, uncomparable_type, unhashable_key, EvalResult,
};
use crate::value::Value;

/// Structural equality.
///
/// Floats compare by value (`+0 == -0`, NaN never equal). Pointers compare
/// by slot and member path, maps by table identity, `any` by tag and boxed value.
pub fn equal(a: &Value, b: &Value) -> bool {
    ensure_sufficient_stack(|| equal_inner(a, b))
}

#[allow(clippy::float_cmp, reason = "language equality is exact, no epsilon")]
fn equal_inner(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float32(x), Value::Float32(y)) => x == y,
        (Value::Float64(x), Value::Float64(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => **x == **y,
        (Value::Pointer(x), Value::Pointer(y)) => {
            x.slot() == y.slot() && x.path() == y.path() && x.pointee() == y.pointee()
        }
        (Value::Struct(x), Value::Struct(y)) => {
            x.ty() == y.ty() && all_equal(x.fields(), y.fields())
        }
        (Value::Array(x), Value::Array(y)) => {
            x.ty() == y.ty() && all_equal(x.elems(), y.elems())
        }
        (Value::Any(x), Value::Any(y)) => match (x.tag(), y.tag()) {
            (None, None) => true,
            (Some(tx), Some(ty)) => tx == ty && opt_equal(x.value(), y.value()),
            _ => false,
        },
        (Value::Map(x), Value::Map(y)) => x.same_map(y),
        _ => false,
    }
}

fn all_equal(xs: &[Value], ys: &[Value]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| equal(x, y))
}

fn opt_equal(x: Option<&Value>, y: Option<&Value>) -> bool {
    match (x, y) {
        (Some(x), Some(y)) => equal(x, y),
        (None, None) => true,
        _ => false,
    }
}

/// Feed `value` into `state`, consistent with [`equal`].
pub fn hash_into<H: Hasher>(value: &Value, state: &mut H) {
    ensure_sufficient_stack(|| {
        mem::discriminant(value).hash(state);
        match value {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            // -0.0 and +0.0 are equal, so they must hash alike.
            Value::Float32(x) => {
                let x = if *x == 0.0 { 0.0f32 } else { *x };
                x.to_bits().hash(state);
            }
            Value::Float64(x) => {
                let x = if *x == 0.0 { 0.0f64 } else { *x };
                x.to_bits().hash(state);
            }
            Value::Str(s) => s.as_str().hash(state),
            Value::Pointer(p) => {
                p.slot().hash(state);
                p.path().hash(state);
            }
            Value::Struct(s) => {
                s.ty().name().hash(state);
                for field in s.fields() {
                    hash_into(field, state);
                }
            }
            Value::Array(a) => {
                a.len().hash(state);
                for elem in a.elems() {
                    hash_into(elem, state);
                }
            }
            Value::Any(a) => {
                a.tag().hash(state);
                if let Some(inner) = a.value() {
                    hash_into(inner, state);
                }
            }
            Value::Map(m) => m.identity().hash(state),
        }
    });
}

/// 64-bit hash of a value.
pub fn hash_value(value: &Value) -> u64 {
    let mut hasher = FxHasher::default();
    hash_into(value, &mut hasher);
    hasher.finish()
}

/// Reject values that cannot be map keys: maps and arrays, directly or
/// inside a struct or `any`.
pub fn check_hashable(value: &Value) -> EvalResult<()> {
    ensure_sufficient_stack(|| match value {
        Value::Map(_) | Value::Array(_) => Err(unhashable_key(value.kind_name())),
        Value::Struct(s) => s.fields().iter().try_for_each(check_hashable),
        Value::Any(a) => a.value().map_or(Ok(()), check_hashable),
        _ => Ok(()),
    })
}

/// Whether `value` contains a map anywhere below it.
fn contains_map(value: &Value) -> bool {
    ensure_sufficient_stack(|| match value {
        Value::Map(_) => true,
        Value::Struct(s) => s.fields().iter().any(contains_map),
        Value::Array(a) => a.elems().iter().any(contains_map),
        Value::Any(a) => a.value().is_some_and(contains_map),
        _ => false,
    })
}

/// The `==` operator.
///
/// - map vs map: error; map vs `nil`: whether the map is nil
/// - pointer or `any` vs `nil`: whether it is nil
/// - `[]T` vs `nil`: whether it is empty
/// - `any` vs a concrete value: the tag must be the value's type
/// - otherwise both sides must have the same type
pub fn compare(a: &Value, b: &Value, names: &dyn StringLookup) -> EvalResult<bool> {
    match (a, b) {
        (Value::Map(_), Value::Map(_)) => Err(map_comparison()),
        (Value::Map(m), Value::Nil) | (Value::Nil, Value::Map(m)) => Ok(m.is_nil()),
        (Value::Nil, other) | (other, Value::Nil) => match other {
            Value::Nil | Value::Pointer(_) | Value::Any(_) => Ok(other.is_nil()),
            // A nil slice is stored as an empty one.
            Value::Array(arr) if arr.ty().fixed_len().is_none() => Ok(arr.is_empty()),
            _ => Err(mismatched_types(&a.type_name(names), &b.type_name(names))),
        },
        (Value::Any(x), Value::Any(y)) => match (x.tag(), y.tag()) {
            (Some(tx), Some(ty)) if tx == ty => {
                compare_boxed(x.value(), y.value(), tx.display(names).to_string())
            }
            (None, None) => Ok(true),
            _ => Ok(false),
        },
        (Value::Any(boxed), concrete) | (concrete, Value::Any(boxed)) => {
            let concrete_ty = concrete.dynamic_type();
            match boxed.tag() {
                Some(tag) if Some(tag) == concrete_ty.as_ref() => {
                    compare_boxed(boxed.value(), Some(concrete), tag.display(names).to_string())
                }
                _ => {
                    if contains_map(concrete) {
                        Err(uncomparable_type(&concrete.type_name(names)))
                    } else {
                        Ok(false)
                    }
                }
            }
        }
        _ => {
            if a.dynamic_type() != b.dynamic_type() {
                return Err(mismatched_types(&a.type_name(names), &b.type_name(names)));
            }
            if contains_map(a) {
                return Err(uncomparable_type(&a.type_name(names)));
            }
            Ok(equal(a, b))
        }
    }
}

fn compare_boxed(x: Option<&Value>, y: Option<&Value>, type_name: String) -> EvalResult<bool> {
    if x.is_some_and(contains_map) || y.is_some_and(contains_map) {
        return Err(uncomparable_type(&type_name));
    }
    Ok(opt_equal(x, y))
}
