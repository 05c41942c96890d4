//! Constant conversion, explicit conversion and assignability.
//!
//! Three entry points, one per source construct:
//!
//! | Operation | Source construct | Integer overflow |
//! |-----------|------------------|------------------|
//! | [`Converter::constant`] | untyped literal in a typed slot | error |
//! | [`Converter::convert`] | `T(x)` on a runtime value | wraps |
//! | [`Converter::assign`] | typed value into a typed slot | n/a (types must match) |
//!
//! A value headed into an `any` slot is boxed with its dynamic type.

use std::fmt;

use tern_ir::StringLookup;
use tern_types::{FloatKind, IntKind, Type};

use crate::errors::{
    cannot_assign, constant_overflows, constant_truncated, invalid_conversion, EvalResult,
};
use crate::value::{IntValue, Value};

/// An untyped constant as produced by the parser.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    /// Integer literal; wider than any integer kind so overflow is detectable.
    Int(i128),
    Float(f64),
    Str(String),
    Bool(bool),
    Nil,
}

impl Constant {
    /// The type a constant takes when nothing else decides it, as when it
    /// is stored in an `any`.
    pub fn default_type(&self) -> Option<Type> {
        match self {
            Constant::Int(_) => Some(Type::INT),
            Constant::Float(_) => Some(Type::FLOAT64),
            Constant::Str(_) => Some(Type::Str),
            Constant::Bool(_) => Some(Type::Bool),
            Constant::Nil => None,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(n) => write!(f, "{n}"),
            Constant::Float(x) => write!(f, "{x}"),
            Constant::Str(s) => write!(f, "{s:?}"),
            Constant::Bool(b) => write!(f, "{b}"),
            Constant::Nil => write!(f, "nil"),
        }
    }
}

/// Converts constants and values to target types.
///
/// Holds the name table for diagnostics and the float32 overflow policy.
#[derive(Copy, Clone)]
pub struct Converter<'a> {
    names: &'a dyn StringLookup,
    saturate_float32: bool,
}

impl<'a> Converter<'a> {
    pub fn new(names: &'a dyn StringLookup) -> Self {
        Converter {
            names,
            saturate_float32: true,
        }
    }

    /// Whether finite values beyond the float32 range clamp to `±f32::MAX`
    /// (the default) or become infinite.
    #[must_use]
    pub fn with_float32_saturation(mut self, saturate: bool) -> Self {
        self.saturate_float32 = saturate;
        self
    }

    fn type_name(&self, ty: &Type) -> String {
        ty.display(self.names).to_string()
    }

    /// Give an untyped constant the type `target`.
    #[tracing::instrument(level = "trace", skip(self, target), fields(target = %target.kind_name()))]
    pub fn constant(&self, constant: &Constant, target: &Type) -> EvalResult<Value> {
        match (constant, target) {
            (Constant::Nil, ty) if ty.accepts_nil() => Ok(Value::zero(ty)),
            (_, Type::Any) => {
                let Some(ty) = constant.default_type() else {
                    return Ok(Value::zero(target));
                };
                let value = self.constant(constant, &ty)?;
                Ok(Value::boxed(ty, value))
            }
            (Constant::Int(n), Type::Int(kind)) => IntValue::new(*kind, *n)
                .map(Value::Int)
                .ok_or_else(|| constant_overflows(&constant.to_string(), kind.name())),
            (Constant::Float(x), Type::Int(kind)) => float_constant_to_int(*x, *kind),
            // Single rounding straight from the integer.
            #[allow(clippy::cast_precision_loss, reason = "nearest representable float")]
            (Constant::Int(n), Type::Float(FloatKind::F32)) => Ok(Value::Float32(*n as f32)),
            #[allow(clippy::cast_precision_loss, reason = "nearest representable float")]
            (Constant::Int(n), Type::Float(FloatKind::F64)) => Ok(Value::Float64(*n as f64)),
            (Constant::Float(x), Type::Float(FloatKind::F32)) => Ok(self.narrow_to_f32(*x)),
            (Constant::Float(x), Type::Float(FloatKind::F64)) => Ok(Value::Float64(*x)),
            (Constant::Str(s), Type::Str) => Ok(Value::string(s.as_str())),
            (Constant::Bool(b), Type::Bool) => Ok(Value::Bool(*b)),
            _ => Err(cannot_assign(
                &format!("{constant} (untyped constant)"),
                &self.type_name(target),
            )),
        }
    }

    #[allow(clippy::cast_possible_truncation, reason = "float32 narrowing")]
    fn narrow_to_f32(&self, x: f64) -> Value {
        let narrowed = x as f32;
        if narrowed.is_infinite() && x.is_finite() && self.saturate_float32 {
            let clamped = f32::MAX.copysign(narrowed);
            tracing::warn!(value = x, clamped, "float32 conversion out of range, saturating");
            return Value::Float32(clamped);
        }
        Value::Float32(narrowed)
    }

    /// Explicit conversion `T(value)`.
    ///
    /// Integers wrap to the target width; floats truncate toward zero and
    /// saturate when converted to integers.
    #[tracing::instrument(level = "trace", skip(self, value, target), fields(target = %target.kind_name()))]
    pub fn convert(&self, value: &Value, target: &Type) -> EvalResult<Value> {
        match (value, target) {
            (_, Type::Any) => self.assign(value.clone(), target),
            (Value::Int(i), Type::Int(kind)) => {
                Ok(Value::Int(IntValue::wrapping(*kind, i.as_i128())))
            }
            #[allow(clippy::cast_precision_loss, reason = "nearest representable float")]
            (Value::Int(i), Type::Float(FloatKind::F32)) => Ok(Value::Float32(i.as_i128() as f32)),
            #[allow(clippy::cast_precision_loss, reason = "nearest representable float")]
            (Value::Int(i), Type::Float(FloatKind::F64)) => Ok(Value::Float64(i.as_i128() as f64)),
            (Value::Float32(x), Type::Int(kind)) => Ok(float_to_int(f64::from(*x), *kind)),
            (Value::Float64(x), Type::Int(kind)) => Ok(float_to_int(*x, *kind)),
            (Value::Float32(x), Type::Float(FloatKind::F64)) => Ok(Value::Float64(f64::from(*x))),
            (Value::Float64(x), Type::Float(FloatKind::F32)) => Ok(self.narrow_to_f32(*x)),
            (Value::Nil, ty) if ty.accepts_nil() => Ok(Value::zero(ty)),
            _ if value.dynamic_type().as_ref() == Some(target) => Ok(value.clone()),
            _ => Err(invalid_conversion(
                &value.type_name(self.names),
                &self.type_name(target),
            )),
        }
    }

    /// Store a typed value into a slot of type `target`.
    ///
    /// `any` slots box the value with its dynamic type (an `any` is stored
    /// as is). `nil` becomes the zero value of nil-able types. Anything
    /// else must already have exactly the target type.
    pub fn assign(&self, value: Value, target: &Type) -> EvalResult<Value> {
        match (target, value) {
            (Type::Any, Value::Any(a)) => Ok(Value::Any(a)),
            (ty, Value::Nil) if ty.accepts_nil() => Ok(Value::zero(ty)),
            (Type::Any, value) => match value.dynamic_type() {
                Some(tag) => Ok(Value::boxed(tag, value)),
                None => Ok(Value::zero(target)),
            },
            (ty, value) if value.dynamic_type().as_ref() == Some(ty) => Ok(value),
            (ty, value) => Err(cannot_assign(
                &format!("{value} ({})", value.type_name(self.names)),
                &self.type_name(ty),
            )),
        }
    }
}

/// A float constant in an integer slot must be integral and in range.
fn float_constant_to_int(x: f64, kind: IntKind) -> EvalResult<Value> {
    let rendered = || Constant::Float(x).to_string();
    if !x.is_finite() || x.fract() != 0.0 {
        return Err(constant_truncated(&rendered(), kind.name()));
    }
    // Integral and finite; anything beyond i128 is out of range for
    // every kind, and the saturating cast keeps it out of range.
    #[allow(clippy::cast_possible_truncation, reason = "x is integral")]
    let n = x as i128;
    IntValue::new(kind, n)
        .map(Value::Int)
        .ok_or_else(|| constant_overflows(&rendered(), kind.name()))
}

/// Truncate toward zero, saturating at the kind's bounds. NaN becomes 0.
#[allow(clippy::cast_possible_truncation, reason = "saturating cast")]
fn float_to_int(x: f64, kind: IntKind) -> Value {
    Value::Int(IntValue::saturating(kind, x as i128))
}
