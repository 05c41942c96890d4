//! Shared fixtures for the integration tests.

#![allow(dead_code, reason = "each test binary uses a subset")]

use std::sync::Arc;

use tern_eval::{Constant, Element, Entry, FieldDef, Runtime, StructType, Type};

/// Intern `fields` as `int` fields of a struct named `name`.
pub fn int_struct(rt: &Runtime, name: &str, fields: &[&str]) -> Arc<StructType> {
    let interner = rt.interner();
    Arc::new(StructType::new(
        interner.intern(name),
        fields
            .iter()
            .map(|f| FieldDef::new(interner.intern(f), Type::INT))
            .collect(),
    ))
}

pub fn int(n: i128) -> Element {
    Element::Const(Constant::Int(n))
}

pub fn str_const(s: &str) -> Element {
    Element::Const(Constant::Str(s.to_string()))
}

/// A positional nested literal `{a, b}`.
pub fn pair(a: i128, b: i128) -> Element {
    Element::Nested(vec![Entry::positional(int(a)), Entry::positional(int(b))])
}
