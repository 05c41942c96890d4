use super::*;
use crate::IntKind;
use pretty_assertions::assert_eq;

fn pair_type() -> StructType {
    StructType::new(
        Name::from_raw(100),
        vec![
            FieldDef::new(Name::from_raw(1), Type::Int(IntKind::Int)),
            FieldDef::new(Name::from_raw(2), Type::Str),
        ],
    )
}

#[test]
fn test_field_index_follows_declaration_order() {
    let ty = pair_type();
    assert_eq!(ty.field_index(Name::from_raw(1)), Some(0));
    assert_eq!(ty.field_index(Name::from_raw(2)), Some(1));
    assert_eq!(ty.field_index(Name::from_raw(3)), None);
    assert_eq!(ty.len(), 2);
}

#[test]
fn test_duplicate_field_resolves_to_first() {
    let dup = Name::from_raw(7);
    let ty = StructType::new(
        Name::from_raw(100),
        vec![
            FieldDef::new(dup, Type::Bool),
            FieldDef::new(dup, Type::Str),
        ],
    );
    assert_eq!(ty.field_index(dup), Some(0));
}

#[test]
fn test_struct_equality_ignores_index_cache() {
    assert_eq!(pair_type(), pair_type());
    let other = StructType::new(Name::from_raw(101), pair_type().fields().to_vec());
    assert_ne!(pair_type(), other);
}

#[test]
fn test_array_fixed_len() {
    assert_eq!(ArrayType::fixed(Type::Bool, 3).fixed_len(), Some(3));
    assert_eq!(ArrayType::inferred(Type::Bool).fixed_len(), None);
}
