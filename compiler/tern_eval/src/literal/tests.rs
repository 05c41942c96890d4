use super::*;
use pretty_assertions::assert_eq;
use tern_ir::StringInterner;
use tern_types::{ArrayType, FieldDef, IntKind, MapType, StructType};
use tern_value::{EvalErrorKind, MapKey};

struct Fixture {
    interner: StringInterner,
    slots: SlotArena,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            interner: StringInterner::new(),
            slots: SlotArena::new(),
        }
    }

    fn builder(&self) -> LiteralBuilder<'_> {
        LiteralBuilder::new(
            &self.interner,
            Converter::new(&self.interner),
            &self.slots,
            1 << 16,
        )
    }

    fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// `struct { a, b, c int }`
    fn abc(&self) -> Arc<StructType> {
        Arc::new(StructType::new(
            self.name("ABC"),
            vec![
                FieldDef::new(self.name("a"), Type::INT),
                FieldDef::new(self.name("b"), Type::INT),
                FieldDef::new(self.name("c"), Type::INT),
            ],
        ))
    }

    /// `struct { x, y int }`
    fn pair(&self) -> Arc<StructType> {
        Arc::new(StructType::new(
            self.name("Pair"),
            vec![
                FieldDef::new(self.name("x"), Type::INT),
                FieldDef::new(self.name("y"), Type::INT),
            ],
        ))
    }
}

fn int(n: i128) -> Element {
    Element::Const(Constant::Int(n))
}

#[test]
fn keyed_struct_zero_fills() {
    let fx = Fixture::new();
    let v = fx
        .builder()
        .build_struct(&fx.abc(), vec![Entry::field(fx.name("b"), int(88))])
        .unwrap();
    assert_eq!(v.fields(), &[Value::int(0), Value::int(88), Value::int(0)]);
}

#[test]
fn positional_struct_in_declaration_order() {
    let fx = Fixture::new();
    let v = fx
        .builder()
        .build_struct(
            &fx.abc(),
            vec![
                Entry::positional(int(8)),
                Entry::positional(int(9)),
                Entry::positional(int(10)),
            ],
        )
        .unwrap();
    assert_eq!(v.fields(), &[Value::int(8), Value::int(9), Value::int(10)]);
}

#[test]
fn empty_struct_literal_is_zero() {
    let fx = Fixture::new();
    let v = fx.builder().build_struct(&fx.abc(), vec![]).unwrap();
    assert_eq!(v.fields(), &[Value::int(0), Value::int(0), Value::int(0)]);
}

#[test]
fn struct_literal_errors() {
    let fx = Fixture::new();
    let b = fx.builder();
    let ty = fx.pair();

    let err = b
        .build_struct(&ty, vec![Entry::positional(int(1)); 3])
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TooManyStructValues { expected: 2, got: 3, .. }));

    let err = b
        .build_struct(&ty, vec![Entry::positional(int(1))])
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TooFewStructValues { expected: 2, got: 1, .. }));

    let err = b
        .build_struct(
            &ty,
            vec![Entry::field(fx.name("x"), int(1)), Entry::positional(int(2))],
        )
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::MixedStructLiteral);

    let err = b
        .build_struct(&ty, vec![Entry::field(fx.name("z"), int(1))])
        .unwrap_err();
    assert_eq!(err.message, "unknown field z in struct literal of type Pair");

    let err = b
        .build_struct(
            &ty,
            vec![Entry::field(fx.name("x"), int(1)), Entry::field(fx.name("x"), int(2))],
        )
        .unwrap_err();
    assert_eq!(err.message, "duplicate field name x in struct literal");

    let err = b
        .build_struct(&ty, vec![Entry::index(0, int(1))])
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::InvalidLiteralKey { .. }));
}

#[test]
fn struct_field_type_mismatch_carries_note() {
    let fx = Fixture::new();
    let err = fx
        .builder()
        .build_struct(
            &fx.pair(),
            vec![Entry::field(fx.name("y"), Element::Const(Constant::Str("s".into())))],
        )
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::CannotAssign { .. }));
    assert_eq!(err.notes.len(), 1);
    assert_eq!(err.notes[0].message, "in field y of Pair literal");
}

#[test]
fn sparse_forward_array() {
    let fx = Fixture::new();
    let pair = fx.pair();
    let ty = Arc::new(ArrayType::inferred(Type::Struct(Arc::clone(&pair))));
    let p = |x, y| Element::Nested(vec![Entry::positional(int(x)), Entry::positional(int(y))]);
    let arr = fx
        .builder()
        .build_array(
            &ty,
            vec![
                Entry::index(10, p(1, 1)),
                Entry::positional(p(2, 2)),
                Entry::index(1, p(3, 3)),
            ],
        )
        .unwrap();
    assert_eq!(arr.len(), 12);
    assert_eq!(arr.get(0), Some(&Value::zero(&Type::Struct(Arc::clone(&pair)))));
    assert_eq!(arr.get(1).unwrap().to_string(), "{3 3}");
    assert_eq!(arr.get(10).unwrap().to_string(), "{1 1}");
    assert_eq!(arr.get(11).unwrap().to_string(), "{2 2}");
}

#[test]
fn array_literal_key_forms() {
    let fx = Fixture::new();
    let ty = Arc::new(ArrayType::inferred(Type::INT));
    let arr = fx
        .builder()
        .build_array(
            &ty,
            vec![
                Entry::keyed(int(2), int(5)),
                Entry::keyed(Value::int(0), int(7)),
            ],
        )
        .unwrap();
    assert_eq!(arr.elems(), &[Value::int(7), Value::int(0), Value::int(5)]);

    let err = fx
        .builder()
        .build_array(&ty, vec![Entry::field(fx.name("x"), int(1))])
        .unwrap_err();
    assert_eq!(err.message, "invalid key in []int literal");
}

#[test]
fn fixed_array_rejects_index_past_length() {
    let fx = Fixture::new();
    let ty = Arc::new(ArrayType::fixed(Type::INT, 2));
    let err = fx
        .builder()
        .build_array(&ty, vec![Entry::index(2, int(1))])
        .unwrap_err();
    assert_eq!(err.message, "array index 2 out of range [0:2]");
}

#[test]
fn element_conversion_uses_slot_type() {
    let fx = Fixture::new();
    let ty = Arc::new(ArrayType::fixed(Type::Int(IntKind::Uint8), 2));
    let err = fx
        .builder()
        .build_array(&ty, vec![Entry::positional(int(1)), Entry::positional(int(300))])
        .unwrap_err();
    assert_eq!(err.message, "constant 300 overflows uint8");
    assert_eq!(err.notes[0].message, "in element 1 of [2]uint8 literal");
}

#[test]
fn map_literal_inserts_in_order() {
    let fx = Fixture::new();
    let ty = Arc::new(MapType::new(Type::Str, Type::INT));
    let key = |s: &str| Element::Const(Constant::Str(s.into()));
    let m = fx
        .builder()
        .build_map(
            &ty,
            vec![
                Entry::keyed(key("a"), int(1)),
                Entry::keyed(key("b"), int(2)),
                Entry::keyed(key("a"), int(3)),
            ],
        )
        .unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get(&MapKey::new(Value::string("a")).unwrap()), Value::int(3));
}

#[test]
fn empty_map_literal_is_not_nil() {
    let fx = Fixture::new();
    let ty = Arc::new(MapType::new(Type::Str, Type::INT));
    let m = fx.builder().build_map(&ty, vec![]).unwrap();
    assert!(!m.is_nil());
    assert_eq!(m.len(), 0);
}

#[test]
fn map_literal_requires_keys() {
    let fx = Fixture::new();
    let ty = Arc::new(MapType::new(Type::Str, Type::INT));
    let err = fx
        .builder()
        .build_map(&ty, vec![Entry::positional(int(1))])
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::MissingMapKey);
}

#[test]
fn map_literal_with_compound_keys() {
    let fx = Fixture::new();
    let pair = fx.pair();
    let ty = Arc::new(MapType::new(Type::Struct(Arc::clone(&pair)), Type::Str));
    let p = |x, y| Element::Nested(vec![Entry::positional(int(x)), Entry::positional(int(y))]);
    let m = fx
        .builder()
        .build_map(
            &ty,
            vec![
                Entry::keyed(p(1, 2), Element::Const(Constant::Str("a".into()))),
                Entry::keyed(p(2, 1), Element::Const(Constant::Str("b".into()))),
            ],
        )
        .unwrap();
    assert_eq!(m.len(), 2);
}

#[test]
fn nested_pointer_elements_are_allocated() {
    let fx = Fixture::new();
    let pair = Type::Struct(fx.pair());
    let ty = Arc::new(ArrayType::inferred(Type::pointer_to(pair)));
    let arr = fx
        .builder()
        .build_array(
            &ty,
            vec![
                Entry::nested(vec![Entry::positional(int(1)), Entry::positional(int(2))]),
                Entry::nested(vec![Entry::positional(int(1)), Entry::positional(int(2))]),
            ],
        )
        .unwrap();
    let (a, b) = (arr.get(0).unwrap(), arr.get(1).unwrap());
    assert_ne!(a, b, "each &T{{...}} is a fresh allocation");
    let ptr = a.as_pointer().unwrap();
    assert_eq!(fx.slots.load(ptr).unwrap().to_string(), "{1 2}");
}

#[test]
fn nested_literal_needs_composite_slot() {
    let fx = Fixture::new();
    let ty = Arc::new(ArrayType::inferred(Type::INT));
    let err = fx
        .builder()
        .build_array(&ty, vec![Entry::nested(vec![])])
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::InvalidCompositeType { .. }));
}

#[test]
fn build_composite_dispatches_on_type() {
    let fx = Fixture::new();
    let v = fx
        .builder()
        .build_composite(&Type::Struct(fx.pair()), vec![])
        .unwrap();
    assert_eq!(v.to_string(), "{0 0}");
    let err = fx.builder().build_composite(&Type::INT, vec![]).unwrap_err();
    assert_eq!(err.message, "invalid composite literal type int");
}

#[test]
fn any_slots_box_with_dynamic_type() {
    let fx = Fixture::new();
    let ty = Arc::new(ArrayType::inferred(Type::Any));
    let arr = fx
        .builder()
        .build_array(
            &ty,
            vec![
                Entry::positional(int(1)),
                Entry::positional(Element::Const(Constant::Str("1".into()))),
                Entry::positional(Element::Const(Constant::Nil)),
            ],
        )
        .unwrap();
    assert_eq!(arr.get(0), Some(&Value::boxed(Type::INT, Value::int(1))));
    assert_eq!(arr.get(1), Some(&Value::boxed(Type::Str, Value::string("1"))));
    assert!(arr.get(2).unwrap().is_nil());
}
