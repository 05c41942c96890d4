use super::*;
use pretty_assertions::assert_eq;
use tern_value::EvalErrorKind;

#[test]
fn cursor_advances_after_each_place() {
    let mut b = SparseArrayBuilder::new(None, 100);
    b.place(Value::int(1)).unwrap();
    b.place(Value::int(2)).unwrap();
    assert_eq!(b.cursor(), 2);
    assert_eq!(b.finish(&Type::INT), vec![Value::int(1), Value::int(2)]);
}

#[test]
fn seek_leaves_zero_gaps() {
    let mut b = SparseArrayBuilder::new(None, 100);
    b.seek(3).unwrap();
    b.place(Value::int(9)).unwrap();
    assert_eq!(b.len(), 4);
    assert_eq!(
        b.finish(&Type::INT),
        vec![Value::int(0), Value::int(0), Value::int(0), Value::int(9)]
    );
}

#[test]
fn later_write_wins() {
    let mut b = SparseArrayBuilder::new(None, 100);
    b.place(Value::int(1)).unwrap();
    b.seek(0).unwrap();
    b.place(Value::int(2)).unwrap();
    assert_eq!(b.finish(&Type::INT), vec![Value::int(2)]);
}

#[test]
fn fixed_length_pads_and_bounds() {
    let mut b = SparseArrayBuilder::new(Some(3), 100);
    b.place(Value::int(1)).unwrap();
    b.seek(3).unwrap();
    let err = b.place(Value::int(1)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArrayIndexOutOfRange { index: 3, len: 3 }
    );
    assert_eq!(
        b.finish(&Type::INT),
        vec![Value::int(1), Value::int(0), Value::int(0)]
    );
}

#[test]
fn negative_seek_fails() {
    let mut b = SparseArrayBuilder::new(None, 100);
    let err = b.seek(-2).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::NegativeArrayIndex { index: -2 });
}

#[test]
fn limit_is_enforced() {
    let mut b = SparseArrayBuilder::new(None, 8);
    b.seek(7).unwrap();
    b.place(Value::int(1)).unwrap();
    let err = b.place(Value::int(1)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::LiteralTooLarge { len: 9, limit: 8 });
}

#[test]
fn huge_index_does_not_allocate() {
    let mut b = SparseArrayBuilder::new(None, 1 << 24);
    b.seek(i64::MAX).unwrap();
    assert!(matches!(
        b.place(Value::int(1)).unwrap_err().kind,
        EvalErrorKind::LiteralTooLarge { .. }
    ));
    assert!(b.is_empty());
}

#[test]
fn fixed_length_ignores_the_size_limit() {
    let mut b = SparseArrayBuilder::new(Some(8), 4);
    b.seek(5).unwrap();
    b.place(Value::int(1)).unwrap();
    let elems = b.finish(&Type::INT);
    assert_eq!(elems.len(), 8);
    assert_eq!(elems[5], Value::int(1));
}
