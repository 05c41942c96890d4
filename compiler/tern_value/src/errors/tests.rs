use super::*;
use pretty_assertions::assert_eq;

#[test]
fn nil_map_assignment_has_correct_kind() {
    let err = assignment_to_nil_map();
    assert_eq!(err.kind, EvalErrorKind::NilMapAssignment);
    assert_eq!(err.message, "assignment to entry in nil map");
}

#[test]
fn array_index_out_of_range_message() {
    let err = array_index_out_of_range(5, 3);
    assert_eq!(
        err.kind,
        EvalErrorKind::ArrayIndexOutOfRange { index: 5, len: 3 }
    );
    assert_eq!(err.message, "array index 5 out of range [0:3]");
}

#[test]
fn too_many_struct_values_names_type() {
    let err = too_many_struct_values("Point", 2, 3);
    assert_eq!(
        err.message,
        "too many values in struct literal of type Point (expected 2, got 3)"
    );
}

#[test]
fn unknown_field_names_field_and_type() {
    let err = unknown_field("z", "Point");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownField {
            field: "z".to_string(),
            type_name: "Point".to_string(),
        }
    );
    assert_eq!(err.message, "unknown field z in struct literal of type Point");
}

#[test]
fn unhashable_key_message() {
    assert_eq!(
        unhashable_key("map[string]int").message,
        "unhashable key kind: map[string]int"
    );
}

#[test]
fn not_addressable_message() {
    assert_eq!(
        not_addressable("int").message,
        "cannot take the address of a member of int"
    );
}

#[test]
fn custom_error_uses_message_as_kind() {
    let err = EvalError::new("boom");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "boom".to_string()
        }
    );
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn notes_render_after_message() {
    let err = negative_array_index(-1)
        .with_note(EvalNote::new("in element 0 of [3]int literal"))
        .with_note(EvalNote::new("in field grid of Board literal"));
    assert_eq!(
        err.render(),
        "array index -1 must be non-negative\n  note: in element 0 of [3]int literal\n  note: in field grid of Board literal"
    );
    // Display stays the bare message.
    assert_eq!(err.to_string(), "array index -1 must be non-negative");
}
