use super::*;

#[test]
fn string_payload_derefs_to_str() {
    let s = Heap::new(String::from("tern"));
    assert_eq!(s.len(), 4);
    assert!(s.starts_with("te"));
}

#[test]
fn clones_share_one_allocation() {
    let original = Heap::new(String::from("shared"));
    let copy = original.clone();
    assert!(Heap::ptr_eq(&original, &copy));
    assert_eq!(Arc::strong_count(&copy.0), 2);
}

#[test]
fn separate_allocations_compare_by_contents() {
    let a = Heap::new(String::from("key"));
    let b = Heap::new(String::from("key"));
    let c = Heap::new(String::from("other"));
    assert!(!Heap::ptr_eq(&a, &b));
    assert!(a == b);
    assert!(a != c);
}

#[test]
fn non_clone_payloads_can_be_shared() {
    struct Opaque(u8);
    let h = Heap::new(Opaque(3));
    let h2 = h.clone();
    assert_eq!((*h2).0, 3);
}
