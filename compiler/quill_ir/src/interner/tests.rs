use super::*;

#[test]
fn intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("macro");
    let b = interner.intern("macro");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "macro");
}

#[test]
fn empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.len(), 1);
}

#[test]
fn get_does_not_insert() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("x"), None);
    let x = interner.intern("x");
    assert_eq!(interner.get("x"), Some(x));
    assert_eq!(interner.len(), 2);
}

#[test]
fn distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    let a = interner.intern("m1");
    let b = interner.intern("m2");
    assert_ne!(a, b);
    assert_eq!(interner.lookup(b), "m2");
}

#[test]
fn shared_interner_is_shared() {
    let shared = SharedInterner::new();
    let other = shared.clone();
    let name = shared.intern("x");
    assert_eq!(other.get("x"), Some(name));
}

#[test]
fn concurrent_interning_agrees() {
    use std::thread;

    let shared = SharedInterner::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = shared.clone();
            thread::spawn(move || interner.intern("contended"))
        })
        .collect();

    let names: Vec<Name> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or(Name::EMPTY))
        .collect();
    assert!(names.iter().all(|n| *n == names[0]));
    assert_ne!(names[0], Name::EMPTY);
}
