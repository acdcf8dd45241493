use pretty_assertions::assert_eq;

use super::*;
use crate::{DefaultObjectWrapper, EvalErrorKind};

fn upper() -> HostMethod {
    HostMethod::simple("upper", |args| {
        let s = args.first().and_then(HostValue::as_str).unwrap_or_default();
        Ok(HostValue::Str(s.to_uppercase()))
    })
}

fn kinds() -> HostMethod {
    HostMethod::extended("kinds", |args| {
        let names: Vec<Model> = args.iter().map(|m| Model::from(m.type_name())).collect();
        Ok(Model::sequence(names))
    })
}

#[test]
fn simple_method_gets_raw_values() {
    let result = upper().call(
        HostArguments::Values(&[HostValue::from("quill")]),
        &DefaultObjectWrapper,
    );
    assert_eq!(result.ok(), Some(Model::from("QUILL")));
}

#[test]
fn extended_method_gets_models() {
    let result = kinds().call(
        HostArguments::Models(&[Model::from(1_i64), Model::from("s")]),
        &DefaultObjectWrapper,
    );
    assert_eq!(
        result.ok().map(|m| m.to_string()),
        Some("[integer, string]".to_string())
    );
}

#[test]
fn wrong_representation_is_rejected() {
    let err = upper()
        .call(HostArguments::Models(&[]), &DefaultObjectWrapper)
        .err()
        .map(|e| e.kind);
    assert_eq!(
        err,
        Some(EvalErrorKind::ArgumentMarshallingMismatch {
            method: "upper".to_string(),
            expected: "raw values",
            got: "models",
        })
    );
    let err = kinds()
        .call(HostArguments::Values(&[]), &DefaultObjectWrapper)
        .err()
        .map(|e| e.kind);
    assert!(matches!(
        err,
        Some(EvalErrorKind::ArgumentMarshallingMismatch {
            expected: "models",
            ..
        })
    ));
}

#[test]
fn host_errors_propagate() {
    let failing = HostMethod::simple("fail", |_| Err(EvalError::new("nope")));
    let err = failing.call(HostArguments::Values(&[]), &DefaultObjectWrapper);
    assert_eq!(err.err().map(|e| e.message), Some("nope".to_string()));
}

#[test]
fn equality_is_by_identity() {
    let a = upper();
    assert_eq!(a, a.clone());
    assert_ne!(a, upper());
    assert_eq!(format!("{:?}", kinds()), "HostMethod(kinds, extended)");
}
