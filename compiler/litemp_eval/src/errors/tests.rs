use super::*;

#[test]
fn undefined_variable_has_correct_kind() {
    let err = undefined_variable("missing");
    assert_eq!(
        err.kind,
        RenderErrorKind::UndefinedVariable {
            name: "missing".to_string()
        }
    );
    assert_eq!(err.message, "undefined variable: missing");
    assert!(err.is_lookup());
}

#[test]
fn no_such_member_names_type_and_member() {
    let err = no_such_member("b", "int");
    assert_eq!(err.to_string(), "int value has no member 'b'");
    assert!(err.is_lookup());
}

#[test]
fn arity_mismatch_pluralizes() {
    assert_eq!(
        wrong_arg_count("upper", 1, 0).to_string(),
        "upper expects 1 argument, got 0"
    );
    assert_eq!(
        wrong_arg_count("greeting", 0, 1).to_string(),
        "greeting expects 0 arguments, got 1"
    );
}

#[test]
fn custom_errors_keep_message() {
    let err = RenderError::new("price must be numeric");
    assert_eq!(
        err.kind,
        RenderErrorKind::Custom {
            message: "price must be numeric".to_string()
        }
    );
    assert_eq!(err.to_string(), "price must be numeric");
    assert!(!err.is_lookup());
}

#[test]
fn not_callable_and_not_iterable() {
    assert_eq!(not_callable("str").to_string(), "str is not callable");
    assert_eq!(not_iterable("int").to_string(), "int is not iterable");
}
