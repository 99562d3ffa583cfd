//! Tests for the form layer.

use formstate::form::{FormConfig, FormState, ValidationMessage, Validator};
use serde_json::{Value, json};

use crate::helpers::*;

fn required_fields(subject: &Value) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();
    for field in ["name", "email"] {
        if subject[field].as_str().is_none_or(str::is_empty) {
            messages.push(ValidationMessage::new(field, "required"));
        }
    }
    messages
}

#[test]
fn test_initial_touched_and_dirty() -> formstate::Result<()> {
    let form = registration_form(
        FormConfig::default()
            .with_initially_touched(["name"])
            .with_initially_dirty(["address.city"]),
    );
    assert!(form.field_touched("name")?);
    assert!(!form.field_touched("email")?);
    assert!(form.field_dirty("address.city")?);
    assert!(!form.field_dirty("name")?);
    assert!(form.is_form_touched());
    assert!(form.is_form_dirty());
    Ok(())
}

#[test]
fn test_touched_and_dirty_setters() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default());
    assert!(!form.is_form_dirty());
    assert!(!form.is_form_touched());

    form.set_field_dirty(true, "phones.1")?;
    assert!(form.is_form_dirty());
    form.set_dirty_all(false);
    assert!(!form.is_form_dirty());

    form.set_fields_touched(true, ["name", "address.street"])?;
    assert!(form.field_touched("address.street")?);
    form.set_touched_all(false);
    assert!(!form.is_form_touched());

    form.set_fields_dirty(true, ["tags", "preferences"])?;
    assert!(form.field_dirty("preferences")?);
    form.set_field_touched(true, "email")?;
    assert!(form.field_touched("email")?);
    Ok(())
}

#[test]
fn test_revalidation_clears_stale_errors() -> formstate::Result<()> {
    let subject = small_subject();
    let mut form = FormState::new(&subject, &FormConfig::default())?;

    form.set_errors_all(vec![ValidationMessage::new("a.b", "required")])?;
    assert_eq!(form.field_errors("a.b")?, vec!["required".to_string()]);

    form.set_errors_all(vec![ValidationMessage::new("a.c.0", "bad")])?;
    assert!(form.field_errors("a.b")?.is_empty());
    assert_eq!(form.field_errors("a.c.0")?, vec!["bad".to_string()]);
    assert!(form.field_valid("a.b")?);
    assert!(!form.field_valid("a.c.0")?);
    Ok(())
}

#[test]
fn test_errors_group_by_key() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default());
    let batch = vec![
        ValidationMessage::new("email", "required"),
        ValidationMessage::new("name", "too short"),
        ValidationMessage::new("email", "invalid format"),
    ];
    form.set_errors_all(batch.clone())?;

    assert_eq!(
        form.field_errors("email")?,
        vec!["required".to_string(), "invalid format".to_string()]
    );
    assert_eq!(form.error_flat_list(), batch.as_slice());
    assert!(!form.is_form_valid());

    form.set_errors_all(Vec::new())?;
    assert!(form.is_form_valid());
    assert!(form.field_errors("email")?.is_empty());
    Ok(())
}

#[test]
fn test_errors_for_fields_outside_shape() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default());
    form.set_errors_all(vec![ValidationMessage::new("captcha", "missing")])?;
    assert_eq!(form.field_errors("captcha")?, vec!["missing".to_string()]);

    form.set_errors_all(Vec::new())?;
    assert!(form.field_errors("captcha")?.is_empty());
    Ok(())
}

#[test]
fn test_partial_validation_keeps_other_fields() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default());
    form.set_errors_all(vec![
        ValidationMessage::new("name", "required"),
        ValidationMessage::new("email", "required"),
    ])?;

    form.set_errors_partial(
        ["email", "address.city"],
        vec![ValidationMessage::new("address.city", "unknown city")],
    )?;

    assert_eq!(form.field_errors("name")?, vec!["required".to_string()]);
    assert!(form.field_errors("email")?.is_empty());
    assert_eq!(
        form.field_errors("address.city")?,
        vec!["unknown city".to_string()]
    );
    assert_eq!(
        form.error_flat_list(),
        &[
            ValidationMessage::new("name", "required"),
            ValidationMessage::new("address.city", "unknown city"),
        ]
    );
    Ok(())
}

#[test]
fn test_validate_with_function_validator() -> formstate::Result<()> {
    let mut subject = registration_subject();
    let mut form = FormState::new(&subject, &FormConfig::default())?;

    assert!(!form.validate_with(&required_fields, &subject)?);
    assert!(!form.field_valid("name")?);

    subject["name"] = json!("Ada");
    subject["email"] = json!("ada@example.com");
    assert!(form.validate_with(&required_fields, &subject)?);
    assert!(form.field_valid("name")?);
    Ok(())
}

#[test]
fn test_validator_trait_object() -> formstate::Result<()> {
    struct AlwaysFails;
    impl Validator for AlwaysFails {
        fn validate(&self, _subject: &Value) -> Vec<ValidationMessage> {
            vec![ValidationMessage::new("phones.0", "bad number")]
        }
    }

    let subject = registration_subject();
    let validator: Box<dyn Validator> = Box::new(AlwaysFails);
    let mut form = FormState::new(&subject, &FormConfig::default())?;
    assert!(!form.validate_with(validator.as_ref(), &subject)?);
    assert_eq!(form.field_errors("phones.0")?, vec!["bad number".to_string()]);
    Ok(())
}

#[test]
fn test_field_state() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default().with_initially_touched(["name"]));
    form.set_field_dirty(true, "name")?;
    form.set_errors_all(vec![ValidationMessage::new("name", "too short")])?;

    let state = form.field_state("name", "Al".to_string(), String::new())?;
    assert_eq!(state.name, "name");
    assert_eq!(state.current_value, "Al");
    assert!(state.touched);
    assert!(state.dirty);
    assert!(!state.is_valid);
    assert_eq!(state.errors, vec!["too short".to_string()]);

    let json = serde_json::to_value(&state)?;
    assert_eq!(json["isValid"], json!(false));
    assert_eq!(json["currentValue"], json!("Al"));
    Ok(())
}

#[test]
fn test_snapshots() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default());
    form.set_errors_all(vec![ValidationMessage::new("address.zip", "required")])?;
    let errors = serde_json::to_value(form.errors())?;
    assert_eq!(errors["address"]["zip"], json!(["required"]));
    assert_eq!(errors["phones"], json!([[], []]));

    form.set_field_touched(true, "tags")?;
    assert_eq!(leaf_at(&*form.touched(), "tags"), Some(&true));
    assert_eq!(leaf_at(&*form.dirty(), "tags"), Some(&false));
    Ok(())
}

#[test]
fn test_custom_separator_form() -> formstate::Result<()> {
    let subject = registration_subject();
    let config = FormConfig::default()
        .with_separator('/')
        .with_initially_touched(["address/city"]);
    let mut form = FormState::new(&subject, &config)?;
    assert!(form.field_touched("address/city")?);

    form.set_errors_all(vec![ValidationMessage::new("phones/1", "bad")])?;
    assert_eq!(form.field_errors("phones/1")?, vec!["bad".to_string()]);
    Ok(())
}

#[test]
fn test_config_file_loading() -> formstate::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("form.json");
    std::fs::write(
        &path,
        r#"{"initiallyTouched": ["name"], "initiallyDirty": ["email"]}"#,
    )?;

    let config = FormConfig::load(&path)?;
    let form = registration_form(config);
    assert!(form.field_touched("name")?);
    assert!(form.field_dirty("email")?);

    let missing = FormConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(missing.is_config_error());
    Ok(())
}

#[test]
fn test_invalid_separator_rejected_at_construction() {
    let config = FormConfig::default().with_separator('3');
    let err = FormState::new(&registration_subject(), &config).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_conflicting_error_keys_leave_state_untouched() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default());
    form.set_errors_all(vec![ValidationMessage::new("email", "required")])?;

    let err = form
        .set_errors_all(vec![
            ValidationMessage::new("name", "too short"),
            ValidationMessage::new("name.first", "required"),
        ])
        .unwrap_err();
    assert!(err.is_shape_traversal());

    assert_eq!(form.field_errors("email")?, vec!["required".to_string()]);
    assert!(form.field_errors("name")?.is_empty());
    assert_eq!(
        form.error_flat_list(),
        &[ValidationMessage::new("email", "required")]
    );
    assert!(!form.is_form_valid());
    Ok(())
}

#[test]
fn test_failed_partial_fold_leaves_state_untouched() -> formstate::Result<()> {
    let mut form = registration_form(FormConfig::default());
    form.set_errors_all(vec![ValidationMessage::new("email", "required")])?;

    let err = form
        .set_errors_partial(
            ["email"],
            vec![ValidationMessage::new("address.city..x", "bad")],
        )
        .unwrap_err();
    assert!(err.is_path_error());

    assert_eq!(form.field_errors("email")?, vec!["required".to_string()]);
    assert_eq!(form.error_flat_list().len(), 1);
    Ok(())
}

#[test]
fn test_empty_subject_form_accepts_errors() -> formstate::Result<()> {
    let mut form = FormState::new(&json!({}), &FormConfig::default())?;
    assert!(!form.is_form_dirty());
    form.set_errors_all(vec![ValidationMessage::new("name", "required")])?;
    assert_eq!(form.field_errors("name")?, vec!["required".to_string()]);
    Ok(())
}
