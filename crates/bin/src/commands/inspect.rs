//! Inspect command - per-field touched, dirty and error state of a document.

use formstate::{
    flatten_object,
    form::{FieldState, FormConfig, FormState, ValidationMessage},
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::InspectArgs;
use crate::output::{OutputFormat, print_table, read_json};

/// Everything the inspect command prints.
#[derive(Debug, Serialize)]
struct Report {
    fields: Vec<FieldState<Value>>,
    touched: bool,
    dirty: bool,
    valid: bool,
}

/// Run the inspect command
pub fn run(args: &InspectArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let subject: Value = read_json(&args.file)?;
    let config = match &args.config {
        Some(path) => FormConfig::load(path)?,
        None => FormConfig::default(),
    };
    let errors: Vec<ValidationMessage> = match &args.errors {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let report = build_report(&subject, &config, errors)?;

    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = report
                .fields
                .iter()
                .map(|field| {
                    vec![
                        field.name.clone(),
                        field.touched.to_string(),
                        field.dirty.to_string(),
                        field.is_valid.to_string(),
                        field.errors.join("; "),
                    ]
                })
                .collect();
            print_table(&["FIELD", "TOUCHED", "DIRTY", "VALID", "ERRORS"], &rows);
            println!();
            println!("Form touched: {}", report.touched);
            println!("Form dirty:   {}", report.dirty);
            println!("Form valid:   {}", report.valid);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    Ok(())
}

/// Builds the form, folds `errors` and collects one [`FieldState`] per leaf.
///
/// Error keys outside the document shape are listed after the document's
/// own fields. No earlier version of the document exists here, so
/// `previous_value` is always null.
fn build_report(
    subject: &Value,
    config: &FormConfig,
    errors: Vec<ValidationMessage>,
) -> formstate::Result<Report> {
    let mut form = FormState::new(subject, config)?;

    let mut names: Vec<(String, Value)> = flatten_object(subject, config.separator)
        .into_iter()
        .map(|(name, value)| (name, value.clone()))
        .collect();
    for error in &errors {
        if !names.iter().any(|(name, _)| *name == error.key) {
            names.push((error.key.clone(), Value::Null));
        }
    }

    form.set_errors_all(errors)?;

    let fields = names
        .into_iter()
        .map(|(name, value)| form.field_state(&name, value, Value::Null))
        .collect::<formstate::Result<Vec<_>>>()?;

    Ok(Report {
        fields,
        touched: form.is_form_touched(),
        dirty: form.is_form_dirty(),
        valid: form.is_form_valid(),
    })
}
