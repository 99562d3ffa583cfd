//! Flatten command - prints every leaf of a JSON document with its path.

use formstate::{FlatEntry, flatten_object_to_array};
use serde_json::Value;

use crate::cli::FlattenArgs;
use crate::output::{OutputFormat, print_table, read_json};

/// Run the flatten command
pub fn run(args: &FlattenArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let subject: Value = read_json(&args.file)?;
    let entries = flatten_object_to_array(&subject, args.separator);
    tracing::debug!(leaves = entries.len(), "Flattened document");

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No fields found.");
                return Ok(());
            }
            print_table(&["FIELD", "VALUE"], &rows(&entries));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&entries)?);
        }
    }

    Ok(())
}

/// `[path, value]` rows for the human table.
fn rows(entries: &[FlatEntry<&Value>]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|entry| vec![entry.key.clone(), entry.value.to_string()])
        .collect()
}
