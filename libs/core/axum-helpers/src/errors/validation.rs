//! Flattening of `validator` errors into a single client-facing sentence.

use validator::{ValidationError, ValidationErrors};

/// Render every field failure as
/// `invalid input on field 'title'; expected 'length(min=3, max=100)', got 'ab'`,
/// joined with `", "`. Fields are sorted by name; rule parameters list `min` and
/// `max` first, then the rest alphabetically.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                format!(
                    "invalid input on field '{}'; expected '{}', got '{}'",
                    field,
                    expected_rule(err),
                    got_value(err)
                )
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn expected_rule(err: &ValidationError) -> String {
    let mut params: Vec<_> = err
        .params
        .iter()
        .filter(|(name, _)| **name != "value")
        .collect();

    if params.is_empty() {
        return err.code.to_string();
    }

    params.sort_by_key(|(name, _)| (param_rank(name), name.to_string()));
    let rendered = params
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, display_value(value)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{}({})", err.code, rendered)
}

fn param_rank(name: &str) -> u8 {
    match name {
        "min" => 0,
        "max" => 1,
        _ => 2,
    }
}

fn got_value(err: &ValidationError) -> String {
    err.params
        .get("value")
        .map(display_value)
        .unwrap_or_default()
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
