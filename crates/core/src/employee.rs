//! Employee helpers: display names and the admin-edit audit diff.

use serde_json::Value;

/// Fallback display name for employees with empty name fields.
pub const UNNAMED: &str = "No name";

/// `"<lastname> <name>"`, trimmed, or [`UNNAMED`] when both are blank.
pub fn display_name(lastname: &str, name: &str) -> String {
    let full = format!("{} {}", lastname.trim(), name.trim());
    let full = full.trim();
    if full.is_empty() {
        UNNAMED.to_string()
    } else {
        full.to_string()
    }
}

/// One changed field of an admin edit. Becomes one `employee_audit` row.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: Value,
    pub new_value: Value,
}

/// Append a [`FieldChange`] when `proposed` is set and differs from `current`.
pub fn record_change<T>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    current: &T,
    proposed: Option<&T>,
) where
    T: Clone + PartialEq + Into<Value>,
{
    if let Some(new) = proposed {
        if new != current {
            changes.push(FieldChange {
                field,
                old_value: current.clone().into(),
                new_value: new.clone().into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn display_name_orders_lastname_first() {
        assert_eq!(display_name("Petrova", "Anna"), "Petrova Anna");
    }

    #[test]
    fn display_name_trims_blank_parts() {
        assert_eq!(display_name("  ", "Anna "), "Anna");
        assert_eq!(display_name("", ""), UNNAMED);
    }

    #[test]
    fn unchanged_values_are_skipped() {
        let mut changes = Vec::new();
        record_change(&mut changes, "coins", &10_i64, Some(&10));
        record_change(&mut changes, "is_admin", &false, None);
        assert!(changes.is_empty());
    }

    #[test]
    fn changed_values_are_recorded() {
        let mut changes = Vec::new();
        record_change(&mut changes, "coins", &10_i64, Some(&25));
        record_change(&mut changes, "name", &"Ann".to_string(), Some(&"Anna".to_string()));
        assert_eq!(
            changes,
            vec![
                FieldChange {
                    field: "coins",
                    old_value: json!(10),
                    new_value: json!(25),
                },
                FieldChange {
                    field: "name",
                    old_value: json!("Ann"),
                    new_value: json!("Anna"),
                },
            ]
        );
    }
}
