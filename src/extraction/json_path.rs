//! Column lookup in JSON rows.
//!
//! Resolves column aliases, including dot-notation paths like
//! "controle.date" for nested exports.

use serde_json::Value;

/// Resolve a dot-notation path to a value in JSON.
///
/// # Examples
/// ```
/// use gmao_compliance::extraction::resolve_json_path;
/// use serde_json::json;
/// let row = json!({"controle": {"date": "2024-01-31"}});
/// let value = resolve_json_path(&row, "controle.date");
/// assert_eq!(value, Some(&json!("2024-01-31")));
/// ```
pub fn resolve_json_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(data);
    }

    let mut current = data;
    for part in path.split('.') {
        match current {
            Value::Object(obj) => {
                current = obj.get(part)?;
            }
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                current = arr.get(index)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Find the first alias holding a non-blank cell.
///
/// A literal key wins over a dotted path, so column headers that happen to
/// contain a dot still resolve.
pub fn lookup_column<'a>(row: &'a Value, aliases: &[String]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| {
        let direct = row.as_object().and_then(|obj| obj.get(alias.as_str()));
        direct
            .or_else(|| resolve_json_path(row, alias))
            .filter(|value| !is_blank(value))
    })
}

/// Null and whitespace-only strings count as empty cells.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Convert a cell to display text. Empty cells yield `None`.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_path() {
        let data = json!({"Nom": "Dupont"});
        assert_eq!(resolve_json_path(&data, "Nom"), Some(&json!("Dupont")));
    }

    #[test]
    fn test_nested_path() {
        let data = json!({"controle": {"date": "2024-01-31", "periode": 6}});
        assert_eq!(resolve_json_path(&data, "controle.periode"), Some(&json!(6)));
    }

    #[test]
    fn test_array_index() {
        let data = json!({"items": [{"id": "A"}, {"id": "B"}]});
        assert_eq!(resolve_json_path(&data, "items.1.id"), Some(&json!("B")));
    }

    #[test]
    fn test_missing_path() {
        let data = json!({"name": "test"});
        assert_eq!(resolve_json_path(&data, "missing"), None);
        assert_eq!(resolve_json_path(&data, "name.nested"), None);
    }

    #[test]
    fn test_lookup_column_first_non_blank_alias() {
        let row = json!({"id": "", "ID": null, "Code": "T-7"});
        let aliases = vec!["id".to_string(), "ID".to_string(), "Code".to_string()];
        assert_eq!(lookup_column(&row, &aliases), Some(&json!("T-7")));
    }

    #[test]
    fn test_lookup_column_dotted_header() {
        let row = json!({"Réf.": "R-1"});
        assert_eq!(lookup_column(&row, &["Réf.".to_string()]), Some(&json!("R-1")));
    }

    #[test]
    fn test_lookup_column_none() {
        let row = json!({"other": 1});
        assert_eq!(lookup_column(&row, &["id".to_string()]), None);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!(null)), None);
        assert_eq!(value_to_string(&json!("   ")), None);
        assert_eq!(value_to_string(&json!(" NC ")), Some("NC".to_string()));
        assert_eq!(value_to_string(&json!(12)), Some("12".to_string()));
        assert_eq!(value_to_string(&json!(true)), Some("true".to_string()));
    }
}
