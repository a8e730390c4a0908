//! Organizer list normalization.
//!
//! Admin forms have submitted organizers in several shapes over time: a
//! repeated form field, a JSON-encoded array, a comma-separated string, and
//! the older single `organizer` field. Everything is reduced to an ordered
//! list of trimmed, non-empty names.

use serde_json::Value;

/// Outcome of normalizing organizers for a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizersUpdate {
    /// The field was omitted; stored organizers stay as they are
    NoChange,
    /// Replace stored organizers with this list (possibly empty)
    Replace(Vec<String>),
}

impl OrganizersUpdate {
    /// Merge into the currently stored list
    pub fn apply(self, existing: Vec<String>) -> Vec<String> {
        match self {
            OrganizersUpdate::NoChange => existing,
            OrganizersUpdate::Replace(organizers) => organizers,
        }
    }
}

/// Normalize organizers for a newly created conference.
///
/// Absent, null or empty input yields an empty list.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use spaceweather_portal::utils::normalize_for_create;
///
/// assert_eq!(normalize_for_create(Some(&json!("X, Y,  Z"))), vec!["X", "Y", "Z"]);
/// assert_eq!(normalize_for_create(Some(&json!(r#"["X","Y"]"#))), vec!["X", "Y"]);
/// assert!(normalize_for_create(None).is_empty());
/// ```
pub fn normalize_for_create(input: Option<&Value>) -> Vec<String> {
    normalize(input).unwrap_or_default()
}

/// Normalize organizers for a partial update.
///
/// Absent, null or empty input yields [`OrganizersUpdate::NoChange`] so that
/// omitting the field never clears existing organizers.
pub fn normalize_for_update(input: Option<&Value>) -> OrganizersUpdate {
    match normalize(input) {
        Some(organizers) => OrganizersUpdate::Replace(organizers),
        None => OrganizersUpdate::NoChange,
    }
}

/// Resolve organizers on create, falling back to the legacy single field
/// when the primary input yields nothing.
pub fn resolve_for_create(primary: Option<&Value>, legacy: Option<&Value>) -> Vec<String> {
    let organizers = normalize_for_create(primary);
    if organizers.is_empty() {
        normalize_for_create(legacy)
    } else {
        organizers
    }
}

/// Resolve organizers on update, falling back to the legacy single field
/// when the primary input was omitted.
pub fn resolve_for_update(primary: Option<&Value>, legacy: Option<&Value>) -> OrganizersUpdate {
    match normalize_for_update(primary) {
        OrganizersUpdate::NoChange => normalize_for_update(legacy),
        replace => replace,
    }
}

/// `None` means the input carried no organizer information at all.
fn normalize(input: Option<&Value>) -> Option<Vec<String>> {
    match input? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::Array(items) => Some(from_elements(items)),
        Value::String(text) => {
            if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
                return Some(from_elements(&items));
            }
            Some(split_commas(text))
        }
        _ => None,
    }
}

fn from_elements(items: &[Value]) -> Vec<String> {
    items.iter().filter_map(element_name).collect()
}

fn element_name(item: &Value) -> Option<String> {
    let name = match item {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}

fn split_commas(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
