use serde::{Deserialize, Serialize};

/// Label set and task kind for a project. Supplied by the external store
/// and read-only here; the label order fixes the shortcut order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSchema {
    pub labels: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Only the first nine labels get digit shortcuts.
pub const MAX_SHORTCUTS: usize = 9;

impl ProjectSchema {
    pub fn new(labels: Vec<String>, kind: impl Into<String>) -> Self {
        Self {
            labels,
            kind: kind.into(),
        }
    }

    /// Label bound to a digit key. `1` maps to the first label, `9` to the
    /// ninth; `0`, non-digits, and digits past the label list are unbound.
    pub fn shortcut_label(&self, digit: char) -> Option<&str> {
        let index = digit.to_digit(10)? as usize;
        if index == 0 {
            return None;
        }
        self.labels.get(index - 1).map(String::as_str)
    }

    /// Shortcut key displayed next to the label at `index`, if it has one
    pub fn shortcut_for(&self, index: usize) -> Option<char> {
        if index < MAX_SHORTCUTS && index < self.labels.len() {
            char::from_digit(index as u32 + 1, 10)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(labels: &[&str]) -> ProjectSchema {
        ProjectSchema::new(labels.iter().map(|s| s.to_string()).collect(), "ner")
    }

    #[test]
    fn test_digit_shortcuts_are_one_based() {
        let schema = schema(&["ANIMAL", "COLOR"]);
        assert_eq!(schema.shortcut_label('1'), Some("ANIMAL"));
        assert_eq!(schema.shortcut_label('2'), Some("COLOR"));
        assert_eq!(schema.shortcut_label('3'), None);
        assert_eq!(schema.shortcut_label('0'), None);
        assert_eq!(schema.shortcut_label('x'), None);
    }

    #[test]
    fn test_only_first_nine_labels_bind() {
        let labels: Vec<&str> = (0..12).map(|_| "L").collect();
        let schema = schema(&labels);
        assert_eq!(schema.shortcut_label('9'), Some("L"));
        assert_eq!(schema.shortcut_for(8), Some('9'));
        assert_eq!(schema.shortcut_for(9), None);
        assert_eq!(schema.shortcut_for(11), None);
    }
}
