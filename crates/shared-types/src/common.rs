use std::fmt;

/// A text column held a value outside its enum's fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

/// Lowercase, trimmed form used when matching enum text.
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_kind_and_value() {
        let err = ParseEnumError::new("internship status", "archived");
        assert_eq!(err.to_string(), "unknown internship status 'archived'");
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Under_Review "), "under_review");
    }
}
