//! Stream title and description validation

use super::ValidationError;

/// Maximum length for stream descriptions, in characters
const MAX_DESCRIPTION_LEN: usize = 500;

/// Validated stream title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTitle(String);

impl StreamTitle {
    /// Create a new stream title.
    ///
    /// # Rules
    /// - Non-empty after trimming whitespace
    /// - No NUL characters (Postgres text can't hold them)
    /// - Stored exactly as given
    ///
    /// # Example
    /// ```
    /// use streamctl_server::models::StreamTitle;
    ///
    /// assert!(StreamTitle::new("Morning stream").is_ok());
    /// assert!(StreamTitle::new("").is_err());
    /// assert!(StreamTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Required { field: "title" });
        }
        if s.contains('\0') {
            return Err(ValidationError::InvalidFormat { field: "title" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated stream description (may be empty)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamDescription(String);

impl StreamDescription {
    /// Create a description of at most 500 characters, without NULs.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.contains('\0') {
            return Err(ValidationError::InvalidFormat {
                field: "description",
            });
        }

        if s.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_titles() {
        assert!(StreamTitle::new("My Stream").is_ok());
        assert!(StreamTitle::new("a").is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        assert_eq!(
            StreamTitle::new("").unwrap_err(),
            ValidationError::Required { field: "title" }
        );
        assert!(matches!(
            StreamTitle::new(" \t ").unwrap_err(),
            ValidationError::Required { .. }
        ));
    }

    #[test]
    fn title_kept_verbatim() {
        let title = StreamTitle::new("  padded  ").unwrap();
        assert_eq!(title.as_str(), "  padded  ");
    }

    #[test]
    fn rejects_nul_characters() {
        assert_eq!(
            StreamTitle::new("live\0now").unwrap_err(),
            ValidationError::InvalidFormat { field: "title" }
        );
        assert_eq!(
            StreamDescription::new("d\0x").unwrap_err(),
            ValidationError::InvalidFormat {
                field: "description"
            }
        );
    }

    #[test]
    fn description_may_be_empty() {
        assert_eq!(StreamDescription::new("").unwrap(), StreamDescription::default());
    }

    #[test]
    fn description_max_length_counts_chars() {
        // 500 multibyte chars is well over 500 bytes but still allowed
        let at_limit = "配".repeat(500);
        assert!(StreamDescription::new(&at_limit).is_ok());

        let over = "a".repeat(501);
        let err = StreamDescription::new(&over).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 500, .. }));
    }
}
