use std::path::Path;

/// Content types accepted as CSV. Browsers are inconsistent here; Excel
/// exports commonly arrive as `application/vnd.ms-excel`.
const CSV_CONTENT_TYPES: [&str; 3] = ["text/csv", "application/csv", "application/vnd.ms-excel"];

/// Validation errors raised client-side, before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a valid CSV file")]
    NotCsv { filename: String },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,
}

/// CSV file validator
///
/// A file is accepted when its name ends in `.csv` (case-insensitive) or its
/// declared content type is a CSV type, and its size is within the cap.
pub struct CsvValidator {
    max_file_size: usize,
}

impl CsvValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Default 10 MiB cap.
    pub fn with_default_cap() -> Self {
        Self::new(10 * 1024 * 1024)
    }

    pub fn validate(
        &self,
        filename: &str,
        content_type: Option<&str>,
        size: usize,
    ) -> Result<(), ValidationError> {
        if !is_csv_name(filename) && !is_csv_content_type(content_type) {
            return Err(ValidationError::NotCsv {
                filename: filename.to_string(),
            });
        }

        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}

fn is_csv_name(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn is_csv_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| {
            let normalized = ct.to_lowercase();
            CSV_CONTENT_TYPES.iter().any(|accepted| *accepted == normalized)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> CsvValidator {
        CsvValidator::new(1024 * 1024)
    }

    #[test]
    fn accepts_csv_extension() {
        assert!(validator().validate("team.csv", None, 100).is_ok());
        assert!(validator().validate("TEAM.CSV", None, 100).is_ok()); // case insensitive
    }

    #[test]
    fn accepts_csv_content_type_with_odd_name() {
        assert!(validator()
            .validate("export.data", Some("text/csv"), 100)
            .is_ok());
        assert!(validator()
            .validate("export.data", Some("application/vnd.ms-excel"), 100)
            .is_ok());
    }

    #[test]
    fn rejects_non_csv() {
        assert!(matches!(
            validator().validate("report.pdf", Some("application/pdf"), 100),
            Err(ValidationError::NotCsv { .. })
        ));
        assert!(validator().validate("noextension", None, 100).is_err());
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(
            validator().validate("team.csv", None, 0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn rejects_oversized_file() {
        assert!(matches!(
            validator().validate("team.csv", None, 2 * 1024 * 1024),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn size_cap_is_inclusive() {
        assert!(validator().validate("team.csv", None, 1024 * 1024).is_ok());
    }
}
