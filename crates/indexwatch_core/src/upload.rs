use std::fmt;

/// Largest CSV the dashboard will send, in bytes (5 MB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const CSV_EXTENSION: &str = ".csv";

/// Why a picked file was refused before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    NotCsv,
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

impl UploadRejection {
    /// Text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            UploadRejection::NotCsv => "Please select a CSV file",
            UploadRejection::TooLarge { .. } => "File size must be less than 5MB",
        }
    }
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::NotCsv => write!(f, "not a csv file"),
            UploadRejection::TooLarge {
                size_bytes,
                max_bytes,
            } => write!(f, "file too large ({size_bytes} > {max_bytes} bytes)"),
        }
    }
}

pub fn has_csv_extension(file_name: &str) -> bool {
    let name = file_name.trim();
    name.len()
        .checked_sub(CSV_EXTENSION.len())
        .and_then(|start| name.get(start..))
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}

/// Pre-flight checks only; the server remains the authority on row limits.
pub fn validate_upload(file_name: &str, size_bytes: u64) -> Result<(), UploadRejection> {
    if !has_csv_extension(file_name) {
        return Err(UploadRejection::NotCsv);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge {
            size_bytes,
            max_bytes: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_csv_extension("urls.csv"));
        assert!(has_csv_extension("URLS.CSV"));
        assert!(!has_csv_extension("urls.csv.txt"));
        assert!(has_csv_extension(".csv"));
        assert!(!has_csv_extension("csv"));
        assert!(!has_csv_extension("x.txt"));
    }

    #[test]
    fn exact_limit_is_accepted() {
        assert_eq!(validate_upload("a.csv", MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(
            validate_upload("a.csv", MAX_UPLOAD_BYTES + 1),
            Err(UploadRejection::TooLarge {
                size_bytes: MAX_UPLOAD_BYTES + 1,
                max_bytes: MAX_UPLOAD_BYTES,
            })
        );
    }

    #[test]
    fn extension_is_checked_before_size() {
        assert_eq!(
            validate_upload("huge.txt", 10 * MAX_UPLOAD_BYTES),
            Err(UploadRejection::NotCsv)
        );
    }
}
