//! Generated document buffer

use crate::docx::DOCX_MIME;

/// Fallback file name for reports without a name
pub const DEFAULT_FILE_STEM: &str = "rapport";

/// A finished `.docx` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    /// `<report name>.docx`
    pub filename: String,
    /// Number of sections, one per report page
    pub page_count: usize,
}

impl GeneratedDocument {
    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME
    }

    pub fn extension(&self) -> &'static str {
        "docx"
    }
}

/// File name offered for download
pub fn file_name(report_name: &str) -> String {
    let stem = report_name.trim();
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    format!("{}.docx", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("Rapport Mensuel"), "Rapport Mensuel.docx");
        assert_eq!(file_name("  "), "rapport.docx");
    }
}
