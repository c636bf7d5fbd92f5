use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};

use crate::contract::SpreadsheetSummary;
use crate::error::ProcessingError;

/// Decodes a downloaded workbook and lists its sheets.
///
/// The container format (xls, xlsx, xlsb, ods) is detected from the bytes, not
/// from the download URL.
pub fn summarize_workbook(bytes: &[u8]) -> Result<SpreadsheetSummary, ProcessingError> {
    if bytes.is_empty() {
        return Err(ProcessingError::parse("spreadsheet file is empty"));
    }

    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|error| ProcessingError::parse(error.to_string()))?;

    let sheet_names = workbook.sheet_names();
    Ok(SpreadsheetSummary::from_sheet_names(sheet_names.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::xlsx_with_sheets;

    #[test]
    fn lists_sheet_names_in_workbook_order() {
        let bytes = xlsx_with_sheets(&["Sheet1", "Sheet2"]);
        let summary = summarize_workbook(&bytes).expect("fixture should parse");
        assert_eq!(summary.pages, "Sheet1,Sheet2");
    }

    #[test]
    fn preserves_non_ascii_sheet_names() {
        let bytes = xlsx_with_sheets(&["Žádosti", "Přehled 2026"]);
        let summary = summarize_workbook(&bytes).expect("fixture should parse");
        assert_eq!(summary.pages, "Žádosti,Přehled 2026");
    }

    #[test]
    fn rejects_empty_input() {
        let error = summarize_workbook(&[]).expect_err("empty input");
        assert_eq!(error.kind(), "parse_failed");
    }

    #[test]
    fn rejects_html_error_page() {
        let error = summarize_workbook(b"<html><body>404 Not Found</body></html>")
            .expect_err("html is not a workbook");
        assert_eq!(error.kind(), "parse_failed");
        assert!(!error.message().is_empty());
    }
}
