//! Test helpers shared by unit tests and downstream crates.
//!
//! Enabled for this crate's own tests and for dependents through the
//! `test-helpers` feature.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Status page markup carrying a single download anchor.
pub fn status_page_html(href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head><title>Status of your application</title></head>
  <body>
    <a href="index.aspx">Ministry of the Interior</a>
    <p>The list of applications is updated regularly.</p>
    <a class="dark" href="{href}">Download the current list</a>
  </body>
</html>"#
    )
}

/// Builds a minimal OOXML workbook whose sheets carry the given names.
///
/// Sheets are empty; only the package parts a reader needs to enumerate sheet
/// names are written.
///
/// # Panics
///
/// Panics if the in-memory archive cannot be written (should never happen).
pub fn xlsx_with_sheets(names: &[&str]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    let mut write_part = |path: &str, contents: String| {
        zip.start_file(path, options)
            .expect("failed to start workbook part");
        zip.write_all(contents.as_bytes())
            .expect("failed to write workbook part");
    };

    let sheet_overrides: String = (1..=names.len())
        .map(|index| {
            format!(
                r#"<Override PartName="/xl/worksheets/sheet{index}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
            )
        })
        .collect();
    write_part(
        "[Content_Types].xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{sheet_overrides}</Types>"#
        ),
    );

    write_part(
        "_rels/.rels",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
            .to_string(),
    );

    let sheet_entries: String = names
        .iter()
        .enumerate()
        .map(|(offset, name)| {
            let index = offset + 1;
            format!(
                r#"<sheet name="{}" sheetId="{index}" r:id="rId{index}"/>"#,
                escape_xml(name)
            )
        })
        .collect();
    write_part(
        "xl/workbook.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheet_entries}</sheets></workbook>"#
        ),
    );

    let relationships: String = (1..=names.len())
        .map(|index| {
            format!(
                r#"<Relationship Id="rId{index}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{index}.xml"/>"#
            )
        })
        .collect();
    write_part(
        "xl/_rels/workbook.xml.rels",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{relationships}</Relationships>"#
        ),
    );

    for index in 1..=names.len() {
        write_part(
            &format!("xl/worksheets/sheet{index}.xml"),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#
                .to_string(),
        );
    }

    zip.finish()
        .expect("failed to finish workbook archive")
        .into_inner()
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
