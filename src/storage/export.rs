//! CSV export of enriched rows.

use crate::error::ExportResult;
use crate::models::{EnrichedRow, ROW_HEADER};
use std::io::Write;
use std::path::Path;

/// Write rows with the standard header to any writer.
pub fn write_rows_to<W: Write>(writer: W, rows: &[EnrichedRow]) -> ExportResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(ROW_HEADER)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows to a file, replacing it.
pub fn write_rows(path: impl AsRef<Path>, rows: &[EnrichedRow]) -> ExportResult<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_rows_to(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only_for_no_rows() {
        let mut out = Vec::new();
        write_rows_to(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,title,company,domain,headcount,email,status,reason,mx_hosts,source_url\n"
        );
    }

    #[test]
    fn test_mx_hosts_are_quoted() {
        let row = EnrichedRow {
            name: "Jane Smith".into(),
            mx_hosts: "mx1.acme.com,mx2.acme.com".into(),
            headcount: Some(40),
            ..EnrichedRow::default()
        };
        let mut out = Vec::new();
        write_rows_to(&mut out, &[row]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let line = text.lines().nth(1).unwrap();
        assert_eq!(line, "Jane Smith,,,,40,,,,\"mx1.acme.com,mx2.acme.com\",");
    }
}
