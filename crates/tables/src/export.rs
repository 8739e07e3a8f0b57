//! Treatment-major export form.
//!
//! The interchange consumed by the simulation runner: header row
//! "Name,<attr>,<attr>,…", one row per treatment. The same logical table
//! as the snapshot form, transposed.

use crate::error::TableError;
use crate::table::ConfigurationTable;

/// Header cell of the treatment-id key column.
const KEY_HEADER: &str = "Name";

pub fn to_export_csv(table: &ConfigurationTable) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = vec![KEY_HEADER];
    header.extend(table.attributes().iter().map(String::as_str));
    // Writing to a Vec cannot fail.
    writer.write_record(&header).expect("in-memory write");

    for (ti, treatment) in table.treatments().iter().enumerate() {
        let mut record: Vec<&str> = vec![treatment.as_str()];
        record.extend(table.rows().iter().map(|row| row[ti].as_str()));
        writer.write_record(&record).expect("in-memory write");
    }

    let bytes = writer.into_inner().expect("in-memory flush");
    String::from_utf8(bytes).expect("csv writer emits UTF-8")
}

pub fn from_export_csv(input: &str) -> Result<ConfigurationTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TableError::Parse(e.to_string()))?
        .clone();
    let mut fields = headers.iter();
    match fields.next() {
        Some(KEY_HEADER) => {}
        other => {
            return Err(TableError::Parse(format!(
                "expected first header cell '{KEY_HEADER}', found {other:?}"
            )))
        }
    }
    let attributes: Vec<String> = fields.map(str::to_string).collect();

    let mut treatments: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<String>> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TableError::Parse(e.to_string()))?;
        if record.len() != attributes.len() + 1 {
            return Err(TableError::Parse(format!(
                "row {} has {} fields, expected {}",
                line + 2,
                record.len(),
                attributes.len() + 1
            )));
        }
        treatments.push(record[0].to_string());
        columns.push(record.iter().skip(1).map(str::to_string).collect());
    }

    let values: Vec<Vec<String>> = (0..attributes.len())
        .map(|a| columns.iter().map(|col| col[a].clone()).collect())
        .collect();

    ConfigurationTable::from_parts(attributes, treatments, values)
}
