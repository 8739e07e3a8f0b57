//! Trial workbook ingest.
//!
//! One sheet per site: the first column ("Name") labels attribute rows,
//! every other named column is a treatment. The declared row cap and the
//! unnamed-column filter are applied here, at the boundary. A directory
//! of `<Site>.csv` files with the same shape is accepted in place of a
//! workbook.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use tracing::debug;

use fieldbench_tables::SiteSheet;

use crate::error::IoError;

/// Placeholder header spreadsheet tools give columns with no name.
const UNNAMED_PREFIX: &str = "Unnamed";

/// Load the listed site sheets in order. `source` is either a workbook
/// file or a directory of per-site CSV files.
pub fn load_site_sheets(
    source: &Path,
    sheets: &[String],
    row_cap: usize,
    drop_unnamed: bool,
) -> Result<Vec<SiteSheet>, IoError> {
    if source.is_dir() {
        sheets
            .iter()
            .map(|site| {
                let path = source.join(format!("{site}.csv"));
                let grid = csv_grid(&path)?;
                sheet_from_grid(site, grid, row_cap, drop_unnamed)
            })
            .collect()
    } else {
        let mut workbook = open_workbook_auto(source).map_err(|e| IoError::Workbook {
            path: source.display().to_string(),
            detail: e.to_string(),
        })?;
        sheets
            .iter()
            .map(|site| {
                let range = workbook
                    .worksheet_range(site)
                    .map_err(|e| IoError::Workbook {
                        path: source.display().to_string(),
                        detail: format!("sheet '{site}': {e}"),
                    })?;
                let grid: Vec<Vec<String>> = range
                    .rows()
                    .map(|row| row.iter().map(cell_to_string).collect())
                    .collect();
                sheet_from_grid(site, grid, row_cap, drop_unnamed)
            })
            .collect()
    }
}

fn csv_grid(path: &Path) -> Result<Vec<Vec<String>>, IoError> {
    let content = std::fs::read_to_string(path).map_err(|e| IoError::Read {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::Read {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Header row plus capped attribute rows into a validated [`SiteSheet`].
fn sheet_from_grid(
    site: &str,
    grid: Vec<Vec<String>>,
    row_cap: usize,
    drop_unnamed: bool,
) -> Result<SiteSheet, IoError> {
    let mut rows = grid.into_iter();
    let header = rows.next().unwrap_or_default();

    // Column 0 is the attribute-label key; treatments follow.
    let keep: Vec<usize> = header
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, h)| {
            let h = h.trim();
            !h.is_empty() && !(drop_unnamed && h.starts_with(UNNAMED_PREFIX))
        })
        .map(|(i, _)| i)
        .collect();
    let treatments: Vec<String> = keep.iter().map(|&i| header[i].trim().to_string()).collect();

    let mut attributes = Vec::new();
    let mut values = Vec::new();
    for row in rows.take(row_cap) {
        let label = row.first().map(|s| s.trim()).unwrap_or("");
        if label.is_empty() {
            continue;
        }
        attributes.push(label.to_string());
        values.push(
            keep.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect(),
        );
    }

    debug!(site, treatments = treatments.len(), attributes = attributes.len(), "read site sheet");
    Ok(SiteSheet::new(site, attributes, treatments, values)?)
}

/// Render a workbook cell the way the rest of the pipeline expects to
/// see it: integers without a decimal point, dates as ISO calendar days.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => serial_to_iso(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Excel 1900-system serial to an ISO calendar day. The 1899-12-30
/// anchor absorbs Excel's phantom 29-Feb-1900 for every modern serial.
fn serial_to_iso(serial: f64) -> String {
    let anchor = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    match Duration::try_days(serial.floor() as i64)
        .and_then(|days| anchor.checked_add_signed(days))
    {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => format!("{serial}"),
    }
}
