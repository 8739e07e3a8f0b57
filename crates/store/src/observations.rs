use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use fieldbench_core::dates::parse_date;

use crate::error::StoreError;

/// A variable computed at ingest from declared component columns: the
/// sum when every component is present in a raw row, absent otherwise.
///
/// The one in production use is aggregate soil mineral nitrogen over the
/// sampled depth layers (SoilN0_15 + SoilN15_30 [+ deeper layers where
/// the trial sampled them]).
#[derive(Debug, Clone, Deserialize)]
pub struct DerivedVariable {
    pub name: String,
    pub components: Vec<String>,
}

/// Sparse field measurements keyed by (site, variable, date).
///
/// Raw files may carry several samples per key; they are reduced to the
/// arithmetic mean. Dates are normalised to the calendar day at ingest
/// (the trial convention anchors sampling at noon), so joins downstream
/// are date-only regardless of how the source formatted times.
#[derive(Debug, Default)]
pub struct ObservationStore {
    values: BTreeMap<(String, String), BTreeMap<NaiveDate, MeanAcc>>,
}

#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: f64,
    count: u32,
}

impl MeanAcc {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(self) -> f64 {
        self.sum / self.count as f64
    }
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one observation file: first column is the site key, a
    /// "Date" column is required, every other named column is a
    /// variable. Blank cells are skipped. Returns the number of raw
    /// records read.
    pub fn ingest_csv(
        &mut self,
        csv_data: &str,
        derived: Option<&DerivedVariable>,
        source: &str,
    ) -> Result<usize, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| StoreError::Csv {
                source: source.to_string(),
                detail: e.to_string(),
            })?
            .clone();

        let date_idx = headers
            .iter()
            .position(|h| h == "Date")
            .ok_or_else(|| StoreError::MissingColumn {
                source: source.to_string(),
                column: "Date".into(),
            })?;

        // Variable columns: everything except the site key and the date.
        let variable_cols: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(i, _)| *i != date_idx)
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut records = 0usize;
        for (row_idx, record) in reader.records().enumerate() {
            let row = row_idx + 2;
            let record = record.map_err(|e| StoreError::Csv {
                source: source.to_string(),
                detail: e.to_string(),
            })?;

            let site = record.get(0).unwrap_or("").trim().to_string();
            let date_cell = record.get(date_idx).unwrap_or("");
            let date = parse_date(date_cell).ok_or_else(|| StoreError::DateParse {
                source: source.to_string(),
                row,
                value: date_cell.to_string(),
            })?;

            let mut row_values: Vec<(String, f64)> = Vec::with_capacity(variable_cols.len());
            for (idx, name) in &variable_cols {
                let cell = record.get(*idx).unwrap_or("").trim();
                if cell.is_empty() {
                    continue;
                }
                let value: f64 = cell.parse().map_err(|_| StoreError::ValueParse {
                    source: source.to_string(),
                    row,
                    column: name.clone(),
                    value: cell.to_string(),
                })?;
                row_values.push((name.clone(), value));
            }

            if let Some(derived) = derived {
                let components: Vec<f64> = derived
                    .components
                    .iter()
                    .filter_map(|c| {
                        row_values
                            .iter()
                            .find(|(name, _)| name == c)
                            .map(|(_, v)| *v)
                    })
                    .collect();
                // All components or nothing; a partial sample stays absent.
                if components.len() == derived.components.len() {
                    row_values.push((derived.name.clone(), components.iter().sum()));
                }
            }

            for (variable, value) in row_values {
                self.values
                    .entry((site.clone(), variable))
                    .or_default()
                    .entry(date)
                    .or_default()
                    .push(value);
            }
            records += 1;
        }

        info!(source, records, "ingested observations");
        Ok(records)
    }

    /// The deduplicated (mean) value for (site, variable, date).
    pub fn get(&self, site: &str, variable: &str, date: NaiveDate) -> Option<f64> {
        self.values
            .get(&(site.to_string(), variable.to_string()))?
            .get(&date)
            .map(|acc| acc.mean())
    }

    /// All observation dates for (site, variable), ascending, with the
    /// deduplicated value at each.
    pub fn series(&self, site: &str, variable: &str) -> Vec<(NaiveDate, f64)> {
        match self.values.get(&(site.to_string(), variable.to_string())) {
            Some(dates) => dates.iter().map(|(d, acc)| (*d, acc.mean())).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn soil_mineral_n() -> DerivedVariable {
        DerivedVariable {
            name: "SoilMineralN".into(),
            components: vec!["SoilN0_15".into(), "SoilN15_30".into()],
        }
    }

    #[test]
    fn duplicate_keys_reduce_to_mean() {
        let csv = "\
Site,Date,CropN
5,10/01/2020,100
5,10/01/2020,120
";
        let mut store = ObservationStore::new();
        store.ingest_csv(csv, None, "CropData.csv").unwrap();
        assert_eq!(store.get("5", "CropN", d(2020, 1, 10)), Some(110.0));
    }

    #[test]
    fn time_of_day_formatting_does_not_split_keys() {
        let csv = "\
Site,Date,CropN
5,10/01/2020,100
5,10/01/2020 01:30:00 PM,120
";
        let mut store = ObservationStore::new();
        store.ingest_csv(csv, None, "CropData.csv").unwrap();
        assert_eq!(store.get("5", "CropN", d(2020, 1, 10)), Some(110.0));
    }

    #[test]
    fn derived_variable_sums_complete_rows_only() {
        let csv = "\
Site,Date,SoilN0_15,SoilN15_30
2,05/05/2020,40.0,25.5
2,06/05/2020,30.0,
";
        let mut store = ObservationStore::new();
        store
            .ingest_csv(csv, Some(&soil_mineral_n()), "SoilData.csv")
            .unwrap();
        assert_eq!(store.get("2", "SoilMineralN", d(2020, 5, 5)), Some(65.5));
        // Missing layer: derived absent, components still queryable.
        assert_eq!(store.get("2", "SoilMineralN", d(2020, 5, 6)), None);
        assert_eq!(store.get("2", "SoilN0_15", d(2020, 5, 6)), Some(30.0));
    }

    #[test]
    fn series_is_date_ordered() {
        let csv = "\
Site,Date,CropN
7,20/03/2021,50
7,10/03/2021,40
7,30/03/2021,60
";
        let mut store = ObservationStore::new();
        store.ingest_csv(csv, None, "CropData.csv").unwrap();
        let series = store.series("7", "CropN");
        assert_eq!(
            series,
            vec![
                (d(2021, 3, 10), 40.0),
                (d(2021, 3, 20), 50.0),
                (d(2021, 3, 30), 60.0),
            ]
        );
    }

    #[test]
    fn absence_is_not_an_error() {
        let store = ObservationStore::new();
        assert_eq!(store.get("1", "CropN", d(2020, 1, 1)), None);
        assert!(store.series("1", "CropN").is_empty());
    }

    #[test]
    fn missing_date_column_is_rejected() {
        let csv = "Site,CropN\n1,100\n";
        let mut store = ObservationStore::new();
        let err = store.ingest_csv(csv, None, "CropData.csv").unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn { .. }));
    }

    #[test]
    fn unparsable_date_names_source_and_row() {
        let csv = "Site,Date,CropN\n1,soon,100\n";
        let mut store = ObservationStore::new();
        let err = store.ingest_csv(csv, None, "CropData.csv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CropData.csv"));
        assert!(msg.contains("row 2"));
    }
}
