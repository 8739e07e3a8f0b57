use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use fieldbench_core::dates::parse_date;
use fieldbench_core::HarvestWindow;

use crate::error::StoreError;

/// One treatment's simulated daily output: for each named variable, a
/// date-ordered value series. BTreeMap keys keep the series monotonic
/// whatever order the rows arrived in.
#[derive(Debug, Clone)]
pub struct SimulatedSeries {
    treatment: String,
    variables: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl SimulatedSeries {
    /// Parse a simulated artifact: first column is the date (day-first,
    /// optional time-of-day), remaining columns are variables. Blank
    /// cells are absent values, not zeros.
    pub fn from_csv(treatment: &str, csv_data: &str, source: &str) -> Result<Self, StoreError> {
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
        if headers.is_empty() {
            return Err(StoreError::MissingColumn {
                source: source.to_string(),
                column: "Date".into(),
            });
        }
        let variable_names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut variables: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        for (row_idx, record) in reader.records().enumerate() {
            let row = row_idx + 2; // 1-based, after the header
            let record = record.map_err(|e| StoreError::Csv {
                source: source.to_string(),
                detail: e.to_string(),
            })?;

            let date_cell = record.get(0).unwrap_or("");
            let date = parse_date(date_cell).ok_or_else(|| StoreError::DateParse {
                source: source.to_string(),
                row,
                value: date_cell.to_string(),
            })?;

            for (vi, name) in variable_names.iter().enumerate() {
                let cell = record.get(vi + 1).unwrap_or("").trim();
                if cell.is_empty() {
                    continue;
                }
                let value: f64 = cell.parse().map_err(|_| StoreError::ValueParse {
                    source: source.to_string(),
                    row,
                    column: name.clone(),
                    value: cell.to_string(),
                })?;
                variables.entry(name.clone()).or_default().insert(date, value);
            }
        }

        debug!(treatment, source, variables = variable_names.len(), "loaded simulated series");
        Ok(Self {
            treatment: treatment.to_string(),
            variables,
        })
    }

    pub fn treatment(&self) -> &str {
        &self.treatment
    }

    /// The simulated value at exactly `date`, never a neighbour's.
    pub fn value_at(&self, variable: &str, date: NaiveDate) -> Option<f64> {
        self.variables.get(variable)?.get(&date).copied()
    }

    /// Date-ordered values within the closed window, both ends inclusive.
    /// An inverted window selects nothing.
    pub fn in_window(&self, variable: &str, window: &HarvestWindow) -> Vec<(NaiveDate, f64)> {
        let Some(series) = self.variables.get(variable) else {
            return Vec::new();
        };
        if window.prior > window.current {
            return Vec::new();
        }
        series
            .range(window.prior..=window.current)
            .map(|(d, v)| (*d, *v))
            .collect()
    }
}

/// All simulated series for a run, keyed by treatment id.
#[derive(Debug, Default)]
pub struct TimeSeriesStore {
    series: BTreeMap<String, SimulatedSeries>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, series: SimulatedSeries) -> Result<(), StoreError> {
        let treatment = series.treatment().to_string();
        if self.series.contains_key(&treatment) {
            return Err(StoreError::DuplicateSeries { treatment });
        }
        self.series.insert(treatment, series);
        Ok(())
    }

    pub fn get(&self, treatment: &str) -> Option<&SimulatedSeries> {
        self.series.get(treatment)
    }

    /// Treatment ids in sorted order, the iteration order of every run.
    pub fn treatments(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    const OUT_CSV: &str = "\
Date,CropN,SoilMineralN
17/05/2020 12:00:00 AM,12.5,88.0
15/05/2020 12:00:00 AM,10.0,90.5
16/05/2020 12:00:00 AM,11.2,
";

    #[test]
    fn ingest_sorts_by_date() {
        let s = SimulatedSeries::from_csv("T1", OUT_CSV, "T1.csv").unwrap();
        let window = HarvestWindow::new(d(2020, 5, 1), d(2020, 5, 31));
        let crop_n = s.in_window("CropN", &window);
        assert_eq!(
            crop_n,
            vec![
                (d(2020, 5, 15), 10.0),
                (d(2020, 5, 16), 11.2),
                (d(2020, 5, 17), 12.5),
            ]
        );
    }

    #[test]
    fn blank_cell_is_absent_not_zero() {
        let s = SimulatedSeries::from_csv("T1", OUT_CSV, "T1.csv").unwrap();
        assert_eq!(s.value_at("SoilMineralN", d(2020, 5, 16)), None);
        assert_eq!(s.value_at("SoilMineralN", d(2020, 5, 15)), Some(90.5));
    }

    #[test]
    fn absent_date_is_absence() {
        let s = SimulatedSeries::from_csv("T1", OUT_CSV, "T1.csv").unwrap();
        assert_eq!(s.value_at("CropN", d(2020, 5, 20)), None);
    }

    #[test]
    fn window_is_closed_and_inclusive() {
        let s = SimulatedSeries::from_csv("T1", OUT_CSV, "T1.csv").unwrap();
        let window = HarvestWindow::new(d(2020, 5, 15), d(2020, 5, 16));
        let crop_n = s.in_window("CropN", &window);
        assert_eq!(crop_n, vec![(d(2020, 5, 15), 10.0), (d(2020, 5, 16), 11.2)]);
    }

    #[test]
    fn unparsable_date_fails_with_row_context() {
        let bad = "Date,CropN\nnot-a-date,10.0\n";
        let err = SimulatedSeries::from_csv("T1", bad, "T1.csv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("T1.csv"));
        assert!(msg.contains("row 2"));
        assert!(msg.contains("not-a-date"));
    }

    #[test]
    fn unparsable_value_fails_with_column_context() {
        let bad = "Date,CropN\n15/05/2020,ten\n";
        let err = SimulatedSeries::from_csv("T1", bad, "T1.csv").unwrap_err();
        assert!(err.to_string().contains("'CropN'"));
    }

    #[test]
    fn store_rejects_duplicate_treatment() {
        let mut store = TimeSeriesStore::new();
        store
            .insert(SimulatedSeries::from_csv("T1", OUT_CSV, "T1.csv").unwrap())
            .unwrap();
        let err = store
            .insert(SimulatedSeries::from_csv("T1", OUT_CSV, "T1.csv").unwrap())
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSeries { .. }));
    }

    #[test]
    fn store_iterates_treatments_sorted() {
        let mut store = TimeSeriesStore::new();
        for t in ["B", "A", "C"] {
            store
                .insert(SimulatedSeries::from_csv(t, OUT_CSV, "x.csv").unwrap())
                .unwrap();
        }
        let order: Vec<&str> = store.treatments().collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }
}
