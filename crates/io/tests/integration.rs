//! File-level pipeline: CSV site sheets through assembly, persisted
//! forms, simulated outputs, and observations.

use std::fs;

use fieldbench_io::{load_observations, load_outputs_dir, load_site_sheets, load_table, write_export, write_snapshot};
use fieldbench_store::DerivedVariable;
use fieldbench_tables::assemble;

#[test]
fn csv_sheet_directory_to_persisted_forms() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Wilcox.csv"),
        "Name,1-1Onion,Unnamed: 2\n\
         PriorHarvestDate,2020-02-01,x\n\
         CurrentHarvestDate,2020-03-01,x\n\
         SoilOrder,Brown,x\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("Jivans.csv"),
        "Name,2-1Onion\n\
         PriorHarvestDate,2020-02-05\n\
         CurrentHarvestDate,2020-03-05\n\
         SoilOrder,Pallic\n",
    )
    .unwrap();

    let sheets = load_site_sheets(
        dir.path(),
        &["Wilcox".to_string(), "Jivans".to_string()],
        45,
        true,
    )
    .unwrap();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].treatments, vec!["1-1Onion"]);

    let table = assemble(&sheets, None).unwrap();
    assert_eq!(table.treatments(), &["1-1Onion", "2-1Onion"]);

    let export_path = dir.path().join("FieldConfigs.csv");
    let snapshot_path = dir.path().join("FieldConfigs.json");
    write_export(&table, &export_path).unwrap();
    write_snapshot(&table, &snapshot_path).unwrap();

    // Either persisted form reloads to the identical logical table.
    assert_eq!(load_table(&export_path).unwrap(), table);
    assert_eq!(load_table(&snapshot_path).unwrap(), table);
}

#[test]
fn outputs_dir_loads_one_series_per_treatment() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("1-1Onion.csv"),
        "Date,CropN\n05/05/2020 12:00:00 AM,240\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("2-1Onion.csv"),
        "Date,CropN\n05/05/2020 12:00:00 AM,300\n",
    )
    .unwrap();
    // Non-CSV files are not simulated artifacts.
    fs::write(dir.path().join("notes.txt"), "scratch").unwrap();

    let store = load_outputs_dir(dir.path()).unwrap();
    assert_eq!(store.len(), 2);
    let order: Vec<&str> = store.treatments().collect();
    assert_eq!(order, vec!["1-1Onion", "2-1Onion"]);
}

#[test]
fn observations_load_crop_and_derived_soil() {
    let dir = tempfile::tempdir().unwrap();
    let crop = dir.path().join("CropData.csv");
    let soil = dir.path().join("SoilData.csv");
    fs::write(&crop, "Site,Date,CropN\n2,05/05/2020,250\n").unwrap();
    fs::write(
        &soil,
        "Site,Date,SoilN0_15,SoilN15_30\n2,05/05/2020,40,25.5\n",
    )
    .unwrap();

    let derived = DerivedVariable {
        name: "SoilMineralN".into(),
        components: vec!["SoilN0_15".into(), "SoilN15_30".into()],
    };
    let store = load_observations(&crop, Some(&soil), Some(&derived)).unwrap();

    let date = chrono::NaiveDate::from_ymd_opt(2020, 5, 5).unwrap();
    assert_eq!(store.get("2", "CropN", date), Some(250.0));
    assert_eq!(store.get("2", "SoilMineralN", date), Some(65.5));
}

#[test]
fn missing_input_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = load_outputs_dir(&missing).unwrap_err();
    assert!(err.to_string().contains("nope"));
}
