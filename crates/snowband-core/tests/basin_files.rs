//! Loading basin records from `<basin>_CemaNeigeInfo.csv` files.

use std::fs;

use snowband_core::basin::{BasinRecordSource, CsvBasinSource};
use snowband_core::cemaneige::ModelConfig;
use snowband_core::error::ConfigurationError;
use tempfile::tempdir;

#[test]
fn reads_basin_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("Arve_CemaNeigeInfo.csv"),
        "QNBV,412.5\nAltiBand,1120;1340;1510;1690;1930\nZ50,1510\n",
    )
    .unwrap();

    let source = CsvBasinSource::new(dir.path());
    let record = source.load("Arve").unwrap();
    assert_eq!(record.get("Z50"), Some("1510"));

    let cfg = ModelConfig::from_source(&source, "Arve", None).unwrap();
    assert_eq!(cfg.n_bands(), 5);
    assert_eq!(cfg.qnbv(), 412.5);
    assert!((cfg.gthreshold() - 371.25).abs() < 1e-9);
}

#[test]
fn missing_file_is_missing_basin() {
    let dir = tempdir().unwrap();
    let source = CsvBasinSource::new(dir.path());
    assert!(matches!(
        ModelConfig::from_source(&source, "Nowhere", None),
        Err(ConfigurationError::MissingBasin(b)) if b == "Nowhere"
    ));
}

#[test]
fn malformed_band_list_fails_before_running() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("Bad_CemaNeigeInfo.csv"),
        "QNBV,100\nAltiBand,900;x;1300\nZ50,1100\n",
    )
    .unwrap();
    fs::write(dir.path().join("Empty_CemaNeigeInfo.csv"), "QNBV,100\nAltiBand,\nZ50,1100\n").unwrap();

    let source = CsvBasinSource::new(dir.path());
    assert!(matches!(
        ModelConfig::from_source(&source, "Bad", None),
        Err(ConfigurationError::InvalidElevationBand { index: 1, .. })
    ));
    assert!(matches!(
        ModelConfig::from_source(&source, "Empty", None),
        Err(ConfigurationError::EmptyElevationBands)
    ));
}
