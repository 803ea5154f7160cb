//! Basin parameter records.
//!
//! A basin is described by a flat set of key/value records. On disk each
//! basin lives in `<basin>_CemaNeigeInfo.csv`:
//!
//! ```text
//! QNBV,412.5
//! AltiBand,1120;1340;1510;1690;1930
//! Z50,1510
//! ```
//!
//! Only the first comma splits key from value, so values may contain `;`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::ConfigurationError;

/// Mean annual snow accumulation [mm].
pub const KEY_SNOW_NORM: &str = "QNBV";
/// Semicolon-separated elevation quantiles [m].
pub const KEY_ALTITUDE_BANDS: &str = "AltiBand";
/// Median basin elevation [m].
pub const KEY_MEDIAN_ELEVATION: &str = "Z50";

const BAND_SEPARATOR: char = ';';

/// Raw key/value record for one basin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasinRecord {
    entries: HashMap<String, String>,
}

impl BasinRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key,value` lines. Blank lines and `#` comments are skipped.
    /// A repeated key keeps its last value.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, ConfigurationError> {
        let mut record = Self::new();
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (key, value) =
                trimmed
                    .split_once(',')
                    .ok_or_else(|| ConfigurationError::MalformedRecord {
                        line: line_idx + 1,
                        message: format!("expected 'key,value', got '{trimmed}'"),
                    })?;
            record.insert(key.trim(), value.trim());
        }
        Ok(record)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn require(&self, key: &'static str) -> Result<&str, ConfigurationError> {
        self.get(key).ok_or(ConfigurationError::MissingKey(key))
    }

    fn require_f64(&self, key: &'static str) -> Result<f64, ConfigurationError> {
        let raw = self.require(key)?;
        parse_finite(raw).ok_or_else(|| ConfigurationError::InvalidNumber {
            key,
            value: raw.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BasinRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Basin-specific snow inputs extracted from a [`BasinRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct BasinInfo {
    /// Mean annual snow accumulation [mm].
    pub qnbv: f64,
    /// Representative altitude of each elevation band [m].
    pub altitude_bands: Vec<f64>,
    /// Median basin elevation [m].
    pub z50: f64,
}

impl BasinInfo {
    pub fn from_record(record: &BasinRecord) -> Result<Self, ConfigurationError> {
        let qnbv = record.require_f64(KEY_SNOW_NORM)?;
        let altitude_bands = parse_altitude_bands(record.require(KEY_ALTITUDE_BANDS)?)?;
        let z50 = record.require_f64(KEY_MEDIAN_ELEVATION)?;
        Ok(Self {
            qnbv,
            altitude_bands,
            z50,
        })
    }

    /// Number of elevation bands.
    pub fn n_bands(&self) -> usize {
        self.altitude_bands.len()
    }
}

/// Split a `;`-separated elevation list into band altitudes.
///
/// Ascending order is expected but not enforced. A trailing separator is
/// tolerated; any other empty or non-numeric token is an error.
pub fn parse_altitude_bands(raw: &str) -> Result<Vec<f64>, ConfigurationError> {
    let raw = raw.trim();
    let raw = raw.strip_suffix(BAND_SEPARATOR).unwrap_or(raw);
    if raw.trim().is_empty() {
        return Err(ConfigurationError::EmptyElevationBands);
    }
    raw.split(BAND_SEPARATOR)
        .enumerate()
        .map(|(index, token)| {
            parse_finite(token).ok_or_else(|| ConfigurationError::InvalidElevationBand {
                index,
                value: token.trim().to_string(),
            })
        })
        .collect()
}

/// Anything that can hand out basin records by name.
pub trait BasinRecordSource {
    fn load(&self, basin: &str) -> Result<BasinRecord, ConfigurationError>;
}

/// Flat files named `<basin>_CemaNeigeInfo.csv` in one directory.
#[derive(Debug, Clone)]
pub struct CsvBasinSource {
    dir: PathBuf,
}

impl CsvBasinSource {
    pub const FILE_SUFFIX: &'static str = "_CemaNeigeInfo.csv";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, basin: &str) -> PathBuf {
        self.dir.join(format!("{basin}{}", Self::FILE_SUFFIX))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BasinRecordSource for CsvBasinSource {
    fn load(&self, basin: &str) -> Result<BasinRecord, ConfigurationError> {
        let path = self.path_for(basin);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigurationError::MissingBasin(basin.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("reading basin record from {}", path.display());
        BasinRecord::parse(BufReader::new(file))
    }
}

/// Records held in memory, keyed by basin name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBasinSource {
    records: HashMap<String, BasinRecord>,
}

impl InMemoryBasinSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basin(mut self, basin: impl Into<String>, record: BasinRecord) -> Self {
        self.insert(basin, record);
        self
    }

    pub fn insert(&mut self, basin: impl Into<String>, record: BasinRecord) {
        self.records.insert(basin.into(), record);
    }
}

impl BasinRecordSource for InMemoryBasinSource {
    fn load(&self, basin: &str) -> Result<BasinRecord, ConfigurationError> {
        self.records
            .get(basin)
            .cloned()
            .ok_or_else(|| ConfigurationError::MissingBasin(basin.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "QNBV,412.5\nAltiBand,1120;1340;1510;1690;1930\nZ50,1510\n";

    // -- BasinRecord::parse --

    #[test]
    fn parses_flat_record() {
        let r = BasinRecord::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(r.get("QNBV"), Some("412.5"));
        assert_eq!(r.get("AltiBand"), Some("1120;1340;1510;1690;1930"));
        assert_eq!(r.get("Z50"), Some("1510"));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let text = "# basin X\n\nQNBV, 100 \n";
        let r = BasinRecord::parse(text.as_bytes()).unwrap();
        assert_eq!(r.get("QNBV"), Some("100"));
    }

    #[test]
    fn line_without_separator_is_malformed() {
        let err = BasinRecord::parse("QNBV,1\nZ50 1510\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MalformedRecord { line: 2, .. }));
    }

    // -- parse_altitude_bands --

    #[test]
    fn splits_bands() {
        assert_eq!(parse_altitude_bands("1;2.5; 3 ").unwrap(), vec![1.0, 2.5, 3.0]);
        assert_eq!(parse_altitude_bands("800").unwrap(), vec![800.0]);
        assert_eq!(parse_altitude_bands("800;900;").unwrap(), vec![800.0, 900.0]);
    }

    #[test]
    fn empty_band_list_is_rejected() {
        assert!(matches!(
            parse_altitude_bands("  "),
            Err(ConfigurationError::EmptyElevationBands)
        ));
        assert!(matches!(
            parse_altitude_bands(";"),
            Err(ConfigurationError::EmptyElevationBands)
        ));
    }

    #[test]
    fn malformed_band_reports_index() {
        match parse_altitude_bands("100;abc;300") {
            Err(ConfigurationError::InvalidElevationBand { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse_altitude_bands("100;;300").is_err());
        assert!(parse_altitude_bands("100;NaN").is_err());
    }

    // -- BasinInfo --

    #[test]
    fn basin_info_from_record() {
        let r = BasinRecord::parse(SAMPLE.as_bytes()).unwrap();
        let info = BasinInfo::from_record(&r).unwrap();
        assert_eq!(info.qnbv, 412.5);
        assert_eq!(info.n_bands(), 5);
        assert_eq!(info.altitude_bands[4], 1930.0);
        assert_eq!(info.z50, 1510.0);
    }

    #[test]
    fn basin_info_missing_key() {
        let r: BasinRecord = [("QNBV", "100"), ("Z50", "900")].into_iter().collect();
        assert!(matches!(
            BasinInfo::from_record(&r),
            Err(ConfigurationError::MissingKey("AltiBand"))
        ));
    }

    #[test]
    fn basin_info_bad_number() {
        let r: BasinRecord = [("QNBV", "lots"), ("AltiBand", "900"), ("Z50", "900")]
            .into_iter()
            .collect();
        assert!(matches!(
            BasinInfo::from_record(&r),
            Err(ConfigurationError::InvalidNumber { key: "QNBV", .. })
        ));
    }

    // -- sources --

    #[test]
    fn in_memory_source_missing_basin() {
        let src = InMemoryBasinSource::new();
        assert!(matches!(src.load("Nowhere"), Err(ConfigurationError::MissingBasin(_))));
    }

    #[test]
    fn csv_source_missing_file_is_missing_basin() {
        let dir = tempfile::tempdir().unwrap();
        let src = CsvBasinSource::new(dir.path());
        assert!(matches!(src.load("Ghost"), Err(ConfigurationError::MissingBasin(b)) if b == "Ghost"));
    }

    #[test]
    fn csv_source_file_name() {
        let src = CsvBasinSource::new("/data/basins");
        assert_eq!(
            src.path_for("Arve"),
            PathBuf::from("/data/basins/Arve_CemaNeigeInfo.csv")
        );
    }
}
