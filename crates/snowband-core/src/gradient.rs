//! Daily vertical air-temperature gradient table.
//!
//! The bundled table is a basin-independent climatology stored as a data
//! asset in `data/grad_t.csv`. Basins with their own climatology can supply
//! a table through [`GradientTable::parse`] or [`GradientTable::new`].

use std::io::BufRead;

use crate::calendar::{gradient_index, DAYS_PER_TABLE};
use crate::error::ConfigurationError;

const BUNDLED_TABLE: &str = include_str!("../data/grad_t.csv");

/// Temperature gradient per folded day of year [C/100m].
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTable {
    values: Vec<f64>,
}

impl GradientTable {
    /// Build a table from daily values, Jan 1 first.
    ///
    /// At least 365 finite values are required; entries past the 365th are
    /// kept but never looked up.
    pub fn new(values: Vec<f64>) -> Result<Self, ConfigurationError> {
        if values.len() < usize::from(DAYS_PER_TABLE) {
            return Err(ConfigurationError::InvalidGradientTable(format!(
                "expected {} daily values, got {}",
                DAYS_PER_TABLE,
                values.len()
            )));
        }
        if let Some(day) = values.iter().position(|v| !v.is_finite()) {
            return Err(ConfigurationError::InvalidGradientTable(format!(
                "value for day {} is not finite",
                day + 1
            )));
        }
        Ok(Self { values })
    }

    /// Same gradient every day of the year.
    pub fn uniform(gradient: f64) -> Result<Self, ConfigurationError> {
        Self::new(vec![gradient; usize::from(DAYS_PER_TABLE)])
    }

    /// Parse one value per line. Blank lines and `#` comments are skipped.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, ConfigurationError> {
        let mut values = Vec::with_capacity(usize::from(DAYS_PER_TABLE));
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let value = trimmed.parse::<f64>().map_err(|e| ConfigurationError::MalformedRecord {
                line: line_idx + 1,
                message: format!("gradient '{trimmed}': {e}"),
            })?;
            values.push(value);
        }
        Self::new(values)
    }

    /// The climatology shipped with the crate.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_TABLE.as_bytes()).expect("bundled gradient table is well-formed")
    }

    /// Gradient for a folded 1-based day of year.
    #[inline]
    pub fn for_day(&self, day_of_year: u16) -> f64 {
        self.values[gradient_index(day_of_year)]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Default for GradientTable {
    fn default() -> Self {
        Self::bundled()
    }
}
