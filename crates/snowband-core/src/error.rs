//! Error and warning types.
//!
//! Configuration and input-shape problems are fatal and surface before any
//! timestep runs. Suspicious forcing values are only reported.

use std::fmt;

use thiserror::Error;

/// Basin parameters could not be loaded or validated.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no parameter record for basin '{0}'")]
    MissingBasin(String),

    #[error("basin record has no '{0}' entry")]
    MissingKey(&'static str),

    #[error("'{key}' value '{value}' is not a finite number")]
    InvalidNumber { key: &'static str, value: String },

    /// `AltiBand` is present but lists no elevation.
    #[error("elevation band list is empty")]
    EmptyElevationBands,

    #[error("elevation band {index} ('{value}') is not a finite number")]
    InvalidElevationBand { index: usize, value: String },

    #[error("{name} = {value} is out of bounds [{min}, {max}]")]
    ParameterOutOfBounds {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("expected {expected} parameters, got {actual}")]
    WrongParameterCount { expected: usize, actual: usize },

    #[error("mean annual snow accumulation must be finite and non-negative, got {0}")]
    InvalidSnowNorm(f64),

    #[error("invalid temperature gradient table: {0}")]
    InvalidGradientTable(String),

    /// The band precipitation weights do not average to a positive finite value.
    #[error("precipitation normalisation constant is {0}, expected a positive finite value")]
    InvalidNormalization(f64),

    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Forcing series have an unusable shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputShapeError {
    #[error("forcing series are empty")]
    Empty,

    #[error("{name} has {actual} values, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("day of year {value} at step {step} is outside 1..=365")]
    InvalidDayOfYear { step: usize, value: u16 },
}

/// Either fatal error kind, for callers that chain loading and running.
#[derive(Debug, Error)]
pub enum SnowbandError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InputShape(#[from] InputShapeError),
}

/// Forcing series a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcingSeries {
    Precipitation,
    Temperature,
}

impl fmt::Display for ForcingSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForcingSeries::Precipitation => f.write_str("precipitation"),
            ForcingSeries::Temperature => f.write_str("temperature"),
        }
    }
}

/// Non-fatal report of forcing values that will propagate into the output.
///
/// NaN values are never rejected or repaired. Negative precipitation is
/// reported too; negative temperature is ordinary and is not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericPropagationWarning {
    pub series: ForcingSeries,
    pub nan_count: usize,
    pub negative_count: usize,
}

impl NumericPropagationWarning {
    /// Scan a series; `None` when nothing suspicious was found.
    pub fn scan(series: ForcingSeries, values: &[f64]) -> Option<Self> {
        let nan_count = values.iter().filter(|v| v.is_nan()).count();
        let negative_count = match series {
            ForcingSeries::Precipitation => values.iter().filter(|v| **v < 0.0).count(),
            ForcingSeries::Temperature => 0,
        };
        (nan_count > 0 || negative_count > 0).then_some(Self {
            series,
            nan_count,
            negative_count,
        })
    }
}

impl fmt::Display for NumericPropagationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} series has {} NaN and {} negative values; they propagate into the output",
            self.series, self.nan_count, self.negative_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_series_yields_no_warning() {
        assert!(NumericPropagationWarning::scan(ForcingSeries::Precipitation, &[0.0, 3.0]).is_none());
    }

    #[test]
    fn counts_nan_and_negative_precip() {
        let w = NumericPropagationWarning::scan(
            ForcingSeries::Precipitation,
            &[1.0, f64::NAN, -2.0, -0.5],
        )
        .unwrap();
        assert_eq!(w.nan_count, 1);
        assert_eq!(w.negative_count, 2);
    }

    #[test]
    fn negative_temperature_is_not_suspicious() {
        assert!(NumericPropagationWarning::scan(ForcingSeries::Temperature, &[-20.0, -1.0]).is_none());
        let w = NumericPropagationWarning::scan(ForcingSeries::Temperature, &[-20.0, f64::NAN]).unwrap();
        assert_eq!(w.nan_count, 1);
        assert_eq!(w.negative_count, 0);
    }

    #[test]
    fn errors_render_context() {
        let e = ConfigurationError::ParameterOutOfBounds {
            name: "kf",
            value: 25.0,
            min: 0.0,
            max: 20.0,
        };
        assert_eq!(e.to_string(), "kf = 25 is out of bounds [0, 20]");

        let e = InputShapeError::LengthMismatch {
            name: "temp",
            expected: 3,
            actual: 2,
        };
        assert_eq!(e.to_string(), "temp has 2 values, expected 3");
    }
}
