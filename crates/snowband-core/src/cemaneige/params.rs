/// CemaNeige calibrated parameters.
///
/// Two parameters that define the snow model behavior.
use super::constants::{N_PARAMS, PARAM_BOUNDS, PARAM_DEFAULTS, PARAM_NAMES};
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Thermal inertia of the snow pack [-]. Range [0, 1].
    pub ctg: f64,
    /// Degree-day melt factor [mm/C/day]. Range [0, 20].
    pub kf: f64,
}

impl Parameters {
    pub fn new(ctg: f64, kf: f64) -> Result<Self, ConfigurationError> {
        check_bounds(0, ctg)?;
        check_bounds(1, kf)?;
        Ok(Self { ctg, kf })
    }

    pub fn from_array(arr: &[f64]) -> Result<Self, ConfigurationError> {
        if arr.len() != N_PARAMS {
            return Err(ConfigurationError::WrongParameterCount {
                expected: N_PARAMS,
                actual: arr.len(),
            });
        }
        Self::new(arr[0], arr[1])
    }

    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [self.ctg, self.kf]
    }
}

impl Default for Parameters {
    /// Daily-timestep defaults: ctg = 0.25, kf = 3.74.
    fn default() -> Self {
        Self {
            ctg: PARAM_DEFAULTS[0],
            kf: PARAM_DEFAULTS[1],
        }
    }
}

fn check_bounds(idx: usize, value: f64) -> Result<(), ConfigurationError> {
    let (min, max) = PARAM_BOUNDS[idx];
    // NaN fails the range check too
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::ParameterOutOfBounds {
            name: PARAM_NAMES[idx],
            value,
            min,
            max,
        })
    }
}
