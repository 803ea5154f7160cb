//! CemaNeige numerical constants.
//!
//! Fixed values and calibration metadata for the daily snow routine.

/// Model name.
pub const MODEL_NAME: &str = "CemaNeige";

/// Melting threshold temperature [C].
pub const T_MELT: f64 = 0.0;

/// Minimum melt speed as a fraction of potential melt [-].
pub const MIN_SPEED: f64 = 0.1;

/// Below this band temperature all precipitation is solid [C].
pub const T_SNOW: f64 = -1.0;

/// Above this band temperature all precipitation is liquid [C].
pub const T_RAIN: f64 = 3.0;

/// Fraction of mean annual snow accumulation giving the full-melt threshold.
pub const GTHRESHOLD_FACTOR: f64 = 0.9;

/// Default precipitation-elevation correction [m^-1]. Zero disables it.
pub const BETA_DEFAULT: f64 = 0.0;

/// Number of state variables per band: [g, etg].
pub const LAYER_STATE_SIZE: usize = 2;

/// Number of calibrated parameters (ctg, kf).
pub const N_PARAMS: usize = 2;

/// Parameter names in canonical order.
pub const PARAM_NAMES: &[&str] = &["ctg", "kf"];

/// Parameter bounds as (min, max) tuples, in PARAM_NAMES order.
pub const PARAM_BOUNDS: &[(f64, f64)] = &[
    (0.0, 1.0),  // ctg
    (0.0, 20.0), // kf
];

/// Default parameter values for a daily timestep, in PARAM_NAMES order.
pub const PARAM_DEFAULTS: &[f64] = &[0.25, 3.74];

/// Model timestep. Parameters and the gradient table are daily.
pub const TIME_STEP: &str = "daily";
