//! Per-basin model configuration.
//!
//! Built once per basin and immutable afterwards. The derived constants
//! (`c`, `gthreshold`) are computed in [`ModelConfigBuilder::build`] and never
//! touched again during a run.

use super::constants::{BETA_DEFAULT, GTHRESHOLD_FACTOR, MIN_SPEED, T_MELT};
use super::params::Parameters;
use crate::basin::{BasinInfo, BasinRecordSource};
use crate::elevation;
use crate::error::ConfigurationError;
use crate::gradient::GradientTable;

#[derive(Debug, Clone)]
pub struct ModelConfig {
    basin: String,
    params: Parameters,
    altitude_bands: Vec<f64>,
    z50: f64,
    qnbv: f64,
    beta: f64,
    vmin: f64,
    tf: f64,
    grad_t: GradientTable,
    c: f64,
    gthreshold: f64,
}

impl ModelConfig {
    /// Start a builder from basin data, with every optional setting at its default.
    pub fn builder(basin: impl Into<String>, info: BasinInfo) -> ModelConfigBuilder {
        ModelConfigBuilder {
            basin: basin.into(),
            info,
            params: Parameters::default(),
            beta: BETA_DEFAULT,
            vmin: MIN_SPEED,
            tf: T_MELT,
            grad_t: None,
        }
    }

    /// Load a basin from `source` and build its configuration.
    ///
    /// `explicit_params` is `[ctg, kf]`; `None` selects the daily defaults.
    pub fn from_source<S: BasinRecordSource + ?Sized>(
        source: &S,
        basin: &str,
        explicit_params: Option<&[f64]>,
    ) -> Result<Self, ConfigurationError> {
        let record = source.load(basin)?;
        let info = BasinInfo::from_record(&record)?;
        let mut builder = Self::builder(basin, info);
        if let Some(arr) = explicit_params {
            builder = builder.parameters(Parameters::from_array(arr)?);
        }
        builder.build()
    }

    pub fn basin(&self) -> &str {
        &self.basin
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn altitude_bands(&self) -> &[f64] {
        &self.altitude_bands
    }

    /// Number of elevation bands (`nbzalt`).
    pub fn n_bands(&self) -> usize {
        self.altitude_bands.len()
    }

    /// Median elevation [m].
    pub fn z50(&self) -> f64 {
        self.z50
    }

    /// Mean annual snow accumulation [mm].
    pub fn qnbv(&self) -> f64 {
        self.qnbv
    }

    /// Precipitation-elevation correction [m^-1].
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Minimum melt speed fraction [-].
    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Melting threshold temperature [C].
    pub fn tf(&self) -> f64 {
        self.tf
    }

    pub fn gradient_table(&self) -> &GradientTable {
        &self.grad_t
    }

    /// Mean over bands of `exp(beta * (z - z50))`.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Snow pack content above which melt runs at full potential [mm].
    pub fn gthreshold(&self) -> f64 {
        self.gthreshold
    }
}

/// Collects optional settings before validating a [`ModelConfig`].
#[derive(Debug, Clone)]
pub struct ModelConfigBuilder {
    basin: String,
    info: BasinInfo,
    params: Parameters,
    beta: f64,
    vmin: f64,
    tf: f64,
    grad_t: Option<GradientTable>,
}

impl ModelConfigBuilder {
    pub fn parameters(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn min_melt_speed(mut self, vmin: f64) -> Self {
        self.vmin = vmin;
        self
    }

    pub fn melt_threshold(mut self, tf: f64) -> Self {
        self.tf = tf;
        self
    }

    pub fn gradient_table(mut self, table: GradientTable) -> Self {
        self.grad_t = Some(table);
        self
    }

    pub fn build(self) -> Result<ModelConfig, ConfigurationError> {
        let BasinInfo {
            qnbv,
            altitude_bands,
            z50,
        } = self.info;

        if altitude_bands.is_empty() {
            return Err(ConfigurationError::EmptyElevationBands);
        }
        if let Some(index) = altitude_bands.iter().position(|z| !z.is_finite()) {
            return Err(ConfigurationError::InvalidElevationBand {
                index,
                value: altitude_bands[index].to_string(),
            });
        }
        if !z50.is_finite() {
            return Err(ConfigurationError::InvalidNumber {
                key: crate::basin::KEY_MEDIAN_ELEVATION,
                value: z50.to_string(),
            });
        }
        if !qnbv.is_finite() || qnbv < 0.0 {
            return Err(ConfigurationError::InvalidSnowNorm(qnbv));
        }
        // Parameters may have been assembled field by field
        let params = Parameters::new(self.params.ctg, self.params.kf)?;
        if !(0.0..=1.0).contains(&self.vmin) {
            return Err(ConfigurationError::ParameterOutOfBounds {
                name: "vmin",
                value: self.vmin,
                min: 0.0,
                max: 1.0,
            });
        }
        for (name, value) in [("beta", self.beta), ("tf", self.tf)] {
            if !value.is_finite() {
                return Err(ConfigurationError::InvalidNumber {
                    key: name,
                    value: value.to_string(),
                });
            }
        }

        let c = elevation::normalization_constant(self.beta, &altitude_bands, z50);
        if !(c.is_finite() && c > 0.0) {
            return Err(ConfigurationError::InvalidNormalization(c));
        }
        let gthreshold = GTHRESHOLD_FACTOR * qnbv;

        log::debug!(
            "configured basin '{}': {} bands, z50 = {} m, c = {:.6}, gthreshold = {:.3} mm",
            self.basin,
            altitude_bands.len(),
            z50,
            c,
            gthreshold
        );

        Ok(ModelConfig {
            basin: self.basin,
            params,
            altitude_bands,
            z50,
            qnbv,
            beta: self.beta,
            vmin: self.vmin,
            tf: self.tf,
            grad_t: self.grad_t.unwrap_or_default(),
            c,
            gthreshold,
        })
    }
}
