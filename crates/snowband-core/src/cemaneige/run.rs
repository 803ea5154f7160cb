/// CemaNeige simulation engine.
///
/// - `layer_step()`: advance one elevation band by one day
/// - `Engine`: owns the per-band state and drives the daily loop
/// - `run()`: one-shot run of a configuration over a forcing series
use snowband_macros::Fluxes;

use super::config::ModelConfig;
use super::params::Parameters;
use super::processes;
use super::state::{LayerState, State};
use crate::calendar;
use crate::elevation;
use crate::error::{InputShapeError, NumericPropagationWarning};
use crate::forcing::Forcing;

/// Basin-average forcing for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyForcing {
    precip: f64,
    temp: f64,
    day_of_year: u16,
}

impl DailyForcing {
    /// Fails unless `day_of_year` is a folded day in `1..=365`.
    ///
    /// The error reports step 0.
    pub fn new(precip: f64, temp: f64, day_of_year: u16) -> Result<Self, InputShapeError> {
        if !calendar::is_table_day(day_of_year) {
            return Err(InputShapeError::InvalidDayOfYear {
                step: 0,
                value: day_of_year,
            });
        }
        Ok(Self::from_checked(precip, temp, day_of_year))
    }

    /// Caller guarantees `day_of_year` is in `1..=365`.
    pub(crate) fn from_checked(precip: f64, temp: f64, day_of_year: u16) -> Self {
        Self {
            precip,
            temp,
            day_of_year,
        }
    }

    pub fn precip(&self) -> f64 {
        self.precip
    }

    pub fn temp(&self) -> f64 {
        self.temp
    }

    /// Folded 1-based day of year, in `1..=365`.
    pub fn day_of_year(&self) -> u16 {
        self.day_of_year
    }
}

/// Basin-level fluxes for one timestep.
///
/// Water fluxes and snow storage are summed over bands, each band already
/// carrying its `1/n` share of precipitation. Thermal state and gratio are
/// band means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Fluxes)]
pub struct Fluxes {
    /// Basin precipitation input [mm].
    pub precip: f64,
    /// Basin air temperature input [C].
    pub temp: f64,
    /// Liquid precipitation [mm].
    pub pliq: f64,
    /// Solid precipitation [mm].
    pub psol: f64,
    /// Potential melt [mm].
    pub pot_melt: f64,
    /// Actual melt [mm].
    pub melt: f64,
    /// Liquid precipitation plus melt: the model output [mm].
    pub pliq_and_melt: f64,
    /// Basin snow storage after melt, summed over bands [mm].
    pub snow_pack: f64,
    /// Mean thermal state [C].
    pub thermal_state: f64,
    /// Mean snow-content ratio applied to melt [-].
    pub gratio: f64,
}

/// Fluxes of a single elevation band for one timestep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerFluxes {
    pub temp: f64,
    pub precip: f64,
    pub solid_fraction: f64,
    pub pliq: f64,
    pub psol: f64,
    pub pot_melt: f64,
    pub melt: f64,
    pub pliq_and_melt: f64,
    pub snow_pack: f64,
    pub thermal_state: f64,
    pub gratio: f64,
}

/// Execute one timestep of CemaNeige for a single band, in place.
///
/// The thermal state is smoothed from its previous value; potential melt and
/// the snow-content ratio both see the pack after today's snowfall.
#[inline]
pub fn layer_step(
    layer: &mut LayerState,
    params: &Parameters,
    vmin: f64,
    tf: f64,
    gthreshold: f64,
    precip: f64,
    temp: f64,
) -> LayerFluxes {
    let solid_fraction = processes::compute_solid_fraction(temp);
    let (pliq, psol) = processes::partition_precipitation(precip, solid_fraction);

    let g = layer.snow_pack + psol;
    let etg = processes::update_thermal_state(layer.thermal_state, temp, params.ctg);

    let pot_melt = processes::compute_potential_melt(etg, temp, params.kf, tf, g);
    let gratio = processes::compute_gratio(g, gthreshold);
    let melt = processes::compute_actual_melt(pot_melt, gratio, vmin);

    layer.snow_pack = g - melt;
    layer.thermal_state = etg;

    LayerFluxes {
        temp,
        precip,
        solid_fraction,
        pliq,
        psol,
        pot_melt,
        melt,
        pliq_and_melt: pliq + melt,
        snow_pack: layer.snow_pack,
        thermal_state: etg,
        gratio,
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    /// Daily liquid water output (rain plus melt) [mm], one value per step.
    pub liquid_output: Vec<f64>,
    pub fluxes: FluxesTimeseries,
    /// Band states after the last step.
    pub final_state: State,
    /// Suspicious forcing values that were passed through unchanged.
    pub warnings: Vec<NumericPropagationWarning>,
}

impl SimulationOutput {
    pub fn len(&self) -> usize {
        self.liquid_output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liquid_output.is_empty()
    }
}

/// Runs one basin configuration and owns its snow state.
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    config: &'a ModelConfig,
    /// Share of basin precipitation per band, summing to one.
    precip_shares: Vec<f64>,
    state: State,
    layer_fluxes: Vec<LayerFluxes>,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        let bands = config.altitude_bands();
        let precip_shares = elevation::precip_shares(config.beta(), bands, config.z50(), config.c());
        Self {
            config,
            precip_shares,
            state: State::initialize(bands.len()),
            layer_fluxes: vec![LayerFluxes::default(); bands.len()],
        }
    }

    pub fn config(&self) -> &ModelConfig {
        self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Per-band fluxes of the most recent step.
    pub fn layer_fluxes(&self) -> &[LayerFluxes] {
        &self.layer_fluxes
    }

    /// Empty every snow pack.
    pub fn reset(&mut self) {
        self.state.reset();
        self.layer_fluxes.fill(LayerFluxes::default());
    }

    /// Prepare a run: zero the state and allocate the output series.
    ///
    /// The returned vector is empty with room for every step; `run_model`
    /// pushes exactly one value per step.
    pub fn ini_run(&mut self, forcing: &Forcing) -> Vec<f64> {
        self.reset();
        Vec::with_capacity(forcing.len())
    }

    /// Advance every band by one day.
    pub fn step(&mut self, forcing: DailyForcing) -> Fluxes {
        let config = self.config;
        let params = config.params();
        let theta = config.gradient_table().for_day(forcing.day_of_year);
        let (z50, vmin, tf, gthreshold) = (config.z50(), config.vmin(), config.tf(), config.gthreshold());

        let mut pliq = 0.0;
        let mut melt = 0.0;
        let mut agg = Fluxes {
            precip: forcing.precip,
            temp: forcing.temp,
            ..Fluxes::default()
        };

        let bands = self
            .state
            .layer_states
            .iter_mut()
            .zip(&mut self.layer_fluxes)
            .zip(config.altitude_bands().iter().zip(&self.precip_shares));
        for ((layer, out), (altitude, share)) in bands {
            let tz = elevation::extrapolate_temp(forcing.temp, theta, *altitude, z50);
            let pz = forcing.precip * share;

            let lf = layer_step(layer, params, vmin, tf, gthreshold, pz, tz);

            pliq += lf.pliq;
            melt += lf.melt;
            agg.psol += lf.psol;
            agg.pot_melt += lf.pot_melt;
            agg.snow_pack += lf.snow_pack;
            agg.thermal_state += lf.thermal_state;
            agg.gratio += lf.gratio;
            *out = lf;
        }

        let n = self.layer_fluxes.len() as f64;
        agg.pliq = pliq;
        agg.melt = melt;
        agg.pliq_and_melt = pliq + melt;
        agg.thermal_state /= n;
        agg.gratio /= n;
        agg
    }

    /// Run the whole forcing series from empty snow packs.
    pub fn run_model(&mut self, forcing: &Forcing) -> SimulationOutput {
        let warnings = forcing.warnings();
        for w in &warnings {
            log::warn!("basin '{}': {}", self.config.basin(), w);
        }
        log::debug!(
            "running basin '{}' over {} days on {} bands",
            self.config.basin(),
            forcing.len(),
            self.config.n_bands()
        );

        let mut liquid_output = self.ini_run(forcing);
        let mut fluxes = FluxesTimeseries::with_capacity(forcing.len());

        for day in forcing.days() {
            let f = self.step(day);
            liquid_output.push(f.pliq_and_melt);
            fluxes.push(&f);
        }

        log::debug!(
            "basin '{}' done: total output {:.2} mm, final snow storage {:.2} mm",
            self.config.basin(),
            liquid_output.iter().sum::<f64>(),
            self.state.total_snow_pack()
        );

        SimulationOutput {
            liquid_output,
            fluxes,
            final_state: self.state.clone(),
            warnings,
        }
    }
}

/// Run a configuration over a forcing series from empty snow packs.
pub fn run(config: &ModelConfig, forcing: &Forcing) -> SimulationOutput {
    Engine::new(config).run_model(forcing)
}
