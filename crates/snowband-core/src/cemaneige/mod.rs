//! CemaNeige snow accumulation and melt model.
//!
//! A degree-day snow routine run independently on each elevation band of a
//! basin. Its output, rain plus melt, feeds a downstream rainfall-runoff model.

pub mod config;
pub mod constants;
pub mod params;
pub mod processes;
pub mod run;
pub mod state;

pub use config::{ModelConfig, ModelConfigBuilder};
pub use params::Parameters;
pub use run::{run, DailyForcing, Engine, Fluxes, FluxesTimeseries, LayerFluxes, SimulationOutput};
pub use state::{LayerState, State};
