//! snowband: elevation-band snow accounting for rainfall-runoff forcing.
//!
//! Daily precipitation and air temperature are regionalized onto elevation
//! bands, split into rain and snow, and passed through a per-band CemaNeige
//! snow pack. The result is the daily liquid water reaching the ground.
//!
//! ```no_run
//! use snowband_core::basin::CsvBasinSource;
//! use snowband_core::cemaneige::{run, ModelConfig};
//! use snowband_core::forcing::Forcing;
//! use jiff::civil::date;
//!
//! # fn main() -> Result<(), snowband_core::error::SnowbandError> {
//! let source = CsvBasinSource::new("basins");
//! let config = ModelConfig::from_source(&source, "Arve", None)?;
//! let dates = [date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)];
//! let forcing = Forcing::new(vec![4.0, 0.0, 12.5], vec![-3.0, 1.5, 0.2], &dates)?;
//! let output = run(&config, &forcing);
//! assert_eq!(output.liquid_output.len(), 3);
//! # Ok(())
//! # }
//! ```
pub mod basin;
pub mod calendar;
pub mod cemaneige;
pub mod elevation;
pub mod error;
pub mod forcing;
pub mod gradient;
