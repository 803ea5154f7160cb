/// Pure Rust benchmark of the snow engine.
///
/// Run with `cargo run --release --features bench --bin bench`.
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use snowband_core::basin::BasinInfo;
use snowband_core::cemaneige::{run, ModelConfig};
use snowband_core::error::SnowbandError;
use snowband_core::forcing::Forcing;

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic forcing.
fn make_forcing(n: usize, seed: u64) -> Result<Forcing, SnowbandError> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let precip: Vec<f64> = (0..n).map(|_| next_f64() * 10.0).collect();
    let temp: Vec<f64> = (0..n).map(|_| -10.0 + next_f64() * 30.0).collect();
    let day_of_year: Vec<u16> = (0..n).map(|t| (t % 365) as u16 + 1).collect();
    Ok(Forcing::from_day_of_year(precip, temp, day_of_year)?)
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn config(n_bands: usize) -> Result<ModelConfig, SnowbandError> {
    let altitude_bands: Vec<f64> = (0..n_bands).map(|i| 800.0 + 250.0 * i as f64).collect();
    let z50 = altitude_bands[n_bands / 2];
    let info = BasinInfo {
        qnbv: 350.0,
        altitude_bands,
        z50,
    };
    Ok(ModelConfig::builder(format!("bench-{n_bands}"), info)
        .beta(0.0004)
        .build()?)
}

fn main() -> Result<(), SnowbandError> {
    env_logger::init();

    let sizes = [365usize, 3_650, 36_500];
    let band_counts = [1usize, 5, 10];

    println!("{:>6} | {:>8} | {:>12} | {:>14}", "bands", "days", "median", "band-days/s");
    println!("-------|----------|--------------|---------------");
    for &n_bands in &band_counts {
        let cfg = config(n_bands)?;
        for &n in &sizes {
            let forcing = make_forcing(n, 42)?;

            // Warmup
            black_box(run(&cfg, &forcing));

            let dur = median_time(|| {
                black_box(run(&cfg, &forcing));
            });
            let rate = (n * n_bands) as f64 / dur.as_secs_f64();
            println!("{:>6} | {:>8} | {:>12.3?} | {:>14.3e}", n_bands, n, dur, rate);
        }
    }
    Ok(())
}
