//! Elevation regionalization of basin-average forcing.
//!
//! Temperature follows a daily vertical gradient around the median elevation.
//! Precipitation is split evenly across bands, then reweighted by an
//! exponential elevation correction whose band mean is normalised to one.

/// Temperature at a band altitude, given a gradient in C/100m.
///
/// Gradients are negative when air cools with height.
#[inline]
pub fn extrapolate_temp(temp: f64, gradient: f64, band_altitude: f64, median_altitude: f64) -> f64 {
    temp + gradient * (band_altitude - median_altitude) / 100.0
}

/// Unnormalised precipitation weight `exp(beta * (z - z50))`.
#[inline]
pub fn precip_correction(beta: f64, band_altitude: f64, median_altitude: f64) -> f64 {
    (beta * (band_altitude - median_altitude)).exp()
}

/// Mean precipitation correction over all bands.
///
/// Dividing by this keeps the band sum of precipitation equal to the basin input.
pub fn normalization_constant(beta: f64, band_altitudes: &[f64], median_altitude: f64) -> f64 {
    let total: f64 = band_altitudes
        .iter()
        .map(|z| precip_correction(beta, *z, median_altitude))
        .sum();
    total / band_altitudes.len() as f64
}

/// Fraction of basin precipitation falling on each band.
///
/// `(1 / c) * (1 / n) * exp(beta * (z - z50))`, summing to one across bands.
pub fn precip_shares(beta: f64, band_altitudes: &[f64], median_altitude: f64, c: f64) -> Vec<f64> {
    let n = band_altitudes.len() as f64;
    band_altitudes
        .iter()
        .map(|z| precip_correction(beta, *z, median_altitude) / (c * n))
        .collect()
}
