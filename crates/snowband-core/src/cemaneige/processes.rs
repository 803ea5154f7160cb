/// CemaNeige snow module process functions.
///
/// Pure per-band functions, one per equation. Every `min` here propagates
/// NaN so that bad forcing shows up in the output instead of being clamped away.
use super::constants::{T_RAIN, T_SNOW};

/// `min` that returns NaN if either operand is NaN.
#[inline]
pub fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Fraction of precipitation falling as snow.
///
/// Solid below T_SNOW (-1C), liquid above T_RAIN (3C), linear in between.
#[inline]
pub fn compute_solid_fraction(temp: f64) -> f64 {
    if temp > T_RAIN {
        0.0
    } else if temp < T_SNOW {
        1.0
    } else {
        1.0 - (temp - T_SNOW) / (T_RAIN - T_SNOW)
    }
}

/// Split precipitation into liquid (rain) and solid (snow) components.
///
/// Returns (pliq, psol).
#[inline]
pub fn partition_precipitation(precip: f64, solid_fraction: f64) -> (f64, f64) {
    let pliq = (1.0 - solid_fraction) * precip;
    let psol = solid_fraction * precip;
    (pliq, psol)
}

/// Update snow pack thermal state using exponential smoothing.
///
/// Capped at 0C: the pack cannot be warmer than the melting point.
#[inline]
pub fn update_thermal_state(etg: f64, temp: f64, ctg: f64) -> f64 {
    nan_min(0.0, ctg * etg + (1.0 - ctg) * temp)
}

/// Compute potential snow melt using the degree-day method.
///
/// Melt needs air above 0C and a thermal state that has reached `tf`.
/// Capped at the available snow pack.
#[inline]
pub fn compute_potential_melt(etg: f64, temp: f64, kf: f64, tf: f64, snow_pack: f64) -> f64 {
    if temp > 0.0 && etg >= tf {
        nan_min(snow_pack, kf * (temp - tf))
    } else if temp.is_nan() || etg.is_nan() {
        f64::NAN
    } else {
        0.0
    }
}

/// Snow pack content relative to the full-melt threshold (Gratio).
///
/// Saturates at 1. A zero threshold (QNBV = 0) counts as saturated, so an
/// empty pack gives 1 instead of the NaN of `0 / 0`.
#[inline]
pub fn compute_gratio(snow_pack: f64, gthreshold: f64) -> f64 {
    if snow_pack >= gthreshold {
        1.0
    } else {
        snow_pack / gthreshold
    }
}

/// Actual melt: potential melt slowed down for thin snow packs.
///
/// Never less than `vmin` of potential.
#[inline]
pub fn compute_actual_melt(potential_melt: f64, gratio: f64, vmin: f64) -> f64 {
    potential_melt * ((1.0 - vmin) * gratio + vmin)
}
