use std::ffi::CString;

use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::PyRuntimeWarning;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{checked_slice, contiguous_slice, parse_dates, to_py_err};

use snowband_core::basin::{
    BasinInfo, BasinRecordSource, CsvBasinSource, KEY_ALTITUDE_BANDS, KEY_MEDIAN_ELEVATION, KEY_SNOW_NORM,
};
use snowband_core::cemaneige::constants::{MODEL_NAME, N_PARAMS, PARAM_NAMES, TIME_STEP};
use snowband_core::cemaneige::{Engine, FluxesTimeseries, ModelConfig, Parameters};
use snowband_core::forcing::Forcing;

// ---------------------------------------------------------------------------
// Typed pyclass result objects
// ---------------------------------------------------------------------------

define_timeseries_result! {
    /// CemaNeige run results with typed numpy array attributes.
    pub struct SnowResult from snowband_core::cemaneige::FluxesTimeseries {
        precip, temp, pliq, psol, pot_melt, melt,
        pliq_and_melt, snow_pack, thermal_state, gratio,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_config(
    basin: &str,
    altitude_bands: &[f64],
    z50: f64,
    qnbv: f64,
    params: Option<PyReadonlyArray1<'_, f64>>,
    beta: f64,
    vmin: f64,
    tf: f64,
) -> PyResult<ModelConfig> {
    let info = BasinInfo {
        qnbv,
        altitude_bands: altitude_bands.to_vec(),
        z50,
    };
    let mut builder = ModelConfig::builder(basin, info)
        .beta(beta)
        .min_melt_speed(vmin)
        .melt_threshold(tf);
    if let Some(p) = &params {
        let p_slice = checked_slice(p, N_PARAMS, "params")?;
        builder = builder.parameters(Parameters::from_array(p_slice).map_err(to_py_err)?);
    }
    builder.build().map_err(to_py_err)
}

/// Read `{basin}_CemaNeigeInfo.csv` from `directory`.
///
/// Returns a dict with `qnbv`, `altitude_bands` and `z50`.
#[pyfunction]
fn load_basin<'py>(py: Python<'py>, directory: &str, basin: &str) -> PyResult<Bound<'py, PyDict>> {
    let source = CsvBasinSource::new(directory);
    let record = source.load(basin).map_err(to_py_err)?;
    let info = BasinInfo::from_record(&record).map_err(to_py_err)?;

    let dict = PyDict::new(py);
    dict.set_item("qnbv", info.qnbv)?;
    dict.set_item("altitude_bands", PyArray1::from_vec(py, info.altitude_bands))?;
    dict.set_item("z50", info.z50)?;
    Ok(dict)
}

/// Run CemaNeige over a daily timeseries.
///
/// `dates` are ISO `YYYY-MM-DD` strings. Returns
/// (liquid_output, SnowResult, layer_snow_pack[n_timesteps, n_bands]).
#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(signature = (
    precip,
    temp,
    dates,
    altitude_bands,
    z50,
    qnbv,
    params=None,
    beta=0.0,
    vmin=0.1,
    tf=0.0,
))]
fn cemaneige_run<'py>(
    py: Python<'py>,
    precip: PyReadonlyArray1<'py, f64>,
    temp: PyReadonlyArray1<'py, f64>,
    dates: Vec<String>,
    altitude_bands: PyReadonlyArray1<'py, f64>,
    z50: f64,
    qnbv: f64,
    params: Option<PyReadonlyArray1<'py, f64>>,
    beta: f64,
    vmin: f64,
    tf: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, SnowResult, Bound<'py, PyArray2<f64>>)> {
    let bands = contiguous_slice(&altitude_bands)?;
    let config = build_config("python", bands, z50, qnbv, params, beta, vmin, tf)?;

    let dates = parse_dates(&dates)?;
    let forcing = Forcing::new(
        contiguous_slice(&precip)?.to_vec(),
        contiguous_slice(&temp)?.to_vec(),
        &dates,
    )
    .map_err(to_py_err)?;
    for w in forcing.warnings() {
        let message = CString::new(w.to_string())?;
        PyErr::warn(py, &py.get_type::<PyRuntimeWarning>(), &message, 1)?;
    }

    // Stepped by hand so per-band packs can be collected alongside the totals
    let mut engine = Engine::new(&config);
    let mut layer_snow_pack = Vec::with_capacity(forcing.len());
    let mut liquid = Vec::with_capacity(forcing.len());
    let mut fluxes = FluxesTimeseries::with_capacity(forcing.len());
    for day in forcing.days() {
        let f = engine.step(day);
        liquid.push(f.pliq_and_melt);
        fluxes.push(&f);
        layer_snow_pack.push(engine.layer_fluxes().iter().map(|l| l.snow_pack).collect::<Vec<_>>());
    }

    Ok((
        PyArray1::from_vec(py, liquid),
        SnowResult::from_timeseries(py, fluxes),
        PyArray2::from_vec2(py, &layer_snow_pack)?,
    ))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = parent.py();
    let m = PyModule::new(py, "cemaneige")?;
    m.add("MODEL_NAME", MODEL_NAME)?;
    m.add("TIME_STEP", TIME_STEP)?;
    m.add("PARAM_NAMES", PARAM_NAMES.to_vec())?;
    m.add("KEYS", (KEY_SNOW_NORM, KEY_ALTITUDE_BANDS, KEY_MEDIAN_ELEVATION))?;
    m.add_function(wrap_pyfunction!(load_basin, &m)?)?;
    m.add_function(wrap_pyfunction!(cemaneige_run, &m)?)?;
    m.add_class::<SnowResult>()?;
    parent.add_submodule(&m)?;
    Ok(())
}
