use std::fmt::Display;

use jiff::civil::Date;
use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py>(arr: &'py PyReadonlyArray1<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))
}

/// Validate length + contiguity of a numpy array.
pub fn checked_slice<'py>(
    arr: &'py PyReadonlyArray1<'py, f64>,
    expected_len: usize,
    name: &str,
) -> PyResult<&'py [f64]> {
    let slice = contiguous_slice(arr)?;
    if slice.len() != expected_len {
        return Err(PyValueError::new_err(format!(
            "{} must have {} elements, got {}",
            name,
            expected_len,
            slice.len()
        )));
    }
    Ok(slice)
}

/// Parse ISO `YYYY-MM-DD` strings.
pub fn parse_dates(raw: &[String]) -> PyResult<Vec<Date>> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            s.parse::<Date>()
                .map_err(|e| PyValueError::new_err(format!("dates[{i}] = '{s}': {e}")))
        })
        .collect()
}

/// Surface a core error as `ValueError`, keeping its message.
pub fn to_py_err(err: impl Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}
