use maskvec_core::{Error, Rle};
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

pub fn to_py_err(e: Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

pub fn rle_to_py(py: Python<'_>, rle: &Rle) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("size", vec![rle.h, rle.w])?;
    dict.set_item("counts", rle.counts.clone())?;
    Ok(dict.into_any().unbind())
}

/// Accepts `{"size": [h, w], "counts": [ints]}` or the same with a compressed
/// counts string. Counts must cover exactly `h * w` pixels.
pub fn py_to_rle(dict: &Bound<'_, PyDict>) -> PyResult<Rle> {
    let size: [u32; 2] = dict
        .get_item("size")?
        .ok_or_else(|| PyKeyError::new_err("RLE is missing 'size'"))?
        .extract()?;
    let counts_obj = dict
        .get_item("counts")?
        .ok_or_else(|| PyKeyError::new_err("RLE is missing 'counts'"))?;

    let rle = match counts_obj.extract::<String>() {
        Ok(s) => Rle::from_compressed(&s, size[0], size[1]),
        Err(_) => Rle::from_counts(size[0], size[1], counts_obj.extract()?),
    };
    rle.map_err(to_py_err)
}
