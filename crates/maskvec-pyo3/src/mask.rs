use maskvec_core::{checked_dims, mask as rmask, rle_to_paths, Bitmap, Params, Rle};
use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{py_to_rle, rle_to_py, to_py_err};

/// Encode a 2-D `uint8` array (nonzero is set) into an RLE dict.
#[pyfunction]
pub fn encode(py: Python<'_>, mask: PyReadonlyArray2<u8>) -> PyResult<PyObject> {
    let shape = mask.shape();
    let (h, w) = checked_dims(shape[0], shape[1]).map_err(to_py_err)?;
    // numpy arrays are row-major, which is also the bitmap layout
    let alpha: Vec<u8> = mask.as_array().iter().copied().collect();
    let bitmap = Bitmap::from_alpha(&alpha, w, h).map_err(to_py_err)?;
    rle_to_py(py, &rmask::encode(&bitmap))
}

#[pyfunction]
#[pyo3(signature = (scores, threshold = 0.5))]
pub fn encode_from_scores(
    py: Python<'_>,
    scores: PyReadonlyArray2<f32>,
    threshold: f32,
) -> PyResult<PyObject> {
    let shape = scores.shape();
    let values: Vec<f32> = scores.as_array().iter().copied().collect();
    let (h, w) = checked_dims(shape[0], shape[1]).map_err(to_py_err)?;
    let rle = rmask::encode_from_scores(&values, h, w, threshold).map_err(to_py_err)?;
    rle_to_py(py, &rle)
}

#[pyfunction]
pub fn decode<'py>(py: Python<'py>, rle: &Bound<'py, PyDict>) -> PyResult<Bound<'py, PyArray2<u8>>> {
    let rle = py_to_rle(rle)?;
    let bitmap = rmask::decode(&rle).map_err(to_py_err)?;
    let data: Vec<u8> = bitmap.as_slice().iter().map(|&v| v as u8).collect();
    PyArray1::from_vec(py, data).reshape([rle.h as usize, rle.w as usize])
}

/// Trace the mask boundary into SVG-style path strings.
#[pyfunction]
#[pyo3(signature = (rle, resolve_holes = true, min_area = 0))]
pub fn to_paths(rle: &Bound<'_, PyDict>, resolve_holes: bool, min_area: u64) -> PyResult<Vec<String>> {
    let rle = py_to_rle(rle)?;
    let params = Params {
        resolve_holes,
        min_area,
    };
    rle_to_paths(&rle, &params).map_err(to_py_err)
}

#[pyfunction]
pub fn area(rle: &Bound<'_, PyDict>) -> PyResult<u64> {
    let rle = py_to_rle(rle)?;
    Ok(rmask::area(&rle))
}

#[pyfunction]
pub fn to_bbox(rle: &Bound<'_, PyDict>) -> PyResult<Vec<u32>> {
    let rle = py_to_rle(rle)?;
    Ok(rmask::to_bbox(&rle).to_vec())
}

#[pyfunction]
pub fn rle_to_string(rle: &Bound<'_, PyDict>) -> PyResult<String> {
    let rle = py_to_rle(rle)?;
    Ok(rmask::rle_to_string(&rle))
}

#[pyfunction]
pub fn rle_from_string(py: Python<'_>, s: &str, h: u32, w: u32) -> PyResult<PyObject> {
    let rle = Rle::from_compressed(s, h, w).map_err(to_py_err)?;
    rle_to_py(py, &rle)
}
