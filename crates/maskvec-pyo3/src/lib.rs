use pyo3::prelude::*;

mod convert;
mod mask;

#[pymodule]
fn maskvec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mask::encode, m)?)?;
    m.add_function(wrap_pyfunction!(mask::encode_from_scores, m)?)?;
    m.add_function(wrap_pyfunction!(mask::decode, m)?)?;
    m.add_function(wrap_pyfunction!(mask::to_paths, m)?)?;
    m.add_function(wrap_pyfunction!(mask::area, m)?)?;
    m.add_function(wrap_pyfunction!(mask::to_bbox, m)?)?;
    m.add_function(wrap_pyfunction!(mask::rle_to_string, m)?)?;
    m.add_function(wrap_pyfunction!(mask::rle_from_string, m)?)?;
    Ok(())
}
