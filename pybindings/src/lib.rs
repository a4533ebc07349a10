// There seems to be some issues with the pyo3 bindings generation on methods returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod tableau;

use crate::tableau::PyTableau;
use pyo3::prelude::*;

#[pymodule]
fn libcliffsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTableau>()?;
    Ok(())
}
