use num_complex::Complex64;
use pyo3::exceptions::PyValueError;
use pyo3::{prelude::*, IntoPyObjectExt};

use cliffsim::{
    seeded_rng, BitMatrix, Gate, Generator, Half, ParallelSampling, SamplingConfig, Tableau,
    TableauError,
};
use rand::rngs::SmallRng;

fn value_error(e: TableauError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn half_from_name(name: &str) -> PyResult<Half> {
    match name {
        "stabilizers" => Ok(Half::Stabilizers),
        "destabilizers" => Ok(Half::Destabilizers),
        _ => Err(PyValueError::new_err(format!(
            "expected 'stabilizers' or 'destabilizers', got '{}'",
            name
        ))),
    }
}

#[pyclass(name = "Tableau")]
#[derive(Clone)]
pub struct PyTableau {
    pub(crate) inner: Tableau,
    rng: SmallRng,
}

#[pymethods]
impl PyTableau {
    /// Creates the tableau of |0...0> on n qubits
    #[new]
    #[pyo3(signature = (nqubits, seed=None))]
    pub fn new(nqubits: usize, seed: Option<u64>) -> PyResult<Self> {
        Ok(PyTableau {
            inner: Tableau::zero_state(nqubits).map_err(value_error)?,
            rng: seeded_rng(seed),
        })
    }

    /// Same as the constructor
    #[staticmethod]
    #[pyo3(signature = (nqubits, seed=None))]
    pub fn zero_state(nqubits: usize, seed: Option<u64>) -> PyResult<Self> {
        Self::new(nqubits, seed)
    }

    /// Wraps a (2n+1) x (2n+1) or 2n x (2n+1) nested list of bits
    #[staticmethod]
    #[pyo3(signature = (rows, seed=None))]
    pub fn from_bits(rows: Vec<Vec<bool>>, seed: Option<u64>) -> PyResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(PyValueError::new_err("All rows must have the same length"));
        }
        let matrix = BitMatrix::build(rows.len(), cols, |i, j| rows[i][j]);
        Ok(PyTableau {
            inner: Tableau::from_bit_matrix(matrix).map_err(value_error)?,
            rng: seeded_rng(seed),
        })
    }

    /// Returns the full tableau as a nested list of bits, scratch row included
    pub fn bits(&self) -> Vec<Vec<bool>> {
        let m = self.inner.as_bit_matrix();
        (0..m.rows())
            .map(|i| (0..m.cols()).map(|j| m.bit(i, j)).collect())
            .collect()
    }

    #[getter]
    pub fn nqubits(&self) -> usize {
        self.inner.num_qubits()
    }

    /// The sign bits of the generators
    #[pyo3(signature = (include_scratch=false))]
    pub fn r(&self, include_scratch: bool) -> Vec<bool> {
        self.inner.r(include_scratch)
    }

    pub fn h(&mut self, qubit: usize) -> PyResult<()> {
        self.inner = self.inner.clone().h(qubit).map_err(value_error)?;
        Ok(())
    }

    pub fn s(&mut self, qubit: usize) -> PyResult<()> {
        self.inner = self.inner.clone().s(qubit).map_err(value_error)?;
        Ok(())
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> PyResult<()> {
        self.inner = self.inner.clone().cnot(control, target).map_err(value_error)?;
        Ok(())
    }

    /// Applies a gate by name, e.g. apply("cz", [0, 1])
    pub fn apply(&mut self, name: &str, qubits: Vec<usize>) -> PyResult<()> {
        let gate = Gate::from_name(name, &qubits).ok_or_else(|| {
            PyValueError::new_err(format!(
                "Unknown gate '{}' on {} qubit(s)",
                name,
                qubits.len()
            ))
        })?;
        self.inner = self.inner.clone().apply(&gate).map_err(value_error)?;
        Ok(())
    }

    /// Row h becomes the product of rows h and i
    #[pyo3(signature = (h, i, include_scratch=false))]
    pub fn rowsum(&mut self, h: usize, i: usize, include_scratch: bool) -> PyResult<()> {
        self.inner = self
            .inner
            .clone()
            .rowsum(h, i, include_scratch)
            .map_err(value_error)?;
        Ok(())
    }

    /// Measures the qubits in order and returns the outcomes as 0/1. Unless collapse is set,
    /// the tableau is left as it was
    #[pyo3(signature = (qubits, collapse=false))]
    pub fn measure(&mut self, qubits: Vec<usize>, collapse: bool) -> PyResult<Vec<u8>> {
        let (state, outcomes) = self
            .inner
            .clone()
            .measure(&qubits, collapse, &mut self.rng)
            .map_err(value_error)?;
        self.inner = state;
        Ok(outcomes.into_iter().map(u8::from).collect())
    }

    /// Independent shots of measuring the qubits, computed in parallel
    #[pyo3(signature = (qubits, nshots, seed=None))]
    pub fn sample(
        &self,
        qubits: Vec<usize>,
        nshots: usize,
        seed: Option<u64>,
    ) -> PyResult<Vec<Vec<u8>>> {
        let config = SamplingConfig { shots: nshots, seed };
        let shots = self.inner.par_sample(&qubits, &config).map_err(value_error)?;
        Ok(shots
            .into_iter()
            .map(|shot| shot.into_iter().map(u8::from).collect())
            .collect())
    }

    /// Returns (generators, phases) for one half of the tableau. Generators are strings like
    /// "XZI", or dense matrices when return_array is set; phases are +1 or -1
    #[pyo3(signature = (return_array=false, half="stabilizers"))]
    pub fn generators(&self, return_array: bool, half: &str) -> PyResult<(PyObject, Vec<i8>)> {
        let (generators, phases) =
            cliffsim::decode_half(&self.inner, half_from_name(half)?, return_array);
        let phases = phases
            .into_iter()
            .map(|p| if p.is_negative() { -1 } else { 1 })
            .collect();
        Python::with_gil(|py| {
            let decoded = if return_array {
                let matrices: Vec<Vec<Vec<Complex64>>> = generators
                    .iter()
                    .filter_map(Generator::as_matrix)
                    .map(|m| m.outer_iter().map(|row| row.to_vec()).collect())
                    .collect();
                matrices.into_py_any(py)?
            } else {
                let strings: Vec<String> = generators
                    .iter()
                    .filter_map(Generator::as_paulis)
                    .map(|letters| letters.iter().map(|l| l.as_char()).collect())
                    .collect();
                strings.into_py_any(py)?
            };
            Ok((decoded, phases))
        })
    }

    /// The signed stabilizer generators, e.g. ["XX", "-ZZ"]
    pub fn stabilizers(&self) -> Vec<String> {
        self.inner.stabilizers().iter().map(|p| p.to_string()).collect()
    }

    pub fn destabilizers(&self) -> Vec<String> {
        self.inner.destabilizers().iter().map(|p| p.to_string()).collect()
    }

    /// Every element of the group generated by one half of the tableau
    #[pyo3(signature = (half="stabilizers"))]
    pub fn group(&self, half: &str) -> PyResult<Vec<String>> {
        let elements = self
            .inner
            .stabilizer_group(half_from_name(half)?)
            .map_err(value_error)?;
        Ok(elements.map(|p| p.to_string()).collect())
    }

    pub fn is_symplectic(&self) -> bool {
        self.inner.is_symplectic()
    }

    /// Returns a copy of the tableau, with its own copy of the random state
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn __eq__(&self, other: &PyTableau) -> bool {
        self.inner == other.inner
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Tableau(nqubits={})", self.inner.num_qubits())
    }
}
