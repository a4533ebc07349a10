//! Reading Pauli generators back out of a tableau.
//!
//! A row's sign bit `r` is rendered as the real phase `(-1)^r`; decoded generators of a
//! tableau never carry a factor of `i`.

use ndarray::Array2;
use num_complex::Complex64;

use crate::{
    error::TableauError,
    pauli::{dense_matrix, IPower, PauliLetter, PauliString},
    tableau::Tableau,
};

/// Which half of the tableau to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    Destabilizers,
    Stabilizers,
}

/// A decoded generator, either symbolic or as a dense `2^n x 2^n` matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    Paulis(Vec<PauliLetter>),
    Matrix(Array2<Complex64>),
}

impl Generator {
    pub fn as_paulis(&self) -> Option<&[PauliLetter]> {
        match self {
            Generator::Paulis(letters) => Some(letters.as_slice()),
            Generator::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Array2<Complex64>> {
        match self {
            Generator::Paulis(_) => None,
            Generator::Matrix(m) => Some(m),
        }
    }
}

/// The stabilizer generators of `tableau` and their phases.
///
/// With `return_array` every generator is materialized as a dense matrix (without its
/// phase, which is returned separately); otherwise it is the list of single-qubit letters.
pub fn tableau_to_generators(
    tableau: &Tableau,
    return_array: bool,
) -> (Vec<Generator>, Vec<IPower>) {
    decode_half(tableau, Half::Stabilizers, return_array)
}

/// Like [`tableau_to_generators`], for either half.
pub fn decode_half(
    tableau: &Tableau,
    half: Half,
    return_array: bool,
) -> (Vec<Generator>, Vec<IPower>) {
    tableau
        .half_generators(half)
        .into_iter()
        .map(|p| {
            let generator = if return_array {
                Generator::Matrix(dense_matrix(p.letters()))
            } else {
                Generator::Paulis(p.letters())
            };
            (generator, p.phase())
        })
        .unzip()
}

impl Tableau {
    /// The signed Pauli operator stored in generator row `row` (`0..2n`).
    pub fn row_pauli_string(&self, row: usize) -> Result<PauliString, TableauError> {
        self.check_row(row, false)?;
        Ok(self.signed_row(row))
    }

    fn signed_row(&self, row: usize) -> PauliString {
        PauliString::new(
            IPower::from_sign_bit(self.phase_bit(row)),
            self.row_paulis(row),
        )
    }

    fn half_rows(&self, half: Half) -> std::ops::Range<usize> {
        let n = self.num_qubits();
        match half {
            Half::Destabilizers => 0..n,
            Half::Stabilizers => n..2 * n,
        }
    }

    pub fn half_generators(&self, half: Half) -> Vec<PauliString> {
        self.half_rows(half)
            .map(|row| self.signed_row(row))
            .collect()
    }

    pub fn stabilizers(&self) -> Vec<PauliString> {
        self.half_generators(Half::Stabilizers)
    }

    pub fn destabilizers(&self) -> Vec<PauliString> {
        self.half_generators(Half::Destabilizers)
    }

    /// Destabilizers followed by stabilizers.
    pub fn generators(&self) -> Vec<PauliString> {
        let mut all = self.destabilizers();
        all.extend(self.stabilizers());
        all
    }

    /// Every element of the group generated by one half of the tableau.
    ///
    /// Elements are listed by descending subset mask with generator 0 as the most significant
    /// bit: the product of all generators comes first and the identity last.
    pub fn stabilizer_group(
        &self,
        half: Half,
    ) -> Result<impl Iterator<Item = PauliString> + '_, TableauError> {
        let generators = self.half_generators(half);
        let n = generators.len();
        if n >= usize::BITS as usize {
            return Err(TableauError::GroupTooLarge { num_generators: n });
        }
        let num_qubits = self.num_qubits();
        Ok((0..1usize << n).rev().map(move |mask| {
            let mut product = PauliString::identity(num_qubits);
            for (k, generator) in generators.iter().enumerate() {
                if (mask >> (n - 1 - k)) & 1 == 1 {
                    product *= generator;
                }
            }
            product
        }))
    }
}
