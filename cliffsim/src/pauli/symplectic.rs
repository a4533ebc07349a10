use std::{
    fmt::Display,
    ops::{Add, AddAssign},
};

use crate::{
    bitvec::{min_blocks, BitRange, BitVec},
    pauli::PauliLetter,
};

/// A vector in `F_2^{2n}`: the X-part and Z-part of a Pauli string without its phase.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct F2nSymplectic {
    pub(crate) xs: BitVec,
    pub(crate) zs: BitVec,
    pub(crate) num_qubits: usize,
}

impl Display for F2nSymplectic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let render = |bits: &BitVec| {
            bits.iter()
                .take(self.num_qubits)
                .map(|b| if b { '1' } else { '0' })
                .collect::<String>()
        };
        write!(f, "Xs: {} Zs: {}", render(&self.xs), render(&self.zs))
    }
}

impl F2nSymplectic {
    pub fn zeros(num_qubits: usize) -> Self {
        Self {
            xs: BitVec::zeros(min_blocks(num_qubits)),
            zs: BitVec::zeros(min_blocks(num_qubits)),
            num_qubits,
        }
    }

    /// Reads the X-part from bits `0..n` of `row` and the Z-part from bits `n..2n`.
    pub fn from_row(row: &BitRange, num_qubits: usize) -> Self {
        Self {
            xs: (0..num_qubits).map(|j| row.bit(j)).collect(),
            zs: (num_qubits..2 * num_qubits).map(|j| row.bit(j)).collect(),
            num_qubits,
        }
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn letter(&self, qubit: usize) -> PauliLetter {
        PauliLetter::from_bits(self.xs.bit(qubit), self.zs.bit(qubit))
    }

    pub fn letters(&self) -> impl Iterator<Item = PauliLetter> + '_ {
        (0..self.num_qubits).map(|q| self.letter(q))
    }

    /// The standard symplectic form on `F_2^{2n}`; true iff the two Pauli strings anticommute.
    ///
    /// # Panics
    ///
    /// The two must live on the same number of qubits.
    pub fn omega(&self, other: &Self) -> bool {
        assert_eq!(self.num_qubits, other.num_qubits);
        self.xs.dot(&other.zs) ^ self.zs.dot(&other.xs)
    }

    /// Number of qubits acted on non-trivially.
    pub fn weight(&self) -> usize {
        self.letters().filter(|l| *l != PauliLetter::I).count()
    }
}

impl<T> From<T> for F2nSymplectic
where
    T: ExactSizeIterator<Item = PauliLetter>,
{
    fn from(pauli_letters: T) -> Self {
        let num_qubits = pauli_letters.len();
        let (xs, zs): (Vec<bool>, Vec<bool>) = pauli_letters.map(PauliLetter::bits).unzip();
        Self {
            xs: xs.into_iter().collect(),
            zs: zs.into_iter().collect(),
            num_qubits,
        }
    }
}

impl Add for &F2nSymplectic {
    type Output = F2nSymplectic;

    fn add(self, rhs: Self) -> Self::Output {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl AddAssign<&Self> for F2nSymplectic {
    fn add_assign(&mut self, rhs: &Self) {
        assert_eq!(self.num_qubits, rhs.num_qubits);
        *self.xs ^= &rhs.xs;
        *self.zs ^= &rhs.zs;
    }
}
