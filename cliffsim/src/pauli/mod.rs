//! Pauli operators: single-qubit letters, powers of `i`, symplectic bit vectors and whole
//! Pauli strings with phase-tracked multiplication.

mod phase;
mod string;
mod symplectic;

pub use phase::{exponent, IPower, PauliLetter};
pub use string::{dense_matrix, kron, PauliString};
pub use symplectic::F2nSymplectic;
