//! `cliffsim` simulates Clifford circuits in the stabilizer formalism, following the
//! Aaronson–Gottesman tableau algorithm. Some features include:
//! - a packed binary [`Tableau`] of destabilizer and stabilizer generators with sign bits
//! - Hadamard, phase and CNOT updates in `O(n)` time per gate
//! - computational basis measurement with random or deterministic outcomes
//! - decomposition of the other common Clifford gates into H, S and CNOT
//! - decoding of the generators into Pauli strings or dense matrices
//! - parallel multi-shot sampling
//!
//! ```
//! use cliffsim::{seeded_rng, Tableau};
//!
//! let bell = Tableau::zero_state(2)?.h(0)?.cnot(0, 1)?;
//! let stabilizers: Vec<String> = bell.stabilizers().iter().map(|p| p.to_string()).collect();
//! assert_eq!(stabilizers, ["XX", "ZZ"]);
//!
//! let (_, outcomes) = bell.measure(&[0, 1], true, &mut seeded_rng(Some(1)))?;
//! assert_eq!(outcomes[0], outcomes[1]);
//! # Ok::<(), cliffsim::TableauError>(())
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::bool_assert_comparison,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::upper_case_acronyms
)]
pub mod bitmatrix;
pub mod bitvec;
pub mod decoder;
pub mod error;
pub mod gates;
pub mod pauli;
pub mod tableau;

pub use bitmatrix::{BitMatrix, RowOps};
pub use bitvec::{BitBlock, BitRange, BitVec};
pub use decoder::{decode_half, tableau_to_generators, Generator, Half};
pub use error::TableauError;
pub use gates::{Elementary, Gate};
pub use pauli::{IPower, PauliLetter, PauliString};
pub use tableau::parallel::{seeded_rng, ParallelSampling, SamplingConfig};
pub use tableau::Tableau;
