//! The symplectic tableau engine.
//!
//! A [`Tableau`] for `n` qubits is a `(2n+1) x (2n+1)` bit matrix. Rows `0..n` hold the
//! destabilizer generators, rows `n..2n` the stabilizer generators and row `2n` is scratch
//! space used while computing deterministic measurement outcomes. In every row, columns
//! `0..n` are the X-part, columns `n..2n` the Z-part and column `2n` the sign bit `r`
//! (`0` for `+`, `1` for `-`).
//!
//! Every update consumes the tableau and returns the updated one, so no two owners ever
//! observe the same value changing under them; clone first to keep an earlier state.

pub mod parallel;

use std::fmt;

use log::{debug, trace};
use rand::Rng;

use crate::{
    bitmatrix::{BitMatrix, RowOps},
    error::TableauError,
    pauli::{exponent, F2nSymplectic},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    matrix: BitMatrix,
}

/// The number of qubits described by a tableau of the given side length, if that length
/// has the form `2n+1` with `n >= 1`.
#[inline]
pub const fn num_qubits_for_side(side: usize) -> Option<usize> {
    if side >= 3 && side % 2 == 1 {
        Some((side - 1) / 2)
    } else {
        None
    }
}

impl Tableau {
    /// The computational basis state `|0...0>`: destabilizers `X_j`, stabilizers `Z_j`, all
    /// signs `+`.
    pub fn zero_state(num_qubits: usize) -> Result<Self, TableauError> {
        let side = 2 * num_qubits + 1;
        if num_qubits == 0 {
            return Err(TableauError::MalformedShape {
                rows: side,
                cols: side,
            });
        }
        // identity on the generator rows, nothing in the scratch row or phase column
        let mut matrix = BitMatrix::identity(side);
        matrix.set_bit(side - 1, side - 1, false);
        Ok(Self { matrix })
    }

    /// Wraps a raw bit matrix.
    ///
    /// Accepts either the full `(2n+1) x (2n+1)` layout or just the `2n` generator rows
    /// (`2n x (2n+1)`), in which case a scratch row is appended. The scratch row is cleared
    /// either way.
    pub fn from_bit_matrix(matrix: BitMatrix) -> Result<Self, TableauError> {
        let (rows, cols) = (matrix.rows(), matrix.cols());
        let malformed = TableauError::MalformedShape { rows, cols };
        let Some(num_qubits) = num_qubits_for_side(cols) else {
            return Err(malformed);
        };
        let side = 2 * num_qubits + 1;
        let mut matrix = if rows == side {
            matrix
        } else if rows + 1 == side {
            BitMatrix::build(side, side, |i, j| i < rows && matrix.bit(i, j))
        } else {
            return Err(malformed);
        };
        matrix.zero_row(side - 1);
        Ok(Self { matrix })
    }

    #[inline]
    pub fn as_bit_matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    #[inline]
    pub fn into_bit_matrix(self) -> BitMatrix {
        self.matrix
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        (self.matrix.rows() - 1) / 2
    }

    #[inline]
    fn scratch_row(&self) -> usize {
        2 * self.num_qubits()
    }

    #[inline]
    fn phase_col(&self) -> usize {
        2 * self.num_qubits()
    }

    #[inline]
    fn row_count(&self, include_scratch: bool) -> usize {
        2 * self.num_qubits() + usize::from(include_scratch)
    }

    /// The X-parts of all generators (and of the scratch row, if asked), one row each.
    pub fn x(&self, include_scratch: bool) -> BitMatrix {
        BitMatrix::build(self.row_count(include_scratch), self.num_qubits(), |i, j| {
            self.matrix.bit(i, j)
        })
    }

    /// The Z-parts of all generators (and of the scratch row, if asked), one row each.
    pub fn z(&self, include_scratch: bool) -> BitMatrix {
        let n = self.num_qubits();
        BitMatrix::build(self.row_count(include_scratch), n, |i, j| {
            self.matrix.bit(i, n + j)
        })
    }

    /// The sign bits of all generators (and of the scratch row, if asked).
    pub fn r(&self, include_scratch: bool) -> Vec<bool> {
        self.matrix
            .col_bits(self.phase_col(), self.row_count(include_scratch))
    }

    /// The sign bit of a single row, which must be in range.
    #[inline]
    pub(crate) fn phase_bit(&self, row: usize) -> bool {
        self.matrix.bit(row, self.phase_col())
    }

    /// The Pauli part of a single row, without its sign. The row must be in range.
    pub(crate) fn row_paulis(&self, row: usize) -> F2nSymplectic {
        F2nSymplectic::from_row(self.matrix.row(row), self.num_qubits())
    }

    /// Checks that the generator rows form a symplectic basis: each destabilizer anticommutes
    /// with its own stabilizer and commutes with every other generator.
    pub fn is_symplectic(&self) -> bool {
        let n = self.num_qubits();
        let rows: Vec<F2nSymplectic> = (0..2 * n).map(|i| self.row_paulis(i)).collect();
        (0..2 * n).all(|i| (0..2 * n).all(|j| rows[i].omega(&rows[j]) == (i.abs_diff(j) == n)))
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), TableauError> {
        let num_qubits = self.num_qubits();
        if qubit < num_qubits {
            Ok(())
        } else {
            Err(TableauError::QubitOutOfRange { qubit, num_qubits })
        }
    }

    pub(crate) fn check_row(&self, row: usize, include_scratch: bool) -> Result<(), TableauError> {
        let rows = self.row_count(include_scratch);
        if row < rows {
            Ok(())
        } else {
            Err(TableauError::RowOutOfRange { row, rows })
        }
    }

    /// Hadamard on `qubit`.
    pub fn h(mut self, qubit: usize) -> Result<Self, TableauError> {
        self.check_qubit(qubit)?;
        let n = self.num_qubits();
        let r = self.phase_col();
        for i in 0..2 * n {
            let flip = self.matrix.bit(i, qubit) & self.matrix.bit(i, n + qubit);
            self.matrix.xor_bit(i, r, flip);
        }
        self.matrix.swap_cols(qubit, n + qubit);
        Ok(self)
    }

    /// Phase gate `S = diag(1, i)` on `qubit`.
    pub fn s(mut self, qubit: usize) -> Result<Self, TableauError> {
        self.check_qubit(qubit)?;
        let n = self.num_qubits();
        let r = self.phase_col();
        for i in 0..2 * n {
            let x = self.matrix.bit(i, qubit);
            let z = self.matrix.bit(i, n + qubit);
            self.matrix.xor_bit(i, r, x & z);
            self.matrix.xor_bit(i, n + qubit, x);
        }
        Ok(self)
    }

    /// Controlled-NOT with the given control and target.
    pub fn cnot(mut self, control: usize, target: usize) -> Result<Self, TableauError> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(TableauError::DuplicateQubit { qubit: control });
        }
        let n = self.num_qubits();
        let r = self.phase_col();
        for i in 0..2 * n {
            let xc = self.matrix.bit(i, control);
            let xt = self.matrix.bit(i, target);
            let zc = self.matrix.bit(i, n + control);
            let zt = self.matrix.bit(i, n + target);
            self.matrix.xor_bit(i, r, xc & zt & !(xt ^ zc));
            self.matrix.xor_bit(i, target, xc);
            self.matrix.xor_bit(i, n + control, zt);
        }
        Ok(self)
    }

    /// Replaces row `h` by the product of the Pauli operators in rows `h` and `i`, keeping
    /// track of the sign.
    ///
    /// `include_scratch` decides whether the scratch row counts as a valid row index.
    ///
    /// # Errors
    ///
    /// Fails with [`TableauError::InvalidPhaseResidue`] if the two rows anticommute, since
    /// their product is then not Hermitian and cannot be stored with a sign bit.
    pub fn rowsum(
        mut self,
        h: usize,
        i: usize,
        include_scratch: bool,
    ) -> Result<Self, TableauError> {
        self.check_row(h, include_scratch)?;
        self.check_row(i, include_scratch)?;
        self.rowsum_in_place(h, i)?;
        Ok(self)
    }

    fn rowsum_in_place(&mut self, h: usize, i: usize) -> Result<(), TableauError> {
        let n = self.num_qubits();
        let r = self.phase_col();
        let m = &self.matrix;
        let g: i32 = (0..n)
            .map(|j| {
                let g = exponent(m.bit(i, j), m.bit(i, n + j), m.bit(h, j), m.bit(h, n + j));
                i32::from(g)
            })
            .sum();
        let total = 2 * i32::from(m.bit(h, r)) + 2 * i32::from(m.bit(i, r)) + g;
        let residue = total.rem_euclid(4) as u8;
        trace!("rowsum {} <- {}: phase residue {}", h, i, residue);

        let new_phase = match residue {
            0 => false,
            2 => true,
            _ => {
                return Err(TableauError::InvalidPhaseResidue {
                    target_row: h,
                    source_row: i,
                    residue,
                })
            }
        };
        // XORs the sign bit too; it is overwritten right after
        self.matrix.add_row(i, h);
        self.matrix.set_bit(h, r, new_phase);
        Ok(())
    }

    /// Measures `qubits` in the computational basis, one after the other, and returns the
    /// outcomes in the same order.
    ///
    /// With `collapse` the returned tableau is the post-measurement state. Without it the
    /// measurements run on a private copy (so later qubits still see the effect of earlier
    /// ones) and the tableau is handed back unchanged.
    ///
    /// All indices are checked before anything is measured.
    pub fn measure<R: Rng + ?Sized>(
        self,
        qubits: &[usize],
        collapse: bool,
        rng: &mut R,
    ) -> Result<(Self, Vec<bool>), TableauError> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        if collapse {
            let mut state = self;
            let outcomes = state.measure_in_place(qubits, rng)?;
            Ok((state, outcomes))
        } else {
            let outcomes = self.clone().measure_in_place(qubits, rng)?;
            Ok((self, outcomes))
        }
    }

    /// Measurement outcomes of `qubits` without touching this tableau.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        qubits: &[usize],
        rng: &mut R,
    ) -> Result<Vec<bool>, TableauError> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        self.clone().measure_in_place(qubits, rng)
    }

    fn measure_in_place<R: Rng + ?Sized>(
        &mut self,
        qubits: &[usize],
        rng: &mut R,
    ) -> Result<Vec<bool>, TableauError> {
        qubits
            .iter()
            .map(|&q| self.measure_qubit(q, rng))
            .collect()
    }

    fn measure_qubit<R: Rng + ?Sized>(
        &mut self,
        q: usize,
        rng: &mut R,
    ) -> Result<bool, TableauError> {
        let n = self.num_qubits();
        let r = self.phase_col();

        if let Some(p) = (n..2 * n).find(|&i| self.matrix.bit(i, q)) {
            // row p - n is replaced by the old row p below, and it anticommutes with row p
            for i in 0..2 * n {
                if i != p && i != p - n && self.matrix.bit(i, q) {
                    self.rowsum_in_place(i, p)?;
                }
            }
            self.matrix.copy_row(p, p - n);
            self.matrix.zero_row(p);
            let outcome = rng.random::<bool>();
            self.matrix.set_bit(p, r, outcome);
            self.matrix.set_bit(p, n + q, true);
            debug!("measured qubit {}: random outcome {}", q, u8::from(outcome));
            Ok(outcome)
        } else {
            // no stabilizer has an X on q, so only destabilizers can
            let scratch = self.scratch_row();
            self.matrix.zero_row(scratch);
            for i in 0..n {
                if self.matrix.bit(i, q) {
                    self.rowsum_in_place(scratch, i + n)?;
                }
            }
            let outcome = self.matrix.bit(scratch, r);
            self.matrix.zero_row(scratch);
            debug!("measured qubit {}: deterministic outcome {}", q, u8::from(outcome));
            Ok(outcome)
        }
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.matrix)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    /// A scrambled but valid tableau, so that identities are not tested only on `|0...0>`.
    fn scrambled(n: usize, seed: u64) -> Tableau {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut t = Tableau::zero_state(n).unwrap();
        for _ in 0..20 * n {
            let a = rng.random_range(0..n);
            t = match rng.random_range(0..3) {
                0 => t.h(a).unwrap(),
                1 => t.s(a).unwrap(),
                _ if n > 1 => {
                    let mut b = rng.random_range(0..n - 1);
                    if b >= a {
                        b += 1;
                    }
                    t.cnot(a, b).unwrap()
                }
                _ => t,
            };
        }
        t
    }

    #[test]
    fn zero_state_layout() {
        let t = Tableau::zero_state(3).unwrap();
        assert_eq!(t.num_qubits(), 3);
        assert_eq!(t.as_bit_matrix().rows(), 7);
        assert_eq!(t.x(false), {
            let mut m = BitMatrix::zeros(6, 3);
            (0..3).for_each(|q| m.set_bit(q, q, true));
            m
        });
        assert_eq!(t.z(false), {
            let mut m = BitMatrix::zeros(6, 3);
            (0..3).for_each(|q| m.set_bit(q + 3, q, true));
            m
        });
        assert_eq!(t.r(true), vec![false; 7]);
        assert_eq!(t.x(true).rows(), 7);
        assert!(t.is_symplectic());
    }

    #[test]
    fn accessors_split_the_matrix() {
        let t = scrambled(3, 8);
        let m = t.as_bit_matrix();
        for include_scratch in [false, true] {
            let rows = 6 + usize::from(include_scratch);
            let (x, z) = (t.x(include_scratch), t.z(include_scratch));
            assert_eq!((x.rows(), x.cols()), (rows, 3));
            assert_eq!((z.rows(), z.cols()), (rows, 3));
            for i in 0..rows {
                for j in 0..3 {
                    assert_eq!(x[(i, j)], m.bit(i, j));
                    assert_eq!(z[(i, j)], m.bit(i, 3 + j));
                }
                assert_eq!(t.r(include_scratch)[i], m.bit(i, 6));
            }
        }
    }

    #[test]
    fn shapes() {
        assert_eq!(
            Tableau::zero_state(0),
            Err(TableauError::MalformedShape { rows: 1, cols: 1 })
        );
        assert!(Tableau::from_bit_matrix(BitMatrix::zeros(4, 4)).is_err());
        assert!(Tableau::from_bit_matrix(BitMatrix::zeros(5, 6)).is_err());
        assert!(Tableau::from_bit_matrix(BitMatrix::zeros(3, 5)).is_err());

        let t = scrambled(3, 4);
        let full = Tableau::from_bit_matrix(t.as_bit_matrix().clone()).unwrap();
        assert_eq!(full, t);

        let m = t.as_bit_matrix();
        let without_scratch = BitMatrix::build(6, 7, |i, j| m.bit(i, j));
        let rebuilt = Tableau::from_bit_matrix(without_scratch).unwrap();
        assert_eq!(rebuilt, t);

        let mut dirty = t.as_bit_matrix().clone();
        dirty.set_bit(6, 2, true);
        assert_eq!(Tableau::from_bit_matrix(dirty).unwrap(), t);
        assert_eq!(num_qubits_for_side(9), Some(4));
        assert_eq!(num_qubits_for_side(8), None);
    }

    #[test]
    fn bad_qubits() {
        let t = Tableau::zero_state(2).unwrap();
        assert_eq!(
            t.clone().h(2),
            Err(TableauError::QubitOutOfRange {
                qubit: 2,
                num_qubits: 2
            })
        );
        assert!(t.clone().s(7).is_err());
        assert!(t.clone().cnot(0, 2).is_err());
        assert_eq!(
            t.clone().cnot(1, 1),
            Err(TableauError::DuplicateQubit { qubit: 1 })
        );
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(t.clone().measure(&[0, 5], true, &mut rng).is_err());
        assert!(t.sample(&[2], &mut rng).is_err());
    }

    #[test]
    fn hadamard_twice() {
        for seed in 0..5 {
            let t = scrambled(4, seed);
            for q in 0..4 {
                assert_eq!(t.clone().h(q).unwrap().h(q).unwrap(), t);
            }
        }
    }

    #[test]
    fn phase_four_times() {
        for seed in 0..5 {
            let t = scrambled(4, seed);
            for q in 0..4 {
                let twice = t.clone().s(q).unwrap().s(q).unwrap();
                assert_ne!(twice, t.clone().s(q).unwrap());
                assert_eq!(twice.s(q).unwrap().s(q).unwrap(), t);
            }
        }
    }

    #[test]
    fn cnot_twice() {
        for seed in 0..5 {
            let t = scrambled(4, seed);
            for (c, tq) in [(0, 1), (1, 0), (2, 3), (3, 0)] {
                assert_eq!(t.clone().cnot(c, tq).unwrap().cnot(c, tq).unwrap(), t);
            }
        }
    }

    #[test]
    fn gates_keep_symplectic_basis() {
        for seed in 0..10 {
            assert!(scrambled(5, seed).is_symplectic());
        }
    }

    #[test]
    fn hadamard_then_phase_rows() {
        // H: X -> Z, Z -> X; S: X -> Y
        let t = Tableau::zero_state(1).unwrap().h(0).unwrap();
        assert_eq!(t.x(false), BitMatrix::build(2, 1, |i, _| i == 1));
        assert_eq!(t.z(false), BitMatrix::build(2, 1, |i, _| i == 0));

        // S on stabilizer X gives Y, then S again gives -X
        let t = t.s(0).unwrap();
        assert_eq!(t.r(false), vec![false, false]);
        assert!(t.as_bit_matrix().bit(1, 0) && t.as_bit_matrix().bit(1, 1));
        let t = t.s(0).unwrap();
        assert_eq!(t.r(false), vec![false, true]);
    }

    #[test]
    fn rowsum_products() {
        // Bell state stabilizers XX and ZZ; their product is -YY
        let t = Tableau::zero_state(2)
            .unwrap()
            .h(0)
            .unwrap()
            .cnot(0, 1)
            .unwrap();
        let summed = t.clone().rowsum(2, 3, false).unwrap();
        assert!(summed.phase_bit(2));
        let letters: Vec<_> = summed.row_paulis(2).letters().collect();
        assert_eq!(letters, vec![crate::PauliLetter::Y; 2]);

        // a destabilizer and its own stabilizer anticommute
        assert!(matches!(
            t.clone().rowsum(0, 2, false),
            Err(TableauError::InvalidPhaseResidue { .. })
        ));
        assert_eq!(
            t.clone().rowsum(4, 2, false),
            Err(TableauError::RowOutOfRange { row: 4, rows: 4 })
        );
        assert!(t.rowsum(4, 2, true).is_ok());
    }

    #[test]
    fn deterministic_measurement_leaves_state() {
        let mut rng = SmallRng::seed_from_u64(7);
        let t = Tableau::zero_state(3).unwrap();
        for _ in 0..10 {
            let (after, outcomes) = t.clone().measure(&[0, 1, 2], true, &mut rng).unwrap();
            assert_eq!(outcomes, vec![false; 3]);
            assert_eq!(after, t);
        }

        // X on qubit 1 (H S S H) flips its deterministic outcome
        let flipped = t
            .clone()
            .h(1)
            .unwrap()
            .s(1)
            .unwrap()
            .s(1)
            .unwrap()
            .h(1)
            .unwrap();
        let (after, outcomes) = flipped.clone().measure(&[0, 1, 2], true, &mut rng).unwrap();
        assert_eq!(outcomes, vec![false, true, false]);
        assert_eq!(after, flipped);
    }

    #[test]
    fn remeasurement_repeats_outcome() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let t = scrambled(3, seed);
            let (once, first) = t.measure(&[0, 1, 2], true, &mut rng).unwrap();
            let (twice, second) = once.clone().measure(&[0, 1, 2], true, &mut rng).unwrap();
            assert_eq!(first, second);
            assert_eq!(once, twice);
            assert!(twice.is_symplectic());
        }
    }

    #[test]
    fn hadamard_measurement_is_fair() {
        let t = Tableau::zero_state(1).unwrap().h(0).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let trials = 2000;
        let mut ones = 0;
        for _ in 0..trials {
            let (after, outcome) = t.clone().measure(&[0], true, &mut rng).unwrap();
            // the stabilizer is now (-1)^outcome Z
            assert!(!after.as_bit_matrix().bit(1, 0));
            assert!(after.as_bit_matrix().bit(1, 1));
            assert_eq!(after.phase_bit(1), outcome[0]);
            // the old stabilizer X became the destabilizer
            assert!(after.as_bit_matrix().bit(0, 0));
            assert!(!after.as_bit_matrix().bit(0, 1));
            if outcome[0] {
                ones += 1;
            }
        }
        assert!((800..1200).contains(&ones), "{} ones out of {}", ones, trials);
    }

    #[test]
    fn bell_pair_outcomes_agree() {
        let bell = Tableau::zero_state(2)
            .unwrap()
            .h(0)
            .unwrap()
            .cnot(0, 1)
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let (_, outcomes) = bell.clone().measure(&[0, 1], true, &mut rng).unwrap();
            assert_eq!(outcomes[0], outcomes[1]);
            seen[usize::from(outcomes[0])] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn non_collapsing_measurement() {
        let bell = Tableau::zero_state(2)
            .unwrap()
            .h(0)
            .unwrap()
            .cnot(0, 1)
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            let (same, outcomes) = bell.clone().measure(&[0, 1], false, &mut rng).unwrap();
            assert_eq!(same, bell);
            // the second qubit is measured against the collapsed copy
            assert_eq!(outcomes[0], outcomes[1]);

            let sampled = bell.sample(&[1, 0], &mut rng).unwrap();
            assert_eq!(sampled[0], sampled[1]);
        }
    }

    #[test]
    fn seeded_measurement_is_reproducible() {
        let t = scrambled(6, 9);
        let qubits: Vec<usize> = (0..6).collect();
        let a = t.sample(&qubits, &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = t.sample(&qubits, &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }
}
