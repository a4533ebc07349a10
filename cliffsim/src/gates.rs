//! Clifford gates beyond the three the engine implements, lowered to `H`, `S` and `CNOT`.
//!
//! Each decomposition is exact as a conjugation of Pauli operators, i.e. equal to the gate up
//! to a global phase, which a stabilizer tableau cannot see anyway.

use std::fmt;

use crate::{error::TableauError, tableau::Tableau};

/// One of the operations a [`Tableau`] implements directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Elementary {
    H(usize),
    S(usize),
    Cnot(usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    I(usize),
    H(usize),
    S(usize),
    Sdg(usize),
    X(usize),
    Y(usize),
    Z(usize),
    SX(usize),
    SXdg(usize),
    Cnot(usize, usize),
    CZ(usize, usize),
    CY(usize, usize),
    Swap(usize, usize),
}

impl Gate {
    /// Looks a gate up by its usual lowercase name, e.g. `("cx", &[0, 1])`.
    pub fn from_name(name: &str, qubits: &[usize]) -> Option<Gate> {
        let gate = match (name.to_ascii_lowercase().as_str(), qubits) {
            ("i" | "id", &[q]) => Gate::I(q),
            ("h", &[q]) => Gate::H(q),
            ("s", &[q]) => Gate::S(q),
            ("sdg", &[q]) => Gate::Sdg(q),
            ("x", &[q]) => Gate::X(q),
            ("y", &[q]) => Gate::Y(q),
            ("z", &[q]) => Gate::Z(q),
            ("sx", &[q]) => Gate::SX(q),
            ("sxdg", &[q]) => Gate::SXdg(q),
            ("cnot" | "cx", &[c, t]) => Gate::Cnot(c, t),
            ("cz", &[c, t]) => Gate::CZ(c, t),
            ("cy", &[c, t]) => Gate::CY(c, t),
            ("swap", &[a, b]) => Gate::Swap(a, b),
            _ => return None,
        };
        Some(gate)
    }

    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::I(q)
            | Gate::H(q)
            | Gate::S(q)
            | Gate::Sdg(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::SX(q)
            | Gate::SXdg(q) => vec![q],
            Gate::Cnot(a, b) | Gate::CZ(a, b) | Gate::CY(a, b) | Gate::Swap(a, b) => vec![a, b],
        }
    }

    /// The elementary operations to apply, in order.
    pub fn decompose(&self) -> Vec<Elementary> {
        use Elementary::{Cnot, H, S};
        match *self {
            Gate::I(_) => vec![],
            Gate::H(q) => vec![H(q)],
            Gate::S(q) => vec![S(q)],
            Gate::Sdg(q) => vec![S(q), S(q), S(q)],
            Gate::Z(q) => vec![S(q), S(q)],
            Gate::X(q) => vec![H(q), S(q), S(q), H(q)],
            Gate::Y(q) => vec![S(q), S(q), H(q), S(q), S(q), H(q)],
            Gate::SX(q) => vec![H(q), S(q), H(q)],
            Gate::SXdg(q) => vec![H(q), S(q), S(q), S(q), H(q)],
            Gate::Cnot(c, t) => vec![Cnot(c, t)],
            Gate::CZ(c, t) => vec![H(t), Cnot(c, t), H(t)],
            Gate::CY(c, t) => vec![S(t), S(t), S(t), Cnot(c, t), S(t)],
            Gate::Swap(a, b) => vec![Cnot(a, b), Cnot(b, a), Cnot(a, b)],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gate::I(_) => "I",
            Gate::H(_) => "H",
            Gate::S(_) => "S",
            Gate::Sdg(_) => "SDG",
            Gate::X(_) => "X",
            Gate::Y(_) => "Y",
            Gate::Z(_) => "Z",
            Gate::SX(_) => "SX",
            Gate::SXdg(_) => "SXDG",
            Gate::Cnot(..) => "CNOT",
            Gate::CZ(..) => "CZ",
            Gate::CY(..) => "CY",
            Gate::Swap(..) => "SWAP",
        };
        let qubits = self
            .qubits()
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", name, qubits)
    }
}

impl Tableau {
    pub fn apply_elementary(self, op: Elementary) -> Result<Self, TableauError> {
        match op {
            Elementary::H(q) => self.h(q),
            Elementary::S(q) => self.s(q),
            Elementary::Cnot(c, t) => self.cnot(c, t),
        }
    }

    /// Applies `gate` through its decomposition. Every qubit is validated first, so a bad
    /// index never leaves a half-applied gate behind.
    pub fn apply(self, gate: &Gate) -> Result<Self, TableauError> {
        let qubits = gate.qubits();
        let num_qubits = self.num_qubits();
        if let Some(&qubit) = qubits.iter().find(|&&q| q >= num_qubits) {
            return Err(TableauError::QubitOutOfRange { qubit, num_qubits });
        }
        if let &[a, b] = qubits.as_slice() {
            if a == b {
                return Err(TableauError::DuplicateQubit { qubit: a });
            }
        }
        gate.decompose()
            .into_iter()
            .try_fold(self, |t, op| t.apply_elementary(op))
    }

    /// Applies a sequence of gates in order.
    pub fn apply_all<'a>(
        self,
        gates: impl IntoIterator<Item = &'a Gate>,
    ) -> Result<Self, TableauError> {
        gates.into_iter().try_fold(self, |t, gate| t.apply(gate))
    }
}
