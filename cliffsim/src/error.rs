use thiserror::Error;

/// Everything that can go wrong when building, updating or decoding a tableau.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableauError {
    #[error("qubit index {qubit} is out of range for a {num_qubits}-qubit tableau")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    #[error("row index {row} is out of range for a tableau with {rows} usable rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("qubit {qubit} was given twice to a two-qubit operation")]
    DuplicateQubit { qubit: usize },

    #[error("a tableau must be a square matrix of side 2n+1 with n >= 1, got {rows}x{cols}")]
    MalformedShape { rows: usize, cols: usize },

    /// Multiplying the two rows did not give a Hermitian Pauli operator, which means the rows
    /// anticommute and the tableau no longer describes a stabilizer state.
    #[error("rowsum of row {source_row} into row {target_row} left odd phase residue {residue}")]
    InvalidPhaseResidue {
        target_row: usize,
        source_row: usize,
        residue: u8,
    },

    #[error("cannot parse {0:?} as a Pauli string")]
    InvalidPauliString(String),

    #[error("a group generated by {num_generators} generators is too large to enumerate")]
    GroupTooLarge { num_generators: usize },
}
