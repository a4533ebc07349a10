use ndarray::{array, Array2};
use num_complex::Complex64;
use std::ops::{AddAssign, Mul, MulAssign};

/// A single-qubit Pauli operator, encoded in a tableau row by an `(x, z)` bit pair.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum PauliLetter {
    I,
    X,
    Y,
    Z,
}

impl PauliLetter {
    #[inline]
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => PauliLetter::I,
            (true, false) => PauliLetter::X,
            (false, true) => PauliLetter::Z,
            (true, true) => PauliLetter::Y,
        }
    }

    /// The `(x, z)` bits of this letter.
    #[inline]
    pub fn bits(self) -> (bool, bool) {
        match self {
            PauliLetter::I => (false, false),
            PauliLetter::X => (true, false),
            PauliLetter::Z => (false, true),
            PauliLetter::Y => (true, true),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            PauliLetter::I => 'I',
            PauliLetter::X => 'X',
            PauliLetter::Y => 'Y',
            PauliLetter::Z => 'Z',
        }
    }

    /// The 2x2 matrix of this operator in the computational basis.
    pub fn matrix(self) -> Array2<Complex64> {
        let o = Complex64::new(0.0, 0.0);
        let l = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            PauliLetter::I => array![[l, o], [o, l]],
            PauliLetter::X => array![[o, l], [l, o]],
            PauliLetter::Y => array![[o, -i], [i, o]],
            PauliLetter::Z => array![[l, o], [o, -l]],
        }
    }
}

/// A power of `i`, i.e. one of the four scalars a Pauli string can carry.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum IPower {
    One,
    PlusI,
    NegOne,
    NegI,
}

impl IPower {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            IPower::One => 0,
            IPower::PlusI => 1,
            IPower::NegOne => 2,
            IPower::NegI => 3,
        }
    }

    /// `i^k`, for any `k` (taken mod 4).
    #[inline]
    pub fn from_u8(k: u8) -> Self {
        match k % 4 {
            0 => IPower::One,
            1 => IPower::PlusI,
            2 => IPower::NegOne,
            _ => IPower::NegI,
        }
    }

    /// `(-1)^r` for a tableau phase bit `r`.
    #[inline]
    pub fn from_sign_bit(r: bool) -> Self {
        if r {
            IPower::NegOne
        } else {
            IPower::One
        }
    }

    #[inline]
    pub fn is_real(self) -> bool {
        matches!(self, IPower::One | IPower::NegOne)
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        matches!(self, IPower::NegOne | IPower::NegI)
    }

    pub fn to_complex(self) -> Complex64 {
        match self {
            IPower::One => Complex64::new(1.0, 0.0),
            IPower::PlusI => Complex64::new(0.0, 1.0),
            IPower::NegOne => Complex64::new(-1.0, 0.0),
            IPower::NegI => Complex64::new(0.0, -1.0),
        }
    }

    /// The prefix used when rendering a Pauli string: `""`, `"i"`, `"-"` or `"-i"`.
    pub fn prefix(self) -> &'static str {
        match self {
            IPower::One => "",
            IPower::PlusI => "i",
            IPower::NegOne => "-",
            IPower::NegI => "-i",
        }
    }
}

impl AddAssign<u8> for IPower {
    /// Multiplies by `i^rhs`.
    #[inline]
    fn add_assign(&mut self, rhs: u8) {
        *self = IPower::from_u8(self.to_u8() + rhs % 4);
    }
}

impl MulAssign<IPower> for IPower {
    fn mul_assign(&mut self, rhs: IPower) {
        *self += rhs.to_u8();
    }
}

impl Mul for IPower {
    type Output = IPower;

    fn mul(mut self, rhs: IPower) -> IPower {
        self *= rhs;
        self
    }
}

const fn exponent_uncached(x1: bool, z1: bool, x2: bool, z2: bool) -> i8 {
    let x2 = x2 as i8;
    let z2 = z2 as i8;
    match (x1, z1) {
        (false, false) => 0,
        (true, true) => z2 - x2,
        (true, false) => z2 * (2 * x2 - 1),
        (false, true) => x2 * (1 - 2 * z2),
    }
}

const EXPONENTS: [i8; 16] = {
    let mut table = [0; 16];
    let mut k = 0;
    while k < 16 {
        table[k] = exponent_uncached(k & 8 != 0, k & 4 != 0, k & 2 != 0, k & 1 != 0);
        k += 1;
    }
    table
};

/// The power of `i` (in `{-1, 0, 1}`) picked up when the single-qubit Pauli with bits
/// `(x1, z1)` is multiplied on the right by the one with bits `(x2, z2)`.
///
/// There are only 16 possible inputs, so the values are tabulated at compile time.
#[inline]
pub fn exponent(x1: bool, z1: bool, x2: bool, z2: bool) -> i8 {
    EXPONENTS[(x1 as usize) << 3 | (z1 as usize) << 2 | (x2 as usize) << 1 | z2 as usize]
}
