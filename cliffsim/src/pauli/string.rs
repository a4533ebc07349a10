use std::{fmt::Display, ops::MulAssign};

use ndarray::Array2;
use num_complex::Complex64;

use crate::{
    error::TableauError,
    pauli::{exponent, F2nSymplectic, IPower, PauliLetter},
};

/// A Pauli operator on `n` qubits together with its scalar factor, e.g. `-XZZ` or `iY`.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct PauliString {
    overall_factor: IPower,
    pauli_letters: F2nSymplectic,
}

impl Display for PauliString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.overall_factor.prefix())?;
        for letter in self.pauli_letters.letters() {
            write!(f, "{}", letter.as_char())?;
        }
        Ok(())
    }
}

impl PauliString {
    pub fn new(overall_factor: IPower, pauli_letters: F2nSymplectic) -> Self {
        Self {
            overall_factor,
            pauli_letters,
        }
    }

    pub fn identity(num_qubits: usize) -> Self {
        Self::new(IPower::One, F2nSymplectic::zeros(num_qubits))
    }

    /// Parse a shorthand string like `XZZIXX`, `-XZZ` or `-iY`.
    ///
    /// An optional `+`/`-` sign and then an optional lowercase `i` give the prefactor; the
    /// remaining characters are Pauli letters (case-insensitive), with whitespace ignored so
    /// that long strings can be grouped, e.g. `"XXX III ZZZ"`.
    pub fn parse(s: &str) -> Result<Self, TableauError> {
        let invalid = || TableauError::InvalidPauliString(s.to_owned());
        let body = s.trim();
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body.strip_prefix('+').unwrap_or(body)),
        };
        let (imaginary, body) = match body.strip_prefix('i') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let mut pauli_letters = Vec::with_capacity(body.len());
        for letter in body.chars() {
            match letter {
                c if c.is_whitespace() => {}
                'I' => pauli_letters.push(PauliLetter::I),
                'X' | 'x' => pauli_letters.push(PauliLetter::X),
                'Y' | 'y' => pauli_letters.push(PauliLetter::Y),
                'Z' | 'z' => pauli_letters.push(PauliLetter::Z),
                _ => return Err(invalid()),
            }
        }
        if pauli_letters.is_empty() {
            return Err(invalid());
        }

        let mut overall_factor = IPower::One;
        if negative {
            overall_factor *= IPower::NegOne;
        }
        if imaginary {
            overall_factor *= IPower::PlusI;
        }
        Ok(Self::new(
            overall_factor,
            F2nSymplectic::from(pauli_letters.into_iter()),
        ))
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.pauli_letters.num_qubits()
    }

    #[inline]
    pub fn phase(&self) -> IPower {
        self.overall_factor
    }

    #[inline]
    pub fn symplectic(&self) -> &F2nSymplectic {
        &self.pauli_letters
    }

    pub fn letters(&self) -> Vec<PauliLetter> {
        self.pauli_letters.letters().collect()
    }

    /// Do these two commute in `P_n`
    pub fn commutes_with(&self, other: &Self) -> bool {
        !self.pauli_letters.omega(&other.pauli_letters)
    }

    pub fn weight(&self) -> usize {
        self.pauli_letters.weight()
    }

    /// The dense `2^n x 2^n` matrix of this operator, prefactor included.
    pub fn to_matrix(&self) -> Array2<Complex64> {
        dense_matrix(self.pauli_letters.letters()) * self.overall_factor.to_complex()
    }
}

/// Kronecker product of two dense matrices.
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(i, j)| {
        a[(i / br, j / bc)] * b[(i % br, j % bc)]
    })
}

/// The tensor product of the single-qubit matrices, qubit 0 leftmost.
pub fn dense_matrix(letters: impl IntoIterator<Item = PauliLetter>) -> Array2<Complex64> {
    letters.into_iter().fold(
        Array2::from_elem((1, 1), Complex64::new(1.0, 0.0)),
        |acc, letter| kron(&acc, &letter.matrix()),
    )
}

impl MulAssign<IPower> for PauliString {
    fn mul_assign(&mut self, rhs: IPower) {
        self.overall_factor *= rhs;
    }
}

impl MulAssign<&PauliString> for PauliString {
    /// Right-multiplies by `rhs`, tracking the powers of `i` picked up on each qubit.
    fn mul_assign(&mut self, rhs: &PauliString) {
        assert_eq!(self.num_qubits(), rhs.num_qubits());
        let lhs = &self.pauli_letters;
        let extra_factors_of_i = (0..lhs.num_qubits).fold(0i32, |acc, q| {
            acc + i32::from(exponent(
                lhs.xs.bit(q),
                lhs.zs.bit(q),
                rhs.pauli_letters.xs.bit(q),
                rhs.pauli_letters.zs.bit(q),
            ))
        });

        self.overall_factor += extra_factors_of_i.rem_euclid(4) as u8;
        self.overall_factor *= rhs.overall_factor;
        self.pauli_letters += &rhs.pauli_letters;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn p(s: &str) -> PauliString {
        PauliString::parse(s).expect("Manifestly a Pauli String")
    }

    #[test]
    fn single_qubit_products() {
        let xyz_pauli = [p("X"), p("Y"), p("Z")];
        for cur_squaring in &xyz_pauli {
            let mut cur_testing = cur_squaring.clone();
            cur_testing *= cur_squaring;
            assert_eq!(cur_testing, p("I"));
        }

        let mut xy = p("X");
        xy *= &p("Y");
        assert_eq!(xy, p("iZ"));

        let mut yx = p("Y");
        yx *= &p("X");
        assert_eq!(yx, p("-iZ"));

        let mut zx = p("Z");
        zx *= &p("X");
        assert_eq!(zx, p("iY"));

        let mut xz = p("X");
        xz *= &p("Z");
        assert_eq!(xz, p("-iY"));
    }

    #[test]
    fn string_products() {
        let mut m1 = p("XZZIX");
        m1 *= &p("IIIII");
        assert_eq!(m1, p("XZZIX"));

        // X*Z = -iY, Z*X = iY, Z*I = Z, I*Z = Z, X*X = I
        m1 *= &p("ZXIZX");
        assert_eq!(m1, p("YYZZI"));

        let mut chain = p("Z");
        for next in ["X", "Y", "X", "Z"] {
            chain *= &p(next);
        }
        // ZX = iY, iY*Y = i, i*X = iX, iX*Z = Y
        assert_eq!(chain, p("Y"));

        let mut phased = p("iY");
        phased *= &p("iX");
        assert_eq!(phased, p("iZ"));
    }

    #[test]
    fn parse_and_render() {
        for s in ["XZZIX", "-XZZ", "iY", "-iIZ"] {
            assert_eq!(p(s).to_string(), s);
        }
        assert_eq!(p("+x z").to_string(), "XZ");
        assert_eq!(p("ZZI III").num_qubits(), 6);
        assert!(PauliString::parse("XQ").is_err());
        assert!(PauliString::parse("-i").is_err());
        assert!(PauliString::parse("").is_err());
    }

    #[test]
    fn commutation_and_weight() {
        let ms = [p("XZZIX"), p("ZXIZX"), p("IZXZY"), p("ZIZXY")];
        for a in &ms {
            assert_eq!(a.weight(), 4);
            for b in &ms {
                assert!(a.commutes_with(b), "{} and {}", a, b);
            }
        }
        assert!(!p("XI").commutes_with(&p("ZZ")));
    }

    #[test]
    fn dense_matrices() {
        let zi = p("-ZI").to_matrix();
        assert_eq!(zi.dim(), (4, 4));
        let diag: Vec<f64> = (0..4).map(|k| zi[(k, k)].re).collect();
        assert_eq!(diag, vec![-1.0, -1.0, 1.0, 1.0]);

        let ix = p("IX").to_matrix();
        assert_eq!(ix[(0, 1)], Complex64::new(1.0, 0.0));
        assert_eq!(ix[(2, 3)], Complex64::new(1.0, 0.0));
        assert_eq!(ix[(0, 2)], Complex64::new(0.0, 0.0));
    }
}
