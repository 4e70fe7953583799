//! CPF (Cadastro de Pessoas Físicas) value object

use std::fmt;

use crate::domain::{DomainError, DomainResult};

const CPF_LEN: usize = 11;

/// Brazilian individual taxpayer number.
///
/// Can only be obtained through [`Cpf::new`], so every instance holds eleven
/// digits whose two trailing check digits are correct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf {
    digits: String,
}

impl Cpf {
    /// Parse a CPF, accepting any punctuation (`529.982.247-25`, `52998224725`).
    pub fn new(raw: &str) -> DomainResult<Self> {
        let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.len() != CPF_LEN {
            return Err(DomainError::validation("CPF must have 11 digits"));
        }

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(DomainError::validation("CPF is invalid"));
        }

        let first = check_digit(&digits[..9]);
        let second = check_digit(&digits[..10]);
        if digits[9] != first || digits[10] != second {
            return Err(DomainError::validation("CPF is invalid"));
        }

        Ok(Self {
            digits: digits
                .iter()
                .filter_map(|&d| char::from_digit(d, 10))
                .collect(),
        })
    }

    /// The eleven canonical digits.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// `XXX.XXX.XXX-XX`
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

/// Weighted mod-11 check digit. Weights run from `len + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (top - i as u32))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl TryFrom<&str> for Cpf {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
