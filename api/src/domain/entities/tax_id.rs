//! CPF (Cadastro de Pessoas Físicas) value object
//!
//! A `TaxId` can only be built from input that passes the CPF check-digit
//! algorithm. It is stored as its 11 bare digits, so `529.982.247-25` and
//! `52998224725` are the same tax ID.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid CPF: {0}")]
pub struct InvalidTaxId(pub String);

/// A Brazilian individual taxpayer number with valid check digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^(?:[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-[0-9]{2}|[0-9]{11})$")
            .expect("CPF pattern is valid")
    })
}

/// Check digit over `digits` with weights counting down from `digits.len() + 1`
fn check_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(d, w)| d * w)
        .sum();

    match 11 - sum % 11 {
        r if r >= 10 => 0,
        r => r,
    }
}

impl std::str::FromStr for TaxId {
    type Err = InvalidTaxId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !shape().is_match(s) {
            return Err(InvalidTaxId(s.to_string()));
        }

        let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != 11 {
            return Err(InvalidTaxId(s.to_string()));
        }

        // 000.000.000-00, 111.111.111-11, ... satisfy the checksum but are not issued
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(InvalidTaxId(s.to_string()));
        }

        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(InvalidTaxId(s.to_string()));
        }

        Ok(TaxId(digits.iter().map(|d| d.to_string()).collect()))
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
