//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::NaiveDate;

use crate::app::RegistrationCandidate;
use crate::domain::entities::{Customer, CustomerId};

/// A CPF with valid check digits, as typed by a user
pub const VALID_TAX_ID: &str = "529.982.247-25";

/// A second valid CPF, distinct from `VALID_TAX_ID`
pub const OTHER_VALID_TAX_ID: &str = "111.444.777-35";

/// Create the stored counterpart of `valid_candidate()`
pub fn test_customer() -> Customer {
    Customer {
        id: CustomerId(1),
        name: "Ana".to_string(),
        email: "ana@x.com".to_string(),
        tax_id: VALID_TAX_ID.parse().unwrap(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    }
}

/// Create a registration payload that passes every structural check
pub fn valid_candidate() -> RegistrationCandidate {
    RegistrationCandidate {
        name: Some("Ana".to_string()),
        email: Some("ana@x.com".to_string()),
        tax_id: Some("52998224725".to_string()),
        birth_date: Some("1990-01-01".to_string()),
    }
}

/// Build a valid 11-digit CPF from any seed
pub fn tax_id_from_seed(seed: u64) -> String {
    let mut digits: Vec<u32> = format!("{:09}", seed % 1_000_000_000)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    // A single repeated digit is never a valid CPF
    if digits.iter().all(|d| *d == digits[0]) {
        digits[8] = (digits[8] + 1) % 10;
    }

    for len in [9, 10] {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let r = 11 - sum % 11;
        digits.push(if r >= 10 { 0 } else { r });
    }

    digits.iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TaxId;

    #[test]
    fn seeded_tax_ids_are_valid() {
        for seed in [0, 1, 111_111_111, 529_982_247, 999_999_999, u64::MAX] {
            let raw = tax_id_from_seed(seed);
            assert_eq!(raw.len(), 11);
            assert!(raw.parse::<TaxId>().is_ok(), "{} from seed {}", raw, seed);
        }
    }

    #[test]
    fn seed_matches_known_cpf() {
        assert_eq!(tax_id_from_seed(529_982_247), "52998224725");
    }
}
