//! # Store and Address Records
//!
//! Immutable store identification data, plus the factory that opens new
//! sales. Like the printer record, required fields are validated when the
//! record is consumed, not at construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sale::Sale;
use crate::validation::{require_field, require_positive, ValidationResult};

// =============================================================================
// Address
// =============================================================================

/// Street address of a store. Every field except `complement` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: i64,
    /// Optional extra designation (suite, floor...); may be empty.
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: i64,
        complement: impl Into<String>,
        district: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Address {
            street: street.into(),
            number,
            complement: complement.into(),
            district: district.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        require_field("street", &self.street)?;
        require_positive("address number", self.number)?;
        require_field("district", &self.district)?;
        require_field("city", &self.city)?;
        require_field("state", &self.state)?;
        require_field("postal code", &self.postal_code)?;

        Ok(())
    }
}

// =============================================================================
// Store
// =============================================================================

/// Immutable store record. Acts as the factory that opens new sales, and
/// supplies the descriptor block at the top of every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    pub address: Address,
    pub phone: String,
    /// Free-text note printed on its own receipt line.
    pub note: String,
    pub cnpj: String,
    pub state_registration: String,
}

impl Store {
    pub fn new(
        name: impl Into<String>,
        address: Address,
        phone: impl Into<String>,
        note: impl Into<String>,
        cnpj: impl Into<String>,
        state_registration: impl Into<String>,
    ) -> Self {
        Store {
            name: name.into(),
            address,
            phone: phone.into(),
            note: note.into(),
            cnpj: cnpj.into(),
            state_registration: state_registration.into(),
        }
    }

    /// Checks the store's own required fields, then the address fields.
    pub fn validate(&self) -> ValidationResult<()> {
        require_field("store name", &self.name)?;
        self.address.validate()?;
        require_field("phone", &self.phone)?;
        require_field("note", &self.note)?;
        require_field("CNPJ", &self.cnpj)?;
        require_field("state registration", &self.state_registration)?;

        Ok(())
    }

    /// Renders the seven-line descriptor block at the top of the receipt,
    /// every line newline-terminated:
    ///
    /// ```text
    /// Loja 1
    /// Log 1, 10 C1
    /// Bai 1 - Mun 1 - E1
    /// CEP:11111-111 Tel (11) 1111-1111
    /// Obs 1
    /// CNPJ: 11.111.111/1111-11
    /// IE: 123456789
    /// ```
    pub fn descriptor(&self) -> Result<String, ValidationError> {
        self.validate()?;

        let address = &self.address;
        let street_line = format!("{}, {} {}", address.street, address.number, address.complement);

        let mut block = String::new();
        block.push_str(&format!("{}\n", self.name));
        // right-trimmed so an empty complement leaves no dangling space
        block.push_str(street_line.trim_end());
        block.push('\n');
        block.push_str(&format!(
            "{} - {} - {}\n",
            address.district, address.city, address.state
        ));
        block.push_str(&format!("CEP:{} Tel {}\n", address.postal_code, self.phone));
        block.push_str(&format!("{}\n", self.note));
        block.push_str(&format!("CNPJ: {}\n", self.cnpj));
        block.push_str(&format!("IE: {}\n", self.state_registration));

        Ok(block)
    }

    /// Opens a new sale for this store. The sale snapshots the store record
    /// by value, so later catalog edits cannot rewrite an issued receipt.
    pub fn open_sale(&self, timestamp: DateTime<Utc>, ccf: i64, coo: i64) -> Sale {
        Sale::new(self.clone(), timestamp, ccf, coo)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_address() -> Address {
        Address::new("Log 1", 10, "C1", "Bai 1", "Mun 1", "E1", "11111-111")
    }

    fn sample_store() -> Store {
        Store::new(
            "Loja 1",
            sample_address(),
            "(11) 1111-1111",
            "Obs 1",
            "11.111.111/1111-11",
            "123456789",
        )
    }

    #[test]
    fn test_descriptor_block() {
        let expected = "Loja 1\n\
                        Log 1, 10 C1\n\
                        Bai 1 - Mun 1 - E1\n\
                        CEP:11111-111 Tel (11) 1111-1111\n\
                        Obs 1\n\
                        CNPJ: 11.111.111/1111-11\n\
                        IE: 123456789\n";
        assert_eq!(sample_store().descriptor().unwrap(), expected);
    }

    #[test]
    fn test_empty_complement_leaves_no_dangling_space() {
        let mut store = sample_store();
        store.address.complement = String::new();
        let descriptor = store.descriptor().unwrap();
        assert!(descriptor.contains("Log 1, 10\n"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let mut store = sample_store();
        store.name = String::new();
        let err = store.descriptor().unwrap_err();
        assert_eq!(err.to_string(), "store name is required");
    }

    #[test]
    fn test_missing_address_field_is_rejected() {
        let mut store = sample_store();
        store.address.city = String::new();
        let err = store.validate().unwrap_err();
        assert_eq!(err.to_string(), "city is required");
    }

    #[test]
    fn test_address_number_must_be_positive() {
        let mut store = sample_store();
        store.address.number = 0;
        let err = store.validate().unwrap_err();
        assert_eq!(err.to_string(), "address number must be positive");
    }

    #[test]
    fn test_open_sale_starts_open_with_counters() {
        let timestamp = Utc.with_ymd_and_hms(2020, 12, 25, 10, 30, 40).unwrap();
        let sale = sample_store().open_sale(timestamp, 21784, 35804);

        assert!(!sale.is_finalized());
        assert_eq!(sale.ccf(), 21784);
        assert_eq!(sale.coo(), 35804);
        assert!(sale.items().is_empty());
    }
}
