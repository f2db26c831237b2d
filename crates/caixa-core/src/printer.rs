//! # Fiscal Printer Identity
//!
//! Immutable metadata record for the ECF (Emissor de Cupom Fiscal) device
//! that stamped a sale. The record is only consumed after finalization; its
//! required fields are validated at that point, not at construction.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{require_field, ValidationResult};

/// Identity of the fiscal printer: model, ECF-IF firmware version, ECF
/// number and factory serial. All four fields are required when consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPrinter {
    pub model: String,
    pub firmware_version: String,
    pub ecf_number: String,
    pub serial: String,
}

impl FiscalPrinter {
    pub fn new(
        model: impl Into<String>,
        firmware_version: impl Into<String>,
        ecf_number: impl Into<String>,
        serial: impl Into<String>,
    ) -> Self {
        FiscalPrinter {
            model: model.into(),
            firmware_version: firmware_version.into(),
            ecf_number: ecf_number.into(),
            serial: serial.into(),
        }
    }

    /// Checks the four required fields in declaration order; the first empty
    /// field wins.
    pub fn validate(&self) -> ValidationResult<()> {
        require_field("printer model", &self.model)?;
        require_field("printer firmware version", &self.firmware_version)?;
        require_field("printer ECF number", &self.ecf_number)?;
        require_field("printer serial", &self.serial)?;

        Ok(())
    }

    /// Renders the fixed three-line descriptor block printed at the bottom
    /// of every receipt.
    ///
    /// ```text
    /// SWEDA IF ST200
    /// ECF-IF VERSÃO: 01.00.05 ECF: 067
    /// FAB: SW031300000000045629
    /// ```
    pub fn descriptor(&self) -> Result<String, ValidationError> {
        self.validate()?;

        Ok(format!(
            "{}\nECF-IF VERSÃO: {} ECF: {}\nFAB: {}",
            self.model, self.firmware_version, self.ecf_number, self.serial
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "SWEDA IF ST200";
    const FIRMWARE: &str = "01.00.05";
    const ECF: &str = "067";
    const SERIAL: &str = "SW031300000000045629";

    fn sample_printer() -> FiscalPrinter {
        FiscalPrinter::new(MODEL, FIRMWARE, ECF, SERIAL)
    }

    #[test]
    fn test_descriptor_renders_three_lines() {
        let expected = "SWEDA IF ST200\nECF-IF VERSÃO: 01.00.05 ECF: 067\nFAB: SW031300000000045629";
        assert_eq!(sample_printer().descriptor().unwrap(), expected);
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let printer = FiscalPrinter::new("", FIRMWARE, ECF, SERIAL);
        let err = printer.descriptor().unwrap_err();
        assert_eq!(err.to_string(), "printer model is required");
    }

    #[test]
    fn test_empty_firmware_version_is_rejected() {
        let printer = FiscalPrinter::new(MODEL, "", ECF, SERIAL);
        let err = printer.descriptor().unwrap_err();
        assert_eq!(err.to_string(), "printer firmware version is required");
    }

    #[test]
    fn test_empty_ecf_number_is_rejected() {
        let printer = FiscalPrinter::new(MODEL, FIRMWARE, "", SERIAL);
        let err = printer.descriptor().unwrap_err();
        assert_eq!(err.to_string(), "printer ECF number is required");
    }

    #[test]
    fn test_empty_serial_is_rejected() {
        let printer = FiscalPrinter::new(MODEL, FIRMWARE, ECF, "");
        let err = printer.descriptor().unwrap_err();
        assert_eq!(err.to_string(), "printer serial is required");
    }

    #[test]
    fn test_first_empty_field_wins() {
        let printer = FiscalPrinter::new("", "", "", "");
        let err = printer.validate().unwrap_err();
        assert_eq!(err.to_string(), "printer model is required");
    }
}
