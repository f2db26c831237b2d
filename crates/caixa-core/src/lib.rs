//! # caixa-core: Pure Business Logic for Caixa POS
//!
//! This crate is the heart of Caixa POS. It models a point-of-sale fiscal
//! transaction: a store opens a sale, line items are drawn from the product
//! catalog, and once payment is confirmed the sale is finalized and can
//! render a tax-compliant receipt.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   ★ caixa-core (THIS CRATE) ★                   │
//! │                                                                 │
//! │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │
//! │   │   types   │  │   money   │  │   sale    │  │   store   │   │
//! │   │  Product  │  │   Money   │  │   Sale    │  │   Store   │   │
//! │   │  LineItem │  │  TaxRate  │  │  Receipt  │  │  Address  │   │
//! │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO PRINTER PORT • PURE FUNCTIONS       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence, real fiscal-printer communication and UI shells are the
//! embedding application's business; this crate only computes and renders.
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, Payment, Negotiation)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`sale`] - The Sale state machine and receipt composition
//! - [`store`] - Store/address records and the sale factory
//! - [`printer`] - Fiscal printer identity record
//! - [`error`] - Domain error types
//! - [`validation`] - Field-presence checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **Integer Money**: all monetary values are in cents (i64)
//! 3. **Explicit Errors**: all errors are typed, never strings or panics
//! 4. **Unrepresentable illegal states**: a sale is `Open` or
//!    `Finalized(..)`; payment data only exists once finalization happened
//!
//! ## Example Usage
//!
//! ```rust
//! use caixa_core::money::Money;
//! use caixa_core::types::{LineItem, Product};
//!
//! let product = Product::new(123456, "Produto1", "kg", Money::from_cents(435), "");
//! let item = LineItem::new(1, product, 2);
//!
//! // 2 kg at R$ 4.35 each
//! assert_eq!(item.line_total(), Money::from_cents(870));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod printer;
pub mod sale;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caixa_core::Sale` instead of
// `use caixa_core::sale::Sale`

pub use error::{SaleError, SaleResult, ValidationError};
pub use money::Money;
pub use printer::FiscalPrinter;
pub use sale::{Sale, Taxes};
pub use store::{Address, Store};
pub use types::*;

// =============================================================================
// Fiscal Constants
// =============================================================================
// The Lei 12.741 disclosure line on every receipt quotes these two rates.
// They are fixed by this core; rate configurability is out of scope.

/// Approximate federal tax share quoted on the receipt: 7.54%.
pub const FEDERAL_TAX_RATE: TaxRate = TaxRate::from_bps(754);

/// Approximate state tax share quoted on the receipt: 4.81%.
pub const STATE_TAX_RATE: TaxRate = TaxRate::from_bps(481);

/// Width of the `-` divider line separating receipt sections.
pub const RECEIPT_DIVIDER_WIDTH: usize = 30;
