//! # Sale State Machine & Receipt Composition
//!
//! The only part of the system with real sequencing rules.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                            │
//! │                                                                 │
//! │  1. OPEN                                                        │
//! │     └── Store::open_sale() → Sale { state: Open }               │
//! │                                                                 │
//! │  2. ADD ITEMS                                                   │
//! │     └── add_item() → admission checks, acceptance order kept    │
//! │                                                                 │
//! │  3. FINALIZE (exactly once)                                     │
//! │     └── finalize() → Sale { state: Finalized(Settlement) }      │
//! │         payment / change / operator / printer become readable   │
//! │                                                                 │
//! │  There is no way back: Finalized is terminal.                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payment, change, operator and printer live inside the `Finalized`
//! variant, so "read before finalize" is not a forgotten-flag bug waiting
//! to happen: the data plainly does not exist until the transition runs.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SaleError, SaleResult};
use crate::money::Money;
use crate::printer::FiscalPrinter;
use crate::store::Store;
use crate::types::{LineItem, Payment, PaymentMethod};
use crate::{FEDERAL_TAX_RATE, RECEIPT_DIVIDER_WIDTH, STATE_TAX_RATE};

// =============================================================================
// Receipt Layout Constants
// =============================================================================

/// Title line between the sale header and the item table.
const RECEIPT_TITLE: &str = "   CUPOM FISCAL   ";

/// Fixed column-header line of the item table.
const ITEM_COLUMNS: &str = "ITEM CODIGO DESCRICAO QTD UN VL UNIT(R$) ST VL ITEM(R$)";

// =============================================================================
// Taxes
// =============================================================================

/// The two approximate tax shares quoted by the Lei 12.741 disclosure line.
/// Always derived from the live sale total, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxes {
    pub federal: Money,
    pub state: Money,
}

// =============================================================================
// Sale State
// =============================================================================

/// Everything that only exists once a sale has been finalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Settlement {
    payment: Payment,
    change: Money,
    operator: i64,
    printer: FiscalPrinter,
}

/// Open → Finalized, no other transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SaleState {
    Open,
    Finalized(Settlement),
}

// =============================================================================
// Sale
// =============================================================================

/// A fiscal sale: an ordered collection of line items plus the counters and
/// store snapshot needed to print a cupom fiscal.
///
/// One instance belongs to one logical transaction. Nothing here locks;
/// callers in concurrent contexts must serialize access per instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    store: Store,
    timestamp: DateTime<Utc>,
    /// Contador de Cupom Fiscal; must be > 0 before anything renders.
    ccf: i64,
    /// Contador de Ordem de Operação; must be > 0 before anything renders.
    coo: i64,
    items: Vec<LineItem>,
    state: SaleState,
}

impl Sale {
    /// Creates an open sale. Prefer [`Store::open_sale`], which snapshots
    /// the store for you.
    pub fn new(store: Store, timestamp: DateTime<Utc>, ccf: i64, coo: i64) -> Self {
        Sale {
            store,
            timestamp,
            ccf,
            coo,
            items: Vec::new(),
            state: SaleState::Open,
        }
    }

    // -------------------------------------------------------------------------
    // Unconditional reads
    // -------------------------------------------------------------------------

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn ccf(&self) -> i64 {
        self.ccf
    }

    pub fn coo(&self) -> i64 {
        self.coo
    }

    /// Admitted line items, in acceptance order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, SaleState::Finalized(_))
    }

    /// Sum of all admitted line totals. Recomputed on every call.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Money::zero(), |acc, line| acc + line)
    }

    /// Federal and state tax shares of the current total.
    pub fn taxes(&self) -> Taxes {
        let total = self.total();
        Taxes {
            federal: total.calculate_tax(FEDERAL_TAX_RATE),
            state: total.calculate_tax(STATE_TAX_RATE),
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Admits a line item into the sale.
    ///
    /// Check order: closed sale, quantity, unit price, description,
    /// duplicate product code. Either fully succeeds or leaves the sale
    /// untouched.
    pub fn add_item(&mut self, item: LineItem) -> SaleResult<()> {
        if self.is_finalized() {
            return Err(SaleError::SaleClosed);
        }

        if item.quantity <= 0 {
            return Err(SaleError::InvalidQuantity {
                quantity: item.quantity,
            });
        }

        if !item.product.unit_price.is_positive() {
            return Err(SaleError::InvalidPrice {
                code: item.product.code,
            });
        }

        if item.product.description.trim().is_empty() {
            return Err(SaleError::MissingDescription {
                code: item.product.code,
            });
        }

        if self
            .items
            .iter()
            .any(|line| line.product.code == item.product.code)
        {
            return Err(SaleError::DuplicateProduct {
                code: item.product.code,
            });
        }

        debug!(
            code = item.product.code,
            quantity = item.quantity,
            "line item admitted"
        );
        self.items.push(item);

        Ok(())
    }

    /// Finalizes the sale with a payment declaration, printer identity and
    /// operator id. Runs exactly once per sale.
    ///
    /// All checks pass before any state is committed: a failed call leaves
    /// the sale open and unchanged. The printer's own required fields are
    /// part of those checks.
    pub fn finalize(
        &mut self,
        method: PaymentMethod,
        amount: Money,
        printer: FiscalPrinter,
        operator: i64,
    ) -> SaleResult<()> {
        if self.is_finalized() {
            return Err(SaleError::SaleClosed);
        }

        let total = self.total();
        if amount < total {
            return Err(SaleError::InsufficientPayment {
                tendered: amount,
                total,
            });
        }

        if operator <= 0 {
            return Err(SaleError::InvalidOperator { operator });
        }

        printer.validate()?;

        let change = amount - total;
        debug!(%total, %change, operator, "sale finalized");

        self.state = SaleState::Finalized(Settlement {
            payment: Payment { method, amount },
            change,
            operator,
            printer,
        });

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Finalization-gated reads
    // -------------------------------------------------------------------------

    fn settlement(&self) -> SaleResult<&Settlement> {
        match &self.state {
            SaleState::Finalized(settlement) => Ok(settlement),
            SaleState::Open => Err(SaleError::NotFinalized),
        }
    }

    /// The payment declaration. Fails until the sale is finalized.
    pub fn payment(&self) -> SaleResult<&Payment> {
        Ok(&self.settlement()?.payment)
    }

    /// Change handed back to the customer. Fails until the sale is finalized.
    pub fn change(&self) -> SaleResult<Money> {
        Ok(self.settlement()?.change)
    }

    /// Operator who closed the sale. Fails until the sale is finalized.
    pub fn operator(&self) -> SaleResult<i64> {
        Ok(self.settlement()?.operator)
    }

    /// Printer identity stamped on the sale. Fails until the sale is
    /// finalized.
    pub fn printer(&self) -> SaleResult<&FiscalPrinter> {
        Ok(&self.settlement()?.printer)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Pre-rendering content check shared by the header and the receipt:
    /// store fields, both counters, and at least one item.
    fn check_required(&self) -> SaleResult<()> {
        self.store.validate()?;

        if self.ccf <= 0 {
            return Err(SaleError::MissingCounter { counter: "CCF" });
        }

        if self.coo <= 0 {
            return Err(SaleError::MissingCounter { counter: "COO" });
        }

        if self.items.is_empty() {
            return Err(SaleError::EmptySale);
        }

        Ok(())
    }

    /// Renders the sale header line:
    /// `DD/MM/YYYY HH:MM:SSV CCF:NNNNNN COO: NNNNNN`.
    ///
    /// The month field prints the zero-based month index (December = 11).
    /// Every receipt this system has ever issued carries that layout, and
    /// downstream reconciliation fixtures depend on it byte-for-byte.
    pub fn header(&self) -> SaleResult<String> {
        self.check_required()?;

        let at = self.timestamp;
        Ok(format!(
            "{:02}/{:02}/{} {:02}:{:02}:{:02}V CCF:{:06} COO: {:06}",
            at.day(),
            at.month0(),
            at.year(),
            at.hour(),
            at.minute(),
            at.second(),
            self.ccf,
            self.coo,
        ))
    }

    /// Composes the full fiscal receipt. Fails while the sale is open.
    ///
    /// Every logical line is newline-terminated; monetary values render
    /// with exactly two decimals; sections are split by the 30-char divider.
    pub fn receipt(&self) -> SaleResult<String> {
        self.check_required()?;
        let settlement = self.settlement()?;

        let divider = "-".repeat(RECEIPT_DIVIDER_WIDTH);
        let taxes = self.taxes();

        let mut cupom = self.store.descriptor()?;
        cupom.push_str(&divider);
        cupom.push('\n');
        cupom.push_str(&self.header()?);
        cupom.push('\n');
        cupom.push_str(RECEIPT_TITLE);
        cupom.push('\n');
        cupom.push_str(ITEM_COLUMNS);
        cupom.push('\n');

        for (index, item) in self.items.iter().enumerate() {
            cupom.push_str(&item.render(index + 1));
            cupom.push('\n');
        }

        cupom.push_str(&divider);
        cupom.push('\n');
        cupom.push_str(&format!("TOTAL R$ {}\n", self.total()));
        cupom.push_str(&format!(
            "{} {}\n",
            settlement.payment.method.label(),
            settlement.payment.amount
        ));
        cupom.push_str(&format!("Troco R$ {}\n", settlement.change));
        // the federal parenthesis has no % sign; the state one does. The
        // printed layout is the external contract, asymmetry included.
        cupom.push_str(&format!(
            "Lei 12.741, Valor aprox., Imposto F={} ({:.2}), E={} ({:.2}%)\n",
            taxes.federal,
            FEDERAL_TAX_RATE.percentage(),
            taxes.state,
            STATE_TAX_RATE.percentage(),
        ));
        cupom.push_str(&divider);
        cupom.push('\n');
        cupom.push_str(&format!("OPERADOR: {}\n", settlement.operator));
        cupom.push_str(&divider);
        cupom.push('\n');
        cupom.push_str(&settlement.printer.descriptor()?);
        cupom.push('\n');

        Ok(cupom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
