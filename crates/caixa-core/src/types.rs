//! # Domain Types
//!
//! Catalog and payment types used throughout Caixa POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────┐  │
//! │  │    Product      │   │    LineItem     │   │   Payment    │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────  │  │
//! │  │  code           │   │  number         │   │  method      │  │
//! │  │  description    │   │  product        │   │  amount      │  │
//! │  │  unit_price     │   │  quantity       │   └──────────────┘  │
//! │  └─────────────────┘   └─────────────────┘                     │
//! │                                                                 │
//! │  ┌─────────────────┐   ┌─────────────────┐                     │
//! │  │    TaxRate      │   │   Negotiation   │                     │
//! │  │  bps (u32)      │   │  Percent | Fixed│                     │
//! │  │  754 = 7.54%    │   │  (one-time)     │                     │
//! │  └─────────────────┘   └─────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 754 bps = 7.54%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settled the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
}

impl PaymentMethod {
    /// The fixed label printed on the receipt's payment line.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Credit => "Crédito",
            PaymentMethod::Debit => "Débito",
        }
    }
}

// =============================================================================
// Payment
// =============================================================================

/// The payment declaration recorded when a sale is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub method: PaymentMethod,
    /// Amount tendered by the customer; never below the sale total.
    pub amount: Money,
}

// =============================================================================
// Negotiation
// =============================================================================

/// A one-time price adjustment applied when a product enters the catalog.
///
/// This is a transient pricing policy, not stored on the product: the
/// transform runs exactly once, before the `Product` is built, so there is
/// no hidden mutation during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Negotiation {
    /// Price factor in basis points; `Percent(10_000)` keeps the list price.
    Percent(u32),
    /// Signed amount added to the list price.
    Fixed(Money),
}

impl Negotiation {
    /// Applies the policy to a list price. Pure; the input is not touched.
    pub fn apply(&self, list_price: Money) -> Money {
        match self {
            Negotiation::Percent(bps) => list_price.scale_bps(*bps),
            Negotiation::Fixed(delta) => list_price + *delta,
        }
    }
}

/// The default negotiation leaves the list price unchanged.
impl Default for Negotiation {
    fn default() -> Self {
        Negotiation::Percent(10_000)
    }
}

// =============================================================================
// Product
// =============================================================================

/// An immutable catalog entry.
///
/// Construction never rejects a non-positive price or an empty description;
/// both are checked when an item for this product is admitted to a sale.
/// Callers may legitimately build a product before a price correction lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog code, unique within one sale.
    pub code: i64,
    pub description: String,
    /// Unit label printed on the receipt line (`kg`, `m`, `un`...).
    pub unit: String,
    pub unit_price: Money,
    /// Tax-substitution marker, echoed verbatim on the receipt line.
    /// Empty for products under the regular regime.
    pub tax_substitution: String,
}

impl Product {
    /// Creates a product at its list price.
    pub fn new(
        code: i64,
        description: impl Into<String>,
        unit: impl Into<String>,
        unit_price: Money,
        tax_substitution: impl Into<String>,
    ) -> Self {
        Product {
            code,
            description: description.into(),
            unit: unit.into(),
            unit_price,
            tax_substitution: tax_substitution.into(),
        }
    }

    /// Creates a product with a negotiation applied to the list price.
    ///
    /// The adjustment happens here, once; the resulting product is as
    /// immutable as any other.
    pub fn negotiated(
        code: i64,
        description: impl Into<String>,
        unit: impl Into<String>,
        list_price: Money,
        tax_substitution: impl Into<String>,
        negotiation: Negotiation,
    ) -> Self {
        Product::new(
            code,
            description,
            unit,
            negotiation.apply(list_price),
            tax_substitution,
        )
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A product bound to a quantity within one sale.
///
/// Built independently, then admitted into exactly one sale through
/// [`crate::Sale::add_item`]; effectively frozen after admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Caller-assigned item number.
    pub number: i64,
    pub product: Product,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(number: i64, product: Product, quantity: i64) -> Self {
        LineItem {
            number,
            product,
            quantity,
        }
    }

    /// The line total: quantity × unit price. Pure, recomputed on demand.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.unit_price.multiply_quantity(self.quantity)
    }

    /// Renders this item's receipt line under the given printed sequence
    /// number (acceptance order, 1-based).
    ///
    /// Fields are space-separated; an empty tax-substitution marker leaves
    /// its column blank, producing the layout's characteristic double space.
    pub fn render(&self, sequence: usize) -> String {
        format!(
            "{} {} {} {} {} {} {} {}",
            sequence,
            self.product.code,
            self.product.description,
            self.quantity,
            self.product.unit,
            self.product.unit_price,
            self.product.tax_substitution,
            self.line_total(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.label(), "Dinheiro");
        assert_eq!(PaymentMethod::Credit.label(), "Crédito");
        assert_eq!(PaymentMethod::Debit.label(), "Débito");
    }

    #[test]
    fn test_payment_method_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"debit\"").unwrap(),
            PaymentMethod::Debit
        );
    }

    #[test]
    fn test_tax_rate_percentage() {
        assert_eq!(TaxRate::from_bps(754).bps(), 754);
        assert!((TaxRate::from_bps(754).percentage() - 7.54).abs() < 1e-9);
    }

    #[test]
    fn test_default_negotiation_keeps_list_price() {
        let list = Money::from_cents(435);
        assert_eq!(Negotiation::default().apply(list), list);
    }

    #[test]
    fn test_percent_negotiation_scales_price() {
        // 90% of R$ 4.35 → R$ 3.92
        let negotiated = Negotiation::Percent(9_000).apply(Money::from_cents(435));
        assert_eq!(negotiated.cents(), 392);
    }

    #[test]
    fn test_fixed_negotiation_is_a_signed_addend() {
        let up = Negotiation::Fixed(Money::from_cents(100)).apply(Money::from_cents(435));
        assert_eq!(up.cents(), 535);

        let down = Negotiation::Fixed(Money::from_cents(-500)).apply(Money::from_cents(435));
        assert_eq!(down.cents(), -65); // non-positive result is caught at admission
    }

    #[test]
    fn test_negotiated_product_constructor() {
        let product = Product::negotiated(
            123456,
            "Produto1",
            "kg",
            Money::from_cents(435),
            "",
            Negotiation::Percent(9_000),
        );
        assert_eq!(product.unit_price.cents(), 392);
    }

    #[test]
    fn test_line_total() {
        let product = Product::new(123456, "Produto1", "kg", Money::from_cents(435), "");
        let item = LineItem::new(1, product, 2);
        assert_eq!(item.line_total(), Money::from_cents(870));
    }

    #[test]
    fn test_render_line_with_empty_tax_marker() {
        let product = Product::new(123456, "Produto1", "kg", Money::from_cents(435), "");
        let item = LineItem::new(1, product, 2);
        // double space where the ST column is blank
        assert_eq!(item.render(1), "1 123456 Produto1 2 kg 4.35  8.70");
    }

    #[test]
    fn test_render_line_uses_printed_sequence_not_item_number() {
        let product = Product::new(234567, "Produto2", "m", Money::from_cents(101), "ST");
        let item = LineItem::new(9, product, 4);
        assert_eq!(item.render(2), "2 234567 Produto2 4 m 1.01 ST 4.04");
    }
}
