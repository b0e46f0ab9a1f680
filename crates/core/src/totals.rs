//! Aggregate totals over cart lines.
//!
//! Amounts travel as decimal strings and are only parsed at computation
//! sites. Unparseable amounts count as zero rather than failing; the cart
//! must always render.

use rust_decimal::Decimal;

use crate::cart::{CartCost, CartLine, DEFAULT_CURRENCY, Money};

/// Parse a decimal amount string, treating garbage as zero.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or_default()
}

/// Total cost of `quantity` units at `unit_amount` each, serialized without
/// currency formatting.
#[must_use]
pub fn line_cost(quantity: i64, unit_amount: &str) -> String {
    (Decimal::from(quantity) * parse_amount(unit_amount))
        .normalize()
        .to_string()
}

/// Per-unit amount backed out of a line's stored total.
#[must_use]
pub fn unit_amount(line: &CartLine) -> String {
    let quantity = Decimal::from(line.quantity.max(1));
    (parse_amount(&line.cost.total_amount.amount) / quantity)
        .normalize()
        .to_string()
}

/// Derive `totalQuantity` and the cost block from the lines.
///
/// The dominant currency is the first line's; an empty cart reports zeroes
/// in [`DEFAULT_CURRENCY`]. Tax is always zero, matching the upstream cart
/// which only learns tax at checkout.
#[must_use]
pub fn compute_totals(lines: &[CartLine]) -> (i64, CartCost) {
    let total_quantity = lines.iter().map(|line| line.quantity).sum();
    let total: Decimal = lines
        .iter()
        .map(|line| parse_amount(&line.cost.total_amount.amount))
        .sum();
    let currency_code = lines
        .first()
        .map_or(DEFAULT_CURRENCY, |line| {
            line.cost.total_amount.currency_code.as_str()
        })
        .to_owned();

    let amount = total.normalize().to_string();
    let cost = CartCost {
        subtotal_amount: Money {
            amount: amount.clone(),
            currency_code: currency_code.clone(),
        },
        total_amount: Money {
            amount,
            currency_code: currency_code.clone(),
        },
        total_tax_amount: Money::zero(&currency_code),
    };

    (total_quantity, cost)
}
