use axum::{routing::post, Json, Router};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::orders::repo_types::OrderLineItem;
use crate::state::AppState;

/// Line items carrying this marker instead of a menu item id are synthetic
/// discount rows, never counted into subtotals.
pub const DISCOUNT_SENTINEL: &str = "DISCOUNT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiscountKind {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "10percent")]
    TenPercent,
    #[serde(rename = "flat50")]
    Flat50,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    #[serde(rename = "discountAmount")]
    pub discount_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    #[serde(rename = "grandTotal")]
    pub grand_total: Decimal,
}

fn round2(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One GST half: 2.5% of the base, rounded on its own. CGST and SGST must stay
/// independently rounded; a combined 5% figure can differ by one paisa.
fn gst_component(base: Decimal) -> Decimal {
    round2(base * Decimal::new(25, 3))
}

/// Cart math for checkout. Pure and deterministic: same cart and discount
/// selection always yield the same five figures.
pub fn compute_totals(items: &[OrderLineItem], discount: DiscountKind) -> Totals {
    let subtotal: Decimal = items
        .iter()
        .filter(|i| !i.is_discount())
        .map(|i| i.price * Decimal::from(i.quantity))
        .sum();

    let mut discount_amount = match discount {
        DiscountKind::None => Decimal::ZERO,
        DiscountKind::TenPercent => round2(subtotal * Decimal::new(10, 2)),
        DiscountKind::Flat50 => Decimal::from(50),
    };
    // Never drive the post-discount total below zero.
    if discount_amount > subtotal {
        discount_amount = subtotal;
    }

    let after_discount = subtotal - discount_amount;
    let cgst = gst_component(after_discount);
    let sgst = gst_component(after_discount);

    Totals {
        subtotal,
        discount_amount,
        cgst,
        sgst,
        grand_total: after_discount + cgst + sgst,
    }
}

/// Synthetic negative line appended to the stored items for receipt display.
pub fn discount_line(kind: DiscountKind, amount: Decimal) -> Option<OrderLineItem> {
    if amount <= Decimal::ZERO {
        return None;
    }
    let name = match kind {
        DiscountKind::None => return None,
        DiscountKind::TenPercent => "Discount (10%)",
        DiscountKind::Flat50 => "Discount (₹50 Flat)",
    };
    Some(OrderLineItem {
        menu_item: DISCOUNT_SENTINEL.into(),
        name: name.into(),
        price: -amount,
        quantity: 1,
    })
}

/// Receipt-side recomputation. Subtotal and the GST halves come from the
/// positive lines only; the stored grand total is trusted as-is and never
/// recomputed here.
pub fn receipt_totals(items: &[OrderLineItem]) -> (Decimal, Decimal, Decimal) {
    let subtotal: Decimal = items
        .iter()
        .filter(|i| !i.is_discount() && i.price >= Decimal::ZERO)
        .map(|i| i.price * Decimal::from(i.quantity))
        .sum();
    (subtotal, gst_component(subtotal), gst_component(subtotal))
}

// --- quote endpoint (the POS asks the server instead of re-implementing the math) ---

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub items: Vec<OrderLineItem>,
    #[serde(default)]
    pub discount: DiscountKind,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub totals: Totals,
    #[serde(rename = "discountLine")]
    pub discount_line: Option<OrderLineItem>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/billing/quote", post(quote))
}

#[instrument(skip(req))]
async fn quote(Json(req): Json<QuoteRequest>) -> Result<Json<QuoteResponse>, ApiError> {
    if req.items.is_empty() {
        return Err(ApiError::Validation("items must not be empty".into()));
    }
    let totals = compute_totals(&req.items, req.discount);
    let line = discount_line(req.discount, totals.discount_amount);
    Ok(Json(QuoteResponse {
        totals,
        discount_line: line,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: i32) -> OrderLineItem {
        OrderLineItem {
            menu_item: "m1".into(),
            name: "Masala Dosa".into(),
            price: Decimal::from(price),
            quantity,
        }
    }

    #[test]
    fn no_discount_scenario() {
        // cart = [{price:100, qty:2}] → subtotal 200, each GST half 5.00, total 210.00
        let t = compute_totals(&[line(100, 2)], DiscountKind::None);
        assert_eq!(t.subtotal, Decimal::from(200));
        assert_eq!(t.discount_amount, Decimal::ZERO);
        assert_eq!(t.cgst, Decimal::new(500, 2));
        assert_eq!(t.sgst, Decimal::new(500, 2));
        assert_eq!(t.grand_total, Decimal::new(21000, 2));
    }

    #[test]
    fn flat50_scenario() {
        // cart = [{price:100, qty:1}] flat50 → after 50, GST 1.25 each, total 52.50
        let t = compute_totals(&[line(100, 1)], DiscountKind::Flat50);
        assert_eq!(t.discount_amount, Decimal::from(50));
        assert_eq!(t.cgst, Decimal::new(125, 2));
        assert_eq!(t.sgst, Decimal::new(125, 2));
        assert_eq!(t.grand_total, Decimal::new(5250, 2));
    }

    #[test]
    fn ten_percent_is_rounded_to_paise() {
        let t = compute_totals(&[line(99, 1), line(16, 1)], DiscountKind::TenPercent);
        // 10% of 115 = 11.50
        assert_eq!(t.discount_amount, Decimal::new(1150, 2));
        assert_eq!(t.grand_total, t.subtotal - t.discount_amount + t.cgst + t.sgst);
    }

    #[test]
    fn discount_never_exceeds_subtotal() {
        let t = compute_totals(&[line(20, 1)], DiscountKind::Flat50);
        assert_eq!(t.discount_amount, Decimal::from(20));
        assert_eq!(t.grand_total, Decimal::ZERO);

        let empty = compute_totals(&[], DiscountKind::Flat50);
        assert_eq!(empty.subtotal, Decimal::ZERO);
        assert_eq!(empty.discount_amount, Decimal::ZERO);
        assert_eq!(empty.grand_total, Decimal::ZERO);
    }

    #[test]
    fn halves_round_independently() {
        // after-discount 10.10 → each half 0.2525 → 0.25; a single 5% figure
        // would round 0.505 to 0.51.
        let t = compute_totals(
            &[OrderLineItem {
                menu_item: "m1".into(),
                name: "Chai".into(),
                price: Decimal::new(1010, 2),
                quantity: 1,
            }],
            DiscountKind::None,
        );
        assert_eq!(t.cgst, Decimal::new(25, 2));
        assert_eq!(t.sgst, Decimal::new(25, 2));
        assert_eq!(t.cgst + t.sgst, Decimal::new(50, 2));
    }

    #[test]
    fn deterministic() {
        let cart = [line(73, 3), line(12, 1)];
        let a = compute_totals(&cart, DiscountKind::TenPercent);
        let b = compute_totals(&cart, DiscountKind::TenPercent);
        assert_eq!(a, b);
    }

    #[test]
    fn discount_lines_are_excluded_from_subtotal() {
        let mut cart = vec![line(100, 2)];
        cart.push(discount_line(DiscountKind::Flat50, Decimal::from(50)).unwrap());
        let t = compute_totals(&cart, DiscountKind::None);
        assert_eq!(t.subtotal, Decimal::from(200));
    }

    #[test]
    fn discount_line_shape() {
        let l = discount_line(DiscountKind::TenPercent, Decimal::new(1150, 2)).unwrap();
        assert_eq!(l.menu_item, DISCOUNT_SENTINEL);
        assert_eq!(l.name, "Discount (10%)");
        assert_eq!(l.price, Decimal::new(-1150, 2));
        assert_eq!(l.quantity, 1);
        assert!(l.is_discount());

        assert!(discount_line(DiscountKind::None, Decimal::ZERO).is_none());
        assert!(discount_line(DiscountKind::Flat50, Decimal::ZERO).is_none());
    }

    #[test]
    fn receipt_ignores_negative_lines_and_sentinel() {
        let cart = vec![
            line(100, 2),
            discount_line(DiscountKind::Flat50, Decimal::from(50)).unwrap(),
        ];
        let (subtotal, cgst, sgst) = receipt_totals(&cart);
        assert_eq!(subtotal, Decimal::from(200));
        assert_eq!(cgst, Decimal::new(500, 2));
        assert_eq!(sgst, Decimal::new(500, 2));
    }
}
