use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Order, OrderLineItem, OrderStatus};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLineItem>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
    #[serde(rename = "customerName", default)]
    pub customer_name: Option<String>,
    #[serde(rename = "customerPhone", default)]
    pub customer_phone: Option<String>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.items.is_empty() {
            return Err(ApiError::Validation("items must not be empty".into()));
        }
        for item in &self.items {
            if item.is_discount() {
                if item.quantity != 1 {
                    return Err(ApiError::Validation(
                        "discount line must have quantity 1".into(),
                    ));
                }
                continue;
            }
            if item.quantity < 1 {
                return Err(ApiError::Validation(format!(
                    "quantity for '{}' must be at least 1",
                    item.name
                )));
            }
            if item.price < Decimal::ZERO {
                return Err(ApiError::Validation(format!(
                    "price for '{}' must not be negative",
                    item.name
                )));
            }
        }
        if self.total_amount < Decimal::ZERO {
            return Err(ApiError::Validation("totalAmount must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: OrderStatus,
}

/// Transitioned order plus whether a ready-notification was produced.
#[derive(Debug, Serialize)]
pub struct UpdateOrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub notified: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
    pub date: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct CustomerStatsQuery {
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerStats {
    pub visits: i64,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    #[serde(rename = "orderId")]
    pub order_id: Uuid,
    pub token_number: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    pub items: Vec<OrderLineItem>,
    pub subtotal: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    #[serde(rename = "grandTotal")]
    pub grand_total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::DISCOUNT_SENTINEL;

    fn request(items: Vec<OrderLineItem>) -> CreateOrderRequest {
        CreateOrderRequest {
            items,
            total_amount: Decimal::from(100),
            customer_name: None,
            customer_phone: None,
        }
    }

    fn item(quantity: i32, price: i64) -> OrderLineItem {
        OrderLineItem {
            menu_item: "m1".into(),
            name: "Vada".into(),
            price: Decimal::from(price),
            quantity,
        }
    }

    #[test]
    fn accepts_wire_field_names() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{
                "items": [{"menuItem": "m1", "name": "Vada", "price": 25, "quantity": 2}],
                "totalAmount": 52.5,
                "customerName": "Asha",
                "customerPhone": "5551234"
            }"#,
        )
        .unwrap();
        assert_eq!(req.items[0].quantity, 2);
        assert_eq!(req.customer_name.as_deref(), Some("Asha"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_empty_cart() {
        assert!(request(vec![]).validate().is_err());
    }

    #[test]
    fn rejects_zero_quantity() {
        assert!(request(vec![item(0, 25)]).validate().is_err());
    }

    #[test]
    fn rejects_negative_price_on_regular_lines() {
        assert!(request(vec![item(1, -5)]).validate().is_err());
    }

    #[test]
    fn discount_line_may_be_negative_but_single() {
        let discount = OrderLineItem {
            menu_item: DISCOUNT_SENTINEL.into(),
            name: "Discount (10%)".into(),
            price: Decimal::from(-10),
            quantity: 1,
        };
        assert!(request(vec![item(1, 100), discount.clone()]).validate().is_ok());

        let mut doubled = discount;
        doubled.quantity = 2;
        assert!(request(vec![item(1, 100), doubled]).validate().is_err());
    }
}
