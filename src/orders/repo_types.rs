use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::billing::DISCOUNT_SENTINEL;

/// One line of an order. Copied by value from the menu at checkout, so later
/// menu edits and deletions never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    #[serde(rename = "menuItem")]
    pub menu_item: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl OrderLineItem {
    pub fn is_discount(&self) -> bool {
        self.menu_item == DISCOUNT_SENTINEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cooking,
    Ready,
    Completed,
    Cancelled,
}

impl sqlx::postgres::PgHasArrayType for OrderStatus {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_order_status")
    }
}

impl OrderStatus {
    /// The kitchen-facing subset: everything still moving through the queue.
    pub const ACTIVE: [OrderStatus; 3] = [Self::Pending, Self::Cooking, Self::Ready];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "cooking" => Some(Self::Cooking),
            "ready" => Some(Self::Ready),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Cooking => "cooking",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub items: Json<Vec<OrderLineItem>>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    #[serde(rename = "customerPhone")]
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    /// Human-facing daily sequence number, unique per calendar day only.
    pub token_number: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_roundtrip() {
        for s in ["pending", "cooking", "ready", "completed", "cancelled"] {
            assert_eq!(OrderStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(OrderStatus::parse("active").is_none());
        assert!(OrderStatus::parse("PENDING").is_none());
    }

    #[test]
    fn active_set_excludes_terminal_states() {
        assert!(OrderStatus::ACTIVE.contains(&OrderStatus::Pending));
        assert!(OrderStatus::ACTIVE.contains(&OrderStatus::Cooking));
        assert!(OrderStatus::ACTIVE.contains(&OrderStatus::Ready));
        assert!(!OrderStatus::ACTIVE.contains(&OrderStatus::Completed));
        assert!(!OrderStatus::ACTIVE.contains(&OrderStatus::Cancelled));
    }

    #[test]
    fn order_serializes_with_wire_field_names() {
        let order = Order {
            id: Uuid::new_v4(),
            items: Json(vec![OrderLineItem {
                menu_item: "m1".into(),
                name: "Idli".into(),
                price: Decimal::from(40),
                quantity: 2,
            }]),
            total_amount: Decimal::new(8400, 2),
            customer_name: Some("Asha".into()),
            customer_phone: None,
            status: OrderStatus::Pending,
            token_number: 3,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("totalAmount").is_some());
        assert!(json.get("customerName").is_some());
        assert!(json.get("token_number").is_some());
        assert!(json.get("created_at").is_some());
        assert_eq!(json["status"], "pending");
        assert_eq!(json["items"][0]["menuItem"], "m1");
    }
}
