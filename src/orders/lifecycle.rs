use super::repo_types::{Order, OrderStatus};

/// Legal status moves. Forward flow is pending → cooking → ready → completed;
/// the kitchen may skip `cooking` and mark a pending order ready directly.
/// `cancelled` is reachable from any non-terminal state. The only backward
/// moves are the two operator undos (ready → pending, completed → ready).
pub fn transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Cooking)
            | (Pending, Ready)
            | (Cooking, Ready)
            | (Ready, Completed)
            | (Ready, Pending)
            | (Completed, Ready)
            | (Pending, Cancelled)
            | (Cooking, Cancelled)
            | (Ready, Cancelled)
    )
}

/// Message handed to the notification channel when an order becomes ready.
#[derive(Debug, PartialEq, Eq)]
pub struct ReadyNotification {
    /// Digits-only phone number.
    pub phone: String,
    pub message: String,
}

pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn token_display(order: &Order) -> String {
    if order.token_number > 0 {
        format!("Token {}", order.token_number)
    } else {
        let id = order.id.to_string();
        format!("Order #{}", &id[id.len() - 4..])
    }
}

/// Builds the pickup message for an order that just entered `ready`. Returns
/// None when there is no usable phone number; the transition itself still
/// stands in that case.
pub fn ready_notification(order: &Order) -> Option<ReadyNotification> {
    let phone = normalize_phone(order.customer_phone.as_deref()?);
    if phone.is_empty() {
        return None;
    }

    let name = order
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Customer");

    let item_list = order
        .items
        .iter()
        .map(|i| format!("▪️ {}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join("\n");

    let message = format!(
        "Hi {name}, your *{token}* is ready for pickup! 🍽️\n\n*Your Order:*\n{item_list}\n\nThank you for choosing Eatya!",
        token = token_display(order),
    );

    Some(ReadyNotification { phone, message })
}
