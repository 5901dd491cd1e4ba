use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const NAME_MAX: usize = 60;
pub const DESCRIPTION_MAX: usize = 200;

#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "isAvailable", default)]
    pub is_available: Option<bool>,
}

impl CreateMenuItemRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_name(&self.name)?;
        check_price(self.price)?;
        if self.category.trim().is_empty() {
            return Err(ApiError::Validation("category is required".into()));
        }
        check_description(self.description.as_deref())?;
        Ok(())
    }
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "isAvailable")]
    pub is_available: Option<bool>,
}

impl UpdateMenuItemRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(ApiError::Validation("category must not be empty".into()));
            }
        }
        check_description(self.description.as_deref())?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn check_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }
    if name.chars().count() > NAME_MAX {
        return Err(ApiError::Validation(format!(
            "name cannot be more than {NAME_MAX} characters"
        )));
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), ApiError> {
    if price < Decimal::ZERO {
        return Err(ApiError::Validation("price must not be negative".into()));
    }
    Ok(())
}

fn check_description(description: Option<&str>) -> Result<(), ApiError> {
    if let Some(d) = description {
        if d.chars().count() > DESCRIPTION_MAX {
            return Err(ApiError::Validation(format!(
                "description cannot be more than {DESCRIPTION_MAX} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CreateMenuItemRequest {
        CreateMenuItemRequest {
            name: "Masala Dosa".into(),
            price: Decimal::from(80),
            category: "South Indian".into(),
            description: Some("Crispy dosa with potato filling".into()),
            image: None,
            is_available: None,
        }
    }

    #[test]
    fn valid_item_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn name_is_required_and_bounded() {
        let mut req = base();
        req.name = "  ".into();
        assert!(req.validate().is_err());

        req.name = "x".repeat(NAME_MAX + 1);
        assert!(req.validate().is_err());

        req.name = "x".repeat(NAME_MAX);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        let mut req = base();
        req.price = Decimal::from(-1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn category_is_required() {
        let mut req = base();
        req.category = "".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn description_is_optional_but_bounded() {
        let mut req = base();
        req.description = None;
        assert!(req.validate().is_ok());

        req.description = Some("d".repeat(DESCRIPTION_MAX + 1));
        assert!(req.validate().is_err());
    }

    #[test]
    fn partial_update_validates_only_present_fields() {
        let empty = UpdateMenuItemRequest::default();
        assert!(empty.validate().is_ok());

        let bad_price = UpdateMenuItemRequest {
            price: Some(Decimal::from(-10)),
            ..Default::default()
        };
        assert!(bad_price.validate().is_err());
    }
}
