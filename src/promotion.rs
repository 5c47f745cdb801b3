//! Promotion applicability: whether a promotion may discount a product on a
//! given day.
//!
//! All checks compare calendar dates only. A promotion running from June 1st
//! to August 31st applies on both of those days.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::Repository;
use crate::types::{AppliesTo, Promotion};

/// Outcome of an applicability check, naming the first rule that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Eligibility {
    Eligible,
    Inactive,
    OutsideWindow,
    UsageExhausted,
    ProductNotCovered,
}

impl Eligibility {
    #[must_use]
    pub fn is_eligible(self) -> bool {
        self == Self::Eligible
    }
}

/// Where a promotion stands relative to its date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Scheduled,
    Running,
    Ended,
}

/// Today's date on the local calendar.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[must_use]
pub fn is_within_window(promotion: &Promotion, on: NaiveDate) -> bool {
    promotion.start_date <= on && on <= promotion.end_date
}

#[must_use]
pub fn is_usage_available(promotion: &Promotion) -> bool {
    promotion.usage_limit == 0 || promotion.usage_count < promotion.usage_limit
}

#[must_use]
pub fn applies_to_product(promotion: &Promotion, product_id: &str) -> bool {
    match promotion.applies_to {
        AppliesTo::All => true,
        AppliesTo::Specific => promotion.product_ids.iter().any(|id| id == product_id),
    }
}

#[must_use]
pub fn check(promotion: &Promotion, product_id: &str, on: NaiveDate) -> Eligibility {
    if !promotion.is_active {
        Eligibility::Inactive
    } else if !is_within_window(promotion, on) {
        Eligibility::OutsideWindow
    } else if !is_usage_available(promotion) {
        Eligibility::UsageExhausted
    } else if !applies_to_product(promotion, product_id) {
        Eligibility::ProductNotCovered
    } else {
        Eligibility::Eligible
    }
}

#[must_use]
pub fn is_eligible(promotion: &Promotion, product_id: &str, on: NaiveDate) -> bool {
    check(promotion, product_id, on).is_eligible()
}

#[must_use]
pub fn phase(promotion: &Promotion, on: NaiveDate) -> Phase {
    if on < promotion.start_date {
        Phase::Scheduled
    } else if on > promotion.end_date {
        Phase::Ended
    } else {
        Phase::Running
    }
}

/// Switches the product scope. Going back to `All` clears the product list.
pub fn set_applies_to(promotion: &mut Promotion, applies_to: AppliesTo) {
    promotion.applies_to = applies_to;
    if applies_to == AppliesTo::All {
        promotion.product_ids.clear();
    }
}

/// Replaces the promotion's product list wholesale and persists it.
/// Promotions covering every product keep an empty list, so a non-empty list
/// for one of them is rejected.
pub async fn set_applied_products(
    promotions: &Repository<Promotion>,
    id: &str,
    product_ids: Vec<String>,
) -> Result<Promotion> {
    let count = product_ids.len();
    let promotion = promotions
        .modify(id, move |promotion| {
            if promotion.applies_to == AppliesTo::All && !product_ids.is_empty() {
                return Err(Error::BadRequest(format!(
                    "promotion {} applies to all products and takes no product list",
                    promotion.id
                )));
            }
            promotion.product_ids = product_ids;
            Ok(())
        })
        .await?;
    debug!("Promotion {id} now covers {count} products");
    Ok(promotion)
}
