use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::layout::Viewport;
use crate::promotion::{Eligibility, Phase};
use crate::types::SectionKind;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreFilterParams {
    #[serde(default)]
    pub store_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    #[serde(rename = "type")]
    pub kind: SectionKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub source_id: String,
    pub target_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProductsRequest {
    pub product_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityParams {
    pub product_id: String,
    /// Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub promotion_id: String,
    pub product_id: String,
    pub date: NaiveDate,
    pub eligible: bool,
    pub result: Eligibility,
    pub phase: Phase,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    #[serde(default)]
    pub viewport: Option<Viewport>,
}
