//! Construction and type-checked mutation of individual sections.
//!
//! A section's variant is fixed at creation: there is no operation that
//! changes it. Deleting and recreating is the only way to switch types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::next_timestamped_id;
use crate::types::{Banner, DisplayMode, Section, SectionBody, SectionKind};

/// A single assignable section field, tagged for the wire as
/// `{"field": "title", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SectionField {
    IsActive(bool),
    Title(Option<String>),
    DisplayMode(DisplayMode),
    ItemIds(Vec<String>),
    Banners(Vec<Banner>),
}

impl SectionField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::IsActive(_) => "isActive",
            Self::Title(_) => "title",
            Self::DisplayMode(_) => "displayMode",
            Self::ItemIds(_) => "itemIds",
            Self::Banners(_) => "banners",
        }
    }
}

/// Default heading given to new listing sections.
fn default_title(kind: SectionKind) -> Option<String> {
    match kind {
        SectionKind::Banner => None,
        _ => Some(format!("Nouvelle section {kind}")),
    }
}

/// Builds an empty, active section of `kind` that goes after `siblings`,
/// with an id unique among them.
#[must_use]
pub fn create_section(kind: SectionKind, siblings: &[Section]) -> Section {
    let id = next_timestamped_id(
        "section-",
        siblings.iter().map(|s| s.id.as_str()),
        Utc::now().timestamp_millis(),
    );

    Section {
        id,
        position: siblings.len() as u32 + 1,
        is_active: true,
        body: SectionBody::empty(kind, default_title(kind)),
    }
}

/// Assigns `field` on `section`. Fields foreign to the section's variant
/// are rejected with `FieldMismatch`.
pub fn set_field(mut section: Section, field: SectionField) -> Result<Section> {
    let mismatch = Error::FieldMismatch {
        field: field.name(),
        kind: section.kind().as_str(),
    };

    match field {
        SectionField::IsActive(active) => section.is_active = active,
        SectionField::Banners(banners) => *section.banners_mut().ok_or(mismatch)? = banners,
        SectionField::Title(title) => section.listing_mut().ok_or(mismatch)?.title = title,
        SectionField::DisplayMode(mode) => {
            section.listing_mut().ok_or(mismatch)?.display_mode = mode;
        }
        SectionField::ItemIds(ids) => section.listing_mut().ok_or(mismatch)?.item_ids = ids,
    }

    Ok(section)
}
