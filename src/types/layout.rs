use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four section variants a store layout is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Banner,
    Carousel,
    Grid,
    Featured,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [Self::Banner, Self::Carousel, Self::Grid, Self::Featured];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Carousel => "carousel",
            Self::Grid => "grid",
            Self::Featured => "featured",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown section type: {s}"))
    }
}

/// Presentation-density hint for listing sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Default,
    Compact,
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// 1-based rank within the enclosing banner section.
    pub position: u32,
    pub is_active: bool,
}

/// Payload shared by carousel, grid and featured sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub display_mode: DisplayMode,
    /// Product ids; empty means "every product of the store" for grids.
    #[serde(default)]
    pub item_ids: Vec<String>,
}

/// Variant payload, tagged by `type` on the wire. A banner section cannot
/// hold item ids and a listing section cannot hold banners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionBody {
    Banner {
        #[serde(default)]
        banners: Vec<Banner>,
    },
    Carousel(Listing),
    Grid(Listing),
    Featured(Listing),
}

impl SectionBody {
    #[must_use]
    pub fn empty(kind: SectionKind, title: Option<String>) -> Self {
        let listing = Listing {
            title,
            ..Listing::default()
        };
        match kind {
            SectionKind::Banner => Self::Banner {
                banners: Vec::new(),
            },
            SectionKind::Carousel => Self::Carousel(listing),
            SectionKind::Grid => Self::Grid(listing),
            SectionKind::Featured => Self::Featured(listing),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Banner { .. } => SectionKind::Banner,
            Self::Carousel(_) => SectionKind::Carousel,
            Self::Grid(_) => SectionKind::Grid,
            Self::Featured(_) => SectionKind::Featured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    /// 1-based, dense and unique within a `StoreConfig`.
    pub position: u32,
    pub is_active: bool,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        self.body.kind()
    }

    #[must_use]
    pub fn listing(&self) -> Option<&Listing> {
        match &self.body {
            SectionBody::Banner { .. } => None,
            SectionBody::Carousel(listing)
            | SectionBody::Grid(listing)
            | SectionBody::Featured(listing) => Some(listing),
        }
    }

    pub fn listing_mut(&mut self) -> Option<&mut Listing> {
        match &mut self.body {
            SectionBody::Banner { .. } => None,
            SectionBody::Carousel(listing)
            | SectionBody::Grid(listing)
            | SectionBody::Featured(listing) => Some(listing),
        }
    }

    #[must_use]
    pub fn banners(&self) -> Option<&[Banner]> {
        match &self.body {
            SectionBody::Banner { banners } => Some(banners),
            _ => None,
        }
    }

    pub fn banners_mut(&mut self) -> Option<&mut Vec<Banner>> {
        match &mut self.body {
            SectionBody::Banner { banners } => Some(banners),
            _ => None,
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.listing().and_then(|l| l.title.as_deref())
    }

    /// Item ids of a listing section; always empty for banner sections.
    #[must_use]
    pub fn item_ids(&self) -> &[String] {
        self.listing().map_or(&[], |l| l.item_ids.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub id: String,
    pub store_id: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub last_modified: DateTime<Utc>,
}

impl StoreConfig {
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// True when section positions are exactly `1..=N` in array order.
    #[must_use]
    pub fn has_dense_positions(&self) -> bool {
        self.sections
            .iter()
            .enumerate()
            .all(|(index, section)| section.position as usize == index + 1)
    }

    /// Flat, read-only view of every banner nested in this layout,
    /// in section order then banner order.
    #[must_use]
    pub fn banners(&self) -> Vec<&Banner> {
        self.sections
            .iter()
            .filter_map(Section::banners)
            .flatten()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoreConfig {
    pub store_id: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}
