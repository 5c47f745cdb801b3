//! Preview renderer: projects a store layout onto the ordered list of blocks
//! a customer sees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::store::Filter;
use crate::types::{Banner, DisplayMode, Product, Section, SectionBody, SectionKind, StoreConfig};

/// Device class the preview is rendered for. Only the maximum width
/// depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl Viewport {
    /// Maximum rendering width in pixels; `None` is full width.
    #[must_use]
    pub fn max_width(self) -> Option<u32> {
        match self {
            Self::Mobile => Some(375),
            Self::Tablet => Some(768),
            Self::Desktop => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            other => Err(format!("unknown viewport: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub store_id: String,
    pub viewport: Viewport,
    pub max_width: Option<u32>,
    pub blocks: Vec<Block>,
}

/// One visual block. `section_id` is `None` for the implicit grid shown
/// when a store has no layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub section_id: Option<String>,
    pub source: SectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum View {
    Banners {
        slides: Vec<Slide>,
    },
    #[serde(rename_all = "camelCase")]
    Carousel {
        display_mode: DisplayMode,
        start_index: usize,
        products: Vec<Product>,
    },
    #[serde(rename_all = "camelCase")]
    Grid {
        display_mode: DisplayMode,
        products: Vec<Product>,
    },
}

/// Image block with an optional caption overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub banner_id: String,
    pub image_url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl From<&Banner> for Slide {
    fn from(banner: &Banner) -> Self {
        Self {
            banner_id: banner.id.clone(),
            image_url: banner.image_url.clone(),
            alt: banner.title.clone().unwrap_or_else(|| "Banner".to_string()),
            title: banner.title.clone(),
            description: banner.description.clone(),
            link_url: banner.link_url.clone(),
        }
    }
}

/// Single-item navigation over a carousel block, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselCursor {
    index: usize,
    len: usize,
}

impl CarouselCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Current index, or `None` when there is nothing to show.
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = if self.index == 0 { self.len - 1 } else { self.index - 1 };
        }
    }
}

/// Products of the store referenced by `item_ids`, in catalog order.
/// With `all_when_empty`, an empty selection means the whole store.
fn select<'a>(
    products: &'a [Product],
    store_id: &'a str,
    item_ids: &'a [String],
    all_when_empty: bool,
) -> impl Iterator<Item = &'a Product> + 'a {
    let everything = all_when_empty && item_ids.is_empty();
    products
        .iter()
        .filter(move |p| p.store_id == store_id)
        .filter(move |p| everything || item_ids.contains(&p.id))
}

fn block(section: &Section, store_id: &str, products: &[Product]) -> Block {
    let view = match &section.body {
        SectionBody::Banner { banners } => {
            let mut active: Vec<&Banner> = banners.iter().filter(|b| b.is_active).collect();
            active.sort_by_key(|b| b.position);
            View::Banners {
                slides: active.into_iter().map(Slide::from).collect(),
            }
        }
        SectionBody::Carousel(listing) => View::Carousel {
            display_mode: listing.display_mode,
            start_index: 0,
            products: select(products, store_id, &listing.item_ids, false)
                .cloned()
                .collect(),
        },
        SectionBody::Grid(listing) => View::Grid {
            display_mode: listing.display_mode,
            products: select(products, store_id, &listing.item_ids, true)
                .cloned()
                .collect(),
        },
        SectionBody::Featured(listing) => View::Grid {
            display_mode: DisplayMode::Compact,
            products: select(products, store_id, &listing.item_ids, true)
                .cloned()
                .collect(),
        },
    };

    Block {
        section_id: Some(section.id.clone()),
        source: section.kind(),
        title: section.title().map(str::to_string),
        view,
    }
}

/// Builds the render plan of `store_id`. Pure: the same inputs always give
/// the same plan.
#[must_use]
pub fn render(
    store_id: &str,
    config: Option<&StoreConfig>,
    products: &[Product],
    viewport: Viewport,
) -> RenderPlan {
    let blocks = match config {
        Some(config) => {
            let mut visible: Vec<&Section> =
                config.sections.iter().filter(|s| s.is_active).collect();
            visible.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
            visible
                .into_iter()
                .map(|section| block(section, store_id, products))
                .collect()
        }
        None => vec![Block {
            section_id: None,
            source: SectionKind::Grid,
            title: None,
            view: View::Grid {
                display_mode: DisplayMode::Default,
                products: select(products, store_id, &[], true).cloned().collect(),
            },
        }],
    };

    RenderPlan {
        store_id: store_id.to_string(),
        viewport,
        max_width: viewport.max_width(),
        blocks,
    }
}

/// Loads the store's live layout and products, then renders them.
pub async fn render_store(catalog: &Catalog, store_id: &str, viewport: Viewport) -> RenderPlan {
    let config = catalog.configs.fetch(store_id).await;
    let products = catalog.products.list(Some(&Filter::store(store_id))).await;
    if config.is_none() {
        debug!("No layout for store {store_id}, rendering fallback grid");
    }
    render(store_id, config.as_ref(), &products, viewport)
}
