//! Layout editor: pure operations over an owned [`StoreConfig`] draft.
//!
//! Every operation takes the draft by value and returns the next draft.
//! Unknown section or banner ids are absorbed as no-ops, and section
//! positions come back as `1..=N` in array order after every call.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::section::{SectionField, create_section, set_field};
use crate::catalog::StoreConfigs;
use crate::error::Result;
use crate::store::next_timestamped_id;
use crate::types::{Banner, Section, SectionKind, StoreConfig};

/// A single assignable banner field, tagged like [`SectionField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum BannerField {
    ImageUrl(String),
    Title(Option<String>),
    Description(Option<String>),
    LinkUrl(Option<String>),
    IsActive(bool),
}

impl BannerField {
    fn apply(self, banner: &mut Banner) {
        match self {
            Self::ImageUrl(url) => banner.image_url = url,
            Self::Title(title) => banner.title = title,
            Self::Description(description) => banner.description = description,
            Self::LinkUrl(link) => banner.link_url = link,
            Self::IsActive(active) => banner.is_active = active,
        }
    }
}

fn renumber(sections: &mut [Section]) {
    for (index, section) in sections.iter_mut().enumerate() {
        section.position = index as u32 + 1;
    }
}

fn renumber_banners(banners: &mut [Banner]) {
    for (index, banner) in banners.iter_mut().enumerate() {
        banner.position = index as u32 + 1;
    }
}

fn index_of(config: &StoreConfig, section_id: &str) -> Option<usize> {
    config.sections.iter().position(|s| s.id == section_id)
}

/// Sorts sections by `(position, id)` and renumbers them densely. Applied to
/// drafts loaded from storage, which may predate the dense invariant.
#[must_use]
pub fn normalize(mut config: StoreConfig) -> StoreConfig {
    config
        .sections
        .sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
    renumber(&mut config.sections);
    config
}

#[must_use]
pub fn add_section(mut config: StoreConfig, kind: SectionKind) -> StoreConfig {
    let section = create_section(kind, &config.sections);
    debug!("Adding {} section {}", kind, section.id);
    config.sections.push(section);
    renumber(&mut config.sections);
    config
}

#[must_use]
pub fn remove_section(mut config: StoreConfig, section_id: &str) -> StoreConfig {
    let Some(index) = index_of(&config, section_id) else {
        debug!("Ignoring removal of unknown section {section_id}");
        return config;
    };

    config.sections.remove(index);
    renumber(&mut config.sections);
    config
}

/// Moves `source_id` to the slot currently held by `target_id`, shifting the
/// sections in between by one, then renumbers.
#[must_use]
pub fn reorder(mut config: StoreConfig, source_id: &str, target_id: &str) -> StoreConfig {
    if source_id == target_id {
        return config;
    }
    let (Some(from), Some(to)) = (index_of(&config, source_id), index_of(&config, target_id)) else {
        debug!("Ignoring reorder of {source_id} onto {target_id}");
        return config;
    };

    let section = config.sections.remove(from);
    config.sections.insert(to, section);
    renumber(&mut config.sections);
    config
}

/// Type-checked field write on one section. Rejected writes leave the draft
/// unchanged.
#[must_use]
pub fn set_section_field(
    mut config: StoreConfig,
    section_id: &str,
    field: SectionField,
) -> StoreConfig {
    let Some(index) = index_of(&config, section_id) else {
        debug!("Ignoring field write on unknown section {section_id}");
        return config;
    };

    let section = config.sections[index].clone();
    match set_field(section, field) {
        Ok(section) => config.sections[index] = section,
        Err(e) => debug!("Ignoring write on section {section_id}: {e}"),
    }
    config
}

fn banners_of<'a>(config: &'a mut StoreConfig, section_id: &str) -> Option<&'a mut Vec<Banner>> {
    config
        .sections
        .iter_mut()
        .find(|s| s.id == section_id)
        .and_then(Section::banners_mut)
}

/// Appends an empty, active banner to a banner section.
#[must_use]
pub fn add_banner(mut config: StoreConfig, section_id: &str) -> StoreConfig {
    let id = next_timestamped_id(
        "banner-",
        config.banners().into_iter().map(|b| b.id.as_str()),
        Utc::now().timestamp_millis(),
    );

    let Some(banners) = banners_of(&mut config, section_id) else {
        debug!("Ignoring banner added to {section_id}: not a banner section");
        return config;
    };
    let position = banners.len() as u32 + 1;
    banners.push(Banner {
        id,
        image_url: String::new(),
        title: None,
        description: None,
        link_url: None,
        position,
        is_active: true,
    });
    config
}

#[must_use]
pub fn update_banner_field(
    mut config: StoreConfig,
    section_id: &str,
    banner_id: &str,
    field: BannerField,
) -> StoreConfig {
    let banner = banners_of(&mut config, section_id)
        .and_then(|banners| banners.iter_mut().find(|b| b.id == banner_id));
    match banner {
        Some(banner) => field.apply(banner),
        None => debug!("Ignoring write on unknown banner {banner_id} in {section_id}"),
    }
    config
}

/// Removes a banner and renumbers the remaining ones in its section.
#[must_use]
pub fn remove_banner(mut config: StoreConfig, section_id: &str, banner_id: &str) -> StoreConfig {
    if let Some(banners) = banners_of(&mut config, section_id) {
        let before = banners.len();
        banners.retain(|b| b.id != banner_id);
        if banners.len() != before {
            renumber_banners(banners);
            return config;
        }
    }
    debug!("Ignoring removal of unknown banner {banner_id} in {section_id}");
    config
}

/// In-memory draft of one store's layout, as held by an editing operator.
#[derive(Debug, Clone)]
pub struct EditorSession {
    draft: StoreConfig,
    dirty: bool,
}

impl EditorSession {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            draft: normalize(config),
            dirty: false,
        }
    }

    /// Opens the store's layout, creating an empty one on first access.
    pub async fn open(configs: &StoreConfigs, store_id: &str) -> Result<Self> {
        let config = configs.open(store_id).await?;
        Ok(Self::new(config))
    }

    pub fn draft(&self) -> &StoreConfig {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Runs one editor operation against the latest draft.
    pub fn apply<F>(&mut self, edit: F) -> &StoreConfig
    where
        F: FnOnce(StoreConfig) -> StoreConfig,
    {
        let next = edit(self.draft.clone());
        if next != self.draft {
            self.draft = next;
            self.dirty = true;
        }
        &self.draft
    }

    /// Persists the draft. On failure the draft and dirty flag are kept so
    /// the save can be retried.
    pub async fn save(&mut self, configs: &StoreConfigs) -> Result<&StoreConfig> {
        match configs.save(&self.draft).await {
            Ok(saved) => {
                info!("Saved layout {} for store {}", saved.id, saved.store_id);
                self.draft = saved;
                self.dirty = false;
                Ok(&self.draft)
            }
            Err(e) => {
                warn!("Failed to save layout {}: {e}", self.draft.id);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::Error;
    use crate::store::{Backend, Latency, MemoryBackend, Repository, seed};
    use crate::types::{DisplayMode, SectionBody};

    fn config_with(ids: &[&str]) -> StoreConfig {
        let sections = ids
            .iter()
            .enumerate()
            .map(|(i, id)| Section {
                id: (*id).to_string(),
                position: i as u32 + 1,
                is_active: true,
                body: SectionBody::empty(SectionKind::Grid, None),
            })
            .collect();
        StoreConfig {
            id: "config1".to_string(),
            store_id: "store1".to_string(),
            sections,
            last_modified: Utc::now(),
        }
    }

    fn order(config: &StoreConfig) -> Vec<(&str, u32)> {
        config
            .sections
            .iter()
            .map(|s| (s.id.as_str(), s.position))
            .collect()
    }

    fn seeded() -> StoreConfig {
        seed::store_configs().remove(0)
    }

    #[test]
    fn test_reorder_moves_source_to_target_slot() {
        let config = reorder(config_with(&["A", "B", "C", "D"]), "D", "B");
        assert_eq!(order(&config), vec![("A", 1), ("D", 2), ("B", 3), ("C", 4)]);

        let config = reorder(config_with(&["A", "B", "C", "D"]), "A", "C");
        assert_eq!(order(&config), vec![("B", 1), ("C", 2), ("A", 3), ("D", 4)]);
    }

    #[test]
    fn test_reorder_no_ops() {
        let original = config_with(&["A", "B", "C"]);
        assert_eq!(reorder(original.clone(), "B", "B"), original);
        assert_eq!(reorder(original.clone(), "B", "missing"), original);
        assert_eq!(reorder(original.clone(), "missing", "B"), original);
    }

    #[test]
    fn test_positions_stay_dense_across_edits() {
        let mut config = config_with(&["A", "B"]);
        let steps: Vec<Box<dyn Fn(StoreConfig) -> StoreConfig>> = vec![
            Box::new(|c| add_section(c, SectionKind::Banner)),
            Box::new(|c| add_section(c, SectionKind::Featured)),
            Box::new(|c| remove_section(c, "A")),
            Box::new(|c| {
                let last = c.sections[c.sections.len() - 1].id.clone();
                reorder(c, &last, "B")
            }),
            Box::new(|c| remove_section(c, "nope")),
            Box::new(|c| add_section(c, SectionKind::Carousel)),
            Box::new(|c| remove_section(c, "B")),
        ];

        for step in steps {
            config = step(config);
            assert!(config.has_dense_positions(), "{:?}", order(&config));
            let mut ids: Vec<&str> = config.sections.iter().map(|s| s.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), config.sections.len());
        }
        assert_eq!(config.sections.len(), 3);
    }

    #[test]
    fn test_remove_section_preserves_order() {
        let config = remove_section(config_with(&["A", "B", "C", "D"]), "B");
        assert_eq!(order(&config), vec![("A", 1), ("C", 2), ("D", 3)]);
    }

    #[test]
    fn test_add_section_appends() {
        let config = add_section(config_with(&["A"]), SectionKind::Carousel);
        let added = &config.sections[1];
        assert_eq!(added.position, 2);
        assert_eq!(added.kind(), SectionKind::Carousel);
        assert_eq!(added.title(), Some("Nouvelle section carousel"));
    }

    #[test]
    fn test_normalize_sorts_by_position_then_id() {
        let mut config = config_with(&["C", "A", "B"]);
        config.sections[0].position = 5;
        config.sections[1].position = 2;
        config.sections[2].position = 2;

        let config = normalize(config);
        assert_eq!(order(&config), vec![("A", 1), ("B", 2), ("C", 3)]);
    }

    #[test]
    fn test_variant_purity_under_field_writes() {
        let config = seeded();
        let config = set_section_field(
            config,
            "section1",
            SectionField::ItemIds(vec!["1".to_string()]),
        );
        let config = set_section_field(config, "section2", SectionField::Banners(Vec::new()));
        let config = set_section_field(
            config,
            "section3",
            SectionField::DisplayMode(DisplayMode::Expanded),
        );

        assert!(config.section("section1").unwrap().item_ids().is_empty());
        assert!(config.section("section2").unwrap().banners().is_none());
        assert_eq!(
            config.section("section3").unwrap().listing().unwrap().display_mode,
            DisplayMode::Expanded
        );
        for section in &config.sections {
            match section.kind() {
                SectionKind::Banner => assert!(section.item_ids().is_empty()),
                _ => assert!(section.banners().is_none()),
            }
        }
    }

    #[test]
    fn test_banner_edits_stay_inside_their_section() {
        let original = seeded();
        let config = add_banner(original.clone(), "section4");
        let banners = config.section("section4").unwrap().banners().unwrap();
        assert_eq!(banners.len(), 3);
        assert_eq!(banners[2].position, 3);
        assert!(banners[2].image_url.is_empty());
        assert!(banners[2].id.starts_with("banner-"));
        assert_eq!(config.section("section4").unwrap().position, 4);
        assert_eq!(config.sections[..3], original.sections[..3]);

        let config = update_banner_field(
            config,
            "section4",
            "banner2",
            BannerField::Title(Some("Soldes".to_string())),
        );
        let config = remove_banner(config, "section4", "banner3");
        let banners = config.section("section4").unwrap().banners().unwrap();
        assert_eq!(banners.len(), 2);
        assert_eq!(banners[0].title.as_deref(), Some("Soldes"));
        assert_eq!(banners[1].position, 2);
    }

    #[test]
    fn test_banner_ops_ignore_listing_sections() {
        let original = seeded();
        assert_eq!(add_banner(original.clone(), "section2"), original);
        assert_eq!(
            update_banner_field(original.clone(), "section1", "banner2", BannerField::IsActive(false)),
            original
        );
        assert_eq!(remove_banner(original.clone(), "section1", "banner3"), original);
    }

    #[test]
    fn test_session_tracks_dirty_state() {
        let mut session = EditorSession::new(seeded());
        assert!(!session.is_dirty());

        session.apply(|c| reorder(c, "section1", "section1"));
        assert!(!session.is_dirty());

        session.apply(|c| reorder(c, "section4", "section1"));
        assert!(session.is_dirty());
        assert_eq!(session.draft().sections[0].id, "section4");
    }

    #[tokio::test]
    async fn test_session_save_persists_draft() {
        let backend = Arc::new(MemoryBackend::new());
        let configs = StoreConfigs::new(Repository::new(backend, Latency::NONE));

        let mut session = EditorSession::open(&configs, "store1").await.unwrap();
        session.apply(|c| remove_section(c, "section1"));
        session.save(&configs).await.unwrap();
        assert!(!session.is_dirty());

        let stored = configs.fetch("store1").await.unwrap();
        assert_eq!(stored.sections.len(), 3);
        assert!(stored.has_dense_positions());
    }

    struct ReadOnlyBackend(MemoryBackend);

    impl Backend for ReadOnlyBackend {
        fn initialize(&self) -> Result<()> {
            Ok(())
        }

        fn read(&self, kind: &str) -> Result<Option<String>> {
            self.0.read(kind)
        }

        fn write(&self, _kind: &str, _document: &str) -> Result<()> {
            Err(Error::Io(std::io::Error::other("read-only")))
        }

        fn remove(&self, _kind: &str) -> Result<bool> {
            Err(Error::Io(std::io::Error::other("read-only")))
        }
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let configs = StoreConfigs::new(Repository::new(
            Arc::new(ReadOnlyBackend(MemoryBackend::new())),
            Latency::NONE,
        ));

        let mut session = EditorSession::new(seeded());
        session.apply(|c| add_section(c, SectionKind::Grid));
        let draft = session.draft().clone();

        let err = session.save(&configs).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(session.is_dirty());
        assert_eq!(session.draft(), &draft);
    }
}
