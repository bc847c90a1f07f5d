//! Item catalog loaded from the Data Dragon CDN

use crate::error::Result;
use crate::types::Item;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

const VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";
const ITEMS_URL: &str = "https://ddragon.leagueoflegends.com/cdn/{version}/data/en_US/item.json";

/// Catalog load status surfaced to the game layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Wire shape of the Data Dragon item file. Items are keyed by id;
/// the id does not appear inside the entry body.
#[derive(Debug, Deserialize)]
struct ItemsResponse {
    data: HashMap<String, Item>,
}

/// A finite, loaded-once collection of guessable items
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    version: String,
    items: Vec<Item>,
}

impl ItemCatalog {
    /// Fetch the latest catalog version and its item set.
    ///
    /// One-shot; retry policy belongs to the caller. The game layer maps a
    /// failure here to `LoadStatus::Failed` and stays idle.
    pub async fn fetch() -> Result<Self> {
        let client = reqwest::Client::new();

        let versions: Vec<String> = client.get(VERSIONS_URL).send().await?.json().await?;
        let version = versions
            .into_iter()
            .next()
            .ok_or(crate::error::QuizError::NoVersion)?;
        debug!("Latest catalog version: {}", version);

        let url = ITEMS_URL.replace("{version}", &version);
        let response: ItemsResponse = client.get(&url).send().await?.json().await?;

        let mut items: Vec<Item> = response
            .data
            .into_iter()
            .map(|(id, mut item)| {
                item.id = id;
                item
            })
            .filter(is_guessable)
            .collect();
        // HashMap order is arbitrary; keep the list deterministic for a version
        items.sort_by(|a, b| a.id.cmp(&b.id));

        info!("Loaded {} guessable items (version {})", items.len(), version);
        Ok(Self { version, items })
    }

    /// Build a catalog from an already-loaded item set (tests, offline use)
    pub fn from_items(version: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            version: version.into(),
            items,
        }
    }

    /// Catalog data version, e.g. "15.1.1"
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Draw a uniformly random item, or `None` when the catalog is empty
    pub fn pick_random(&self) -> Option<&Item> {
        use rand::Rng;
        if self.items.is_empty() {
            return None;
        }
        let idx = rand::thread_rng().gen_range(0..self.items.len());
        self.items.get(idx)
    }
}

/// Filter out items that make poor quiz targets: cheap components,
/// consumables, and trinkets.
fn is_guessable(item: &Item) -> bool {
    item.gold.purchasable
        && item.gold.total >= 1000
        && !item.description.contains("Consumable")
        && !item.tags.iter().any(|t| t == "Consumable")
        && !item.tags.iter().any(|t| t == "Trinket")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemGold, ItemImage};

    fn item(id: &str, total: u32, purchasable: bool, tags: &[&str]) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {id}"),
            description: "Some effect".to_string(),
            plaintext: String::new(),
            gold: ItemGold {
                base: total / 2,
                total,
                sell: total / 4,
                purchasable,
            },
            image: ItemImage {
                full: format!("{id}.png"),
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn filters_cheap_and_unpurchasable() {
        assert!(is_guessable(&item("3031", 3400, true, &["Damage"])));
        assert!(!is_guessable(&item("1001", 300, true, &["Boots"])));
        assert!(!is_guessable(&item("3070", 1200, false, &["Mana"])));
        assert!(!is_guessable(&item("2003", 1500, true, &["Consumable"])));
        assert!(!is_guessable(&item("3340", 1500, true, &["Trinket"])));
    }

    #[test]
    fn pick_random_empty_yields_none() {
        let catalog = ItemCatalog::from_items("0.0.0", vec![]);
        assert!(catalog.pick_random().is_none());
    }

    #[test]
    fn pick_random_covers_the_set() {
        let catalog = ItemCatalog::from_items(
            "0.0.0",
            vec![
                item("1", 1000, true, &[]),
                item("2", 1000, true, &[]),
                item("3", 1000, true, &[]),
            ],
        );
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(catalog.pick_random().unwrap().id.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn parses_wire_shape_and_fills_ids() {
        let json = r#"{"data":{"3031":{
            "name":"Infinity Edge",
            "description":"Massively enhances critical strikes",
            "plaintext":"Massively enhances critical strikes",
            "gold":{"base":625,"total":3450,"sell":2415,"purchasable":true},
            "image":{"full":"3031.png"},
            "tags":["Damage","CriticalStrike"]
        }}}"#;
        let parsed: ItemsResponse = serde_json::from_str(json).unwrap();
        let (id, entry) = parsed.data.into_iter().next().unwrap();
        assert_eq!(id, "3031");
        assert_eq!(entry.name, "Infinity Edge");
        assert!(entry.id.is_empty());
    }
}
