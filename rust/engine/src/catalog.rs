use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::GameError;

/// A base item of the game: an organ together with its function.
/// Each item produces one Organ tile and one Function tile per occurrence in a deck.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable identity, independent of level
    pub id: String,
    /// Text shown on the Organ tile
    pub name: String,
    /// Text shown on the Function tile
    pub function: String,
}

impl CatalogItem {
    pub fn new(id: &str, name: &str, function: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            function: function.to_string(),
        }
    }
}

/// Immutable, validated list of base items consumed by deck generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, GameError> {
        if items.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(GameError::DuplicateCatalogItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: default_items(),
        }
    }
}

/// The built-in catalog of reproductive-system organs.
pub fn default_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(
            "testis",
            "Testis",
            "Menghasilkan sperma dan hormon testosteron",
        ),
        CatalogItem::new(
            "epididirmis",
            "Epididirmis",
            "Tempat pematangan dan penyimpanan sperma",
        ),
        CatalogItem::new("skrotum", "Skrotum", "Melindungi testis dan mengatur suhu"),
        CatalogItem::new(
            "tubulus",
            "Tubulus Seminiferus",
            "Tempat pembentukan dan produksi sperma",
        ),
        CatalogItem::new(
            "pampiniform",
            "Pampiniform Plexus",
            "Mengatur suhu testis melalui aliran darah",
        ),
        CatalogItem::new(
            "penis",
            "Penis",
            "Organ kopulatori dan saluran pengeluaran urin",
        ),
        CatalogItem::new(
            "prostat",
            "Kelenjar Prostat",
            "Menghasilkan cairan prostat untuk semen",
        ),
        CatalogItem::new(
            "glandula_bulbo",
            "Glandula Bulbourethralis",
            "Menghasilkan cairan pre-ejakulasi",
        ),
        CatalogItem::new(
            "duktus_ejaculatorius",
            "Duktus Ejaculatorius",
            "Mengangkut semen ke uretra",
        ),
        CatalogItem::new("uretra", "Uretra", "Saluran kemih dan reproduksi"),
        CatalogItem::new(
            "ovarium",
            "Ovarium dan Tuba Uterine",
            "Menghasilkan sel telur dan mengangkut ovum",
        ),
        CatalogItem::new("vagina", "Vagina", "Reseptor semen dan jalan lahir"),
        CatalogItem::new(
            "klitoris",
            "Klitoris",
            "Organ sensorik dengan 8000 ujung saraf",
        ),
        CatalogItem::new(
            "glandula_vestibular",
            "Glandula Vestibularis Mayor",
            "Menghasilkan lubrikasi vagina",
        ),
        CatalogItem::new(
            "hymen_introitus",
            "Hymen dan Introitus Vagina",
            "Struktur anatomi vestibular",
        ),
        CatalogItem::new(
            "perineum",
            "Perineum",
            "Dukungan organ reproduksi dan ekskresi",
        ),
        CatalogItem::new(
            "complete_skin",
            "Sistem Reproduksi dengan Kulit",
            "Tampilan eksternal sistem reproduksi",
        ),
        CatalogItem::new(
            "complete_system",
            "Sistem Reproduksi Lengkap",
            "Integrasi seluruh sistem reproduksi",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_unique_ids() {
        let items = default_items();
        assert_eq!(items.len(), 18);
        assert!(Catalog::new(items).is_ok());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Catalog::new(vec![]), Err(GameError::EmptyCatalog));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let items = vec![
            CatalogItem::new("a", "A", "first"),
            CatalogItem::new("a", "A again", "second"),
        ];
        assert_eq!(
            Catalog::new(items),
            Err(GameError::DuplicateCatalogItem("a".into()))
        );
    }
}
