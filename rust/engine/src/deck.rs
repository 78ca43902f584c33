use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::catalog::Catalog;
use crate::tile::{Face, PairKey, Tile, TileId, TileState};

/// The tiles of one level. Only tile states change after generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    level: u32,
    tiles: Vec<Tile>,
}

impl Deck {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// The other tile carrying the same pair key.
    pub fn counterpart(&self, id: TileId) -> Option<&Tile> {
        let tile = self.get(id)?;
        self.tiles
            .iter()
            .find(|t| t.pair_key == tile.pair_key && t.id != tile.id)
    }

    pub fn hidden(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.is_hidden())
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn matched_pairs(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_matched()).count() / 2
    }

    pub fn is_cleared(&self) -> bool {
        self.matched_pairs() == self.pair_count()
    }

    pub(crate) fn set_state(&mut self, id: TileId, state: TileState) {
        if let Some(tile) = self.tiles.iter_mut().find(|t| t.id == id) {
            tile.state = state;
        }
    }
}

/// Number of pairs a deck for `level` holds: the whole catalog plus up to
/// `max_extra` repeats taken from the front of it.
pub fn working_set_size(catalog_len: usize, level: u32, max_extra: u32) -> usize {
    let extra = level.max(1).saturating_sub(1).min(max_extra) as usize;
    catalog_len + extra.min(catalog_len)
}

/// Builds shuffled decks. Owns the session's random source and tile id counter,
/// so ids never repeat across levels and a seed reproduces every deck.
#[derive(Debug)]
pub struct CardSetGenerator {
    seed: u64,
    rng: ChaCha20Rng,
    next_id: u32,
    max_extra_pairs: u32,
}

impl CardSetGenerator {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            next_id: 0,
            max_extra_pairs: 2,
        }
    }

    pub fn with_max_extra_pairs(mut self, max_extra_pairs: u32) -> Self {
        self.max_extra_pairs = max_extra_pairs;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generate(&mut self, catalog: &Catalog, level: u32) -> Deck {
        let level = level.max(1);
        let pairs = working_set_size(catalog.len(), level, self.max_extra_pairs);
        // extras repeat the front of the catalog
        let items: Vec<usize> = (0..catalog.len())
            .chain(0..pairs - catalog.len())
            .collect();

        let mut tiles = Vec::with_capacity(items.len() * 2);
        for face in [Face::Organ, Face::Function] {
            for (occurrence, &item) in items.iter().enumerate() {
                let key = PairKey {
                    item,
                    level,
                    occurrence,
                };
                tiles.push(Tile::new(self.allocate_id(), key, face));
            }
        }
        tiles.shuffle(&mut self.rng);

        Deck { level, tiles }
    }

    fn allocate_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }
}
