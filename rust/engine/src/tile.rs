use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of one physical tile. Unique for the whole session.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity shared by the Organ tile and the Function tile of one pair.
/// Scoped to a level, so the same catalog item yields a fresh key in every deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PairKey {
    /// Index of the catalog item shown by both tiles
    pub item: usize,
    /// Level the deck was generated for
    pub level: u32,
    /// Position of the item in the level's working subset
    pub occurrence: usize,
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}@L{}", self.occurrence, self.level)
    }
}

/// Which side of a pair a tile shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// The organ picture/name
    Organ,
    /// The description of what the organ does
    Function,
}

impl Face {
    pub fn opposite(self) -> Face {
        match self {
            Face::Organ => Face::Function,
            Face::Function => Face::Organ,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Selected,
    Matched,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub pair_key: PairKey,
    pub face: Face,
    pub state: TileState,
}

impl Tile {
    pub fn new(id: TileId, pair_key: PairKey, face: Face) -> Self {
        Self {
            id,
            pair_key,
            face,
            state: TileState::Hidden,
        }
    }

    /// Catalog index of the item this tile displays.
    pub fn item(&self) -> usize {
        self.pair_key.item
    }

    pub fn is_hidden(&self) -> bool {
        self.state == TileState::Hidden
    }

    pub fn is_matched(&self) -> bool {
        self.state == TileState::Matched
    }
}
