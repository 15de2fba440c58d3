//! Tile kinds, candidate sets and the directional compatibility table
//!
//! The eight tile kinds form a gradient from deep water to dense forest.
//! Candidate sets are a single byte viewed as a bitset, so every set operation
//! is branch-free and iteration always runs in ascending ordinal order.

use bitvec::prelude::*;
use std::fmt;

/// Terrain tile kinds ordered from deep water to dense forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TileKind {
    /// Open ocean
    DeepWater = 0,
    /// Ordinary water
    Water = 1,
    /// Shallow water along a shore
    CoastalWater = 2,
    /// Tidal sand
    WetSand = 3,
    /// Dry beach sand
    Sand = 4,
    /// Grassland
    Grass = 5,
    /// Scrub and bushes
    Bushes = 6,
    /// Dense forest
    Forest = 7,
}

impl TileKind {
    /// Number of tile kinds
    pub const COUNT: usize = 8;

    /// Every tile kind in ascending ordinal order
    pub const ALL: [Self; Self::COUNT] = [
        Self::DeepWater,
        Self::Water,
        Self::CoastalWater,
        Self::WetSand,
        Self::Sand,
        Self::Grass,
        Self::Bushes,
        Self::Forest,
    ];

    /// Ordinal used in exported tile matrices
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a tile kind by ordinal
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Look up a tile kind from a signed value, as found in painted tile matrices
    pub fn from_signed(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_ordinal)
    }

    /// Human readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::DeepWater => "deep water",
            Self::Water => "water",
            Self::CoastalWater => "coastal water",
            Self::WetSand => "wet sand",
            Self::Sand => "sand",
            Self::Grass => "grass",
            Self::Bushes => "bushes",
            Self::Forest => "forest",
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of candidate tile kinds packed into one byte
///
/// Bit `i` is set when the tile with ordinal `i` is a candidate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileSet {
    bits: u8,
}

impl TileSet {
    /// Set with no candidates
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Set containing every tile kind
    pub const fn full() -> Self {
        Self { bits: u8::MAX }
    }

    /// Set containing exactly one tile kind
    pub const fn single(tile: TileKind) -> Self {
        Self {
            bits: 1 << tile.ordinal(),
        }
    }

    /// Build a set from a list of tile kinds
    pub fn from_kinds(tiles: &[TileKind]) -> Self {
        let mut set = Self::empty();
        for &tile in tiles {
            set.insert(tile);
        }
        set
    }

    /// Deep water, water and coastal water
    pub const fn water_family() -> Self {
        Self {
            bits: (1 << TileKind::DeepWater as u8)
                | (1 << TileKind::Water as u8)
                | (1 << TileKind::CoastalWater as u8),
        }
    }

    /// Sand, grass, bushes and forest
    pub const fn land_family() -> Self {
        Self {
            bits: (1 << TileKind::Sand as u8)
                | (1 << TileKind::Grass as u8)
                | (1 << TileKind::Bushes as u8)
                | (1 << TileKind::Forest as u8),
        }
    }

    /// Add a tile kind
    pub fn insert(&mut self, tile: TileKind) {
        self.bits
            .view_bits_mut::<Lsb0>()
            .set(tile.ordinal() as usize, true);
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileKind) -> bool {
        self.bits.view_bits::<Lsb0>().get(tile.ordinal() as usize).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub const fn intersect_with(&mut self, other: Self) {
        self.bits &= other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Test if no tiles are present
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.view_bits::<Lsb0>().count_ones()
    }

    /// Test whether every member of this set is also in `other`
    pub const fn is_subset_of(&self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Iterate over members in ascending ordinal order
    pub fn iter(&self) -> impl Iterator<Item = TileKind> + '_ {
        self.bits
            .view_bits::<Lsb0>()
            .iter_ones()
            .filter_map(|index| TileKind::ALL.get(index).copied())
    }

    /// Members as a sorted vector
    pub fn to_vec(&self) -> Vec<TileKind> {
        self.iter().collect()
    }

    /// The `index`-th member in ascending ordinal order
    pub fn nth(&self, index: usize) -> Option<TileKind> {
        self.iter().nth(index)
    }

    /// Raw bit pattern
    pub const fn bits(&self) -> u8 {
        self.bits
    }
}

impl fmt::Debug for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileSet({} tiles: {:?})", self.count(), self.to_vec())
    }
}

impl FromIterator<TileKind> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileKind>>(iter: I) -> Self {
        let mut set = Self::empty();
        for tile in iter {
            set.insert(tile);
        }
        set
    }
}

/// Allowed orthogonal neighbours for each tile kind
///
/// Entries are declared per source tile and are not closed under symmetry:
/// `allowed(a, b)` constrains what may sit next to an already placed `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityTable {
    entries: [TileSet; TileKind::COUNT],
}

impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::terrain_gradient()
    }
}

impl CompatibilityTable {
    /// Build a table from explicit per-tile entries, indexed by ordinal
    pub const fn from_entries(entries: [TileSet; TileKind::COUNT]) -> Self {
        Self { entries }
    }

    /// Standard terrain table: each tile borders tiles within two gradient steps
    ///
    /// Grass stops short of forest while forest tolerates grass next to it,
    /// so the relation is directional.
    pub fn terrain_gradient() -> Self {
        use TileKind::{Bushes, CoastalWater, DeepWater, Forest, Grass, Sand, Water, WetSand};

        Self::from_entries([
            TileSet::from_kinds(&[DeepWater, Water, CoastalWater]),
            TileSet::from_kinds(&[DeepWater, Water, CoastalWater, WetSand]),
            TileSet::from_kinds(&[DeepWater, Water, CoastalWater, WetSand, Sand]),
            TileSet::from_kinds(&[Water, CoastalWater, WetSand, Sand, Grass]),
            TileSet::from_kinds(&[CoastalWater, WetSand, Sand, Grass, Bushes]),
            TileSet::from_kinds(&[WetSand, Sand, Grass, Bushes]),
            TileSet::from_kinds(&[Sand, Grass, Bushes, Forest]),
            TileSet::from_kinds(&[Grass, Bushes, Forest]),
        ])
    }

    /// Candidates permitted next to a placed `source` tile
    pub fn entry(&self, source: TileKind) -> TileSet {
        self.entries
            .get(source.ordinal() as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Test whether `candidate` may sit next to a placed `source` tile
    pub fn allowed(&self, source: TileKind, candidate: TileKind) -> bool {
        self.entry(source).contains(candidate)
    }

    /// Test whether the relation holds in both directions for every pair
    pub fn is_symmetric(&self) -> bool {
        TileKind::ALL.iter().all(|&a| {
            TileKind::ALL
                .iter()
                .all(|&b| self.allowed(a, b) == self.allowed(b, a))
        })
    }
}
