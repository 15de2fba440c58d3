//! Seed configurations that narrow initial cell domains before solving
//!
//! Restrictions never commit a tile. Overlapping restrictions intersect, so
//! a cell can be narrowed to an empty domain here; the solver then reports
//! it as a contradiction on its first selection.

use crate::io::configuration::{ISLAND_RADIUS, TILE_PALETTE};
use crate::io::error::{AlgorithmError, Result, invalid_configuration};
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::{TileKind, TileSet};
use std::collections::HashMap;
use std::path::Path;

/// One positional domain restriction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restriction {
    /// Every cell on the outer edge of the grid
    BorderRing {
        /// Candidates kept on the ring
        allowed: TileSet,
    },
    /// Filled disk around `(width / 2, height / 2)`, membership `dx² + dy² <= radius²`
    CentralDisk {
        /// Disk radius in cells
        radius: usize,
        /// Candidates kept inside the disk
        allowed: TileSet,
    },
    /// A single cell
    Cell {
        /// Restricted position
        position: Position,
        /// Candidates kept at that position
        allowed: TileSet,
    },
    /// Full-size matrix of painted tiles; `None` leaves a cell untouched
    Painted {
        /// Rows of optional tiles, one entry per cell
        tiles: Vec<Vec<Option<TileKind>>>,
    },
}

impl Restriction {
    fn apply(&self, grid: &mut Grid) -> Result<()> {
        let (width, height) = (grid.width(), grid.height());
        match self {
            Self::BorderRing { allowed } => {
                for position in grid.positions() {
                    let Position { x, y } = position;
                    if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                        grid.restrict(position, *allowed)?;
                    }
                }
            }
            Self::CentralDisk { radius, allowed } => {
                let limit = radius.checked_mul(*radius).ok_or_else(|| {
                    invalid_configuration(&format!("disk radius {radius} is too large"))
                })?;
                let (cx, cy) = (width / 2, height / 2);
                for position in grid.positions() {
                    let dx = position.x.abs_diff(cx);
                    let dy = position.y.abs_diff(cy);
                    if dx * dx + dy * dy <= limit {
                        grid.restrict(position, *allowed)?;
                    }
                }
            }
            Self::Cell { position, allowed } => {
                grid.restrict(*position, *allowed)?;
            }
            Self::Painted { tiles } => {
                if tiles.len() != height || tiles.iter().any(|row| row.len() != width) {
                    return Err(invalid_configuration(&format!(
                        "painted tiles do not match the {width}x{height} grid"
                    )));
                }
                for (y, row) in tiles.iter().enumerate() {
                    for (x, tile) in row.iter().enumerate() {
                        if let Some(tile) = tile {
                            grid.restrict(Position::new(x, y), TileSet::single(*tile))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Ordered list of restrictions applied to every fresh attempt grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedConfiguration {
    restrictions: Vec<Restriction>,
}

impl SeedConfiguration {
    /// Configuration with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a restriction
    #[must_use]
    pub fn with(mut self, restriction: Restriction) -> Self {
        self.restrictions.push(restriction);
        self
    }

    /// Restrict the outer ring to water tiles
    #[must_use]
    pub fn with_border_water(self) -> Self {
        self.with(Restriction::BorderRing {
            allowed: TileSet::water_family(),
        })
    }

    /// Restrict a central disk of the standard island radius to land tiles
    #[must_use]
    pub fn with_island(self) -> Self {
        self.with(Restriction::CentralDisk {
            radius: ISLAND_RADIUS,
            allowed: TileSet::land_family(),
        })
    }

    /// Restrictions in application order
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// Whether no restriction is configured
    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty()
    }

    /// Pin painted cells from a matrix where negative values mean "unpainted"
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for values above the largest tile ordinal
    pub fn from_painted(rows: &[Vec<i64>]) -> Result<Self> {
        let tiles = parse_painted(rows)?;
        Ok(Self::new().with(Restriction::Painted { tiles }))
    }

    /// Pin painted cells from a PNG, see [`read_painted_png`]
    ///
    /// # Errors
    ///
    /// Returns an error if the PNG file cannot be loaded
    pub fn from_png(path: &Path) -> Result<Self> {
        let tiles = read_painted_png(path)?;
        Ok(Self::new().with(Restriction::Painted { tiles }))
    }

    /// Narrow the domains of a fresh grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a restriction does not fit the grid
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        for restriction in &self.restrictions {
            restriction.apply(grid)?;
        }
        Ok(())
    }
}

/// Decode painted tile ordinals; negative values leave a cell unpainted
///
/// # Errors
///
/// Returns `InvalidConfiguration` for values above the largest tile ordinal
pub fn parse_painted(rows: &[Vec<i64>]) -> Result<Vec<Vec<Option<TileKind>>>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|&value| match value {
                    v if v < 0 => Ok(None),
                    v => TileKind::from_signed(v).map(Some).ok_or_else(|| {
                        invalid_configuration(&format!("painted tile {v} is not a tile kind"))
                    }),
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

/// Read a painted PNG where each pixel matching a palette colour paints that tile
///
/// Pixels with any other colour are left unpainted.
///
/// # Errors
///
/// Returns `ImageLoad` if the PNG file cannot be loaded
pub fn read_painted_png(path: &Path) -> Result<Vec<Vec<Option<TileKind>>>> {
    let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba_img = img.to_rgba8();

    let color_to_tile: HashMap<[u8; 4], TileKind> = TILE_PALETTE
        .iter()
        .zip(TileKind::ALL)
        .map(|(&color, tile)| (color, tile))
        .collect();

    Ok(rgba_img
        .rows()
        .map(|row| {
            row.map(|pixel| color_to_tile.get(&pixel.0).copied())
                .collect::<Vec<_>>()
        })
        .collect())
}
