//! Tile distribution statistics over exported tile matrices

use crate::spatial::grid::TileMatrix;
use ndarray::Array2;
use std::collections::{BTreeMap, VecDeque};

const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Whether every cell holds the same tile; an empty matrix counts as uniform
pub fn is_uniform(grid: &TileMatrix) -> bool {
    let mut values = grid.iter();
    values
        .next()
        .is_none_or(|first| values.all(|value| value == first))
}

fn tile_counts(grid: &TileMatrix) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for &tile in grid {
        *counts.entry(tile).or_insert(0) += 1;
    }
    counts
}

/// Relative frequency of every tile present in the matrix
pub fn tile_frequencies(grid: &TileMatrix) -> BTreeMap<u8, f64> {
    let total = grid.len() as f64;
    tile_counts(grid)
        .into_iter()
        .map(|(tile, count)| (tile, count as f64 / total))
        .collect()
}

/// Shannon entropy of the tile distribution in bits
pub fn tile_entropy(grid: &TileMatrix) -> f64 {
    tile_frequencies(grid)
        .values()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Counts of ordered 4-adjacent tile pairs
///
/// `adjacency[a][b]` is the number of times a cell holding `a` has an
/// orthogonal neighbour holding `b`. Every unordered pair is therefore
/// counted once from each side.
pub fn adjacency_matrix(grid: &TileMatrix) -> BTreeMap<u8, BTreeMap<u8, usize>> {
    let mut adjacency: BTreeMap<u8, BTreeMap<u8, usize>> = BTreeMap::new();

    for ((y, x), &tile) in grid.indexed_iter() {
        let row = adjacency.entry(tile).or_default();
        for neighbor in orthogonal_values(grid, x, y) {
            *row.entry(neighbor).or_insert(0) += 1;
        }
    }

    adjacency
}

/// Sizes of all 4-connected same-tile clusters in row-major discovery order
pub fn cluster_sizes(grid: &TileMatrix) -> Vec<usize> {
    let mut seen = Array2::from_elem(grid.dim(), false);
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    for ((y, x), &tile) in grid.indexed_iter() {
        if seen.get([y, x]).copied().unwrap_or(true) {
            continue;
        }
        if let Some(flag) = seen.get_mut([y, x]) {
            *flag = true;
        }
        queue.push_back((x, y));
        let mut size = 0;

        while let Some((cx, cy)) = queue.pop_front() {
            size += 1;
            for (nx, ny) in orthogonal_positions(grid, cx, cy) {
                if grid.get([ny, nx]) != Some(&tile) {
                    continue;
                }
                if let Some(flag) = seen.get_mut([ny, nx])
                    && !*flag
                {
                    *flag = true;
                    queue.push_back((nx, ny));
                }
            }
        }

        sizes.push(size);
    }

    sizes
}

fn orthogonal_positions(
    grid: &TileMatrix,
    x: usize,
    y: usize,
) -> impl Iterator<Item = (usize, usize)> + use<> {
    let (height, width) = grid.dim();
    ORTHOGONAL.into_iter().filter_map(move |(dx, dy)| {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some((nx, ny))
    })
}

fn orthogonal_values(grid: &TileMatrix, x: usize, y: usize) -> impl Iterator<Item = u8> + '_ {
    orthogonal_positions(grid, x, y).filter_map(|(nx, ny)| grid.get([ny, nx]).copied())
}
