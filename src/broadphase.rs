//! Spatial-hash broad phase: uniform grid pruning of collision pairs.

use crate::body::RigidBody;
use crate::float::Float;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec as AllocVec;

/// Uniform-grid spatial hash over body AABBs.
///
/// Rebuilt from scratch every tick; body counts are small enough that the
/// O(n) rebuild dominates any incremental scheme. Cell size should be on
/// the order of typical body size to keep per-cell occupancy bounded.
pub struct SpatialHash<F: Float> {
    cell_size: F,
    grid: BTreeMap<(i64, i64), AllocVec<usize>>,
    statics: AllocVec<bool>,
}

impl<F: Float> SpatialHash<F> {
    pub fn new(cell_size: F) -> Self {
        SpatialHash {
            cell_size,
            grid: BTreeMap::new(),
            statics: AllocVec::new(),
        }
    }

    /// Remove all bodies from the hash.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.statics.clear();
    }

    /// Clear and re-insert every body, bucketing each into all grid cells
    /// its AABB spans.
    pub fn rebuild(&mut self, bodies: &[RigidBody<F>]) {
        self.clear();
        for (index, body) in bodies.iter().enumerate() {
            self.statics.push(body.is_static);

            let aabb = body.aabb();
            let min_x = (aabb.min.x / self.cell_size).floor().to_i64();
            let max_x = (aabb.max.x / self.cell_size).floor().to_i64();
            let min_y = (aabb.min.y / self.cell_size).floor().to_i64();
            let max_y = (aabb.max.y / self.cell_size).floor().to_i64();

            for cx in min_x..=max_x {
                for cy in min_y..=max_y {
                    self.grid.entry((cx, cy)).or_default().push(index);
                }
            }
        }
    }

    /// Candidate collision pairs: every unordered pair sharing at least
    /// one cell, deduplicated, excluding static-static pairs. Output is
    /// sorted by index pair, so iteration order is deterministic.
    pub fn potential_pairs(&self) -> AllocVec<(usize, usize)> {
        let mut pairs = BTreeSet::new();

        for occupants in self.grid.values() {
            if occupants.len() < 2 {
                continue;
            }
            for i in 0..occupants.len() {
                for j in (i + 1)..occupants.len() {
                    let (a, b) = (occupants[i], occupants[j]);
                    if self.statics[a] && self.statics[b] {
                        continue;
                    }
                    pairs.insert(if a < b { (a, b) } else { (b, a) });
                }
            }
        }

        pairs.into_iter().collect()
    }

    /// Number of occupied grid cells.
    pub fn occupied_cells(&self) -> usize {
        self.grid.len()
    }
}
