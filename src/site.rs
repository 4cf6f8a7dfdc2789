//! Site Structure
//!
//! Represents one generator point of the approximate Voronoi diagram.

use glam::IVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single site of the grid
///
/// Each site represents one region of the domain with:
/// - A stable ID (its index in the grid's x-major site array)
/// - The coarse cell coordinate that indexes it
/// - A jittered position in global (pixel) coordinates
/// - An opaque payload owned by the caller
/// - Neighbor connectivity, filled in by
///   [`VoronoiGrid::build_neighbors`](crate::VoronoiGrid::build_neighbors)
///
/// Neighbors are site IDs into the same grid, never references, so the
/// adjacency relation carries no ownership. Only the payload is writable
/// from outside the crate; geometry and connectivity belong to the grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Site<T> {
    /// Index of this site in the grid (`cell.x * sqrt_nodes + cell.y`)
    pub(crate) id: usize,

    /// Grid-cell coordinate of this site
    pub(crate) cell: IVec2,

    /// Position in global coordinates, always inside the cell's pixel bounds
    pub(crate) position: IVec2,

    /// Caller-defined data attached to this site
    pub payload: T,

    /// IDs of adjacent sites, sorted ascending
    ///
    /// Empty until the neighbor graph is built.
    pub(crate) neighbors: Vec<usize>,
}

impl<T> Site<T> {
    pub(crate) fn new(id: usize, cell: IVec2, position: IVec2, payload: T) -> Self {
        Self {
            id,
            cell,
            position,
            payload,
            neighbors: Vec::new(),
        }
    }

    /// Index of this site in the grid
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Grid-cell coordinate of this site
    #[inline]
    pub fn cell(&self) -> IVec2 {
        self.cell
    }

    /// Position in global coordinates
    #[inline]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// IDs of adjacent sites, sorted ascending
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Get the number of neighboring sites
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this site is a neighbor of another site
    #[inline]
    pub fn is_neighbor_of(&self, other_site_id: usize) -> bool {
        self.neighbors.binary_search(&other_site_id).is_ok()
    }

    /// Planar squared distance from this site to a point
    ///
    /// No toroidal correction; see [`VoronoiGrid::point_distance`](crate::VoronoiGrid::point_distance)
    /// for the wrap-aware metric.
    #[inline]
    pub fn distance_squared_to(&self, point: IVec2) -> i64 {
        let dx = (self.position.x - point.x) as i64;
        let dy = (self.position.y - point.y) as i64;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_creation() {
        let mut site = Site::new(3, IVec2::new(1, 0), IVec2::new(14, 7), "plains");
        site.neighbors = vec![1, 2, 4];

        assert_eq!(site.id(), 3);
        assert_eq!(site.cell(), IVec2::new(1, 0));
        assert_eq!(site.position(), IVec2::new(14, 7));
        assert_eq!(site.neighbors(), &[1, 2, 4]);
        assert_eq!(site.neighbor_count(), 3);
        assert!(site.is_neighbor_of(2));
        assert!(!site.is_neighbor_of(99));
        assert_eq!(site.payload, "plains");
    }

    #[test]
    fn test_distance_squared_to() {
        let site = Site::new(0, IVec2::ZERO, IVec2::new(3, 4), ());
        assert_eq!(site.distance_squared_to(IVec2::ZERO), 25);
        assert_eq!(site.distance_squared_to(IVec2::new(3, 4)), 0);
    }
}
