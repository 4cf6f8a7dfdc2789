//! Distance metric with toroidal correction
//!
//! Distances between a query and a site are Euclidean. On a wrapping grid,
//! each axis is first shifted by the domain size when the naive difference
//! exceeds half the domain, which gives the shortest path on the torus.

use glam::IVec2;

use crate::grid::VoronoiGrid;

/// Offsets of the 3×3 block around a home cell, x outer and y inner
pub(crate) const BLOCK_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 0),
    IVec2::new(0, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
];

/// Index of the home cell within [`BLOCK_OFFSETS`]
pub(crate) const HOME_SLOT: usize = 4;

/// Shift `target` by ±`domain_size` if that brings it within half the domain
/// of `query`
#[inline]
fn wrap_axis(query: i32, target: i32, domain_size: i32) -> i32 {
    if (target - query).abs() <= domain_size / 2 {
        target
    } else if target > query {
        target - domain_size
    } else {
        target + domain_size
    }
}

impl<T> VoronoiGrid<T> {
    /// Distance from a query point to the site of a cell
    ///
    /// Returns `None` when the cell does not exist (wrap disabled and the
    /// indices are out of range). That is not an error: callers treat it as
    /// "no site contributes here".
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    /// use glam::IVec2;
    ///
    /// let mut grid = VoronoiGrid::<()>::new(100, 10, false).unwrap();
    /// grid.populate_with_positions(|cell| cell * 10 + IVec2::splat(5)).unwrap();
    ///
    /// assert_eq!(grid.distance(IVec2::new(5, 5), 1, 0), Some(10.0));
    /// assert_eq!(grid.distance(IVec2::new(5, 5), -1, 0), None);
    /// ```
    pub fn distance(&self, query: IVec2, cell_x: i32, cell_y: i32) -> Option<f32> {
        self.site_distance(query, IVec2::new(cell_x, cell_y))
            .map(|(_, distance)| distance)
    }

    /// Site ID and distance for a cell, after wraparound
    pub(crate) fn site_distance(&self, query: IVec2, cell: IVec2) -> Option<(usize, f32)> {
        let id = self.cell_index(cell)?;
        Some((id, self.point_distance(query, self.sites[id].position)))
    }

    /// Distance between two arbitrary points under this grid's topology
    ///
    /// On a wrapping grid of size `D`, `(0, y)` and `(D - 1, y)` are 1 apart.
    pub fn point_distance(&self, a: IVec2, b: IVec2) -> f32 {
        let b = if self.wrap {
            IVec2::new(
                wrap_axis(a.x, b.x, self.domain_size),
                wrap_axis(a.y, b.y, self.domain_size),
            )
        } else {
            b
        };

        (a - b).as_vec2().length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered(domain_size: i32, sqrt_nodes: i32, wrap: bool) -> VoronoiGrid<()> {
        let mut grid = VoronoiGrid::new(domain_size, sqrt_nodes, wrap).unwrap();
        let scale = grid.cell_scale();
        grid.populate_with_positions(|cell| cell * scale + IVec2::splat(scale / 2))
            .unwrap();
        grid
    }

    #[test]
    fn test_wrap_axis() {
        assert_eq!(wrap_axis(0, 99, 100), -1);
        assert_eq!(wrap_axis(99, 0, 100), 100);
        assert_eq!(wrap_axis(10, 60, 100), 60);
        assert_eq!(wrap_axis(10, 61, 100), -39);
    }

    #[test]
    fn test_toroidal_point_distance() {
        for domain_size in [10, 100, 500] {
            let grid = VoronoiGrid::<()>::new(domain_size, 5, true).unwrap();
            let a = IVec2::new(0, 3);
            let b = IVec2::new(domain_size - 1, 3);
            assert_eq!(grid.point_distance(a, b), 1.0);
            assert_eq!(grid.point_distance(b, a), 1.0);
        }

        let planar = VoronoiGrid::<()>::new(100, 5, false).unwrap();
        assert_eq!(planar.point_distance(IVec2::new(0, 3), IVec2::new(99, 3)), 99.0);
    }

    #[test]
    fn test_toroidal_corner_distance() {
        let grid = VoronoiGrid::<()>::new(100, 10, true).unwrap();
        let d = grid.point_distance(IVec2::new(1, 1), IVec2::new(98, 98));
        assert!((d - 18.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_distance_across_the_seam() {
        let grid = centered(100, 10, true);
        // Site of cell (9, 0) is at (95, 5); from (0, 5) it is 5 away around the edge
        assert_eq!(grid.distance(IVec2::new(0, 5), -1, 0), Some(5.0));
        assert_eq!(grid.distance(IVec2::new(0, 5), 9, 0), Some(5.0));
    }

    #[test]
    fn test_distance_none_outside_non_wrapping_grid() {
        let grid = centered(100, 10, false);
        assert_eq!(grid.distance(IVec2::new(0, 5), -1, 0), None);
        assert_eq!(grid.distance(IVec2::new(95, 95), 10, 9), None);
        assert_eq!(grid.distance(IVec2::new(0, 0), 0, 0), Some(50.0_f32.sqrt()));
    }

    #[test]
    fn test_distance_none_when_unpopulated() {
        let grid = VoronoiGrid::<()>::new(100, 10, true).unwrap();
        assert_eq!(grid.distance(IVec2::new(5, 5), 0, 0), None);
    }

    #[test]
    fn test_block_offsets_home_slot() {
        assert_eq!(BLOCK_OFFSETS[HOME_SLOT], IVec2::ZERO);
    }
}
