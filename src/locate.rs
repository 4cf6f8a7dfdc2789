//! Nearest-site lookup
//!
//! A query only inspects the 3×3 block of cells around its home cell. That
//! is exact whenever the true nearest site lies within one cell of the home
//! cell, which holds for moderately jittered grids; beyond that radius the
//! answer is an accepted approximation.

use glam::IVec2;

use crate::grid::VoronoiGrid;
use crate::metric::BLOCK_OFFSETS;
use crate::site::Site;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

impl<T> VoronoiGrid<T> {
    /// Find the site closest to a global point
    ///
    /// Returns `None` only when none of the nine candidate cells exist, i.e.
    /// the query is far outside a non-wrapping domain or the grid is not
    /// populated yet. Ties keep the first candidate in block order.
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
    /// let site = grid.locate(IVec2::new(5, 5)).unwrap();
    /// assert_eq!(site.cell(), IVec2::new(0, 0));
    /// ```
    pub fn locate(&self, query: IVec2) -> Option<&Site<T>> {
        self.locate_id(query).map(|id| &self.sites[id])
    }

    /// ID of the site closest to a global point
    pub fn locate_id(&self, query: IVec2) -> Option<usize> {
        let home = self.cell_coord_of(query);

        let mut closest = None;
        let mut closest_distance = f32::MAX;

        for offset in BLOCK_OFFSETS {
            if let Some((id, distance)) = self.site_distance(query, home + offset) {
                if distance < closest_distance {
                    closest_distance = distance;
                    closest = Some(id);
                }
            }
        }

        closest
    }

    /// Payload of the site closest to a global point
    #[inline]
    pub fn payload_at(&self, query: IVec2) -> Option<&T> {
        self.locate(query).map(|site| &site.payload)
    }
}

#[cfg(feature = "spatial-index")]
impl<T> VoronoiGrid<T> {
    /// (Re)build the exact spatial index over the current site positions
    ///
    /// Called by [`generate`](VoronoiGrid::generate); grids populated by hand
    /// need to call it before [`locate_exact`](Self::locate_exact).
    pub fn build_spatial_index(&mut self) {
        let positions: Vec<IVec2> = self.sites.iter().map(|s| s.position).collect();
        self.spatial_index = Some(SpatialIndex::new(&positions, self.domain_size, self.wrap));
    }

    /// ID of the truly nearest site, via the KD-tree
    ///
    /// Returns `None` if the index has not been built. Useful for measuring
    /// how often [`locate`](Self::locate) diverges on heavily jittered grids.
    pub fn locate_exact(&self, query: IVec2) -> Option<usize> {
        self.spatial_index.as_ref()?.find_nearest(query)
    }
}
