//! Exact nearest-site lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::IVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Translations, in units of the domain size, that cover every toroidal
/// image a query inside the domain can be nearest to
const TILE_OFFSETS: [IVec2; 9] = [
    IVec2::new(0, 0),
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
];

/// Wrapper around KD-tree for exact nearest-site queries
///
/// The grid's own locator only inspects the 3×3 block around a query; this
/// index answers the same question exactly, which makes it a reference for
/// how far the approximation drifts on a given layout.
///
/// On a wrapping domain every site is inserted nine times, once per
/// neighboring tile, so planar KD-tree distances equal torus distances.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f32, usize, 2, 32>>,
    site_count: usize,
}

impl SpatialIndex {
    /// Build spatial index from site positions
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::SpatialIndex;
    /// use glam::IVec2;
    ///
    /// let positions = vec![IVec2::new(2, 2), IVec2::new(8, 2), IVec2::new(5, 8)];
    ///
    /// let index = SpatialIndex::new(&positions, 10, false);
    /// assert_eq!(index.find_nearest(IVec2::new(7, 3)), Some(1));
    /// ```
    pub fn new(positions: &[IVec2], domain_size: i32, wrap: bool) -> Self {
        if positions.is_empty() {
            return Self {
                tree: None,
                site_count: 0,
            };
        }

        let offsets: &[IVec2] = if wrap { &TILE_OFFSETS } else { &TILE_OFFSETS[..1] };

        let points: Vec<[f32; 2]> = offsets
            .iter()
            .flat_map(|&offset| {
                positions.iter().map(move |&p| {
                    let p = (p + offset * domain_size).as_vec2();
                    [p.x, p.y]
                })
            })
            .collect();

        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&points)),
            site_count: positions.len(),
        }
    }

    /// Find the nearest site to a position
    ///
    /// Returns `None` for an empty index.
    pub fn find_nearest(&self, position: IVec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let query = position.as_vec2();
        let result = tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        Some(result.item as usize % self.site_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let positions = vec![
            IVec2::new(10, 10),
            IVec2::new(90, 10),
            IVec2::new(10, 90),
            IVec2::new(90, 90),
        ];

        let index = SpatialIndex::new(&positions, 100, false);

        assert_eq!(index.find_nearest(IVec2::new(20, 15)), Some(0));
        assert_eq!(index.find_nearest(IVec2::new(80, 5)), Some(1));
        assert_eq!(index.find_nearest(IVec2::new(0, 70)), Some(2));
        assert_eq!(index.find_nearest(IVec2::new(60, 99)), Some(3));
    }

    #[test]
    fn test_spatial_index_wraps() {
        let positions = vec![IVec2::new(20, 50), IVec2::new(95, 50)];

        let planar = SpatialIndex::new(&positions, 100, false);
        let torus = SpatialIndex::new(&positions, 100, true);

        // (2, 50) is 18 from site 0 but only 7 from site 1 around the seam
        assert_eq!(planar.find_nearest(IVec2::new(2, 50)), Some(0));
        assert_eq!(torus.find_nearest(IVec2::new(2, 50)), Some(1));
    }

    #[test]
    fn test_spatial_index_empty() {
        let index = SpatialIndex::new(&[], 100, true);
        assert_eq!(index.find_nearest(IVec2::new(1, 1)), None);
    }
}
