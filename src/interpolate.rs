//! Weighted interpolation of payload-derived values
//!
//! Blends a scalar extracted from each payload over the same 3×3 block the
//! locator searches. A site contributes `cell_scale - distance` when it is
//! within one cell width of the query and nothing otherwise, so values fade
//! smoothly across site boundaries while every query stays local.

use glam::IVec2;

use crate::grid::VoronoiGrid;
use crate::metric::{BLOCK_OFFSETS, HOME_SLOT};

/// Normalized weight of one cell of the block
#[derive(Debug, Clone, Copy, PartialEq)]
struct Factor {
    site: usize,
    weight: f64,
    distance: f64,
}

impl<T> VoronoiGrid<T> {
    /// Raw and normalized weights for the 3×3 block around `query`
    ///
    /// Slots follow block order (x outer, y inner). Absent cells are `None`.
    /// When every present cell is farther than one cell width away, the home
    /// cell gets the full weight, or the closest present cell if the home cell
    /// is absent itself.
    fn blend_factors(&self, query: IVec2) -> [Option<Factor>; 9] {
        let home = self.cell_coord_of(query);
        let scale = self.cell_scale as f64;

        let mut factors = BLOCK_OFFSETS.map(|offset| {
            self.site_distance(query, home + offset)
                .map(|(site, distance)| {
                    let distance = distance as f64;
                    let weight = if distance > scale { 0.0 } else { scale - distance };
                    Factor { site, weight, distance }
                })
        });

        let sum: f64 = factors.iter().flatten().map(|f| f.weight).sum();

        if sum == 0.0 {
            let fallback = if factors[HOME_SLOT].is_some() {
                Some(HOME_SLOT)
            } else {
                factors
                    .iter()
                    .enumerate()
                    .filter_map(|(slot, f)| f.map(|f| (slot, f.distance)))
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(slot, _)| slot)
            };
            if let Some(factor) = fallback.and_then(|slot| factors[slot].as_mut()) {
                factor.weight = 1.0;
            }
        } else {
            for factor in factors.iter_mut().flatten() {
                factor.weight /= sum;
            }
        }

        factors
    }

    /// Normalized interpolation weights for the 3×3 block around `query`
    ///
    /// Slot `i` corresponds to the cell at `home + offset_i` with offsets in
    /// x-outer, y-inner order from `(-1, -1)` to `(1, 1)`; slot 4 is the home
    /// cell. Present weights sum to 1.
    pub fn interpolation_weights(&self, query: IVec2) -> [Option<f32>; 9] {
        self.blend_factors(query)
            .map(|factor| factor.map(|f| f.weight as f32))
    }

    /// Blend a payload-derived scalar across nearby sites
    ///
    /// `extractor` is called once per present cell of the 3×3 block. Returns
    /// `None` only when no cell of the block exists. If every contributing
    /// value equals `v`, the result is exactly `v`.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    /// use glam::IVec2;
    ///
    /// let config = GridConfigBuilder::new().seed(9).domain_size(100).sqrt_nodes(10).build().unwrap();
    /// let grid = VoronoiGrid::generate_with_sampler(config, &|position: IVec2, _cell: IVec2| {
    ///     position.x as f32
    /// })
    /// .unwrap();
    ///
    /// let smooth = grid.interpolate(IVec2::new(42, 17), |&x| x).unwrap();
    /// assert!((0.0..100.0).contains(&smooth));
    /// ```
    pub fn interpolate<F>(&self, query: IVec2, extractor: F) -> Option<f32>
    where
        F: Fn(&T) -> f32,
    {
        let mut weight_sum = 0.0_f64;
        let mut output = 0.0_f64;

        for factor in self.blend_factors(query).into_iter().flatten() {
            weight_sum += factor.weight;
            output += extractor(&self.sites[factor.site].payload) as f64 * factor.weight;
        }

        if weight_sum == 0.0 {
            return None;
        }

        Some((output / weight_sum) as f32)
    }
}
