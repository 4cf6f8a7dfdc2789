//! Site placement and payload sampling
//!
//! Every cell receives one site, drawn uniformly inside the cell and then
//! pulled toward the cell center by a centering factor.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::VoronoiGrid;
use crate::config::{validate_centering_factor, GridConfig};
use crate::error::{Result, VoronoiError};
use crate::site::Site;

/// Trait for producing a site payload from the site's geometry
///
/// Closures of the form `Fn(position, cell) -> T` implement it directly.
pub trait PayloadSampler {
    /// The payload type produced by this sampler
    type Output;

    /// Produce the payload for a site at `position` inside `cell`
    fn sample(&self, position: IVec2, cell: IVec2) -> Self::Output;
}

impl<F, T> PayloadSampler for F
where
    F: Fn(IVec2, IVec2) -> T,
{
    type Output = T;

    fn sample(&self, position: IVec2, cell: IVec2) -> T {
        self(position, cell)
    }
}

/// Draw a position inside `cell` and bias it toward the cell center
///
/// The offset toward the center is floored, so `factor == 1.0` lands exactly
/// on `cell * scale + scale / 2` and the result never leaves the cell.
fn random_in_cell<R: Rng + ?Sized>(cell: IVec2, scale: i32, rng: &mut R, factor: f32) -> IVec2 {
    let min = cell * scale;
    let position = IVec2::new(
        rng.gen_range(min.x..min.x + scale),
        rng.gen_range(min.y..min.y + scale),
    );

    if factor == 0.0 {
        return position;
    }

    let center = min + IVec2::splat(scale / 2);
    let pull = ((center - position).as_vec2() * factor).floor().as_ivec2();
    position + pull
}

impl<T> VoronoiGrid<T> {
    /// Place one randomly jittered site in every cell
    ///
    /// Cells are visited x-major and each draws x then y from `rng`, so a
    /// seeded generator reproduces the same layout. Payloads start at
    /// `T::default()`. Any previous sites and neighbor graph are discarded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `centering_factor` is outside `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    /// use rand::SeedableRng;
    ///
    /// let mut grid = VoronoiGrid::<()>::new(100, 10, false).unwrap();
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
    /// grid.populate_random(&mut rng, 1.0).unwrap();
    ///
    /// assert_eq!(grid.cell_at(2, 3).unwrap().position(), glam::IVec2::new(25, 35));
    /// ```
    pub fn populate_random<R: Rng + ?Sized>(&mut self, rng: &mut R, centering_factor: f32) -> Result<()>
    where
        T: Default,
    {
        validate_centering_factor(centering_factor)?;

        let scale = self.cell_scale;
        let sites: Vec<Site<T>> = self
            .cell_coords()
            .enumerate()
            .map(|(id, cell)| {
                let position = random_in_cell(cell, scale, rng, centering_factor);
                Site::new(id, cell, position, T::default())
            })
            .collect();

        log::debug!(
            "populated {} sites (scale {}, centering {})",
            sites.len(),
            scale,
            centering_factor
        );
        self.replace_sites(sites);
        Ok(())
    }

    /// Place sites at caller-chosen positions, one per cell
    ///
    /// `position_for` is called with each cell coordinate in site order.
    ///
    /// # Errors
    ///
    /// Returns `PositionOutsideCell` for the first position that does not lie
    /// within its cell's pixel bounds; the grid is left unchanged.
    pub fn populate_with_positions<F>(&mut self, mut position_for: F) -> Result<()>
    where
        T: Default,
        F: FnMut(IVec2) -> IVec2,
    {
        let mut sites = Vec::with_capacity((self.sqrt_nodes * self.sqrt_nodes) as usize);
        for (id, cell) in self.cell_coords().enumerate() {
            let position = position_for(cell);
            let (min, max) = self.cell_bounds(cell);
            let inside = position.cmpge(min).all() && position.cmplt(max).all();
            if !inside {
                return Err(VoronoiError::PositionOutsideCell { cell, position });
            }
            sites.push(Site::new(id, cell, position, T::default()));
        }

        log::debug!("populated {} sites from explicit positions", sites.len());
        self.replace_sites(sites);
        Ok(())
    }

    /// Assign every site's payload from a sampler
    ///
    /// The sampler sees each site's position and cell; neighbors are not
    /// touched.
    pub fn sample_payloads<S>(&mut self, sampler: &S)
    where
        S: PayloadSampler<Output = T>,
    {
        for site in &mut self.sites {
            site.payload = sampler.sample(site.position, site.cell);
        }
    }

    fn replace_sites(&mut self, sites: Vec<Site<T>>) {
        self.sites = sites;
        #[cfg(feature = "spatial-index")]
        {
            self.spatial_index = None;
        }
    }
}

impl<T: Default> VoronoiGrid<T> {
    /// Generate a fully built grid from a configuration
    ///
    /// Constructs the grid, places sites with a `ChaCha8Rng` seeded from
    /// `config.seed`, and builds the neighbor graph. Payloads are
    /// `T::default()`.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    ///
    /// let config = GridConfigBuilder::new().seed(12345).domain_size(60).sqrt_nodes(6).build().unwrap();
    /// let grid: VoronoiGrid<f32> = VoronoiGrid::generate(config).unwrap();
    /// assert_eq!(grid.site_count(), 36);
    /// assert!(grid.edges().count() > 0);
    /// ```
    pub fn generate(config: GridConfig) -> Result<Self> {
        let mut grid = Self::from_config(&config)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        grid.populate_random(&mut rng, config.centering_factor)?;
        grid.finish_generation();
        Ok(grid)
    }
}

impl<T> VoronoiGrid<T> {
    /// Generate a fully built grid whose payloads come from a sampler
    ///
    /// Same placement as [`generate`](VoronoiGrid::generate), but `T` does not
    /// need a default: the sampler is called once per site.
    pub fn generate_with_sampler<S>(config: GridConfig, sampler: &S) -> Result<Self>
    where
        S: PayloadSampler<Output = T>,
    {
        let placement = VoronoiGrid::<()>::generate_layout(&config)?;

        let sites = placement
            .sites
            .into_iter()
            .map(|site| {
                let payload = sampler.sample(site.position, site.cell);
                Site::new(site.id, site.cell, site.position, payload)
            })
            .collect();

        let mut grid = Self::from_config(&config)?;
        grid.replace_sites(sites);
        grid.finish_generation();
        Ok(grid)
    }

    fn finish_generation(&mut self) {
        self.build_neighbors();
        #[cfg(feature = "spatial-index")]
        self.build_spatial_index();
    }
}

impl VoronoiGrid<()> {
    fn generate_layout(config: &GridConfig) -> Result<Self> {
        let mut grid = Self::from_config(config)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        grid.populate_random(&mut rng, config.centering_factor)?;
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_population() {
        let mut grid = VoronoiGrid::<()>::new(100, 10, false).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        grid.populate_random(&mut rng, 1.0).unwrap();

        assert_eq!(grid.site_count(), 100);
        for site in grid.sites() {
            assert_eq!(
                site.position,
                IVec2::new(site.cell.x * 10 + 5, site.cell.y * 10 + 5)
            );
        }
    }

    #[test]
    fn test_positions_stay_inside_cells() {
        for factor in [0.0, 0.05, 0.3, 0.75, 1.0] {
            let mut grid = VoronoiGrid::<()>::new(210, 7, true).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            grid.populate_random(&mut rng, factor).unwrap();

            for site in grid.sites() {
                let (min, max) = grid.cell_bounds(site.cell);
                assert!(site.position.cmpge(min).all(), "factor {}: {:?}", factor, site);
                assert!(site.position.cmplt(max).all(), "factor {}: {:?}", factor, site);
            }
        }
    }

    #[test]
    fn test_population_is_reproducible() {
        let layout = |seed| {
            let mut grid = VoronoiGrid::<()>::new(120, 6, true).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            grid.populate_random(&mut rng, 0.2).unwrap();
            grid.sites().iter().map(|s| s.position).collect::<Vec<_>>()
        };

        assert_eq!(layout(5), layout(5));
        assert_ne!(layout(5), layout(6));
    }

    #[test]
    fn test_invalid_centering_factor() {
        let mut grid = VoronoiGrid::<()>::new(100, 10, false).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(grid.populate_random(&mut rng, 1.5).is_err());
        assert!(!grid.is_populated());
    }

    #[test]
    fn test_populate_with_positions() {
        let mut grid = VoronoiGrid::<()>::new(4, 2, false).unwrap();
        grid.populate_with_positions(|cell| cell * 2).unwrap();
        assert_eq!(grid.cell_at(1, 1).unwrap().position, IVec2::new(2, 2));

        let err = grid
            .populate_with_positions(|cell| cell * 2 + IVec2::new(2, 0))
            .unwrap_err();
        assert_eq!(
            err,
            VoronoiError::PositionOutsideCell {
                cell: IVec2::ZERO,
                position: IVec2::new(2, 0)
            }
        );
        // Previous layout survives a rejected population
        assert_eq!(grid.cell_at(1, 1).unwrap().position, IVec2::new(2, 2));
    }

    #[test]
    fn test_sample_payloads() {
        let mut grid = VoronoiGrid::<i32>::new(40, 4, false).unwrap();
        grid.populate_with_positions(|cell| cell * 10 + IVec2::splat(5)).unwrap();
        grid.sample_payloads(&|position: IVec2, _cell: IVec2| position.x + position.y);

        assert_eq!(grid.cell_at(3, 2).unwrap().payload, 35 + 25);
    }

    #[test]
    fn test_generate_matches_manual_pipeline() {
        let config = crate::GridConfigBuilder::new()
            .seed(77)
            .domain_size(80)
            .sqrt_nodes(8)
            .build()
            .unwrap();

        let generated: VoronoiGrid<()> = VoronoiGrid::generate(config).unwrap();

        let mut manual = VoronoiGrid::<()>::new(80, 8, true).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        manual.populate_random(&mut rng, config.centering_factor).unwrap();
        manual.build_neighbors();

        assert_eq!(generated.sites(), manual.sites());
    }

    #[test]
    fn test_generate_with_sampler() {
        let config = crate::GridConfigBuilder::new()
            .seed(3)
            .domain_size(50)
            .sqrt_nodes(5)
            .build()
            .unwrap();

        let sampled = VoronoiGrid::generate_with_sampler(config, &|_: IVec2, cell: IVec2| {
            format!("region {}-{}", cell.x, cell.y)
        })
        .unwrap();
        let plain: VoronoiGrid<()> = VoronoiGrid::generate(config).unwrap();

        assert_eq!(sampled.cell_at(2, 4).unwrap().payload, "region 2-4");
        for (a, b) in sampled.iter().zip(plain.iter()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.neighbors, b.neighbors);
        }
    }
}
