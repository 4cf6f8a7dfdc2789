//! VoronoiGrid main structure
//!
//! Owns one [`Site`] per grid cell and maps between global (pixel) coordinates
//! and cell coordinates, with optional toroidal wraparound.

mod populate;

pub use populate::PayloadSampler;

use glam::IVec2;

use crate::config::{validate_dimensions, GridConfig};
use crate::error::{Result, VoronoiError};
use crate::site::Site;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// An approximate Voronoi diagram over a square domain
///
/// The domain `[0, domain_size)²` is split into `sqrt_nodes × sqrt_nodes`
/// cells of `cell_scale` pixels each, and every cell holds exactly one site
/// jittered somewhere inside it. Sites are stored x-major
/// (`id = cell.x * sqrt_nodes + cell.y`), and that order is the enumeration
/// order of every query that walks all sites. The neighbor builder breaks
/// distance ties in this order too.
///
/// # Type Parameters
///
/// * `T` - Payload attached to each site (region data, colors, ...). The grid
///   never interprets it.
///
/// # Examples
///
/// ```
/// use grid_voronoi::*;
///
/// let config = GridConfigBuilder::new()
///     .seed(42)
///     .domain_size(100)
///     .sqrt_nodes(5)
///     .build()
///     .unwrap();
///
/// let grid: VoronoiGrid<u8> = VoronoiGrid::generate(config).unwrap();
/// assert_eq!(grid.site_count(), 25);
///
/// let site = grid.locate(glam::IVec2::new(30, 70)).unwrap();
/// println!("(30, 70) belongs to site {}", site.id());
/// ```
#[derive(Clone)]
pub struct VoronoiGrid<T> {
    pub(crate) domain_size: i32,
    pub(crate) sqrt_nodes: i32,
    pub(crate) cell_scale: i32,
    pub(crate) wrap: bool,

    /// All sites, x-major; empty until populated
    pub(crate) sites: Vec<Site<T>>,

    #[cfg(feature = "spatial-index")]
    pub(crate) spatial_index: Option<SpatialIndex>,
}

impl<T> VoronoiGrid<T> {
    /// Create an unpopulated grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `domain_size` is not divisible by
    /// `sqrt_nodes`, or if either is not positive.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    ///
    /// let grid = VoronoiGrid::<()>::new(100, 10, false).unwrap();
    /// assert_eq!(grid.cell_scale(), 10);
    ///
    /// assert!(VoronoiGrid::<()>::new(10, 3, true).is_err());
    /// ```
    pub fn new(domain_size: i32, sqrt_nodes: i32, wrap: bool) -> Result<Self> {
        validate_dimensions(domain_size, sqrt_nodes)?;

        Ok(Self {
            domain_size,
            sqrt_nodes,
            cell_scale: domain_size / sqrt_nodes,
            wrap,
            sites: Vec::new(),
            #[cfg(feature = "spatial-index")]
            spatial_index: None,
        })
    }

    /// Create an unpopulated grid from the dimensions of a configuration
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.domain_size, config.sqrt_nodes, config.wrap)
    }

    /// Global extent of the domain, in pixels
    #[inline]
    pub fn domain_size(&self) -> i32 {
        self.domain_size
    }

    /// Number of cells along each axis
    #[inline]
    pub fn sqrt_nodes(&self) -> i32 {
        self.sqrt_nodes
    }

    /// Pixel size of one cell
    #[inline]
    pub fn cell_scale(&self) -> i32 {
        self.cell_scale
    }

    /// Whether the domain wraps around toroidally
    #[inline]
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Number of sites currently held (0 before population)
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Whether the grid has been populated
    #[inline]
    pub fn is_populated(&self) -> bool {
        !self.sites.is_empty()
    }

    /// Apply wraparound to a cell coordinate
    ///
    /// With wrap enabled every coordinate maps into `[0, sqrt_nodes)` by
    /// Euclidean modulo, so `-1` becomes `sqrt_nodes - 1` and `sqrt_nodes`
    /// becomes `0`. Without wrap, out-of-range coordinates yield `None`.
    pub fn normalize_cell(&self, cell: IVec2) -> Option<IVec2> {
        if self.wrap {
            return Some(IVec2::new(
                cell.x.rem_euclid(self.sqrt_nodes),
                cell.y.rem_euclid(self.sqrt_nodes),
            ));
        }

        let in_range = |c: i32| (0..self.sqrt_nodes).contains(&c);
        if in_range(cell.x) && in_range(cell.y) {
            Some(cell)
        } else {
            None
        }
    }

    /// Site ID for a cell coordinate, after wraparound
    ///
    /// Returns `None` if the cell does not exist or the grid is unpopulated.
    pub fn cell_index(&self, cell: IVec2) -> Option<usize> {
        let id = self.flat_index(self.normalize_cell(cell)?);
        (id < self.sites.len()).then_some(id)
    }

    /// Get the site at a cell coordinate
    ///
    /// # Errors
    ///
    /// Returns `CellOutOfRange` if wrap is disabled and either index lies
    /// outside `[0, sqrt_nodes)`, and `SiteNotFound` if the grid has not been
    /// populated yet.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    ///
    /// let config = GridConfigBuilder::new().seed(1).domain_size(40).sqrt_nodes(4).build().unwrap();
    /// let grid: VoronoiGrid<()> = VoronoiGrid::generate(config).unwrap();
    ///
    /// // Wrapping grid: -1 is the last column
    /// assert_eq!(grid.cell_at(-1, 0).unwrap().cell(), glam::IVec2::new(3, 0));
    /// ```
    pub fn cell_at(&self, cell_x: i32, cell_y: i32) -> Result<&Site<T>> {
        let id = self.checked_cell_index(cell_x, cell_y)?;
        Ok(&self.sites[id])
    }

    /// Mutable counterpart of [`cell_at`](Self::cell_at)
    pub fn cell_at_mut(&mut self, cell_x: i32, cell_y: i32) -> Result<&mut Site<T>> {
        let id = self.checked_cell_index(cell_x, cell_y)?;
        Ok(&mut self.sites[id])
    }

    fn checked_cell_index(&self, cell_x: i32, cell_y: i32) -> Result<usize> {
        let cell = self
            .normalize_cell(IVec2::new(cell_x, cell_y))
            .ok_or(VoronoiError::CellOutOfRange { x: cell_x, y: cell_y })?;
        let id = self.flat_index(cell);
        if id >= self.sites.len() {
            return Err(VoronoiError::SiteNotFound(id));
        }
        Ok(id)
    }

    #[inline]
    fn flat_index(&self, cell: IVec2) -> usize {
        (cell.x * self.sqrt_nodes + cell.y) as usize
    }

    /// Cell coordinate containing a global point
    ///
    /// Each axis is divided by `cell_scale`, truncating toward zero, so points
    /// in `(-cell_scale, 0)` land in cell 0 rather than cell -1.
    #[inline]
    pub fn cell_coord_of(&self, point: IVec2) -> IVec2 {
        IVec2::new(point.x / self.cell_scale, point.y / self.cell_scale)
    }

    /// Pixel bounds of a cell: inclusive minimum, exclusive maximum
    #[inline]
    pub fn cell_bounds(&self, cell: IVec2) -> (IVec2, IVec2) {
        let min = cell * self.cell_scale;
        (min, min + IVec2::splat(self.cell_scale))
    }

    /// Pixel center of a cell
    #[inline]
    pub fn cell_center(&self, cell: IVec2) -> IVec2 {
        cell * self.cell_scale + IVec2::splat(self.cell_scale / 2)
    }

    /// All cell coordinates in site order (x outer, y inner)
    pub fn cell_coords(&self) -> impl Iterator<Item = IVec2> {
        let n = self.sqrt_nodes;
        (0..n).flat_map(move |x| (0..n).map(move |y| IVec2::new(x, y)))
    }

    /// Get a site by ID
    ///
    /// Returns `None` if the ID is out of bounds.
    #[inline]
    pub fn get_site(&self, id: usize) -> Option<&Site<T>> {
        self.sites.get(id)
    }

    /// Get a site by ID for payload mutation
    #[inline]
    pub fn get_site_mut(&mut self, id: usize) -> Option<&mut Site<T>> {
        self.sites.get_mut(id)
    }

    /// All sites as a slice, x-major
    #[inline]
    pub fn sites(&self) -> &[Site<T>] {
        &self.sites
    }

    /// All sites as a mutable slice
    ///
    /// Collaborators use this to assign payloads; geometry and neighbor
    /// lists stay read-only.
    ///
    /// ```compile_fail
    /// let mut grid = grid_voronoi::VoronoiGrid::<u8>::new(10, 1, false).unwrap();
    /// grid.sites_mut()[0].position = glam::IVec2::ZERO;
    /// ```
    #[inline]
    pub fn sites_mut(&mut self) -> &mut [Site<T>] {
        &mut self.sites
    }

    /// Iterate over all sites, x-major
    pub fn iter(&self) -> std::slice::Iter<'_, Site<T>> {
        self.sites.iter()
    }
}

impl<'a, T> IntoIterator for &'a VoronoiGrid<T> {
    type Item = &'a Site<T>;
    type IntoIter = std::slice::Iter<'a, Site<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn populated(domain_size: i32, sqrt_nodes: i32, wrap: bool) -> VoronoiGrid<()> {
        let mut grid = VoronoiGrid::new(domain_size, sqrt_nodes, wrap).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        grid.populate_random(&mut rng, 0.0).unwrap();
        grid
    }

    #[test]
    fn test_construction() {
        let grid = VoronoiGrid::<()>::new(100, 10, false).unwrap();
        assert_eq!(grid.cell_scale(), 10);
        assert_eq!(grid.domain_size(), 100);
        assert!(!grid.wrap());
        assert!(!grid.is_populated());

        assert!(VoronoiGrid::<()>::new(10, 5, true).is_ok());
        assert!(matches!(
            VoronoiGrid::<()>::new(10, 3, true),
            Err(VoronoiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cell_at_out_of_range_without_wrap() {
        let grid = populated(50, 5, false);

        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (-7, 12)] {
            assert_eq!(
                grid.cell_at(x, y).unwrap_err(),
                VoronoiError::CellOutOfRange { x, y }
            );
        }
        assert_eq!(grid.cell_at(4, 4).unwrap().cell, IVec2::new(4, 4));
    }

    #[test]
    fn test_cell_at_always_valid_with_wrap() {
        let grid = populated(50, 5, true);

        for x in -12..12 {
            for y in -12..12 {
                let site = grid.cell_at(x, y).unwrap();
                assert_eq!(site.cell, IVec2::new(x.rem_euclid(5), y.rem_euclid(5)));
            }
        }
        assert_eq!(grid.cell_at(-1, 5).unwrap().cell, IVec2::new(4, 0));
    }

    #[test]
    fn test_cell_at_unpopulated() {
        let grid = VoronoiGrid::<()>::new(50, 5, true).unwrap();
        assert!(matches!(grid.cell_at(0, 0), Err(VoronoiError::SiteNotFound(0))));
    }

    #[test]
    fn test_cell_coord_of_truncates_toward_zero() {
        let grid = VoronoiGrid::<()>::new(100, 10, false).unwrap();
        assert_eq!(grid.cell_coord_of(IVec2::new(5, 5)), IVec2::new(0, 0));
        assert_eq!(grid.cell_coord_of(IVec2::new(19, 99)), IVec2::new(1, 9));
        assert_eq!(grid.cell_coord_of(IVec2::new(-5, -15)), IVec2::new(0, -1));
    }

    #[test]
    fn test_ids_follow_x_major_order() {
        let grid = populated(30, 3, false);
        for (i, site) in grid.iter().enumerate() {
            assert_eq!(site.id, i);
            assert_eq!(grid.cell_index(site.cell), Some(i));
        }
        assert_eq!(grid.get_site(1).unwrap().cell, IVec2::new(0, 1));
        assert_eq!(grid.get_site(5).unwrap().cell, IVec2::new(1, 2));
        assert!(grid.get_site(9).is_none());
    }

    #[test]
    fn test_payload_mutation() {
        let mut grid: VoronoiGrid<u32> = VoronoiGrid::new(30, 3, false).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        grid.populate_random(&mut rng, 0.5).unwrap();

        grid.cell_at_mut(1, 1).unwrap().payload = 7;
        grid.get_site_mut(0).unwrap().payload = 3;

        assert_eq!(grid.get_site(4).unwrap().payload, 7);
        assert_eq!(grid.sites()[0].payload, 3);
        assert_eq!((&grid).into_iter().map(|s| s.payload).sum::<u32>(), 10);
    }

    #[test]
    fn test_payload_mutation_keeps_geometry() {
        let mut grid: VoronoiGrid<u32> = VoronoiGrid::new(40, 4, false).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        grid.populate_random(&mut rng, 0.3).unwrap();
        grid.build_neighbors();
        let before = grid.clone();

        for site in grid.sites_mut() {
            site.payload = site.id() as u32 * 3;
        }

        for (site, unchanged) in grid.iter().zip(before.iter()) {
            assert_eq!(site.position(), unchanged.position());
            assert_eq!(site.cell(), unchanged.cell());
            assert_eq!(site.neighbors(), unchanged.neighbors());
            assert_eq!(site.payload, site.id() as u32 * 3);
        }
    }
}
