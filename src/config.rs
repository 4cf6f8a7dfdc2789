//! Grid Configuration and Builder
//!
//! This module provides configuration types for deterministic grid generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Default global extent of the domain, in pixels
pub const DEFAULT_DOMAIN_SIZE: i32 = 500;

/// Default number of cells along each axis
pub const DEFAULT_SQRT_NODES: i32 = 10;

/// Default bias of each site toward its cell center
pub const DEFAULT_CENTERING_FACTOR: f32 = 0.05;

/// Check the size invariants shared by [`GridConfigBuilder`] and
/// [`VoronoiGrid::new`](crate::VoronoiGrid::new)
pub(crate) fn validate_dimensions(domain_size: i32, sqrt_nodes: i32) -> Result<()> {
    if domain_size <= 0 {
        return Err(VoronoiError::InvalidConfig(format!(
            "domain size must be positive (got {})",
            domain_size
        )));
    }
    if sqrt_nodes <= 0 {
        return Err(VoronoiError::InvalidConfig(format!(
            "sqrt_nodes must be positive (got {})",
            sqrt_nodes
        )));
    }
    if domain_size % sqrt_nodes != 0 {
        return Err(VoronoiError::InvalidConfig(format!(
            "domain size {} must be divisible by sqrt_nodes {}",
            domain_size, sqrt_nodes
        )));
    }
    Ok(())
}

pub(crate) fn validate_centering_factor(factor: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&factor) {
        return Err(VoronoiError::InvalidConfig(format!(
            "centering factor must be within [0, 1] (got {})",
            factor
        )));
    }
    Ok(())
}

/// Configuration for deterministic grid generation
///
/// The same configuration always produces the identical grid: site positions
/// come from a `ChaCha8Rng` seeded with [`GridConfig::seed`], and the neighbor
/// graph is a pure function of the positions.
///
/// # Example
///
/// ```rust
/// use grid_voronoi::*;
///
/// let config = GridConfigBuilder::new()
///     .seed(42)
///     .domain_size(100)
///     .sqrt_nodes(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.cell_scale(), 10);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Random seed for site placement
    pub seed: u64,

    /// Global extent of the square domain, in pixels
    pub domain_size: i32,

    /// Number of cells along each axis (total sites = `sqrt_nodes²`)
    pub sqrt_nodes: i32,

    /// Whether opposite domain edges are adjacent
    pub wrap: bool,

    /// Bias of each site toward its cell center
    ///
    /// - 0.0: uniform jitter across the whole cell
    /// - 1.0: every site exactly at its cell center
    pub centering_factor: f32,
}

impl GridConfig {
    /// Pixel size of one cell
    #[inline]
    pub fn cell_scale(&self) -> i32 {
        self.domain_size / self.sqrt_nodes
    }

    /// Total number of sites the grid will hold
    #[inline]
    pub fn site_count(&self) -> usize {
        (self.sqrt_nodes * self.sqrt_nodes) as usize
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            domain_size: DEFAULT_DOMAIN_SIZE,
            sqrt_nodes: DEFAULT_SQRT_NODES,
            wrap: true,
            centering_factor: DEFAULT_CENTERING_FACTOR,
        }
    }
}

/// Builder for creating GridConfig with validation
///
/// # Example
///
/// ```rust
/// use grid_voronoi::*;
///
/// let config = GridConfigBuilder::new()
///     .seed(7)
///     .domain_size(60)
///     .sqrt_nodes(6)
///     .wrap(false)
///     .centering_factor(0.5)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert!(!config.wrap);
/// ```
#[derive(Debug, Clone)]
pub struct GridConfigBuilder {
    seed: Option<u64>,
    domain_size: i32,
    sqrt_nodes: i32,
    wrap: bool,
    centering_factor: f32,
}

impl GridConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - domain_size: 500
    /// - sqrt_nodes: 10
    /// - wrap: true
    /// - centering_factor: 0.05
    pub fn new() -> Self {
        Self {
            seed: None,
            domain_size: DEFAULT_DOMAIN_SIZE,
            sqrt_nodes: DEFAULT_SQRT_NODES,
            wrap: true,
            centering_factor: DEFAULT_CENTERING_FACTOR,
        }
    }

    /// Set the random seed for site placement
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the global extent of the domain
    ///
    /// Divisibility by `sqrt_nodes` is checked in [`build`](Self::build),
    /// since the two can be set in either order.
    pub fn domain_size(mut self, domain_size: i32) -> Self {
        self.domain_size = domain_size;
        self
    }

    /// Set the number of cells along each axis
    pub fn sqrt_nodes(mut self, sqrt_nodes: i32) -> Self {
        self.sqrt_nodes = sqrt_nodes;
        self
    }

    /// Enable or disable toroidal wraparound
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the centering factor
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the factor is outside `[0, 1]`
    pub fn centering_factor(mut self, factor: f32) -> Result<Self> {
        validate_centering_factor(factor)?;
        self.centering_factor = factor;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either size is not positive or the domain
    /// size is not divisible by `sqrt_nodes`.
    pub fn build(self) -> Result<GridConfig> {
        validate_dimensions(self.domain_size, self.sqrt_nodes)?;
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(GridConfig {
            seed,
            domain_size: self.domain_size,
            sqrt_nodes: self.sqrt_nodes,
            wrap: self.wrap,
            centering_factor: self.centering_factor,
        })
    }
}

impl Default for GridConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
