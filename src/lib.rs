//! Approximate Voronoi partitioning over a jittered square grid
//!
//! The domain is cut into a regular `n × n` grid and every cell holds one
//! randomly jittered site. Because sites never leave their cell, all queries
//! stay local to a 3×3 block of cells:
//!
//! - nearest-site lookup for any point,
//! - an approximate adjacency graph between sites,
//! - smooth interpolation of payload-derived values across site boundaries.
//!
//! The domain can optionally wrap around toroidally, so maps tile seamlessly.
//!
//! # Quick Start
//!
//! ```rust
//! use grid_voronoi::*;
//! use glam::IVec2;
//!
//! let config = GridConfigBuilder::new()
//!     .seed(42)
//!     .domain_size(500)
//!     .sqrt_nodes(10)
//!     .build().unwrap();
//!
//! let mut grid: VoronoiGrid<f32> = VoronoiGrid::generate(config).unwrap();
//!
//! // Collaborators fill in the payloads
//! for site in grid.sites_mut() {
//!     site.payload = site.position().y as f32 / 500.0;
//! }
//!
//! let region = grid.locate(IVec2::new(120, 333)).unwrap();
//! let blended = grid.interpolate(IVec2::new(120, 333), |&t| t).unwrap();
//! println!("site {} has {} neighbors, blended value {}", region.id(), region.neighbor_count(), blended);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): exact nearest-site lookups through a KD-tree
//! - `parallel`: evaluate neighbor pairs on the rayon thread pool
//! - `serde`: serialization support for configuration and sites

// Modules
pub mod error;
pub mod config;
pub mod site;
pub mod grid;
pub mod metric;
pub mod locate;
pub mod neighbors;
pub mod interpolate;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{GridConfig, GridConfigBuilder};
pub use site::Site;
pub use grid::{VoronoiGrid, PayloadSampler};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::IVec2 for convenience
pub use glam::IVec2;
