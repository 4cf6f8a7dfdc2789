//! Region map workflow: sites as regions with biome data
//!
//! A collaborator assigns each site a biome, then queries the grid for the
//! region under a point and for smoothly blended climate values.

use grid_voronoi::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum Biome {
    #[default]
    Ocean,
    Jungle,
    Plains,
    Desert,
    Forest,
    Taiga,
    Tundra,
    Swamp,
}

const LAND_BIOMES: [Biome; 7] = [
    Biome::Jungle,
    Biome::Plains,
    Biome::Desert,
    Biome::Forest,
    Biome::Taiga,
    Biome::Tundra,
    Biome::Swamp,
];

impl Biome {
    /// Mean temperature in °C
    fn temperature(self) -> f32 {
        match self {
            Biome::Ocean | Biome::Plains | Biome::Swamp => 20.0,
            Biome::Jungle | Biome::Desert => 30.0,
            Biome::Forest => 15.0,
            Biome::Taiga => 10.0,
            Biome::Tundra => 0.0,
        }
    }

    /// Yearly precipitation in cm
    fn precipitation(self) -> f32 {
        match self {
            Biome::Ocean => 200.0,
            Biome::Jungle => 350.0,
            Biome::Plains | Biome::Taiga => 100.0,
            Biome::Desert | Biome::Tundra => 10.0,
            Biome::Forest => 150.0,
            Biome::Swamp => 300.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Region {
    biome: Biome,
}

fn main() -> Result<()> {
    println!("=== grid_voronoi Region Map Demo ===\n");

    let config = GridConfigBuilder::new()
        .seed(2024)
        .domain_size(500)
        .sqrt_nodes(10)
        .wrap(true)
        .centering_factor(0.05)?
        .build()?;

    println!("Domain: {0}x{0}, {1} sites, cell scale {2}", config.domain_size, config.site_count(), config.cell_scale());

    let mut grid: VoronoiGrid<Region> = VoronoiGrid::generate(config)?;
    println!("Neighbor graph: {} edges", grid.edges().count());

    // Sites near the border become ocean, the rest get a random land biome
    let size = config.domain_size as f64;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ 0x5eed);
    for site in grid.sites_mut() {
        let ocean_factor = 0.2 + (rng.gen::<f64>() * 0.3 - 0.1);
        let margin = size * ocean_factor;
        let position = site.position().as_dvec2();
        let (x, y) = (position.x, position.y);
        let is_ocean = x <= margin || y <= margin || x >= size - margin || y >= size - margin;

        site.payload.biome = if is_ocean {
            Biome::Ocean
        } else {
            LAND_BIOMES[rng.gen_range(0..LAND_BIOMES.len())]
        };
    }

    let mut counts = std::collections::HashMap::new();
    for site in &grid {
        *counts.entry(site.payload.biome).or_insert(0usize) += 1;
    }
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by_key(|(_, count)| std::cmp::Reverse(*count));

    println!("\nBiome distribution:");
    for (biome, count) in sorted {
        println!("  {:?}: {}", biome, count);
    }

    println!("\nSamples along y = 250:");
    for x in (0..500).step_by(50) {
        let point = IVec2::new(x, 250);
        let Some(region) = grid.payload_at(point) else {
            continue;
        };
        let temperature = grid
            .interpolate(point, |r| r.biome.temperature())
            .unwrap_or_default();
        let precipitation = grid
            .interpolate(point, |r| r.biome.precipitation())
            .unwrap_or_default();
        println!(
            "  ({:3}, 250) {:<7} {:5.1} °C {:6.1} cm",
            x,
            format!("{:?}", region.biome),
            temperature,
            precipitation
        );
    }

    #[cfg(feature = "spatial-index")]
    {
        let misses = (0..500)
            .step_by(5)
            .flat_map(|x| (0..500).step_by(5).map(move |y| IVec2::new(x, y)))
            .filter(|&p| grid.locate_id(p) != grid.locate_exact(p))
            .count();
        println!("\nApproximate locator disagreed with the exact index on {} of 10000 samples", misses);
    }

    let center = grid.locate_id(IVec2::new(250, 250)).unwrap_or(0);
    println!(
        "\nSite {} reaches {} sites within 2 hops",
        center,
        grid.find_sites_within_hops(center, 2).len()
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
