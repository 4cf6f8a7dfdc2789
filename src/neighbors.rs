//! Neighbor graph construction
//!
//! Two sites A and B are marked adjacent when they are the two sites closest
//! to their own midpoint. This approximates Voronoi adjacency (true adjacency
//! needs every point of the shared boundary, not just the midpoint), and it
//! can both miss and invent edges. Downstream line drawing depends on this
//! exact output, including how equal distances are ranked: ties go to the
//! site that comes first in x-major order.
//!
//! Every pair scans every site, so the build is cubic in the site count and
//! only meant for tens to low hundreds of sites.

use glam::IVec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::grid::VoronoiGrid;

/// Midpoint of two positions, truncating toward zero
#[inline]
pub(crate) fn midpoint(a: IVec2, b: IVec2) -> IVec2 {
    IVec2::new((a.x + b.x) / 2, (a.y + b.y) / 2)
}

#[inline]
fn distance_squared(a: IVec2, b: IVec2) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

/// The two positions closest to `target`, ranked as a stable sort would
///
/// Equal distances keep enumeration order. Returns `None` for fewer than two
/// positions.
fn two_closest(positions: &[IVec2], target: IVec2) -> Option<(usize, usize)> {
    let mut first: Option<(i64, usize)> = None;
    let mut second: Option<(i64, usize)> = None;

    for (i, &p) in positions.iter().enumerate() {
        let d = distance_squared(p, target);
        match first {
            Some((best, _)) if d >= best => match second {
                Some((runner_up, _)) if d >= runner_up => {}
                _ => second = Some((d, i)),
            },
            _ => {
                second = first;
                first = Some((d, i));
            }
        }
    }

    Some((first?.1, second?.1))
}

/// Whether sites `a` and `b` pass the midpoint test
pub(crate) fn is_adjacent(positions: &[IVec2], a: usize, b: usize) -> bool {
    match two_closest(positions, midpoint(positions[a], positions[b])) {
        Some((x, y)) => (x == a && y == b) || (x == b && y == a),
        None => false,
    }
}

/// Every adjacent pair `(a, b)` with `a < b`
#[cfg(not(feature = "parallel"))]
fn find_edges(positions: &[IVec2]) -> Vec<(usize, usize)> {
    find_edges_serial(positions)
}

/// Every adjacent pair `(a, b)` with `a < b`, pairs evaluated on the rayon pool
#[cfg(feature = "parallel")]
fn find_edges(positions: &[IVec2]) -> Vec<(usize, usize)> {
    let n = positions.len();
    (0..n)
        .into_par_iter()
        .flat_map_iter(|a| {
            (a + 1..n)
                .filter(move |&b| is_adjacent(positions, a, b))
                .map(move |b| (a, b))
        })
        .collect()
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
pub(crate) fn find_edges_serial(positions: &[IVec2]) -> Vec<(usize, usize)> {
    let n = positions.len();
    let mut edges = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            if is_adjacent(positions, a, b) {
                edges.push((a, b));
            }
        }
    }
    edges
}

impl<T> VoronoiGrid<T> {
    /// Build the neighbor graph over all sites
    ///
    /// Any previous graph is discarded first. Afterwards every site's
    /// `neighbors` list is sorted, duplicate-free and symmetric. Planar
    /// distances are used even on wrapping grids, so no edges cross the seam.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    /// use glam::IVec2;
    ///
    /// let mut grid = VoronoiGrid::<()>::new(30, 3, false).unwrap();
    /// grid.populate_with_positions(|cell| cell * 10 + IVec2::splat(5)).unwrap();
    /// grid.build_neighbors();
    ///
    /// // The center site touches its four edge-adjacent cells
    /// assert_eq!(grid.neighbors_of(4), &[1, 3, 5, 7]);
    /// ```
    pub fn build_neighbors(&mut self) {
        let positions: Vec<IVec2> = self.sites.iter().map(|s| s.position).collect();
        let edges = find_edges(&positions);

        for site in &mut self.sites {
            site.neighbors.clear();
        }
        // Insertion stays serial even when pairs were evaluated in parallel
        for &(a, b) in &edges {
            self.sites[a].neighbors.push(b);
            self.sites[b].neighbors.push(a);
        }
        for site in &mut self.sites {
            site.neighbors.sort_unstable();
            site.neighbors.dedup();
        }

        log::debug!(
            "built neighbor graph: {} sites, {} edges",
            self.sites.len(),
            edges.len()
        );
    }

    /// Neighbor IDs of a site
    ///
    /// Returns an empty slice if the ID is invalid.
    pub fn neighbors_of(&self, site_id: usize) -> &[usize] {
        self.sites
            .get(site_id)
            .map(|s| s.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Every edge of the neighbor graph once, as `(a, b)` with `a < b`
    ///
    /// Ordered by `a`, then `b`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sites.iter().flat_map(|site| {
            site.neighbors
                .iter()
                .filter(move |&&other| other > site.id)
                .map(move |&other| (site.id, other))
        })
    }

    /// Sites reachable from `center_id` in at most `hops` graph steps
    ///
    /// Includes the center itself and comes back sorted by site ID. Empty if
    /// `center_id` is invalid.
    pub fn find_sites_within_hops(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.sites.len() {
            return vec![];
        }

        let mut reached = vec![false; self.sites.len()];
        reached[center_id] = true;

        let mut frontier = vec![center_id];
        for _ in 0..hops {
            frontier = frontier
                .iter()
                .flat_map(|&id| self.neighbors_of(id).iter().copied())
                .filter(|&id| !std::mem::replace(&mut reached[id], true))
                .collect();
            if frontier.is_empty() {
                break;
            }
        }

        reached
            .iter()
            .enumerate()
            .filter_map(|(id, &hit)| hit.then_some(id))
            .collect()
    }
}
