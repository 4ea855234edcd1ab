use crate::particle::Particle;
use crate::utils::Bounds2;

/// One square cell of the collision grid and the inside particles overlapping it.
#[derive(Clone, Debug)]
pub struct Region {
    pub bounds: Bounds2,
    /// indices into the inside population
    pub particles: Vec<usize>,
}

/// Fixed grid of square regions covering the container's maximum extent.
///
/// Columns run right to left from the container's fixed right edge and rows
/// bottom to top from its fixed bottom, so resizing the (left) wall never
/// moves a region boundary. A particle straddling a seam is listed in every
/// region it touches.
pub struct RegionGrid {
    pub max_bounds: Bounds2,
    pub region_length: f64,
    columns: usize,
    rows: usize,
    regions: Vec<Region>, // row-major, column 0 is the rightmost
}

impl RegionGrid {
    pub fn new(max_bounds: Bounds2, region_length: f64) -> Self {
        assert!(region_length > 0.0, "region length must be positive");
        assert!(
            max_bounds.width() > 0.0 && max_bounds.height() > 0.0,
            "grid bounds must have positive area"
        );
        let columns = (max_bounds.width() / region_length).ceil() as usize;
        let rows = (max_bounds.height() / region_length).ceil() as usize;
        let mut regions = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let max_x = max_bounds.max_x - column as f64 * region_length;
                let min_y = max_bounds.min_y + row as f64 * region_length;
                regions.push(Region {
                    bounds: Bounds2::new(max_x - region_length, min_y, max_x, min_y + region_length),
                    particles: Vec::new(),
                });
            }
        }
        Self {
            max_bounds,
            region_length,
            columns,
            rows,
            regions,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Empty every region's membership, keeping allocations.
    pub fn clear(&mut self) {
        for region in &mut self.regions {
            region.particles.clear();
        }
    }

    /// Add each particle to every region its bounds intersect.
    pub fn assign(&mut self, particles: &[Particle]) {
        for (i, particle) in particles.iter().enumerate() {
            let bounds = particle.bounds();
            let Some((c0, c1)) = self.column_range(&bounds) else { continue };
            let Some((r0, r1)) = self.row_range(&bounds) else { continue };
            for row in r0..=r1 {
                for column in c0..=c1 {
                    let region = &mut self.regions[column + row * self.columns];
                    if region.bounds.intersects(&bounds) {
                        region.particles.push(i);
                    }
                }
            }
        }
    }

    /// Indices of the regions listing particle `index`.
    pub fn regions_containing(&self, index: usize) -> Vec<usize> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, r)| r.particles.contains(&index))
            .map(|(k, _)| k)
            .collect()
    }

    // Column c spans [max_x - (c+1)L, max_x - cL]; closed intersection with [a, b]
    // holds for (max_x - b)/L - 1 <= c <= (max_x - a)/L.
    fn column_range(&self, b: &Bounds2) -> Option<(usize, usize)> {
        let l = self.region_length;
        let lo = ((self.max_bounds.max_x - b.max_x) / l - 1.0).ceil();
        let hi = ((self.max_bounds.max_x - b.min_x) / l).floor();
        clamp_range(lo, hi, self.columns)
    }

    fn row_range(&self, b: &Bounds2) -> Option<(usize, usize)> {
        let l = self.region_length;
        let lo = ((b.min_y - self.max_bounds.min_y) / l - 1.0).ceil();
        let hi = ((b.max_y - self.max_bounds.min_y) / l).floor();
        clamp_range(lo, hi, self.rows)
    }
}

fn clamp_range(lo: f64, hi: f64, count: usize) -> Option<(usize, usize)> {
    if !(lo.is_finite() && hi.is_finite()) || hi < 0.0 || lo > (count - 1) as f64 || lo > hi {
        return None;
    }
    Some((lo.max(0.0) as usize, hi.min((count - 1) as f64) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::ParticleType;
    use ultraviolet::DVec2;

    fn grid() -> RegionGrid {
        // 15000 x 8750 container anchored at the origin's bottom-right
        RegionGrid::new(Bounds2::new(-15000.0, 0.0, 0.0, 8750.0), 2000.0)
    }

    fn heavy(x: f64, y: f64) -> Particle {
        Particle::new_from_species(ParticleType::Heavy, DVec2::new(x, y), DVec2::zero())
    }

    #[test]
    fn tiles_from_right_and_bottom() {
        let g = grid();
        assert_eq!(g.columns(), 8);
        assert_eq!(g.rows(), 5);
        let first = &g.regions()[0].bounds;
        assert_eq!(first.max_x, 0.0);
        assert_eq!(first.min_x, -2000.0);
        assert_eq!(first.min_y, 0.0);
        // the last column overhangs the left edge instead of the right one
        let last = &g.regions()[g.columns() - 1].bounds;
        assert!(last.min_x <= -15000.0);
    }

    #[test]
    fn interior_particle_in_one_region() {
        let mut g = grid();
        g.assign(&[heavy(-1000.0, 1000.0)]);
        assert_eq!(g.regions_containing(0), vec![0]);
    }

    #[test]
    fn seam_particle_in_several_regions() {
        let mut g = grid();
        // straddles the seam at x = -2000 and y = 2000
        g.assign(&[heavy(-2000.0, 2000.0)]);
        assert_eq!(g.regions_containing(0).len(), 4);
    }

    #[test]
    fn clear_empties_membership() {
        let mut g = grid();
        g.assign(&[heavy(-5000.0, 4000.0)]);
        g.clear();
        assert!(g.regions().iter().all(|r| r.particles.is_empty()));
    }

    #[test]
    fn every_position_in_max_bounds_is_covered() {
        let mut g = grid();
        let mut particles = Vec::new();
        let mut x = -15000.0;
        while x <= 0.0 {
            let mut y = 0.0;
            while y <= 8750.0 {
                particles.push(heavy(x, y));
                y += 437.5;
            }
            x += 750.0;
        }
        g.assign(&particles);
        for i in 0..particles.len() {
            assert!(!g.regions_containing(i).is_empty(), "particle {} unassigned", i);
        }
    }

    #[test]
    fn particle_far_outside_is_skipped() {
        let mut g = grid();
        g.assign(&[heavy(5000.0, 20000.0)]);
        assert!(g.regions_containing(0).is_empty());
    }
}
