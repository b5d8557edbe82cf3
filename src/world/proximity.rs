// proximity.rs - Neighbourhood queries
//
// Brute-force pairwise scan. Contact is strict: discs that merely touch
// are not neighbours.

use crate::sim::Particle;

/// Check if two discs overlap
#[inline]
pub fn overlapping(a: &Particle, b: &Particle) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// Collect the reactive neighbourhood of particle `i` into `out`.
///
/// `i` itself always comes first, followed by every other reactive particle
/// overlapping it, in collection order.
pub fn neighborhood(particles: &[Particle], i: usize, out: &mut Vec<usize>) {
    out.clear();
    out.push(i);
    let centre = &particles[i];
    for (j, other) in particles.iter().enumerate() {
        if j != i && other.is_reactive() && overlapping(centre, other) {
            out.push(j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SpeciesId;
    use crate::sim::{ParticleState, Vector};

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(SpeciesId(0), Vector::new(x, y), Vector::ZERO, 1.0, 5.0)
    }

    #[test]
    fn touching_discs_are_not_neighbours() {
        let ps = [at(10.0, 10.0), at(20.0, 10.0), at(19.9, 10.0)];
        let mut out = Vec::new();
        neighborhood(&ps, 0, &mut out);
        assert_eq!(out, vec![0, 2]);
    }

    #[test]
    fn inactive_particles_are_skipped() {
        let mut ps = [at(10.0, 10.0), at(11.0, 10.0), at(12.0, 10.0)];
        ps[1].state = ParticleState::Cooldown;
        ps[2].state = ParticleState::Removed;
        let mut out = Vec::new();
        neighborhood(&ps, 0, &mut out);
        assert_eq!(out, vec![0]);
    }
}
