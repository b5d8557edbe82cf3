// render.rs - Encode simulation state to output buffer
//
// Output encoding (for canvas rendering), 4 x f32 per drawn particle:
//   [x, y, radius, palette slot]
//
// The canvas side resolves the slot to a fill colour and a text label via
// the palette. Particles consumed this tick are not drawn; queued products
// appear once they go live.

use crate::sim::Particle;

pub const RECORD_LEN: usize = 4;

pub struct Encoder {
    out: Vec<f32>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.out.clear();
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    /// Buffer length in f32 values
    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Number of encoded particles
    pub fn count(&self) -> usize {
        self.out.len() / RECORD_LEN
    }

    pub fn records(&self) -> &[f32] {
        &self.out
    }

    /// Encode every visible particle, in collection order
    pub fn encode_particles(&mut self, particles: &[Particle]) {
        self.clear();
        for p in particles.iter().filter(|p| !p.is_removed()) {
            self.out.extend_from_slice(&[p.pos.x, p.pos.y, p.radius, p.species.0 as f32]);
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
