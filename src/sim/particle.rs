// particle.rs - A single molecule in the container
//
// Owns its own kinematics: wall reflection, temperature rescaling and the
// post-reaction cooldown that keeps fresh products from reacting at once.

use std::f32::consts::TAU;

use super::{Simulation, Vector};
use crate::scene::SpeciesId;
use crate::world::Bounds;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
    /// Moving and eligible for reactions
    Active,
    /// Moving, but invisible to reaction matching until the budget runs out
    Cooldown,
    /// Consumed by a reaction; deleted on the next sweep
    Removed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub species: SpeciesId,
    pub radius: f32,
    pub pos: Vector,
    pub vel: Vector,
    pub temperature: f32,
    pub state: ParticleState,
    /// Distance still to travel before leaving cooldown
    pub cooldown: f32,
}

impl Particle {
    pub fn new(species: SpeciesId, pos: Vector, vel: Vector, temperature: f32, radius: f32) -> Self {
        Self {
            species,
            radius,
            pos,
            vel,
            temperature,
            state: ParticleState::Active,
            cooldown: 0.0,
        }
    }

    /// Spawn an active particle heading in a random direction.
    ///
    /// Speed is the temperature scaled by a random factor in
    /// `[1 - variation, 1 + variation)`.
    pub fn spawn(
        species: SpeciesId,
        pos: Vector,
        temperature: f32,
        radius: f32,
        variation: f32,
        rng: &mut u32,
    ) -> Self {
        let speed = temperature * (1.0 + variation * (Simulation::rand(rng) * 2.0 - 1.0));
        let heading = Simulation::rand(rng) * TAU;
        let vel = Vector::new(speed, 0.0).rotate(heading);
        Self::new(species, pos, vel, temperature, radius)
    }

    /// Spawn a reaction product, non-reactive for `budget` units of travel
    pub fn product(
        species: SpeciesId,
        pos: Vector,
        temperature: f32,
        radius: f32,
        variation: f32,
        budget: f32,
        rng: &mut u32,
    ) -> Self {
        let mut p = Self::spawn(species, pos, temperature, radius, variation, rng);
        p.state = ParticleState::Cooldown;
        p.cooldown = budget;
        p
    }

    #[inline]
    pub fn is_reactive(&self) -> bool {
        self.state == ParticleState::Active
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.state == ParticleState::Removed
    }

    /// Rescale velocity for a new temperature.
    ///
    /// Keeps this particle's speed-to-temperature ratio, so its deviation
    /// from the population mean survives the change.
    pub fn change_temperature(&mut self, new_temp: f32) {
        if self.temperature == 0.0 {
            return;
        }
        let ratio = self.vel.magnitude() / self.temperature;
        self.vel = self.vel.normalize().scale(ratio * new_temp);
        self.temperature = new_temp;
    }

    /// Advance one tick: move, bounce off the walls, burn cooldown
    pub fn update(&mut self, bounds: &Bounds) {
        let mut pos = self.pos + self.vel;
        bounds.reflect(&mut pos, &mut self.vel, self.radius);
        self.pos = pos;

        match self.state {
            ParticleState::Cooldown => {
                self.cooldown -= self.vel.magnitude();
                if self.cooldown <= 0.0 {
                    self.cooldown = 0.0;
                    self.state = ParticleState::Active;
                }
            }
            ParticleState::Active => self.cooldown = 0.0,
            ParticleState::Removed => {}
        }
    }
}
