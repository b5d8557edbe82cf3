// sim/ - Reaction simulation
//
// One explicit context object owns the live particles, the queue of
// particles created this tick, the reaction rules and the control
// parameters. The outer frame driver calls `tick` once per frame; control
// inputs are applied between ticks.

mod particle;
mod reaction;
mod vector;

pub use particle::{Particle, ParticleState};
pub use reaction::{Direction, Reaction, Term};
pub use vector::Vector;

use crate::error::SceneError;
use crate::scene::{Palette, SceneConfig, SpeciesId};
use crate::world::{self, Bounds};

const DEFAULT_SEED: u32 = 0xDEADBEEF;

/// Per-scene constants every newly created particle needs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnParams {
    pub radius: f32,
    /// Speed spread as a fraction of temperature
    pub variation: f32,
    /// Cooldown distance budget for reaction products
    pub cooldown: f32,
}

/// What a single tick did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Removed particles deleted by the sweep
    pub swept: usize,
    /// Reactions that fired
    pub reactions: usize,
}

pub struct Simulation {
    scene: SceneConfig,
    bounds: Bounds,
    params: SpawnParams,
    palette: Palette,
    reactions: Vec<Reaction>,
    default_species: SpeciesId,
    populations: Vec<(SpeciesId, usize)>,

    // Particles
    particles: Vec<Particle>,
    pending: Vec<Particle>,

    // Controls
    temperature: f32,
    paused: bool,

    // RNG state
    rng: u32,

    // Scratch buffer for neighbourhood queries
    neighbors: Vec<usize>,
}

impl Simulation {
    pub fn new(scene: SceneConfig) -> Result<Self, SceneError> {
        scene.validate()?;

        let mut palette = Palette::new(scene.fallback_color.as_str());
        for s in &scene.species {
            palette.insert(&s.formula, &s.color)?;
        }

        let reactions = scene
            .reactions
            .iter()
            .map(|r| Reaction::parse(&r.name, &r.equation, &mut palette))
            .collect::<Result<Vec<_>, _>>()?;
        for r in &reactions {
            tracing::info!(name = %r.name, equation = %r.equation(&palette), "loaded reaction");
        }

        let default_species = palette.resolve(&scene.default_species)?;
        let populations = scene
            .populations
            .iter()
            .map(|p| palette.resolve(&p.formula).map(|s| (s, p.count as usize)))
            .collect::<Result<Vec<_>, _>>()?;
        let rng = match scene.seed {
            Some(0) | None => DEFAULT_SEED,
            Some(seed) => seed,
        };

        let mut sim = Self {
            bounds: Bounds::new(scene.width, scene.height),
            params: SpawnParams {
                radius: scene.radius,
                variation: scene.speed_variation,
                cooldown: scene.cooldown,
            },
            palette,
            reactions,
            default_species,
            populations,
            particles: Vec::new(),
            pending: Vec::new(),
            temperature: scene.temperature,
            paused: false,
            rng,
            neighbors: Vec::new(),
            scene,
        };
        sim.reset();
        Ok(sim)
    }

    /// Drop every particle and re-seed the scene's starting populations
    pub fn reset(&mut self) {
        self.particles.clear();
        self.pending.clear();
        self.temperature = self.scene.temperature;
        self.paused = false;

        for (species, count) in self.populations.clone() {
            self.spawn_random(species, count);
        }

        tracing::info!(
            particles = self.pending.len(),
            temperature = self.temperature,
            "simulation reset"
        );
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) -> TickReport {
        if self.paused {
            return TickReport::default();
        }

        // Products of the previous tick go live now
        self.particles.append(&mut self.pending);

        // Sweep: drop consumed particles, move the rest
        let total = self.particles.len();
        let mut write = 0;
        for read in 0..total {
            if self.particles[read].is_removed() {
                continue;
            }
            self.particles[read].update(&self.bounds);
            self.particles.swap(write, read);
            write += 1;
        }
        self.particles.truncate(write);

        // React: first matching rule per colliding neighbourhood wins
        let mut reactions = 0;
        let mut neighbors = std::mem::take(&mut self.neighbors);
        for i in 0..self.particles.len() {
            if !self.particles[i].is_reactive() {
                continue;
            }
            world::neighborhood(&self.particles, i, &mut neighbors);
            if neighbors.len() < 2 {
                // no collision, nothing to react with
                continue;
            }

            for reaction in &self.reactions {
                let fired = reaction.attempt(
                    &mut self.particles,
                    &neighbors,
                    &mut self.pending,
                    self.temperature,
                    &self.params,
                    &mut self.rng,
                );
                if let Some(direction) = fired {
                    tracing::trace!(reaction = %reaction.name, ?direction, "reaction fired");
                    reactions += 1;
                    break;
                }
            }
        }
        self.neighbors = neighbors;

        TickReport {
            swept: total - write,
            reactions,
        }
    }

    /// Set the container temperature, rescaling every live and queued particle
    pub fn set_temperature(&mut self, temperature: f32) {
        let temperature = temperature.max(0.0);
        tracing::debug!(from = self.temperature, to = temperature, "temperature change");
        for p in self.particles.iter_mut().chain(self.pending.iter_mut()) {
            p.change_temperature(temperature);
        }
        self.temperature = temperature;
    }

    /// Add or remove particles of `formula` until `count_of(formula) == target`.
    ///
    /// Excess particles are removed oldest first. New ones appear at random
    /// positions at the current temperature, subject to `max_particles`.
    /// An unknown formula is only registered when particles are requested.
    pub fn set_concentration(&mut self, formula: &str, target: usize) {
        let species = if target == 0 {
            match self.palette.get(formula) {
                Some(species) => species,
                None => return,
            }
        } else {
            match self.palette.resolve(formula) {
                Ok(species) => species,
                Err(err) => {
                    tracing::debug!(formula, %err, "concentration change ignored");
                    return;
                }
            }
        };
        let current = self.count(species);
        tracing::debug!(formula, current, target, "concentration change");

        if current > target {
            self.remove_oldest(species, current - target);
        } else if current < target {
            self.spawn_random(species, target - current);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        tracing::debug!(paused, "pause");
        self.paused = paused;
    }

    /// Drop one particle of the default species at a pointer position
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        let p = Particle::spawn(
            self.default_species,
            Vector::new(x, y),
            self.temperature,
            self.params.radius,
            self.params.variation,
            &mut self.rng,
        );
        self.enqueue(p)
    }

    /// Queue a particle for the next tick; false if the container is full
    pub fn enqueue(&mut self, particle: Particle) -> bool {
        if self.population() >= self.scene.max_particles {
            tracing::warn!(limit = self.scene.max_particles, "particle limit reached");
            return false;
        }
        self.pending.push(particle);
        true
    }

    /// Change the container size; stray particles bounce back in on their next update
    pub fn resize(&mut self, width: f32, height: f32) {
        let min = self.params.radius * 2.0;
        self.scene.width = width.max(min);
        self.scene.height = height.max(min);
        self.bounds = Bounds::new(self.scene.width, self.scene.height);
    }

    /// Particles of `species` that are still in play.
    ///
    /// Counts live particles that are Active or in Cooldown plus anything
    /// queued for the next tick. Particles consumed this tick but not yet
    /// swept are excluded.
    pub fn count(&self, species: SpeciesId) -> usize {
        self.particles
            .iter()
            .chain(self.pending.iter())
            .filter(|p| p.species == species && !p.is_removed())
            .count()
    }

    pub fn count_of(&self, formula: &str) -> usize {
        self.palette.get(formula).map_or(0, |s| self.count(s))
    }

    /// Per-species counts in palette order
    pub fn counts(&self) -> Vec<(SpeciesId, usize)> {
        self.palette.ids().map(|s| (s, self.count(s))).collect()
    }

    fn population(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_removed()).count() + self.pending.len()
    }

    fn spawn_random(&mut self, species: SpeciesId, count: usize) {
        let r = self.params.radius;
        let (w, h) = (self.bounds.width, self.bounds.height);
        for _ in 0..count {
            let pos = Vector::new(
                r + Self::rand(&mut self.rng) * (w - 2.0 * r),
                r + Self::rand(&mut self.rng) * (h - 2.0 * r),
            );
            let p = Particle::spawn(
                species,
                pos,
                self.temperature,
                r,
                self.params.variation,
                &mut self.rng,
            );
            if !self.enqueue(p) {
                return;
            }
        }
    }

    fn remove_oldest(&mut self, species: SpeciesId, mut excess: usize) {
        for p in self.particles.iter_mut() {
            if excess == 0 {
                return;
            }
            if p.species == species && !p.is_removed() {
                p.state = ParticleState::Removed;
                excess -= 1;
            }
        }
        self.pending.retain(|p| {
            if excess > 0 && p.species == species {
                excess -= 1;
                return false;
            }
            true
        });
    }

    // Random number generator (xorshift32), uniform in [0, 1)
    #[inline(always)]
    pub fn rand(rng: &mut u32) -> f32 {
        *rng ^= *rng << 13;
        *rng ^= *rng >> 17;
        *rng ^= *rng << 5;
        (*rng >> 8) as f32 * (1.0 / 16777216.0)
    }

    // Accessors
    pub fn particles(&self) -> &[Particle] { &self.particles }
    pub fn pending(&self) -> &[Particle] { &self.pending }
    pub fn reactions(&self) -> &[Reaction] { &self.reactions }
    pub fn palette(&self) -> &Palette { &self.palette }
    pub fn scene(&self) -> &SceneConfig { &self.scene }
    pub fn bounds(&self) -> Bounds { self.bounds }
    pub fn params(&self) -> SpawnParams { self.params }
    pub fn temperature(&self) -> f32 { self.temperature }
    pub fn is_paused(&self) -> bool { self.paused }
    pub fn default_species(&self) -> SpeciesId { self.default_species }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Population;

    fn empty_scene() -> SceneConfig {
        SceneConfig {
            populations: Vec::new(),
            seed: Some(99),
            ..SceneConfig::default()
        }
    }

    #[test]
    fn rand_stays_in_unit_interval() {
        let mut rng = DEFAULT_SEED;
        for _ in 0..10_000 {
            let r = Simulation::rand(&mut rng);
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn reset_seeds_populations_into_queue() {
        let sim = Simulation::new(SceneConfig {
            populations: vec![
                Population { formula: "NO2".into(), count: 5 },
                Population { formula: "N2O4".into(), count: 3 },
            ],
            ..empty_scene()
        })
        .unwrap();

        assert!(sim.particles().is_empty());
        assert_eq!(sim.pending().len(), 8);
        assert_eq!(sim.count_of("NO2"), 5);
        assert_eq!(sim.count_of("N2O4"), 3);
        assert_eq!(sim.count_of("XYZ"), 0);
        let r = sim.params().radius;
        assert!(sim.pending().iter().all(|p| sim.bounds().contains(p.pos, r)));
    }

    #[test]
    fn queued_particles_go_live_on_next_tick() {
        let mut sim = Simulation::new(empty_scene()).unwrap();
        assert!(sim.click(100.0, 100.0));
        assert!(sim.particles().is_empty());
        assert_eq!(sim.pending().len(), 1);

        sim.tick();
        assert_eq!(sim.particles().len(), 1);
        assert!(sim.pending().is_empty());
        assert_eq!(sim.particles()[0].species, sim.default_species());
        assert!(sim.particles()[0].is_reactive());
    }

    #[test]
    fn sweep_keeps_order_and_skips_nothing() {
        let mut sim = Simulation::new(SceneConfig {
            reactions: Vec::new(),
            ..empty_scene()
        })
        .unwrap();
        let s = sim.default_species();
        for i in 0..6 {
            let pos = Vector::new(50.0 + 40.0 * i as f32, 100.0);
            sim.enqueue(Particle::new(s, pos, Vector::ZERO, 1.0, 12.0));
        }
        sim.tick();

        // two adjacent removals and the last one
        sim.particles[1].state = ParticleState::Removed;
        sim.particles[2].state = ParticleState::Removed;
        sim.particles[5].state = ParticleState::Removed;
        let report = sim.tick();

        assert_eq!(report.swept, 3);
        let xs: Vec<f32> = sim.particles().iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![50.0, 170.0, 210.0]);
    }

    #[test]
    fn temperature_rescales_live_and_queued() {
        let mut sim = Simulation::new(empty_scene()).unwrap();
        sim.click(100.0, 100.0);
        sim.tick();
        sim.click(200.0, 200.0);

        let ratios: Vec<f32> = sim
            .particles()
            .iter()
            .chain(sim.pending())
            .map(|p| p.vel.magnitude() / p.temperature)
            .collect();

        sim.set_temperature(6.0);
        assert_eq!(sim.temperature(), 6.0);
        for (p, k) in sim.particles().iter().chain(sim.pending()).zip(ratios) {
            assert_eq!(p.temperature, 6.0);
            assert!((p.vel.magnitude() / 6.0 - k).abs() < 1e-4);
        }

        sim.set_temperature(-3.0);
        assert_eq!(sim.temperature(), 0.0);
    }

    #[test]
    fn concentration_spawns_up_to_target() {
        let mut sim = Simulation::new(SceneConfig {
            reactions: Vec::new(),
            ..empty_scene()
        })
        .unwrap();
        sim.set_concentration("NO2", 12);
        assert_eq!(sim.count_of("NO2"), 12);
        sim.tick();
        sim.set_concentration("NO2", 15);
        assert_eq!(sim.count_of("NO2"), 15);
        assert_eq!(sim.pending().len(), 3);
    }

    #[test]
    fn concentration_removes_oldest_first() {
        let mut sim = Simulation::new(SceneConfig {
            reactions: Vec::new(),
            ..empty_scene()
        })
        .unwrap();
        sim.set_concentration("NO2", 4);
        sim.tick();
        sim.set_concentration("NO2", 6);

        sim.set_concentration("NO2", 1);
        assert_eq!(sim.count_of("NO2"), 1);
        // every live particle went before any queued one
        assert!(sim.particles().iter().all(Particle::is_removed));
        assert_eq!(sim.pending().len(), 1);

        sim.tick();
        assert_eq!(sim.particles().len(), 1);
    }

    #[test]
    fn concentration_of_unknown_species_registers_it() {
        let mut sim = Simulation::new(empty_scene()).unwrap();
        sim.set_concentration("Ar", 2);
        let ar = sim.palette().get("Ar").unwrap();
        assert_eq!(sim.palette().color(ar), "#888888");
        assert_eq!(sim.count(ar), 2);
    }

    #[test]
    fn zero_concentration_of_unknown_species_registers_nothing() {
        let mut sim = Simulation::new(empty_scene()).unwrap();
        let before = sim.palette().len();
        sim.set_concentration("Unknown", 0);
        assert_eq!(sim.palette().len(), before);
        assert_eq!(sim.palette().get("Unknown"), None);
        assert!(sim.pending().is_empty());
    }

    #[test]
    fn full_palette_never_aliases_species() {
        let mut sim = Simulation::new(SceneConfig {
            reactions: Vec::new(),
            ..empty_scene()
        })
        .unwrap();
        let no2 = sim.palette().get("NO2").unwrap();
        let mut i = 0;
        while sim.palette().len() < crate::scene::MAX_SPECIES {
            sim.set_concentration(&format!("X{i}"), 1);
            sim.set_concentration(&format!("X{i}"), 0);
            i += 1;
        }

        sim.set_concentration("Overflow", 3);
        assert_eq!(sim.palette().get("Overflow"), None);
        assert_eq!(sim.palette().len(), crate::scene::MAX_SPECIES);
        assert_eq!(sim.count(no2), 0);
        assert_eq!(sim.palette().formula(no2), "NO2");
    }

    #[test]
    fn spawning_respects_particle_limit() {
        let mut sim = Simulation::new(SceneConfig {
            max_particles: 5,
            ..empty_scene()
        })
        .unwrap();
        sim.set_concentration("NO2", 10);
        assert_eq!(sim.count_of("NO2"), 5);
        assert!(!sim.click(10.0, 10.0));
    }

    #[test]
    fn pause_toggles() {
        let mut sim = Simulation::new(empty_scene()).unwrap();
        assert!(!sim.is_paused());
        sim.toggle_pause();
        assert!(sim.is_paused());
        assert_eq!(sim.tick(), TickReport::default());
        sim.toggle_pause();
        assert!(!sim.is_paused());
    }

    #[test]
    fn reset_restores_scene() {
        let mut sim = Simulation::new(SceneConfig::default()).unwrap();
        sim.set_temperature(9.0);
        sim.set_paused(true);
        sim.set_concentration("N2O4", 7);
        sim.reset();
        assert_eq!(sim.temperature(), 2.0);
        assert!(!sim.is_paused());
        assert_eq!(sim.count_of("NO2"), 40);
        assert_eq!(sim.count_of("N2O4"), 0);
    }

    #[test]
    fn resize_moves_walls() {
        let mut sim = Simulation::new(empty_scene()).unwrap();
        sim.resize(300.0, 1.0);
        assert_eq!(sim.bounds(), Bounds::new(300.0, 24.0));
    }

    #[test]
    fn bad_equation_fails_construction() {
        let mut scene = empty_scene();
        scene.reactions[0].equation = "2NO2 N2O4".into();
        assert!(matches!(Simulation::new(scene), Err(SceneError::MissingArrow { .. })));
    }
}
