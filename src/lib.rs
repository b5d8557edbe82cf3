use wasm_bindgen::prelude::*;

// ============================================================================
// REACTION WORLD - 2D reacting particle gas for a canvas front end
// ============================================================================
//
// The page owns the frame loop, the canvas and the controls. Each frame it
// calls `tick`, then reads the encoded particle buffer straight out of
// wasm memory:
//
//   const buf = new Float32Array(memory.buffer, world.output_ptr(), world.output_len());
//   for (let i = 0; i < buf.length; i += 4) {
//     const [x, y, r, slot] = buf.subarray(i, i + 4);
//     ctx.fillStyle = colors[slot];  // world.species_color(slot)
//     ...                            // label: world.species_label(slot)
//   }

pub mod error;
pub mod render;
pub mod scene;
pub mod sim;
pub mod world;

pub use error::SceneError;
pub use render::Encoder;
pub use scene::SceneConfig;
pub use sim::{Simulation, TickReport};

#[wasm_bindgen]
pub struct ReactionWorld {
    sim: Simulation,
    encoder: Encoder,
}

#[wasm_bindgen]
impl ReactionWorld {
    /// Default NO2/N2O4 scene sized to the canvas
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Result<ReactionWorld, JsError> {
        let scene = SceneConfig {
            width: w as f32,
            height: h as f32,
            ..SceneConfig::default()
        };
        Self::build(scene)
    }

    /// Scene from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<ReactionWorld, JsError> {
        Self::build(SceneConfig::from_json(json)?)
    }

    pub fn tick(&mut self) {
        self.sim.tick();
        self.encode();
    }

    // Controls

    pub fn set_temperature(&mut self, t: f32) {
        self.sim.set_temperature(t);
    }

    pub fn set_concentration(&mut self, formula: &str, count: u32) {
        self.sim.set_concentration(formula, count as usize);
    }

    pub fn toggle_pause(&mut self) {
        self.sim.toggle_pause();
    }

    pub fn click(&mut self, x: f32, y: f32) -> bool {
        self.sim.click(x, y)
    }

    pub fn reset(&mut self) {
        self.sim.reset();
        self.encode();
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.sim.resize(w as f32, h as f32);
    }

    // Palette lookups for the render sink

    pub fn species_count(&self) -> usize {
        self.sim.palette().len()
    }

    pub fn species_label(&self, slot: u16) -> String {
        self.sim.palette().formula(scene::SpeciesId(slot)).to_string()
    }

    pub fn species_color(&self, slot: u16) -> String {
        self.sim.palette().color(scene::SpeciesId(slot)).to_string()
    }

    /// Population per palette slot, for concentration charts
    pub fn counts(&self) -> js_sys::Uint32Array {
        let counts: Vec<u32> = self.sim.counts().into_iter().map(|(_, n)| n as u32).collect();
        js_sys::Uint32Array::from(counts.as_slice())
    }

    pub fn count_of(&self, formula: &str) -> u32 {
        self.sim.count_of(formula) as u32
    }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const f32 { self.encoder.ptr() }
    pub fn output_len(&self) -> usize { self.encoder.len() }
    pub fn particle_count(&self) -> usize { self.encoder.count() }
    pub fn temperature(&self) -> f32 { self.sim.temperature() }
    pub fn is_paused(&self) -> bool { self.sim.is_paused() }
    pub fn width(&self) -> f32 { self.sim.bounds().width }
    pub fn height(&self) -> f32 { self.sim.bounds().height }
}

impl ReactionWorld {
    fn build(mut scene: SceneConfig) -> Result<ReactionWorld, JsError> {
        if scene.seed.is_none() {
            scene.seed = Some(entropy());
        }
        let sim = Simulation::new(scene)?;
        let mut world = Self { sim, encoder: Encoder::new() };
        world.encode();
        Ok(world)
    }

    fn encode(&mut self) {
        self.encoder.encode_particles(self.sim.particles());
    }
}

// Seed for scenes that don't pin one
#[cfg(target_arch = "wasm32")]
fn entropy() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos())
}
