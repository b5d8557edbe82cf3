// config.rs - Scene configuration
//
// Every field has a default, so a scene JSON only needs to state what it
// changes. The defaults describe the NO2/N2O4 equilibrium.

use serde::{Deserialize, Serialize};

use super::Species;
use crate::error::SceneError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionSpec {
    pub name: String,
    /// e.g. `"2NO2 <=> N2O4"` or `"H2 + I2 -> 2HI"`
    pub equation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub formula: String,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: f32,
    pub height: f32,
    /// Radius of every particle
    pub radius: f32,
    /// Distance a fresh product travels before it can react
    pub cooldown: f32,
    /// Spawn speed spread as a fraction of temperature (0.5 = +/-50%)
    pub speed_variation: f32,
    /// Initial container temperature (mean speed, px per tick)
    pub temperature: f32,
    /// Cap on user-driven spawning; reaction products ignore it
    pub max_particles: usize,
    pub seed: Option<u32>,
    /// Species placed by a pointer click
    pub default_species: String,
    pub fallback_color: String,
    pub species: Vec<Species>,
    pub reactions: Vec<ReactionSpec>,
    pub populations: Vec<Population>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            radius: 12.0,
            cooldown: 60.0,
            speed_variation: 0.5,
            temperature: 2.0,
            max_particles: 1000,
            seed: None,
            default_species: "NO2".to_string(),
            fallback_color: "#888888".to_string(),
            species: vec![
                Species { formula: "NO2".to_string(), color: "#b5542c".to_string() },
                Species { formula: "N2O4".to_string(), color: "#e8c547".to_string() },
            ],
            reactions: vec![ReactionSpec {
                name: "dimerisation".to_string(),
                equation: "2NO2 <=> N2O4".to_string(),
            }],
            populations: vec![Population { formula: "NO2".to_string(), count: 40 }],
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("radius", self.radius),
            ("cooldown", self.cooldown),
            ("speed_variation", self.speed_variation),
            ("temperature", self.temperature),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::InvalidConstant { name, value });
            }
        }
        if self.radius <= 0.0 || self.width < self.radius * 2.0 || self.height < self.radius * 2.0 {
            return Err(SceneError::Container {
                width: self.width,
                height: self.height,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let scene = SceneConfig::from_json(r#"{ "width": 320, "temperature": 5.5 }"#).unwrap();
        assert_eq!(scene.width, 320.0);
        assert_eq!(scene.temperature, 5.5);
        assert_eq!(scene.height, 500.0);
        assert_eq!(scene.reactions.len(), 1);
    }

    #[test]
    fn full_scene_parses() {
        let json = r##"{
            "width": 400, "height": 300, "radius": 8, "seed": 42,
            "default_species": "H2",
            "species": [{ "formula": "H2", "color": "#ffffff" }],
            "reactions": [{ "name": "hi", "equation": "H2 + I2 <=> 2HI" }],
            "populations": [{ "formula": "H2", "count": 10 }, { "formula": "I2", "count": 10 }]
        }"##;
        let scene = SceneConfig::from_json(json).unwrap();
        assert_eq!(scene.seed, Some(42));
        assert_eq!(scene.populations[1].formula, "I2");
        assert_eq!(scene.reactions[0].equation, "H2 + I2 <=> 2HI");
    }

    #[test]
    fn rejects_tiny_container() {
        let err = SceneConfig::from_json(r#"{ "width": 10, "radius": 12 }"#).unwrap_err();
        assert!(matches!(err, SceneError::Container { .. }));
    }

    #[test]
    fn rejects_negative_constants() {
        let err = SceneConfig::from_json(r#"{ "cooldown": -1 }"#).unwrap_err();
        assert!(matches!(err, SceneError::InvalidConstant { name: "cooldown", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(SceneConfig::from_json("{ width: }"), Err(SceneError::Json(_))));
    }

    #[test]
    fn survives_a_json_round_trip() {
        let scene = SceneConfig::default();
        let back = SceneConfig::from_json(&scene.to_json().unwrap()).unwrap();
        assert_eq!(back, scene);
    }
}
