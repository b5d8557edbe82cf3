// palette.rs - Species registry
//
// Formulas are interned once; particles and reaction terms carry the
// small `SpeciesId` instead of a string. The slot index doubles as the
// palette index handed to the render sink.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Every slot must be addressable by a `SpeciesId`
pub const MAX_SPECIES: usize = u16::MAX as usize + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub u16);

impl SpeciesId {
    #[inline]
    pub fn slot(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub formula: String,
    pub color: String,
}

#[derive(Clone, Debug)]
pub struct Palette {
    species: Vec<Species>,
    index: HashMap<String, SpeciesId>,
    fallback: String,
}

impl Palette {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            species: Vec::new(),
            index: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Register a species with an explicit colour, replacing any earlier colour
    pub fn insert(&mut self, formula: &str, color: &str) -> Result<SpeciesId, SceneError> {
        if let Some(&id) = self.index.get(formula) {
            self.species[id.slot()].color = color.to_string();
            return Ok(id);
        }
        self.push(formula, color.to_string())
    }

    /// Look up a formula, registering it with the fallback colour if unseen
    pub fn resolve(&mut self, formula: &str) -> Result<SpeciesId, SceneError> {
        if let Some(&id) = self.index.get(formula) {
            return Ok(id);
        }
        let fallback = self.fallback.clone();
        let id = self.push(formula, fallback)?;
        tracing::warn!(formula, color = %self.fallback, "unknown species, using fallback colour");
        Ok(id)
    }

    pub fn get(&self, formula: &str) -> Option<SpeciesId> {
        self.index.get(formula).copied()
    }

    pub fn formula(&self, id: SpeciesId) -> &str {
        self.species.get(id.slot()).map_or("?", |s| s.formula.as_str())
    }

    pub fn color(&self, id: SpeciesId) -> &str {
        self.species.get(id.slot()).map_or(self.fallback.as_str(), |s| s.color.as_str())
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        (0..self.species.len()).map(|i| SpeciesId(i as u16))
    }

    fn push(&mut self, formula: &str, color: String) -> Result<SpeciesId, SceneError> {
        let slot = u16::try_from(self.species.len()).map_err(|_| SceneError::PaletteFull {
            formula: formula.to_string(),
            limit: MAX_SPECIES,
        })?;
        let id = SpeciesId(slot);
        self.species.push(Species { formula: formula.to_string(), color });
        self.index.insert(formula.to_string(), id);
        Ok(id)
    }
}
