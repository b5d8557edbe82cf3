// reaction.rs - Stoichiometric reaction rules
//
// Matching is plan-then-commit: a consumption plan is built against a
// read-only view of the particles and is only applied once every term on
// the consumed side is satisfied. A failed attempt leaves no trace.

use super::{Particle, ParticleState, SpawnParams, Vector};
use crate::error::SceneError;
use crate::scene::{Palette, SpeciesId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Consume reactants, produce products
    Forward,
    /// Consume products, regenerate reactants
    Reverse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term {
    pub species: SpeciesId,
    pub coefficient: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reaction {
    pub name: String,
    pub reactants: Vec<Term>,
    pub products: Vec<Term>,
    pub reversible: bool,
}

impl Reaction {
    pub fn new(name: impl Into<String>, reactants: Vec<Term>, products: Vec<Term>, reversible: bool) -> Self {
        Self {
            name: name.into(),
            reactants,
            products,
            reversible,
        }
    }

    /// Parse an equation such as `"2NO2 <=> N2O4"` or `"H2 + I2 -> 2HI"`.
    ///
    /// `<=>` makes the rule reversible, `->` does not. Each term is an
    /// optional positive coefficient followed by a formula. Formulas are
    /// interned into `palette`, picking up the fallback colour if new.
    pub fn parse(name: &str, equation: &str, palette: &mut Palette) -> Result<Self, SceneError> {
        let (lhs, rhs, reversible) = if let Some((l, r)) = equation.split_once("<=>") {
            (l, r, true)
        } else if let Some((l, r)) = equation.split_once("->") {
            (l, r, false)
        } else {
            return Err(SceneError::MissingArrow { equation: equation.to_string() });
        };

        let reactants = parse_side(lhs, equation, palette)?;
        let products = parse_side(rhs, equation, palette)?;
        Ok(Self::new(name, reactants, products, reversible))
    }

    /// Human-readable equation using the palette's formulas
    pub fn equation(&self, palette: &Palette) -> String {
        let side = |terms: &[Term]| {
            terms
                .iter()
                .map(|t| match t.coefficient {
                    1 => palette.formula(t.species).to_string(),
                    n => format!("{n}{}", palette.formula(t.species)),
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        let arrow = if self.reversible { "<=>" } else { "->" };
        format!("{} {arrow} {}", side(&self.reactants), side(&self.products))
    }

    #[inline]
    fn consumed(&self, direction: Direction) -> &[Term] {
        match direction {
            Direction::Forward => &self.reactants,
            Direction::Reverse => &self.products,
        }
    }

    #[inline]
    fn produced(&self, direction: Direction) -> &[Term] {
        match direction {
            Direction::Forward => &self.products,
            Direction::Reverse => &self.reactants,
        }
    }

    /// Pick the particles one firing in `direction` would consume.
    ///
    /// Terms are satisfied in order, each taking the first matching active
    /// candidates not already claimed by an earlier term. Returns `None` if
    /// any term comes up short. `particles` is never modified.
    pub fn consumption_plan(
        &self,
        direction: Direction,
        particles: &[Particle],
        candidates: &[usize],
    ) -> Option<Vec<usize>> {
        let mut plan = Vec::new();
        for term in self.consumed(direction) {
            let want = term.coefficient as usize;
            let start = plan.len();
            for &i in candidates {
                if plan.len() - start == want {
                    break;
                }
                let p = &particles[i];
                if p.is_reactive() && p.species == term.species && !plan.contains(&i) {
                    plan.push(i);
                }
            }
            if plan.len() - start < want {
                return None;
            }
        }
        Some(plan)
    }

    /// Build the particles one firing in `direction` yields, all in cooldown at `at`
    pub fn produced_particles(
        &self,
        direction: Direction,
        at: Vector,
        temperature: f32,
        params: &SpawnParams,
        rng: &mut u32,
    ) -> Vec<Particle> {
        let mut out = Vec::new();
        for term in self.produced(direction) {
            for _ in 0..term.coefficient {
                out.push(Particle::product(
                    term.species,
                    at,
                    temperature,
                    params.radius,
                    params.variation,
                    params.cooldown,
                    rng,
                ));
            }
        }
        out
    }

    /// Try to fire against a neighbourhood; forward first, then reverse if allowed.
    ///
    /// On success the consumed particles are marked removed and the products
    /// are appended to `queue`, positioned at the centroid of what was
    /// consumed. At most one direction fires per call.
    pub fn attempt(
        &self,
        particles: &mut [Particle],
        candidates: &[usize],
        queue: &mut Vec<Particle>,
        temperature: f32,
        params: &SpawnParams,
        rng: &mut u32,
    ) -> Option<Direction> {
        let directions: &[Direction] = if self.reversible {
            &[Direction::Forward, Direction::Reverse]
        } else {
            &[Direction::Forward]
        };

        for &direction in directions {
            let Some(plan) = self.consumption_plan(direction, particles, candidates) else {
                continue;
            };

            let at = Vector::average(plan.iter().map(|&i| particles[i].pos));
            for &i in &plan {
                particles[i].state = ParticleState::Removed;
            }
            queue.extend(self.produced_particles(direction, at, temperature, params, rng));
            return Some(direction);
        }
        None
    }
}

fn parse_side(side: &str, equation: &str, palette: &mut Palette) -> Result<Vec<Term>, SceneError> {
    if side.trim().is_empty() {
        return Err(SceneError::EmptySide { equation: equation.to_string() });
    }
    side.split('+').map(|t| parse_term(t, equation, palette)).collect()
}

fn parse_term(raw: &str, equation: &str, palette: &mut Palette) -> Result<Term, SceneError> {
    let term = raw.trim();
    let bad = || SceneError::BadTerm {
        term: term.to_string(),
        equation: equation.to_string(),
    };

    let digits = term.bytes().take_while(u8::is_ascii_digit).count();
    let (coef, formula) = term.split_at(digits);
    let formula = formula.trim();
    if formula.is_empty() || formula.contains(char::is_whitespace) {
        return Err(bad());
    }

    let coefficient = if coef.is_empty() { 1 } else { coef.parse::<u32>().map_err(|_| bad())? };
    if coefficient == 0 {
        return Err(SceneError::ZeroCoefficient {
            term: term.to_string(),
            equation: equation.to_string(),
        });
    }

    Ok(Term {
        species: palette.resolve(formula)?,
        coefficient,
    })
}
