//! The reduction engine: a fixed-point rewriter over correctness-preserving
//! rules that shrinks an [`Instance`] before the metaheuristics run on it
//! (spec §4.3).
//!
//! [`Reduction::new`] runs the full rule suite, in a fixed order, against
//! a [`working::ReductionInstance`] until a round changes nothing, the
//! round budget is spent, or the [`Timer`] signals time is up. The result
//! is a (typically much smaller) reduced [`Instance`] plus an
//! [`UnreductionMap`] that lifts solutions and bounds back.

mod rules;
mod unreduction;
mod working;

pub use unreduction::{UnreductionMap, UnreductionOperations};

use crate::instance::Instance;
use crate::rng::from_seed;
use crate::timer::Timer;
use crate::types::{Counter, Seed};
use working::ReductionInstance;

use std::sync::Arc;

/// Parameters governing the reduction engine.
#[derive(Debug, Clone)]
pub struct ReductionParameters {
    /// Whether reduction runs at all. If `false`, [`Reduction::new`]
    /// returns the instance unchanged with an identity unreduction map.
    pub reduce: bool,
    /// Upper bound on the number of fixed-point rounds.
    pub maximum_number_of_rounds: Counter,
    /// Whether `reduce_set_folding` runs (CLI `--set-folding`).
    pub enable_set_folding: bool,
    /// Whether `reduce_twin` runs (CLI `--twin`).
    pub enable_twin: bool,
    /// Whether `reduce_unconfined_sets` runs (CLI `--unconfined-sets`).
    pub enable_unconfined_sets: bool,
    /// Whether to run the expensive, randomly sampled general set
    /// domination check (`reduce_dominated_sets`, CLI
    /// `--dominated-sets-removal`). Off by default: quadratic in the
    /// worst case, not worth it on large instances.
    pub enable_dominated_sets: bool,
    /// Whether to run the expensive, randomly sampled general element
    /// domination check (`reduce_dominated_elements`, CLI
    /// `--dominated-elements-removal`).
    pub enable_dominated_elements: bool,
    /// Whether to run the sampled "crown" domination check
    /// (`reduce_crown`, CLI `--crown`). Off by default: the upstream
    /// rule it approximates is explicitly called out as not always
    /// safe (spec §9 Open Questions); this implementation is a sound
    /// but incomplete approximation, still gated behind its own flag.
    pub enable_crown: bool,
    /// Number of samples drawn per round by the general domination
    /// checks, when enabled.
    pub dominated_sample_size: usize,
    /// Components with at most this many live sets are solved to
    /// optimality by brute force.
    pub small_component_max_sets: usize,
    /// Seed for the domination checks' sampling.
    pub seed: Seed,
}

impl Default for ReductionParameters {
    fn default() -> Self {
        Self {
            reduce: true,
            maximum_number_of_rounds: 999,
            enable_set_folding: true,
            enable_twin: true,
            enable_unconfined_sets: true,
            enable_dominated_sets: false,
            enable_dominated_elements: false,
            enable_crown: false,
            dominated_sample_size: 64,
            small_component_max_sets: 16,
            seed: 0,
        }
    }
}

/// Runs the reduction engine once and holds onto its result.
pub struct Reduction {
    instance: Instance,
    unreduction: UnreductionMap,
}

impl Reduction {
    /// Reduce `original` according to `parameters`, stopping early if
    /// `timer` signals the run should end.
    pub fn new(original: Arc<Instance>, parameters: &ReductionParameters, timer: &Timer) -> Self {
        if !parameters.reduce {
            let unreduction = UnreductionMap::identity(&original);
            return Self {
                instance: (*original).clone(),
                unreduction,
            };
        }

        let mut rng = from_seed(parameters.seed);
        let mut working = ReductionInstance::from_instance(original);
        let mut round = 0;
        while round < parameters.maximum_number_of_rounds {
            if timer.needs_to_end() {
                break;
            }
            let mut changed = false;
            changed |= rules::reduce_mandatory_sets(&mut working);
            changed |= rules::reduce_dominated_singletons(&mut working);
            changed |= rules::reduce_identical_sets(&mut working);
            changed |= rules::reduce_identical_elements(&mut working);
            changed |= rules::reduce_dominated_sets_2(&mut working);
            changed |= rules::reduce_dominated_elements_2(&mut working);
            if parameters.enable_set_folding {
                changed |= rules::reduce_set_folding(&mut working);
            }
            if parameters.enable_twin {
                changed |= rules::reduce_twin(&mut working);
            }
            if parameters.enable_unconfined_sets {
                changed |= rules::reduce_unconfined_sets(&mut working);
            }
            changed |= rules::reduce_small_components(&mut working, parameters.small_component_max_sets);
            if parameters.enable_dominated_sets {
                changed |= rules::reduce_dominated_sets(
                    &mut working,
                    &mut rng,
                    parameters.dominated_sample_size,
                );
            }
            if parameters.enable_dominated_elements {
                changed |= rules::reduce_dominated_elements(
                    &mut working,
                    &mut rng,
                    parameters.dominated_sample_size,
                );
            }
            if parameters.enable_crown {
                changed |= rules::reduce_crown(&mut working, &mut rng, parameters.dominated_sample_size);
            }
            if working.live_set_fraction() < 0.9 || working.live_element_fraction() < 0.9 {
                working.compact();
            }
            round += 1;
            if !changed {
                break;
            }
        }
        working.compact();
        debug_assert!(working.check());
        let (instance, unreduction) = working.finish();
        Self {
            instance,
            unreduction,
        }
    }

    /// The reduced instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Takes ownership of the reduced instance, discarding the
    /// unreduction map. Used when the caller never needs to lift
    /// anything back (e.g. inspecting the reduced instance alone).
    pub fn into_instance(self) -> Instance {
        self.instance
    }

    /// The unreduction map lifting solutions/bounds of the reduced
    /// instance back to the original.
    pub fn unreduction(&self) -> &UnreductionMap {
        &self.unreduction
    }
}

#[cfg(test)]
#[path = "../tests_unit/reduction/mod.rs"]
mod tests;
