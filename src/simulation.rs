//! Seeded TE amplification workload.
//!
//! A [`Simulation`] drives any [`Genome`] through a reproducible stream of
//! insert, copy and disable events. The random stream depends only on the
//! seed and on the genome's observable state, so every backend sees the
//! same events and must end in the same state.
//!
//! ## Events
//!
//! | Event | Effect |
//! |-------|--------|
//! | Insert | new TE at a random position in `[0, len]`, length in `1..=max_te_length` |
//! | Copy | random active TE copied by a random offset in `-len..=len` |
//! | Disable | random active TE disabled |
//!
//! Copy and disable fall back to insert while no TE is active.
//!
//! ## Example
//!
//! ```
//! use te_genome::genome::GenomeKind;
//! use te_genome::simulation::{simulate, SimulationConfig};
//!
//! let config = SimulationConfig { initial_size: 100, steps: 50, ..Default::default() };
//!
//! let (_, contiguous) = simulate(&config, GenomeKind::Contiguous).unwrap();
//! let (_, linked) = simulate(&config, GenomeKind::Linked).unwrap();
//!
//! assert_eq!(contiguous, linked);
//! ```

use std::fmt;

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace};

use crate::genome::{Genome, GenomeKind};
use crate::types::GenomeError;

/// Parameters of a simulated workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of empty sites the genome starts with
    pub initial_size: usize,

    /// Number of events to apply
    pub steps: usize,

    /// Longest TE an insert event may create
    pub max_te_length: usize,

    /// Relative weight of insert events
    pub insert_weight: u32,

    /// Relative weight of copy events
    pub copy_weight: u32,

    /// Relative weight of disable events
    pub disable_weight: u32,

    /// RNG seed; same seed = same events
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_size: 1_000,
            steps: 500,
            max_te_length: 20,
            insert_weight: 5,
            copy_weight: 4,
            disable_weight: 1,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Reject configurations that cannot produce events
    pub fn validate(&self) -> Result<(), GenomeError> {
        if self.max_te_length == 0 {
            return Err(GenomeError::InvalidConfig("max_te_length must be positive"));
        }
        if self.insert_weight == 0 {
            return Err(GenomeError::InvalidConfig("insert_weight must be positive"));
        }
        Ok(())
    }

    /// Upper bound on the genome length after the run
    pub fn max_final_length(&self) -> usize {
        self.initial_size
            .saturating_add(self.steps.saturating_mul(self.max_te_length))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Insert,
    Copy,
    Disable,
}

const EVENTS: [Event; 3] = [Event::Insert, Event::Copy, Event::Disable];

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Events applied
    pub steps: usize,

    /// Insert events (including copy/disable fallbacks)
    pub inserts: usize,

    /// Successful copies
    pub copies: usize,

    /// Disable events
    pub disables: usize,

    /// TEs disabled because a new run landed on them
    pub collisions: usize,

    /// Site count at the end
    pub final_length: usize,

    /// Active TEs at the end
    pub active_count: usize,

    /// Ids issued
    pub te_count: u64,

    /// SHA-256 of the final rendering
    pub state_root: [u8; 32],
}

impl SimulationReport {
    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Steps:         {:>12}", self.steps)?;
        writeln!(f, "  Inserts:       {:>12}", self.inserts)?;
        writeln!(f, "  Copies:        {:>12}", self.copies)?;
        writeln!(f, "  Disables:      {:>12}", self.disables)?;
        writeln!(f, "  Collisions:    {:>12}", self.collisions)?;
        writeln!(f, "  Final length:  {:>12}", self.final_length)?;
        writeln!(f, "  Active TEs:    {:>12}", self.active_count)?;
        writeln!(f, "  TEs issued:    {:>12}", self.te_count)?;
        write!(f, "  State root:    {}", self.state_root_hex())
    }
}

/// Seeded event generator.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    events: WeightedIndex<u32>,
}

impl Simulation {
    /// Create a simulation from `config`
    ///
    /// # Errors
    ///
    /// [`GenomeError::InvalidConfig`] if the config cannot drive a workload
    pub fn new(config: SimulationConfig) -> Result<Self, GenomeError> {
        config.validate()?;
        let events = WeightedIndex::new([
            config.insert_weight,
            config.copy_weight,
            config.disable_weight,
        ])
        .map_err(|_| GenomeError::InvalidConfig("event weights must not all be zero"))?;

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            events,
        })
    }

    /// The config this simulation was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Build an empty genome of the configured size on `kind`
    ///
    /// Reserves room for the worst-case final length, clamped by
    /// [`reserve_for`](crate::genome::reserve_for)
    pub fn build_genome(&self, kind: GenomeKind) -> Box<dyn Genome> {
        kind.build_with_capacity(self.config.initial_size, self.config.max_final_length())
    }

    /// Apply the configured number of events to `genome`
    pub fn run(&mut self, genome: &mut dyn Genome) -> Result<SimulationReport, GenomeError> {
        let mut report = SimulationReport {
            steps: self.config.steps,
            inserts: 0,
            copies: 0,
            disables: 0,
            collisions: 0,
            final_length: 0,
            active_count: 0,
            te_count: 0,
            state_root: [0u8; 32],
        };

        for step in 0..self.config.steps {
            let active = genome.active_tes();
            let event = match EVENTS[self.events.sample(&mut self.rng)] {
                Event::Copy | Event::Disable if active.is_empty() => Event::Insert,
                event => event,
            };
            trace!(step, ?event, "simulation event");

            let inserted = match event {
                Event::Insert => {
                    let pos = self.rng.gen_range(0..=genome.len());
                    let length = self.rng.gen_range(1..=self.config.max_te_length);
                    genome.insert_te(pos, length)?;
                    report.inserts += 1;
                    true
                }
                Event::Copy => {
                    let te = active[self.rng.gen_range(0..active.len())];
                    let len = genome.len() as i64;
                    let offset = self.rng.gen_range(-len..=len);
                    let copied = genome.copy_te(te, offset).is_some();
                    if copied {
                        report.copies += 1;
                    }
                    copied
                }
                Event::Disable => {
                    let te = active[self.rng.gen_range(0..active.len())];
                    genome.disable_te(te);
                    report.disables += 1;
                    false
                }
            };

            if inserted {
                // One new TE; any other that went missing was hit
                let after = genome.active_tes().len();
                report.collisions += active.len() + 1 - after;
            }
        }

        report.final_length = genome.len();
        report.active_count = genome.active_tes().len();
        report.te_count = genome.te_count();
        report.state_root = genome.state_root();

        info!(
            steps = report.steps,
            final_length = report.final_length,
            active = report.active_count,
            collisions = report.collisions,
            "simulation finished"
        );
        Ok(report)
    }
}

/// Run `config` on a fresh genome of `kind`
pub fn simulate(
    config: &SimulationConfig,
    kind: GenomeKind,
) -> Result<(Box<dyn Genome>, SimulationReport), GenomeError> {
    let mut simulation = Simulation::new(config.clone())?;
    let mut genome = simulation.build_genome(kind);
    let report = simulation.run(genome.as_mut())?;
    Ok((genome, report))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            initial_size: 50,
            steps: 200,
            max_te_length: 6,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_config_validate() {
        assert!(SimulationConfig::default().validate().is_ok());

        let config = SimulationConfig { max_te_length: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(GenomeError::InvalidConfig(_))));

        let config = SimulationConfig { insert_weight: 0, ..Default::default() };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_max_final_length() {
        let config = small_config(1);
        assert_eq!(config.max_final_length(), 50 + 200 * 6);
    }

    #[test]
    fn test_build_genome_with_huge_step_count() {
        let config = SimulationConfig { initial_size: 8, steps: usize::MAX / 4, ..Default::default() };
        assert_eq!(config.max_final_length(), usize::MAX);

        let simulation = Simulation::new(config).unwrap();
        for kind in GenomeKind::ALL {
            let genome = simulation.build_genome(kind);
            assert_eq!(genome.render(), "--------", "{kind}");
        }
    }

    #[test]
    fn test_simulation_report_counts() {
        let (genome, report) = simulate(&small_config(7), GenomeKind::Contiguous).unwrap();

        assert_eq!(report.inserts + report.copies + report.disables, report.steps);
        assert_eq!(report.te_count as usize, report.inserts + report.copies);
        assert_eq!(report.final_length, genome.len());
        assert_eq!(report.active_count, genome.active_tes().len());
        assert!(report.final_length <= small_config(7).max_final_length());
        genome.check_invariants();
    }

    #[test]
    fn test_simulation_backends_agree() {
        for seed in 0..5 {
            let config = small_config(seed);
            let (a, left) = simulate(&config, GenomeKind::Contiguous).unwrap();
            let (b, right) = simulate(&config, GenomeKind::Linked).unwrap();

            assert_eq!(left, right, "seed {seed}");
            assert_eq!(a.render(), b.render(), "seed {seed}");
            b.check_invariants();
        }
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let (_, first) = simulate(&small_config(99), GenomeKind::Linked).unwrap();
        let (_, second) = simulate(&small_config(99), GenomeKind::Linked).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.state_root_hex().len(), 64);
    }

    #[test]
    fn test_simulation_only_inserts() {
        let config = SimulationConfig {
            copy_weight: 0,
            disable_weight: 0,
            ..small_config(3)
        };
        let (_, report) = simulate(&config, GenomeKind::Linked).unwrap();

        assert_eq!(report.inserts, report.steps);
        assert_eq!(report.copies, 0);
        assert_eq!(report.disables, 0);
    }
}
