//! Stress tests for the genome backends.
//!
//! These tests verify:
//! 1. Both backends stay equivalent over long random call sequences
//! 2. Invariants survive heavy amplification
//! 3. Determinism is preserved across runs
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_random_equivalence -- --nocapture
//! ```

use std::time::Instant;

use te_genome::{simulate, GenomeKind, SimulationConfig};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Calls per random equivalence run
const EQUIVALENCE_CALLS: usize = 3_000;

/// Initial genome size for the random equivalence runs
const EQUIVALENCE_SIZE: usize = 200;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Run a deterministic workload and return the final state root.
fn run_deterministic_sequence(kind: GenomeKind, seed: u64, steps: usize) -> [u8; 32] {
    let config = SimulationConfig {
        initial_size: 500,
        steps,
        max_te_length: 12,
        seed,
        ..Default::default()
    };
    let (genome, report) = simulate(&config, kind).expect("valid config");
    genome.check_invariants();
    report.state_root
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Random calls, including invalid ones, applied to both backends in lock
/// step. Results, renderings and active sets must agree after every call.
#[test]
fn stress_random_equivalence() {
    println!("\n=== RANDOM EQUIVALENCE: {} calls x 4 seeds ===\n", EQUIVALENCE_CALLS);

    for seed in [1u64, 7, 42, 2024] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut contiguous = GenomeKind::Contiguous.build(EQUIVALENCE_SIZE);
        let mut linked = GenomeKind::Linked.build(EQUIVALENCE_SIZE);

        for call in 0..EQUIVALENCE_CALLS {
            let len = contiguous.len();
            let te_count = contiguous.te_count();

            match rng.gen_range(0..10) {
                0..=4 => {
                    // Occasionally step past the end or ask for zero sites
                    let pos = rng.gen_range(0..=len + 2);
                    let length = rng.gen_range(0..=8);
                    assert_eq!(
                        contiguous.insert_te(pos, length),
                        linked.insert_te(pos, length),
                        "seed {seed} call {call}: insert_te({pos}, {length})"
                    );
                }
                5..=7 => {
                    // Unknown and disabled ids are part of the mix
                    let te = rng.gen_range(0..=te_count + 1);
                    let offset = rng.gen_range(-(2 * len as i64)..=2 * len as i64);
                    assert_eq!(
                        contiguous.copy_te(te, offset),
                        linked.copy_te(te, offset),
                        "seed {seed} call {call}: copy_te({te}, {offset})"
                    );
                }
                _ => {
                    let te = rng.gen_range(0..=te_count + 1);
                    contiguous.disable_te(te);
                    linked.disable_te(te);
                }
            }

            assert_eq!(contiguous.render(), linked.render(), "seed {seed} call {call}");
            assert_eq!(contiguous.active_tes(), linked.active_tes(), "seed {seed} call {call}");

            if call % 500 == 0 {
                contiguous.check_invariants();
                linked.check_invariants();
            }
        }

        contiguous.check_invariants();
        linked.check_invariants();
        println!(
            "  seed {:>5}: length {:>6}, active {:>5}, issued {:>5}",
            seed,
            linked.len(),
            linked.active_tes().len(),
            linked.te_count()
        );
    }

    println!("\n=== RANDOM EQUIVALENCE PASSED ===\n");
}

/// Verify determinism: Same workload produces identical state root.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const STEPS: usize = 2_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence(GenomeKind::Linked, SEED, STEPS);
    let root2 = run_deterministic_sequence(GenomeKind::Linked, SEED, STEPS);
    let root3 = run_deterministic_sequence(GenomeKind::Contiguous, SEED, STEPS);

    println!("  Linked run 1:     {}", hex::encode(root1));
    println!("  Linked run 2:     {}", hex::encode(root2));
    println!("  Contiguous:       {}", hex::encode(root3));

    assert_eq!(root1, root2, "State roots must match for determinism");
    assert_eq!(root1, root3, "Backends must end in the same state");

    // Also verify different seeds produce different roots
    let root4 = run_deterministic_sequence(GenomeKind::Linked, SEED + 1, STEPS);
    println!("  Different seed:   {}", hex::encode(root4));
    assert_ne!(root1, root4, "Different seeds should produce different roots");

    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Many small insertions into a large genome, the workload the linked
/// backend is built for.
#[test]
fn stress_small_insertions_into_large_genome() {
    println!("\n=== SMALL INSERTIONS INTO LARGE GENOME ===\n");

    const SIZE: usize = 20_000;
    const INSERTS: usize = 5_000;

    for kind in GenomeKind::ALL {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut genome = kind.build_with_capacity(SIZE, SIZE + INSERTS * 4);

        let start = Instant::now();
        for _ in 0..INSERTS {
            let pos = rng.gen_range(0..=genome.len());
            let length = rng.gen_range(1..=4);
            genome.insert_te(pos, length).expect("position within range");
        }
        let elapsed = start.elapsed();

        genome.check_invariants();
        assert_eq!(genome.te_count(), INSERTS as u64);
        assert!(genome.len() > SIZE + INSERTS);

        println!(
            "  {:>10}: {:>12.2?} ({} sites, {} active)",
            kind.to_string(),
            elapsed,
            genome.len(),
            genome.active_tes().len()
        );
    }

    println!("\n=== SMALL INSERTIONS COMPLETE ===\n");
}

/// Test varying workload sizes on both backends.
#[test]
fn stress_scaling() {
    println!("\n=== SCALING TEST ===\n");

    let test_steps = [100, 1_000, 5_000];

    println!("{:>10} {:>12} {:>12} {:>12}", "Backend", "Steps", "Time", "Length");
    println!("{:-<10} {:-<12} {:-<12} {:-<12}", "", "", "", "");

    for &steps in &test_steps {
        let config = SimulationConfig {
            initial_size: 1_000,
            steps,
            max_te_length: 10,
            ..Default::default()
        };

        let mut reports = Vec::new();
        for kind in GenomeKind::ALL {
            let start = Instant::now();
            let (_, report) = simulate(&config, kind).expect("valid config");
            let elapsed = start.elapsed();

            println!(
                "{:>10} {:>12} {:>12.2?} {:>12}",
                kind.to_string(),
                steps,
                elapsed,
                report.final_length
            );
            reports.push(report);
        }

        assert_eq!(reports[0], reports[1], "backends diverged at {steps} steps");
    }

    println!("\n=== SCALING TEST COMPLETE ===\n");
}
