//! Run the decay scenario with each algorithm and compare against the
//! analytic populations.
//!
//! ```text
//! RUST_LOG=propensity_engine=debug cargo run -p propensity-engine --example decay
//! ```

use propensity_core::ProcId;
use propensity_engine::{AlgorithmKind, SimConfig, Simulation, StopCondition};
use propensity_test_utils::{DecaySystem, SCENARIO_SEED, SCENARIO_STEPS};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    for algorithm in [
        AlgorithmKind::Direct,
        AlgorithmKind::NextReaction,
        AlgorithmKind::Reference,
    ] {
        let config = SimConfig {
            algorithm,
            seed: SCENARIO_SEED,
            stop: StopCondition::steps(SCENARIO_STEPS),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config, DecaySystem::scenario())?;
        let report = sim.run()?;
        let elapsed = report.metrics.elapsed;

        println!(
            "{algorithm:>13}: {} events, t = {elapsed:.5}, {:.0} events/s",
            report.metrics.steps,
            report.metrics.steps_per_second()
        );
        for id in [ProcId(0), ProcId(1000), ProcId(1001), ProcId(1002)] {
            println!(
                "    process {:>4}: {:>6} (expected {:>9.1})",
                id.0,
                sim.system().population(id),
                sim.system().expected(id, elapsed)
            );
        }
    }
    Ok(())
}
