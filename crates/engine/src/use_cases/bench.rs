//! Ability-check throughput benchmark.

use std::time::{Duration, Instant};

use chronicler_domain::{CheckInput, NoModifiers, RulesEngine};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchReport {
    pub system: String,
    pub iterations: u32,
    #[serde(rename = "elapsedMs", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Checks that succeeded; also keeps the loop from being optimized out
    pub successes: u32,
}

impl BenchReport {
    pub fn checks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return f64::INFINITY;
        }
        f64::from(self.iterations) / secs
    }
}

/// Time `iterations` checks of pc1's athletics against DC 12.
pub fn run(engine: &dyn RulesEngine, iterations: u32) -> BenchReport {
    let input = CheckInput::new("pc1")
        .with_skill("athletics")
        .with_difficulty(12);

    tracing::info!(system = %engine.name(), iterations, "Starting ability check benchmark");

    let start = Instant::now();
    let mut successes = 0u32;
    for _ in 0..iterations {
        let result = engine.ability_check(std::hint::black_box(&input), &NoModifiers);
        if result.success {
            successes += 1;
        }
    }
    let elapsed = start.elapsed();

    let report = BenchReport {
        system: engine.name().to_string(),
        iterations,
        elapsed,
        successes,
    };
    tracing::info!(
        system = %report.system,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        checks_per_second = report.checks_per_second(),
        "Benchmark finished"
    );
    report
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicler_domain::testing::ScriptedRngProvider;
    use chronicler_domain::{Dnd5eSystem, PbtaSystem};
    use std::sync::Arc;

    #[test]
    fn runs_requested_iterations() {
        // 12 then 11 on the d20: every other check succeeds
        let engine = Dnd5eSystem::new(Arc::new(ScriptedRngProvider::new([12, 11])));
        let report = run(&engine, 100);
        assert_eq!(report.system, "dnd5e");
        assert_eq!(report.iterations, 100);
        assert_eq!(report.successes, 50);
    }

    #[test]
    fn zero_iterations_is_empty_report() {
        let engine = PbtaSystem::new(Arc::new(ScriptedRngProvider::new([6])));
        let report = run(&engine, 0);
        assert_eq!(report.iterations, 0);
        assert_eq!(report.successes, 0);
    }

    #[test]
    fn throughput_handles_zero_elapsed() {
        let report = BenchReport {
            system: "pbta".to_string(),
            iterations: 10,
            elapsed: Duration::ZERO,
            successes: 0,
        };
        assert!(report.checks_per_second().is_infinite());

        let report = BenchReport {
            elapsed: Duration::from_millis(500),
            ..report
        };
        assert_eq!(report.checks_per_second(), 20.0);
    }

    #[test]
    fn report_serializes_elapsed_in_millis() {
        let report = BenchReport {
            system: "dnd5e".to_string(),
            iterations: 3,
            elapsed: Duration::from_millis(250),
            successes: 2,
        };
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "system": "dnd5e",
                "iterations": 3,
                "elapsedMs": 250.0,
                "successes": 2
            })
        );
    }
}
