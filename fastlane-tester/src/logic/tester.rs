use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;
use crate::logic::LapRig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// One result per seed; iteration `i` runs with `seed + i`.
    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|&seed| {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seed: {seed})",
                        scenario.name.bright_white()
                    );
                }
                self.run_single_scenario(scenario, seed, iterations)
            })
            .collect()
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut timings = Vec::new();

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let start = Instant::now();
            let mut rig = LapRig::new(iteration_seed);

            match (scenario.check)(&mut rig) {
                Ok(()) => {
                    successes += 1;
                    let duration = start.elapsed();
                    timings.push(duration);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{iterations} passed ({duration:?})", i + 1);
                    }
                }
                Err(err) => {
                    let failure = format!(
                        "Iteration {} (seed {iteration_seed}): {err:#} | {}",
                        i + 1,
                        rig.describe()
                    );
                    log::debug!("{}: {failure}", scenario.name);
                    if self.verbose {
                        println!("  ❌ {}", failure.clone().red());
                    }
                    failures.push(failure);
                }
            }
        }

        let average_duration = if timings.is_empty() {
            Duration::ZERO
        } else {
            timings.iter().sum::<Duration>() / u32::try_from(timings.len()).unwrap_or(u32::MAX)
        };

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::ensure;
    use fastlane_game::Scene;

    fn always_garage(rig: &mut LapRig) -> anyhow::Result<()> {
        ensure!(rig.manager.current_scene() == Scene::Garage, "not in garage");
        Ok(())
    }

    fn fails_on_odd_seeds(rig: &mut LapRig) -> anyhow::Result<()> {
        rig.manager.set_current_scene(Scene::Track);
        ensure!(rig.drive() % 2 == 0, "odd segment");
        Ok(())
    }

    #[test]
    fn passing_scenario_reports_every_iteration() {
        let tester = LogicTester::new(false);
        let scenario = TestScenario::new("Garage", always_garage);
        let results = tester.run_scenario(&scenario, &[1, 2], 3);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed && r.successful_iterations == 3));
        assert_eq!(results[1].seed, 2);
    }

    #[test]
    fn failures_carry_seed_and_state() {
        let tester = LogicTester::new(false);
        let scenario = TestScenario::new("Flaky", fails_on_odd_seeds);
        let result = &tester.run_scenario(&scenario, &[10], 20)[0];
        assert_eq!(result.iterations_run, 20);
        assert_eq!(
            result.successful_iterations + result.failures.len(),
            result.iterations_run
        );
        if let Some(failure) = result.failures.first() {
            assert!(failure.contains("odd segment"));
            assert!(failure.contains("scene track"));
        }
    }

    #[test]
    fn result_serializes_duration_as_millis() {
        let result = ScenarioResult {
            scenario_name: String::from("Smoke Test"),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 12);
    }
}
