use anyhow::Result;
use std::time::Duration;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;
use crate::logic::LapRig;

pub mod laps;
pub mod smoke;
pub mod storage;

/// Time for the page to re-render after a bridge call or a click.
pub const SETTLE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub seed: u64,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

/// Assertions run against a fresh [`LapRig`] for one seed.
pub type LapCheck = fn(&mut LapRig) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LapCheck,
}

impl TestScenario {
    pub fn new(name: impl Into<String>, check: LapCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    /// Scenarios without a browser flow are skipped in browser mode.
    fn supports_browser(&self) -> bool {
        true
    }

    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// A scenario that only exercises the core state manager.
#[derive(Debug, Clone, Copy)]
pub struct LogicScenario {
    name: &'static str,
    check: LapCheck,
}

impl LogicScenario {
    pub const fn new(name: &'static str, check: LapCheck) -> Self {
        Self { name, check }
    }
}

#[async_trait::async_trait]
impl BrowserScenario for LogicScenario {
    fn supports_browser(&self) -> bool {
        false
    }

    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!("{} has no browser flow", self.name)
    }
}

impl CombinedScenario for LogicScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(self.name, self.check))
    }
}

/// Load the site with an empty save and wait for the bridge.
pub async fn open_fresh(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    driver.goto(&ctx.base_url).await?;
    driver.find(By::Id("main-content")).await?;
    ctx.bridge.ensure_available().await?;
    ctx.bridge.clear().await?;
    tokio::time::sleep(SETTLE).await;
    if ctx.verbose {
        println!("  🌐 Loaded {} with a clean save (seed {})", ctx.base_url, ctx.seed);
    }
    Ok(())
}

/// Keys accepted by `--scenarios`, in the order `all` runs them.
pub const ALL_SCENARIOS: [&str; 8] = [
    "smoke",
    "full-lap",
    "duplicate-visit",
    "record-lap",
    "leaderboard-cap",
    "reset-lap",
    "persistence-roundtrip",
    "legacy-migration",
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "full-lap" | "lap" => Some(Box::new(laps::FullLapScenario)),
        "duplicate-visit" | "duplicate" => Some(Box::new(laps::duplicate_visit_scenario())),
        "record-lap" | "record" => Some(Box::new(laps::record_lap_scenario())),
        "leaderboard-cap" | "leaderboard" => Some(Box::new(laps::leaderboard_cap_scenario())),
        "reset-lap" | "reset" => Some(Box::new(laps::ResetLapScenario)),
        "persistence-roundtrip" | "persistence" => {
            Some(Box::new(storage::persistence_roundtrip_scenario()))
        }
        "legacy-migration" | "legacy" => Some(Box::new(storage::legacy_migration_scenario())),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("full-lap", "Full Lap - all pit stops"),
        ("duplicate-visit", "Duplicate Pit Stop Visit"),
        ("record-lap", "Faster Lap Sets a Record"),
        ("leaderboard-cap", "Leaderboard Capacity"),
        ("reset-lap", "Reset Lap Keeps Badges"),
        ("persistence-roundtrip", "Progress Survives Reload"),
        ("legacy-migration", "Legacy Save Migration"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        let listed = list_scenarios();
        assert_eq!(listed.len(), ALL_SCENARIOS.len());
        for (key, _) in listed {
            assert!(ALL_SCENARIOS.contains(&key), "{key} missing from ALL_SCENARIOS");
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("{key} should resolve"));
            assert!(scenario.as_logic_scenario().is_some(), "{key} has no logic check");
        }
        assert!(get_scenario("LEGACY").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn browser_flows_exist_for_interactive_scenarios() {
        for key in ["smoke", "full-lap", "reset-lap"] {
            assert!(get_scenario(key).unwrap().supports_browser(), "{key}");
        }
        assert!(!get_scenario("leaderboard-cap").unwrap().supports_browser());
    }
}
