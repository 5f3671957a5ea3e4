use anyhow::{Result, ensure};
use fastlane_game::Scene;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, SETTLE, ScenarioCtx, TestScenario, open_fresh};
use crate::logic::LapRig;

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        open_fresh(driver, ctx).await?;

        let state = ctx.bridge.state().await?;
        ensure!(state.scene == "garage", "expected garage on a clean save, got {}", state.scene);
        ensure!(state.badges.is_empty(), "clean save should have no badges");

        driver.find(By::Id("start-race-btn")).await?.click().await?;
        tokio::time::sleep(SETTLE).await;
        if ctx.verbose {
            println!("  🖱️  Clicked START RACE");
        }

        let state = ctx.bridge.state().await?;
        ensure!(state.scene == "track", "START RACE should open the track, got {}", state.scene);
        ensure!(state.timer_running, "entering the track should start the lap timer");
        driver.find(By::Id("lap-timer")).await?;
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke Test", smoke_check))
    }
}

fn smoke_check(rig: &mut LapRig) -> Result<()> {
    let m = &mut rig.manager;
    ensure!(
        m.current_scene() == Scene::Garage,
        "fresh visitors start in the garage, got {}",
        m.current_scene()
    );
    ensure!(m.badges().is_empty(), "fresh state has {} badges", m.badges().len());
    ensure!(m.best_lap_time().is_none(), "fresh state has a best lap");
    ensure!(!m.state().is_timer_running, "timer runs before the track");

    m.set_current_scene(Scene::Track);
    ensure!(m.state().is_timer_running, "entering the track should start the lap timer");
    ensure!(m.current_lap_time() == 0, "lap time should start at zero");

    rig.drive();
    ensure!(rig.manager.current_lap_time() > 0, "lap time should advance with the clock");
    ensure!(rig.stored_document().is_some(), "scene change should be persisted");
    Ok(())
}
