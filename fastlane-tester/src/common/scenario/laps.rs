//! Lap timing, pit-stop visits, records, and the leaderboard.
use anyhow::{Context, Result, ensure};
use fastlane_game::{ProjectCatalog, Scene};
use fastlane_game::constants::{BADGE_LAP_COMPLETE, BADGE_NEW_RECORD, MAX_LAP_RECORDS};
use thirtyfour::prelude::*;

use super::{
    BrowserScenario, CombinedScenario, LogicScenario, SETTLE, ScenarioCtx, TestScenario,
    open_fresh,
};
use crate::logic::LapRig;

/// Pit stops in a seed-dependent order.
fn rotated_stops(seed: u64) -> Vec<String> {
    let mut stops: Vec<String> = ProjectCatalog::default_catalog()
        .ids()
        .into_iter()
        .map(String::from)
        .collect();
    if !stops.is_empty() {
        let shift = usize::try_from(seed % stops.len() as u64).unwrap_or(0);
        stops.rotate_left(shift);
    }
    stops
}

pub struct FullLapScenario;

#[async_trait::async_trait]
impl BrowserScenario for FullLapScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        open_fresh(driver, ctx).await?;
        ctx.bridge.scene("track").await?;
        tokio::time::sleep(SETTLE).await;

        for id in rotated_stops(ctx.seed) {
            ensure!(ctx.bridge.visit(&id).await?, "first visit to {id} should count");
            if ctx.verbose {
                println!("  🏎️  Pit stop {id}");
            }
        }
        tokio::time::sleep(SETTLE).await;

        let state = ctx.bridge.state().await?;
        ensure!(!state.timer_running, "timer should stop after the last pit stop");
        ensure!(state.has_badge(BADGE_LAP_COMPLETE), "missing {BADGE_LAP_COMPLETE} badge");
        ensure!(state.lap_records == 1, "expected one lap record, got {}", state.lap_records);
        ensure!(state.best_lap.is_some(), "first lap should set the best time");
        driver
            .find(By::Id("another-lap-btn"))
            .await
            .context("lap complete dialog should be open")?;
        Ok(())
    }
}

impl CombinedScenario for FullLapScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Full Lap", full_lap_check))
    }
}

fn full_lap_check(rig: &mut LapRig) -> Result<()> {
    let driven = rig.run_lap();
    let stops = rig.pit_stops().len();
    let m = &rig.manager;

    ensure!(!m.state().is_timer_running, "timer should stop after the last pit stop");
    ensure!(
        m.last_lap_time() == Some(driven),
        "lap time {:?} does not match {driven} ms driven",
        m.last_lap_time()
    );
    ensure!(m.best_lap_time() == Some(driven), "first lap should be the best lap");
    ensure!(m.lap_records().len() == 1, "expected one lap record");
    let record = &m.lap_records()[0];
    ensure!(
        record.projects_visited == stops,
        "record shows {} of {stops} pit stops",
        record.projects_visited
    );
    for id in [BADGE_LAP_COMPLETE, BADGE_NEW_RECORD] {
        ensure!(m.state().has_badge(id), "missing {id} badge");
    }
    ensure!(
        m.badges().len() == stops + 2,
        "expected {} badges, got {}",
        stops + 2,
        m.badges().len()
    );
    Ok(())
}

pub fn duplicate_visit_scenario() -> LogicScenario {
    LogicScenario::new("Duplicate Pit Stop Visit", duplicate_visit_check)
}

fn duplicate_visit_check(rig: &mut LapRig) -> Result<()> {
    rig.manager.set_current_scene(Scene::Track);
    let stops = rig.pit_stops();
    let pick = usize::try_from(rig.random_below(stops.len() as u64)).unwrap_or(0);
    let id = stops.get(pick).context("catalog has no pit stops")?;

    rig.drive();
    ensure!(rig.manager.visit_project(id), "first visit to {id} should count");
    let badges = rig.manager.badges().len();

    rig.drive();
    ensure!(!rig.manager.visit_project(id), "second visit to {id} should not count");
    ensure!(rig.manager.badges().len() == badges, "repeat visit awarded a badge");
    ensure!(rig.manager.visited_count() == 1, "repeat visit changed the visited set");
    ensure!(rig.manager.state().is_timer_running, "lap should still be running");
    Ok(())
}

pub fn record_lap_scenario() -> LogicScenario {
    LogicScenario::new("Faster Lap Sets a Record", record_lap_check)
}

fn record_lap_check(rig: &mut LapRig) -> Result<()> {
    let first = rig.run_lap();
    let second = rig.run_lap();
    let m = &rig.manager;

    ensure!(
        m.best_lap_time() == Some(first.min(second)),
        "best lap {:?} after laps of {first} and {second} ms",
        m.best_lap_time()
    );
    let records = m.lap_records();
    ensure!(records.len() == 2, "expected two lap records, got {}", records.len());
    ensure!(records[0].time <= records[1].time, "leaderboard is not fastest first");
    let record_badges = m.badges().iter().filter(|b| b.id == BADGE_NEW_RECORD).count();
    ensure!(record_badges == 1, "{BADGE_NEW_RECORD} awarded {record_badges} times");
    Ok(())
}

pub fn leaderboard_cap_scenario() -> LogicScenario {
    LogicScenario::new("Leaderboard Capacity", leaderboard_cap_check)
}

fn leaderboard_cap_check(rig: &mut LapRig) -> Result<()> {
    let laps: Vec<u64> = (0..MAX_LAP_RECORDS + 2).map(|_| rig.run_lap()).collect();
    let fastest = laps.iter().copied().min().context("no laps driven")?;
    let records = rig.manager.lap_records();

    ensure!(
        records.len() == MAX_LAP_RECORDS,
        "leaderboard holds {} records, capacity is {MAX_LAP_RECORDS}",
        records.len()
    );
    ensure!(
        records.windows(2).all(|pair| pair[0].time <= pair[1].time),
        "leaderboard is not fastest first"
    );
    ensure!(records[0].time == fastest, "fastest lap {fastest} ms is missing");
    ensure!(rig.manager.best_lap_time() == Some(fastest), "best lap is not the fastest");
    Ok(())
}

pub struct ResetLapScenario;

#[async_trait::async_trait]
impl BrowserScenario for ResetLapScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        open_fresh(driver, ctx).await?;
        ctx.bridge.scene("track").await?;
        tokio::time::sleep(SETTLE).await;

        for id in rotated_stops(ctx.seed).iter().take(2) {
            ctx.bridge.visit(id).await?;
        }
        let before = ctx.bridge.state().await?;
        ensure!(before.visited.len() == 2, "expected two visits before reset");

        ctx.bridge.reset().await?;
        tokio::time::sleep(SETTLE).await;

        let after = ctx.bridge.state().await?;
        ensure!(after.visited.is_empty(), "reset should clear visited pit stops");
        ensure!(!after.timer_running, "reset should stop the timer");
        ensure!(after.badges == before.badges, "reset should keep earned badges");
        ensure!(after.scene == "track", "reset should stay on the track");
        Ok(())
    }
}

impl CombinedScenario for ResetLapScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Reset Lap Keeps Badges", reset_lap_check))
    }
}

fn reset_lap_check(rig: &mut LapRig) -> Result<()> {
    rig.manager.set_current_scene(Scene::Track);
    for id in rig.pit_stops().iter().take(2) {
        rig.drive();
        rig.manager.visit_project(id);
    }
    let badges = rig.manager.badges().to_vec();

    rig.manager.reset_timer();
    let m = &rig.manager;
    ensure!(m.visited_count() == 0, "reset should clear visited pit stops");
    ensure!(!m.state().is_timer_running, "reset should stop the timer");
    ensure!(m.current_lap_time() == 0, "reset lap should read zero");
    ensure!(m.badges() == badges.as_slice(), "reset should keep earned badges");

    // Reset Lap restarts the clock straight away
    rig.manager.start_lap_timer();
    let driven = rig.drive();
    ensure!(
        rig.manager.current_lap_time() == driven,
        "restarted lap reads {} ms after {driven} ms",
        rig.manager.current_lap_time()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_checks_pass_for_several_seeds() {
        for seed in [0, 1, 42, 1337, u64::MAX] {
            full_lap_check(&mut LapRig::new(seed)).unwrap();
            duplicate_visit_check(&mut LapRig::new(seed)).unwrap();
            record_lap_check(&mut LapRig::new(seed)).unwrap();
            reset_lap_check(&mut LapRig::new(seed)).unwrap();
        }
        leaderboard_cap_check(&mut LapRig::new(7)).unwrap();
    }

    #[test]
    fn rotation_keeps_every_stop() {
        let mut stops = rotated_stops(3);
        stops.sort();
        let mut expected = LapRig::new(0).pit_stops();
        expected.sort();
        assert_eq!(stops, expected);
    }
}
