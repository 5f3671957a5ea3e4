use anyhow::{Context, Result};
use chrono::Utc;
use fastlane_game::constants::STORAGE_KEY;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

use crate::browser::BRIDGE_GLOBAL;

/// `<base>/<browser>/<scenario>/seed-<n>/<utc timestamp>`
pub fn artifacts_dir(base: &str, browser: &str, scenario: &str, seed: u64) -> PathBuf {
    Path::new(base)
        .join(browser)
        .join(scenario)
        .join(format!("seed-{seed}"))
        .join(Utc::now().format("%Y%m%dT%H%M%S").to_string())
}

/// Everything worth keeping from a failed browser run. Each field is
/// collected independently; a page that crashed may only yield some of them.
#[derive(Debug, Default)]
struct FailureEvidence {
    page_url: Option<String>,
    screenshot: Option<Vec<u8>>,
    dom: Option<String>,
    bridge_state: Option<Value>,
    stored_progress: Option<String>,
    error_chain: String,
}

impl FailureEvidence {
    async fn collect(driver: &WebDriver, err: &anyhow::Error) -> Self {
        let bridge_state = driver
            .execute(
                &format!("return window.{BRIDGE_GLOBAL} ? window.{BRIDGE_GLOBAL}.state() : null"),
                vec![],
            )
            .await
            .ok()
            .map(|ret| ret.json().clone())
            .filter(|v| !v.is_null());
        let stored_progress = driver
            .execute(
                &format!("return window.localStorage.getItem('{STORAGE_KEY}')"),
                vec![],
            )
            .await
            .ok()
            .and_then(|ret| ret.json().as_str().map(String::from));

        Self {
            page_url: driver.current_url().await.ok().map(|u| u.to_string()),
            screenshot: driver.screenshot_as_png().await.ok(),
            dom: driver.source().await.ok(),
            bridge_state,
            stored_progress,
            error_chain: format!("{err:#}"),
        }
    }

    fn summary(&self) -> String {
        let mut lines = vec![
            format!("error: {}", self.error_chain),
            format!("url: {}", self.page_url.as_deref().unwrap_or("<unknown>")),
        ];
        if let Some(state) = &self.bridge_state {
            let scene = state["scene"].as_str().unwrap_or("?");
            let visited = state["visited"].as_array().map_or(0, Vec::len);
            let running = state["timerRunning"].as_bool().unwrap_or(false);
            lines.push(format!("scene: {scene}, pit stops: {visited}, timer running: {running}"));
        } else {
            lines.push(String::from("test bridge unavailable"));
        }
        lines.join("\n")
    }

    fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating artifacts dir {}", dir.display()))?;

        fs::write(dir.join("summary.txt"), self.summary()).context("writing summary.txt")?;
        // Partial evidence is still useful; a single failed write is only logged.
        let optional: [(&str, Option<Vec<u8>>); 4] = [
            ("screenshot.png", self.screenshot.clone()),
            ("dom.html", self.dom.clone().map(String::into_bytes)),
            (
                "bridge-state.json",
                self.bridge_state
                    .as_ref()
                    .and_then(|v| serde_json::to_vec_pretty(v).ok()),
            ),
            (
                "stored-progress.json",
                self.stored_progress.clone().map(String::into_bytes),
            ),
        ];
        for (name, payload) in optional {
            if let Some(bytes) = payload
                && let Err(e) = fs::write(dir.join(name), bytes)
            {
                log::warn!("could not write {name}: {e}");
            }
        }

        log::info!("artifacts written to {}", dir.display());
        Ok(())
    }
}

/// Save what the browser looked like when a scenario failed.
pub async fn capture_artifacts(driver: &WebDriver, dir: &Path, err: &anyhow::Error) -> Result<()> {
    FailureEvidence::collect(driver, err).await.write_to(dir)
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "fastlane-{tag}-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" smoke, ,full-lap,  reset-lap ");
        assert_eq!(parts, vec!["smoke", "full-lap", "reset-lap"]);
    }

    #[test]
    fn artifacts_dir_nests_browser_scenario_and_seed() {
        let dir = artifacts_dir("target/out", "chrome", "full-lap", 42);
        assert!(dir.starts_with(Path::new("target/out/chrome/full-lap/seed-42")));
        assert_eq!(dir.components().count(), 6);
    }

    #[test]
    fn summary_reads_bridge_state() {
        let evidence = FailureEvidence {
            page_url: Some(String::from("http://localhost:8080/track?test=1")),
            bridge_state: Some(json!({
                "scene": "track",
                "visited": ["paddock-pass", "pit-wall"],
                "timerRunning": true
            })),
            error_chain: String::from("timer should stop"),
            ..FailureEvidence::default()
        };
        let summary = evidence.summary();
        assert!(summary.starts_with("error: timer should stop"));
        assert!(summary.contains("url: http://localhost:8080/track?test=1"));
        assert!(summary.contains("scene: track, pit stops: 2, timer running: true"));
    }

    #[test]
    fn write_to_skips_missing_evidence() {
        let dir = scratch_dir("artifacts");
        let evidence = FailureEvidence {
            screenshot: Some(vec![1, 2, 3]),
            stored_progress: Some(String::from(r#"{"version":1}"#)),
            error_chain: String::from("boom"),
            ..FailureEvidence::default()
        };
        evidence.write_to(&dir).unwrap();

        assert!(dir.join("screenshot.png").exists());
        assert!(dir.join("stored-progress.json").exists());
        assert!(!dir.join("dom.html").exists());
        assert!(!dir.join("bridge-state.json").exists());
        let summary = fs::read_to_string(dir.join("summary.txt")).unwrap();
        assert!(summary.contains("test bridge unavailable"));
    }
}
