use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;

pub const BRIDGE_GLOBAL: &str = "__fastlaneTest";

/// What `window.__fastlaneTest.state()` reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeState {
    pub scene: String,
    #[serde(default)]
    pub visited: Vec<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub timer_running: bool,
    #[serde(default)]
    pub best_lap: Option<u64>,
    #[serde(default)]
    pub lap_records: usize,
}

impl BridgeState {
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|badge| badge == id)
    }
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute(&format!("return !!window.{BRIDGE_GLOBAL}"), vec![])
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("{BRIDGE_GLOBAL} is not available. Did you pass ?test=1 in the base URL?");
        }
        Ok(())
    }

    pub async fn scene(&self, name: &str) -> Result<()> {
        self.driver
            .execute(
                &format!("window.{BRIDGE_GLOBAL}.scene(arguments[0])"),
                vec![name.into()],
            )
            .await?;
        Ok(())
    }

    /// Visit a pit stop; `true` when it had not been visited yet.
    pub async fn visit(&self, project_id: &str) -> Result<bool> {
        let result = self
            .driver
            .execute(
                &format!("return window.{BRIDGE_GLOBAL}.visit(arguments[0])"),
                vec![project_id.into()],
            )
            .await?;
        Ok(result.json().as_bool().unwrap_or(false))
    }

    pub async fn reset(&self) -> Result<()> {
        self.driver
            .execute(&format!("window.{BRIDGE_GLOBAL}.reset()"), vec![])
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.driver
            .execute(&format!("window.{BRIDGE_GLOBAL}.clear()"), vec![])
            .await?;
        Ok(())
    }

    pub async fn state(&self) -> Result<BridgeState> {
        let result = self
            .driver
            .execute(&format!("return window.{BRIDGE_GLOBAL}.state()"), vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing bridge state")
    }
}
