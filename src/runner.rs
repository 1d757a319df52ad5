//! Scenario runner orchestrating the driver process, the session, and
//! the ordered case list.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::app::{AppConfig, AppHandle};
use crate::driver::{Capabilities, DriverClient, Session};
use crate::error::{E2eError, E2eResult};
use crate::scenario::{Scenario, Step};
use crate::screens::Screen;

/// How a single case ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    Failed,
    Skipped,
}

/// Result of running a single case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub outcome: CaseOutcome,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub skip_reason: Option<String>,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<CaseResult>,
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub app: AppConfig,

    /// Session capabilities for the application under test
    pub capabilities: Capabilities,

    /// Deadline for the initial create-pin screen to appear
    pub setup_timeout: Duration,

    /// Per-element resolution deadline (the implicit wait)
    pub element_timeout: Duration,

    /// Output directory for results
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            capabilities: Capabilities {
                app: "target/debug/uplink".to_string(),
                platform_name: "mac".to_string(),
                automation_name: "mac2".to_string(),
            },
            setup_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(5),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Main scenario runner. Holds the one driver process and the one
/// session for the suite's duration.
pub struct ScenarioRunner {
    config: RunnerConfig,
    app: Option<AppHandle>,
    session: Option<Session>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            config,
            app: None,
            session: None,
        }
    }

    /// Spawn the driver, open the session, and block until the initial
    /// create-pin screen is visible.
    pub async fn start(&mut self) -> E2eResult<()> {
        if self.session.is_some() {
            return Ok(()); // Already running
        }

        let app = AppHandle::spawn(self.config.app.clone()).await?;
        let client = DriverClient::new(app.base_url())?;
        let session = client.new_session(&self.config.capabilities).await?;

        Screen::CreatePin
            .wait_for_is_shown(&session, self.config.setup_timeout)
            .await?;

        self.app = Some(app);
        self.session = Some(session);
        Ok(())
    }

    /// Run the given cases in order, then tear the session down.
    ///
    /// Skipped cases are reported but never executed. A failing step
    /// aborts only its own case. Teardown runs unconditionally, after
    /// skipped cases too.
    pub async fn run_suite(&mut self, scenarios: &[Scenario]) -> E2eResult<SuiteResult> {
        let start = Instant::now();

        self.start().await?;

        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;
        let mut skipped = 0;

        info!("Running {} case(s)...", scenarios.len());

        for scenario in scenarios {
            if let Some(reason) = scenario.skip {
                skipped += 1;
                warn!("- {} (skipped: {})", scenario.name, reason);
                results.push(CaseResult {
                    name: scenario.name.to_string(),
                    outcome: CaseOutcome::Skipped,
                    duration_ms: 0,
                    error: None,
                    skip_reason: Some(reason.to_string()),
                });
                continue;
            }

            let result = self.run_scenario(scenario).await;
            match result.outcome {
                CaseOutcome::Passed => {
                    passed += 1;
                    info!("✓ {} ({} ms)", result.name, result.duration_ms);
                }
                _ => {
                    failed += 1;
                    error!(
                        "✗ {} - {}",
                        result.name,
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
            results.push(result);
        }

        self.finish().await;

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Suite results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        Ok(SuiteResult {
            total: scenarios.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        })
    }

    /// Run a single case: steps in order, stopping at the first failure.
    async fn run_scenario(&self, scenario: &Scenario) -> CaseResult {
        let start = Instant::now();
        debug!("Running case: {}", scenario.name);

        let mut case_error: Option<String> = None;

        for step in &scenario.steps {
            if let Err(e) = self.execute_step(step).await {
                case_error = Some(e.to_string());
                break;
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let outcome = if case_error.is_none() {
            CaseOutcome::Passed
        } else {
            CaseOutcome::Failed
        };

        CaseResult {
            name: scenario.name.to_string(),
            outcome,
            duration_ms,
            error: case_error,
            skip_reason: None,
        }
    }

    async fn execute_step(&self, step: &Step) -> E2eResult<()> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| E2eError::Protocol("no open session".into()))?;
        let timeout = self.config.element_timeout;

        match step {
            Step::EnterText {
                target,
                text,
                clear_first,
            } => {
                let element = session.wait_displayed(&target.locator(), timeout).await?;
                if *clear_first {
                    element.set_value(text).await
                } else {
                    element.send_keys(text).await
                }
            }
            Step::AssertDisplayed { target } => {
                session
                    .wait_displayed(&target.locator(), timeout)
                    .await
                    .map(|_| ())
                    .map_err(|e| match e {
                        E2eError::Timeout(value) => E2eError::AssertionFailed(format!(
                            "element '{}' never became visible",
                            value
                        )),
                        other => other,
                    })
            }
            Step::AssertTextContains { target, needle } => {
                let element = session.wait_displayed(&target.locator(), timeout).await?;
                let actual = element.text().await?;
                if actual.contains(needle) {
                    Ok(())
                } else {
                    Err(E2eError::AssertionFailed(format!(
                        "expected {:?} text to contain {:?}, got {:?}",
                        target, needle, actual
                    )))
                }
            }
            Step::ResetApp => session.reset_app().await,
        }
    }

    /// Delete the session and stop the driver. Safe to call twice.
    pub async fn finish(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.delete().await {
                warn!("Failed to delete session: {}", e);
            }
        }
        if let Some(mut app) = self.app.take() {
            // stop() sleeps through the SIGTERM grace period
            match tokio::task::spawn_blocking(move || app.stop()).await {
                Ok(Err(e)) => warn!("Failed to stop driver: {}", e),
                Err(e) => warn!("Driver stop task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
    }

    /// Write suite results to a JSON file
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("suite-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
