//! Driver process management - spawning and readiness checking the
//! automation driver that hosts the application under test.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::driver::DriverClient;
use crate::error::{E2eError, E2eResult};

/// Handle to a running automation driver process.
#[derive(Debug)]
pub struct AppHandle {
    child: Child,
    pub base_url: String,
    pub port: u16,
}

impl AppHandle {
    /// Spawn the automation driver and wait until it reports ready.
    pub async fn spawn(config: AppConfig) -> E2eResult<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let base_url = format!("http://127.0.0.1:{}", port);

        info!("Spawning automation driver on port {}", port);

        let mut cmd = Command::new(&config.driver_binary);
        cmd.arg("--port").arg(port.to_string());
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            E2eError::DriverStartup(format!(
                "Failed to spawn {}: {}",
                config.driver_binary.display(),
                e
            ))
        })?;

        let handle = AppHandle {
            child,
            base_url: base_url.clone(),
            port,
        };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("Driver is ready at {}", base_url);
        Ok(handle)
    }

    /// Poll the driver's status endpoint until it accepts sessions.
    async fn wait_for_ready(&self, timeout: Duration) -> E2eResult<()> {
        let client = DriverClient::new(&self.base_url)?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout {
            attempts += 1;

            match client.status().await {
                Ok(true) => return Ok(()),
                Ok(false) => {
                    warn!("Driver up but not ready yet");
                }
                Err(E2eError::Http(e)) => {
                    if attempts == 1 {
                        info!("Waiting for driver to start...");
                    }
                    // Connection refused is expected while the driver boots
                    if !e.is_connect() {
                        warn!("Status check error: {}", e);
                    }
                }
                Err(e) => {
                    warn!("Status check error: {}", e);
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::DriverReadiness(attempts))
    }

    /// Get the WebDriver base URL for this driver.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub(crate) fn from_parts(child: Child, base_url: String, port: u16) -> Self {
        Self {
            child,
            base_url,
            port,
        }
    }

    /// Stop the driver, tearing down the hosted application with it.
    pub fn stop(&mut self) -> E2eResult<()> {
        info!("Stopping driver (pid: {})", self.child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                // Give it a moment to shut down gracefully
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for AppHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Configuration for spawning the automation driver.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the automation driver binary
    pub driver_binary: PathBuf,

    /// Port for the driver to listen on (None = find free port)
    pub port: Option<u16>,

    /// Timeout for driver startup
    pub startup_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            driver_binary: PathBuf::from("appium"),
            port: None,
            startup_timeout: Duration::from_secs(30),
        }
    }
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        // Ports should be in valid range
        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }

    #[test]
    fn spawn_failure_names_the_missing_binary() {
        let config = AppConfig {
            driver_binary: PathBuf::from("/nonexistent/driver"),
            port: Some(4723),
            startup_timeout: Duration::from_secs(1),
        };

        let rt = tokio::runtime::Runtime::new().unwrap();
        let err = rt.block_on(AppHandle::spawn(config)).unwrap_err();
        match err {
            E2eError::DriverStartup(msg) => assert!(msg.contains("/nonexistent/driver")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
