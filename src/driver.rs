//! W3C WebDriver wire client
//!
//! Speaks the WebDriver HTTP protocol directly against the automation
//! driver hosting the application under test. Only the endpoints this
//! suite needs are implemented: session lifecycle, element lookup,
//! element queries, keyboard input, and the Appium app-reset extension.

use std::time::{Duration, Instant};

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::{E2eError, E2eResult};

/// Key under which the W3C protocol nests element ids.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Poll interval for displayed-state waits.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// HTTP client for a WebDriver endpoint, before any session exists.
#[derive(Debug, Clone)]
pub struct DriverClient {
    http: reqwest::Client,
    base_url: String,
}

impl DriverClient {
    pub fn new(base_url: impl Into<String>) -> E2eResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /status - whether the driver can accept a new session.
    pub async fn status(&self) -> E2eResult<bool> {
        let resp = self
            .http
            .get(format!("{}/status", self.base_url))
            .send()
            .await?;
        let body: Value = resp.json().await?;
        Ok(body["value"]["ready"].as_bool().unwrap_or(false))
    }

    /// POST /session - open a session against the application under test.
    pub async fn new_session(self, caps: &Capabilities) -> E2eResult<Session> {
        let value = self
            .execute(Method::POST, "session", Some(caps.to_json()))
            .await?;
        let id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| E2eError::Protocol("missing sessionId in new-session response".into()))?
            .to_string();

        debug!(session = %id, "session opened");
        Ok(Session { client: self, id })
    }

    /// Send a request and unwrap the WebDriver `value` envelope.
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> E2eResult<Value> {
        let url = format!("{}/{}", self.base_url, path);
        trace!(%url, "driver request");

        let mut req = self.http.request(method, &url);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let envelope: Value = resp.json().await?;
        unwrap_envelope(status, envelope)
    }
}

/// Desired capabilities for the desktop session.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Path to the application binary under test.
    pub app: String,
    pub platform_name: String,
    pub automation_name: String,
}

impl Capabilities {
    /// New-session request body, with vendor keys under the `appium:` prefix.
    fn to_json(&self) -> Value {
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "platformName": self.platform_name,
                    "appium:automationName": self.automation_name,
                    "appium:app": self.app,
                }
            }
        })
    }
}

/// Element location strategy, as sent in a find-element request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub using: &'static str,
    pub value: String,
}

impl Locator {
    pub fn accessibility_id(value: impl Into<String>) -> Self {
        Self {
            using: "accessibility id",
            value: value.into(),
        }
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            using: "xpath",
            value: value.into(),
        }
    }

    fn to_json(&self) -> Value {
        json!({ "using": self.using, "value": self.value })
    }
}

/// A live WebDriver session against the application under test.
///
/// All screen interaction goes through a session; the runner opens
/// exactly one for the whole suite and deletes it during teardown.
#[derive(Debug)]
pub struct Session {
    client: DriverClient,
    id: String,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// POST /session/{id}/element
    pub async fn find_element(&self, locator: &Locator) -> E2eResult<ElementRef<'_>> {
        let value = self
            .execute(Method::POST, "element", Some(locator.to_json()))
            .await
            .map_err(|e| match e {
                E2eError::WebDriver { error, .. } if error == "no such element" => {
                    E2eError::ElementNotFound(locator.value.clone())
                }
                other => other,
            })?;

        let element_id = extract_element_id(&value).ok_or_else(|| {
            E2eError::Protocol("find-element response without an element id".into())
        })?;

        Ok(ElementRef {
            session: self,
            element_id,
        })
    }

    /// Poll until the element exists and reports itself displayed.
    pub async fn wait_displayed(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> E2eResult<ElementRef<'_>> {
        let deadline = Instant::now() + timeout;

        loop {
            match self.find_element(locator).await {
                Ok(element) => match element.is_displayed().await {
                    Ok(true) => return Ok(element),
                    Ok(false) => {}
                    // The element can go stale between lookup and the
                    // displayed query - look it up again
                    Err(E2eError::WebDriver { ref error, .. })
                        if error == "stale element reference" => {}
                    Err(other) => return Err(other),
                },
                // Not attached yet - keep polling
                Err(E2eError::ElementNotFound(_)) => {}
                Err(other) => return Err(other),
            }

            if Instant::now() >= deadline {
                return Err(E2eError::Timeout(locator.value.clone()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// POST /session/{id}/appium/app/reset - return the application
    /// under test to its initial state.
    pub async fn reset_app(&self) -> E2eResult<()> {
        self.execute(Method::POST, "appium/app/reset", Some(json!({})))
            .await?;
        debug!(session = %self.id, "app reset");
        Ok(())
    }

    /// DELETE /session/{id}
    pub async fn delete(self) -> E2eResult<()> {
        let path = format!("session/{}", self.id);
        self.client.execute(Method::DELETE, &path, None).await?;
        debug!(session = %self.id, "session deleted");
        Ok(())
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> E2eResult<Value> {
        let path = format!("session/{}/{}", self.id, path);
        self.client.execute(method, &path, body).await
    }
}

/// Handle to a located element, valid while the session stays open.
#[derive(Debug)]
pub struct ElementRef<'a> {
    session: &'a Session,
    element_id: String,
}

impl ElementRef<'_> {
    pub async fn text(&self) -> E2eResult<String> {
        let value = self.get("text").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn is_displayed(&self) -> E2eResult<bool> {
        let value = self.get("displayed").await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Append keystrokes without clearing first. A trailing newline acts
    /// as submit in the application under test.
    pub async fn send_keys(&self, text: &str) -> E2eResult<()> {
        self.post("value", json!({ "text": text })).await?;
        Ok(())
    }

    /// Clear the field, then type (the driver-side setValue convention).
    pub async fn set_value(&self, text: &str) -> E2eResult<()> {
        self.clear().await?;
        self.send_keys(text).await
    }

    pub async fn clear(&self) -> E2eResult<()> {
        self.post("clear", json!({})).await?;
        Ok(())
    }

    async fn get(&self, leaf: &str) -> E2eResult<Value> {
        let path = format!("element/{}/{}", self.element_id, leaf);
        self.session.execute(Method::GET, &path, None).await
    }

    async fn post(&self, leaf: &str, body: Value) -> E2eResult<Value> {
        let path = format!("element/{}/{}", self.element_id, leaf);
        self.session.execute(Method::POST, &path, Some(body)).await
    }
}

/// Pull the payload out of a `{"value": ...}` envelope, converting
/// error bodies into `E2eError::WebDriver`.
fn unwrap_envelope(status: StatusCode, mut envelope: Value) -> E2eResult<Value> {
    let value = envelope
        .get_mut("value")
        .map(Value::take)
        .ok_or_else(|| E2eError::Protocol("response without a value field".into()))?;

    if !status.is_success() {
        let error = value["error"].as_str().unwrap_or("unknown error").to_string();
        let message = value["message"].as_str().unwrap_or_default().to_string();
        return Err(E2eError::WebDriver { error, message });
    }

    Ok(value)
}

fn extract_element_id(value: &Value) -> Option<String> {
    value
        .get(ELEMENT_KEY)
        // Legacy JSON wire protocol key, still emitted by some drivers
        .or_else(|| value.get("ELEMENT"))
        .and_then(Value::as_str)
        .map(String::from)
}
