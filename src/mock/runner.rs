//! Simulated test execution
//!
//! The [`TestRunner`] stands in for the remote HR and external APIs. It
//! runs at most one test at a time, waits the configured delay, then draws
//! success or failure from its RNG.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::SimulationConfig;
use super::responses;
use crate::external::ExternalSystem;
use crate::request::builder::generate_request;
use crate::schema::FieldDescriptor;
use crate::wizard::WizardState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestError {
    #[error("Please enter your API key to test the request")]
    MissingApiKey,

    #[error("A test is already in progress")]
    InFlight,

    #[error("Please complete the external system URL, endpoint and credentials")]
    ExternalSystemIncomplete,
}

/// Outcome of a simulated HR request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedResponse {
    pub status: u16,
    pub body: JsonValue,
    pub time_ms: u64,
}

impl SimulatedResponse {
    pub fn is_success(&self) -> bool {
        StatusClass::of(self.status) == StatusClass::Success
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    pub fn latency_class(&self) -> LatencyClass {
        LatencyClass::of(self.time_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
    Other,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            200..=299 => StatusClass::Success,
            400..=499 => StatusClass::ClientError,
            500.. => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusClass::Success => write!(f, "OK"),
            StatusClass::ClientError => write!(f, "Error"),
            StatusClass::ServerError => write!(f, "Server Error"),
            StatusClass::Other => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyClass {
    Fast,
    Moderate,
    Slow,
}

impl LatencyClass {
    pub fn of(time_ms: u64) -> Self {
        if time_ms < 200 {
            LatencyClass::Fast
        } else if time_ms < 500 {
            LatencyClass::Moderate
        } else {
            LatencyClass::Slow
        }
    }
}

/// Result of an external connection test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovered: Option<Vec<FieldDescriptor>>,
}

pub struct TestRunner {
    config: SimulationConfig,
    rng: Mutex<StdRng>,
    pending: AtomicBool,
}

/// Clears the pending flag however the test ends
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl TestRunner {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
            pending: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<PendingGuard<'_>, TestError> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("test requested while another is in flight");
            return Err(TestError::InFlight);
        }
        Ok(PendingGuard(&self.pending))
    }

    async fn wait(&self) {
        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }
    }

    fn draw(&self) -> (bool, u64) {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let success = rng.random_bool(self.config.effective_success_rate());
        let time_ms = rng.random_range(100..400);
        (success, time_ms)
    }

    /// Simulate sending the configured HR request
    pub async fn run_request(&self, state: &WizardState) -> Result<SimulatedResponse, TestError> {
        if state.api_key().is_empty() {
            return Err(TestError::MissingApiKey);
        }
        let _guard = self.begin()?;
        let request = generate_request(state, true);
        debug!(method = %request.method, endpoint = state.endpoint(), "simulating request");

        self.wait().await;
        let (success, time_ms) = self.draw();

        let response = if success {
            SimulatedResponse {
                status: 200,
                body: responses::success_body(
                    state.endpoint(),
                    state.method(),
                    state.pagination(),
                    request.body.as_ref(),
                ),
                time_ms,
            }
        } else {
            SimulatedResponse {
                status: 400,
                body: responses::failure_body(),
                time_ms,
            }
        };
        info!(status = response.status, time_ms, "simulated request finished");
        Ok(response)
    }

    /// Simulate a connection test against the external system
    pub async fn test_connection(
        &self,
        system: &ExternalSystem,
        discover: bool,
    ) -> Result<ConnectionOutcome, TestError> {
        if !system.is_ready() {
            return Err(TestError::ExternalSystemIncomplete);
        }
        let _guard = self.begin()?;
        debug!(url = %system.full_url(), discover, "simulating connection test");

        self.wait().await;

        let discovered = discover.then(responses::discovered_fields);
        info!(
            discovered = discovered.as_ref().map_or(0, Vec::len),
            "external connection succeeded"
        );
        Ok(ConnectionOutcome {
            success: true,
            message: "Successfully connected to the external API".to_string(),
            discovered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ExternalAuth;
    use crate::request::mask::SecretString;
    use crate::schema::HttpMethod;

    fn quick(rate: f64) -> TestRunner {
        TestRunner::new(
            SimulationConfig::default()
                .with_delay(0)
                .with_seed(7)
                .with_success_rate(rate),
        )
    }

    fn ready_system() -> ExternalSystem {
        ExternalSystem {
            name: "Sample CRM".to_string(),
            base_url: "https://api.samplecrm.com".to_string(),
            endpoint: "/contacts".to_string(),
            method: HttpMethod::Post,
            auth: ExternalAuth::Bearer {
                token: SecretString::new("sample_token_xyz"),
            },
        }
    }

    #[test]
    fn test_status_and_latency_classes() {
        assert_eq!(StatusClass::of(200), StatusClass::Success);
        assert_eq!(StatusClass::of(404), StatusClass::ClientError);
        assert_eq!(StatusClass::of(503), StatusClass::ServerError);
        assert_eq!(StatusClass::of(302), StatusClass::Other);
        assert_eq!(LatencyClass::of(199), LatencyClass::Fast);
        assert_eq!(LatencyClass::of(200), LatencyClass::Moderate);
        assert_eq!(LatencyClass::of(500), LatencyClass::Slow);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let runner = quick(1.0);
        let state = WizardState::new();
        assert_eq!(runner.run_request(&state).await, Err(TestError::MissingApiKey));
        assert!(!runner.is_pending());
    }

    #[tokio::test]
    async fn test_success_response() {
        let runner = quick(1.0);
        let state = WizardState::new().with_api_key("ABCDEFGHIJKLMNOPQRST");
        let response = runner.run_request(&state).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.body["meta"]["total_pages"], 26);
        assert!((100..400).contains(&response.time_ms));
        assert!(!runner.is_pending());
    }

    #[tokio::test]
    async fn test_failure_response() {
        let runner = quick(0.0);
        let state = WizardState::new().with_api_key("ABCDEFGHIJKLMNOPQRST");
        let response = runner.run_request(&state).await.unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(response.status_class(), StatusClass::ClientError);
        assert_eq!(response.body["message"], "Invalid parameters or configuration");
    }

    #[tokio::test]
    async fn test_second_request_while_pending() {
        let runner = TestRunner::new(SimulationConfig::default().with_delay(50).with_seed(1));
        let state = WizardState::new().with_api_key("ABCDEFGHIJKLMNOPQRST");
        let (first, second) = tokio::join!(runner.run_request(&state), runner.run_request(&state));
        assert!(first.is_ok());
        assert_eq!(second, Err(TestError::InFlight));
        assert!(!runner.is_pending());
        assert!(runner.run_request(&state).await.is_ok());
    }

    #[tokio::test]
    async fn test_seeded_runs_repeat() {
        let state = WizardState::new().with_api_key("ABCDEFGHIJKLMNOPQRST");
        let a = TestRunner::new(SimulationConfig::default().with_delay(0).with_seed(42));
        let b = TestRunner::new(SimulationConfig::default().with_delay(0).with_seed(42));
        for _ in 0..5 {
            assert_eq!(a.run_request(&state).await, b.run_request(&state).await);
        }
    }

    #[tokio::test]
    async fn test_connection_requires_ready_system() {
        let runner = quick(1.0);
        assert_eq!(
            runner.test_connection(&ExternalSystem::default(), true).await,
            Err(TestError::ExternalSystemIncomplete)
        );

        let outcome = runner.test_connection(&ready_system(), true).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.discovered.map(|f| f.len()), Some(7));

        let outcome = runner.test_connection(&ready_system(), false).await.unwrap();
        assert!(outcome.discovered.is_none());
    }
}
