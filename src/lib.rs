//! Uplink E2E Test Framework
//!
//! This crate drives the Uplink desktop application through a
//! WebDriver-compatible automation driver and verifies the
//! account-creation flow end to end:
//! - Spawns the automation driver as a subprocess
//! - Speaks the W3C WebDriver wire protocol over HTTP
//! - Executes a fixed ordered list of scenarios against screen objects
//! - Reports per-case pass/fail/skip results as JSON
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Scenario Runner (Rust)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── start() -> AppHandle + Session                       │
//! │    ├── run_suite(&[Scenario]) -> SuiteResult                │
//! │    └── finish() -> session deleted, driver stopped          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (in-code, ordered)                                │
//! │    ├── name, skip rationale                                 │
//! │    └── steps: [Step]                                        │
//! │          ├── enter_text { target, text, clear_first }       │
//! │          ├── assert_displayed { target }                    │
//! │          ├── assert_text_contains { target, needle }        │
//! │          └── reset_app                                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Screens: CreatePin │ CreateAccount │ EnterPin │ UplinkMain │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod driver;
pub mod error;
pub mod runner;
pub mod scenario;
pub mod screens;

pub use error::{E2eError, E2eResult};
pub use runner::ScenarioRunner;
pub use scenario::{account_creation_suite, Scenario, Step};
