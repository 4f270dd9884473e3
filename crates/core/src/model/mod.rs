//! Serde data models: redirect rules and harness scenarios.

pub mod rule;
pub mod scenario;

pub use rule::{RedirectConfig, RedirectRule};
pub use scenario::{
    CheckScenario, ErrorDetail, ErrorType, Expectation, RequestFixture, ScenarioContext,
    ScenarioResult, ScenarioStatus, SuiteResult, UrlMismatch,
};
