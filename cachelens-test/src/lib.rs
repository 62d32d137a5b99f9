//! Behaviour tests for cachelens.
//!
//! Scenarios live in `tests/features` and describe exchanges as YAML
//! docstrings, the same format [`cachelens_configuration::ExchangeConfig`]
//! reads from fixture files:
//!
//! ```gherkin
//! Scenario: max-age without a validator
//!   Given exchange
//!     """
//!     response_headers:
//!       Cache-Control: max-age=60
//!       Date: Thu, 01 Jan 2099 00:00:00 GMT
//!     """
//!   When the exchange is explained
//!   Then summary is "Cacheable"
//!   And type is "suggestion"
//! ```

pub mod steps;
pub mod tracing;
pub mod world;
