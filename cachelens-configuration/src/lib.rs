//! Declarative configuration for Cachelens.
//!
//! - [`ExchangeConfig`] describes a captured exchange in YAML or JSON and
//!   builds a [`cachelens_http::Exchange`] from it
//! - [`HeaderList`] is the ordered name/value list edited by header editors
//!
//! ```
//! use cachelens_configuration::ExchangeConfig;
//!
//! let config = ExchangeConfig::from_yaml(r#"
//! method: POST
//! path: /abc
//! query: a=b
//! response_headers:
//!   Cache-Control: public, max-age=10000
//!   Content-Location: /abc?a=b
//! "#).unwrap();
//!
//! let exchange = config.into_exchange().unwrap();
//! assert_eq!(exchange.path_and_query(), "/abc?a=b");
//! ```

pub mod error;
pub mod exchange;
pub mod headers;

pub use error::ConfigError;
pub use exchange::ExchangeConfig;
pub use headers::{HeaderConfig, HeaderList, HeaderValue};
