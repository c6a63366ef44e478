//! CLI command implementations
//!
//! - `quote`: Price a weight for a destination
//! - `rates`: Inspect and validate rate configs (validate, countries, schema)

pub mod quote;
pub mod rates;

pub use quote::cmd_quote;
pub use rates::{cmd_countries, cmd_schema, cmd_validate};
