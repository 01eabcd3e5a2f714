//! FFDI Config
//!
//! This crate contains the configuration document consumed by the hourly
//! FFDI model run workflow. The document is a small, flat set of registry
//! identifiers grouped for readability:
//!
//! - [`ModelInputs`]: the four input datasets
//! - [`ModelAssociations`]: the person and organisation the run is linked to
//! - [`ModelConfigurationEntities`]: the model run workflow template
//!
//! Configuration is validated in two steps. Loading a file checks its shape
//! (all fields present, all values non-empty strings, no unknown fields).
//! Entity validation then asks the registry whether each identifier resolves.
//!
//! ```json
//! {
//!   "inputs": {
//!     "hourly_temperature": "10378.1/1",
//!     "relative_humidity": "10378.1/2",
//!     "wind_speed": "10378.1/3",
//!     "daily_mc_adf": "10378.1/4"
//!   },
//!   "associations": { "person": "10378.1/5", "organisation": "10378.1/6" },
//!   "workflow_configuration": { "workflow_template": "10378.1/7" }
//! }
//! ```

mod associations;
mod entities;
mod error;
mod inputs;
mod validate;
mod workflow;

pub use associations::ModelAssociations;
pub use entities::ModelConfigurationEntities;
pub use error::{ConfigError, SchemaError};
pub use inputs::ModelInputs;
pub use validate::{EntityRef, LookupError, ValidationFailure, ValidationGroup};
pub use workflow::{EXAMPLE_PLACEHOLDER, WorkflowConfig, load_config};
