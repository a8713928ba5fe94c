pub mod cli;
pub mod config;
pub mod context;
pub mod executor;

pub use config::{CONFIG_FILE, ProjectConfig, load_config};
pub use context::{Overrides, build_context, package_request};
pub use executor::{ExecutionReport, Executor, StepOutcome, StepReport};
