//! Command-line interface definitions and handlers for the alfie CLI.

pub mod args;
pub mod classify;
pub mod features;
pub mod helpers;

pub use args::{Cli, Commands};
pub use classify::{run_classify, ClassifyArgs};
pub use features::{run_features, FeaturesArgs};
