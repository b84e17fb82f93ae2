/*!

The `deployer` library is the contract between a cluster-test harness and the plugins that bring
test clusters up and down. You implement the [`Deployer`] trait, return it from a construction
entry point (see [`NewDeployer`]) together with the flags it accepts, then hand it to an [`Agent`]
which drives it through the lifecycle verbs that the harness was asked to run.

!*/

mod agent;
pub mod deployer;
pub mod error;
mod flags;
mod options;

pub use agent::Agent;
pub use deployer::{Deployer, NewDeployer};
pub use flags::{harness_args, log_level, Verbs, LOG_LEVEL_ARG};
pub use options::{Options, OptionsError};
