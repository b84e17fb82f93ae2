/*!

`aks-deployer` brings Azure Kubernetes Service clusters up and down for a cluster-test harness. The
cluster is described by an infrastructure template that is deployed into a resource group with the
Azure CLI; once it is up, its kubeconfig is written to a temporary file and exported through
`KUBECONFIG` for the test stages that follow.

!*/

mod aks_deployer;
pub mod az;
pub mod error;
mod kubeconfig;
mod options;
pub mod parse;

pub use aks_deployer::{AksDeployer, ClusterState};
pub use error::Error;
pub use kubeconfig::KUBECONFIG_ENV;
pub use options::ClusterOptions;

use clap::{Args, Command};
use deployer::{harness_args, NewDeployer, Options};
use log::debug;

/// The name of this deployer.
pub const NAME: &str = "aks";
const BIN_NAME: &str = "kubetest2-aks";

const _: NewDeployer<AksDeployer> = new;

/// Construct an [`AksDeployer`] with empty options, along with the flags that fill them in. The
/// harness's global flags are part of the returned flag set.
pub fn new(opts: &Options) -> (AksDeployer, Command<'static>) {
    debug!("Creating '{}' deployer for run '{}'", NAME, opts.run_id());
    let deployer = AksDeployer::new(ClusterOptions::default());
    (deployer, bind_flags())
}

fn bind_flags() -> Command<'static> {
    let command = Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Brings AKS test clusters up and down from an infrastructure template");
    ClusterOptions::augment_args(command).args(harness_args())
}
