mod error;

pub use self::error::{DeployerError, DeployerResult, ErrorKind, IntoDeployerError};
use crate::Options;
use clap::ArgMatches;

/// A construction entry point. Given the harness [`Options`], it allocates a deployer with empty
/// configuration and returns it along with the flag set that configures it. The returned
/// `clap::Command` must include [`harness_args`](crate::harness_args) so that the harness can parse
/// its own verbs from the same command line.
pub type NewDeployer<D> = fn(&Options) -> (D, clap::Command<'static>);

/// You implement the [`Deployer`] trait in order to bring a test cluster up and down. The type is
/// then handed to an [`Agent`](crate::Agent) which calls the verbs in the order the harness
/// requires.
///
/// The harness invokes at most one verb at a time, so implementations are free to keep state
/// between verbs in `&mut self`, e.g. the identity of the cluster that `up` created.
#[async_trait::async_trait]
pub trait Deployer: Send {
    /// Copy the values of this deployer's flags out of the parsed command line. This is called
    /// once, before any verb.
    fn bind_flags(&mut self, matches: &ArgMatches) -> DeployerResult<()>;

    /// Provision a new cluster for testing.
    async fn up(&mut self) -> DeployerResult<()>;

    /// Return `true` if a test cluster is successfully provisioned.
    async fn is_up(&mut self) -> DeployerResult<bool>;

    /// Tear down the test cluster, if any. Calling `down` when there is no cluster must succeed.
    async fn down(&mut self) -> DeployerResult<()>;

    /// Export logs from the cluster. It may be called multiple times. Deployers that cannot do this
    /// return [`DeployerError::unimplemented`], which the harness tolerates.
    async fn dump_cluster_logs(&mut self) -> DeployerResult<()>;

    /// Build Kubernetes and package it in whatever format the deployer consumes.
    async fn build(&mut self) -> DeployerResult<()>;
}
