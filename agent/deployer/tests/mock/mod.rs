/*!

This test module provides a mock implementation of the [`Deployer`] trait that records the verbs it
is asked to run, so that the [`Agent`] can be tested without a cloud.

!*/

use clap::{Arg, ArgMatches, Command};
use deployer::deployer::{DeployerError, DeployerResult};
use deployer::error::ErrorMessage;
use deployer::{harness_args, Deployer, Options};

const NAME_ARG: &str = "cluster-name";

/// `MockDeployer` pretends to manage a cluster.
#[derive(Debug, Default)]
pub(crate) struct MockDeployer {
    pub(crate) cluster_name: String,
    pub(crate) cluster_up: bool,
    pub(crate) calls: Vec<&'static str>,
    pub(crate) fail_up: bool,
    pub(crate) skip_cluster_on_up: bool,
}

/// A construction entry point in the shape of `deployer::NewDeployer`.
pub(crate) fn new(_opts: &Options) -> (MockDeployer, Command<'static>) {
    let flags = Command::new("kubetest2-mock")
        .arg(Arg::new(NAME_ARG).long(NAME_ARG).takes_value(true))
        .args(harness_args());
    (MockDeployer::default(), flags)
}

#[async_trait::async_trait]
impl Deployer for MockDeployer {
    fn bind_flags(&mut self, matches: &ArgMatches) -> DeployerResult<()> {
        self.cluster_name = matches.value_of(NAME_ARG).unwrap_or_default().to_string();
        Ok(())
    }

    async fn up(&mut self) -> DeployerResult<()> {
        self.calls.push("up");
        if self.fail_up {
            return Err(DeployerError::new_with_source_and_context(
                "Failed to create deployment",
                ErrorMessage::from("quota exceeded"),
            ));
        }
        self.cluster_up = !self.skip_cluster_on_up;
        Ok(())
    }

    async fn is_up(&mut self) -> DeployerResult<bool> {
        self.calls.push("is_up");
        Ok(self.cluster_up)
    }

    async fn down(&mut self) -> DeployerResult<()> {
        self.calls.push("down");
        self.cluster_up = false;
        Ok(())
    }

    async fn dump_cluster_logs(&mut self) -> DeployerResult<()> {
        self.calls.push("dump_cluster_logs");
        Err(DeployerError::unimplemented("DumpClusterLogs"))
    }

    async fn build(&mut self) -> DeployerResult<()> {
        self.calls.push("build");
        Err(DeployerError::unimplemented("Build"))
    }
}
