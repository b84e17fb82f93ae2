/*!

The `agent` module defines the `Agent` object which drives a deployer through the lifecycle verbs
that the harness was asked to run.

!*/

use crate::deployer::{Deployer, DeployerError, DeployerResult};
use crate::error::AgentResult;
use crate::flags::Verbs;
use clap::ArgMatches;
use log::{error, info, warn};

/// The `Agent` drives the main program of a deployer.
///
/// The verbs run in this order: `build`; `down` when both `up` and `down` were requested, so that
/// leftovers of a previous run are removed; `up`, followed by an `is_up` check and
/// `dump_cluster_logs`; and finally `down`. Once `up` has been attempted, a requested `down` runs
/// even if `up` failed, since `up` does not clean up after itself.
pub struct Agent<D>
where
    D: Deployer,
{
    deployer: D,
    verbs: Verbs,
}

impl<D> Agent<D>
where
    D: Deployer,
{
    /// Create a new `Agent` from a deployer and the command line parsed with the flag set that the
    /// deployer's construction entry point returned.
    pub fn new(mut deployer: D, matches: &ArgMatches) -> AgentResult<Self> {
        deployer.bind_flags(matches)?;
        Ok(Self {
            deployer,
            verbs: Verbs::from_arg_matches(matches),
        })
    }

    /// Create a new `Agent` from a deployer whose flags have already been bound.
    pub fn with_verbs(deployer: D, verbs: Verbs) -> Self {
        Self { deployer, verbs }
    }

    pub fn verbs(&self) -> Verbs {
        self.verbs
    }

    pub fn deployer(&self) -> &D {
        &self.deployer
    }

    pub fn into_deployer(self) -> D {
        self.deployer
    }

    /// Run every requested verb.
    pub async fn run(&mut self) -> AgentResult<()> {
        if self.verbs.build {
            info!("Building");
            self.deployer.build().await?;
        }

        if self.verbs.up {
            if self.verbs.down {
                info!("Tearing down any existing cluster before up");
                self.deployer.down().await?;
            }
            let up_result = self.up().await;
            if self.verbs.down {
                if let Err(e) = &up_result {
                    error!("Up failed, tearing the cluster down anyway: {}", e);
                }
                let down_result = self.down().await;
                // The first failure is the interesting one.
                up_result?;
                down_result?;
            } else {
                up_result?;
            }
        } else if self.verbs.down {
            self.down().await?;
        }

        Ok(())
    }

    async fn up(&mut self) -> DeployerResult<()> {
        info!("Bringing the cluster up");
        self.deployer.up().await?;
        if !self.deployer.is_up().await? {
            return Err(DeployerError::new_with_context(
                "The cluster is not up after a successful up",
            ));
        }
        info!("The cluster is up");
        match self.deployer.dump_cluster_logs().await {
            Err(e) if e.is_unimplemented() => warn!("Not dumping cluster logs: {}", e),
            other => other?,
        }
        Ok(())
    }

    async fn down(&mut self) -> DeployerResult<()> {
        info!("Tearing the cluster down");
        self.deployer.down().await
    }
}
