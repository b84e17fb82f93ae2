use crate::az::{Az, AzureCli};
use crate::error::{self, Result};
use crate::kubeconfig::{export_kubeconfig, write_kubeconfig};
use crate::options::ClusterOptions;
use crate::parse::{parse_cluster_name, parse_resource_id, parse_what_if};
use clap::{ArgMatches, FromArgMatches};
use deployer::deployer::DeployerResult;
use deployer::Deployer;
use log::{debug, info};
use snafu::ResultExt;
use std::path::{Path, PathBuf};

/// What this deployer knows about its cluster.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ClusterState {
    /// Nothing has been observed yet.
    #[default]
    Unknown,

    /// The cluster was deployed or found, and this is its resource id.
    Up { resource_id: String },

    /// The cluster was deleted by this deployer.
    Down,
}

/// Brings an AKS cluster up and down by deploying an infrastructure template into a resource
/// group. The cluster's resource id is kept between verbs, and a fresh deployer recovers it from a
/// what-if preview of the same template.
///
/// `up` exports `KUBECONFIG`, which is process wide, so two deployers must not run verbs
/// concurrently in one process.
#[derive(Debug)]
pub struct AksDeployer<C = Az>
where
    C: AzureCli,
{
    options: ClusterOptions,
    state: ClusterState,
    kubeconfig_path: Option<PathBuf>,
    az: C,
}

impl AksDeployer<Az> {
    pub fn new(options: ClusterOptions) -> Self {
        Self::with_cli(options, Az::default())
    }
}

impl<C> AksDeployer<C>
where
    C: AzureCli,
{
    pub fn with_cli(options: ClusterOptions, az: C) -> Self {
        Self {
            options,
            state: ClusterState::Unknown,
            kubeconfig_path: None,
            az,
        }
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    pub fn cluster_resource_id(&self) -> Option<&str> {
        match &self.state {
            ClusterState::Up { resource_id } => Some(resource_id),
            ClusterState::Unknown | ClusterState::Down => None,
        }
    }

    /// The kubeconfig written by the last successful `up`.
    pub fn kubeconfig_path(&self) -> Option<&Path> {
        self.kubeconfig_path.as_deref()
    }

    pub fn cli(&self) -> &C {
        &self.az
    }

    /// Deploy the template, then fetch the cluster's credentials and export them through
    /// `KUBECONFIG`. The deployment is always submitted, even if the cluster exists. Nothing is
    /// rolled back when a later step fails.
    pub async fn create_cluster(&mut self) -> Result<()> {
        self.options.validate()?;
        info!("Creating deployment: {}", self.options);
        let group = &self.options.resource_group;
        let template = &self.options.template;

        let output = self
            .az
            .submit_deployment(group, template)
            .await
            .context(error::CreateDeploymentSnafu { template })?;
        let resource_id = parse_resource_id(&output)?;
        self.state = ClusterState::Up {
            resource_id: resource_id.clone(),
        };
        info!("Successful deployment of '{}'", resource_id);

        let cluster_name = parse_cluster_name(&resource_id)?;
        let kubeconfig = self
            .az
            .get_credentials(group, &cluster_name)
            .await
            .context(error::GetKubeconfigSnafu)?;
        let path = write_kubeconfig(&kubeconfig, group, &cluster_name)?;
        export_kubeconfig(&path)?;
        self.kubeconfig_path = Some(path);
        Ok(())
    }

    /// Whether the cluster described by the template exists. Only a failure to run the what-if
    /// deployment is an error; a preview without a cluster, or a cluster id that cannot be looked
    /// up, means the cluster is absent.
    pub async fn cluster_exists(&mut self) -> Result<bool> {
        match self.find_cluster().await? {
            Some(resource_id) => {
                self.state = ClusterState::Up { resource_id };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete the cluster if it exists. Repeated calls are no-ops.
    pub async fn destroy_cluster(&mut self) -> Result<()> {
        let resource_id = match self
            .find_cluster()
            .await
            .map_err(Box::new)
            .context(error::ClusterStateSnafu)?
        {
            Some(resource_id) => resource_id,
            None => {
                info!("No cluster, skipping down.");
                return Ok(());
            }
        };
        self.state = ClusterState::Up {
            resource_id: resource_id.clone(),
        };

        info!("Deleting resource '{}'", resource_id);
        self.az
            .delete_resource(&resource_id)
            .await
            .context(error::DeleteResourceSnafu {
                resource_id: &resource_id,
            })?;
        self.state = ClusterState::Down;
        info!("Deleted resources");
        Ok(())
    }

    async fn find_cluster(&self) -> Result<Option<String>> {
        self.options.validate()?;
        let template = &self.options.template;
        let output = self
            .az
            .dry_run_deployment(&self.options.resource_group, template)
            .await
            .context(error::QueryDeploymentSnafu { template })?;
        let resource_id = match parse_what_if(&output) {
            Ok(resource_id) => resource_id,
            Err(e) => {
                debug!("Cluster is not part of the deployment: {}", e);
                return Ok(None);
            }
        };
        if let Err(e) = self.az.show_resource(&resource_id).await {
            debug!("Cluster does not exist: {}", e);
            return Ok(None);
        }
        Ok(Some(resource_id))
    }
}

#[async_trait::async_trait]
impl<C> Deployer for AksDeployer<C>
where
    C: AzureCli,
{
    fn bind_flags(&mut self, matches: &ArgMatches) -> DeployerResult<()> {
        // `snafu::ResultExt::context` shares the method name.
        deployer::deployer::IntoDeployerError::context(
            self.options.update_from_arg_matches(matches),
            "Unable to read aks flags",
        )
    }

    async fn up(&mut self) -> DeployerResult<()> {
        Ok(self.create_cluster().await?)
    }

    async fn is_up(&mut self) -> DeployerResult<bool> {
        Ok(self.cluster_exists().await?)
    }

    async fn down(&mut self) -> DeployerResult<()> {
        Ok(self.destroy_cluster().await?)
    }

    async fn dump_cluster_logs(&mut self) -> DeployerResult<()> {
        Err(error::Error::Unimplemented {
            verb: "DumpClusterLogs".to_string(),
        }
        .into())
    }

    async fn build(&mut self) -> DeployerResult<()> {
        Err(error::Error::Unimplemented {
            verb: "Build".to_string(),
        }
        .into())
    }
}
