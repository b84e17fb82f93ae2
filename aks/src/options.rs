use crate::error::{self, Result};
use agent_utils::impl_display_as_json;
use clap::Args;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::path::PathBuf;

/// The configuration of one AKS deployment. Both fields start out empty and are filled in from the
/// command line by the harness.
#[derive(Args, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOptions {
    /// The resource group the cluster is deployed into.
    #[clap(long, default_value = "")]
    pub resource_group: String,

    /// Path to the infrastructure template that describes the cluster.
    #[clap(long, default_value = "")]
    pub template: PathBuf,
}

impl_display_as_json!(ClusterOptions);

impl ClusterOptions {
    /// Make sure both values that the cloud commands need were provided.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.resource_group.is_empty(),
            error::MissingOptionSnafu {
                flag: "resource-group"
            }
        );
        ensure!(
            !self.template.as_os_str().is_empty(),
            error::MissingOptionSnafu { flag: "template" }
        );
        Ok(())
    }
}
