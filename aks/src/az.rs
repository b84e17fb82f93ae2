/*!

The cloud operations that the deployer delegates to the Azure CLI. Each operation returns the
command's `stdout` or the process runner's error unchanged; the deployer adds context.

!*/

use agent_utils::run_with_error_output;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// The Azure CLI executable, looked up on `PATH`.
pub const AZ_BIN: &str = "az";
/// The what-if result format that lists resource ids without property changes.
const WHAT_IF_RESULT_FORMAT: &str = "ResourceIdOnly";

pub type CliResult = std::result::Result<Vec<u8>, agent_utils::Error>;

/// The operations the deployer needs from the cloud. [`Az`] implements them with the Azure CLI;
/// tests substitute their own implementation.
#[async_trait::async_trait]
pub trait AzureCli: Send + Sync {
    /// Submit a group-scoped deployment of `template`. Returns the deployment result JSON.
    async fn submit_deployment(&self, group: &str, template: &Path) -> CliResult;

    /// Preview the same deployment without applying it. Returns the what-if text.
    async fn dry_run_deployment(&self, group: &str, template: &Path) -> CliResult;

    /// Look a resource up by id. Only success or failure is meaningful.
    async fn show_resource(&self, resource_id: &str) -> CliResult;

    async fn delete_resource(&self, resource_id: &str) -> CliResult;

    /// Fetch the credentials of a managed cluster as a kubeconfig document.
    async fn get_credentials(&self, group: &str, cluster_name: &str) -> CliResult;
}

/// Runs the Azure CLI. It must already be authenticated.
#[derive(Clone, Debug)]
pub struct Az {
    program: PathBuf,
}

impl Default for Az {
    fn default() -> Self {
        Self::new(AZ_BIN)
    }
}

impl Az {
    pub fn new<P>(program: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, args: Vec<OsString>) -> CliResult {
        run_with_error_output(Command::new(&self.program).args(args)).await
    }
}

#[async_trait::async_trait]
impl AzureCli for Az {
    async fn submit_deployment(&self, group: &str, template: &Path) -> CliResult {
        self.run(deployment_args(group, template, false)).await
    }

    async fn dry_run_deployment(&self, group: &str, template: &Path) -> CliResult {
        self.run(deployment_args(group, template, true)).await
    }

    async fn show_resource(&self, resource_id: &str) -> CliResult {
        self.run(resource_args("show", resource_id)).await
    }

    async fn delete_resource(&self, resource_id: &str) -> CliResult {
        self.run(resource_args("delete", resource_id)).await
    }

    async fn get_credentials(&self, group: &str, cluster_name: &str) -> CliResult {
        self.run(get_credentials_args(group, cluster_name)).await
    }
}

/// `deployment group create [-w -r ResourceIdOnly] -g <group> -f <template>`
fn deployment_args(group: &str, template: &Path, what_if: bool) -> Vec<OsString> {
    let mut args = vec!["deployment", "group", "create"];
    if what_if {
        args.extend(["-w", "-r", WHAT_IF_RESULT_FORMAT]);
    }
    args.extend(["-g", group, "-f"]);
    let mut args: Vec<OsString> = args.into_iter().map(OsString::from).collect();
    args.push(template.as_os_str().to_owned());
    args
}

/// `resource <verb> --ids <resource id>`
fn resource_args(verb: &str, resource_id: &str) -> Vec<OsString> {
    ["resource", verb, "--ids", resource_id]
        .into_iter()
        .map(OsString::from)
        .collect()
}

/// `aks get-credentials -g <group> -n <cluster> -f -`, which writes the kubeconfig to `stdout`.
fn get_credentials_args(group: &str, cluster_name: &str) -> Vec<OsString> {
    ["aks", "get-credentials", "-g", group, "-n", cluster_name, "-f", "-"]
        .into_iter()
        .map(OsString::from)
        .collect()
}
