/*!

A mock implementation of [`AzureCli`] that answers from canned output and records every call, so
that the deployer can be tested without a cloud.

!*/

use aks_deployer::az::{AzureCli, CliResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub(crate) const CLUSTER_ID: &str =
    "/subscriptions/S/resourcegroups/rg1/providers/Microsoft.ContainerService/managedClusters/c1";
pub(crate) const PREDICTED_ID: &str =
    "/subscriptions/S/resourceGroups/rg1/Microsoft.ContainerService/managedClusters/c1";
pub(crate) const KUBECONFIG: &[u8] = b"apiVersion: v1\nkind: Config\nclusters: []\n";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Call {
    SubmitDeployment { group: String, template: PathBuf },
    DryRunDeployment { group: String, template: PathBuf },
    ShowResource(String),
    DeleteResource(String),
    GetCredentials { group: String, cluster_name: String },
}

/// Canned responses. A `None` output makes the operation fail the way a failed `az` would.
#[derive(Debug)]
pub(crate) struct MockAz {
    pub(crate) deployment: Option<Vec<u8>>,
    pub(crate) what_if: Option<Vec<u8>>,
    pub(crate) show_succeeds: bool,
    pub(crate) delete_succeeds: bool,
    pub(crate) credentials: Option<Vec<u8>>,
    /// Set by a successful delete; lookups fail from then on, as they would in the cloud.
    pub(crate) deleted: AtomicBool,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl Default for MockAz {
    fn default() -> Self {
        Self {
            deployment: Some(deployment_output(CLUSTER_ID)),
            what_if: Some(what_if_output(Some("c1"))),
            show_succeeds: true,
            delete_succeeds: true,
            credentials: Some(KUBECONFIG.to_vec()),
            deleted: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockAz {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn deletes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::DeleteResource(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub(crate) fn deployment_output(resource_id: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "properties": {
            "outputResources": [{ "id": resource_id, "resourceGroup": "rg1" }]
        }
    }))
    .unwrap()
}

pub(crate) fn what_if_output(cluster_name: Option<&str>) -> Vec<u8> {
    let mut output = String::from(
        "Resource and property changes are indicated with this symbol:\n  + Create\n\n\
         The deployment will update the following scope:\n\n\
         Scope: /subscriptions/S/resourceGroups/rg1\n\n",
    );
    if let Some(name) = cluster_name {
        output.push_str(&format!(
            "  + Microsoft.ContainerService/managedClusters/{}\n",
            name
        ));
    }
    output.into_bytes()
}

fn respond(what: &str, output: &Option<Vec<u8>>) -> CliResult {
    output.clone().ok_or_else(|| failure(what))
}

fn failure(what: &str) -> agent_utils::Error {
    agent_utils::Error::CommandSpawn {
        command: format!("az {}", what),
        source: std::io::Error::new(std::io::ErrorKind::Other, "ERROR: (ResourceNotFound)"),
    }
}

#[async_trait::async_trait]
impl AzureCli for MockAz {
    async fn submit_deployment(&self, group: &str, template: &Path) -> CliResult {
        self.record(Call::SubmitDeployment {
            group: group.to_string(),
            template: template.to_path_buf(),
        });
        respond("deployment group create", &self.deployment)
    }

    async fn dry_run_deployment(&self, group: &str, template: &Path) -> CliResult {
        self.record(Call::DryRunDeployment {
            group: group.to_string(),
            template: template.to_path_buf(),
        });
        respond("deployment group create -w", &self.what_if)
    }

    async fn show_resource(&self, resource_id: &str) -> CliResult {
        self.record(Call::ShowResource(resource_id.to_string()));
        if self.show_succeeds && !self.deleted.load(Ordering::SeqCst) {
            Ok(b"{}".to_vec())
        } else {
            Err(failure("resource show"))
        }
    }

    async fn delete_resource(&self, resource_id: &str) -> CliResult {
        self.record(Call::DeleteResource(resource_id.to_string()));
        if self.delete_succeeds {
            self.deleted.store(true, Ordering::SeqCst);
            Ok(Vec::new())
        } else {
            Err(failure("resource delete"))
        }
    }

    async fn get_credentials(&self, group: &str, cluster_name: &str) -> CliResult {
        self.record(Call::GetCredentials {
            group: group.to_string(),
            cluster_name: cluster_name.to_string(),
        });
        respond("aks get-credentials", &self.credentials)
    }
}
