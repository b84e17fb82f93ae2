/*!

Parsers for the output of the `az` commands that the deployer runs. The what-if and resource id
patterns follow the human-oriented text that `az` prints, so any change to that format is a
breaking change for the deployer.

!*/

use crate::error::{self, Result};
use log::trace;
use regex::Regex;
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};

/// The resource type of an AKS cluster.
pub const MANAGED_CLUSTER_TYPE: &str = "Microsoft.ContainerService/managedClusters";

const SCOPE_PATTERN_REGEX: &str = r"Scope: (.+)";
const MANAGED_CLUSTER_PATTERN_REGEX: &str = r"\+ Microsoft\.ContainerService/managedClusters/(.+)";
const RESOURCE_ID_PATTERN_REGEX: &str =
    r"(?i)/subscriptions/(.+)/resourcegroups/(.+)/providers/Microsoft\.ContainerService/managedClusters/(.+)$";

lazy_static::lazy_static! {
    static ref SCOPE_REGEX: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(SCOPE_PATTERN_REGEX).unwrap()
    };

    static ref MANAGED_CLUSTER_REGEX: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(MANAGED_CLUSTER_PATTERN_REGEX).unwrap()
    };

    static ref RESOURCE_ID_REGEX: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(RESOURCE_ID_PATTERN_REGEX).unwrap()
    };
}

/// The parts of `az deployment group create` output that we use.
#[derive(Debug, Deserialize)]
struct ArmDeployment {
    properties: ArmDeploymentProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArmDeploymentProperties {
    #[serde(default)]
    output_resources: Vec<ArmDeploymentOutputResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArmDeploymentOutputResource {
    id: String,
    #[serde(default)]
    resource_group: Option<String>,
}

/// Returns the id of the first resource listed in a deployment result.
pub fn parse_resource_id(output: &[u8]) -> Result<String> {
    let deployment: ArmDeployment =
        serde_json::from_slice(output).context(error::ParseDeploymentSnafu)?;
    let resource = deployment
        .properties
        .output_resources
        .into_iter()
        .next()
        .context(error::NoOutputResourcesSnafu)?;
    trace!(
        "Deployment reported resource '{}' in resource group '{}'",
        resource.id,
        resource.resource_group.as_deref().unwrap_or_default()
    );
    Ok(resource.id)
}

/// Predicts the resource id of the managed cluster from the output of a what-if deployment. The
/// first managed cluster line wins, qualified by the last `Scope:` line seen before it.
pub fn parse_what_if(output: &[u8]) -> Result<String> {
    let mut scope = String::new();
    for line in output.split(|&b| b == b'\n') {
        let line = String::from_utf8_lossy(line);
        if let Some(captures) = SCOPE_REGEX.captures(&line) {
            scope = captures[1].to_string();
            continue;
        }
        if let Some(captures) = MANAGED_CLUSTER_REGEX.captures(&line) {
            return Ok(format!("{}/{}/{}", scope, MANAGED_CLUSTER_TYPE, &captures[1]));
        }
    }
    error::ResourceIdNotFoundSnafu.fail()
}

/// Returns the cluster's name, i.e. the last segment of its resource id.
pub fn parse_cluster_name(resource_id: &str) -> Result<String> {
    let captures = RESOURCE_ID_REGEX
        .captures(resource_id)
        .context(error::InvalidResourceIdSnafu { resource_id })?;
    let parts = (captures.get(1), captures.get(2), captures.get(3));
    match parts {
        (Some(subscription), Some(group), Some(name))
            if !subscription.as_str().is_empty()
                && !group.as_str().is_empty()
                && !name.as_str().is_empty() =>
        {
            Ok(name.as_str().to_string())
        }
        _ => error::InvalidResourceIdSnafu { resource_id }.fail(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    const CLUSTER_ID: &str =
        "/subscriptions/S/resourcegroups/rg1/providers/Microsoft.ContainerService/managedClusters/c1";

    #[test]
    fn resource_id_is_the_first_output_resource() {
        let output = format!(
            r#"{{"properties":{{"outputResources":[{{"id":"{}","resourceGroup":"rg1"}},{{"id":"/other","resourceGroup":"rg1"}}]}}}}"#,
            CLUSTER_ID
        );
        assert_eq!(parse_resource_id(output.as_bytes()).unwrap(), CLUSTER_ID);
    }

    #[test]
    fn resource_id_ignores_unknown_fields() {
        let output = serde_json::json!({
            "id": "/subscriptions/S/resourceGroups/rg1/providers/Microsoft.Resources/deployments/t",
            "properties": {
                "provisioningState": "Succeeded",
                "outputResources": [{ "id": CLUSTER_ID, "resourceGroup": "rg1" }]
            }
        });
        let bytes = serde_json::to_vec(&output).unwrap();
        assert_eq!(parse_resource_id(&bytes).unwrap(), CLUSTER_ID);
    }

    #[test]
    fn resource_id_requires_output_resources() {
        let empty = br#"{"properties":{"outputResources":[]}}"#;
        assert!(matches!(
            parse_resource_id(empty).unwrap_err(),
            Error::NoOutputResources
        ));
        let missing = br#"{"properties":{}}"#;
        assert!(matches!(
            parse_resource_id(missing).unwrap_err(),
            Error::NoOutputResources
        ));
    }

    #[test]
    fn resource_id_rejects_invalid_json() {
        assert!(matches!(
            parse_resource_id(b"ERROR: deployment failed").unwrap_err(),
            Error::ParseDeployment { .. }
        ));
        assert!(matches!(
            parse_resource_id(b"{}").unwrap_err(),
            Error::ParseDeployment { .. }
        ));
    }

    #[test]
    fn what_if_joins_scope_and_cluster() {
        let output = b"Note: The result may contain false positive predictions (noise).

Resource and property changes are indicated with this symbol:
  + Create

The deployment will update the following scope:

Scope: /subscriptions/S/resourceGroups/rg1

  + Microsoft.ContainerService/managedClusters/c1

Resource changes: 1 to create.
";
        assert_eq!(
            parse_what_if(output).unwrap(),
            "/subscriptions/S/resourceGroups/rg1/Microsoft.ContainerService/managedClusters/c1"
        );
    }

    #[test]
    fn what_if_first_cluster_wins() {
        let output = b"Scope: /subscriptions/S/resourceGroups/rg1
  + Microsoft.ContainerService/managedClusters/c1
Scope: /subscriptions/S/resourceGroups/rg2
  + Microsoft.ContainerService/managedClusters/c2
";
        assert_eq!(
            parse_what_if(output).unwrap(),
            "/subscriptions/S/resourceGroups/rg1/Microsoft.ContainerService/managedClusters/c1"
        );
    }

    #[test]
    fn what_if_uses_the_latest_scope() {
        let output = b"Scope: /subscriptions/S/resourceGroups/old
  + Microsoft.Network/virtualNetworks/vnet
Scope: /subscriptions/S/resourceGroups/new
  + Microsoft.ContainerService/managedClusters/c1
";
        assert_eq!(
            parse_what_if(output).unwrap(),
            "/subscriptions/S/resourceGroups/new/Microsoft.ContainerService/managedClusters/c1"
        );
    }

    #[test]
    fn what_if_without_scope_has_empty_prefix() {
        let output = b"  + Microsoft.ContainerService/managedClusters/c1";
        assert_eq!(
            parse_what_if(output).unwrap(),
            "/Microsoft.ContainerService/managedClusters/c1"
        );
    }

    #[test]
    fn what_if_without_cluster_is_not_found() {
        let output = b"Scope: /subscriptions/S/resourceGroups/rg1\n\nNo change.\n";
        assert!(matches!(
            parse_what_if(output).unwrap_err(),
            Error::ResourceIdNotFound
        ));
        assert!(matches!(
            parse_what_if(b"").unwrap_err(),
            Error::ResourceIdNotFound
        ));
    }

    #[test]
    fn what_if_is_case_sensitive() {
        let output = b"scope: /subscriptions/S/resourceGroups/rg1
  + microsoft.containerservice/managedclusters/c1
";
        assert!(parse_what_if(output).is_err());
    }

    #[test]
    fn cluster_name_is_the_last_segment() {
        assert_eq!(parse_cluster_name(CLUSTER_ID).unwrap(), "c1");
        assert_eq!(
            parse_cluster_name(
                "/SUBSCRIPTIONS/S/ResourceGroups/rg1/PROVIDERS/microsoft.containerservice/MANAGEDCLUSTERS/My-Cluster"
            )
            .unwrap(),
            "My-Cluster"
        );
    }

    #[test]
    fn cluster_name_rejects_other_resources() {
        for resource_id in [
            "",
            "c1",
            "/subscriptions/S/resourcegroups/rg1/providers/Microsoft.Network/virtualNetworks/v",
            "/subscriptions//resourcegroups/rg1/providers/Microsoft.ContainerService/managedClusters/c1",
            "/subscriptions/S/resourcegroups/rg1/providers/Microsoft.ContainerService/managedClusters/",
        ] {
            let err = parse_cluster_name(resource_id).unwrap_err();
            assert!(
                matches!(err, Error::InvalidResourceId { .. }),
                "{}: {}",
                resource_id,
                err
            );
        }
    }
}
