use deployer::deployer::DeployerError;
use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to create deployment [{}]: {}", template.display(), source))]
    CreateDeployment {
        template: PathBuf,
        source: agent_utils::Error,
    },

    #[snafu(display("Failed to query deployment [{}]: {}", template.display(), source))]
    QueryDeployment {
        template: PathBuf,
        source: agent_utils::Error,
    },

    #[snafu(display("Failed to get kubeconfig: {}", source))]
    GetKubeconfig { source: agent_utils::Error },

    #[snafu(display("Failed to delete resource '{}': {}", resource_id, source))]
    DeleteResource {
        resource_id: String,
        source: agent_utils::Error,
    },

    #[snafu(display("Failed to get cluster state: {}", source))]
    ClusterState { source: Box<Error> },

    #[snafu(display("Unable to parse deployment output: {}", source))]
    ParseDeployment { source: serde_json::Error },

    #[snafu(display("The deployment output does not list any resources"))]
    NoOutputResources,

    #[snafu(display("Invalid cluster resource id '{}'", resource_id))]
    InvalidResourceId { resource_id: String },

    #[snafu(display("No managed cluster found in the what-if output"))]
    ResourceIdNotFound,

    #[snafu(display("The '--{}' flag is required", flag))]
    MissingOption { flag: String },

    #[snafu(display("Unable to create a directory for the kubeconfig: {}", source))]
    CreateTempDir { source: std::io::Error },

    #[snafu(display("Unable to write kubeconfig '{}': {}", path.display(), source))]
    WriteKubeconfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to set environment variable '{}': {}", key, what))]
    EnvSetup { key: String, what: String },

    #[snafu(display("'{}' is not implemented", verb))]
    Unimplemented { verb: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for DeployerError {
    fn from(e: Error) -> Self {
        match e {
            Error::Unimplemented { verb } => DeployerError::unimplemented(verb),
            e => DeployerError::new_with_source(e),
        }
    }
}
