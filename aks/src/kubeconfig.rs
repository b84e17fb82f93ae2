use crate::error::{self, Result};
use log::info;
use snafu::{ensure, ResultExt};
use std::fs::{self, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// The environment variable that tells later test stages where the cluster's kubeconfig is.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
const KUBECONFIG_DIR_PREFIX: &str = "kubetest2-aks";
const KUBECONFIG_MODE: u32 = 0o644;

pub(crate) fn kubeconfig_file_name(group: &str, cluster_name: &str) -> String {
    format!("kubeconfig-{}-{}", group, cluster_name)
}

/// Writes `kubeconfig` into a new temporary directory and returns the file's path. The directory
/// outlives the deployer so that later test stages can read it.
pub(crate) fn write_kubeconfig(
    kubeconfig: &[u8],
    group: &str,
    cluster_name: &str,
) -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(KUBECONFIG_DIR_PREFIX)
        .tempdir()
        .context(error::CreateTempDirSnafu)?
        .keep();
    let path = dir.join(kubeconfig_file_name(group, cluster_name));
    fs::write(&path, kubeconfig).context(error::WriteKubeconfigSnafu { path: &path })?;
    fs::set_permissions(&path, Permissions::from_mode(KUBECONFIG_MODE))
        .context(error::WriteKubeconfigSnafu { path: &path })?;
    info!("Wrote kubeconfig to '{}'", path.display());
    Ok(path)
}

/// Points `KUBECONFIG` at `path` for this process and its children. The variable is process wide,
/// so only one deployer per process may call this.
pub(crate) fn export_kubeconfig(path: &Path) -> Result<()> {
    let value = path.as_os_str();
    ensure!(
        !value.is_empty() && !value.to_string_lossy().contains('\0'),
        error::EnvSetupSnafu {
            key: KUBECONFIG_ENV,
            what: format!("'{}' is not a valid value", path.display()),
        }
    );
    std::env::set_var(KUBECONFIG_ENV, value);
    Ok(())
}
