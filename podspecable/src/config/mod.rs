mod error;
mod log;
mod workload_kind;

use std::path::{Path, PathBuf};

use kube::core::ApiResource;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::{error::Error, log::LogConfig, workload_kind::WorkloadKind};
use crate::{
    duck::Scheme,
    podspec::{self, WithPod, WithPodList},
};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "WorkloadKind::defaults")]
    pub workload_kinds: Vec<WorkloadKind>,

    #[serde(default = "LogConfig::default")]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { workload_kinds: WorkloadKind::defaults(), log: LogConfig::default() }
    }
}

impl Config {
    pub fn search_config_file_path() -> PathBuf {
        let paths = vec![Self::default_path()]
            .into_iter()
            .chain(podspecable_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(podspecable_base::CONFIG_NAME);
                    path
                },
            ))
            .collect::<Vec<_>>();
        for path in paths {
            let Ok(exists) = path.try_exists() else {
                continue;
            };
            if exists {
                return path;
            }
        }
        Self::default_path()
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        [
            podspecable_base::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(podspecable_base::CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    /// Reads the configuration from `path`, resolving `~` in it and in the
    /// log file path.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be resolved, or the file cannot be
    /// read or parsed.
    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path =
                path.as_ref().try_resolve().map(|path| path.to_path_buf()).with_context(|_| {
                    error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() }
                })?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        tracing::debug!("Loaded {} workload kinds", config.workload_kinds.len());
        Ok(config)
    }

    /// Builds a scheme that files every configured workload kind as
    /// [`WithPod`], its list kind as [`WithPodList`], and the duck kinds
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateKind`] if a kind is configured twice.
    pub fn scheme(&self) -> Result<Scheme, crate::Error> {
        let mut scheme = Scheme::new();
        podspec::add_to_scheme(&mut scheme)?;
        for workload_kind in &self.workload_kinds {
            scheme.add_known_type::<WithPod>(workload_kind.group_version_kind())?;
            scheme.add_known_type::<WithPodList>(workload_kind.list_kind())?;
        }
        Ok(scheme)
    }

    pub fn api_resources(&self) -> impl Iterator<Item = ApiResource> + '_ {
        self.workload_kinds.iter().map(WorkloadKind::api_resource)
    }
}
