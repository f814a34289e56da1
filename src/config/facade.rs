//! Public loading surface over the layered sources.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::MapQueryConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads configuration from the layered sources.
///
/// Precedence, lowest to highest: built-in defaults, the global file under
/// `~/.config/mapquery/`, then the workspace `config/config.toml` and its
/// environment-specific sibling.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(workspace_root: &Path) -> Result<MapQueryConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        builder = workspace_file::add_to_builder(builder, workspace_root)?;

        let config: MapQueryConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace_root = %workspace_root.display(),
            service_count = config.services.len(),
            layer_count = config.layers.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Load a single explicit file on top of the defaults, skipping the
    /// layered sources.
    pub fn load_from_file(path: &Path) -> Result<MapQueryConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()))
            .build()?
            .try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
