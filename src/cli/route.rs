//! CLI route: single route table and run context. Dispatches to services and presentation.

use crate::cli::command_name;
use crate::cli::parse::{Commands, ServiceCommands};
use crate::cli::presentation::{
    format_query_result_json, format_query_result_text, format_service_list_json,
    format_service_list_text, format_service_show_json, format_service_show_text,
    format_validation_result, ServiceRow,
};
use crate::config::{ConfigLoader, MapQueryConfig};
use crate::error::ServiceError;
use crate::field::FieldValue;
use crate::host::{MemoryHost, QueryHost};
use crate::service::{ServiceFactory, ServiceRegistry};
use crate::types::{LayerPath, Selection};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Runtime context for CLI execution: loaded config, in-memory host, and the
/// service registry built from it. Built from workspace path and optional
/// config path using ConfigLoader only.
pub struct RunContext {
    config: MapQueryConfig,
    host: Arc<MemoryHost>,
    registry: ServiceRegistry,
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RunContext {
    /// The host every registered service was constructed against.
    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    /// Registry of services named by configuration.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Create run context from workspace root and optional config path. Uses
    /// ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ServiceError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ServiceError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let host = Arc::new(MemoryHost::new());
        for layer in &config.layers {
            host.add_layer(
                LayerPath::from(layer.path.as_str()),
                layer.queryable,
                layer.features.clone(),
            );
        }
        for (name, body) in &config.templates {
            host.set_template(name.clone(), body.clone());
        }

        // Registration order is deterministic regardless of map iteration.
        let registry = ServiceRegistry::new();
        let mut names: Vec<String> = config.services.keys().cloned().collect();
        names.sort();
        for name in &names {
            let service_config = &config.services[name];
            let service =
                ServiceFactory::create(Arc::clone(&host) as Arc<dyn QueryHost>, service_config)?;
            registry.register(name.clone(), service)?;
        }
        debug!(
            service_count = names.len(),
            layer_count = config.layers.len(),
            "run context initialized"
        );

        Ok(Self {
            config,
            host,
            registry,
        })
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ServiceError> {
        debug!(command = %command_name(command), "executing command");
        match command {
            Commands::Service { command } => self.handle_service_command(command),
            Commands::Query {
                service,
                fields,
                selection,
                format,
            } => self.handle_query(service, fields, selection.as_deref(), format),
            Commands::Validate => self.handle_validate(),
        }
    }

    fn handle_service_command(&self, command: &ServiceCommands) -> Result<String, ServiceError> {
        match command {
            ServiceCommands::List { format } => {
                let mut rows = Vec::new();
                for name in self.registry.list_all() {
                    let handle = self.registry.get_or_error(&name)?;
                    let definition = handle.definition();
                    let kind = self
                        .config
                        .services
                        .get(&name)
                        .map(|c| c.kind.to_string())
                        .unwrap_or_default();
                    rows.push(ServiceRow {
                        kind,
                        title: definition.title.clone(),
                        template: definition.template.clone(),
                        field_count: definition.fields.len(),
                        name,
                    });
                }
                if format == "json" {
                    Ok(format_service_list_json(&rows))
                } else {
                    Ok(format_service_list_text(&rows))
                }
            }
            ServiceCommands::Show { name, format } => {
                let handle = self.registry.get_or_error(name)?;
                if format == "json" {
                    Ok(format_service_show_json(name, handle.definition()))
                } else {
                    Ok(format_service_show_text(name, handle.definition()))
                }
            }
            ServiceCommands::Validate { name } => {
                let handle = self.registry.get_or_error(name)?;
                let definition = handle.definition();
                let checks = vec![
                    (
                        "tool set default invariant".to_string(),
                        definition.tools.validate().is_ok(),
                    ),
                    ("template name present".to_string(), !definition.template.is_empty()),
                    ("title present".to_string(), !definition.title.is_empty()),
                ];
                Ok(format_validation_result(name, &checks))
            }
        }
    }

    fn handle_query(
        &self,
        service: &str,
        raw_fields: &[String],
        selection: Option<&str>,
        format: &str,
    ) -> Result<String, ServiceError> {
        let handle = self.registry.get_or_error(service)?;
        let fields = parse_fields(service, raw_fields)?;
        let selection = parse_selection(service, selection)?;

        let query_id = handle.query(selection, &fields)?;

        let mut completed = None;
        while let Some(delivery) = self.host.next_completed()? {
            if delivery.query_id == query_id {
                completed = Some(delivery);
                break;
            }
            debug!(query_id = %delivery.query_id, "draining unrelated completion");
        }
        let completed = completed.ok_or_else(|| ServiceError::DispatchFailed {
            service: service.to_string(),
            reason: "no completion delivered for query".to_string(),
        })?;

        let markup = handle.results_as_html(query_id, &completed.record);
        let results_title = &handle.definition().results_title;
        if format == "json" {
            Ok(format_query_result_json(
                service,
                results_title,
                query_id,
                &completed.record,
                &markup,
            ))
        } else {
            Ok(format_query_result_text(
                results_title,
                query_id,
                &completed.record,
                &markup,
            ))
        }
    }

    fn handle_validate(&self) -> Result<String, ServiceError> {
        let mut checks = Vec::new();

        let mut names: Vec<&String> = self.config.services.keys().collect();
        names.sort();
        for name in names {
            let passed = self.config.services[name]
                .options
                .tools
                .as_ref()
                .map(|tools| tools.validate().is_ok())
                .unwrap_or(true);
            checks.push((format!("service '{}' tool set", name), passed));
        }
        for layer in &self.config.layers {
            checks.push((
                format!("layer '{}' path", layer.path),
                !layer.path.is_empty(),
            ));
        }
        checks.push((
            "system configuration".to_string(),
            self.config.system.validate().is_ok(),
        ));

        Ok(format_validation_result("configuration", &checks))
    }
}

fn parse_fields(service: &str, raw: &[String]) -> Result<Vec<FieldValue>, ServiceError> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(name, value)| FieldValue::new(name, value))
                .ok_or_else(|| ServiceError::DispatchFailed {
                    service: service.to_string(),
                    reason: format!("invalid field '{}': expected NAME=VALUE", entry),
                })
        })
        .collect()
}

fn parse_selection(service: &str, raw: Option<&str>) -> Result<Option<Selection>, ServiceError> {
    raw.map(|geojson| {
        serde_json::from_str(geojson)
            .map(Selection::new)
            .map_err(|e| ServiceError::DispatchFailed {
                service: service.to_string(),
                reason: format!("invalid selection geometry: {}", e),
            })
    })
    .transpose()
}
