use crate::config::Config;
use cookdoc_core::{
    CookdocError, Reconciled, Reconciler, RegistrySource, VersionMap, parse_registry_listing,
};
use cookdoc_shell::KnifeRegistry;
use std::path::{Path, PathBuf};

pub fn exit_with_error(error: impl std::fmt::Display) -> ! {
    eprintln!("error: {error}");
    std::process::exit(2);
}

pub fn load_config_or_exit(config_arg: Option<&str>, cookbook_paths: Vec<String>) -> Config {
    let config = Config::load(config_arg.map(Path::new)).unwrap_or_else(|e| exit_with_error(e));
    config.with_cookbook_paths(cookbook_paths.into_iter().map(PathBuf::from).collect())
}

/// Query the registry and reconcile it against the local search roots.
pub fn reconcile(config: &Config) -> Result<Vec<Reconciled>, CookdocError> {
    let registry = KnifeRegistry::new(&config.registry.program, config.registry.args.clone());
    let server_versions = fetch_registry(&registry)?;

    let reconciler = Reconciler::new(config.cookbook_path.clone());
    let local = reconciler.discover()?;
    tracing::debug!(
        registry = server_versions.len(),
        local = local.versions().len(),
        malformed = local.malformed().len(),
        "inventories loaded"
    );
    Ok(reconciler.reconcile(&server_versions, &local))
}

fn fetch_registry(registry: &dyn RegistrySource) -> Result<VersionMap, CookdocError> {
    parse_registry_listing(registry.list_cookbooks()?)
}

pub fn reconcile_or_exit(config: &Config) -> Vec<Reconciled> {
    reconcile(config).unwrap_or_else(|e| exit_with_error(e))
}

pub fn print_json_or_exit(payload: &impl serde::Serialize) {
    let rendered = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|e| exit_with_error(format!("failed to render json payload: {e}")));
    println!("{rendered}");
}
