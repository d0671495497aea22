use crate::config::Config;
use crate::support::{print_json_or_exit, reconcile_or_exit};
use cookdoc_core::Reconciled;
use serde_json::{Value, json};

fn entry_json(entry: &Reconciled) -> Value {
    match entry {
        Ok(cookbook) => json!({
            "name": cookbook.name(),
            "path": cookbook.path().map(|p| p.display().to_string()),
            "serverVersion": cookbook.server_version(),
            "localVersion": cookbook.local_version(),
            "gitRepo": cookbook.is_git_repo(),
        }),
        Err(error) => json!({
            "name": error.name,
            "path": error.path.display().to_string(),
            "error": error.detail,
        }),
    }
}

fn entry_line(entry: &Reconciled) -> String {
    match entry {
        Ok(cookbook) => format!(
            "{}  server={}  local={}  path={}{}",
            cookbook.name(),
            cookbook.server_version().unwrap_or("-"),
            cookbook.local_version().unwrap_or("-"),
            cookbook
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            if cookbook.is_git_repo() { "  (git)" } else { "" },
        ),
        Err(error) => format!("{}  malformed: {}", error.name, error.detail),
    }
}

pub fn run(config: &Config, json_output: bool) {
    let entries = reconcile_or_exit(config);

    if json_output {
        let payload = json!({
            "schema": 1,
            "searchRoots": config
                .cookbook_path
                .iter()
                .map(|root| root.display().to_string())
                .collect::<Vec<_>>(),
            "cookbooks": entries.iter().map(entry_json).collect::<Vec<_>>(),
        });
        print_json_or_exit(&payload);
    } else {
        for entry in &entries {
            println!("{}", entry_line(entry));
        }
    }
}
