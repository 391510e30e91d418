use std::fs;
use std::path::Path;

use roster::config::RosterConfig;
use roster::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

fn cli_in(dir: &Path) -> CliContext {
    CliContext::from_config(&RosterConfig::default(), Some(dir.join("store")), false).unwrap()
}

fn add(cli: &mut CliContext, name: &str, company: &str, status: &str) -> String {
    cli.execute(&Commands::Add {
        name: Some(name.to_string()),
        company: Some(company.to_string()),
        status: Some(status.to_string()),
        notes: Some(String::new()),
    })
    .unwrap()
}

fn list_json(cli: &mut CliContext, status: &[&str], company: &[&str]) -> serde_json::Value {
    let output = cli
        .execute(&Commands::List {
            status: status.iter().map(|s| s.to_string()).collect(),
            company: company.iter().map(|s| s.to_string()).collect(),
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn list_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    let mut cli = cli_in(temp.path());
    add(&mut cli, "Alice", "DC United", "Active");

    let parsed = list_json(&mut cli, &[], &[]);
    assert!(parsed.get("select_all").and_then(|v| v.as_bool()).is_some());
    assert_eq!(parsed.get("selected").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(parsed.get("total").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(parsed.get("visible").and_then(|v| v.as_u64()), Some(1));
    assert!(parsed.get("filters").and_then(|v| v.as_object()).is_some());
    let records = parsed
        .get("records")
        .and_then(|v| v.as_array())
        .expect("records array should exist");
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[0]["selected"], false);
}

#[test]
fn state_persists_across_invocations() {
    let temp = TempDir::new().unwrap();
    {
        let mut cli = cli_in(temp.path());
        add(&mut cli, "Alice", "DC United", "Active");
        add(&mut cli, "Bob", "LA Galaxy", "Closed");
        cli.execute(&Commands::SelectAll).unwrap();
    }

    let mut cli = cli_in(temp.path());
    let parsed = list_json(&mut cli, &[], &[]);
    assert_eq!(parsed["total"], 2);
    assert_eq!(parsed["select_all"], true);
}

#[test]
fn list_text_filters_by_status_and_company() {
    let temp = TempDir::new().unwrap();
    let mut cli = cli_in(temp.path());
    add(&mut cli, "Alice", "DC United", "Active");
    add(&mut cli, "Ann", "LA Galaxy", "Active");
    add(&mut cli, "Bob", "LA Galaxy", "Closed");

    let parsed = list_json(&mut cli, &["Active"], &["LA Galaxy"]);
    let names: Vec<_> = parsed["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Ann"]);
    assert_eq!(parsed["total"], 3);

    let text = cli
        .execute(&Commands::List {
            status: vec!["Closed".to_string()],
            company: vec![],
            format: "text".to_string(),
        })
        .unwrap();
    assert!(text.contains("Bob"));
    assert!(!text.contains("Alice"));
}

#[test]
fn delete_by_full_id_removes_row() {
    let temp = TempDir::new().unwrap();
    let mut cli = cli_in(temp.path());
    let out = add(&mut cli, "Alice", "DC United", "Active");
    let id = out.trim_start_matches("Added member ").to_string();

    let out = cli
        .execute(&Commands::Delete {
            id: Some(id.clone()),
            selected: false,
            all: false,
        })
        .unwrap();
    assert_eq!(out, format!("Deleted member {}", id));
    assert_eq!(list_json(&mut cli, &[], &[])["total"], 0);
}

#[test]
fn options_include_configured_and_stored_values() {
    let temp = TempDir::new().unwrap();
    let mut cli = cli_in(temp.path());
    add(&mut cli, "Alice", "Orlando City", "On leave");

    let output = cli
        .execute(&Commands::Options {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let strings = |key: &str| -> Vec<String> {
        parsed[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(strings("statuses"), vec!["Active", "Closed", "On leave"]);
    let companies = strings("companies");
    assert!(companies.contains(&"Orlando City".to_string()));
    assert!(companies.contains(&"Manchester United".to_string()));
}

#[test]
fn config_file_sets_storage_location_and_key() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("custom-store");
    let config_path = temp.path().join("roster.toml");
    fs::write(
        &config_path,
        format!(
            "[storage]\npath = {:?}\nkey = \"people\"\n",
            store_dir.to_string_lossy()
        ),
    )
    .unwrap();

    let mut cli = CliContext::new(Some(config_path), None, false).unwrap();
    assert_eq!(cli.storage_path(), Some(&store_dir));
    add(&mut cli, "Alice", "DC United", "Active");
    assert!(store_dir.exists());
}

#[test]
fn ephemeral_context_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("roster.toml");
    let store_dir = temp.path().join("never");
    fs::write(
        &config_path,
        format!("[storage]\npath = {:?}\n", store_dir.to_string_lossy()),
    )
    .unwrap();

    let mut cli = CliContext::new(Some(config_path), None, true).unwrap();
    add(&mut cli, "Alice", "DC United", "Active");
    assert!(cli.storage_path().is_none());
    assert!(!store_dir.exists());
}
