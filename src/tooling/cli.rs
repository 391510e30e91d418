//! CLI Tooling
//!
//! Command-line interface for the record table. Every command opens the
//! stored table, applies its actions through a [`TableSession`], and returns
//! the text to print.

use crate::config::{ConfigLoader, RosterConfig};
use crate::error::ApiError;
use crate::form::{today, FormField};
use crate::selection;
use crate::session::{Action, Outcome, TableSession};
use crate::store::persistence::{MemoryStorage, RecordPersistence, SledStorage};
use crate::store::RecordStore;
use crate::tooling::format::{
    format_options_json, format_options_text, format_table_json, format_table_text, TableFrame,
};
use crate::tooling::shell;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Roster CLI - team member record table
#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Add, filter, bulk-select, and delete team member records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Table storage directory (overrides storage.path)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the table in memory only; nothing is read or written
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a member; prompts for the fields when none are given
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show the table
    List {
        /// Only show these statuses (repeatable)
        #[arg(long = "status")]
        status: Vec<String>,
        /// Only show these companies (repeatable)
        #[arg(long = "company")]
        company: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Delete a member by id (full or short), every selected member, or all members
    Delete {
        #[arg(required_unless_present_any = ["selected", "all"])]
        id: Option<String>,
        #[arg(long, conflicts_with = "id")]
        selected: bool,
        /// Delete every member
        #[arg(long, conflicts_with_all = ["id", "selected"])]
        all: bool,
    },
    /// Check (or with --off, uncheck) one row
    Select {
        id: String,
        #[arg(long)]
        off: bool,
    },
    /// Click the header checkbox: select everything, or clear everything if all are selected
    SelectAll,
    /// Show the filter choices
    Options {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Interactive table session
    Shell,
}

/// CLI context owning the table session for one invocation
pub struct CliContext {
    session: TableSession,
    storage_path: Option<PathBuf>,
}

impl CliContext {
    /// Create a CLI context from config file discovery (or `config_path`).
    pub fn new(
        config_path: Option<PathBuf>,
        data_dir: Option<PathBuf>,
        ephemeral: bool,
    ) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::from_config(&config, data_dir, ephemeral)
    }

    /// Create a CLI context from an already loaded config.
    pub fn from_config(
        config: &RosterConfig,
        data_dir: Option<PathBuf>,
        ephemeral: bool,
    ) -> Result<Self, ApiError> {
        if ephemeral {
            let persistence =
                RecordPersistence::new(Arc::new(MemoryStorage::new()), config.storage.key.clone());
            return Ok(Self::with_persistence(config, persistence, None));
        }
        let path = config.storage.resolve_path(data_dir.as_deref())?;
        let storage = SledStorage::open(&path)?;
        info!(path = %path.display(), key = %config.storage.key, "Opened table storage");
        let persistence = RecordPersistence::new(Arc::new(storage), config.storage.key.clone());
        Ok(Self::with_persistence(config, persistence, Some(path)))
    }

    /// Create a CLI context over an already opened persistence adapter.
    pub fn with_persistence(
        config: &RosterConfig,
        persistence: RecordPersistence,
        storage_path: Option<PathBuf>,
    ) -> Self {
        let session = TableSession::new(RecordStore::open(persistence)).with_filter_defaults(
            config.filters.statuses.clone(),
            config.filters.companies.clone(),
        );
        Self {
            session,
            storage_path,
        }
    }

    pub fn session(&self) -> &TableSession {
        &self.session
    }

    /// Storage directory in use; None when ephemeral
    pub fn storage_path(&self) -> Option<&PathBuf> {
        self.storage_path.as_ref()
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result.map(|output| self.with_flush_warning(output))
    }

    fn execute_inner(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Add {
                name,
                company,
                status,
                notes,
            } => self.handle_add(name, company, status, notes),
            Commands::List {
                status,
                company,
                format,
            } => self.handle_list(status, company, format),
            Commands::Delete { id, selected, all } => {
                self.handle_delete(id.as_deref(), *selected, *all)
            }
            Commands::Select { id, off } => self.handle_select(id, !*off),
            Commands::SelectAll => self.handle_select_all(),
            Commands::Options { format } => self.handle_options(format),
            Commands::Shell => shell::run_shell(&mut self.session),
        }
    }

    fn handle_add(
        &mut self,
        name: &Option<String>,
        company: &Option<String>,
        status: &Option<String>,
        notes: &Option<String>,
    ) -> Result<String, ApiError> {
        let given = [
            (FormField::Name, name),
            (FormField::Company, company),
            (FormField::Status, status),
            (FormField::Notes, notes),
        ];
        let outcome = if given.iter().all(|(_, value)| value.is_none()) {
            shell::prompt_form(&mut self.session)?
        } else {
            self.session.apply(Action::OpenForm);
            for (field, value) in given {
                let value = value.clone().unwrap_or_default();
                self.session.apply(Action::SetField(field, value));
            }
            self.session.apply(Action::SubmitForm(today()))
        };
        match outcome {
            Outcome::Added(id) => Ok(format!("Added member {}", id)),
            _ => Ok("Cancelled; no member added".to_string()),
        }
    }

    fn handle_list(
        &mut self,
        status: &[String],
        company: &[String],
        format: &str,
    ) -> Result<String, ApiError> {
        self.session
            .apply(Action::SetStatusFilter(status.iter().cloned().collect()));
        self.session
            .apply(Action::SetCompanyFilter(company.iter().cloned().collect()));

        let rows = self.session.visible();
        let records = self.session.store().records();
        let frame = TableFrame {
            rows: &rows,
            filters: self.session.filters(),
            select_all: self.session.select_all(),
            selected: selection::selected_count(records),
            total: records.len(),
        };
        match format {
            "json" => format_table_json(&frame),
            "text" => Ok(format_table_text(&frame)),
            other => Err(invalid_format(other)),
        }
    }

    fn handle_delete(
        &mut self,
        id: Option<&str>,
        selected: bool,
        all: bool,
    ) -> Result<String, ApiError> {
        if all {
            return Ok(match self.session.apply(Action::DeleteAll) {
                Outcome::Removed(n) => format!("Deleted all {} member(s)", n),
                _ => "No members to delete".to_string(),
            });
        }
        if selected {
            return Ok(match self.session.apply(Action::DeleteSelected) {
                Outcome::Removed(n) => format!("Deleted {} selected member(s)", n),
                _ => "No members selected".to_string(),
            });
        }
        let needle = id.ok_or_else(|| {
            ApiError::InvalidInput("Provide an id, --selected, or --all".to_string())
        })?;
        let Some(resolved) = self.session.store().resolve(needle) else {
            return Ok(format!("No record with id {}", needle));
        };
        self.session.apply(Action::Delete(resolved));
        Ok(format!("Deleted member {}", resolved))
    }

    fn handle_select(&mut self, needle: &str, checked: bool) -> Result<String, ApiError> {
        let Some(id) = self.session.store().resolve(needle) else {
            return Ok(format!("No record with id {}", needle));
        };
        self.session.apply(Action::ToggleOne { id, checked });
        let verb = if checked { "Selected" } else { "Deselected" };
        Ok(format!("{} member {}", verb, id))
    }

    fn handle_select_all(&mut self) -> Result<String, ApiError> {
        self.session.apply(Action::ToggleAll);
        let total = self.session.store().len();
        Ok(if self.session.select_all() {
            format!("Selected all {} member(s)", total)
        } else {
            format!("Cleared selection on {} member(s)", total)
        })
    }

    fn handle_options(&self, format: &str) -> Result<String, ApiError> {
        let options = self.session.filter_options();
        match format {
            "json" => format_options_json(&options),
            "text" => Ok(format_options_text(&options)),
            other => Err(invalid_format(other)),
        }
    }

    fn with_flush_warning(&self, output: String) -> String {
        if self.session.store().last_flush_failed() {
            format!(
                "{}\nWarning: changes could not be saved to storage and will be lost when this command exits.",
                output
            )
        } else {
            output
        }
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidInput(format!(
        "Invalid format: {} (must be 'text' or 'json')",
        format
    ))
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Add { .. } => "add",
        Commands::List { .. } => "list",
        Commands::Delete { .. } => "delete",
        Commands::Select { .. } => "select",
        Commands::SelectAll => "select-all",
        Commands::Options { .. } => "options",
        Commands::Shell => "shell",
    }
}
