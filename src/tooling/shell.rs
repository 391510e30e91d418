//! Interactive table session on the terminal.
//!
//! Each menu choice becomes one [`Action`]; the table is re-rendered after
//! every action from the session's current view.

use crate::error::ApiError;
use crate::form::{today, FormField};
use crate::selection;
use crate::session::{Action, Outcome, TableSession};
use crate::tooling::format::{format_table_text, row_label, TableFrame};
use crate::types::RecordId;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::collections::BTreeSet;

const MENU: [&str; 8] = [
    "Add Members +",
    "Filter by company",
    "Filter by status",
    "Toggle row",
    "Toggle all",
    "Delete row",
    "Delete selected",
    "Quit",
];

/// Render the session's current view as text.
pub fn render(session: &TableSession) -> String {
    let rows = session.visible();
    let records = session.store().records();
    format_table_text(&TableFrame {
        rows: &rows,
        filters: session.filters(),
        select_all: session.select_all(),
        selected: selection::selected_count(records),
        total: records.len(),
    })
}

/// Run the menu loop until Quit or Esc. Returns a short session summary.
pub fn run_shell(session: &mut TableSession) -> Result<String, ApiError> {
    let mut actions = 0usize;
    loop {
        println!("{}", render(session));
        if session.store().last_flush_failed() {
            println!("Warning: the last change could not be saved to storage.");
        }

        let choice = Select::new()
            .with_prompt("Action")
            .items(&MENU)
            .default(0)
            .interact_opt()?;

        let outcome = match choice {
            Some(0) => prompt_form(session)?,
            Some(1) => {
                let options = session.filter_options().companies;
                let chosen = pick_many("Companies (none = all)", &options, &session.filters().company)?;
                session.apply(Action::SetCompanyFilter(chosen))
            }
            Some(2) => {
                let options = session.filter_options().statuses;
                let chosen = pick_many("Statuses (none = all)", &options, &session.filters().status)?;
                session.apply(Action::SetStatusFilter(chosen))
            }
            Some(3) => match pick_row(session, "Toggle which row?")? {
                Some((id, selected)) => session.apply(Action::ToggleOne {
                    id,
                    checked: !selected,
                }),
                None => Outcome::NoChange,
            },
            Some(4) => session.apply(Action::ToggleAll),
            Some(5) => match pick_row(session, "Delete which row?")? {
                Some((id, _)) => session.apply(Action::Delete(id)),
                None => Outcome::NoChange,
            },
            Some(6) => {
                let count = selection::selected_count(session.store().records());
                if count > 0
                    && Confirm::new()
                        .with_prompt(format!("Delete {} selected member(s)?", count))
                        .default(false)
                        .interact()?
                {
                    session.apply(Action::DeleteSelected)
                } else {
                    Outcome::NoChange
                }
            }
            _ => break,
        };
        tracing::debug!(?outcome, "Shell action applied");
        actions += 1;
    }
    Ok(format!(
        "Session ended after {} action(s); {} member(s) stored.",
        actions,
        session.store().len()
    ))
}

/// Show the add-member form, collect the four fields, then submit or cancel.
pub fn prompt_form(session: &mut TableSession) -> Result<Outcome, ApiError> {
    session.apply(Action::OpenForm);
    match collect_fields(session) {
        Ok(true) => Ok(session.apply(Action::SubmitForm(today()))),
        Ok(false) => {
            session.apply(Action::CancelForm);
            Ok(Outcome::NoChange)
        }
        Err(e) => {
            session.apply(Action::CancelForm);
            Err(e)
        }
    }
}

fn collect_fields(session: &mut TableSession) -> Result<bool, ApiError> {
    for field in FormField::ALL {
        let value: String = Input::new()
            .with_prompt(field.label())
            .allow_empty(true)
            .interact_text()?;
        session.apply(Action::SetField(field, value));
    }
    let submit = Select::new()
        .with_prompt("Submit")
        .items(&["Add", "Cancel"])
        .default(0)
        .interact()?;
    Ok(submit == 0)
}

fn pick_many(
    prompt: &str,
    options: &[String],
    current: &BTreeSet<String>,
) -> Result<BTreeSet<String>, ApiError> {
    let checked: Vec<bool> = options.iter().map(|o| current.contains(o)).collect();
    let picked = MultiSelect::new()
        .with_prompt(prompt)
        .items(options)
        .defaults(&checked)
        .interact()?;
    Ok(picked.into_iter().map(|i| options[i].clone()).collect())
}

fn pick_row(
    session: &TableSession,
    prompt: &str,
) -> Result<Option<(RecordId, bool)>, ApiError> {
    let rows = session.visible();
    if rows.is_empty() {
        println!("No rows to choose from.");
        return Ok(None);
    }
    let labels: Vec<String> = rows.iter().map(|r| row_label(r)).collect();
    let picked = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(picked.map(|i| (rows[i].id, rows[i].selected)))
}
