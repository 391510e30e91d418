use roster::form::{today, FormField, FormState};
use roster::session::{Action, Outcome, TableSession};
use roster::store::RecordStore;

use crate::integration::support::new_record;

#[test]
fn status_filter_shows_only_active_member() {
    let mut store = RecordStore::in_memory();
    store.add(new_record("Alice", "DC United", "Active"));
    store.add(new_record("Bob", "LA Galaxy", "Closed"));
    let mut session = TableSession::new(store);

    session.apply(Action::SetStatusFilter(["Active".to_string()].into()));
    let names: Vec<_> = session.visible().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alice"]);
}

#[test]
fn form_submission_appends_one_unselected_record_dated_today() {
    let mut session = TableSession::new(RecordStore::in_memory());
    session.apply(Action::OpenForm);
    assert_eq!(session.form().state(), FormState::Visible);
    for (field, value) in [
        (FormField::Name, "Cee"),
        (FormField::Company, "X"),
        (FormField::Status, "Active"),
        (FormField::Notes, ""),
    ] {
        session.apply(Action::SetField(field, value.to_string()));
    }

    let date = today();
    let outcome = session.apply(Action::SubmitForm(date));
    let Outcome::Added(id) = outcome else {
        panic!("expected a record to be added, got {:?}", outcome);
    };

    assert_eq!(session.store().len(), 1);
    let record = session.store().get(&id).unwrap();
    assert_eq!(record.name, "Cee");
    assert_eq!(record.company, "X");
    assert_eq!(record.status, "Active");
    assert_eq!(record.notes, "");
    assert!(!record.selected);
    assert_eq!(record.last_updated, date);
    assert_eq!(session.form().state(), FormState::Hidden);
    assert_eq!(session.form().fields().name, "");
}

#[test]
fn select_all_survives_filter_then_row_toggle() {
    let mut store = RecordStore::in_memory();
    let alice = store.add(new_record("Alice", "DC United", "Active"));
    store.add(new_record("Bob", "LA Galaxy", "Closed"));
    let mut session = TableSession::new(store);

    session.apply(Action::ToggleAll);
    session.apply(Action::SetCompanyFilter(["DC United".to_string()].into()));
    session.apply(Action::ToggleOne {
        id: alice,
        checked: false,
    });
    assert!(!session.select_all());

    // Bob is hidden but still selected
    let bob = &session.store().records()[1];
    assert!(bob.selected);

    session.apply(Action::ToggleOne {
        id: alice,
        checked: true,
    });
    assert!(session.select_all());
}

#[test]
fn deleting_everything_unchecks_header() {
    let mut store = RecordStore::in_memory();
    let alice = store.add(new_record("Alice", "DC United", "Active"));
    let mut session = TableSession::new(store);
    session.apply(Action::ToggleAll);
    assert!(session.select_all());
    session.apply(Action::Delete(alice));
    assert!(!session.select_all());
    assert!(session.store().is_empty());
}
