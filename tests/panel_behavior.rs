//! Drives the row-entry form through its key interface and observes the
//! shared table, covering default substitution and rule rejection.

use crossterm::event::KeyCode;

use sqltutor::datasets;
use sqltutor::ops::constraint::Rule;
use sqltutor::panels::mutate::{shared, FormMode, RowFormPanel};
use sqltutor::panels::Panel;
use sqltutor::value::Value;

fn type_text(panel: &mut RowFormPanel, text: &str) {
    for c in text.chars() {
        panel.handle_key(KeyCode::Char(c));
    }
}

fn press_button(panel: &mut RowFormPanel, fields: usize, current_focus: usize) {
    for _ in current_focus..fields {
        panel.handle_key(KeyCode::Tab);
    }
    panel.handle_key(KeyCode::Enter);
}

#[test]
fn default_applies_only_to_the_blank_sentinel() {
    let table = shared(datasets::small_employees().unwrap());
    let mut panel = RowFormPanel::new(
        "DEFAULT",
        "",
        "employees",
        table.clone(),
        FormMode::Insert,
    )
    .with_default("salary", Value::Int(40_000));

    // fields: emp_id, name, department, salary; leave salary blank
    type_text(&mut panel, "4");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "Dana");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "HR");
    press_button(&mut panel, 4, 2);
    assert_eq!(table.borrow().row_count(), 4);
    assert_eq!(table.borrow().rows()[3][3], Value::Int(40_000));

    // an explicit salary, even a different one, is used verbatim
    let mut panel = RowFormPanel::new(
        "DEFAULT",
        "",
        "employees",
        table.clone(),
        FormMode::Insert,
    )
    .with_default("salary", Value::Int(40_000));
    type_text(&mut panel, "5");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "Egon");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "HR");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "51000");
    press_button(&mut panel, 4, 3);
    assert_eq!(table.borrow().row_count(), 5);
    assert_eq!(table.borrow().rows()[4][3], Value::Int(51_000));
}

#[test]
fn primary_key_rejection_keeps_the_table_intact() {
    let table = shared(datasets::small_employees().unwrap());
    let mut panel = RowFormPanel::new(
        "PRIMARY KEY",
        "",
        "employees",
        table.clone(),
        FormMode::Insert,
    )
    .with_rule(Rule::PrimaryKey {
        column: "emp_id".to_string(),
    });

    type_text(&mut panel, "2");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "Mallory");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "HR");
    panel.handle_key(KeyCode::Tab);
    type_text(&mut panel, "45000");
    press_button(&mut panel, 4, 3);
    assert_eq!(table.borrow().row_count(), 3);
}

#[test]
fn non_numeric_entry_is_rejected_before_any_mutation() {
    let table = shared(datasets::small_employees().unwrap());
    let mut panel = RowFormPanel::new(
        "INSERT INTO",
        "",
        "employees",
        table.clone(),
        FormMode::Insert,
    );
    type_text(&mut panel, "four");
    press_button(&mut panel, 4, 0);
    assert_eq!(table.borrow().row_count(), 3);
}
