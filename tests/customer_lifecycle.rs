//! End-to-end flow through the public API: boot, sign in, add / edit / delete
//! against an in-memory sheet, sign out.
//!
//! Run with: cargo test --test customer_lifecycle

use std::cell::RefCell;

use crm_sheets_frontend::config::AppConfig;
use crm_sheets_frontend::error::AppError;
use crm_sheets_frontend::messages::{Command, Message, Mutation};
use crm_sheets_frontend::models::{CustomerRow, DisplayIndex, Field};
use crm_sheets_frontend::mutations;
use crm_sheets_frontend::session::{SessionView, ViewContainers};
use crm_sheets_frontend::sheets::{BatchUpdateRequest, Request, SheetsApi, ValueRange};
use crm_sheets_frontend::state::AppState;
use crm_sheets_frontend::storage::{MemorySessionStore, SessionStore};
use crm_sheets_frontend::update::update;
use futures::executor::block_on;

/// Sheet with a header row, addressed the way the Sheets API does.
struct InMemorySheet {
    rows: RefCell<Vec<Vec<String>>>,
}

impl InMemorySheet {
    fn new() -> Self {
        Self {
            rows: RefCell::new(vec![vec!["header".to_string()]]),
        }
    }

    /// First 1-based row number of an A1 range like `'Clientes'!A5:L5`.
    fn start_row(range: &str) -> usize {
        let cells = range.rsplit('!').next().unwrap();
        let first = cells.split(':').next().unwrap();
        first.trim_start_matches(|c: char| c.is_ascii_alphabetic()).parse().unwrap()
    }

    fn data(&self) -> Vec<Vec<String>> {
        self.rows.borrow()[1..].to_vec()
    }
}

impl SheetsApi for InMemorySheet {
    async fn get_values(&self, range: &str) -> Result<ValueRange, AppError> {
        let start = Self::start_row(range) - 1;
        Ok(ValueRange {
            values: self.rows.borrow()[start..].to_vec(),
            ..Default::default()
        })
    }

    async fn update_values(&self, range: &str, values: Vec<Vec<String>>) -> Result<(), AppError> {
        let idx = Self::start_row(range) - 1;
        let mut rows = self.rows.borrow_mut();
        while rows.len() <= idx {
            rows.push(Vec::new());
        }
        let target = &mut rows[idx];
        for (col, value) in values.into_iter().next().unwrap_or_default().into_iter().enumerate() {
            if target.len() <= col {
                target.resize(col + 1, String::new());
            }
            target[col] = value;
        }
        Ok(())
    }

    async fn batch_update(&self, request: &BatchUpdateRequest) -> Result<(), AppError> {
        for req in &request.requests {
            let Request::DeleteDimension(dd) = req;
            self.rows
                .borrow_mut()
                .drain(dd.range.start_index..dd.range.end_index);
        }
        Ok(())
    }
}

fn config() -> AppConfig {
    AppConfig {
        api_key: "key".into(),
        client_id: "client".into(),
        spreadsheet_id: "sheet".into(),
        ..AppConfig::default()
    }
}

fn customer(name: &str) -> CustomerRow {
    CustomerRow::new()
        .with(Field::NearestAccessPoint, "AP-1")
        .with(Field::Name, name)
        .with(Field::Address, "Calle 1")
        .with(Field::Phone, "555")
        .with(Field::Salesperson, "Luis")
        .with(Field::Notes, "prefers mornings")
}

/// Execute sheet-touching commands against `sheet`, feeding outcomes back.
fn run_remote(state: &mut AppState, sheet: &InMemorySheet, commands: Vec<Command>) -> Vec<Command> {
    let mut leftover = Vec::new();
    let mut queue = commands;
    while !queue.is_empty() {
        let mut next = Vec::new();
        for cmd in queue {
            let outcome = match cmd {
                Command::AppendCustomer(row) => Some((
                    Mutation::Add,
                    block_on(mutations::add_customer(sheet, "Clientes", &row)).map(|_| ()),
                )),
                Command::UpdateCustomer { index, row } => Some((
                    Mutation::Edit,
                    block_on(mutations::edit_customer(sheet, "Clientes", index, &row)).map(|_| ()),
                )),
                Command::DeleteCustomer(index) => Some((
                    Mutation::Delete,
                    block_on(mutations::delete_customer(sheet, 0, index)),
                )),
                Command::RefreshCustomers => {
                    let rows = block_on(mutations::fetch_customers(sheet, "Clientes")).unwrap();
                    next.extend(update(state, Message::CustomersLoaded(rows)));
                    None
                }
                other => {
                    leftover.push(other);
                    None
                }
            };
            if let Some((kind, result)) = outcome {
                let msg = match result {
                    Ok(()) => Message::MutationSucceeded(kind),
                    Err(e) => Message::MutationFailed(kind, e),
                };
                next.extend(update(state, msg));
            }
        }
        queue = next;
    }
    leftover
}

#[test]
fn sign_in_add_edit_delete_sign_out() {
    let store = MemorySessionStore::default();
    let sheet = InMemorySheet::new();
    let mut state = AppState::new();

    update(
        &mut state,
        Message::Boot {
            config: Ok(config()),
            persisted_signed_in: store.load(),
            containers: ViewContainers::all_present(),
        },
    );
    assert_eq!(state.session.view(), SessionView::SignedOut);

    let mut cmds = update(&mut state, Message::ApiScriptLoaded);
    cmds.extend(update(&mut state, Message::IdentityScriptLoaded));
    assert_eq!(cmds, vec![Command::InitApiClient, Command::InitIdentity]);
    update(&mut state, Message::IdentityReady);
    assert_eq!(
        update(&mut state, Message::ApiClientReady),
        vec![Command::RenderSignInButton]
    );

    let cmds = update(
        &mut state,
        Message::CredentialReceived {
            credential: Some("id-token".into()),
            containers: ViewContainers::all_present(),
        },
    );
    if cmds.contains(&Command::PersistSession) {
        store.save(true).unwrap();
    }
    assert_eq!(store.raw().as_deref(), Some("true"));
    assert!(state.session.is_signed_in());

    // Missing required field: nothing reaches the sheet.
    let cmds = update(
        &mut state,
        Message::AddCustomerSubmitted(customer("Ana").with(Field::Phone, "")),
    );
    assert!(run_remote(&mut state, &sheet, cmds)
        .iter()
        .all(|c| matches!(c, Command::ReportError(AppError::Validation(_)))));
    assert!(sheet.data().is_empty());

    for name in ["Ana", "Bea", "Carla"] {
        let cmds = update(&mut state, Message::AddCustomerSubmitted(customer(name)));
        run_remote(&mut state, &sheet, cmds);
    }
    assert_eq!(state.customers.len(), 3);
    assert_eq!(sheet.data()[2][1], "Carla");
    assert_eq!(sheet.data()[2][6], "prefers mornings");

    // Edit the second displayed row (sheet row 3).
    update(&mut state, Message::EditRequested(DisplayIndex(1)));
    let edited = customer("Beatriz").with(Field::Status, "activo");
    let cmds = update(
        &mut state,
        Message::EditSubmitted {
            index: Some(DisplayIndex(1)),
            row: edited,
        },
    );
    let rest = run_remote(&mut state, &sheet, cmds);
    assert!(rest.contains(&Command::CloseEditForm));
    assert_eq!(state.customers[1].get(Field::Name), "Beatriz");
    assert_eq!(state.customers[1].get(Field::Status), "activo");
    assert_eq!(state.customers[0].get(Field::Name), "Ana");

    // Delete the first displayed row.
    let cmds = update(&mut state, Message::DeleteRequested(DisplayIndex(0)));
    run_remote(&mut state, &sheet, cmds);
    let names: Vec<&str> = state.customers.iter().map(|r| r.get(Field::Name)).collect();
    assert_eq!(names, vec!["Beatriz", "Carla"]);
    assert_eq!(sheet.rows.borrow()[0][0], "header");

    let cmds = update(
        &mut state,
        Message::SignOutRequested {
            containers: ViewContainers::all_present(),
        },
    );
    assert!(cmds.contains(&Command::SetRemoteToken(String::new())));
    if cmds.contains(&Command::ClearSession) {
        store.clear().unwrap();
    }
    assert_eq!(store.raw(), None);
    assert!(!state.session.is_signed_in());
    assert!(state.customers.is_empty());
}

#[test]
fn reload_restores_view_but_not_token() {
    let store = MemorySessionStore::default();
    store.save(true).unwrap();

    let mut state = AppState::new();
    let cmds = update(
        &mut state,
        Message::Boot {
            config: Ok(config()),
            persisted_signed_in: store.load(),
            containers: ViewContainers::all_present(),
        },
    );
    assert!(cmds.contains(&Command::ApplyView(SessionView::SignedIn)));
    assert!(cmds.contains(&Command::InitDashboard));
    assert!(state.session.token().is_none());

    // No token held, so client readiness does not push one.
    update(&mut state, Message::IdentityReady);
    let cmds = update(&mut state, Message::ApiClientReady);
    assert!(!cmds.iter().any(|c| matches!(c, Command::SetRemoteToken(_))));
}
