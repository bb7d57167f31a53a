// src/command_executors.rs
//
// Runs the side effects `update` returns. Async work is spawned with
// `spawn_local` and reports back through `dispatch_global_message`.
//
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::components::{auth, customer_table, dashboard, forms, session_view};
use crate::debug_log;
use crate::dom_utils;
use crate::error::AppError;
use crate::i18n::{text, Text};
use crate::messages::{Command, Message, Mutation};
use crate::mutations;
use crate::report::report_error;
use crate::retry::RetryPolicy;
use crate::sheets::{gapi, GapiSheets};
use crate::state::{api_ready, dispatch_global_message, with_state, API_READY};
use crate::storage::{BrowserSessionStore, SessionStore};
use crate::toast;

pub fn execute(cmd: Command) {
    debug_log!("execute {:?}", cmd);
    if let Err(e) = run(cmd) {
        report_error(&e, crate::state::current_locale());
    }
}

fn run(cmd: Command) -> Result<(), AppError> {
    match cmd {
        Command::InitApiClient => init_api_client(),
        Command::InitIdentity => {
            let client_id = with_state(|s| s.config.client_id.clone());
            match auth::init_identity(&client_id) {
                Ok(()) => dispatch_global_message(Message::IdentityReady),
                Err(e) => dispatch_global_message(Message::IdentityFailed(e)),
            }
        }
        Command::RenderSignInButton => {
            // A page without the container simply gets no button.
            if let Err(e) = auth::render_sign_in_button(&dom_utils::document()?) {
                log::warn!("sign-in button not rendered: {}", e);
            }
        }

        Command::SetRemoteToken(token) => {
            if let Err(e) = gapi::set_token(&token) {
                log::warn!("remote token not updated: {}", e);
            }
        }
        Command::DisableAutoSelect => auth::disable_auto_select()?,
        Command::PersistSession => BrowserSessionStore.save(true)?,
        Command::ClearSession => BrowserSessionStore.clear()?,
        Command::ApplyView(view) => session_view::apply(&dom_utils::document()?, view)?,
        Command::InitDashboard => {
            let document = dom_utils::document()?;
            if let Err(e) = customer_table::wire(&document) {
                log::warn!("row actions not wired: {}", e);
            }
            // Refresh runs even when the page has no table to draw into.
            if let Err(e) = run(Command::RenderCustomers) {
                log::warn!("customer table not rendered: {}", e);
            }
            refresh_customers();
        }

        Command::RefreshCustomers => refresh_customers(),
        Command::RenderCustomers => {
            let document = dom_utils::document()?;
            let (rows, locale) = with_state(|s| (s.customers.clone(), s.locale));
            customer_table::render(&document, &rows, locale)?;
            let summary = dashboard::DashboardSummary::from_rows(&rows, dashboard::today());
            // The summary panel is optional on the page.
            if let Err(e) = dashboard::render(&document, &summary, locale) {
                debug_log!("dashboard skipped: {}", e);
            }
        }

        Command::AppendCustomer(row) => {
            let (spreadsheet_id, sheet) = sheet_target();
            spawn_mutation(Mutation::Add, async move {
                let api = GapiSheets::new(spreadsheet_id);
                mutations::add_customer(&api, &sheet, &row).await.map(|_| ())
            });
        }
        Command::UpdateCustomer { index, row } => {
            let (spreadsheet_id, sheet) = sheet_target();
            spawn_mutation(Mutation::Edit, async move {
                let api = GapiSheets::new(spreadsheet_id);
                mutations::edit_customer(&api, &sheet, index, &row).await.map(|_| ())
            });
        }
        Command::DeleteCustomer(index) => {
            let (spreadsheet_id, sheet_id) =
                with_state(|s| (s.config.spreadsheet_id.clone(), s.config.sheet_id));
            spawn_mutation(Mutation::Delete, async move {
                let api = GapiSheets::new(spreadsheet_id);
                mutations::delete_customer(&api, sheet_id, index).await
            });
        }

        Command::FillEditForm { index, row } => {
            forms::fill_edit_form(&dom_utils::document()?, index, &row)?
        }
        Command::CloseEditForm => forms::close_edit_form(&dom_utils::document()?)?,
        Command::ResetAddForm => forms::reset_add_form(&dom_utils::document()?)?,

        Command::ShowToast(key) => {
            let message = text(with_state(|s| s.locale), key);
            match key {
                Text::SignedOut => toast::info(message),
                _ => toast::success(message),
            }
        }
        Command::ReportError(e) => report_error(&e, with_state(|s| s.locale)),
    }
    Ok(())
}

fn sheet_target() -> (String, String) {
    with_state(|s| (s.config.spreadsheet_id.clone(), s.config.sheet_name.clone()))
}

fn init_api_client() {
    let config = with_state(|s| s.config.clone());
    spawn_local(async move {
        let attempt = |n: u32| {
            let config = config.clone();
            async move {
                debug_log!("gapi client init attempt {}", n + 1);
                gapi::load_client().await?;
                gapi::init_client(&config).await
            }
        };
        let result = RetryPolicy::default()
            .run(attempt, |ms| TimeoutFuture::new(ms))
            .await;

        match result {
            Ok(()) => {
                API_READY.with(|signal| signal.resolve());
                dispatch_global_message(Message::ApiClientReady);
            }
            Err(e) => dispatch_global_message(Message::ApiClientFailed(e)),
        }
    });
}

/// Fetch every row once the Sheets client is ready. Requests made before
/// that simply wait.
fn refresh_customers() {
    let (spreadsheet_id, sheet) = sheet_target();
    spawn_local(async move {
        if !api_ready().await {
            log::warn!("refresh abandoned: sheets client never became ready");
            return;
        }
        let api = GapiSheets::new(spreadsheet_id);
        match mutations::fetch_customers(&api, &sheet).await {
            Ok(rows) => dispatch_global_message(Message::CustomersLoaded(rows)),
            Err(e) => dispatch_global_message(Message::ErrorRaised(e)),
        }
    });
}

fn spawn_mutation<F>(kind: Mutation, op: F)
where
    F: std::future::Future<Output = Result<(), AppError>> + 'static,
{
    spawn_local(async move {
        match op.await {
            Ok(()) => dispatch_global_message(Message::MutationSucceeded(kind)),
            Err(e) => dispatch_global_message(Message::MutationFailed(kind, e)),
        }
    });
}
