// src/state.rs
//
// Single owner of all mutable app state. Everything is touched from the one
// wasm thread, so a thread_local RefCell is enough.
//
use std::cell::RefCell;

use crate::config::AppConfig;
use crate::i18n::Locale;
use crate::init::InitState;
use crate::messages::{Command, Message};
use crate::models::{CustomerRow, DisplayIndex};
use crate::readiness::ReadySignal;
use crate::session::Session;

#[derive(Debug, Default)]
pub struct AppState {
    pub config: AppConfig,
    /// False until a validated config arrived with `Boot`.
    pub config_ok: bool,
    pub init: InitState,
    pub api_init_started: bool,
    pub identity_init_started: bool,
    pub session: Session,
    /// Rows as last fetched; `DisplayIndex` points into this.
    pub customers: Vec<CustomerRow>,
    pub edit_target: Option<DisplayIndex>,
    pub locale: Locale,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        crate::update::update(self, msg)
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());

    /// Resolved once `gapi.client.init` succeeded.
    pub static API_READY: ReadySignal = ReadySignal::new();
}

/// Run `msg` through `update`, then execute the resulting commands with the
/// state borrow released (executors read state and may dispatch again).
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| match state.try_borrow_mut() {
        Ok(mut state) => state.dispatch(msg),
        Err(_) => {
            log::error!("re-entrant dispatch dropped: {:?}", msg);
            Vec::new()
        }
    });

    for cmd in commands {
        crate::command_executors::execute(cmd);
    }
}

/// Read-only access for executors and renderers.
pub fn with_state<R>(f: impl FnOnce(&AppState) -> R) -> R {
    APP_STATE.with(|state| f(&state.borrow()))
}

pub fn current_locale() -> Locale {
    APP_STATE.with(|state| {
        state
            .try_borrow()
            .map(|s| s.locale)
            .unwrap_or_default()
    })
}

/// Future that completes once the Sheets client is usable.
pub fn api_ready() -> impl std::future::Future<Output = bool> {
    API_READY.with(|signal| signal.wait())
}
