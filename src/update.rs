// src/update.rs
//
// Pure state transitions. Every DOM or network effect is returned as a
// `Command` and run by `command_executors.rs` after the state borrow ends.
//
use crate::debug_log;
use crate::error::AppError;
use crate::i18n::Text;
use crate::init::{mark_ready, Dependency};
use crate::messages::{Command, Message, Mutation};
use crate::models::DisplayIndex;
use crate::session::{IdToken, Session, SessionView};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    match msg {
        Message::Boot {
            config,
            persisted_signed_in,
            containers,
        } => {
            match config.and_then(|cfg| cfg.validate().map(|_| cfg)) {
                Ok(cfg) => {
                    state.config = cfg;
                    state.config_ok = true;
                }
                Err(e) => {
                    state.config_ok = false;
                    commands.push(Command::ReportError(e));
                }
            }

            state.session = Session::restore(persisted_signed_in);
            if let Err(e) = containers.check() {
                log::warn!("initial view not applied: {}", e);
            } else {
                commands.push(Command::ApplyView(state.session.view()));
                if state.session.is_signed_in() && state.config_ok {
                    commands.push(Command::InitDashboard);
                }
            }
        }

        Message::ConfigProvided(config) => {
            match config.and_then(|cfg| cfg.validate().map(|_| cfg)) {
                Ok(cfg) => {
                    let was_ok = state.config_ok;
                    state.config = cfg;
                    state.config_ok = true;
                    if !was_ok && state.session.is_signed_in() {
                        commands.push(Command::InitDashboard);
                    }
                }
                // A working config is kept over a broken late one.
                Err(e) => commands.push(Command::ReportError(e)),
            }
        }

        Message::ApiScriptLoaded => {
            if state.config_ok && !state.api_init_started {
                state.api_init_started = true;
                commands.push(Command::InitApiClient);
            }
        }

        Message::IdentityScriptLoaded => {
            if state.config_ok && !state.identity_init_started {
                state.identity_init_started = true;
                commands.push(Command::InitIdentity);
            }
        }

        Message::ApiClientReady => {
            if mark_ready(&mut state.init, Dependency::ApiClient) {
                commands.push(Command::RenderSignInButton);
            }
            if let Some(token) = state.session.token() {
                commands.push(Command::SetRemoteToken(token.as_str().to_string()));
            }
        }

        Message::IdentityReady => {
            if mark_ready(&mut state.init, Dependency::Identity) {
                commands.push(Command::RenderSignInButton);
            }
        }

        Message::ApiClientFailed(e) | Message::IdentityFailed(e) => {
            // Flags stay false, so the sign-in gate never opens.
            commands.push(Command::ReportError(e));
        }

        Message::CredentialReceived {
            credential,
            containers,
        } => {
            let token = match IdToken::parse(credential.as_deref()) {
                Ok(t) => t,
                Err(e) => {
                    commands.push(Command::ReportError(e));
                    return commands;
                }
            };
            if let Err(e) = containers.check() {
                log::warn!("sign-in transition skipped: {}", e);
                return commands;
            }

            commands.push(Command::SetRemoteToken(token.as_str().to_string()));
            state.session.sign_in(token);
            commands.push(Command::PersistSession);
            commands.push(Command::ApplyView(SessionView::SignedIn));
            commands.push(Command::InitDashboard);
        }

        Message::SignOutRequested { containers } => {
            if let Err(e) = containers.check() {
                log::warn!("sign-out transition skipped: {}", e);
                return commands;
            }

            state.session.sign_out();
            state.customers.clear();
            state.edit_target = None;
            commands.push(Command::SetRemoteToken(String::new()));
            commands.push(Command::DisableAutoSelect);
            commands.push(Command::ClearSession);
            commands.push(Command::ApplyView(SessionView::SignedOut));
            commands.push(Command::ShowToast(Text::SignedOut));
        }

        Message::RefreshRequested => {
            if state.session.is_signed_in() && state.config_ok {
                commands.push(Command::RefreshCustomers);
            } else {
                debug_log!("refresh ignored while signed out");
            }
        }

        Message::CustomersLoaded(rows) => {
            state.customers = rows;
            if matches!(state.edit_target, Some(DisplayIndex(i)) if i >= state.customers.len()) {
                state.edit_target = None;
                commands.push(Command::CloseEditForm);
            }
            commands.push(Command::RenderCustomers);
        }

        Message::AddCustomerSubmitted(row) => match row.validate_required() {
            Ok(()) => commands.push(Command::AppendCustomer(row)),
            Err(e) => commands.push(Command::ReportError(e)),
        },

        Message::EditRequested(index) => match state.customers.get(index.0) {
            Some(row) => {
                state.edit_target = Some(index);
                commands.push(Command::FillEditForm {
                    index,
                    row: row.clone(),
                });
            }
            None => commands.push(Command::ReportError(invalid_index(index))),
        },

        Message::EditSubmitted { index, row } => match edit_destination(state, index) {
            Ok(index) => commands.push(Command::UpdateCustomer { index, row }),
            Err(e) => commands.push(Command::ReportError(e)),
        },

        Message::EditCancelled => {
            state.edit_target = None;
            commands.push(Command::CloseEditForm);
        }

        Message::DeleteRequested(index) => {
            if state.customers.is_empty() || index.0 < state.customers.len() {
                commands.push(Command::DeleteCustomer(index));
            } else {
                commands.push(Command::ReportError(invalid_index(index)));
            }
        }

        Message::MutationSucceeded(kind) => {
            match kind {
                Mutation::Add => {
                    commands.push(Command::ResetAddForm);
                    commands.push(Command::ShowToast(Text::CustomerAdded));
                }
                Mutation::Edit => {
                    state.edit_target = None;
                    commands.push(Command::CloseEditForm);
                    commands.push(Command::ShowToast(Text::CustomerUpdated));
                }
                Mutation::Delete => {
                    // Display indices shift after a delete; an open edit is stale.
                    state.edit_target = None;
                    commands.push(Command::CloseEditForm);
                    commands.push(Command::ShowToast(Text::CustomerDeleted));
                }
            }
            commands.push(Command::RefreshCustomers);
        }

        Message::MutationFailed(kind, e) => {
            log::error!("{:?} failed: {}", kind, e);
            commands.push(Command::ReportError(e));
            commands.push(Command::RefreshCustomers);
        }

        Message::ErrorRaised(e) => commands.push(Command::ReportError(e)),
    }

    commands
}

/// Row an edit submission may write to: the remembered target, which the
/// form's hidden index (when present) must agree with.
fn edit_destination(
    state: &AppState,
    submitted: Option<DisplayIndex>,
) -> Result<DisplayIndex, AppError> {
    let target = state
        .edit_target
        .ok_or_else(|| AppError::Validation("no row selected for editing".into()))?;
    if submitted.is_some_and(|i| i != target) {
        return Err(AppError::Validation(format!(
            "edit form points at row {} but row {} is selected",
            submitted.map_or(0, |i| i.0),
            target.0
        )));
    }
    if !state.customers.is_empty() && target.0 >= state.customers.len() {
        return Err(invalid_index(target));
    }
    Ok(target)
}

fn invalid_index(index: DisplayIndex) -> AppError {
    AppError::Validation(format!("row {} is not displayed", index.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{CustomerRow, Field};
    use crate::session::ViewContainers;

    fn config() -> AppConfig {
        AppConfig {
            api_key: "k".into(),
            client_id: "c".into(),
            spreadsheet_id: "s".into(),
            ..AppConfig::default()
        }
    }

    fn booted(persisted: bool) -> AppState {
        let mut st = AppState::new();
        update(
            &mut st,
            Message::Boot {
                config: Ok(config()),
                persisted_signed_in: persisted,
                containers: ViewContainers::all_present(),
            },
        );
        st
    }

    fn signed_in() -> AppState {
        let mut st = booted(false);
        update(
            &mut st,
            Message::CredentialReceived {
                credential: Some("tok".into()),
                containers: ViewContainers::all_present(),
            },
        );
        st
    }

    fn complete_row() -> CustomerRow {
        CustomerRow::new()
            .with(Field::NearestAccessPoint, "AP")
            .with(Field::Name, "Ana")
            .with(Field::Address, "Calle 1")
            .with(Field::Phone, "555")
            .with(Field::Salesperson, "Luis")
    }

    fn renders(cmds: &[Command]) -> usize {
        cmds.iter()
            .filter(|c| **c == Command::RenderSignInButton)
            .count()
    }

    #[test]
    fn boot_with_bad_config_reports_and_blocks_sdk_init() {
        let mut st = AppState::new();
        let cmds = update(
            &mut st,
            Message::Boot {
                config: Ok(AppConfig::default()),
                persisted_signed_in: false,
                containers: ViewContainers::all_present(),
            },
        );
        assert!(matches!(cmds[0], Command::ReportError(AppError::Config(_))));
        assert!(update(&mut st, Message::ApiScriptLoaded).is_empty());
        assert!(update(&mut st, Message::IdentityScriptLoaded).is_empty());
    }

    #[test]
    fn boot_restores_signed_in_view_from_flag() {
        let mut st = AppState::new();
        let cmds = update(
            &mut st,
            Message::Boot {
                config: Ok(config()),
                persisted_signed_in: true,
                containers: ViewContainers::all_present(),
            },
        );
        assert_eq!(
            cmds,
            vec![Command::ApplyView(SessionView::SignedIn), Command::InitDashboard]
        );
        assert!(st.session.token().is_none());
    }

    #[test]
    fn late_config_unblocks_sdk_init() {
        let mut st = AppState::new();
        update(
            &mut st,
            Message::Boot {
                config: Ok(AppConfig::default()),
                persisted_signed_in: false,
                containers: ViewContainers::all_present(),
            },
        );
        assert!(update(&mut st, Message::ApiScriptLoaded).is_empty());

        assert!(update(&mut st, Message::ConfigProvided(Ok(config()))).is_empty());
        assert_eq!(update(&mut st, Message::ApiScriptLoaded), vec![Command::InitApiClient]);

        let cmds = update(&mut st, Message::ConfigProvided(Ok(AppConfig::default())));
        assert!(matches!(cmds.as_slice(), [Command::ReportError(AppError::Config(_))]));
        assert!(st.config_ok);
        assert_eq!(st.config.api_key, "k");
    }

    #[test]
    fn sdk_init_is_requested_once() {
        let mut st = booted(false);
        assert_eq!(update(&mut st, Message::ApiScriptLoaded), vec![Command::InitApiClient]);
        assert!(update(&mut st, Message::ApiScriptLoaded).is_empty());
        assert_eq!(
            update(&mut st, Message::IdentityScriptLoaded),
            vec![Command::InitIdentity]
        );
    }

    #[test]
    fn sign_in_button_never_renders_without_both_flags() {
        let mut st = booted(false);
        let mut cmds = update(&mut st, Message::ApiClientFailed(AppError::Remote("x".into())));
        cmds.extend(update(&mut st, Message::IdentityFailed(AppError::Remote("y".into()))));
        assert_eq!(renders(&cmds), 0);

        let mut st = booted(false);
        assert_eq!(renders(&update(&mut st, Message::ApiClientReady)), 0);
        assert_eq!(renders(&update(&mut st, Message::ApiClientReady)), 0);
    }

    #[test]
    fn sign_in_button_renders_once_on_both_ready() {
        let mut st = booted(false);
        let mut total = renders(&update(&mut st, Message::IdentityReady));
        total += renders(&update(&mut st, Message::ApiClientReady));
        total += renders(&update(&mut st, Message::ApiClientReady));
        total += renders(&update(&mut st, Message::IdentityReady));
        assert_eq!(total, 1);
    }

    #[test]
    fn credential_signs_in_sets_token_and_flag() {
        let mut st = booted(false);
        let cmds = update(
            &mut st,
            Message::CredentialReceived {
                credential: Some("id-token".into()),
                containers: ViewContainers::all_present(),
            },
        );
        assert_eq!(
            cmds,
            vec![
                Command::SetRemoteToken("id-token".into()),
                Command::PersistSession,
                Command::ApplyView(SessionView::SignedIn),
                Command::InitDashboard,
            ]
        );
        assert!(st.session.is_signed_in());
        assert_eq!(st.session.token().map(|t| t.as_str()), Some("id-token"));
    }

    #[test]
    fn missing_credential_is_an_auth_error() {
        let mut st = booted(false);
        let cmds = update(
            &mut st,
            Message::CredentialReceived {
                credential: None,
                containers: ViewContainers::all_present(),
            },
        );
        assert!(matches!(cmds.as_slice(), [Command::ReportError(AppError::Auth(_))]));
        assert!(!st.session.is_signed_in());
    }

    #[test]
    fn transitions_without_containers_are_noops() {
        let partial = ViewContainers {
            login_panel: true,
            main_content: false,
            signout_button: true,
        };
        let mut st = booted(false);
        let cmds = update(
            &mut st,
            Message::CredentialReceived {
                credential: Some("t".into()),
                containers: partial,
            },
        );
        assert!(cmds.is_empty());
        assert!(!st.session.is_signed_in());

        let mut st = signed_in();
        assert!(update(&mut st, Message::SignOutRequested { containers: partial }).is_empty());
        assert!(st.session.is_signed_in());
    }

    #[test]
    fn sign_out_clears_token_and_disables_auto_select() {
        let mut st = signed_in();
        st.customers = vec![complete_row()];
        let cmds = update(
            &mut st,
            Message::SignOutRequested {
                containers: ViewContainers::all_present(),
            },
        );
        assert_eq!(cmds[0], Command::SetRemoteToken(String::new()));
        assert!(cmds.contains(&Command::DisableAutoSelect));
        assert!(cmds.contains(&Command::ClearSession));
        assert!(cmds.contains(&Command::ApplyView(SessionView::SignedOut)));
        assert!(st.session.token().is_none());
        assert!(st.customers.is_empty());
    }

    #[test]
    fn add_with_any_required_field_empty_short_circuits() {
        for field in crate::models::REQUIRED_FIELDS {
            let mut st = signed_in();
            let row = complete_row().with(field, "");
            let cmds = update(&mut st, Message::AddCustomerSubmitted(row));
            assert!(
                matches!(cmds.as_slice(), [Command::ReportError(AppError::Validation(_))]),
                "{:?} empty should only report",
                field
            );
        }
    }

    #[test]
    fn complete_add_appends() {
        let mut st = signed_in();
        let cmds = update(&mut st, Message::AddCustomerSubmitted(complete_row()));
        assert_eq!(cmds, vec![Command::AppendCustomer(complete_row())]);
    }

    #[test]
    fn edit_flow_targets_requested_row() {
        let mut st = signed_in();
        update(
            &mut st,
            Message::CustomersLoaded(vec![
                complete_row(),
                complete_row().with(Field::Name, "Bea"),
            ]),
        );

        let cmds = update(&mut st, Message::EditRequested(DisplayIndex(1)));
        assert!(matches!(
            &cmds[0],
            Command::FillEditForm { index: DisplayIndex(1), row } if row.get(Field::Name) == "Bea"
        ));

        // Hidden index missing: falls back to the remembered target.
        let edited = complete_row().with(Field::Status, "cerrado");
        let cmds = update(
            &mut st,
            Message::EditSubmitted {
                index: None,
                row: edited.clone(),
            },
        );
        assert_eq!(
            cmds,
            vec![Command::UpdateCustomer {
                index: DisplayIndex(1),
                row: edited
            }]
        );
    }

    #[test]
    fn edit_of_unknown_row_is_rejected() {
        let mut st = signed_in();
        let cmds = update(&mut st, Message::EditRequested(DisplayIndex(3)));
        assert!(matches!(cmds.as_slice(), [Command::ReportError(AppError::Validation(_))]));
        let cmds = update(
            &mut st,
            Message::EditSubmitted {
                index: None,
                row: complete_row(),
            },
        );
        assert!(matches!(cmds.as_slice(), [Command::ReportError(_)]));
    }

    #[test]
    fn delete_while_editing_closes_form_and_blocks_stale_edit() {
        let mut st = signed_in();
        let three = vec![
            complete_row().with(Field::Name, "Ana"),
            complete_row().with(Field::Name, "Bea"),
            complete_row().with(Field::Name, "Carla"),
        ];
        update(&mut st, Message::CustomersLoaded(three));
        update(&mut st, Message::EditRequested(DisplayIndex(2)));
        update(&mut st, Message::DeleteRequested(DisplayIndex(0)));

        let cmds = update(&mut st, Message::MutationSucceeded(Mutation::Delete));
        assert!(cmds.contains(&Command::CloseEditForm));
        assert_eq!(st.edit_target, None);

        update(
            &mut st,
            Message::CustomersLoaded(vec![complete_row(), complete_row()]),
        );
        let cmds = update(
            &mut st,
            Message::EditSubmitted {
                index: Some(DisplayIndex(2)),
                row: complete_row(),
            },
        );
        assert!(matches!(cmds.as_slice(), [Command::ReportError(AppError::Validation(_))]));
    }

    #[test]
    fn edit_index_must_match_selected_row() {
        let mut st = signed_in();
        update(
            &mut st,
            Message::CustomersLoaded(vec![complete_row(), complete_row(), complete_row()]),
        );
        update(&mut st, Message::EditRequested(DisplayIndex(0)));
        let cmds = update(
            &mut st,
            Message::EditSubmitted {
                index: Some(DisplayIndex(1)),
                row: complete_row(),
            },
        );
        assert!(matches!(cmds.as_slice(), [Command::ReportError(AppError::Validation(_))]));
    }

    #[test]
    fn every_mutation_outcome_refreshes() {
        for kind in [Mutation::Add, Mutation::Edit, Mutation::Delete] {
            let mut st = signed_in();
            let ok = update(&mut st, Message::MutationSucceeded(kind));
            assert_eq!(ok.last(), Some(&Command::RefreshCustomers));
            let failed = update(
                &mut st,
                Message::MutationFailed(kind, AppError::Remote("503".into())),
            );
            assert_eq!(
                failed,
                vec![
                    Command::ReportError(AppError::Remote("503".into())),
                    Command::RefreshCustomers
                ]
            );
        }
    }

    #[test]
    fn refresh_only_when_signed_in() {
        let mut st = booted(false);
        assert!(update(&mut st, Message::RefreshRequested).is_empty());
        let mut st = signed_in();
        assert_eq!(
            update(&mut st, Message::RefreshRequested),
            vec![Command::RefreshCustomers]
        );
    }

    #[test]
    fn shrinking_data_drops_stale_edit_target() {
        let mut st = signed_in();
        update(&mut st, Message::CustomersLoaded(vec![complete_row(), complete_row()]));
        update(&mut st, Message::EditRequested(DisplayIndex(1)));
        let cmds = update(&mut st, Message::CustomersLoaded(vec![complete_row()]));
        assert_eq!(cmds, vec![Command::CloseEditForm, Command::RenderCustomers]);
        assert_eq!(st.edit_target, None);
    }
}
