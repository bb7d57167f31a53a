// src/messages.rs
//
// Events the app reacts to, and the side effects `update` asks for.
//
use crate::config::AppConfig;
use crate::error::AppError;
use crate::i18n::Text;
use crate::models::{CustomerRow, DisplayIndex};
use crate::session::{SessionView, ViewContainers};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Start-up
    Boot {
        config: Result<AppConfig, AppError>,
        persisted_signed_in: bool,
        containers: ViewContainers,
    },
    /// Config pushed by the page after start-up (`init_app_config_js`)
    ConfigProvided(Result<AppConfig, AppError>),
    ApiScriptLoaded,
    IdentityScriptLoaded,
    ApiClientReady,
    ApiClientFailed(AppError),
    IdentityReady,
    IdentityFailed(AppError),

    // Session
    CredentialReceived {
        credential: Option<String>,
        containers: ViewContainers,
    },
    SignOutRequested {
        containers: ViewContainers,
    },

    // Data
    RefreshRequested,
    CustomersLoaded(Vec<CustomerRow>),

    // Forms
    AddCustomerSubmitted(CustomerRow),
    EditRequested(DisplayIndex),
    EditSubmitted {
        index: Option<DisplayIndex>,
        row: CustomerRow,
    },
    EditCancelled,
    DeleteRequested(DisplayIndex),
    MutationSucceeded(Mutation),
    MutationFailed(Mutation, AppError),

    // Anything else that went wrong outside a mutation
    ErrorRaised(AppError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Add,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load + init the gapi client, retried per `RetryPolicy`
    InitApiClient,
    /// `google.accounts.id.initialize`, no retry
    InitIdentity,
    RenderSignInButton,

    /// `gapi.client.setToken`; the empty string clears it
    SetRemoteToken(String),
    DisableAutoSelect,
    PersistSession,
    ClearSession,
    ApplyView(SessionView),
    InitDashboard,

    RefreshCustomers,
    RenderCustomers,

    AppendCustomer(CustomerRow),
    UpdateCustomer {
        index: DisplayIndex,
        row: CustomerRow,
    },
    DeleteCustomer(DisplayIndex),

    FillEditForm {
        index: DisplayIndex,
        row: CustomerRow,
    },
    CloseEditForm,
    ResetAddForm,

    ShowToast(Text),
    ReportError(AppError),
}
