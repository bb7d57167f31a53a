//! Signed-in / signed-out session.
//!
//! The identity token only ever lives here, in memory, for the lifetime of the
//! page. The persisted flag (see `storage.rs`) only remembers *that* the user
//! was signed in, never the credential itself.

use std::fmt;

use crate::constants::{ID_LOGIN_PANEL, ID_MAIN_CONTENT, ID_SIGNOUT_BUTTON};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionView {
    #[default]
    SignedOut,
    SignedIn,
}

/// Opaque credential issued by the identity provider. `Debug` is redacted so
/// the token never ends up in console logs.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            Some(tok) if !tok.is_empty() => Ok(Self(tok.to_string())),
            _ => Err(AppError::Auth("no credential in identity response".into())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdToken(<{} bytes>)", self.0.len())
    }
}

/// Which of the three view containers the page currently provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContainers {
    pub login_panel: bool,
    pub main_content: bool,
    pub signout_button: bool,
}

impl ViewContainers {
    pub fn all_present() -> Self {
        Self {
            login_panel: true,
            main_content: true,
            signout_button: true,
        }
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !self.login_panel {
            out.push(ID_LOGIN_PANEL);
        }
        if !self.main_content {
            out.push(ID_MAIN_CONTENT);
        }
        if !self.signout_button {
            out.push(ID_SIGNOUT_BUTTON);
        }
        out
    }

    pub fn check(&self) -> Result<(), AppError> {
        match self.missing().first() {
            None => Ok(()),
            Some(id) => Err(AppError::Dom((*id).to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    view: SessionView,
    token: Option<IdToken>,
}

impl Session {
    /// Initial session on page load. A persisted flag restores the signed-in
    /// view; the credential itself is gone after a reload.
    pub fn restore(persisted_signed_in: bool) -> Self {
        Self {
            view: if persisted_signed_in {
                SessionView::SignedIn
            } else {
                SessionView::SignedOut
            },
            token: None,
        }
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    pub fn is_signed_in(&self) -> bool {
        self.view == SessionView::SignedIn
    }

    pub fn token(&self) -> Option<&IdToken> {
        self.token.as_ref()
    }

    /// Hold `token` and switch to the signed-in view.
    pub fn sign_in(&mut self, token: IdToken) {
        self.token = Some(token);
        self.view = SessionView::SignedIn;
    }

    /// Drop the credential and switch to the signed-out view.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.view = SessionView::SignedOut;
    }
}
