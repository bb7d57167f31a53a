// Login panel / main content / sign-out button visibility.

use web_sys::Document;

use crate::constants::{ID_LOGIN_PANEL, ID_MAIN_CONTENT, ID_SIGNOUT_BUTTON};
use crate::dom_utils::{by_id, set_visible};
use crate::error::AppError;
use crate::session::SessionView;

pub fn apply(document: &Document, view: SessionView) -> Result<(), AppError> {
    // Resolve all three first so a partial page is never half-switched.
    let login = by_id(document, ID_LOGIN_PANEL)?;
    let main = by_id(document, ID_MAIN_CONTENT)?;
    let signout = by_id(document, ID_SIGNOUT_BUTTON)?;

    let signed_in = view == SessionView::SignedIn;
    set_visible(&login, !signed_in);
    set_visible(&main, signed_in);
    set_visible(&signout, signed_in);
    Ok(())
}
