//! Add and edit customer forms.
//!
//! Add-form controls use the bare field ids (`name`, `phone`, ...); the edit
//! form prefixes them with `edit-` and carries the target row in a hidden
//! `#editRowIndex` input.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement};

use crate::constants::{
    EDIT_COLUMN_COUNT, EDIT_FIELD_PREFIX, ID_ADD_CUSTOMER_FORM, ID_EDIT_CANCEL, ID_EDIT_FORM,
    ID_EDIT_ROW_INDEX,
};
use crate::dom_utils::{self, by_id, optional_field_value, set_field_value};
use crate::error::AppError;
use crate::messages::Message;
use crate::models::{CustomerRow, DisplayIndex, Field};
use crate::state::dispatch_global_message;

fn edit_id(field: Field) -> String {
    format!("{}{}", EDIT_FIELD_PREFIX, field.dom_id())
}

/// Columns the edit form owns (A..H).
fn edit_fields() -> impl Iterator<Item = Field> {
    Field::ALL.into_iter().take(EDIT_COLUMN_COUNT)
}

pub fn read_add_form(document: &Document) -> CustomerRow {
    let mut row = CustomerRow::new();
    for field in Field::ALL {
        row.set(field, optional_field_value(document, field.dom_id()));
    }
    row
}

pub fn read_edit_form(document: &Document) -> (Option<DisplayIndex>, CustomerRow) {
    let index = dom_utils::field_value(document, ID_EDIT_ROW_INDEX)
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| match DisplayIndex::parse(&raw) {
            Ok(i) => Some(i),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        });

    let mut row = CustomerRow::new();
    for field in edit_fields() {
        row.set(field, optional_field_value(document, &edit_id(field)));
    }
    (index, row)
}

pub fn fill_edit_form(
    document: &Document,
    index: DisplayIndex,
    row: &CustomerRow,
) -> Result<(), AppError> {
    let form = by_id(document, ID_EDIT_FORM)?;
    set_field_value(document, ID_EDIT_ROW_INDEX, &index.0.to_string())?;
    for field in edit_fields() {
        // A page may leave optional columns out of its edit form.
        if let Err(e) = set_field_value(document, &edit_id(field), row.get(field)) {
            crate::debug_log!("edit form: {}", e);
        }
    }
    dom_utils::show(&form);
    Ok(())
}

pub fn close_edit_form(document: &Document) -> Result<(), AppError> {
    let form = by_id(document, ID_EDIT_FORM)?;
    if let Some(f) = form.dyn_ref::<HtmlFormElement>() {
        f.reset();
    }
    // reset() restores the default value, which may be a stale index.
    let _ = set_field_value(document, ID_EDIT_ROW_INDEX, "");
    dom_utils::hide(&form);
    Ok(())
}

pub fn reset_add_form(document: &Document) -> Result<(), AppError> {
    let form = by_id(document, ID_ADD_CUSTOMER_FORM)?;
    if let Some(f) = form.dyn_ref::<HtmlFormElement>() {
        f.reset();
    }
    Ok(())
}

fn on_submit<F>(document: &Document, form_id: &str, to_message: F) -> Result<(), AppError>
where
    F: Fn(&Document) -> Message + 'static,
{
    let form = by_id(document, form_id)?;
    let doc = document.clone();
    let handler = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        dispatch_global_message(to_message(&doc));
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Attach submit / cancel handlers. Forms missing from the page are skipped
/// with a warning.
pub fn wire(document: &Document) {
    let add = on_submit(document, ID_ADD_CUSTOMER_FORM, |doc| {
        Message::AddCustomerSubmitted(read_add_form(doc))
    });
    let edit = on_submit(document, ID_EDIT_FORM, |doc| {
        let (index, row) = read_edit_form(doc);
        Message::EditSubmitted { index, row }
    });
    for result in [add, edit, wire_cancel(document)] {
        if let Err(e) = result {
            log::warn!("form not wired: {}", e);
        }
    }
}

fn wire_cancel(document: &Document) -> Result<(), AppError> {
    let button = by_id(document, ID_EDIT_CANCEL)?;
    let handler = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        dispatch_global_message(Message::EditCancelled);
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
