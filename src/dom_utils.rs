//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Show / hide goes through the `hidden` / `visible` classes, form fields are
//! read and written without caring whether they are `<input>`, `<select>` or
//! `<textarea>`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::constants::{ID_LOGIN_PANEL, ID_MAIN_CONTENT, ID_SIGNOUT_BUTTON};
use crate::error::AppError;
use crate::session::ViewContainers;

pub fn document() -> Result<Document, AppError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Dom("document".into()))
}

/// Element by id, or `AppError::Dom(id)`.
pub fn by_id(document: &Document, id: &str) -> Result<Element, AppError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AppError::Dom(id.to_string()))
}

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

pub fn set_visible(el: &Element, visible: bool) {
    if visible {
        show(el)
    } else {
        hide(el)
    }
}

/// Which session containers the page currently has.
pub fn view_containers(document: &Document) -> ViewContainers {
    ViewContainers {
        login_panel: document.get_element_by_id(ID_LOGIN_PANEL).is_some(),
        main_content: document.get_element_by_id(ID_MAIN_CONTENT).is_some(),
        signout_button: document.get_element_by_id(ID_SIGNOUT_BUTTON).is_some(),
    }
}

/// Current value of a form control.
pub fn field_value(document: &Document, id: &str) -> Result<String, AppError> {
    let el = by_id(document, id)?;
    let value = if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        return Err(AppError::Dom(format!("{} (not a form control)", id)));
    };
    Ok(value)
}

/// Like [`field_value`] but an absent control reads as empty. Optional
/// columns may be left out of a page's form.
pub fn optional_field_value(document: &Document, id: &str) -> String {
    field_value(document, id).unwrap_or_default()
}

pub fn set_field_value(document: &Document, id: &str, value: &str) -> Result<(), AppError> {
    let el = by_id(document, id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else {
        return Err(AppError::Dom(format!("{} (not a form control)", id)));
    }
    Ok(())
}

/// Remove all children of `el`.
pub fn clear_children(el: &Element) {
    el.set_inner_html("");
}
