// Dismissible error banner inside #errorDisplay. Newer errors replace older.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

use crate::constants::ID_ERROR_DISPLAY;
use crate::dom_utils::{by_id, clear_children, hide, show};
use crate::error::AppError;
use crate::i18n::{text, Locale, Text};

pub fn show_error(document: &Document, message: &str, locale: Locale) -> Result<(), AppError> {
    let container = by_id(document, ID_ERROR_DISPLAY)?;
    clear_children(&container);

    let banner = document.create_element("div")?;
    banner.set_class_name("error-banner");
    banner.set_attribute("role", "alert")?;

    let body = document.create_element("span")?;
    body.set_text_content(Some(message));
    banner.append_child(&body)?;

    let dismiss = document.create_element("button")?;
    dismiss.set_attribute("type", "button")?;
    dismiss.set_class_name("error-dismiss");
    dismiss.set_text_content(Some(text(locale, Text::Dismiss)));
    let target = container.clone();
    let on_click = Closure::once(move |_: Event| {
        clear_children(&target);
        hide(&target);
    });
    dismiss.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    // The closure dies with the button once the banner is replaced.
    on_click.forget();
    banner.append_child(&dismiss)?;

    container.append_child(&banner)?;
    show(&container);
    Ok(())
}
