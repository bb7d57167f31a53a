//! Customer table.
//!
//! Rows are rebuilt from the cached `AppState::customers` after every fetch.
//! Edit/delete buttons carry `data-action` + `data-row-index`; a single
//! delegated click listener on the table turns them into messages.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::constants::{
    ACTION_DELETE, ACTION_EDIT, ATTR_ACTION, ATTR_ROW_INDEX, COLUMN_COUNT, ID_CUSTOMER_TABLE,
};
use crate::dom_utils::{by_id, clear_children};
use crate::error::AppError;
use crate::i18n::{text, Locale, Text};
use crate::messages::Message;
use crate::models::{CustomerRow, DisplayIndex, Field};
use crate::state::{current_locale, dispatch_global_message};

const WIRED_ATTR: &str = "data-wired";

/// Body element rows go into: the table's `<tbody>`, or the container itself.
fn body(document: &Document) -> Result<Element, AppError> {
    let table = by_id(document, ID_CUSTOMER_TABLE)?;
    Ok(table.query_selector("tbody").ok().flatten().unwrap_or(table))
}

pub fn render(document: &Document, rows: &[CustomerRow], locale: Locale) -> Result<(), AppError> {
    let tbody = body(document)?;
    clear_children(&tbody);

    if rows.is_empty() {
        let tr = document.create_element("tr")?;
        let td = document.create_element("td")?;
        td.set_attribute("colspan", &(COLUMN_COUNT + 1).to_string())?;
        td.set_class_name("empty");
        td.set_text_content(Some(text(locale, Text::NoCustomers)));
        tr.append_child(&td)?;
        tbody.append_child(&tr)?;
        return Ok(());
    }

    for (i, row) in rows.iter().enumerate() {
        let tr = document.create_element("tr")?;
        for field in Field::ALL {
            let td = document.create_element("td")?;
            td.set_text_content(Some(row.get(field)));
            tr.append_child(&td)?;
        }

        let actions = document.create_element("td")?;
        actions.set_class_name("actions");
        for (action, label) in [(ACTION_EDIT, Text::Edit), (ACTION_DELETE, Text::Delete)] {
            let btn = document.create_element("button")?;
            btn.set_attribute("type", "button")?;
            btn.set_attribute(ATTR_ACTION, action)?;
            btn.set_attribute(ATTR_ROW_INDEX, &i.to_string())?;
            btn.set_class_name(&format!("btn-{}", action));
            btn.set_text_content(Some(text(locale, label)));
            actions.append_child(&btn)?;
        }
        tr.append_child(&actions)?;
        tbody.append_child(&tr)?;
    }
    Ok(())
}

/// Install the delegated click handler once per table element.
pub fn wire(document: &Document) -> Result<(), AppError> {
    let table = by_id(document, ID_CUSTOMER_TABLE)?;
    if table.has_attribute(WIRED_ATTR) {
        return Ok(());
    }

    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(button) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!("[{}]", ATTR_ACTION)).ok().flatten())
        else {
            return;
        };
        let action = button.get_attribute(ATTR_ACTION).unwrap_or_default();
        let raw_index = button.get_attribute(ATTR_ROW_INDEX).unwrap_or_default();
        let index = match DisplayIndex::parse(&raw_index) {
            Ok(i) => i,
            Err(e) => {
                dispatch_global_message(Message::ErrorRaised(e));
                return;
            }
        };

        match action.as_str() {
            ACTION_EDIT => dispatch_global_message(Message::EditRequested(index)),
            ACTION_DELETE => {
                if confirm_delete() {
                    dispatch_global_message(Message::DeleteRequested(index));
                }
            }
            other => log::warn!("unknown row action {:?}", other),
        }
    }) as Box<dyn FnMut(_)>);

    table.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    table.set_attribute(WIRED_ATTR, "true")?;
    Ok(())
}

fn confirm_delete() -> bool {
    let prompt = text(current_locale(), Text::ConfirmDelete);
    web_sys::window()
        .and_then(|w| w.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::dom_utils::document;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn renders_one_row_per_customer_with_indexed_actions() {
        let doc = document().unwrap();
        let body_el = doc.body().unwrap();
        body_el.set_inner_html(r#"<table id="customerTable"><tbody></tbody></table>"#);

        let rows = vec![
            CustomerRow::new().with(Field::Name, "Ana"),
            CustomerRow::new().with(Field::Name, "<b>Bea</b>"),
        ];
        render(&doc, &rows, Locale::En).unwrap();

        let trs = doc.query_selector_all("#customerTable tbody tr").unwrap();
        assert_eq!(trs.length(), 2);
        let delete = doc
            .query_selector("button[data-action='delete'][data-row-index='1']")
            .unwrap();
        assert!(delete.is_some());
        // Cell text is never parsed as markup.
        assert!(doc.query_selector("#customerTable b").unwrap().is_none());
        body_el.set_inner_html("");
    }

    #[wasm_bindgen_test]
    fn empty_cache_shows_placeholder() {
        let doc = document().unwrap();
        let body_el = doc.body().unwrap();
        body_el.set_inner_html(r#"<table id="customerTable"><tbody></tbody></table>"#);
        render(&doc, &[], Locale::En).unwrap();
        let td = doc.query_selector("#customerTable td.empty").unwrap().unwrap();
        assert_eq!(td.text_content().unwrap(), "No customers yet");
        body_el.set_inner_html("");
    }
}
