//! Tiny toast / notification helper.
//! Creates a `#toast-root` container once per page and appends toast divs that
//! disappear after `TOAST_DURATION_MS`.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element};

use crate::constants::TOAST_DURATION_MS;

#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Info,
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn info(msg: &str) {
    show(msg, ToastKind::Info);
}

pub fn show(message: &str, kind: ToastKind) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(root) = ensure_root(&document) else {
        return;
    };
    let Ok(toast) = document.create_element("div") else {
        return;
    };

    toast.set_class_name(match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Info => "toast toast-info",
    });
    toast.set_text_content(Some(message));

    // Newest on top.
    let _ = root.prepend_with_node_1(&toast);

    let cb = Closure::once_into_js(move || toast.remove());
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        TOAST_DURATION_MS,
    );

    ensure_styles(&document);
}

fn ensure_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id("toast-root") {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id("toast-root");
    root.set_class_name("toast-root");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}

fn ensure_styles(document: &Document) {
    if document.get_element_by_id("toast-styles").is_some() {
        return;
    }

    let css = "
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;
  gap:8px;z-index:9999;font-family:Arial,Helvetica,sans-serif}
.toast{padding:10px 16px;border-radius:4px;color:#fff;
  box-shadow:0 2px 4px rgba(0,0,0,.1);opacity:0;animation:toast-in .2s forwards}
.toast-success{background:#16a34a}
.toast-info{background:#2563eb}
@keyframes toast-in{to{opacity:1}}
";

    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_id("toast-styles");
    style.set_text_content(Some(css));
    let parent = document
        .head()
        .map(Element::from)
        .or_else(|| document.body().map(Element::from));
    if let Some(parent) = parent {
        let _ = parent.append_child(&style);
    }
}
