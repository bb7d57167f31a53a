//! User-visible strings. Spanish is the default; English is picked when the
//! browser language starts with `en`.

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("en") {
            Locale::En
        } else {
            Locale::Es
        }
    }

    /// `navigator.language`, falling back to the default locale.
    pub fn detect() -> Self {
        web_sys::window()
            .and_then(|w| w.navigator().language())
            .map(|tag| Self::from_tag(&tag))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    CustomerAdded,
    CustomerUpdated,
    CustomerDeleted,
    ConfirmDelete,
    SignedOut,
    Dismiss,
    Edit,
    Delete,
    NoCustomers,
    TotalCustomers,
    VisitsToday,
    ByStatus,
    ByVisitStatus,
    ByPriority,
    BySalesperson,
}

pub fn text(locale: Locale, key: Text) -> &'static str {
    use Text::*;
    match (locale, key) {
        (Locale::Es, CustomerAdded) => "Cliente agregado correctamente",
        (Locale::En, CustomerAdded) => "Customer added",
        (Locale::Es, CustomerUpdated) => "Cliente actualizado correctamente",
        (Locale::En, CustomerUpdated) => "Customer updated",
        (Locale::Es, CustomerDeleted) => "Cliente eliminado",
        (Locale::En, CustomerDeleted) => "Customer deleted",
        (Locale::Es, ConfirmDelete) => "¿Seguro que desea eliminar este cliente?",
        (Locale::En, ConfirmDelete) => "Delete this customer?",
        (Locale::Es, SignedOut) => "Sesión cerrada",
        (Locale::En, SignedOut) => "Signed out",
        (Locale::Es, Dismiss) => "Cerrar",
        (Locale::En, Dismiss) => "Dismiss",
        (Locale::Es, Edit) => "Editar",
        (Locale::En, Edit) => "Edit",
        (Locale::Es, Delete) => "Eliminar",
        (Locale::En, Delete) => "Delete",
        (Locale::Es, NoCustomers) => "No hay clientes registrados",
        (Locale::En, NoCustomers) => "No customers yet",
        (Locale::Es, TotalCustomers) => "Total de clientes",
        (Locale::En, TotalCustomers) => "Total customers",
        (Locale::Es, VisitsToday) => "Visitas de hoy",
        (Locale::En, VisitsToday) => "Visits today",
        (Locale::Es, ByStatus) => "Por estado",
        (Locale::En, ByStatus) => "By status",
        (Locale::Es, ByVisitStatus) => "Por estado de visita",
        (Locale::En, ByVisitStatus) => "By visit status",
        (Locale::Es, ByPriority) => "Por prioridad",
        (Locale::En, ByPriority) => "By priority",
        (Locale::Es, BySalesperson) => "Por vendedor",
        (Locale::En, BySalesperson) => "By salesperson",
    }
}

/// Banner text for an error: a localized lead plus the technical detail.
pub fn error_message(locale: Locale, err: &AppError) -> String {
    let lead = match (locale, err) {
        (Locale::Es, AppError::Config(_)) => "Error de configuración",
        (Locale::En, AppError::Config(_)) => "Configuration error",
        (Locale::Es, AppError::Auth(_)) => "Error de autenticación",
        (Locale::En, AppError::Auth(_)) => "Authentication error",
        (Locale::Es, AppError::Remote(_)) => "Error al comunicarse con Google Sheets",
        (Locale::En, AppError::Remote(_)) => "Google Sheets request failed",
        (Locale::Es, AppError::Dom(_)) => "Falta un elemento de la página",
        (Locale::En, AppError::Dom(_)) => "A page element is missing",
        (Locale::Es, AppError::Validation(_)) => "Datos no válidos",
        (Locale::En, AppError::Validation(_)) => "Invalid input",
    };
    format!("{}: {}", lead, err.detail())
}
