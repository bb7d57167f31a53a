// Element ids the page markup must provide. These are the contract between the
// static HTML and the WASM side.
pub const ID_SIGN_IN_CONTAINER: &str = "sign-in-container";
pub const ID_LOGIN_PANEL: &str = "login-panel";
pub const ID_MAIN_CONTENT: &str = "main-content";
pub const ID_SIGNOUT_BUTTON: &str = "signout-button";
pub const ID_ERROR_DISPLAY: &str = "errorDisplay";
pub const ID_ADD_CUSTOMER_FORM: &str = "addCustomerForm";
pub const ID_EDIT_FORM: &str = "editForm";
pub const ID_EDIT_ROW_INDEX: &str = "editRowIndex";
pub const ID_EDIT_CANCEL: &str = "editCancel";
pub const ID_CUSTOMER_TABLE: &str = "customerTable";
pub const ID_DASHBOARD: &str = "dashboard";

// Form field ids, in column order (A..L). The add form uses the bare ids, the
// edit form prefixes them with `edit-`.
pub const FIELD_IDS: [&str; 12] = [
    "nearestAccessPoint",
    "name",
    "address",
    "phone",
    "salesperson",
    "visitStatus",
    "notes",
    "status",
    "email",
    "neighborhood",
    "visitDate",
    "priority",
];
pub const EDIT_FIELD_PREFIX: &str = "edit-";

// Data attributes on table action buttons.
pub const ATTR_ROW_INDEX: &str = "data-row-index";
pub const ATTR_ACTION: &str = "data-action";
pub const ACTION_EDIT: &str = "edit";
pub const ACTION_DELETE: &str = "delete";

// Session persistence. One location, one writer (see storage.rs).
pub const SESSION_FLAG_KEY: &str = "crm_signed_in";

// Google API surface.
pub const DISCOVERY_DOC: &str = "https://sheets.googleapis.com/$discovery/rest?version=v4";
pub const SHEETS_SCOPES: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const VALUE_INPUT_OPTION: &str = "USER_ENTERED";
pub const DEFAULT_SHEET_NAME: &str = "Clientes";

// Sheet geometry. Row 1 is the header; displayed index 0 is sheet row 2.
pub const COLUMN_COUNT: usize = 12;
pub const EDIT_COLUMN_COUNT: usize = 8;
pub const HEADER_ROWS: usize = 1;
pub const FIRST_DATA_ROW: usize = HEADER_ROWS + 1;

// API client initialization retry: 3 retries, 2 s per attempt number.
pub const API_INIT_MAX_RETRIES: u32 = 3;
pub const API_INIT_RETRY_STEP_MS: u32 = 2000;

// Banner auto-dismiss (ms). Errors stay until dismissed.
pub const TOAST_DURATION_MS: i32 = 4000;
