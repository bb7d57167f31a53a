// Build script for compile-time configuration
// The crate reads its Google credentials through `option_env!`, so cargo has
// to rebuild whenever one of them changes.

const CONFIG_VARS: &[&str] = &[
    "CRM_API_KEY",
    "CRM_CLIENT_ID",
    "CRM_SPREADSHEET_ID",
    "CRM_SHEET_NAME",
    "CRM_SHEET_ID",
];

fn main() {
    for var in CONFIG_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    // Missing values are allowed at build time; runtime config (window.CRM_CONFIG
    // or init_app_config_js) can still provide them.
    let missing: Vec<&str> = CONFIG_VARS
        .iter()
        .copied()
        .filter(|var| std::env::var(var).map(|v| v.is_empty()).unwrap_or(true))
        .collect();

    if !missing.is_empty() && std::env::var("PROFILE").as_deref() == Ok("release") {
        println!(
            "cargo:warning=Compile-time config not set: {}, relying on runtime config",
            missing.join(", ")
        );
    }
}
