/// TOML configuration file (`relay.toml`).
pub mod toml_config;
/// Client-side form validation for the sign-in flows.
pub mod validation;
