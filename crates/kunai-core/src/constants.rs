/// Product name written into generated PRODID properties
pub const PRODUCT_NAME: &str = "kunai";

/// Library version, taken from the crate manifest
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value of the PRODID property a writer adds when asked to identify itself
pub const PRODUCT_ID: &str = const_str::concat!(PRODUCT_NAME, " ", PRODUCT_VERSION);

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "KUNAI";

/// Optional configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "kunai.toml";
