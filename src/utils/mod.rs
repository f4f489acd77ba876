pub mod constants;
pub mod env;
pub mod exclusion_table;
pub mod logging;
pub mod matcher_config;
