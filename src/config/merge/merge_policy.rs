//! Built-in defaults every builder starts from.

use crate::store::persistence::DEFAULT_TABLE_KEY;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the scalar defaults. List and map defaults come from
/// the serde defaults on the config structs.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = Config::builder()
        .set_default("storage.key", DEFAULT_TABLE_KEY)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "file")?;
    Ok(builder)
}
