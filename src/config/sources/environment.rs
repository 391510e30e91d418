//! Environment variable source: ROSTER_ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `ROSTER__STORAGE__KEY=people` sets `storage.key`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("ROSTER")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
