// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate the configuration and report the effective values.
pub fn run_validate(config: &Config) -> Result<()> {
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("    Service code: {}", config.catalog.service_code);
    log::info!("    Format version: {}", config.catalog.format_version);
    log::info!("    Region: {}", config.catalog.region);
    for (field, value) in &config.filters {
        log::info!("    Filter: {} = {}", field, value);
    }
    log::info!("    Dump file: {}", config.paths.dump_file);
    log::info!("    Database file: {}", config.paths.database_file);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default() {
        assert!(run_validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_region() {
        let mut config = Config::default();
        config.catalog.region = String::new();
        assert!(run_validate(&config).is_err());
    }
}
