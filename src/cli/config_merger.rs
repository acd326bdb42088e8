//! Merges CLI argument overrides on top of file-based configuration.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides to settings loaded by `ConfigLoader`.
///
/// CLI arguments win over every file and environment source.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads base settings from `--config` when given, otherwise from the
    /// layered configuration directory, using the `--env` overlay if set.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match cli.config {
            Some(ref path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = loader.with_environment(cli.environment());

        Ok(Self::new(loader.load()?))
    }

    /// Returns a copy of the base settings with CLI overrides applied and
    /// the result re-validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                legacy_v1,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                // Command-level log level beats --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }

                // The flag can only switch the legacy surface on
                if *legacy_v1 {
                    config.api.enable_legacy_v1 = true;
                }
            }
            Commands::Migrate { .. } => {}
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let mut base = Settings::default();
        base.database.url = "postgres://localhost/test".to_string();
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(base).merge_cli_args(&cli)
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = Settings::default();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["shop-rs", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["shop-rs", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_host_and_port() {
        let merged = merge(&["shop-rs", "serve", "--host", "0.0.0.0", "--port", "9090"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 9090);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["shop-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_legacy_flag_enables_v1() {
        assert!(!merge(&["shop-rs", "serve"]).unwrap().api.enable_legacy_v1);
        assert!(
            merge(&["shop-rs", "serve", "--legacy-v1"])
                .unwrap()
                .api
                .enable_legacy_v1
        );
    }

    #[test]
    fn test_merge_revalidates() {
        let cli = Cli::try_parse_from(["shop-rs", "serve"]).unwrap();
        let merger = ConfigurationMerger::new(Settings::default());
        assert!(matches!(
            merger.merge_cli_args(&cli),
            Err(ConfigError::ValidationError { field, .. }) if field == "database.url"
        ));
    }
}
