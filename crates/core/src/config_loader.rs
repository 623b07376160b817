use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging TOML, environment variables, and JSON.
    ///
    /// Missing files are skipped; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// configuration fails validation.
    pub fn load() -> Result<AppConfig> {
        Self::extract(Self::base("config/Config.toml"))
    }

    /// Loads configuration with a profile overlay (`config/Config.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let figment = Figment::new()
            .merge(Toml::file("config/Config.toml"))
            .merge(Toml::file(format!("config/Config.{profile}.toml")))
            .merge(Env::prefixed("DIVERGENCE_").split("__"))
            .join(Json::file("config/Config.json"));
        Self::extract(figment)
    }

    /// Loads configuration from an explicit TOML file plus the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        Self::extract(Self::base(path))
    }

    fn base(toml_path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Toml::file(toml_path.as_ref()))
            .merge(Env::prefixed("DIVERGENCE_").split("__"))
            .join(Json::file("config/Config.json"))
    }

    fn extract(figment: Figment) -> Result<AppConfig> {
        let config: AppConfig = figment.extract().context("failed to parse configuration")?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use figment::Jail;

    #[test]
    fn test_load_defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [detector]
                parallel = true

                [input]
                price_column = "price"
                "#,
            )?;
            jail.set_env("DIVERGENCE_OUTPUT__FORMAT", "json");

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert!(config.detector.parallel);
            assert_eq!(config.input.price_column, "price");
            assert_eq!(config.input.indicator_column, "indicator");
            assert_eq!(config.output.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_profile_overlay() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/Config.toml", "[input]\nindicator_column = \"rsi\"\n")?;
            jail.create_file(
                "config/Config.research.toml",
                "[input]\nindicator_column = \"macd\"\n",
            )?;

            let config = ConfigLoader::load_with_profile("research").map_err(|e| e.to_string())?;
            assert_eq!(config.input.indicator_column, "macd");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_config_rejected() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/Config.toml", "[input]\nprice_column = \"\"\n")?;

            assert!(ConfigLoader::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = ConfigLoader::load_from("does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
