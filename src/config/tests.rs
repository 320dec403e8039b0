//! Tests for configuration management module

#[cfg(test)]
mod tests {
    use super::super::*;

    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.library_path, "episodes.json");
        assert_eq!(settings.seek_step_seconds, 10);
    }

    #[test]
    fn test_settings_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");

        let mut settings = Settings::default();
        settings.library_path = "/srv/podcasts/episodes.json".to_string();
        settings.seek_step_seconds = 30;

        settings.save(&config_path)?;

        assert!(config_path.exists());

        let loaded = Settings::load(&config_path)?;

        assert_eq!(loaded.library_path, "/srv/podcasts/episodes.json");
        assert_eq!(loaded.seek_step_seconds, 30);

        Ok(())
    }

    #[test]
    fn test_load_missing_file_yields_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("does-not-exist.json");

        let loaded = Settings::load(&config_path)?;

        assert_eq!(loaded.library_path, "episodes.json");
        assert_eq!(loaded.seek_step_seconds, 10);

        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "library_path": "feed.json" }"#)?;

        let loaded = Settings::load(&config_path)?;

        assert_eq!(loaded.library_path, "feed.json");
        assert_eq!(loaded.seek_step_seconds, 10);

        Ok(())
    }

    #[test]
    fn test_settings_validation() {
        let valid_settings = Settings {
            library_path: "episodes.json".to_string(),
            seek_step_seconds: 10,
        };
        assert!(valid_settings.validate().is_ok());

        let empty_library = Settings {
            library_path: "".to_string(),
            seek_step_seconds: 10,
        };
        assert!(empty_library.validate().is_err());

        let zero_step = Settings {
            library_path: "episodes.json".to_string(),
            seek_step_seconds: 0,
        };
        assert!(zero_step.validate().is_err());
    }

    #[test]
    fn test_default_path() {
        let path = Settings::default_path();
        assert!(path.to_str().unwrap().contains(".config/podcli/config.json"));
    }
}
