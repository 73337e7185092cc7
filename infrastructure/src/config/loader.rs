//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// File names checked in the working directory, in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["portal.toml", ".portal.toml"];

/// Prefix of configuration environment variables
const ENV_PREFIX: &str = "PORTAL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `PORTAL_*` environment variables (nested keys split on `__`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./portal.toml` or `./.portal.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/campus-portal/config.toml`
    /// 5. Default values
    ///
    /// An explicit path that does not exist is an error; the discovered
    /// global and project files are optional.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }

        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load defaults overlaid with a single file, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/campus-portal/config.toml if set,
    /// otherwise falls back to ~/.config/campus-portal/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("campus-portal").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [     ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./portal.toml or ./.portal.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.chat.base_url, "http://localhost:8000");
        assert_eq!(config.auth.provider, "google");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("campus-portal"));
    }

    #[test]
    fn test_file_overrides_defaults_and_merges_role_routes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.toml");
        fs::write(
            &path,
            r#"
[chat]
timeout_seconds = 10

[auth.role_routes]
admin = "/console"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();

        assert_eq!(config.chat.timeout_seconds, Some(10));
        assert_eq!(config.chat.base_url, "http://localhost:8000");
        let routes = config.auth.role_routes().unwrap();
        assert_eq!(routes.get("admin").unwrap(), "/console");
        // Roles not mentioned in the file keep their default routes
        assert_eq!(routes.get("student").unwrap(), "/student/dashboard");
    }

    /// Jail with an empty global config directory, so the user's own
    /// config never leaks into a test.
    fn isolate_global(jail: &mut Jail) {
        let directory = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", directory.display());
    }

    #[test]
    fn test_load_layers_global_then_project() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            fs::create_dir_all(jail.directory().join("campus-portal"))
                .map_err(|e| e.to_string())?;
            jail.create_file(
                "campus-portal/config.toml",
                "[chat]\nbase_url = \"http://global\"\ntimeout_seconds = 7\n",
            )?;
            jail.create_file("portal.toml", "[chat]\nbase_url = \"http://project\"\n")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;

            assert_eq!(config.chat.base_url, "http://project");
            // Keys the project file leaves out still come from the global file
            assert_eq!(config.chat.timeout_seconds, Some(7));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_config_overrides_project_file() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file("portal.toml", "[chat]\nbase_url = \"http://project\"\n")?;
            jail.create_file("custom.toml", "[chat]\nbase_url = \"http://file\"\n")?;

            let path = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;

            assert_eq!(config.chat.base_url, "http://file");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_explicit_config() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file(
                "custom.toml",
                "[chat]\nbase_url = \"http://file\"\n\n[auth]\nprovider = \"github\"\n",
            )?;
            jail.set_env("PORTAL_CHAT__BASE_URL", "http://env");

            let path = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;

            assert_eq!(config.chat.base_url, "http://env");
            assert_eq!(config.auth.provider, "github");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = ConfigLoader::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.toml");
        fs::write(&path, "[chat]\ntimeout_seconds = \"soon\"\n").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
    }
}
