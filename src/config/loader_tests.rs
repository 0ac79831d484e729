//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_returns_some_path() {
    let path = default_config_path();
    assert!(
        path.is_some(),
        "default_config_path should return Some on supported platforms"
    );
}

#[test]
fn default_config_path_contains_drillchart_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("drillchart") && path_str.ends_with("config.toml"),
        "Path should contain 'drillchart' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_drillchart_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("drillchart.log"),
        "Default log path should end with 'drillchart.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("drillchart_test_config.toml");

    let toml_content = r##"
log_file_path = "/tmp/drillchart-test.log"

[style]
active_color = "rgb(10 20 30)"
connector_color = "#abc"
corner_radius = 4.5
"##;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    let style = config.style.expect("style table present");
    assert_eq!(style.active_color.as_deref(), Some("rgb(10 20 30)"));
    assert_eq!(style.connector_color.as_deref(), Some("#abc"));
    assert_eq!(style.corner_radius, Some(4.5));
    assert_eq!(style.stroke_width, None);
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/drillchart-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("drillchart_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write config");

    match load_config_file(&config_path) {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown top-level keys should be rejected");

    let result: Result<ConfigFile, _> = toml::from_str("[style]\nline_color = \"#fff\"");
    assert!(result.is_err(), "Unknown style keys should be rejected");
}

#[test]
fn empty_config_file_parses_to_all_none() {
    let config: ConfigFile = toml::from_str("").unwrap();
    assert_eq!(config, ConfigFile::default());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    let resolved = merge_config(None).unwrap();
    assert_eq!(resolved, ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        style: Some(StyleSection {
            connector_color: Some("#000".to_string()),
            corner_radius: Some(6.0),
            stroke_width: Some(1.5),
            ..StyleSection::default()
        }),
        log_file_path: Some(PathBuf::from("/custom/path/app.log")),
    };

    let resolved = merge_config(Some(config_file)).unwrap();
    assert_eq!(resolved.style.connector_color, Color::rgb(0, 0, 0));
    assert_eq!(resolved.style.corner_radius, 6.0);
    assert_eq!(resolved.style.stroke_width, 1.5);
    assert_eq!(resolved.log_file_path, PathBuf::from("/custom/path/app.log"));
    assert_eq!(
        resolved.style.active_color,
        StyleOptions::default().active_color,
        "Unset fields keep defaults"
    );
}

#[test]
fn merge_config_derives_background_from_configured_active_color() {
    let config_file = ConfigFile {
        style: Some(StyleSection {
            active_color: Some("#ff0000".to_string()),
            ..StyleSection::default()
        }),
        log_file_path: None,
    };

    let resolved = merge_config(Some(config_file)).unwrap();
    assert_eq!(
        resolved.style.background_color.to_string(),
        "rgba(255, 0, 0, 0.06)"
    );
}

#[test]
fn merge_config_reports_offending_color_key() {
    let config_file = ConfigFile {
        style: Some(StyleSection {
            card_color: Some("not-a-color".to_string()),
            ..StyleSection::default()
        }),
        log_file_path: None,
    };

    let err = merge_config(Some(config_file)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidColor {
            field: "style.card_color".to_string(),
            source: ColorError("not-a-color".to_string()),
        }
    );
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(drillchart_style_env)]
fn apply_env_overrides_no_change_when_env_vars_not_set() {
    let _a = EnvGuard::new(ACTIVE_COLOR_ENV);
    let _c = EnvGuard::new(CONNECTOR_COLOR_ENV);
    let _r = EnvGuard::new(CORNER_RADIUS_ENV);

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone()).unwrap();

    assert_eq!(result, base, "Config should be unchanged when no env var is set");
}

#[test]
#[serial(drillchart_style_env)]
fn apply_env_overrides_respects_color_and_radius_vars() {
    let _a = EnvGuard::new(ACTIVE_COLOR_ENV);
    let _c = EnvGuard::new(CONNECTOR_COLOR_ENV);
    let _r = EnvGuard::new(CORNER_RADIUS_ENV);

    env::set_var(ACTIVE_COLOR_ENV, "#0000ff");
    env::set_var(CONNECTOR_COLOR_ENV, "rgb(1, 2, 3)");
    env::set_var(CORNER_RADIUS_ENV, " 8 ");

    let result = apply_env_overrides(ResolvedConfig::default()).unwrap();

    assert_eq!(result.style.active_color, Color::rgb(0, 0, 255));
    assert_eq!(
        result.style.background_color,
        Color::rgb(0, 0, 255).with_alpha(0.06),
        "Derived background follows the env active color"
    );
    assert_eq!(result.style.connector_color, Color::rgb(1, 2, 3));
    assert_eq!(result.style.corner_radius, 8.0);
}

#[test]
#[serial(drillchart_style_env)]
fn apply_env_overrides_rejects_bad_radius() {
    let _r = EnvGuard::new(CORNER_RADIUS_ENV);
    env::set_var(CORNER_RADIUS_ENV, "round");

    let err = apply_env_overrides(ResolvedConfig::default()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidNumber {
            field: CORNER_RADIUS_ENV.to_string(),
            value: "round".to_string(),
        }
    );
}

#[test]
#[serial(drillchart_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);

    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("drillchart_test_explicit.toml");
    let env_path = temp_dir.join("drillchart_test_env.toml");

    fs::write(&explicit_path, "[style]\ncorner_radius = 1").unwrap();
    fs::write(&env_path, "[style]\ncorner_radius = 2").unwrap();
    env::set_var(CONFIG_ENV, env_path.to_str().unwrap());

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.style.unwrap().corner_radius, Some(1.0));

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(drillchart_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);

    let env_path = env::temp_dir().join("drillchart_test_env_only.toml");
    fs::write(&env_path, "[style]\ncorner_radius = 3").unwrap();
    env::set_var(CONFIG_ENV, env_path.to_str().unwrap());

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.style.unwrap().corner_radius, Some(3.0));

    fs::remove_file(env_path).ok();
}

#[test]
fn apply_cli_overrides_radius_override() {
    let base = ResolvedConfig::default();
    let result = apply_cli_overrides(base.clone(), Some(5.0));
    assert_eq!(result.style.corner_radius, 5.0);
    assert_eq!(result.style.active_color, base.style.active_color);
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None), base);
}

#[test]
#[serial(drillchart_style_env)]
fn precedence_chain_file_then_env_then_cli() {
    let _r = EnvGuard::new(CORNER_RADIUS_ENV);
    let _a = EnvGuard::new(ACTIVE_COLOR_ENV);
    let _c = EnvGuard::new(CONNECTOR_COLOR_ENV);

    let config_file = ConfigFile {
        style: Some(StyleSection {
            corner_radius: Some(2.0),
            connector_color: Some("#111111".to_string()),
            ..StyleSection::default()
        }),
        log_file_path: None,
    };
    let merged = merge_config(Some(config_file)).unwrap();
    assert_eq!(merged.style.corner_radius, 2.0);

    env::set_var(CORNER_RADIUS_ENV, "4");
    let with_env = apply_env_overrides(merged).unwrap();
    assert_eq!(with_env.style.corner_radius, 4.0);
    assert_eq!(with_env.style.connector_color, Color::rgb(17, 17, 17));

    let with_cli = apply_cli_overrides(with_env, Some(9.0));
    assert_eq!(with_cli.style.corner_radius, 9.0);
}
