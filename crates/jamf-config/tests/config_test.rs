#![allow(clippy::unwrap_used)]
// Config loading and credential resolution tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Jail;
use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;

use jamf_api::TlsMode;
use jamf_config::{
    Config, ConfigError, Defaults, PASSWORD_ENV, Profile, USERNAME_ENV, load_config_from,
    profile_to_settings, transport_for,
};

const SAMPLE: &str = r#"
default_profile = "prod"

[defaults]
timeout = 45

[profiles.prod]
url = "https://example.jamfcloud.com/"
username = "api-reader"
password_env = "JAMF_CONFIG_TEST_PROD_PASSWORD"

[profiles.lab]
url = "https://jss.lab.internal:8443"
username = "lab-admin"
password = "lab-secret"
insecure = true
timeout = 5
"#;

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

// ── Loading ─────────────────────────────────────────────────────────

// Loading merges the process environment, so these run inside a `Jail`
// to stay isolated from tests that set `JAMF_` variables.

#[test]
fn test_profiles_load_from_toml() {
    Jail::expect_with(|_| {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&write_config(dir.path(), SAMPLE)).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("prod"));
        assert_eq!(cfg.defaults.timeout, 45);
        assert_eq!(cfg.defaults.output, "table");
        assert!(!cfg.defaults.insecure);
        assert_eq!(cfg.profiles.len(), 2);
        assert_eq!(cfg.profiles["lab"].timeout, Some(5));
        Ok(())
    });
}

#[test]
fn test_missing_file_yields_defaults() {
    Jail::expect_with(|jail| {
        let cfg = load_config_from(&jail.directory().join("absent.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 60);
        assert!(cfg.profiles.is_empty());
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", SAMPLE)?;
        jail.set_env("JAMF_DEFAULTS__TIMEOUT", 10);
        jail.set_env("JAMF_DEFAULT_PROFILE", "lab");

        let cfg = load_config_from(&jail.directory().join("config.toml")).unwrap();

        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
        Ok(())
    });
}

// ── Profile selection ───────────────────────────────────────────────

#[test]
fn test_profile_selection_falls_back_to_default() {
    let cfg: Config = toml::from_str(SAMPLE).unwrap();

    let (name, profile) = cfg.profile(None).unwrap();
    assert_eq!(name, "prod");
    assert_eq!(profile.username.as_deref(), Some("api-reader"));

    let (name, _) = cfg.profile(Some("lab")).unwrap();
    assert_eq!(name, "lab");
}

#[test]
fn test_unknown_profile_lists_available() {
    let cfg: Config = toml::from_str(SAMPLE).unwrap();

    match cfg.profile(Some("staging")).unwrap_err() {
        ConfigError::ProfileNotFound { name, available } => {
            assert_eq!(name, "staging");
            assert_eq!(available, "lab, prod");
        }
        other => panic!("expected ProfileNotFound, got: {other:?}"),
    }
}

// ── Settings ────────────────────────────────────────────────────────

#[test]
fn test_password_env_takes_precedence() {
    Jail::expect_with(|jail| {
        jail.set_env("JAMF_CONFIG_TEST_PROD_PASSWORD", "from-env");

        let cfg: Config = toml::from_str(SAMPLE).unwrap();
        let (name, profile) = cfg.profile(None).unwrap();
        let settings = profile_to_settings(profile, name, &cfg.defaults).unwrap();

        assert_eq!(settings.base_url, "https://example.jamfcloud.com");
        assert_eq!(settings.credentials.username, "api-reader");
        assert_eq!(settings.credentials.password.expose_secret(), "from-env");
        assert_eq!(settings.transport.timeout, Duration::from_secs(45));
        assert_eq!(settings.transport.tls, TlsMode::System);
        Ok(())
    });
}

#[test]
fn test_plaintext_password_is_last_resort() {
    let cfg: Config = toml::from_str(SAMPLE).unwrap();
    let (name, profile) = cfg.profile(Some("lab")).unwrap();
    let settings = profile_to_settings(profile, name, &cfg.defaults).unwrap();

    if std::env::var_os(PASSWORD_ENV).is_none() {
        assert_eq!(settings.credentials.password.expose_secret(), "lab-secret");
    }
    assert_eq!(settings.transport.tls, TlsMode::DangerAcceptInvalid);
    assert_eq!(settings.transport.timeout, Duration::from_secs(5));
}

#[test]
fn test_missing_username_is_no_credentials() {
    if std::env::var_os(USERNAME_ENV).is_some() {
        return;
    }
    let profile = Profile {
        url: "https://example.jamfcloud.com".into(),
        password: Some("pw".into()),
        ..Profile::default()
    };

    let err = profile_to_settings(&profile, "prod", &Defaults::default()).unwrap_err();
    assert!(
        matches!(err, ConfigError::NoCredentials { ref profile } if profile == "prod"),
        "expected NoCredentials, got: {err:?}"
    );
}

#[test]
fn test_invalid_url_is_rejected() {
    for url in ["not a url", "ftp://jss.example.com"] {
        let profile = Profile {
            url: url.into(),
            username: Some("api-reader".into()),
            password: Some("pw".into()),
            ..Profile::default()
        };

        let err = profile_to_settings(&profile, "prod", &Defaults::default()).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "url"),
            "{url}: expected Validation, got: {err:?}"
        );
    }
}

#[test]
fn test_tls_mode_selection() {
    let defaults = Defaults::default();

    let custom_ca = Profile {
        ca_cert: Some(PathBuf::from("/etc/ssl/jamf.pem")),
        ..Profile::default()
    };
    assert_eq!(
        transport_for(&custom_ca, &defaults).tls,
        TlsMode::CustomCa(PathBuf::from("/etc/ssl/jamf.pem"))
    );

    let insecure_default = Defaults {
        insecure: true,
        ..Defaults::default()
    };
    assert_eq!(
        transport_for(&custom_ca, &insecure_default).tls,
        TlsMode::DangerAcceptInvalid
    );

    let opted_back_in = Profile {
        insecure: Some(false),
        ..Profile::default()
    };
    assert_eq!(transport_for(&opted_back_in, &insecure_default).tls, TlsMode::System);
    assert_eq!(
        transport_for(&opted_back_in, &defaults).timeout,
        Duration::from_secs(60)
    );
}

#[test]
fn test_redacted_toml_masks_passwords() {
    let cfg: Config = toml::from_str(SAMPLE).unwrap();
    let rendered = cfg.to_redacted_toml().unwrap();

    assert!(!rendered.contains("lab-secret"), "{rendered}");
    assert!(rendered.contains("********"), "{rendered}");
    assert!(rendered.contains("JAMF_CONFIG_TEST_PROD_PASSWORD"), "{rendered}");
}
