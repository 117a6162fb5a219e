use std::env;
use std::sync::{Mutex, OnceLock};

use quotewire_cli::commands::{config, submit};

#[test]
fn submit_returns_config_failure_without_credentials() {
    with_env(&[], || {
        let result = submit::run(submit::SubmitArgs { demo: true, ..Default::default() });

        assert_eq!(result.exit_code, 2, "expected config validation failure code");
        assert!(
            result.output.contains("config validation failed"),
            "output should explain the config failure, got: {}",
            result.output
        );
    });
}

#[test]
fn submit_reports_missing_fields_by_flag_name() {
    with_env(
        &[
            ("QUOTEWIRE_SERVICE_USERNAME", "test-user"),
            ("QUOTEWIRE_SERVICE_PASSWORD", "test-pass"),
        ],
        || {
            let result = submit::run(submit::SubmitArgs::default());

            assert_eq!(result.exit_code, 2, "expected invalid request failure code");
            assert!(
                result.output.contains("--name"),
                "output should name the first missing flag, got: {}",
                result.output
            );
            assert!(result.output.contains("--demo"), "output should point at --demo");
        },
    );
}

#[test]
fn config_redacts_credentials_and_attributes_sources() {
    with_env(
        &[
            ("QUOTEWIRE_SERVICE_USERNAME", "super-secret-user"),
            ("QUOTEWIRE_SERVICE_PASSWORD", "super-secret-pass"),
        ],
        || {
            let output = config::run();

            assert!(output.contains("service.endpoint_url"));
            assert!(output.contains("- service.username = <redacted>"));
            assert!(output.contains("- service.password = <redacted>"));
            assert!(!output.contains("super-secret-user"));
            assert!(!output.contains("super-secret-pass"));
            assert!(output.contains("env (QUOTEWIRE_SERVICE_USERNAME)"));
            assert!(output.contains("(source: default)"));
        },
    );
}

#[test]
fn config_reports_validation_failure_when_credentials_are_absent() {
    with_env(&[], || {
        let output = config::run();
        assert!(output.contains("config validation failed"));
    });
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "QUOTEWIRE_SERVICE_ENDPOINT_URL",
        "QUOTEWIRE_SERVICE_USERNAME",
        "QUOTEWIRE_SERVICE_PASSWORD",
        "QUOTEWIRE_HTTP_CONNECT_TIMEOUT_SECS",
        "QUOTEWIRE_HTTP_COMPRESSION",
        "QUOTEWIRE_HTTP_TRACE",
        "QUOTEWIRE_LOGGING_LEVEL",
        "QUOTEWIRE_LOGGING_FORMAT",
        "QUOTEWIRE_LOG_LEVEL",
        "QUOTEWIRE_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
