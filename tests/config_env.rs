//! `config::load` reads process-wide environment variables, so every case
//! lives in one test and runs in order.

use pretty_assertions::assert_eq;
use topic_muse::{Error, config};

mod common;
use common::test_utils::{INVALID_SLIDER_YAML, SAMPLE_CONFIG_YAML};

fn set_env(key: &str, value: impl AsRef<std::ffi::OsStr>) {
    // SAFETY: this binary has a single test, so nothing reads the
    // environment concurrently.
    unsafe { std::env::set_var(key, value) }
}

fn clear_env(key: &str) {
    // SAFETY: as in `set_env`.
    unsafe { std::env::remove_var(key) }
}

#[tokio::test]
async fn test_load_honours_environment() {
    let dir = tempfile::tempdir().unwrap();
    let sample = dir.path().join("sample.yaml");
    let invalid = dir.path().join("invalid.yaml");
    tokio::fs::write(&sample, SAMPLE_CONFIG_YAML).await.unwrap();
    tokio::fs::write(&invalid, INVALID_SLIDER_YAML).await.unwrap();
    clear_env("API_BASE_URL");

    // An explicit path that does not exist is an error, not defaults.
    set_env("CONFIG_PATH", dir.path().join("absent.yaml"));
    let result = config::load().await;
    assert!(matches!(result, Err(Error::Io(_))), "got {result:?}");

    // The file is read from CONFIG_PATH.
    set_env("CONFIG_PATH", &sample);
    let loaded = config::load().await.unwrap();
    assert_eq!(loaded.api.base_url, "http://127.0.0.1:5050/");
    assert_eq!(loaded.story.max_tokens.max, 1024.0);

    // API_BASE_URL wins over the file.
    set_env("API_BASE_URL", "http://override.test");
    let loaded = config::load().await.unwrap();
    assert_eq!(loaded.api.base_url, "http://override.test");
    assert_eq!(loaded.logs.level, "debug");

    // Validation runs on the merged result.
    set_env("API_BASE_URL", "  ");
    let result = config::load().await;
    assert!(matches!(result, Err(Error::Config(_))), "got {result:?}");

    clear_env("API_BASE_URL");
    set_env("CONFIG_PATH", &invalid);
    let result = config::load().await;
    assert!(matches!(result, Err(Error::Config(_))), "got {result:?}");

    clear_env("CONFIG_PATH");
}
