/*!
 * Common test utilities for the msgwai test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use msgwai::app_config::{Config, TranslationProvider};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a test file encoded as windows-1251 bytes
pub fn create_cp1251_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(content);
    fs::write(&file_path, bytes)?;
    Ok(file_path)
}

/// Sample dialogue file content in the {id}{speaker}{text} format
pub fn sample_msg_content() -> &'static str {
    "{100}{}{Привет, путник.}\n{101}{}{Что тебе нужно?}\n\n{102}{}{Прощай.}\n"
}

/// Creates a sample dialogue file for testing
pub fn create_test_msg(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, sample_msg_content())
}

/// Config wired to the in-process mock provider with UTF-8 source files
pub fn mock_config() -> Config {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.source_encoding = "utf-8".to_string();
    config
}
