use anyhow::{Result, anyhow, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use encoding_rs::Encoding;
use log::warn;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Whether a path names a `.msg` file (extension compared case-insensitively)
    pub fn is_msg_path<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("msg"))
    }

    /// Find the `.msg` files directly inside a directory (non-recursive),
    /// sorted by path for deterministic processing order
    pub fn find_msg_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_msg_path(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file and decode it with the given encoding label.
    ///
    /// Undecodable byte sequences are replaced rather than failing the read;
    /// a warning is logged so a wrong encoding setting is still visible.
    pub fn read_with_encoding<P: AsRef<Path>>(path: P, encoding_label: &str) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        let encoding = Encoding::for_label(encoding_label.as_bytes())
            .ok_or_else(|| anyhow!("Unknown source encoding: {}", encoding_label))?;

        let (decoded, _, had_errors) = encoding.decode(&bytes);
        if had_errors {
            warn!("Replacement characters while decoding {:?} as {}", path, encoding_label);
        }

        Ok(decoded.into_owned())
    }

    /// Write a string to a file as UTF-8, creating parent directories as needed
    pub fn write_utf8<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Output filename for a translated file
    // @params: input_file, model, temperature
    pub fn translated_filename<P: AsRef<Path>>(input_file: P, model: &str, temperature: f32) -> String {
        let input_file = input_file.as_ref();

        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        let ext = input_file
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        format!("{}-[{}]-[t={}]{}", stem, model, temperature, ext)
    }

    /// Resolve where the translation of `input_file` is written.
    ///
    /// A `.msg` output argument is taken literally; anything else is treated
    /// as a directory and joined with the generated translated filename. The
    /// generated name is derived from source name, model and temperature, so
    /// concurrent workers never collide.
    pub fn resolve_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output: P2,
        model: &str,
        temperature: f32,
    ) -> PathBuf {
        let output = output.as_ref();

        if Self::is_msg_path(output) {
            output.to_path_buf()
        } else {
            output.join(Self::translated_filename(input_file, model, temperature))
        }
    }
}
