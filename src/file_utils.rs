use anyhow::{Result, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

// @module: File and stream utilities for corpus and text files

// @const: Characters that cannot appear in a system name used as a file name part
static UNSAFE_NAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s/\\]").expect("static regex is valid")
});

// @const: Language part used when a stream declares no language
pub const UNDETERMINED_LANGUAGE: &str = "und";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Make a system name usable inside a file name
    ///
    /// Whitespace becomes `_`, path separators become `-`.
    pub fn sanitize_system_name(system: &str) -> String {
        UNSAFE_NAME_CHARS
            .replace_all(system, |caps: &regex::Captures| {
                if caps[0].chars().all(char::is_whitespace) { "_" } else { "-" }
            })
            .into_owned()
    }

    // @generates: Output path for one unwrapped stream
    // @params: stem, optional system name, language
    pub fn stream_output_path(stem: &str, system: Option<&str>, language: Option<&str>) -> PathBuf {
        let language = language.unwrap_or(UNDETERMINED_LANGUAGE);
        let file_name = match system {
            Some(system) => format!("{}.{}.{}", stem, Self::sanitize_system_name(system), language),
            None => format!("{}.{}", stem, language),
        };
        PathBuf::from(file_name)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file, or standard input when no path is given
    pub fn read_input(path: Option<&Path>) -> Result<String> {
        match path {
            Some(path) => Self::read_to_string(path),
            None => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read from standard input")?;
                Ok(content)
            }
        }
    }

    /// Read a text file as lines, without line terminators
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = Self::read_to_string(path)?;
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Write one line per entry, each terminated by a newline
    pub fn write_lines<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> Result<()> {
        let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        Self::write_to_file(path, &content)
    }

    /// Write to a file, or standard output when no path is given
    pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
        match path {
            Some(path) => Self::write_to_file(path, content),
            None => {
                let mut stdout = io::stdout();
                stdout
                    .write_all(content.as_bytes())
                    .context("Failed to write to standard output")?;
                stdout.flush().context("Failed to flush standard output")?;
                Ok(())
            }
        }
    }
}
