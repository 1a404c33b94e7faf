//! API key sources.
//!
//! A [`Secret`] is resolved to plaintext right before each provider call and
//! the plaintext is dropped when the call returns. None of the implementations
//! print their value through `Debug`.

use std::{fmt, fs, path::PathBuf};

use crate::error::CredentialError;

pub trait Secret: Send + Sync + fmt::Debug {
    fn plaintext(&self) -> Result<String, CredentialError>;
}

impl<S: Secret + ?Sized> Secret for Box<S> {
    fn plaintext(&self) -> Result<String, CredentialError> {
        (**self).plaintext()
    }
}

/// Key read from an environment variable at resolution time.
#[derive(Debug, Clone)]
pub struct EnvSecret {
    name: String,
}

impl EnvSecret {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Secret for EnvSecret {
    fn plaintext(&self) -> Result<String, CredentialError> {
        let value = std::env::var(&self.name).map_err(|source| CredentialError::MissingEnv {
            name: self.name.clone(),
            source,
        })?;

        non_empty(value, || format!("${}", self.name))
    }
}

/// Key held in memory, e.g. loaded from the config file.
#[derive(Clone)]
pub struct StaticSecret(String);

impl StaticSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticSecret(***)")
    }
}

impl Secret for StaticSecret {
    fn plaintext(&self) -> Result<String, CredentialError> {
        non_empty(self.0.clone(), || "static".to_string())
    }
}

/// Key stored as the first line of a file.
#[derive(Debug, Clone)]
pub struct FileSecret {
    path: PathBuf,
}

impl FileSecret {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Secret for FileSecret {
    fn plaintext(&self) -> Result<String, CredentialError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| CredentialError::File {
            path: self.path.display().to_string(),
            source,
        })?;

        let first_line = contents.lines().next().unwrap_or_default().to_string();
        non_empty(first_line, || self.path.display().to_string())
    }
}

fn non_empty(value: String, origin: impl FnOnce() -> String) -> Result<String, CredentialError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::Empty { origin: origin() });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn static_secret_resolves_and_is_redacted() {
        let secret = StaticSecret::new("abc123");
        assert_eq!(secret.plaintext().expect("resolve"), "abc123");
        assert!(!format!("{secret:?}").contains("abc123"));
    }

    #[test]
    fn static_secret_rejects_blank() {
        let err = StaticSecret::new("   ").plaintext().unwrap_err();
        assert!(matches!(err, CredentialError::Empty { .. }));
    }

    #[test]
    fn env_secret_missing_variable() {
        let secret = EnvSecret::new("WEATHER_LOOKUP_TEST_SURELY_UNSET_VAR");
        let err = secret.plaintext().unwrap_err();
        assert!(matches!(err, CredentialError::MissingEnv { ref name, .. } if name == "WEATHER_LOOKUP_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn env_secret_reads_variable() {
        // PATH is set in every test environment we run in.
        let secret = EnvSecret::new("PATH");
        assert!(!secret.plaintext().expect("resolve").is_empty());
    }

    #[test]
    fn file_secret_reads_first_line() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "  file-key  ").expect("write");
        writeln!(file, "ignored").expect("write");

        let secret = FileSecret::new(file.path());
        assert_eq!(secret.plaintext().expect("resolve"), "file-key");
    }

    #[test]
    fn file_secret_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let secret = FileSecret::new(dir.path().join("nope"));
        assert!(matches!(secret.plaintext().unwrap_err(), CredentialError::File { .. }));
    }

    #[test]
    fn boxed_secret_delegates() {
        let secret: Box<dyn Secret> = Box::new(StaticSecret::new("boxed"));
        assert_eq!(secret.plaintext().expect("resolve"), "boxed");
    }

    #[test]
    fn file_secret_empty_file() {
        let file = tempfile::NamedTempFile::new().expect("tempfile");
        let secret = FileSecret::new(file.path());
        assert!(matches!(secret.plaintext().unwrap_err(), CredentialError::Empty { .. }));
    }
}
