use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfregError {
    #[error("Config name cannot be empty")]
    InvalidName,

    #[error("Config file path cannot be empty")]
    InvalidPath,

    #[error("No config registered under '{0}'")]
    NotRegistered(String),

    #[error("Failed to write {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_registered_names_the_config() {
        let err = ConfregError::NotRegistered("worlds".into());
        assert!(err.to_string().contains("worlds"));
    }

    #[test]
    fn io_error_includes_path() {
        let err = ConfregError::IoError {
            path: "/data/config.toml".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("config.toml"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn invalid_name_formats() {
        assert!(ConfregError::InvalidName.to_string().contains("empty"));
    }
}
