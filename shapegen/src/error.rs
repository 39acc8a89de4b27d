use shapes::config::ConfigError;

pub type GenResult<T> = Result<T, GenError>;

/// Failure kinds for a batch run. Any of them aborts the run whole; there
/// are no retries and no partial archive.
#[derive(thiserror::Error, Debug)]
pub enum GenError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("rendering failed: {0}")]
    Render(#[from] image::ImageError),

    #[error("packaging failed: {0}")]
    Packaging(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        let err = GenError::from(ConfigError::SampleCount);
        assert!(err.to_string().starts_with("invalid config:"));
        let err = GenError::from(std::io::Error::other("disk full"));
        assert!(err.to_string().starts_with("packaging failed:"));
        assert!(err.to_string().contains("disk full"));
    }
}
