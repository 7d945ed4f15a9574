#![forbid(unsafe_code)]

use std::fmt;
use std::io;

use zebra_core::ZebraConfigError;

/// Host-side failures: configuration, I/O, encoding and usage.
#[derive(Debug)]
pub enum RenderError {
    /// The shader configuration was rejected.
    Config(Vec<ZebraConfigError>),
    /// A configuration file could not be parsed.
    ConfigFile { path: String, message: String },
    Io(io::Error),
    /// Image encoding failed.
    Image(String),
    /// Invalid host parameters (canvas size, timeline, thread count).
    Usage(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                write!(f, "invalid configuration:")?;
                for e in errors {
                    write!(f, " {e};")?;
                }
                Ok(())
            }
            Self::ConfigFile { path, message } => {
                write!(f, "cannot load config '{path}': {message}")
            }
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Image(msg) => write!(f, "image error: {msg}"),
            Self::Usage(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Vec<ZebraConfigError>> for RenderError {
    fn from(errors: Vec<ZebraConfigError>) -> Self {
        Self::Config(errors)
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(feature = "export")]
impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_listed() {
        let err = RenderError::from(vec![
            ZebraConfigError::new("size", "0", "must be finite and non-zero"),
            ZebraConfigError::new("density", "-1", "must be finite and > 0"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("size=0"), "{msg}");
        assert!(msg.contains("density=-1"), "{msg}");
    }

    #[test]
    fn io_error_is_the_source() {
        use std::error::Error as _;
        let err = RenderError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));
    }
}
