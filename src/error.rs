use thiserror::Error;

/// Input rejected before any network call or write happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all configuration fields.")]
    IncompleteConfig,
    #[error("Please enter the contact's full name.")]
    MissingContactName,
}

/// Any non-success response or transport failure from the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        Self::new(err.status().map(|s| s.as_u16()), err.to_string())
    }

    /// Message for a failed response whose body carried no usable error text.
    pub fn generic(status: u16) -> Self {
        Self::new(Some(status), format!("HTTP error! status: {}", status))
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no writable location for the session file")]
    NoLocation,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("could not encode session: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("The compression library is unavailable: {0}")]
    CapabilityUnavailable(String),
    #[error("Could not read asset {name}: {reason}")]
    Asset { name: String, reason: String },
    #[error("Could not build the archive: {0}")]
    Archive(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::UnsupportedArchive(reason) => {
                ExportError::CapabilityUnavailable(reason.to_string())
            }
            zip::result::ZipError::Io(e) => ExportError::Io(e),
            other => ExportError::Archive(other.to_string()),
        }
    }
}
