use bridge_traits::error::BridgeError;
use core_forms::error::FormsError;
use core_forms::source::FormSourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// The form server could not be queried; fatal to the pass.
    #[error("Form source error: {0}")]
    Source(#[from] FormSourceError),

    /// The local form library failed.
    #[error("Form library error: {0}")]
    Forms(#[from] FormsError),

    /// A platform bridge failed (file I/O during install).
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// A form could not be installed.
    #[error("Download failed for form {form_id}: {message}")]
    Download { form_id: String, message: String },
}

pub type Result<T> = std::result::Result<T, SyncError>;
