//! Notice port for surfacing capability failures to the user.

/// A user-visible notice raised when an action flow fails.
///
/// Every capability failure is caught at the action boundary and converted
/// to one of these; none propagate further. A cancelled capture raises no
/// notice at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Inference succeeded but found no face; the photo stays on screen
    /// without landmarks or overlay.
    NoFaceDetected,
    /// The camera or picker failed.
    DeviceError {
        /// Underlying provider message.
        message: String,
    },
    /// Persisting the capture failed.
    IoError {
        /// Underlying provider message.
        message: String,
    },
    /// The landmark model failed.
    ModelError {
        /// Underlying provider message.
        message: String,
    },
}

impl Notice {
    /// The message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFaceDetected => String::from("No face detected in the photo."),
            Self::DeviceError { message } => format!("Could not capture a photo: {message}"),
            Self::IoError { message } => format!("Could not save the photo: {message}"),
            Self::ModelError { message } => format!("Could not process the photo: {message}"),
        }
    }
}

/// Port for delivering notices to the user.
pub trait NoticeSink: Send + Sync {
    /// Called once per notice, at the action boundary that caught the
    /// failure.
    fn notify(&self, notice: Notice);
}
