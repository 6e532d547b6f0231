use crate::engine::EngineError;
use crate::template::TemplateError;

/// An error returned by replace operations.
///
/// A replacement can fail in two ways: the engine reports a failure while
/// searching for the next match, or the replacement template is malformed.
/// Either way the whole operation fails immediately and no partial output
/// is returned.
#[derive(Clone, Debug)]
pub enum Error {
    /// The underlying match engine failed.
    Engine(EngineError),
    /// The replacement template could not be compiled.
    Template(TemplateError),
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Error {
        Error::Engine(err)
    }
}

impl From<TemplateError> for Error {
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Engine(ref err) => Some(err),
            Error::Template(ref err) => Some(err),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Error::Engine(ref err) => err.fmt(f),
            Error::Template(ref err) => err.fmt(f),
        }
    }
}
