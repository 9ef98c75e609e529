use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The platform answered with a body that is not the expected JSON.
    Encoding(serde_json::Error),
    /// Network-level failure reaching the API (refused, timeout, DNS).
    Transport(reqwest::Error),
    /// A credential exchange was rejected or the credential cannot be used.
    Auth(String),
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Encoding(err) => write!(f, "malformed response body: {err}"),
            Error::Transport(err) => write!(f, "transport error: {err}"),
            Error::Auth(msg) => write!(f, "auth error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Encoding(err) => Some(err),
            Error::Transport(err) => Some(err),
            Error::Auth(_) | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}
