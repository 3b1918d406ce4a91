use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The manager binary could not be found at all.
    ToolNotFound { tool: String },
    /// The manager ran and exited non-zero; `diagnostic` is its stderr text.
    ToolFailed { action: String, diagnostic: String },
    /// `list` ran successfully but no scheduler ids could be parsed out of it.
    NoSchedulers,
    /// The status query could not produce an answer.
    StatusQuery { diagnostic: String },
    Msg(String),
}

impl Error {
    pub fn msg<M: Into<String>>(msg: M) -> Self {
        Self::Msg(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ToolNotFound { tool } => {
                write!(f, "'{tool}' not found; install it or pass --tool")
            }
            Error::ToolFailed { action, diagnostic } => {
                if diagnostic.is_empty() {
                    write!(f, "{action} failed")
                } else {
                    write!(f, "{action} failed: {diagnostic}")
                }
            }
            Error::NoSchedulers => write!(f, "no schedulers detected in list output"),
            Error::StatusQuery { diagnostic } => write!(f, "status query failed: {diagnostic}"),
            Error::Msg(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::msg(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
