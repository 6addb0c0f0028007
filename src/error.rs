//! Error taxonomy for the driver (spec §7).
//!
//! Four kinds corrupt the session and must be followed by a close:
//! [`Error::Io`], [`Error::Framing`], [`Error::Protocol`], and any
//! [`Error::Server`] encountered mid-result-set. [`Error::Usage`] never
//! touches the wire at all.

use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Short read, closed connection, or unexpected EOF on the socket.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    /// Sequence-number mismatch, frame over-run, or a malformed packet.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Unknown response byte, premature EOF, duplicate OK, unsupported
    /// pre-4.1 handshake, or an unknown binary column type.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An ERR packet returned by the server.
    #[error(transparent)]
    Server(#[from] MySqlDatabaseError),

    /// Misuse of the driver API that never reached the wire.
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
}

impl Error {
    pub(crate) fn protocol(msg: impl Into<String>) -> Self {
        Error::Protocol(msg.into())
    }

    /// True for the two kinds that §7 says corrupt the session and force a
    /// close before the error may be surfaced further.
    pub fn is_session_corrupting(&self) -> bool {
        matches!(self, Error::Framing(_) | Error::Protocol(_))
    }

    /// True for the kind the auto-reconnect wrapper (an external
    /// collaborator per spec §1) should treat as retryable.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("sequence number mismatch: expected {expected}, received {received}")]
    SequenceMismatch { expected: u8, received: u8 },

    #[error("packet writer over-run: declared {declared} bytes, wrote {written}")]
    WriterOverrun { declared: usize, written: usize },

    #[error("malformed packet: {0}")]
    Malformed(&'static str),

    #[error("length-coded NULL encountered where a value was required")]
    UnexpectedNull,

    #[error("unexpected end of stream while reading a packet")]
    UnexpectedEof,
}

#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("operation attempted on a closed connection")]
    ConnectionClosed,

    #[error("a command was issued while a previous result set still has unread rows")]
    UnreadRows,

    #[error("expected {expected} parameters, got {got}")]
    ParamCountMismatch { expected: usize, got: usize },

    #[error("host type has no MySQL parameter mapping: {0}")]
    UnmappableType(&'static str),

    #[error("invalid chunk size for SendLongData: {0}")]
    InvalidChunkSize(usize),

    #[error("transaction already committed or rolled back")]
    TransactionFinished,

    #[error("statement does not belong to this connection")]
    ForeignStatement,
}

/// A decoded ERR packet (spec §4.3.3 / §7 "Server").
#[derive(Debug, Clone)]
pub struct MySqlDatabaseError {
    pub code: u16,
    pub sql_state: Box<str>,
    pub message: Box<str>,
}

impl fmt::Display for MySqlDatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ERROR {} ({}): {}",
            self.code, self.sql_state, self.message
        )
    }
}

impl std::error::Error for MySqlDatabaseError {}

#[allow(unused_macros)]
macro_rules! protocol_err {
    ($($args:tt)*) => {
        $crate::error::Error::protocol(format!($($args)*))
    };
}
pub(crate) use protocol_err;
