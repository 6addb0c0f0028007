//! The raw, single-owner protocol engine (spec §2 component 3, §3
//! `Connection`). Exactly one command may be in flight; callers that need
//! to share a connection across tasks go through [`crate::wrapper`]
//! instead.

mod admin;
mod establish;
mod query;
mod statement;

pub use statement::Statement;
pub(crate) use query::query_on;
pub(crate) use statement::execute_on;

use std::collections::HashMap;

use tokio::io::{ReadHalf, WriteHalf};

use crate::error::{protocol_err, Error, Result, UsageError};
use crate::io::{PacketReader, PacketWriter, TransportStream};
use crate::options::MySqlConnectOptions;
use crate::protocol::com::{ComInitDb, ComPing, ComQuit};
use crate::protocol::{AuthPlugin, Capabilities, ColumnCount, OkPacket, Status};

/// A prepared statement's server-side state, keyed by the stable client
/// handle so reconnect can patch it in place (spec §4.3.7 / §9 Design
/// Notes: "the live-statement map indexes by stable handle, not by the
/// mutable server-side id").
pub(crate) struct LiveStatement {
    pub(crate) sql: String,
    pub(crate) server_id: u32,
    pub(crate) param_count: u16,
    pub(crate) rebind: bool,
}

/// A logical session bound to a transport endpoint (spec §3).
pub struct Connection {
    pub(crate) reader: PacketReader<ReadHalf<TransportStream>>,
    pub(crate) writer: PacketWriter<WriteHalf<TransportStream>>,
    pub(crate) capabilities: Capabilities,
    pub(crate) server_version: Box<str>,
    pub(crate) thread_id: u32,
    pub(crate) server_collation: u8,
    pub(crate) status: Status,
    pub(crate) auth_plugin: AuthPlugin,
    pub(crate) database: Option<String>,
    pub(crate) statements: HashMap<u64, LiveStatement>,
    pub(crate) next_handle: u64,
    pub(crate) unread_rows: bool,
    pub(crate) closed: bool,
    pub(crate) options: MySqlConnectOptions,
}

/// The classified first packet of a command's response (spec §4.3.3). EOF
/// never appears here — it only ever terminates a field or row block, not
/// a command as a whole.
pub(crate) enum RawResponse {
    Ok(OkPacket),
    ResultSetHeader(ColumnCount),
}

impl Connection {
    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// True once the in-transaction status bit is set (spec §4.5 /
    /// `Transaction`).
    pub fn in_transaction(&self) -> bool {
        self.status.in_transaction()
    }

    /// Marks a session-corrupting error and returns it unchanged, so call
    /// sites can write `self.reader.read_packet().await.map_err(|e| self.fail(e))?`.
    /// Framing and Protocol errors corrupt the session (spec §7); Server
    /// and Usage errors do not.
    pub(crate) fn fail(&mut self, err: Error) -> Error {
        if err.is_session_corrupting() {
            self.closed = true;
        }
        err
    }

    pub(crate) fn check_ready(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Usage(UsageError::ConnectionClosed));
        }
        if self.unread_rows {
            return Err(Error::Usage(UsageError::UnreadRows));
        }
        Ok(())
    }

    /// Zeroes the sequence counter and writes one command packet (spec
    /// §4.2 "Sequence discipline", §4.3.2 "Sending always zeroes the
    /// sequence counter first"). The reader and writer track one logical
    /// counter between them — it increments per frame "in either
    /// direction" — so the reader's expectation is seeded from wherever
    /// the writer left off rather than independently reset to 0.
    pub(crate) async fn send_command(&mut self, payload: &[u8]) -> Result<()> {
        self.writer.reset_seq();

        #[cfg(feature = "packet-trace")]
        if self.options.debug {
            tracing::trace!(opcode = ?payload.first(), len = payload.len(), "send command");
        }

        self.writer
            .write_packet(payload)
            .await
            .map_err(|e| self.fail(e))?;
        self.writer.flush().await.map_err(|e| self.fail(e))?;
        self.reader.set_seq_no(self.writer.seq_no());
        Ok(())
    }

    /// Reads and classifies the next response packet (spec §4.3.3).
    pub(crate) async fn read_response(&mut self) -> Result<RawResponse> {
        let packet = self.reader.read_packet().await.map_err(|e| self.fail(e))?;

        match packet.first().copied() {
            Some(0xFF) => {
                let err = crate::error::MySqlDatabaseError::read(&packet).map_err(|e| self.fail(e))?;
                Err(Error::Server(err))
            }
            Some(b) if (0x01..=0xFA).contains(&b) => {
                let cc = ColumnCount::read(&packet).map_err(|e| self.fail(e))?;
                Ok(RawResponse::ResultSetHeader(cc))
            }
            Some(0x00) | Some(0xFE) => {
                let ok = OkPacket::read(&packet).map_err(|e| self.fail(e))?;
                Ok(RawResponse::Ok(ok))
            }
            _ => Err(self.fail(protocol_err!("empty response packet"))),
        }
    }

    pub async fn ping(&mut self) -> Result<()> {
        self.check_ready()?;

        let mut buf = Vec::new();
        ComPing.encode(&mut buf);
        self.send_command(&buf).await?;

        match self.read_response().await? {
            RawResponse::Ok(ok) => {
                self.status = ok.status;
                Ok(())
            }
            RawResponse::ResultSetHeader(_) => {
                Err(self.fail(protocol_err!("unexpected result set in response to COM_PING")))
            }
        }
    }

    pub async fn use_db(&mut self, schema: &str) -> Result<()> {
        self.check_ready()?;

        let mut buf = Vec::new();
        ComInitDb { schema }.encode(&mut buf);
        self.send_command(&buf).await?;

        match self.read_response().await? {
            RawResponse::Ok(ok) => {
                self.status = ok.status;
                self.database = Some(schema.to_owned());
                Ok(())
            }
            RawResponse::ResultSetHeader(_) => {
                Err(self.fail(protocol_err!("unexpected result set in response to COM_INIT_DB")))
            }
        }
    }

    /// Sends `COM_QUIT` and marks the connection closed. Best-effort: the
    /// server never replies, and a transport error here is not reported —
    /// the connection is being discarded either way.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        let mut buf = Vec::new();
        ComQuit.encode(&mut buf);
        let _ = self.send_command(&buf).await;
        self.closed = true;
        tracing::debug!(thread_id = self.thread_id, "connection closed");
        Ok(())
    }
}
