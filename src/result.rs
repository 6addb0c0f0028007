//! Result sets (spec §3 `Result`, §4.3.5 "Row Streaming & Multi-Result").
//!
//! The streaming state machine lives in [`ResultState`], which takes the
//! connection as a parameter on every call rather than storing a
//! reference to it. [`ResultSet`] pairs it with a borrowed
//! [`crate::connection::Connection`]; [`crate::wrapper::SharedResultSet`]
//! pairs the same state with an owned mutex guard instead, without
//! needing a self-referential struct.
//!
//! Dropping a [`ResultSet`] before draining does not lose track of that
//! fact: `Connection::unread_rows` is a plain owned field that outlives
//! the borrow and is checked by every subsequent command, so the
//! connection refuses new work until the caller drains the set (or calls
//! [`ResultSet::end`]).

use crate::connection::Connection;
use crate::error::{Error, Result, UsageError};
use crate::logger::QueryLogger;
use crate::protocol::{ColumnDefinition, EofPacket, OkPacket, Row, Status, TypeId};

enum Current {
    Ok(OkPacket),
    Rows,
}

async fn load_current(conn: &mut Connection, binary: bool) -> Result<(Current, Vec<ColumnDefinition>)> {
    match conn.read_response().await? {
        crate::connection::RawResponse::Ok(ok) => {
            conn.status = ok.status;
            Ok((Current::Ok(ok), Vec::new()))
        }
        crate::connection::RawResponse::ResultSetHeader(cc) => {
            let mut fields = Vec::with_capacity(cc.columns as usize);
            for _ in 0..cc.columns {
                let packet = conn.reader.read_packet().await.map_err(|e| conn.fail(e))?;
                fields.push(ColumnDefinition::read(&packet).map_err(|e| conn.fail(e))?);
            }

            let packet = conn.reader.read_packet().await.map_err(|e| conn.fail(e))?;
            let eof = EofPacket::read(&packet).map_err(|e| conn.fail(e))?;
            conn.status = eof.status;

            let _ = binary;
            Ok((Current::Rows, fields))
        }
    }
}

/// The part of a result set's state that does not borrow the connection
/// (spec §4.3.5). Reused by both the raw and thread-safe APIs.
pub(crate) struct ResultState {
    binary: bool,
    fields: Vec<ColumnDefinition>,
    types: Vec<TypeId>,
    current: Current,
    rows_done: bool,
    logger: QueryLogger,
}

impl ResultState {
    pub(crate) async fn new(conn: &mut Connection, binary: bool, label: &str) -> Result<Self> {
        conn.unread_rows = true;
        let mut logger = QueryLogger::new(label);
        let (current, fields) = load_current(conn, binary).await?;
        let rows_done = matches!(current, Current::Ok(_));
        let types = fields.iter().map(|f| f.type_id).collect();

        if let Current::Ok(ok) = &current {
            logger.add_rows_affected(ok.affected_rows);
        }
        if rows_done && !conn.status.has_more_results() {
            conn.unread_rows = false;
        }

        Ok(Self {
            binary,
            fields,
            types,
            current,
            rows_done,
            logger,
        })
    }

    pub(crate) fn fields(&self) -> &[ColumnDefinition] {
        &self.fields
    }

    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == Some(name))
    }

    pub(crate) fn affected_rows(&self) -> u64 {
        match &self.current {
            Current::Ok(ok) => ok.affected_rows,
            Current::Rows => 0,
        }
    }

    pub(crate) fn last_insert_id(&self) -> u64 {
        match &self.current {
            Current::Ok(ok) => ok.last_insert_id,
            Current::Rows => 0,
        }
    }

    pub(crate) fn warnings(&self) -> u16 {
        match &self.current {
            Current::Ok(ok) => ok.warnings,
            Current::Rows => 0,
        }
    }

    pub(crate) fn info(&self) -> Option<&str> {
        match &self.current {
            Current::Ok(ok) if !ok.info.is_empty() => Some(&ok.info),
            _ => None,
        }
    }

    pub(crate) async fn next_row(&mut self, conn: &mut Connection) -> Result<Option<Row>> {
        if self.rows_done {
            return Ok(None);
        }

        let packet = conn.reader.read_packet().await.map_err(|e| conn.fail(e))?;

        if packet.first() == Some(&0xFF) {
            self.rows_done = true;
            let err = crate::error::MySqlDatabaseError::read(&packet).map_err(|e| conn.fail(e))?;
            return Err(Error::Server(err));
        }

        if EofPacket::looks_like_eof(&packet) {
            let eof = EofPacket::read(&packet).map_err(|e| conn.fail(e))?;
            conn.status = eof.status;
            self.rows_done = true;

            if !conn.status.has_more_results() {
                conn.unread_rows = false;
            }
            return Ok(None);
        }

        let row = if self.binary {
            Row::decode_binary(&packet, &self.types).map_err(|e| conn.fail(e))?
        } else {
            Row::decode_text(&packet, self.fields.len()).map_err(|e| conn.fail(e))?
        };
        self.logger.increment_rows_returned();
        Ok(Some(row))
    }

    pub(crate) async fn next_result(&mut self, conn: &mut Connection) -> Result<bool> {
        if !self.rows_done {
            return Err(Error::Usage(UsageError::UnreadRows));
        }
        if !conn.status.has_more_results() {
            return Ok(false);
        }

        let (current, fields) = load_current(conn, self.binary).await?;
        self.rows_done = matches!(current, Current::Ok(_));
        self.types = fields.iter().map(|f| f.type_id).collect();
        self.fields = fields;
        if let Current::Ok(ok) = &current {
            self.logger.add_rows_affected(ok.affected_rows);
        }
        self.current = current;

        if self.rows_done && !conn.status.has_more_results() {
            conn.unread_rows = false;
        }
        Ok(true)
    }

    pub(crate) async fn end(&mut self, conn: &mut Connection) -> Result<()> {
        loop {
            while self.next_row(conn).await?.is_some() {}
            if !self.next_result(conn).await? {
                break;
            }
        }
        Ok(())
    }
}

/// One statement's worth of results, borrowed from a raw [`Connection`].
/// A later set in a multi-statement batch, or a stored procedure
/// returning several sets, surfaces through [`ResultSet::next_result`].
pub struct ResultSet<'c> {
    conn: &'c mut Connection,
    state: ResultState,
}

impl<'c> ResultSet<'c> {
    pub(crate) fn from_parts(conn: &'c mut Connection, state: ResultState) -> Self {
        ResultSet { conn, state }
    }

    pub fn fields(&self) -> &[ColumnDefinition] {
        self.state.fields()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.state.column_index(name)
    }

    pub fn affected_rows(&self) -> u64 {
        self.state.affected_rows()
    }

    pub fn last_insert_id(&self) -> u64 {
        self.state.last_insert_id()
    }

    pub fn warnings(&self) -> u16 {
        self.state.warnings()
    }

    pub fn info(&self) -> Option<&str> {
        self.state.info()
    }

    pub fn status(&self) -> Status {
        self.conn.status
    }

    /// Reads the next row of the current result, or `None` once it is
    /// exhausted (spec §4.3.5).
    pub async fn next_row(&mut self) -> Result<Option<Row>> {
        self.state.next_row(self.conn).await
    }

    /// Advances to the next result in a multi-statement or
    /// multi-result-set batch (spec §4.3.5). The current result must
    /// already be fully drained. Returns `false` once no further result
    /// is pending.
    pub async fn next_result(&mut self) -> Result<bool> {
        self.state.next_result(self.conn).await
    }

    /// Drains every remaining row and result, leaving the connection
    /// ready to accept another command.
    pub async fn end(&mut self) -> Result<()> {
        self.state.end(self.conn).await
    }
}
