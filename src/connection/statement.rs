//! Prepared statement lifecycle (spec §4.3.6 / §3 `Statement`).

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{protocol_err, Error, Result, UsageError};
use crate::protocol::com::{ComStmtClose, ComStmtExecute, ComStmtReset, ComStmtSendLongData, Cursor};
use crate::value::ToParam;

use super::{Connection, LiveStatement, RawResponse};

/// `COM_STMT_SEND_LONG_DATA`'s payload carries a 4-byte statement id and a
/// 2-byte parameter index ahead of the data bytes (spec §4.4); a
/// caller-supplied chunk size must leave room for at least one byte of
/// data past that.
const LONG_DATA_HEADER_OVERHEAD: usize = 6;

/// Checks `chunk_size` against the header overhead and returns the usable
/// data capacity per frame (spec §4.4 "must exceed the 6-byte header
/// overhead").
fn long_data_capacity(chunk_size: usize) -> Result<usize> {
    chunk_size
        .checked_sub(LONG_DATA_HEADER_OVERHEAD)
        .filter(|&capacity| capacity > 0)
        .ok_or(Error::Usage(UsageError::InvalidChunkSize(chunk_size)))
}

/// An opaque handle to a statement prepared on a [`Connection`]. Stable
/// across reconnect: the server-assigned id backing it may change, but the
/// handle the caller holds never does (spec §9 Design Notes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Statement {
    pub(crate) handle: u64,
}

impl Connection {
    /// Prepares `sql` and returns a handle to it (spec §4.3.6).
    pub async fn prepare(&mut self, sql: &str) -> Result<Statement> {
        self.check_ready()?;

        let ok = self.prepare_on_wire(sql).await?;

        let handle = self.next_handle;
        self.next_handle += 1;
        self.statements.insert(
            handle,
            LiveStatement {
                sql: sql.to_owned(),
                server_id: ok.statement_id,
                param_count: ok.params,
                rebind: true,
            },
        );

        Ok(Statement { handle })
    }

    /// Binds `params` to `statement` and executes it via the binary
    /// protocol (spec §4.4), returning a [`crate::result::ResultSet`]
    /// borrowing this connection.
    pub async fn execute<'c>(
        &'c mut self,
        statement: Statement,
        params: &[&dyn ToParam],
    ) -> Result<crate::result::ResultSet<'c>> {
        let state = execute_on(self, statement, params).await?;
        Ok(crate::result::ResultSet::from_parts(self, state))
    }

    /// Drops the server-side statement state and forgets the handle
    /// (spec §4.3.6). A second close of the same handle is a no-op.
    pub async fn close_statement(&mut self, statement: Statement) -> Result<()> {
        self.check_ready()?;

        let Some(live) = self.statements.remove(&statement.handle) else {
            return Ok(());
        };

        let mut buf = Vec::new();
        ComStmtClose { statement_id: live.server_id }.encode(&mut buf);
        // COM_STMT_CLOSE has no response; best-effort like COM_QUIT.
        self.send_command(&buf).await
    }

    /// Discards any pending long-data and resets the statement's cursor
    /// for re-execution (spec §4.3.6). Forces `rebind` back to `true`.
    pub async fn reset_statement(&mut self, statement: Statement) -> Result<()> {
        self.check_ready()?;

        let server_id = self
            .statements
            .get(&statement.handle)
            .ok_or(Error::Usage(UsageError::ForeignStatement))?
            .server_id;

        let mut buf = Vec::new();
        ComStmtReset { statement_id: server_id }.encode(&mut buf);
        self.send_command(&buf).await?;

        match self.read_response().await? {
            RawResponse::Ok(ok) => {
                self.status = ok.status;
            }
            RawResponse::ResultSetHeader(_) => {
                return Err(self.fail(protocol_err!("unexpected result set in response to COM_STMT_RESET")))
            }
        }

        if let Some(live) = self.statements.get_mut(&statement.handle) {
            live.rebind = true;
        }
        Ok(())
    }

    /// Streams `data` as additional data for parameter `param_index` of
    /// `statement`, ahead of a subsequent `execute` (spec §4.3.6 / §4.4).
    /// Split into `ceil(data.len() / (chunk_size - 6))` frames of at most
    /// `chunk_size - 6` data bytes each (`chunk_size` must exceed the
    /// 6-byte `COM_STMT_SEND_LONG_DATA` header); an empty `data` still
    /// sends one empty chunk. Has no response; errors surface on the
    /// following command instead.
    pub async fn send_long_data(
        &mut self,
        statement: Statement,
        param_index: u16,
        data: &[u8],
        chunk_size: usize,
    ) -> Result<()> {
        self.check_ready()?;

        let server_id = self.live_statement_server_id(statement)?;
        let capacity = long_data_capacity(chunk_size)?;

        if data.is_empty() {
            return self.send_long_data_chunk(server_id, param_index, &[]).await;
        }

        for chunk in data.chunks(capacity) {
            self.send_long_data_chunk(server_id, param_index, chunk).await?;
        }
        Ok(())
    }

    /// Like [`Connection::send_long_data`], but draws the data from an
    /// `AsyncRead` source until EOF instead of a caller-held slice (spec
    /// §4.4 "An `io-reader` source is drained until EOF"), reading at most
    /// `chunk_size - 6` bytes per frame.
    pub async fn send_long_data_reader<R>(
        &mut self,
        statement: Statement,
        param_index: u16,
        mut source: R,
        chunk_size: usize,
    ) -> Result<()>
    where
        R: AsyncRead + Unpin,
    {
        self.check_ready()?;

        let server_id = self.live_statement_server_id(statement)?;
        let capacity = long_data_capacity(chunk_size)?;

        let mut buf = vec![0u8; capacity];
        let mut sent_any = false;
        loop {
            let filled = read_fill(&mut source, &mut buf).await?;
            if filled == 0 {
                break;
            }
            sent_any = true;
            self.send_long_data_chunk(server_id, param_index, &buf[..filled]).await?;
            if filled < capacity {
                break;
            }
        }
        if !sent_any {
            self.send_long_data_chunk(server_id, param_index, &[]).await?;
        }
        Ok(())
    }

    fn live_statement_server_id(&self, statement: Statement) -> Result<u32> {
        self.statements
            .get(&statement.handle)
            .map(|live| live.server_id)
            .ok_or(Error::Usage(UsageError::ForeignStatement))
    }

    async fn send_long_data_chunk(&mut self, server_id: u32, param_index: u16, chunk: &[u8]) -> Result<()> {
        let mut buf = Vec::new();
        ComStmtSendLongData {
            statement_id: server_id,
            param_index,
            chunk,
        }
        .encode(&mut buf);
        self.send_command(&buf).await
    }
}

/// Reads into `buf` until it is full or the source reaches EOF, returning
/// the number of bytes actually filled (a plain `AsyncRead::read` may
/// return short of a full buffer without being at EOF).
async fn read_fill<R: AsyncRead + Unpin>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Core of [`Connection::execute`], taking the connection by plain
/// reference so [`crate::wrapper::SharedConnection`] can drive it through
/// an owned mutex guard instead (spec §4.5).
pub(crate) async fn execute_on(
    conn: &mut Connection,
    statement: Statement,
    params: &[&dyn ToParam],
) -> Result<crate::result::ResultState> {
    conn.check_ready()?;

    let (server_id, param_count, rebind) = {
        let live = conn
            .statements
            .get(&statement.handle)
            .ok_or(Error::Usage(UsageError::ForeignStatement))?;
        (live.server_id, live.param_count, live.rebind)
    };

    if params.len() != param_count as usize {
        return Err(Error::Usage(UsageError::ParamCountMismatch {
            expected: param_count as usize,
            got: params.len(),
        }));
    }

    let mut type_metas = Vec::with_capacity(params.len());
    let mut values = Vec::new();
    let mut null_bitmap = vec![0u8; (params.len() + 7) / 8];

    for (index, param) in params.iter().enumerate() {
        let value = param.to_param();
        type_metas.push(value.type_meta());
        if value.is_null() {
            null_bitmap[index / 8] |= 1 << (index % 8);
        } else {
            value.encode(&mut values);
        }
    }

    let mut buf = Vec::new();
    ComStmtExecute {
        statement_id: server_id,
        cursor: Cursor::NO_CURSOR,
        params: &values,
        null_bitmap: &null_bitmap,
        param_types: &type_metas,
        rebind,
    }
    .encode(&mut buf);
    conn.send_command(&buf).await?;

    let label = conn
        .statements
        .get(&statement.handle)
        .map(|live| live.sql.clone())
        .unwrap_or_default();

    if let Some(live) = conn.statements.get_mut(&statement.handle) {
        live.rebind = false;
    }

    crate::result::ResultState::new(conn, true, &label).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_must_exceed_header_overhead() {
        assert!(long_data_capacity(6).is_err());
        assert!(long_data_capacity(0).is_err());
        assert_eq!(long_data_capacity(7).unwrap(), 1);
        assert_eq!(long_data_capacity(256).unwrap(), 250);
    }

    #[test]
    fn invalid_chunk_size_reports_the_offending_value() {
        match long_data_capacity(3).unwrap_err() {
            Error::Usage(UsageError::InvalidChunkSize(n)) => assert_eq!(n, 3),
            other => panic!("expected InvalidChunkSize, got {other:?}"),
        }
    }
}
