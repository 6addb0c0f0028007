//! The administrative corner of command dispatch (spec §4.3.2): schema
//! management, server introspection, and the handful of opcodes that
//! exist mostly for completeness of the command table rather than everyday
//! use. `QUERY`, `STMT_*`, `PING`, and `INIT_DB` live alongside their own
//! concerns in [`super::query`], [`super::statement`], and [`super::mod`].

use crate::error::{protocol_err, Result};
use crate::io::Buf;
use crate::protocol::com::{
    ComCreateDb, ComDebug, ComDropDb, ComProcessInfo, ComProcessKill, ComRefresh, ComSetOption,
    ComShutdown, ComStatistics, RefreshFlags, SetOption,
};
use crate::result::ResultSet;

use super::{Connection, RawResponse};

impl Connection {
    /// `COM_CREATE_DB` (spec §4.3.2). Superseded by `CREATE DATABASE`
    /// through [`Connection::query`] on modern servers, kept for
    /// opcode-table completeness.
    pub async fn create_db(&mut self, schema: &str) -> Result<()> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComCreateDb { schema }.encode(&mut buf);
        self.send_command(&buf).await?;
        self.expect_ok("COM_CREATE_DB").await
    }

    /// `COM_DROP_DB` (spec §4.3.2).
    pub async fn drop_db(&mut self, schema: &str) -> Result<()> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComDropDb { schema }.encode(&mut buf);
        self.send_command(&buf).await?;
        self.expect_ok("COM_DROP_DB").await
    }

    /// `COM_REFRESH` (spec §4.3.2): flushes server-side caches named by
    /// `flags`.
    pub async fn refresh(&mut self, flags: RefreshFlags) -> Result<()> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComRefresh { flags }.encode(&mut buf);
        self.send_command(&buf).await?;
        self.expect_ok("COM_REFRESH").await
    }

    /// `COM_SHUTDOWN` (spec §4.3.2): requests server shutdown. The level
    /// argument is accepted for wire fidelity but ignored server-side
    /// since MySQL 5.7.
    pub async fn shutdown(&mut self, level: u8) -> Result<()> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComShutdown { level }.encode(&mut buf);
        self.send_command(&buf).await?;
        self.expect_ok("COM_SHUTDOWN").await
    }

    /// `COM_PROCESS_KILL` (spec §4.3.2): kills another connection by
    /// thread id. Exercises the reconnect path in spec §8 scenario 6 when
    /// used to kill the caller's own session.
    pub async fn process_kill(&mut self, thread_id: u32) -> Result<()> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComProcessKill { thread_id }.encode(&mut buf);
        self.send_command(&buf).await?;
        self.expect_ok("COM_PROCESS_KILL").await
    }

    /// `COM_DEBUG` (spec §4.3.2): asks the server to dump debug
    /// information to its own log. The response is an OK packet; the dump
    /// itself never reaches the client.
    pub async fn debug(&mut self) -> Result<()> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComDebug.encode(&mut buf);
        self.send_command(&buf).await?;
        self.expect_ok("COM_DEBUG").await
    }

    /// `COM_SET_OPTION` (spec §4.3.2): toggles `CLIENT_MULTI_STATEMENTS`
    /// on an already-open connection.
    pub async fn set_option(&mut self, option: SetOption) -> Result<()> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComSetOption { option }.encode(&mut buf);
        self.send_command(&buf).await?;
        self.expect_ok("COM_SET_OPTION").await
    }

    /// `COM_STATISTICS` (spec §4.3.2): a human-readable status line
    /// (uptime, query counts). Unlike every other command, the response
    /// is a bare length-prefixed string with no OK/ERR/result-set header,
    /// so it bypasses [`Connection::read_response`] entirely.
    pub async fn statistics(&mut self) -> Result<String> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComStatistics.encode(&mut buf);
        self.send_command(&buf).await?;

        let packet = self.reader.read_packet().await.map_err(|e| self.fail(e))?;
        let mut slice = packet.as_slice();
        Buf::get_str(&mut slice, slice.len())
            .map(str::to_owned)
            .map_err(|e| self.fail(e))
    }

    /// `COM_PROCESS_INFO` (spec §4.3.2): equivalent to `SHOW PROCESSLIST`,
    /// returned as an ordinary text result set.
    pub async fn process_info(&mut self) -> Result<ResultSet<'_>> {
        self.check_ready()?;
        let mut buf = Vec::new();
        ComProcessInfo.encode(&mut buf);
        self.send_command(&buf).await?;

        let state = crate::result::ResultState::new(self, false, "COM_PROCESS_INFO").await?;
        Ok(ResultSet::from_parts(self, state))
    }

    async fn expect_ok(&mut self, command: &'static str) -> Result<()> {
        match self.read_response().await? {
            RawResponse::Ok(ok) => {
                self.status = ok.status;
                Ok(())
            }
            RawResponse::ResultSetHeader(_) => {
                Err(self.fail(protocol_err!("unexpected result set in response to {command}")))
            }
        }
    }
}
