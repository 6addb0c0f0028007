//! Transactions over a raw [`Connection`] (spec §3 `Transaction`, §9
//! Design Notes: "double commit/rollback is a `Usage` error, not a
//! panic").

use crate::connection::Connection;
use crate::error::{Error, Result, UsageError};

/// A transaction started with `START TRANSACTION`. Borrows the
/// connection for its lifetime, so no other command can run on it until
/// the transaction is committed or rolled back.
pub struct Transaction<'c> {
    conn: &'c mut Connection,
    finished: bool,
}

impl<'c> Transaction<'c> {
    pub(crate) async fn begin(conn: &'c mut Connection) -> Result<Transaction<'c>> {
        let mut result = conn.query("START TRANSACTION").await?;
        result.end().await?;
        Ok(Transaction { conn, finished: false })
    }

    pub async fn commit(mut self) -> Result<()> {
        self.finish("COMMIT").await
    }

    pub async fn rollback(mut self) -> Result<()> {
        self.finish("ROLLBACK").await
    }

    async fn finish(&mut self, sql: &str) -> Result<()> {
        if self.finished {
            return Err(Error::Usage(UsageError::TransactionFinished));
        }
        self.finished = true;
        let mut result = self.conn.query(sql).await?;
        result.end().await
    }

    pub async fn query(&mut self, sql: &str) -> Result<crate::result::ResultSet<'_>> {
        if self.finished {
            return Err(Error::Usage(UsageError::TransactionFinished));
        }
        self.conn.query(sql).await
    }

    pub async fn execute(
        &mut self,
        statement: crate::connection::Statement,
        params: &[&dyn crate::value::ToParam],
    ) -> Result<crate::result::ResultSet<'_>> {
        if self.finished {
            return Err(Error::Usage(UsageError::TransactionFinished));
        }
        self.conn.execute(statement, params).await
    }

    pub fn connection(&self) -> &Connection {
        self.conn
    }
}

impl Connection {
    /// Starts a transaction on this connection (spec §3). The returned
    /// [`Transaction`] must be explicitly committed or rolled back; an
    /// unfinished transaction dropped mid-scope leaves the server-side
    /// transaction open, to be cleaned up by the next `ROLLBACK`,
    /// disconnect, or server timeout.
    pub async fn begin(&mut self) -> Result<Transaction<'_>> {
        self.check_ready()?;
        Transaction::begin(self).await
    }
}
