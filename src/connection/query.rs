//! Text-protocol queries (spec §4.3.2 `COM_QUERY`).

use crate::error::Result;
use crate::protocol::com::ComQuery;
use crate::result::{ResultSet, ResultState};

use super::Connection;

impl Connection {
    /// Sends `sql` via the text protocol and returns the resulting
    /// [`ResultSet`] (spec §4.3.5). The connection cannot accept another
    /// command until the set (and every subsequent result in a
    /// multi-statement batch) is fully drained or [`ResultSet::end`] is
    /// called.
    pub async fn query(&mut self, sql: &str) -> Result<ResultSet<'_>> {
        let state = query_on(self, sql).await?;
        Ok(ResultSet::from_parts(self, state))
    }
}

/// Core of [`Connection::query`], taking the connection by plain
/// reference so [`crate::wrapper::SharedConnection`] can drive it through
/// an owned mutex guard instead (spec §4.5).
pub(crate) async fn query_on(conn: &mut Connection, sql: &str) -> Result<ResultState> {
    conn.check_ready()?;

    let mut buf = Vec::new();
    ComQuery { sql }.encode(&mut buf);
    conn.send_command(&buf).await?;

    ResultState::new(conn, false, sql).await
}
