//! Thread-safe connection sharing (spec §4.5 "Thread-Safe Wrapper").
//! Composition over embedding: [`SharedConnection`] holds a raw
//! [`Connection`] behind a mutex rather than re-deriving its own copy of
//! the protocol engine, mirroring how the reference driver layers its
//! locking wrapper over a bare connection (`thrsafe.go`).

use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, Notify, OwnedMutexGuard};
use tokio::task::JoinHandle;

use crate::connection::{execute_on, query_on, Connection, Statement};
use crate::error::{Error, Result, UsageError};
use crate::options::MySqlConnectOptions;
use crate::protocol::{ColumnDefinition, Row, Status};
use crate::result::ResultState;
use crate::value::ToParam;

/// A [`Connection`] guarded by a single mutex, with a background task
/// that pings it during idle periods so the server's `wait_timeout`
/// never closes it out from under a caller (spec §4.5).
pub struct SharedConnection {
    inner: Arc<Mutex<Connection>>,
    last_active: Arc<StdMutex<Instant>>,
    stop: Arc<Notify>,
    keepalive: Option<JoinHandle<()>>,
}

impl SharedConnection {
    pub async fn connect(options: MySqlConnectOptions) -> Result<SharedConnection> {
        let interval = options.keepalive_interval;
        let conn = Connection::connect(options).await?;
        let inner = Arc::new(Mutex::new(conn));
        let last_active = Arc::new(StdMutex::new(Instant::now()));
        let stop = Arc::new(Notify::new());

        let keepalive = (interval > Duration::ZERO).then(|| {
            tokio::spawn(run_keepalive(
                inner.clone(),
                last_active.clone(),
                stop.clone(),
                interval,
            ))
        });

        Ok(SharedConnection {
            inner,
            last_active,
            stop,
            keepalive,
        })
    }

    fn touch(&self) {
        *self.last_active.lock().unwrap() = Instant::now();
    }

    pub async fn ping(&self) -> Result<()> {
        self.touch();
        self.inner.lock().await.ping().await
    }

    pub async fn use_db(&self, schema: &str) -> Result<()> {
        self.touch();
        self.inner.lock().await.use_db(schema).await
    }

    pub async fn prepare(&self, sql: &str) -> Result<Statement> {
        self.touch();
        self.inner.lock().await.prepare(sql).await
    }

    pub async fn close_statement(&self, statement: Statement) -> Result<()> {
        self.touch();
        self.inner.lock().await.close_statement(statement).await
    }

    pub async fn reset_statement(&self, statement: Statement) -> Result<()> {
        self.touch();
        self.inner.lock().await.reset_statement(statement).await
    }

    pub async fn send_long_data(
        &self,
        statement: Statement,
        param_index: u16,
        data: &[u8],
        chunk_size: usize,
    ) -> Result<()> {
        self.touch();
        self.inner
            .lock()
            .await
            .send_long_data(statement, param_index, data, chunk_size)
            .await
    }

    pub async fn send_long_data_reader<R>(
        &self,
        statement: Statement,
        param_index: u16,
        source: R,
        chunk_size: usize,
    ) -> Result<()>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        self.touch();
        self.inner
            .lock()
            .await
            .send_long_data_reader(statement, param_index, source, chunk_size)
            .await
    }

    /// Runs `sql` via the text protocol, holding the connection's lock for
    /// the lifetime of the returned [`SharedResultSet`] (spec §4.5: only
    /// one caller may hold the lock between acquire and release).
    pub async fn query(&self, sql: &str) -> Result<SharedResultSet> {
        self.touch();
        let mut guard = self.inner.clone().lock_owned().await;
        let state = query_on(&mut guard, sql).await?;
        Ok(SharedResultSet { guard, state })
    }

    pub async fn execute(&self, statement: Statement, params: &[&dyn ToParam]) -> Result<SharedResultSet> {
        self.touch();
        let mut guard = self.inner.clone().lock_owned().await;
        let state = execute_on(&mut guard, statement, params).await?;
        Ok(SharedResultSet { guard, state })
    }

    /// Begins a transaction, holding the connection's lock until the
    /// returned [`SharedTransaction`] is committed or rolled back (spec
    /// §4.5: a transaction holds the lock for its entire lifetime so no
    /// other caller's statements can interleave with it).
    pub async fn begin(&self) -> Result<SharedTransaction> {
        self.touch();
        let mut guard = self.inner.clone().lock_owned().await;
        let mut state = query_on(&mut guard, "START TRANSACTION").await?;
        state.end(&mut guard).await?;
        Ok(SharedTransaction { guard, finished: false })
    }

    pub async fn close(&self) -> Result<()> {
        self.stop.notify_waiters();
        self.inner.lock().await.close().await
    }
}

impl Drop for SharedConnection {
    fn drop(&mut self) {
        self.stop.notify_waiters();
        if let Some(handle) = self.keepalive.take() {
            handle.abort();
        }
    }
}

async fn run_keepalive(
    inner: Arc<Mutex<Connection>>,
    last_active: Arc<StdMutex<Instant>>,
    stop: Arc<Notify>,
    interval: Duration,
) {
    loop {
        tokio::select! {
            _ = stop.notified() => return,
            _ = tokio::time::sleep(interval) => {}
        }

        let idle_for = last_active.lock().unwrap().elapsed();
        if idle_for < interval {
            continue;
        }

        // A busy connection is skipped rather than waited on; the caller
        // holding it is proof enough that it is alive.
        let Ok(mut conn) = inner.try_lock() else { continue };
        if conn.is_closed() {
            return;
        }
        if let Err(err) = conn.ping().await {
            tracing::warn!(error = %err, "keepalive ping failed");
        } else {
            *last_active.lock().unwrap() = Instant::now();
        }
    }
}

/// A result set streamed from a [`SharedConnection`]. Holds the
/// connection's mutex for its entire lifetime — drop it (or call
/// [`SharedResultSet::end`]) to release the lock for other callers.
pub struct SharedResultSet {
    guard: OwnedMutexGuard<Connection>,
    state: ResultState,
}

impl SharedResultSet {
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
        self.guard.status()
    }

    pub async fn next_row(&mut self) -> Result<Option<Row>> {
        self.state.next_row(&mut self.guard).await
    }

    pub async fn next_result(&mut self) -> Result<bool> {
        self.state.next_result(&mut self.guard).await
    }

    pub async fn end(&mut self) -> Result<()> {
        self.state.end(&mut self.guard).await
    }
}

/// A transaction over a [`SharedConnection`]. Holds the connection's
/// mutex for its entire lifetime, matching the raw [`crate::transaction::Transaction`]'s
/// rule that no other statement may interleave with it (spec §4.5).
pub struct SharedTransaction {
    guard: OwnedMutexGuard<Connection>,
    finished: bool,
}

impl SharedTransaction {
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
        let mut state = query_on(&mut self.guard, sql).await?;
        state.end(&mut self.guard).await
    }

    pub async fn query(&mut self, sql: &str) -> Result<SharedResultSetRef<'_>> {
        if self.finished {
            return Err(Error::Usage(UsageError::TransactionFinished));
        }
        let state = query_on(&mut self.guard, sql).await?;
        Ok(SharedResultSetRef { guard: &mut self.guard, state })
    }

    pub async fn execute(&mut self, statement: Statement, params: &[&dyn ToParam]) -> Result<SharedResultSetRef<'_>> {
        if self.finished {
            return Err(Error::Usage(UsageError::TransactionFinished));
        }
        let state = execute_on(&mut self.guard, statement, params).await?;
        Ok(SharedResultSetRef { guard: &mut self.guard, state })
    }
}

/// A result set streamed from within a [`SharedTransaction`], borrowing
/// its connection guard rather than owning a clone of it.
pub struct SharedResultSetRef<'t> {
    guard: &'t mut Connection,
    state: ResultState,
}

impl<'t> SharedResultSetRef<'t> {
    pub fn fields(&self) -> &[ColumnDefinition] {
        self.state.fields()
    }

    pub fn affected_rows(&self) -> u64 {
        self.state.affected_rows()
    }

    pub fn last_insert_id(&self) -> u64 {
        self.state.last_insert_id()
    }

    pub async fn next_row(&mut self) -> Result<Option<Row>> {
        self.state.next_row(self.guard).await
    }

    pub async fn next_result(&mut self) -> Result<bool> {
        self.state.next_result(self.guard).await
    }

    pub async fn end(&mut self) -> Result<()> {
        self.state.end(self.guard).await
    }
}
