//! A native, pure Rust client driver for the MySQL wire protocol
//! (version 4.1 and later). No dependence on `libmysqlclient` or any
//! other external MySQL client library — every packet is framed, typed,
//! and decoded by this crate.
//!
//! The driver is a stack of five pieces, leaves first: an internal wire
//! codec (fixed-width integers, length-coded binary/strings, NUL-terminated
//! strings, packet framing), the [`protocol`] packet types built on top of
//! it (handshake, OK/ERR/EOF, column definitions, rows, commands), the
//! [`connection`] state machine that drives a handshake through to
//! streaming [`result`] sets and [`connection::Statement`] lifecycle, the
//! [`value`] codec that binds host types to MySQL wire types in both
//! directions, and [`wrapper`], a thread-safe façade over all of it for
//! callers that need to share one connection across tasks.
//!
//! ```no_run
//! use mysql_wire::{Connection, MySqlConnectOptions};
//!
//! # async fn run() -> mysql_wire::Result<()> {
//! let options = MySqlConnectOptions::new()
//!     .remote_addr("127.0.0.1")
//!     .username("root")
//!     .password("secret")
//!     .database("test");
//!
//! let mut conn = Connection::connect(options).await?;
//! let mut result = conn.query("SELECT 1").await?;
//! while let Some(row) = result.next_row().await? {
//!     let _ = row.get(0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod escape;
mod logger;
pub mod options;
pub mod protocol;
pub mod result;
pub mod transaction;
pub mod value;
pub mod wrapper;

pub(crate) mod io;

pub use connection::{Connection, Statement};
pub use error::{Error, Result};
pub use options::MySqlConnectOptions;
pub use result::ResultSet;
pub use transaction::Transaction;
pub use value::{Blob, ColumnValue, FromValue, ParamValue, Raw, ToParam};
pub use wrapper::{SharedConnection, SharedResultSet, SharedTransaction};
