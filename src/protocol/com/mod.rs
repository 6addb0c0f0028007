//! Text-protocol command packets (spec §4.3.2). Every command is a single
//! frame whose first byte is its opcode; callers write the encoded bytes
//! through [`crate::io::PacketWriter`] after resetting its sequence
//! number for the new command phase.

mod com_create_db;
mod com_debug;
mod com_drop_db;
mod com_init_db;
mod com_ping;
mod com_process_info;
mod com_process_kill;
mod com_query;
mod com_quit;
mod com_refresh;
mod com_set_option;
mod com_shutdown;
mod com_statistics;
mod com_stmt_close;
mod com_stmt_execute;
mod com_stmt_fetch;
mod com_stmt_prepare;
mod com_stmt_prepare_ok;
mod com_stmt_reset;
mod com_stmt_send_long_data;

pub use com_create_db::ComCreateDb;
pub use com_debug::ComDebug;
pub use com_drop_db::ComDropDb;
pub use com_init_db::ComInitDb;
pub use com_ping::ComPing;
pub use com_process_info::ComProcessInfo;
pub use com_process_kill::ComProcessKill;
pub use com_query::ComQuery;
pub use com_quit::ComQuit;
pub use com_refresh::{ComRefresh, RefreshFlags};
pub use com_set_option::{ComSetOption, SetOption};
pub use com_shutdown::ComShutdown;
pub use com_statistics::ComStatistics;
pub use com_stmt_close::ComStmtClose;
pub use com_stmt_execute::{ComStmtExecute, Cursor};
pub use com_stmt_fetch::ComStmtFetch;
pub use com_stmt_prepare::ComStmtPrepare;
pub use com_stmt_prepare_ok::ComStmtPrepareOk;
pub use com_stmt_reset::ComStmtReset;
pub use com_stmt_send_long_data::ComStmtSendLongData;

/// Command opcodes (spec §4.3.2). Values match the real wire protocol's
/// `enum_server_command` except where noted.
pub mod opcode {
    pub const QUIT: u8 = 0x01;
    pub const INIT_DB: u8 = 0x02;
    pub const QUERY: u8 = 0x03;
    pub const CREATE_DB: u8 = 0x05;
    pub const DROP_DB: u8 = 0x06;
    pub const REFRESH: u8 = 0x07;
    pub const SHUTDOWN: u8 = 0x08;
    pub const STATISTICS: u8 = 0x09;
    pub const PROCESS_INFO: u8 = 0x0a;
    pub const PROCESS_KILL: u8 = 0x0c;
    pub const DEBUG: u8 = 0x0d;
    pub const PING: u8 = 0x0e;
    pub const STMT_PREPARE: u8 = 0x16;
    pub const STMT_EXECUTE: u8 = 0x17;
    pub const STMT_SEND_LONG_DATA: u8 = 0x18;
    pub const STMT_CLOSE: u8 = 0x19;
    pub const STMT_RESET: u8 = 0x1a;
    pub const SET_OPTION: u8 = 0x1b;
    pub const STMT_FETCH: u8 = 0x1c;
}
