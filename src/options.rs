//! Connection configuration (spec §6). Built programmatically — DSN/URI
//! parsing is an explicit non-goal, unlike the teacher's `FromStr` impl
//! that parses a `mysql://` URL.

use std::path::PathBuf;
use std::time::Duration;

use crate::io::Transport;

/// Options and flags controlling how a connection is opened and
/// maintained.
#[derive(Debug, Clone)]
pub struct MySqlConnectOptions {
    pub(crate) transport: Transport,
    pub(crate) unix_path: Option<PathBuf>,
    pub(crate) remote_addr: String,
    pub(crate) port: u16,
    pub(crate) local_addr: Option<String>,
    pub(crate) username: String,
    pub(crate) password: Option<String>,
    pub(crate) database: Option<String>,
    pub(crate) max_packet_size: u32,
    /// Retry-attempt cap for an external auto-reconnect wrapper (spec §1
    /// non-goals: that wrapper lives outside this crate). Stored here
    /// purely as a pass-through config value; nothing in this crate reads
    /// it.
    pub(crate) max_retries: u32,
    pub(crate) debug: bool,
    pub(crate) connect_timeout: Duration,
    pub(crate) init_commands: Vec<String>,
    pub(crate) keepalive_interval: Duration,
    /// Restrict result columns to a narrower, host-friendlier set of
    /// binary types (e.g. always widen MEDIUMINT to i32) rather than the
    /// server's exact declared type. Mirrors a toggle mymysql exposes for
    /// integration with ORMs that expect a fixed Go type set.
    pub(crate) narrow_type_set: bool,
}

impl Default for MySqlConnectOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl MySqlConnectOptions {
    pub fn new() -> Self {
        Self {
            transport: Transport::Tcp,
            unix_path: None,
            remote_addr: String::from("localhost"),
            port: 3306,
            local_addr: None,
            username: String::from("root"),
            password: None,
            database: None,
            max_packet_size: 0xFF_FFFF,
            max_retries: 7,
            debug: false,
            connect_timeout: Duration::from_secs(10),
            init_commands: Vec::new(),
            keepalive_interval: Duration::from_secs(60),
            narrow_type_set: false,
        }
    }

    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn unix_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.unix_path = Some(path.into());
        self.transport = Transport::Unix;
        self
    }

    pub fn remote_addr(mut self, host: impl Into<String>) -> Self {
        self.remote_addr = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn local_addr(mut self, addr: impl Into<String>) -> Self {
        self.local_addr = Some(addr.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn max_packet_size(mut self, size: u32) -> Self {
        self.max_packet_size = size;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Statements run immediately after authentication completes, before
    /// the connection is handed to the caller (spec §4.3.1). Runs in
    /// order; a failure aborts the connection attempt.
    pub fn init_command(mut self, command: impl Into<String>) -> Self {
        self.init_commands.push(command.into());
        self
    }

    pub fn keepalive_interval(mut self, interval: Duration) -> Self {
        self.keepalive_interval = interval;
        self
    }

    pub fn narrow_type_set(mut self, narrow: bool) -> Self {
        self.narrow_type_set = narrow;
        self
    }
}
