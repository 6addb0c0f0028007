//! Wire packet types (spec §4): the connection-phase handshake, OK/ERR/EOF
//! response packets, column metadata, result rows, and command packets.

mod auth_plugin;
mod auth_switch;
mod capabilities;
mod column_count;
mod column_def;
mod eof;
mod err;
mod field_flags;
mod handshake;
mod handshake_response;
mod ok;
mod row;
mod status;
mod type_id;

pub mod com;

pub use auth_plugin::AuthPlugin;
pub use auth_switch::AuthSwitch;
pub use capabilities::Capabilities;
pub use column_count::ColumnCount;
pub use column_def::ColumnDefinition;
pub use eof::EofPacket;
pub use field_flags::FieldFlags;
pub use handshake::Handshake;
pub use handshake_response::HandshakeResponse;
pub use ok::OkPacket;
pub use row::Row;
pub use status::Status;
pub use type_id::TypeId;
