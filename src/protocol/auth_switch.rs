//! `AuthSwitchRequest` (spec §4.1): sent by the server when it wants a
//! different authentication plugin than the one offered in the initial
//! handshake response.
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_connection_phase_packets_protocol_auth_switch_request.html

use crate::error::{protocol_err, Result};
use crate::io::Buf;
use crate::protocol::AuthPlugin;

#[derive(Debug)]
pub struct AuthSwitch {
    pub auth_plugin: AuthPlugin,
    pub auth_plugin_data: Box<[u8]>,
}

impl AuthSwitch {
    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let header = Buf::get_u8(&mut buf)?;
        if header != 0xFE {
            return Err(protocol_err!("expected AuthSwitchRequest (0xFE); received 0x{header:X}"));
        }

        let auth_plugin = Buf::get_str_nul(&mut buf)?.parse()?;
        let auth_plugin_data = Buf::get_bytes(&mut buf, buf.remaining())?
            .to_vec()
            .into_boxed_slice();

        Ok(Self {
            auth_plugin,
            auth_plugin_data,
        })
    }
}
