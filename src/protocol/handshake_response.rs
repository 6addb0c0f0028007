//! `HandshakeResponse41` (spec §4.3.1).
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_connection_phase_packets_protocol_handshake_response.html

use byteorder::LittleEndian;

use crate::io::{BufMut, BufMutExt};
use crate::protocol::{AuthPlugin, Capabilities};

#[derive(Debug)]
pub struct HandshakeResponse<'a> {
    pub client_capabilities: Capabilities,
    pub max_packet_size: u32,
    pub client_collation: u8,
    pub username: &'a str,
    pub database: Option<&'a str>,
    pub auth_plugin: AuthPlugin,
    pub auth_response: &'a [u8],
}

impl HandshakeResponse<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u32::<LittleEndian>(self.client_capabilities.bits());
        buf.put_u32::<LittleEndian>(self.max_packet_size);
        buf.put_u8(self.client_collation);
        buf.put_filler(23); // reserved

        buf.put_str_nul(self.username);

        if self
            .client_capabilities
            .contains(Capabilities::PLUGIN_AUTH_LENENC_CLIENT_DATA)
        {
            buf.put_bytes_lenenc::<LittleEndian>(self.auth_response);
        } else if self
            .client_capabilities
            .contains(Capabilities::SECURE_CONNECTION)
        {
            buf.put_u8(self.auth_response.len() as u8);
            buf.put_bytes(self.auth_response);
        } else {
            buf.put_u8(0);
        }

        if self.client_capabilities.contains(Capabilities::CONNECT_WITH_DB) {
            if let Some(database) = self.database {
                buf.put_str_nul(database);
            }
        }

        if self.client_capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.put_str_nul(self.auth_plugin.name());
        }
    }
}
