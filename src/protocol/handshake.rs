//! Initial handshake packet (`Handshake` / protocol v10), spec §4.3.1.
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_connection_phase_packets_protocol_handshake_v10.html

use byteorder::LittleEndian;

use crate::error::Result;
use crate::io::Buf;
use crate::protocol::{AuthPlugin, Capabilities, Status};

#[derive(Debug)]
pub struct Handshake {
    pub protocol_version: u8,
    pub server_version: Box<str>,
    pub connection_id: u32,
    pub server_capabilities: Capabilities,
    pub server_default_collation: u8,
    pub status: Status,
    pub auth_plugin: AuthPlugin,
    pub auth_plugin_data: Box<[u8]>,
}

impl Handshake {
    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let protocol_version = buf.get_u8()?;
        if protocol_version != 10 {
            return Err(crate::error::Error::protocol(format!(
                "unsupported handshake protocol version {protocol_version} (only v10 / MySQL 4.1+ is supported)"
            )));
        }

        let server_version = buf.get_str_nul()?.into();
        let connection_id = buf.get_u32::<LittleEndian>()?;

        let mut scramble = Vec::with_capacity(20);
        scramble.extend_from_slice(Buf::get_bytes(&mut buf, 8)?);

        buf.advance(1)?; // reserved filler byte

        let capabilities_1 = buf.get_u16::<LittleEndian>()?;
        let mut capabilities = Capabilities::from_bits_truncate(capabilities_1 as u32);

        let char_set = buf.get_u8()?;
        let status = Status::from_bits_truncate(buf.get_u16::<LittleEndian>()?);

        let capabilities_2 = buf.get_u16::<LittleEndian>()?;
        capabilities |= Capabilities::from_bits_truncate((capabilities_2 as u32) << 16);

        let auth_plugin_data_len = if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.get_u8()?
        } else {
            buf.advance(1)?;
            0
        };

        buf.advance(10)?; // reserved, always zero

        if capabilities.contains(Capabilities::SECURE_CONNECTION) {
            let len = ((auth_plugin_data_len as isize) - 9).max(12) as usize;
            scramble.extend_from_slice(Buf::get_bytes(&mut buf, len)?);
            buf.advance(1)?; // trailing NUL of the second scramble part
        }

        let auth_plugin = if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.get_str_nul()?.parse()?
        } else {
            AuthPlugin::MySqlNativePassword
        };

        Ok(Self {
            protocol_version,
            server_version,
            connection_id,
            server_capabilities: capabilities,
            server_default_collation: char_set,
            status,
            auth_plugin,
            auth_plugin_data: scramble.into_boxed_slice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDSHAKE_MARIADB_10_4_7: &[u8] = b"\n5.5.5-10.4.7-MariaDB-1:10.4.7+maria~bionic\x00\x0b\x00\x00\x00t6L\\j\"dS\x00\xfe\xf7\x08\x02\x00\xff\x81\x15\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00U14Oph9\"<H5n\x00mysql_native_password\x00";

    #[test]
    fn reads_mariadb_handshake() {
        let h = Handshake::read(HANDSHAKE_MARIADB_10_4_7).unwrap();

        assert_eq!(h.protocol_version, 10);
        assert_eq!(&*h.server_version, "5.5.5-10.4.7-MariaDB-1:10.4.7+maria~bionic");
        assert_eq!(h.connection_id, 11);
        assert_eq!(h.server_default_collation, 8);
        assert!(h.status.contains(Status::SERVER_STATUS_AUTOCOMMIT));
        assert_eq!(h.auth_plugin, AuthPlugin::MySqlNativePassword);
        assert_eq!(h.auth_plugin_data.len(), 20);
        assert!(h.server_capabilities.contains(Capabilities::PROTOCOL_41));
        assert!(h.server_capabilities.contains(Capabilities::SECURE_CONNECTION));
    }

    #[test]
    fn rejects_pre_41_protocol_version() {
        let mut payload = vec![9u8];
        payload.extend_from_slice(b"3.23.0\x00");
        payload.extend_from_slice(&[0u8; 40]);
        let err = Handshake::read(&payload).unwrap_err();
        assert!(matches!(err, crate::error::Error::Protocol(_)));
    }
}
