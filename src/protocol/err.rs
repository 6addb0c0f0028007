//! `ERR_Packet` (spec §4.3.3).
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_basic_err_packet.html

use byteorder::LittleEndian;

use crate::error::{protocol_err, MySqlDatabaseError, Result};
use crate::io::Buf;

impl MySqlDatabaseError {
    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let header = Buf::get_u8(&mut buf)?;
        if header != 0xFF {
            return Err(protocol_err!("expected ERR (0xFF); received 0x{header:X}"));
        }

        let code = Buf::get_u16::<LittleEndian>(&mut buf)?;

        let _sql_state_marker = Buf::get_u8(&mut buf)?; // always '#'
        let sql_state = Buf::get_str(&mut buf, 5)?.into();

        let message = Buf::get_str(&mut buf, buf.remaining())?.into();

        Ok(Self {
            code,
            sql_state,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERR_HANDSHAKE_UNKNOWN_DB: &[u8] = b"\xff\x19\x04#42000Unknown database 'unknown'";

    #[test]
    fn decodes_err_unknown_database() {
        let e = MySqlDatabaseError::read(ERR_HANDSHAKE_UNKNOWN_DB).unwrap();

        assert_eq!(e.code, 1049);
        assert_eq!(&*e.sql_state, "42000");
        assert_eq!(&*e.message, "Unknown database 'unknown'");
    }
}
