//! `OK_Packet` (spec §4.3.3).
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_basic_ok_packet.html

use byteorder::LittleEndian;

use crate::error::{protocol_err, Result};
use crate::io::{Buf, BufExt};
use crate::protocol::Status;

#[derive(Debug, Clone)]
pub struct OkPacket {
    pub affected_rows: u64,
    pub last_insert_id: u64,
    pub status: Status,
    pub warnings: u16,
    pub info: Box<str>,
}

impl OkPacket {
    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let header = Buf::get_u8(&mut buf)?;
        if header != 0x00 && header != 0xFE {
            return Err(protocol_err!("expected OK (0x00 or 0xFE); received 0x{header:X}"));
        }

        let affected_rows = buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0);
        let last_insert_id = buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0);
        let status = Status::from_bits_truncate(Buf::get_u16::<LittleEndian>(&mut buf)?);
        let warnings = Buf::get_u16::<LittleEndian>(&mut buf)?;
        let info = Buf::get_str(&mut buf, buf.remaining())?.into();

        Ok(Self {
            affected_rows,
            last_insert_id,
            status,
            warnings,
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_HANDSHAKE: &[u8] = b"\x00\x00\x00\x02@\x00\x00";

    #[test]
    fn decodes_ok_handshake() {
        let p = OkPacket::read(OK_HANDSHAKE).unwrap();

        assert_eq!(p.affected_rows, 0);
        assert_eq!(p.last_insert_id, 0);
        assert_eq!(p.warnings, 0);
        assert!(p.status.contains(Status::SERVER_STATUS_AUTOCOMMIT));
        assert!(p.info.is_empty());
    }
}
