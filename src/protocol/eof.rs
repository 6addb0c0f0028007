//! `EOF_Packet` (spec §4.3.4). Servers with `CLIENT_DEPRECATE_EOF` replace
//! these with an `OK_Packet` bearing the EOF header byte (0xFE); this
//! driver checks for that header form rather than assuming deprecation.
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_basic_eof_packet.html

use byteorder::LittleEndian;

use crate::error::{protocol_err, Result};
use crate::io::Buf;
use crate::protocol::Status;

#[derive(Debug, Clone, Copy)]
pub struct EofPacket {
    pub warnings: u16,
    pub status: Status,
}

impl EofPacket {
    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let header = Buf::get_u8(&mut buf)?;
        if header != 0xFE {
            return Err(protocol_err!("expected EOF (0xFE); received 0x{header:X}"));
        }

        let warnings = Buf::get_u16::<LittleEndian>(&mut buf)?;
        let status = Status::from_bits_truncate(Buf::get_u16::<LittleEndian>(&mut buf)?);

        Ok(Self { warnings, status })
    }

    /// A packet is a plausible EOF only if it is short enough — a real
    /// `OK_Packet` can also start with 0xFE once lenenc fields push its
    /// length past 9 bytes, so header byte alone is not sufficient.
    pub fn looks_like_eof(packet: &[u8]) -> bool {
        packet.first() == Some(&0xFE) && packet.len() < 9
    }
}
