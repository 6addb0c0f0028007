//! `COM_SET_OPTION` (spec §4.3.2): toggles `CLIENT_MULTI_STATEMENTS` on an
//! already-open connection.
//!
//! Note: opcode `0x1b`, not `0x1a` — `0x1a` is `COM_STMT_RESET` in the
//! real wire protocol (`enum_server_command`).

use byteorder::LittleEndian;

use crate::io::BufMut;

#[derive(Debug, Copy, Clone)]
#[repr(u16)]
pub enum SetOption {
    MultiStatementsOn = 0x00,
    MultiStatementsOff = 0x01,
}

#[derive(Debug)]
pub struct ComSetOption {
    pub option: SetOption,
}

impl ComSetOption {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::SET_OPTION);
        buf.put_u16::<LittleEndian>(self.option as u16);
    }
}
