use byteorder::LittleEndian;

use crate::io::BufMut;

/// `COM_STMT_CLOSE`: deallocates a prepared statement server-side. Sent
/// with no response expected (spec §4.3.2).
#[derive(Debug)]
pub struct ComStmtClose {
    pub statement_id: u32,
}

impl ComStmtClose {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::STMT_CLOSE);
        buf.put_u32::<LittleEndian>(self.statement_id);
    }
}
