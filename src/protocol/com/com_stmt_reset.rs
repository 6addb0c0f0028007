use byteorder::LittleEndian;

use crate::io::BufMut;

/// `COM_STMT_RESET`: clears buffered parameter data and server-side
/// cursor state for a prepared statement without deallocating it.
#[derive(Debug)]
pub struct ComStmtReset {
    pub statement_id: u32,
}

impl ComStmtReset {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::STMT_RESET);
        buf.put_u32::<LittleEndian>(self.statement_id);
    }
}
