use byteorder::LittleEndian;

use crate::io::BufMut;

/// `COM_STMT_FETCH`: pulls the next batch of rows from a cursor opened by
/// a `COM_STMT_EXECUTE` with a non-`CURSOR_NONE` flag (spec §4.3.2). This
/// driver never requests a server-side cursor (`Cursor::NO_CURSOR`
/// always), so this command is only here for opcode-table completeness —
/// no code path emits it.
#[derive(Debug)]
pub struct ComStmtFetch {
    pub statement_id: u32,
    pub rows: u32,
}

impl ComStmtFetch {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::STMT_FETCH);
        buf.put_u32::<LittleEndian>(self.statement_id);
        buf.put_u32::<LittleEndian>(self.rows);
    }
}
