use byteorder::LittleEndian;

use crate::io::BufMut;

/// `COM_STMT_SEND_LONG_DATA`: streams a parameter value to the server in
/// chunks ahead of `COM_STMT_EXECUTE`, bypassing the usual inline binary
/// encoding (spec §4.4's chunked-parameter upload path). No response is
/// sent for this command, successful or not — a failure only surfaces
/// when the statement is later executed.
#[derive(Debug)]
pub struct ComStmtSendLongData<'a> {
    pub statement_id: u32,
    pub param_index: u16,
    pub chunk: &'a [u8],
}

impl ComStmtSendLongData<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::STMT_SEND_LONG_DATA);
        buf.put_u32::<LittleEndian>(self.statement_id);
        buf.put_u16::<LittleEndian>(self.param_index);
        buf.put_bytes(self.chunk);
    }
}
