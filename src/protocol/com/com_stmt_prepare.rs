//! `COM_STMT_PREPARE` (spec §4.3.2).

use crate::io::BufMut;

#[derive(Debug)]
pub struct ComStmtPrepare<'a> {
    pub sql: &'a str,
}

impl ComStmtPrepare<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::STMT_PREPARE);
        buf.put_str(self.sql);
    }
}
