use crate::io::BufMut;

/// `COM_CREATE_DB`: creates a schema. Superseded by `CREATE DATABASE` via
/// `COM_QUERY` in modern usage, kept for completeness of the opcode table
/// (spec §4.3.2).
#[derive(Debug)]
pub struct ComCreateDb<'a> {
    pub schema: &'a str,
}

impl ComCreateDb<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::CREATE_DB);
        buf.put_str(self.schema);
    }
}
