use crate::io::BufMut;

/// `COM_DROP_DB`: drops a schema (spec §4.3.2).
#[derive(Debug)]
pub struct ComDropDb<'a> {
    pub schema: &'a str,
}

impl ComDropDb<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::DROP_DB);
        buf.put_str(self.schema);
    }
}
