use crate::io::BufMut;

/// `COM_INIT_DB`: switches the connection's default schema.
#[derive(Debug)]
pub struct ComInitDb<'a> {
    pub schema: &'a str,
}

impl ComInitDb<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::INIT_DB);
        buf.put_str(self.schema);
    }
}
