use crate::io::BufMut;

/// `COM_SHUTDOWN`: requests server shutdown. The single `u8` argument is a
/// legacy shutdown-level code that the server has ignored since MySQL 5.7;
/// kept for opcode-table completeness (spec §4.3.2).
#[derive(Debug)]
pub struct ComShutdown {
    pub level: u8,
}

impl ComShutdown {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::SHUTDOWN);
        buf.put_u8(self.level);
    }
}
