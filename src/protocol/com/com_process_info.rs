use crate::io::BufMut;

/// `COM_PROCESS_INFO`: equivalent to `SHOW PROCESSLIST`, returned as an
/// ordinary result set (spec §4.3.2).
#[derive(Debug)]
pub struct ComProcessInfo;

impl ComProcessInfo {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::PROCESS_INFO);
    }
}
