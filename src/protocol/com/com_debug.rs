use crate::io::BufMut;

/// `COM_DEBUG`: asks the server to dump internal debug info to its own
/// log, not to the client connection (spec §4.3.2).
#[derive(Debug)]
pub struct ComDebug;

impl ComDebug {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::DEBUG);
    }
}
