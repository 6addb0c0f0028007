use crate::io::BufMut;

/// `COM_PING`: round-trips a no-op to the server. Used by the idle-timer
/// keepalive ping (spec §4.5).
#[derive(Debug)]
pub struct ComPing;

impl ComPing {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::PING);
    }
}
