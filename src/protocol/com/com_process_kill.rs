use byteorder::LittleEndian;

use crate::io::BufMut;

/// `COM_PROCESS_KILL`: asks the server to kill a connection by thread id
/// (spec §4.3.2). Used by integration tests to force a mid-session
/// disconnect and exercise reconnect (spec §8 scenario 6).
#[derive(Debug)]
pub struct ComProcessKill {
    pub thread_id: u32,
}

impl ComProcessKill {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::PROCESS_KILL);
        buf.put_u32::<LittleEndian>(self.thread_id);
    }
}
