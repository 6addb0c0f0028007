use crate::io::BufMut;

/// `COM_QUIT`: tells the server this connection is closing gracefully.
#[derive(Debug)]
pub struct ComQuit;

impl ComQuit {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::QUIT);
    }
}
