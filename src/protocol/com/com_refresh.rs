use crate::io::BufMut;

bitflags::bitflags! {
    /// Sub-operations requested by `COM_REFRESH` (spec §4.3.2).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RefreshFlags: u8 {
        const GRANT   = 0x01;
        const LOG     = 0x02;
        const TABLES  = 0x04;
        const HOSTS   = 0x08;
        const STATUS  = 0x10;
        const THREADS = 0x20;
        const SLAVE   = 0x40;
        const MASTER  = 0x80;
    }
}

#[derive(Debug)]
pub struct ComRefresh {
    pub flags: RefreshFlags,
}

impl ComRefresh {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::REFRESH);
        buf.put_u8(self.flags.bits());
    }
}
