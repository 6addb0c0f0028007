use crate::io::BufMut;

/// `COM_STATISTICS`: requests a human-readable server status line (uptime,
/// query counts). The response is a single length-prefixed string rather
/// than an OK/ERR/result-set, so it is handled separately from the usual
/// response classifier (spec §4.3.2/§4.3.3).
#[derive(Debug)]
pub struct ComStatistics;

impl ComStatistics {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::STATISTICS);
    }
}
