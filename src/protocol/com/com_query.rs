//! `COM_QUERY` (spec §4.3.2): text-protocol SQL execution.
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_com_query.html

use crate::io::BufMut;

#[derive(Debug)]
pub struct ComQuery<'a> {
    pub sql: &'a str,
}

impl ComQuery<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::QUERY);
        buf.put_str(self.sql);
    }
}
