//! `COM_STMT_EXECUTE` (spec §4.3.2 / §4.4): binds parameters to a
//! prepared statement and executes it via the binary protocol.
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_com_stmt_execute.html

use byteorder::LittleEndian;

use crate::io::BufMut;
use crate::value::ParamTypeMeta;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cursor: u8 {
        const NO_CURSOR = 0;
        const READ_ONLY = 1;
        const FOR_UPDATE = 2;
        const SCROLLABLE = 4;
    }
}

#[derive(Debug)]
pub struct ComStmtExecute<'a> {
    pub statement_id: u32,
    pub cursor: Cursor,
    /// Already wire-encoded binary parameter values, concatenated in
    /// parameter order (spec §4.4).
    pub params: &'a [u8],
    /// `(param_count + 7) / 8` bytes, set for NULL parameters. Empty iff
    /// this statement takes no parameters.
    pub null_bitmap: &'a [u8],
    pub param_types: &'a [ParamTypeMeta],
    /// Whether to (re-)send the parameter type array this execution.
    /// Starts `true` for a freshly prepared or reset statement and flips
    /// to `false` after a successful execute (spec §4.3.6); the
    /// null-bitmap and parameter values are always sent regardless.
    pub rebind: bool,
}

impl ComStmtExecute<'_> {
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.put_u8(super::opcode::STMT_EXECUTE);
        buf.put_u32::<LittleEndian>(self.statement_id);
        buf.put_u8(self.cursor.bits());
        buf.put_u32::<LittleEndian>(1); // iteration-count, always 1

        if !self.param_types.is_empty() {
            buf.put_bytes(self.null_bitmap);
            buf.put_u8(self.rebind as u8);

            if self.rebind {
                for ty in self.param_types {
                    buf.put_u8(ty.type_id.0);
                    buf.put_u8(if ty.is_unsigned { 0x80 } else { 0x00 });
                }
            }

            buf.put_bytes(self.params);
        }
    }
}
