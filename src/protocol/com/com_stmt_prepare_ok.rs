//! `COM_STMT_PREPARE` response header (spec §4.3.2).
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_com_stmt_prepare.html#sect_protocol_com_stmt_prepare_response_ok

use byteorder::LittleEndian;

use crate::error::{protocol_err, Result};
use crate::io::Buf;

#[derive(Debug, Clone, Copy)]
pub struct ComStmtPrepareOk {
    pub statement_id: u32,
    /// Columns in the result set this statement produces, or 0 for
    /// statements that return no rows.
    pub columns: u16,
    /// Number of `?` placeholders.
    pub params: u16,
    pub warnings: u16,
}

impl ComStmtPrepareOk {
    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let header = Buf::get_u8(&mut buf)?;
        if header != 0x00 {
            return Err(protocol_err!(
                "expected COM_STMT_PREPARE_OK (0x00); received 0x{header:X}"
            ));
        }

        let statement_id = Buf::get_u32::<LittleEndian>(&mut buf)?;
        let columns = Buf::get_u16::<LittleEndian>(&mut buf)?;
        let params = Buf::get_u16::<LittleEndian>(&mut buf)?;

        Buf::advance(&mut buf, 1)?; // filler

        let warnings = Buf::get_u16::<LittleEndian>(&mut buf)?;

        Ok(Self {
            statement_id,
            columns,
            params,
            warnings,
        })
    }
}
