//! Column count packet preceding a result set's column definitions
//! (spec §4.3.5).

use byteorder::LittleEndian;

use crate::error::Result;
use crate::io::BufExt;

#[derive(Debug, Clone, Copy)]
pub struct ColumnCount {
    pub columns: u64,
}

impl ColumnCount {
    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let columns = buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0);
        Ok(Self { columns })
    }
}
