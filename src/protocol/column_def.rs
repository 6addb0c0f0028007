//! `ColumnDefinition41` packet (spec §4.3.5).
//!
//! https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_com_query_response_text_resultset_column_definition.html

use byteorder::LittleEndian;

use crate::error::{protocol_err, Result};
use crate::io::BufExt;
use crate::protocol::{FieldFlags, TypeId};

#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    pub schema: Option<Box<str>>,
    pub table_alias: Option<Box<str>>,
    pub table: Option<Box<str>>,
    pub column_alias: Option<Box<str>>,
    pub column: Option<Box<str>>,
    pub char_set: u16,
    pub max_size: u32,
    pub type_id: TypeId,
    pub flags: FieldFlags,
    pub decimals: u8,
}

impl ColumnDefinition {
    /// The alias, falling back to the underlying column name, mirroring
    /// how result sets are commonly addressed by consumers.
    pub fn name(&self) -> Option<&str> {
        self.column_alias.as_deref().or(self.column.as_deref())
    }

    pub fn read(mut buf: &[u8]) -> Result<Self> {
        let catalog = buf.get_str_lenenc::<LittleEndian>()?;
        if catalog != Some("def") {
            return Err(protocol_err!(
                "expected ColumnDefinition catalog \"def\"; received {catalog:?}"
            ));
        }

        let schema = buf.get_str_lenenc::<LittleEndian>()?.map(Into::into);
        let table_alias = buf.get_str_lenenc::<LittleEndian>()?.map(Into::into);
        let table = buf.get_str_lenenc::<LittleEndian>()?.map(Into::into);
        let column_alias = buf.get_str_lenenc::<LittleEndian>()?.map(Into::into);
        let column = buf.get_str_lenenc::<LittleEndian>()?.map(Into::into);

        let len_fixed_fields = buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0);
        if len_fixed_fields != 0x0c {
            return Err(protocol_err!(
                "expected fixed-fields length 0x0c; received {len_fixed_fields:#x}"
            ));
        }

        let char_set = crate::io::Buf::get_u16::<LittleEndian>(&mut buf)?;
        let max_size = crate::io::Buf::get_u32::<LittleEndian>(&mut buf)?;
        let type_id = crate::io::Buf::get_u8(&mut buf)?;
        let flags = crate::io::Buf::get_u16::<LittleEndian>(&mut buf)?;
        let decimals = crate::io::Buf::get_u8(&mut buf)?;

        Ok(Self {
            schema,
            table_alias,
            table,
            column_alias,
            column,
            char_set,
            max_size,
            type_id: TypeId(type_id),
            flags: FieldFlags::from_bits_truncate(flags),
            decimals,
        })
    }
}
