//! Result row decoding for both the text and binary protocols
//! (spec §4.3.5 / §4.4). A row is stored as the raw packet payload plus a
//! per-column `Option<Range<usize>>` slice into it, so decoding a row
//! never copies column data.

use std::ops::Range;

use byteorder::LittleEndian;

use crate::error::{protocol_err, Result};
use crate::io::Buf;
use crate::protocol::TypeId;

#[derive(Debug, Clone)]
pub struct Row {
    buffer: Box<[u8]>,
    values: Box<[Option<Range<usize>>]>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let range = self.values[index].as_ref()?;
        Some(&self.buffer[range.start..range.end])
    }
}

/// Length of a length-coded value starting at `buf[0]`, header included.
fn lenenc_span(buf: &[u8]) -> usize {
    match buf[0] {
        0xFB => 1,
        0xFC => 3 + LittleEndian::read_u16(&buf[1..]) as usize,
        0xFD => 4 + LittleEndian::read_u24(&buf[1..]) as usize,
        0xFE => 9 + LittleEndian::read_u64(&buf[1..]) as usize,
        n => 1 + n as usize,
    }
}

impl Row {
    /// Decodes a text-protocol row: every column is a length-coded
    /// string, `0xFB` marking SQL NULL (spec §4.3.5).
    pub fn decode_text(buf: &[u8], columns: usize) -> Result<Self> {
        let buffer: Box<[u8]> = buf.into();
        let mut values = Vec::with_capacity(columns);
        let mut index = 0;

        for _ in 0..columns {
            if buffer[index] == 0xFB {
                values.push(None);
                index += 1;
                continue;
            }

            let span = lenenc_span(&buffer[index..]);
            let header_len = span - (lenenc_value_len(&buffer[index..]));
            values.push(Some((index + header_len)..(index + span)));
            index += span;
        }

        Ok(Self {
            buffer,
            values: values.into_boxed_slice(),
        })
    }

    /// Decodes a binary-protocol row (spec §4.4): a leading NULL-bitmap
    /// with an offset-by-2 bit numbering, then each non-NULL column
    /// encoded per its declared type.
    pub fn decode_binary(mut buf: &[u8], columns: &[TypeId]) -> Result<Self> {
        let header = Buf::get_u8(&mut buf)?;
        if header != 0x00 {
            return Err(protocol_err!("expected binary row header (0x00); received 0x{header:X}"));
        }

        let null_bitmap_len = (columns.len() + 7 + 2) / 8;
        if buf.remaining() < null_bitmap_len {
            return Err(protocol_err!("binary row truncated before NULL-bitmap"));
        }
        let null_bitmap = &buf[..null_bitmap_len];
        Buf::advance(&mut buf, null_bitmap_len)?;

        let buffer: Box<[u8]> = buf.into();
        let mut values = Vec::with_capacity(columns.len());
        let mut index = 0;

        for (col, type_id) in columns.iter().enumerate() {
            // bit numbering starts at offset 2 (spec §4.4).
            let bit = col + 2;
            if null_bitmap[bit / 8] & (1 << (bit % 8)) != 0 {
                values.push(None);
                continue;
            }

            let size = fixed_binary_width(*type_id, &buffer[index..])?;
            values.push(Some(index..(index + size)));
            index += size;
        }

        Ok(Self {
            buffer,
            values: values.into_boxed_slice(),
        })
    }
}

/// Number of bytes in a length-coded value's *payload* (i.e. `lenenc_span`
/// minus its own header length).
fn lenenc_value_len(buf: &[u8]) -> usize {
    match buf[0] {
        0xFC => LittleEndian::read_u16(&buf[1..]) as usize,
        0xFD => LittleEndian::read_u24(&buf[1..]) as usize,
        0xFE => LittleEndian::read_u64(&buf[1..]) as usize,
        n => n as usize,
    }
}

fn fixed_binary_width(type_id: TypeId, tail: &[u8]) -> Result<usize> {
    Ok(match type_id {
        TypeId::TINY_INT => 1,
        TypeId::SMALL_INT | TypeId::YEAR => 2,
        TypeId::INT | TypeId::MEDIUM_INT | TypeId::FLOAT => 4,
        TypeId::BIG_INT | TypeId::DOUBLE => 8,
        TypeId::DATE => 1 + *tail.first().unwrap_or(&0) as usize,
        TypeId::TIME => 1 + *tail.first().unwrap_or(&0) as usize,
        TypeId::DATETIME | TypeId::TIMESTAMP => 1 + *tail.first().unwrap_or(&0) as usize,
        id if id.is_blob_like() || id == TypeId::NEWDECIMAL || id == TypeId::BIT || id == TypeId::ENUM || id == TypeId::SET => {
            lenenc_span(tail)
        }
        id => return Err(protocol_err!("unsupported binary column type id: {}", id.0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FromValue;

    /// The byte range a binary DATE/TIME/DATETIME column stores includes
    /// its own length-prefix byte (spec §4.1); `FromValue` impls for
    /// `time::Date`/`Time`/`PrimitiveDateTime` must account for that
    /// prefix rather than expecting it already stripped.
    #[test]
    fn decode_binary_row_yields_date_column_with_length_prefix_intact() {
        let mut packet = vec![0x00, 0b0000_0000]; // header, null-bitmap (no NULLs)
        packet.push(4); // DATE length
        packet.extend_from_slice(&2010u16.to_le_bytes());
        packet.push(10); // month
        packet.push(17); // day

        let row = Row::decode_binary(&packet, &[TypeId::DATE]).unwrap();
        let cell = crate::value::ColumnValue::new(row.get(0), TypeId::DATE, true);
        let date = time::Date::from_value(cell).unwrap();
        assert_eq!(date, time::Date::from_calendar_date(2010, time::Month::October, 17).unwrap());
    }

    #[test]
    fn decode_binary_row_yields_zero_length_date_as_sentinel() {
        let packet = vec![0x00, 0b0000_0000, 0]; // DATE length 0 (zero date)

        let row = Row::decode_binary(&packet, &[TypeId::DATE]).unwrap();
        let cell = crate::value::ColumnValue::new(row.get(0), TypeId::DATE, true);
        let date = time::Date::from_value(cell).unwrap();
        assert_eq!(date, time::Date::from_calendar_date(0, time::Month::January, 1).unwrap());
    }
}
