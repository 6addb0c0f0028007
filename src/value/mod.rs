//! Column value decoding (spec §4.4) and parameter binding (spec §4.4.1).

mod param;
mod password;
mod temporal;

pub use param::{Blob, ParamTypeMeta, ParamValue, Raw, ToParam};
pub use password::{scramble_caching_sha2, scramble_native, scramble_old_password};

use byteorder::LittleEndian;

use crate::error::{Error, Result};
use crate::io::Buf;
use crate::protocol::TypeId;

/// A single column's raw bytes plus enough metadata to decode them,
/// handed to [`FromValue::from_value`]. `None` bytes means SQL NULL.
#[derive(Debug, Clone, Copy)]
pub struct ColumnValue<'a> {
    pub bytes: Option<&'a [u8]>,
    pub type_id: TypeId,
    pub binary: bool,
}

impl<'a> ColumnValue<'a> {
    pub fn new(bytes: Option<&'a [u8]>, type_id: TypeId, binary: bool) -> Self {
        ColumnValue {
            bytes,
            type_id,
            binary,
        }
    }

    fn require(&self) -> Result<&'a [u8]> {
        self.bytes
            .ok_or_else(|| Error::protocol("unexpected NULL for a non-Option column binding"))
    }

    fn as_text_str(&self) -> Result<&'a str> {
        std::str::from_utf8(self.require()?)
            .map_err(|_| Error::protocol("column value is not valid utf-8"))
    }
}

/// Implemented by every host type that can be materialized from a result
/// column. Both the text protocol (`COM_QUERY`) and binary protocol
/// (`COM_STMT_EXECUTE`) funnel through this trait so callers never need
/// to know which protocol produced a row.
pub trait FromValue<'a>: Sized {
    fn from_value(value: ColumnValue<'a>) -> Result<Self>;
}

impl<'a, T: FromValue<'a>> FromValue<'a> for Option<T> {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        if value.bytes.is_none() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

macro_rules! impl_from_value_int {
    ($($t:ty),* $(,)?) => {
        $(impl<'a> FromValue<'a> for $t {
            fn from_value(value: ColumnValue<'a>) -> Result<Self> {
                if value.binary {
                    decode_binary_int(&value)
                } else {
                    let s = value.as_text_str()?;
                    atoi::atoi(s.as_bytes())
                        .ok_or_else(|| Error::protocol(format!("not a valid integer: {s:?}")))
                }
            }
        })*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

fn decode_binary_int<T: TryFrom<i128>>(value: &ColumnValue<'_>) -> Result<T> {
    let mut buf = value.require()?;
    let raw: i128 = match value.type_id {
        TypeId::TINY_INT => Buf::get_i8(&mut buf)? as i128,
        TypeId::SMALL_INT | TypeId::YEAR => Buf::get_i16::<LittleEndian>(&mut buf)? as i128,
        TypeId::INT | TypeId::MEDIUM_INT => Buf::get_i32::<LittleEndian>(&mut buf)? as i128,
        TypeId::BIG_INT => Buf::get_i64::<LittleEndian>(&mut buf)? as i128,
        id => return Err(Error::protocol(format!("cannot decode type id {} as an integer", id.0))),
    };
    T::try_from(raw).map_err(|_| Error::protocol("integer value out of range for target type"))
}

impl<'a> FromValue<'a> for f32 {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        if value.binary {
            let mut buf = value.require()?;
            Ok(match value.type_id {
                TypeId::FLOAT => Buf::get_f32::<LittleEndian>(&mut buf)?,
                TypeId::DOUBLE => Buf::get_f64::<LittleEndian>(&mut buf)? as f32,
                id => return Err(Error::protocol(format!("cannot decode type id {} as f32", id.0))),
            })
        } else {
            let s = value.as_text_str()?;
            s.parse().map_err(|_| Error::protocol(format!("not a valid float: {s:?}")))
        }
    }
}

impl<'a> FromValue<'a> for f64 {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        if value.binary {
            let mut buf = value.require()?;
            Ok(match value.type_id {
                TypeId::FLOAT => Buf::get_f32::<LittleEndian>(&mut buf)? as f64,
                TypeId::DOUBLE => Buf::get_f64::<LittleEndian>(&mut buf)?,
                id => return Err(Error::protocol(format!("cannot decode type id {} as f64", id.0))),
            })
        } else {
            let s = value.as_text_str()?;
            s.parse().map_err(|_| Error::protocol(format!("not a valid float: {s:?}")))
        }
    }
}

impl<'a> FromValue<'a> for bool {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        Ok(i64::from_value(value)? != 0)
    }
}

impl<'a> FromValue<'a> for String {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        Ok(value.as_text_str()?.to_owned())
    }
}

impl<'a> FromValue<'a> for Vec<u8> {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        Ok(value.require()?.to_vec())
    }
}

impl<'a> FromValue<'a> for time::Date {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        let buf = value.require()?;
        if value.binary {
            temporal::decode_date(buf)
        } else {
            let s = value.as_text_str()?;
            let (y, m, d) = parse_ymd(s)?;
            let month = time::Month::try_from(m).map_err(|_| Error::protocol("invalid month"))?;
            time::Date::from_calendar_date(y, month, d)
                .map_err(|e| Error::protocol(format!("invalid date: {e}")))
        }
    }
}

impl<'a> FromValue<'a> for time::Time {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        let buf = value.require()?;
        if value.binary {
            temporal::decode_time(buf)
        } else {
            let s = value.as_text_str()?;
            parse_hms(s)
        }
    }
}

impl<'a> FromValue<'a> for time::PrimitiveDateTime {
    fn from_value(value: ColumnValue<'a>) -> Result<Self> {
        let buf = value.require()?;
        if value.binary {
            temporal::decode_datetime(buf)
        } else {
            let s = value.as_text_str()?;
            let (date_part, time_part) = s.split_once(' ').unwrap_or((s, "00:00:00"));
            let (y, m, d) = parse_ymd(date_part)?;
            let month = time::Month::try_from(m).map_err(|_| Error::protocol("invalid month"))?;
            let date = time::Date::from_calendar_date(y, month, d)
                .map_err(|e| Error::protocol(format!("invalid date: {e}")))?;
            Ok(time::PrimitiveDateTime::new(date, parse_hms(time_part)?))
        }
    }
}

fn parse_ymd(s: &str) -> Result<(i32, u8, u8)> {
    let mut parts = s.splitn(3, '-');
    let (y, m, d) = (
        parts.next().unwrap_or(""),
        parts.next().unwrap_or(""),
        parts.next().unwrap_or(""),
    );
    Ok((
        y.parse().map_err(|_| Error::protocol("invalid year"))?,
        m.parse().map_err(|_| Error::protocol("invalid month"))?,
        d.parse().map_err(|_| Error::protocol("invalid day"))?,
    ))
}

fn parse_hms(s: &str) -> Result<time::Time> {
    let mut parts = s.splitn(3, ':');
    let hour: u8 = parts
        .next()
        .unwrap_or("0")
        .parse()
        .map_err(|_| Error::protocol("invalid hour"))?;
    let minute: u8 = parts
        .next()
        .unwrap_or("0")
        .parse()
        .map_err(|_| Error::protocol("invalid minute"))?;
    let sec_field = parts.next().unwrap_or("0");
    let (sec_str, micro) = sec_field.split_once('.').unwrap_or((sec_field, "0"));
    let second: u8 = sec_str.parse().map_err(|_| Error::protocol("invalid second"))?;
    let micros: u32 = format!("{micro:0<6}")[..6]
        .parse()
        .map_err(|_| Error::protocol("invalid fractional seconds"))?;

    time::Time::from_hms_micro(hour, minute, second, micros)
        .map_err(|e| Error::protocol(format!("invalid time: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_integer() {
        let v = ColumnValue::new(Some(b"42"), TypeId::INT, false);
        assert_eq!(i32::from_value(v).unwrap(), 42);
    }

    #[test]
    fn decodes_binary_integer() {
        let bytes = 42i32.to_le_bytes();
        let v = ColumnValue::new(Some(&bytes), TypeId::INT, true);
        assert_eq!(i32::from_value(v).unwrap(), 42);
    }

    #[test]
    fn null_decodes_to_none() {
        let v = ColumnValue::new(None, TypeId::INT, false);
        assert_eq!(Option::<i32>::from_value(v).unwrap(), None);
    }

    #[test]
    fn decodes_text_datetime_with_fractional_seconds() {
        let v = ColumnValue::new(Some(b"2010-10-17 19:27:30.5"), TypeId::DATETIME, false);
        let dt = time::PrimitiveDateTime::from_value(v).unwrap();
        assert_eq!(dt.hour(), 19);
        assert_eq!(dt.microsecond(), 500_000);
    }
}
