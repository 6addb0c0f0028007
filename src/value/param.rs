//! Host-to-MySQL parameter binding for the binary protocol (spec §4.4).

use std::borrow::Cow;

use byteorder::LittleEndian;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::io::BufMut;
use crate::protocol::TypeId;
use crate::value::temporal;

/// The `(type_id, is_unsigned)` pair sent in a `COM_STMT_EXECUTE` type
/// array ahead of each parameter's value.
#[derive(Debug, Clone, Copy)]
pub struct ParamTypeMeta {
    pub type_id: TypeId,
    pub is_unsigned: bool,
}

/// A value bound to a `?` placeholder, already classified by MySQL type.
/// Built from a host value via [`ToParam::to_param`].
#[derive(Debug, Clone)]
pub enum ParamValue<'a> {
    Null,
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    /// A plain byte slice (spec §4.4: "byte slice → VAR_STRING").
    Bytes(Cow<'a, [u8]>),
    /// An immutable string (spec §4.4: "immutable string → STRING").
    Str(Cow<'a, str>),
    /// A byte slice the caller tagged as BLOB rather than VAR_STRING
    /// (spec §4.4: "a specially-tagged byte slice → BLOB"), via the
    /// [`Blob`] wrapper.
    Blob(Cow<'a, [u8]>),
    /// Bytes written to the wire exactly as given, under a caller-supplied
    /// type code (spec §3 `ParamValue`, §4.4 "a Raw wrapper `(type_code,
    /// &bytes)` → verbatim"), via the [`Raw`] wrapper.
    Raw(TypeId, Cow<'a, [u8]>),
    Date(Date),
    Time(Time),
    DateTime(PrimitiveDateTime),
}

impl ParamValue<'_> {
    pub fn type_meta(&self) -> ParamTypeMeta {
        match self {
            ParamValue::Null => ParamTypeMeta {
                type_id: TypeId::NULL,
                is_unsigned: false,
            },
            ParamValue::I64(_) => ParamTypeMeta {
                type_id: TypeId::BIG_INT,
                is_unsigned: false,
            },
            ParamValue::U64(_) => ParamTypeMeta {
                type_id: TypeId::BIG_INT,
                is_unsigned: true,
            },
            ParamValue::F32(_) => ParamTypeMeta {
                type_id: TypeId::FLOAT,
                is_unsigned: false,
            },
            ParamValue::F64(_) => ParamTypeMeta {
                type_id: TypeId::DOUBLE,
                is_unsigned: false,
            },
            ParamValue::Bytes(_) => ParamTypeMeta {
                type_id: TypeId::VAR_CHAR,
                is_unsigned: false,
            },
            ParamValue::Str(_) => ParamTypeMeta {
                type_id: TypeId::CHAR,
                is_unsigned: false,
            },
            ParamValue::Blob(_) => ParamTypeMeta {
                type_id: TypeId::BLOB,
                is_unsigned: false,
            },
            ParamValue::Raw(type_id, _) => ParamTypeMeta {
                type_id: *type_id,
                is_unsigned: false,
            },
            ParamValue::Date(_) => ParamTypeMeta {
                type_id: TypeId::DATE,
                is_unsigned: false,
            },
            ParamValue::Time(_) => ParamTypeMeta {
                type_id: TypeId::TIME,
                is_unsigned: false,
            },
            ParamValue::DateTime(_) => ParamTypeMeta {
                type_id: TypeId::DATETIME,
                is_unsigned: false,
            },
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Appends this value's binary-protocol encoding to `buf`. NULL
    /// values contribute nothing here — they are only represented in the
    /// null-bitmap (spec §4.4).
    pub fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            ParamValue::Null => {}
            ParamValue::I64(v) => buf.put_u64::<LittleEndian>(*v as u64),
            ParamValue::U64(v) => buf.put_u64::<LittleEndian>(*v),
            ParamValue::F32(v) => buf.put_f32::<LittleEndian>(*v),
            ParamValue::F64(v) => buf.put_f64::<LittleEndian>(*v),
            ParamValue::Bytes(v) | ParamValue::Blob(v) | ParamValue::Raw(_, v) => {
                crate::io::BufMutExt::put_bytes_lenenc::<LittleEndian>(buf, v)
            }
            ParamValue::Str(v) => {
                crate::io::BufMutExt::put_str_lenenc::<LittleEndian>(buf, v)
            }
            ParamValue::Date(v) => temporal::encode_date(*v, buf),
            ParamValue::Time(v) => {
                temporal::encode_time(*v, v.microsecond() != 0, buf)
            }
            ParamValue::DateTime(v) => temporal::encode_datetime(*v, buf),
        }
    }
}

/// Implemented by every host type this driver can bind as a query
/// parameter.
pub trait ToParam {
    fn to_param(&self) -> ParamValue<'_>;
}

/// Wraps a byte slice to bind it as MySQL `BLOB` instead of the `VAR_STRING`
/// a plain `&[u8]`/`Vec<u8>` parameter gets (spec §4.4 "a specially-tagged
/// byte slice → BLOB").
#[derive(Debug, Clone, Copy)]
pub struct Blob<'a>(pub &'a [u8]);

impl ToParam for Blob<'_> {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Blob(Cow::Borrowed(self.0))
    }
}

/// Writes `bytes` to the wire exactly as given under an explicit MySQL type
/// code, bypassing the host-type mapping entirely (spec §3 `ParamValue`,
/// §4.4 "a Raw wrapper `(type_code, &bytes)` → verbatim: the value encoder
/// writes the bytes uninterpreted with the supplied type code").
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a> {
    pub type_id: TypeId,
    pub bytes: &'a [u8],
}

impl ToParam for Raw<'_> {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Raw(self.type_id, Cow::Borrowed(self.bytes))
    }
}

macro_rules! impl_to_param_int {
    ($($t:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(impl ToParam for $t {
            fn to_param(&self) -> ParamValue<'_> {
                ParamValue::$variant(*self as $cast)
            }
        })*
    };
}

impl_to_param_int!(
    i8 => I64 as i64, i16 => I64 as i64, i32 => I64 as i64, i64 => I64 as i64,
    u8 => U64 as u64, u16 => U64 as u64, u32 => U64 as u64, u64 => U64 as u64,
);

impl ToParam for bool {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::I64(*self as i64)
    }
}

impl ToParam for f32 {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::F32(*self)
    }
}

impl ToParam for f64 {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::F64(*self)
    }
}

impl ToParam for str {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Str(Cow::Borrowed(self))
    }
}

impl ToParam for String {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Str(Cow::Borrowed(self.as_str()))
    }
}

impl ToParam for [u8] {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Bytes(Cow::Borrowed(self))
    }
}

impl ToParam for Vec<u8> {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Bytes(Cow::Borrowed(self.as_slice()))
    }
}

impl ToParam for Date {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Date(*self)
    }
}

impl ToParam for Time {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::Time(*self)
    }
}

impl ToParam for PrimitiveDateTime {
    fn to_param(&self) -> ParamValue<'_> {
        ParamValue::DateTime(*self)
    }
}

impl ToParam for OffsetDateTime {
    fn to_param(&self) -> ParamValue<'_> {
        let utc = self.to_offset(UtcOffset::UTC);
        ParamValue::DateTime(PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> ParamValue<'_> {
        (**self).to_param()
    }
}

impl<T: ToParam> ToParam for Option<T> {
    fn to_param(&self) -> ParamValue<'_> {
        match self {
            Some(v) => v.to_param(),
            None => ParamValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_maps_to_string_type() {
        assert_eq!("hi".to_param().type_meta().type_id, TypeId::CHAR);
    }

    #[test]
    fn plain_bytes_map_to_var_string() {
        let bytes: &[u8] = b"hi";
        assert_eq!(bytes.to_param().type_meta().type_id, TypeId::VAR_CHAR);
    }

    #[test]
    fn tagged_blob_maps_to_blob_type() {
        let blob = Blob(b"hi");
        assert_eq!(blob.to_param().type_meta().type_id, TypeId::BLOB);
    }

    #[test]
    fn raw_carries_the_caller_supplied_type_verbatim() {
        let raw = Raw { type_id: TypeId::JSON, bytes: b"{}" };
        let param = raw.to_param();
        assert_eq!(param.type_meta().type_id, TypeId::JSON);

        let mut buf = Vec::new();
        param.encode(&mut buf);
        // Length-coded bytes: 1-byte length prefix (<=250) then the payload.
        assert_eq!(buf, [2, b'{', b'}']);
    }
}
