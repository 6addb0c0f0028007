use byteorder::ByteOrder;

use crate::error::{Error, FramingError};

/// Cursor-style reads over a `&[u8]`. Every method advances `self` past the
/// bytes it consumed. Short buffers fail with [`FramingError::Malformed`]
/// instead of panicking (spec §9: codec routines must be fallible, not
/// panic/recover, so a single adapter at the command boundary can turn
/// every decode failure into a typed [`Error::Framing`]).
pub trait Buf<'a> {
    fn advance(&mut self, cnt: usize) -> crate::error::Result<()>;

    fn get_u8(&mut self) -> crate::error::Result<u8>;

    fn get_i8(&mut self) -> crate::error::Result<i8>;

    fn get_u16<T: ByteOrder>(&mut self) -> crate::error::Result<u16>;

    fn get_i16<T: ByteOrder>(&mut self) -> crate::error::Result<i16>;

    fn get_u24<T: ByteOrder>(&mut self) -> crate::error::Result<u32>;

    fn get_u32<T: ByteOrder>(&mut self) -> crate::error::Result<u32>;

    fn get_i32<T: ByteOrder>(&mut self) -> crate::error::Result<i32>;

    fn get_u64<T: ByteOrder>(&mut self) -> crate::error::Result<u64>;

    fn get_i64<T: ByteOrder>(&mut self) -> crate::error::Result<i64>;

    fn get_f32<T: ByteOrder>(&mut self) -> crate::error::Result<f32>;

    fn get_f64<T: ByteOrder>(&mut self) -> crate::error::Result<f64>;

    fn get_bytes(&mut self, len: usize) -> crate::error::Result<&'a [u8]>;

    fn get_str(&mut self, len: usize) -> crate::error::Result<&'a str>;

    /// NUL-terminated string (spec §4.1): bytes up to, and consuming, a 0 byte.
    fn get_str_nul(&mut self) -> crate::error::Result<&'a str>;

    fn remaining(&self) -> usize;
}

fn malformed<T>(why: &'static str) -> crate::error::Result<T> {
    Err(Error::Framing(FramingError::Malformed(why)))
}

impl<'a> Buf<'a> for &'a [u8] {
    fn advance(&mut self, cnt: usize) -> crate::error::Result<()> {
        if cnt > self.len() {
            return malformed("advance past end of buffer");
        }
        *self = &self[cnt..];
        Ok(())
    }

    fn get_u8(&mut self) -> crate::error::Result<u8> {
        if self.is_empty() {
            return malformed("expected 1 byte, buffer empty");
        }
        let val = self[0];
        *self = &self[1..];
        Ok(val)
    }

    fn get_i8(&mut self) -> crate::error::Result<i8> {
        self.get_u8().map(|v| v as i8)
    }

    fn get_u16<T: ByteOrder>(&mut self) -> crate::error::Result<u16> {
        if self.len() < 2 {
            return malformed("expected 2 bytes");
        }
        let val = T::read_u16(self);
        *self = &self[2..];
        Ok(val)
    }

    fn get_i16<T: ByteOrder>(&mut self) -> crate::error::Result<i16> {
        self.get_u16::<T>().map(|v| v as i16)
    }

    fn get_u24<T: ByteOrder>(&mut self) -> crate::error::Result<u32> {
        if self.len() < 3 {
            return malformed("expected 3 bytes");
        }
        let val = T::read_u24(self);
        *self = &self[3..];
        Ok(val)
    }

    fn get_u32<T: ByteOrder>(&mut self) -> crate::error::Result<u32> {
        if self.len() < 4 {
            return malformed("expected 4 bytes");
        }
        let val = T::read_u32(self);
        *self = &self[4..];
        Ok(val)
    }

    fn get_i32<T: ByteOrder>(&mut self) -> crate::error::Result<i32> {
        self.get_u32::<T>().map(|v| v as i32)
    }

    fn get_u64<T: ByteOrder>(&mut self) -> crate::error::Result<u64> {
        if self.len() < 8 {
            return malformed("expected 8 bytes");
        }
        let val = T::read_u64(self);
        *self = &self[8..];
        Ok(val)
    }

    fn get_i64<T: ByteOrder>(&mut self) -> crate::error::Result<i64> {
        self.get_u64::<T>().map(|v| v as i64)
    }

    fn get_f32<T: ByteOrder>(&mut self) -> crate::error::Result<f32> {
        if self.len() < 4 {
            return malformed("expected 4 bytes");
        }
        let val = T::read_f32(self);
        *self = &self[4..];
        Ok(val)
    }

    fn get_f64<T: ByteOrder>(&mut self) -> crate::error::Result<f64> {
        if self.len() < 8 {
            return malformed("expected 8 bytes");
        }
        let val = T::read_f64(self);
        *self = &self[8..];
        Ok(val)
    }

    fn get_bytes(&mut self, len: usize) -> crate::error::Result<&'a [u8]> {
        if self.len() < len {
            return malformed("expected N bytes, buffer too short");
        }
        let (head, tail) = self.split_at(len);
        *self = tail;
        Ok(head)
    }

    fn get_str(&mut self, len: usize) -> crate::error::Result<&'a str> {
        let bytes = self.get_bytes(len)?;
        std::str::from_utf8(bytes).or_else(|_| malformed("invalid utf-8"))
    }

    fn get_str_nul(&mut self) -> crate::error::Result<&'a str> {
        let nul = memchr::memchr(0, self).ok_or_else(|| {
            Error::Framing(FramingError::Malformed("missing NUL terminator"))
        })?;
        let s = std::str::from_utf8(&self[..nul]).or_else(|_| malformed("invalid utf-8"))?;
        *self = &self[nul + 1..];
        Ok(s)
    }

    fn remaining(&self) -> usize {
        self.len()
    }
}
