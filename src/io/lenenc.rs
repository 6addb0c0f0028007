//! Length-coded binary (LCB) and length-coded string (LCS) (spec §4.1).
//!
//! ```text
//! n            (1 byte)  if n <= 250
//! 0xFB                   NULL
//! 0xFC + 2 bytes         if n <= 0xFFFF
//! 0xFD + 3 bytes         if n <= 0xFFFFFF
//! 0xFE + 8 bytes         otherwise
//! ```

use byteorder::ByteOrder;

use super::{Buf, BufMut};

pub trait BufExt<'a> {
    fn get_uint_lenenc<T: ByteOrder>(&mut self) -> crate::error::Result<Option<u64>>;

    fn get_str_lenenc<T: ByteOrder>(&mut self) -> crate::error::Result<Option<&'a str>>;

    fn get_bytes_lenenc<T: ByteOrder>(&mut self) -> crate::error::Result<Option<&'a [u8]>>;
}

impl<'a> BufExt<'a> for &'a [u8] {
    fn get_uint_lenenc<T: ByteOrder>(&mut self) -> crate::error::Result<Option<u64>> {
        Ok(match Buf::get_u8(self)? {
            0xFB => None,
            0xFC => Some(u64::from(Buf::get_u16::<T>(self)?)),
            0xFD => Some(u64::from(Buf::get_u24::<T>(self)?)),
            0xFE => Some(Buf::get_u64::<T>(self)?),
            value => Some(u64::from(value)),
        })
    }

    fn get_str_lenenc<T: ByteOrder>(&mut self) -> crate::error::Result<Option<&'a str>> {
        match self.get_uint_lenenc::<T>()? {
            Some(len) => Ok(Some(Buf::get_str(self, len as usize)?)),
            None => Ok(None),
        }
    }

    fn get_bytes_lenenc<T: ByteOrder>(&mut self) -> crate::error::Result<Option<&'a [u8]>> {
        match self.get_uint_lenenc::<T>()? {
            Some(len) => Ok(Some(Buf::get_bytes(self, len as usize)?)),
            None => Ok(None),
        }
    }
}

pub trait BufMutExt {
    /// `None` encodes as the LCB NULL marker (`0xFB`) with no payload.
    fn put_uint_lenenc<T: ByteOrder>(&mut self, val: Option<u64>);

    fn put_str_lenenc<T: ByteOrder>(&mut self, val: &str);

    fn put_bytes_lenenc<T: ByteOrder>(&mut self, val: &[u8]);
}

impl BufMutExt for Vec<u8> {
    fn put_uint_lenenc<T: ByteOrder>(&mut self, value: Option<u64>) {
        let Some(value) = value else {
            self.push(0xFB);
            return;
        };

        if value > 0xFF_FFFF {
            self.push(0xFE);
            BufMut::put_u64::<T>(self, value);
        } else if value > u64::from(u16::MAX) {
            self.push(0xFD);
            BufMut::put_u24::<T>(self, value as u32);
        } else if value > u64::from(u8::MAX) {
            self.push(0xFC);
            BufMut::put_u16::<T>(self, value as u16);
        } else {
            match value {
                // These single-byte values collide with the marker bytes
                // above, so they must be promoted to the 2-byte encoding.
                0xFB..=0xFF => {
                    self.push(0xFC);
                    BufMut::put_u16::<T>(self, value as u16);
                }
                _ => self.push(value as u8),
            }
        }
    }

    fn put_str_lenenc<T: ByteOrder>(&mut self, val: &str) {
        self.put_uint_lenenc::<T>(Some(val.len() as u64));
        BufMut::put_str(self, val);
    }

    fn put_bytes_lenenc<T: ByteOrder>(&mut self, val: &[u8]) {
        self.put_uint_lenenc::<T>(Some(val.len() as u64));
        BufMut::put_bytes(self, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::LittleEndian;

    fn enc(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.put_uint_lenenc::<LittleEndian>(Some(n));
        buf
    }

    #[test]
    fn lcb_edge_cases() {
        assert_eq!(enc(0), vec![0x00]);
        assert_eq!(enc(250), vec![0xFA]);
        assert_eq!(enc(251), vec![0xFC, 0xFB, 0x00]);
        assert_eq!(enc(0x10000), vec![0xFD, 0x00, 0x00, 0x01]);
        assert_eq!(
            enc(0x1000000),
            vec![0xFE, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn lcb_null() {
        let mut buf = Vec::new();
        buf.put_uint_lenenc::<LittleEndian>(None);
        assert_eq!(buf, vec![0xFB]);

        let mut slice: &[u8] = &buf;
        assert_eq!(slice.get_uint_lenenc::<LittleEndian>().unwrap(), None);
    }

    #[test]
    fn lcb_roundtrip_exhaustive_lengths() {
        // encoding length must be exactly 1, 3, 4, or 9 bytes by range.
        let cases: &[(u64, usize)] = &[
            (0, 1),
            (250, 1),
            (251, 3),
            (0xFFFF, 3),
            (0x10000, 4),
            (0xFF_FFFF, 4),
            (0x100_0000, 9),
            (u64::MAX, 9),
        ];
        for &(n, len) in cases {
            let buf = enc(n);
            assert_eq!(buf.len(), len, "n={n}");
            let mut slice: &[u8] = &buf;
            assert_eq!(slice.get_uint_lenenc::<LittleEndian>().unwrap(), Some(n));
        }
    }

    #[test]
    fn lcs_roundtrip_including_empty_and_null() {
        let mut buf = Vec::new();
        buf.put_str_lenenc::<LittleEndian>("");
        buf.put_str_lenenc::<LittleEndian>("hello world");
        buf.put_uint_lenenc::<LittleEndian>(None);

        let mut slice: &[u8] = &buf;
        assert_eq!(slice.get_str_lenenc::<LittleEndian>().unwrap(), Some(""));
        assert_eq!(
            slice.get_str_lenenc::<LittleEndian>().unwrap(),
            Some("hello world")
        );
        assert_eq!(slice.get_str_lenenc::<LittleEndian>().unwrap(), None);
    }
}
