//! Binary-protocol DATE/TIME/DATETIME/TIMESTAMP encoding (spec §4.4.1).
//!
//! Every temporal value is length-prefixed and MySQL compresses it to the
//! shortest form that loses no information:
//!
//! ```text
//! DATE:              5 bytes: len(4) year(2) month(1) day(1)
//! TIME:    8 or 12 bytes: len is_negative(1) days(4) h(1) m(1) s(1) [us(4)]
//! DATETIME/TIMESTAMP: 4, 7 or 11 bytes: len year(2) month(1) day(1) [h m s [us(4)]]
//! ```
//!
//! Negative TIME values (durations) are not produced by this driver and
//! are rejected on decode — every use here is a time-of-day, not an
//! interval.

use byteorder::LittleEndian;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::error::{protocol_err, Error, Result};
use crate::io::{Buf, BufMut};

pub fn encode_date(date: Date, buf: &mut Vec<u8>) {
    buf.put_u8(4);
    encode_date_body(date, buf);
}

fn encode_date_body(date: Date, buf: &mut Vec<u8>) {
    buf.put_u16::<LittleEndian>(date.year() as u16);
    buf.put_u8(date.month() as u8);
    buf.put_u8(date.day());
}

pub fn decode_date(mut buf: &[u8]) -> Result<Date> {
    let len = Buf::get_u8(&mut buf)?;
    if len == 0 {
        return Date::from_calendar_date(0, Month::January, 1)
            .map_err(|e| Error::protocol(format!("invalid date: {e}")));
    }
    decode_date_body(&mut buf)
}

/// `include_micros` selects the 12-byte form over the 8-byte one.
pub fn encode_time(time: Time, include_micros: bool, buf: &mut Vec<u8>) {
    let len: u8 = if include_micros { 12 } else { 8 };
    buf.put_u8(len);
    buf.put_u8(0); // is_negative
    buf.put_u32::<LittleEndian>(0); // days
    buf.put_u8(time.hour());
    buf.put_u8(time.minute());
    buf.put_u8(time.second());
    if include_micros {
        buf.put_u32::<LittleEndian>(time.microsecond());
    }
}

pub fn decode_time(mut buf: &[u8]) -> Result<Time> {
    let len = Buf::get_u8(&mut buf)?;
    if len == 0 {
        return Ok(Time::MIDNIGHT);
    }

    let is_negative = Buf::get_u8(&mut buf)?;
    if is_negative != 0 {
        return Err(protocol_err!("negative TIME values are not supported"));
    }

    Buf::advance(&mut buf, 4)?; // days, always 0 for a time-of-day value

    let hour = Buf::get_u8(&mut buf)?;
    let minute = Buf::get_u8(&mut buf)?;
    let second = Buf::get_u8(&mut buf)?;

    let micros = if len > 8 { Buf::get_u32::<LittleEndian>(&mut buf)? } else { 0 };

    Time::from_hms_micro(hour, minute, second, micros)
        .map_err(|e| Error::protocol(format!("invalid time: {e}")))
}

pub fn encode_datetime(dt: PrimitiveDateTime, buf: &mut Vec<u8>) {
    let (h, m, s, us) = (
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.microsecond(),
    );

    let len: u8 = match (h, m, s, us) {
        (0, 0, 0, 0) => 4,
        (_, _, _, 0) => 7,
        _ => 11,
    };

    buf.put_u8(len);
    encode_date_body(dt.date(), buf);

    if len > 4 {
        buf.put_u8(h);
        buf.put_u8(m);
        buf.put_u8(s);
    }
    if len > 7 {
        buf.put_u32::<LittleEndian>(us);
    }
}

pub fn decode_datetime(mut buf: &[u8]) -> Result<PrimitiveDateTime> {
    let len = Buf::get_u8(&mut buf)?;
    if len == 0 {
        return Ok(PrimitiveDateTime::new(
            Date::from_calendar_date(0, Month::January, 1)
                .map_err(|e| Error::protocol(format!("invalid date: {e}")))?,
            Time::MIDNIGHT,
        ));
    }

    let date = decode_date_body(&mut buf)?;

    if len <= 4 {
        return Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT));
    }

    let hour = Buf::get_u8(&mut buf)?;
    let minute = Buf::get_u8(&mut buf)?;
    let second = Buf::get_u8(&mut buf)?;

    let micros = if len > 7 { Buf::get_u32::<LittleEndian>(&mut buf)? } else { 0 };

    let time = Time::from_hms_micro(hour, minute, second, micros)
        .map_err(|e| Error::protocol(format!("invalid time: {e}")))?;

    Ok(PrimitiveDateTime::new(date, time))
}

fn decode_date_body(buf: &mut &[u8]) -> Result<Date> {
    let year = Buf::get_u16::<LittleEndian>(buf)? as i32;
    let month = Buf::get_u8(buf)?;
    let day = Buf::get_u8(buf)?;
    let month = Month::try_from(month).map_err(|_| protocol_err!("invalid month {month}"))?;
    Date::from_calendar_date(year, month, day).map_err(|e| Error::protocol(format!("invalid date: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn encodes_datetime_with_micros() {
        let mut buf = Vec::new();
        encode_datetime(PrimitiveDateTime::new(date!(2010 - 10 - 17), time!(19:27:30.000001)), &mut buf);
        assert_eq!(buf, vec![11, 218, 7, 10, 17, 19, 27, 30, 1, 0, 0, 0]);
    }

    #[test]
    fn encodes_datetime_without_micros() {
        let mut buf = Vec::new();
        encode_datetime(PrimitiveDateTime::new(date!(2010 - 10 - 17), time!(19:27:30)), &mut buf);
        assert_eq!(buf, vec![7, 218, 7, 10, 17, 19, 27, 30]);
    }

    #[test]
    fn encodes_datetime_midnight_compresses_to_date() {
        let mut buf = Vec::new();
        encode_datetime(PrimitiveDateTime::new(date!(2010 - 10 - 17), time!(0:00:00)), &mut buf);
        assert_eq!(buf, vec![4, 218, 7, 10, 17]);
    }

    #[test]
    fn roundtrips_datetime() {
        let mut buf = Vec::new();
        let original = PrimitiveDateTime::new(date!(2010 - 10 - 17), time!(19:27:30.000001));
        encode_datetime(original, &mut buf);
        // skip the length byte the way the row decoder would have stripped it
        let decoded = decode_datetime(&buf).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn roundtrips_date() {
        let mut buf = Vec::new();
        encode_date(date!(2010 - 10 - 17), &mut buf);
        let decoded = decode_date(&buf).unwrap();
        assert_eq!(decoded, date!(2010 - 10 - 17));
    }

    #[test]
    fn decodes_zero_length_date_as_sentinel() {
        let decoded = decode_date(&[0]).unwrap();
        assert_eq!(decoded, date!(0000 - 01 - 01));
    }
}
