//! Physical packet framing (spec §2b): the 3-byte little-endian length
//! prefix, 1-byte sequence number, and the 16MiB-1 fragmentation scheme
//! that lets a single logical packet span many physical frames.
//!
//! Grounded on the `pktReader`/`pktWriter` split in the original `mymysql`
//! driver, which is the only layer in the retrieval pack that actually
//! implements multi-frame fragmentation (sqlx's `MySqlStream` leaves it as
//! a `TODO`).

use byteorder::LittleEndian;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, FramingError, Result};
use crate::io::BufMut;

/// A physical frame carries at most this many payload bytes; a logical
/// packet whose length is a multiple of this value is followed by an
/// explicit zero-length terminal frame so the reader can tell "exactly
/// `N * MAX_PACKET_FRAME` bytes" apart from "more frames follow".
pub const MAX_PACKET_FRAME: usize = 0xFF_FFFF;

/// Reassembles logical packets out of one or more physical frames, and
/// tracks the sequence number the next frame is expected to carry.
pub struct PacketReader<R> {
    inner: R,
    seq_no: u8,
}

impl<R: AsyncRead + Unpin> PacketReader<R> {
    pub fn new(inner: R) -> Self {
        PacketReader { inner, seq_no: 0 }
    }

    /// Resets the expected sequence number to 0. Called at the start of
    /// every new command phase (spec §2b).
    pub fn reset_seq(&mut self) {
        self.seq_no = 0;
    }

    pub fn seq_no(&self) -> u8 {
        self.seq_no
    }

    /// Sets the next expected sequence number explicitly — used when a
    /// caller needs to resynchronize after reading a frame out of band
    /// (e.g. auth switch sub-negotiation).
    pub fn set_seq_no(&mut self, seq_no: u8) {
        self.seq_no = seq_no;
    }

    /// Reads one logical packet, concatenating continuation frames until a
    /// short (or, for an exact multiple of [`MAX_PACKET_FRAME`], an
    /// explicit empty) terminal frame is seen.
    pub async fn read_packet(&mut self) -> Result<Vec<u8>> {
        let mut payload = Vec::new();

        loop {
            let mut header = [0u8; 4];
            self.inner.read_exact(&mut header).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::UnexpectedEof {
                    Error::Framing(FramingError::UnexpectedEof)
                } else {
                    Error::Io(e)
                }
            })?;

            let len = u32::from_le_bytes([header[0], header[1], header[2], 0]) as usize;
            let received_seq = header[3];

            if received_seq != self.seq_no {
                return Err(Error::Framing(FramingError::SequenceMismatch {
                    expected: self.seq_no,
                    received: received_seq,
                }));
            }
            self.seq_no = self.seq_no.wrapping_add(1);

            if len > 0 {
                let start = payload.len();
                payload.resize(start + len, 0);
                self.inner.read_exact(&mut payload[start..]).await?;
            }

            // A frame shorter than the max length is always terminal. An
            // exact-max-length frame needs one more read to find out
            // whether it was the last one or whether a (possibly empty)
            // continuation follows.
            if len < MAX_PACKET_FRAME {
                break;
            }
        }

        Ok(payload)
    }
}

/// Splits a logical packet into physical frames and assigns sequence
/// numbers on write.
pub struct PacketWriter<W> {
    inner: W,
    seq_no: u8,
}

impl<W: AsyncWrite + Unpin> PacketWriter<W> {
    pub fn new(inner: W) -> Self {
        PacketWriter { inner, seq_no: 0 }
    }

    pub fn reset_seq(&mut self) {
        self.seq_no = 0;
    }

    pub fn seq_no(&self) -> u8 {
        self.seq_no
    }

    pub fn set_seq_no(&mut self, seq_no: u8) {
        self.seq_no = seq_no;
    }

    /// Writes `payload` as one logical packet, splitting it into frames no
    /// larger than [`MAX_PACKET_FRAME`] and emitting the empty terminal
    /// frame when `payload.len()` is an exact multiple of that size
    /// (including the zero-length packet itself).
    pub async fn write_packet(&mut self, payload: &[u8]) -> Result<()> {
        let mut offset = 0;

        loop {
            let remaining = payload.len() - offset;
            let chunk_len = remaining.min(MAX_PACKET_FRAME);

            let mut frame = Vec::with_capacity(4 + chunk_len);
            frame.put_u24::<LittleEndian>(chunk_len as u32);
            frame.put_u8(self.seq_no);
            frame.put_bytes(&payload[offset..offset + chunk_len]);

            self.inner.write_all(&frame).await?;
            self.seq_no = self.seq_no.wrapping_add(1);
            offset += chunk_len;

            if chunk_len < MAX_PACKET_FRAME {
                break;
            }
        }

        Ok(())
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.inner.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn reads_single_short_frame() {
        let mut bytes = Vec::new();
        bytes.put_u24::<LittleEndian>(3);
        bytes.put_u8(0);
        bytes.put_bytes(b"abc");

        let mut reader = PacketReader::new(Cursor::new(bytes));
        let packet = reader.read_packet().await.unwrap();
        assert_eq!(packet, b"abc");
        assert_eq!(reader.seq_no(), 1);
    }

    #[tokio::test]
    async fn rejects_sequence_mismatch() {
        let mut bytes = Vec::new();
        bytes.put_u24::<LittleEndian>(1);
        bytes.put_u8(5); // expected 0
        bytes.put_bytes(b"a");

        let mut reader = PacketReader::new(Cursor::new(bytes));
        let err = reader.read_packet().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::SequenceMismatch {
                expected: 0,
                received: 5
            })
        ));
    }

    #[tokio::test]
    async fn roundtrips_payload_spanning_multiple_frames() {
        let payload = vec![0x42u8; MAX_PACKET_FRAME + 10];

        let mut buf = Vec::new();
        {
            let mut writer = PacketWriter::new(&mut buf);
            writer.write_packet(&payload).await.unwrap();
        }

        let mut reader = PacketReader::new(Cursor::new(buf));
        let got = reader.read_packet().await.unwrap();
        assert_eq!(got, payload);
        assert_eq!(reader.seq_no(), 2);
    }

    #[tokio::test]
    async fn exact_multiple_of_max_frame_gets_empty_terminal_frame() {
        let payload = vec![0x7Fu8; MAX_PACKET_FRAME];

        let mut buf = Vec::new();
        {
            let mut writer = PacketWriter::new(&mut buf);
            writer.write_packet(&payload).await.unwrap();
        }
        // header + payload, then a second 4-byte zero-length header.
        assert_eq!(buf.len(), 4 + MAX_PACKET_FRAME + 4);

        let mut reader = PacketReader::new(Cursor::new(buf));
        let got = reader.read_packet().await.unwrap();
        assert_eq!(got, payload);
        assert_eq!(reader.seq_no(), 2);
    }

    /// Regression test for the sequence-number bug fixed in
    /// `Connection::send_command`/`establish`: a command frame and its
    /// response share one counter between the client's writer and reader,
    /// rather than each independently resetting to 0 (spec §4.2 "the
    /// counter is zeroed at the start of every command... and incremented
    /// after every frame in either direction").
    #[tokio::test]
    async fn reader_seeded_from_writer_accepts_the_next_frame_in_sequence() {
        let (client, server) = tokio::io::duplex(4096);
        let (client_read, client_write) = tokio::io::split(client);
        let (server_read, server_write) = tokio::io::split(server);

        let mut client_writer = PacketWriter::new(client_write);
        let mut client_reader = PacketReader::new(client_read);
        let mut server_reader = PacketReader::new(server_read);
        let mut server_writer = PacketWriter::new(server_write);

        // Client sends a one-frame command at seq 0.
        client_writer.write_packet(b"command").await.unwrap();
        client_writer.flush().await.unwrap();

        // The server's independent reader also starts at 0 and accepts it.
        let command = server_reader.read_packet().await.unwrap();
        assert_eq!(command, b"command");

        // The server replies at seq 1, seeded from its own reader.
        server_writer.set_seq_no(server_reader.seq_no());
        server_writer.write_packet(b"response").await.unwrap();
        server_writer.flush().await.unwrap();

        // The client's reader must expect seq 1 too -- seeded from its
        // writer, not independently reset -- or this fails with
        // `SequenceMismatch { expected: 0, received: 1 }`.
        client_reader.set_seq_no(client_writer.seq_no());
        let response = client_reader.read_packet().await.unwrap();
        assert_eq!(response, b"response");
    }

    #[tokio::test]
    async fn empty_packet_roundtrip() {
        let mut buf = Vec::new();
        {
            let mut writer = PacketWriter::new(&mut buf);
            writer.write_packet(&[]).await.unwrap();
        }
        assert_eq!(buf.len(), 4);

        let mut reader = PacketReader::new(Cursor::new(buf));
        let got = reader.read_packet().await.unwrap();
        assert!(got.is_empty());
    }
}
