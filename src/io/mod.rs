//! Wire primitives (spec §4.1): fixed-width integers, length-coded binary
//! and string encodings, NUL-terminated strings.

mod buf;
mod buf_mut;
mod framer;
mod lenenc;
mod stream;

pub use buf::Buf;
pub use buf_mut::BufMut;
pub use framer::{PacketReader, PacketWriter, MAX_PACKET_FRAME};
pub use lenenc::{BufExt, BufMutExt};
pub use stream::{Transport, TransportStream};
