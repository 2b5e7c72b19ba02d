//! Key source over an arbitrary byte stream.

use std::io::{self, ErrorKind, Read};

use super::{EscapeScheme, KeyDecoder, KeyRead, KeySource};

/// Reads bytes one at a time from `R` and decodes them into keys.
///
/// Used for piped stdin and for feeding recorded byte streams through the
/// decoder. End of input is reported as an interrupt so the caller stops
/// prompting.
#[derive(Debug)]
pub struct ByteKeys<R> {
    reader: R,
    decoder: KeyDecoder,
}

impl<R: Read> ByteKeys<R> {
    pub fn new(reader: R, scheme: EscapeScheme) -> Self {
        Self {
            reader,
            decoder: KeyDecoder::new(scheme),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> KeySource for ByteKeys<R> {
    fn read_key(&mut self) -> io::Result<KeyRead> {
        loop {
            let Some(byte) = self.read_byte()? else {
                return Ok(KeyRead::Interrupted);
            };
            if let Some(read) = self.decoder.feed(byte) {
                return Ok(read);
            }
        }
    }
}
