//! The `VariableField` descriptor shared by every NTLM message: a `(length,
//! max_len, offset)` triple pointing at a payload slice appended after the
//! fixed header.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{NtlmError, Result};

pub const FIELD_SIZE: usize = 8;

/// A payload descriptor plus the bytes it describes.
///
/// During marshal, `offset` is stamped in by the caller from a running
/// cursor; during unmarshal it is read off the wire and used to slice the
/// message buffer.
#[derive(Debug, Default, Clone)]
pub struct VariableField {
    pub buffer: Vec<u8>,
    pub offset: u32,
}

impl VariableField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(buffer: Vec<u8>) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Writes the 8-byte `(Len, MaxLen, BufferOffset)` descriptor.
    pub fn write_descriptor(&self, mut out: impl Write) -> io::Result<()> {
        out.write_u16::<LittleEndian>(self.buffer.len() as u16)?;
        out.write_u16::<LittleEndian>(self.buffer.len() as u16)?;
        out.write_u32::<LittleEndian>(self.offset)?;
        Ok(())
    }

    /// Reads an 8-byte descriptor, leaving `buffer` empty until
    /// [`VariableField::read_payload`] slices it out of the full message.
    pub fn read_descriptor(mut input: impl Read) -> io::Result<Self> {
        let len = input.read_u16::<LittleEndian>()?;
        let _max_len = input.read_u16::<LittleEndian>()?;
        let offset = input.read_u32::<LittleEndian>()?;
        Ok(Self {
            buffer: vec![0u8; len as usize],
            offset,
        })
    }

    /// Slices this field's payload out of the full message, validating that
    /// the descriptor does not point past the message end.
    pub fn read_payload(&mut self, message: &[u8]) -> Result<()> {
        let start = self.offset as usize;
        let end = start
            .checked_add(self.buffer.len())
            .ok_or(NtlmError::DataOutOfBounds)?;
        if end > message.len() {
            return Err(NtlmError::DataOutOfBounds);
        }
        self.buffer.copy_from_slice(&message[start..end]);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn descriptor_round_trips() {
        let field = VariableField {
            buffer: b"hello".to_vec(),
            offset: 64,
        };
        let mut bytes = Vec::new();
        field.write_descriptor(&mut bytes).unwrap();
        assert_eq!(bytes.len(), FIELD_SIZE);

        let mut parsed = VariableField::read_descriptor(&bytes[..]).unwrap();
        assert_eq!(parsed.buffer.len(), 5);
        assert_eq!(parsed.offset, 64);

        let mut message = vec![0u8; 64];
        message.extend_from_slice(b"hello");
        parsed.read_payload(&message).unwrap();
        assert_eq!(parsed.buffer, b"hello");
    }

    #[test]
    fn out_of_bounds_payload_is_rejected() {
        let mut field = VariableField {
            buffer: vec![0u8; 10],
            offset: 5,
        };
        let message = vec![0u8; 8];
        let err = field.read_payload(&message).unwrap_err();
        assert!(matches!(err, NtlmError::DataOutOfBounds));
    }
}
