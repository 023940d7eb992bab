// Binary format: header parsing and validation.

use crate::FstError;

/// Header magic constants (little-endian).
const COOKIE1: u32 = 0x4E4D_5246;
const COOKIE2: u32 = 0x0001_7A53;

/// Size of the binary header in bytes.
pub const HEADER_SIZE: usize = 16;

/// What the bytes after the header contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A single transducer.
    Transducer,
    /// A named archive of transducers.
    Archive,
}

impl FileKind {
    fn byte(self) -> u8 {
        match self {
            FileKind::Transducer => 0x00,
            FileKind::Archive => 0x01,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileKind::Transducer => "transducer",
            FileKind::Archive => "archive",
        }
    }
}

/// Parsed file header.
///
/// The header occupies the first 16 bytes:
/// - bytes 0..4: cookie1 (magic number)
/// - bytes 4..8: cookie2 (magic number)
/// - byte 8: kind (0x00 = transducer, 0x01 = archive)
/// - bytes 9..16: reserved (zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: FileKind,
}

/// Parse and validate the 16-byte header.
pub fn parse_header(data: &[u8]) -> Result<Header, FstError> {
    if data.len() < HEADER_SIZE {
        return Err(FstError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let cookie1 = read_u32(data, 0);
    let cookie2 = read_u32(data, 4);
    if cookie1 != COOKIE1 || cookie2 != COOKIE2 {
        return Err(FstError::InvalidMagic);
    }

    let kind = match data[8] {
        0x00 => FileKind::Transducer,
        0x01 => FileKind::Archive,
        other => return Err(FstError::UnknownKind(other)),
    };

    Ok(Header { kind })
}

/// Parse the header and require a particular kind.
pub fn expect_kind(data: &[u8], expected: FileKind) -> Result<(), FstError> {
    let header = parse_header(data)?;
    if header.kind != expected {
        return Err(FstError::KindMismatch {
            expected: expected.name(),
            actual: header.kind.name(),
        });
    }
    Ok(())
}

/// Append a header for `kind` to `buf`.
pub fn write_header(buf: &mut Vec<u8>, kind: FileKind) {
    buf.extend_from_slice(&COOKIE1.to_le_bytes());
    buf.extend_from_slice(&COOKIE2.to_le_bytes());
    buf.push(kind.byte());
    buf.extend_from_slice(&[0u8; 7]);
}

/// Read a little-endian u32 at `pos`. The caller checks bounds.
#[inline]
pub(crate) fn read_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}
