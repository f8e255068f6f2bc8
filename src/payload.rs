//! Session payload serialization.
//!
//! Session data is JSON inside a versioned envelope. Larger payloads are
//! zlib-compressed before encryption to keep the finished cookie under the
//! practical ~4 KB ceiling; a one-byte marker records which form was used.
//!
//! Only plain JSON values are representable. The envelope is never asked to
//! reconstruct live objects, so a decoded payload can at worst be wrong, not
//! executable.

use std::io::{Read as _, Write as _};

use flate2::Compression;
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};

use crate::SessionData;
use crate::error::EncodeError;

const VERSION: u8 = 1;

const MARKER_RAW: u8 = 0;
const MARKER_DEFLATED: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    v: u8,
    #[serde(default)]
    data: SessionData,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum PayloadError {
    #[error("empty payload")]
    Empty,

    #[error("unknown payload marker: {0}")]
    UnknownMarker(u8),

    #[error("unsupported payload version: {0}")]
    UnsupportedVersion(u8),

    #[error("payload decompression failed: {0}")]
    Inflate(#[from] std::io::Error),

    #[error("payload failed to deserialize: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Encodes session data to bytes, compressing when the JSON form exceeds
/// `compress_over`. The compressed form is kept only when it is actually
/// smaller.
pub(crate) fn encode(data: &SessionData, compress_over: usize) -> Result<Vec<u8>, EncodeError> {
    let envelope = Envelope {
        v: VERSION,
        data: data.clone(),
    };
    let json = serde_json::to_vec(&envelope)?;

    if json.len() > compress_over {
        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity((json.len() * 2) / 3),
            Compression::new(6),
        );
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;

        if compressed.len() < json.len() {
            let mut bytes = Vec::with_capacity(1 + compressed.len());
            bytes.push(MARKER_DEFLATED);
            bytes.extend_from_slice(&compressed);
            return Ok(bytes);
        }
    }

    let mut bytes = Vec::with_capacity(1 + json.len());
    bytes.push(MARKER_RAW);
    bytes.extend_from_slice(&json);
    Ok(bytes)
}

/// Decodes bytes produced by [`encode`] back into session data.
pub(crate) fn decode(bytes: &[u8]) -> Result<SessionData, PayloadError> {
    let (&marker, body) = bytes.split_first().ok_or(PayloadError::Empty)?;

    let envelope: Envelope = match marker {
        MARKER_RAW => serde_json::from_slice(body)?,
        MARKER_DEFLATED => {
            let mut reader = ZlibDecoder::new(body);
            let mut json = Vec::with_capacity(body.len() * 2);
            reader.read_to_end(&mut json)?;
            serde_json::from_slice(&json)?
        }
        other => return Err(PayloadError::UnknownMarker(other)),
    };

    if envelope.v != VERSION {
        return Err(PayloadError::UnsupportedVersion(envelope.v));
    }

    Ok(envelope.data)
}
