//! Transparent gzip handling for downloaded guides

use crate::error::{EpgError, Result};
use flate2::read::MultiGzDecoder;
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check the payload for the gzip magic number (1f 8b)
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Inflate gzip payloads fully into memory; anything else passes through unchanged
pub fn decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !is_gzip(&bytes) {
        return Ok(bytes);
    }

    // Guides usually compress around 10:1
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(8));
    MultiGzDecoder::new(bytes.as_slice())
        .read_to_end(&mut out)
        .map_err(|e| EpgError::Decompression(e.to_string()))?;

    log::debug!("Inflated {} gzip bytes to {}", bytes.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_plain_passthrough() {
        let xml = b"<tv></tv>".to_vec();
        assert!(!is_gzip(&xml));
        assert_eq!(decompress(xml.clone()).unwrap(), xml);
    }

    #[test]
    fn test_gzip_inflated() {
        let xml = b"<tv><channel id=\"c1\"/></tv>";
        let packed = gzip(xml);
        assert!(is_gzip(&packed));
        assert_eq!(decompress(packed).unwrap(), xml.to_vec());
    }

    #[test]
    fn test_multi_member_gzip() {
        let mut packed = gzip(b"<tv>");
        packed.extend(gzip(b"</tv>"));
        assert_eq!(decompress(packed).unwrap(), b"<tv></tv>".to_vec());
    }

    #[test]
    fn test_truncated_gzip_fails() {
        let mut packed = gzip(b"<tv><channel id=\"c1\"/></tv>");
        packed.truncate(12);
        match decompress(packed) {
            Err(EpgError::Decompression(_)) => {}
            other => panic!("expected decompression error, got {:?}", other),
        }
    }

    #[test]
    fn test_magic_only_fails() {
        assert!(matches!(
            decompress(vec![0x1f, 0x8b, 0x00]),
            Err(EpgError::Decompression(_))
        ));
    }

    #[test]
    fn test_short_payloads() {
        assert!(!is_gzip(&[]));
        assert!(!is_gzip(&[0x1f]));
        assert_eq!(decompress(vec![0x1f]).unwrap(), vec![0x1f]);
    }
}
