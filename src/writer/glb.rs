//! Binary glTF container.
//!
//! Framing (header, JSON chunk padded with spaces, BIN chunk padded with
//! zeros) is done by [`gltf::binary::Glb`]; this module adds the document
//! wrapper and atomic file output.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use gltf::binary::{Glb, Header};
use gltf::json;
use log::info;

use crate::errors::{ElasticaError, Result};

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Pads `buffer` to a multiple of four bytes with `fill`.
pub fn align_to_4bytes(buffer: &mut Vec<u8>, fill: u8) {
    let remainder = buffer.len() % 4;
    if remainder > 0 {
        buffer.resize(buffer.len() + 4 - remainder, fill);
    }
}

fn padded(len: usize) -> usize {
    len.div_ceil(4) * 4
}

/// An emitted scene: the JSON document plus its binary buffer.
#[derive(Debug, Clone, Default)]
pub struct GltfDocument {
    pub root: json::Root,
    pub bin: Vec<u8>,
}

impl GltfDocument {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Serializes to a GLB byte stream.
    pub fn to_glb(&self) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(&self.root)?;

        let mut total = HEADER_LEN + CHUNK_HEADER_LEN + padded(json.len());
        if !self.bin.is_empty() {
            total += CHUNK_HEADER_LEN + padded(self.bin.len());
        }
        let length = u32::try_from(total).map_err(|_| ElasticaError::IndexOverflow {
            what: "GLB bytes",
            count: total,
        })?;

        let glb = Glb {
            header: Header {
                magic: *b"glTF",
                version: 2,
                length,
            },
            json: Cow::Owned(json),
            bin: (!self.bin.is_empty()).then(|| Cow::Borrowed(self.bin.as_slice())),
        };

        let mut out = Vec::with_capacity(total);
        glb.to_writer(&mut out)?;
        Ok(out)
    }

    /// Parses and validates a GLB byte stream.
    pub fn from_glb(bytes: &[u8]) -> Result<Self> {
        let glb = Glb::from_slice(bytes)?;
        let root: json::Root = serde_json::from_slice(&glb.json)?;
        let document = gltf::Document::from_json(root)?;

        Ok(Self {
            root: document.into_json(),
            bin: glb.bin.map(Cow::into_owned).unwrap_or_default(),
        })
    }

    /// Writes a `.glb` file, replacing `path` atomically.
    ///
    /// The bytes go to a sibling temporary file first, which is then renamed.
    pub fn write_glb(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_glb()?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = Path::new(&tmp);

        fs::write(tmp, &bytes)?;
        if let Err(e) = fs::rename(tmp, path) {
            let _ = fs::remove_file(tmp);
            return Err(e.into());
        }

        info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    fn document(bin: Vec<u8>) -> GltfDocument {
        GltfDocument {
            root: json::Root::default(),
            bin,
        }
    }

    #[test]
    fn header_and_chunk_alignment() {
        let glb = document(vec![1, 2, 3, 0]).to_glb().unwrap();

        assert_eq!(&glb[..4], b"glTF");
        assert_eq!(word(&glb, 4), 2);
        assert_eq!(word(&glb, 8) as usize, glb.len());
        assert_eq!(glb.len() % 4, 0);

        let json_len = word(&glb, 12) as usize;
        assert_eq!(json_len % 4, 0);
        assert_eq!(&glb[16..20], b"JSON");
        let bin_header = 20 + json_len;
        assert_eq!(word(&glb, bin_header), 4);
        assert_eq!(&glb[bin_header + 4..bin_header + 8], b"BIN\0");
        assert_eq!(&glb[bin_header + 8..], &[1u8, 2, 3, 0]);
    }

    #[test]
    fn empty_buffer_omits_bin_chunk() {
        let glb = document(Vec::new()).to_glb().unwrap();
        let json_len = word(&glb, 12) as usize;
        assert_eq!(glb.len(), 20 + json_len);
    }

    #[test]
    fn glb_round_trip() {
        let doc = document(vec![9; 8]);
        let back = GltfDocument::from_glb(&doc.to_glb().unwrap()).unwrap();
        assert_eq!(back.bin, doc.bin);
        assert_eq!(back.to_json().unwrap(), doc.to_json().unwrap());
    }

    #[test]
    fn rejects_foreign_bytes() {
        assert!(matches!(
            GltfDocument::from_glb(b"not a glb file"),
            Err(ElasticaError::Gltf(_))
        ));
    }

    #[test]
    fn align_pads_with_fill() {
        let mut buffer = vec![b'{'];
        align_to_4bytes(&mut buffer, b' ');
        assert_eq!(buffer, b"{   ");
        align_to_4bytes(&mut buffer, b' ');
        assert_eq!(buffer.len(), 4);
    }
}
