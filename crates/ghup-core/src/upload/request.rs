//! Per-asset request pieces: target URL and the body stream.

use super::sniff::{self, SNIFF_LEN};
use super::AssetError;
use std::fs::File;
use std::io::{self, Chain, Cursor, Read};
use std::path::Path;
use url::Url;

/// Asset display name: the final path component.
pub fn asset_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// `base` with its query replaced by the single pair `name=<name>`.
pub fn asset_url(base: &Url, name: &str) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.query_pairs_mut().append_pair("name", name);
    url
}

/// Request body for one asset: the sniffed prefix followed by the rest of the file.
///
/// The file handle is owned here and closed when the body is dropped.
pub struct AssetBody {
    reader: Chain<Cursor<Vec<u8>>, File>,
    content_type: &'static str,
    len: Option<u64>,
}

impl AssetBody {
    /// Opens `path`, sniffs its content type and stats its size.
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        let file = File::open(path).map_err(AssetError::Open)?;
        Self::from_file(file)
    }

    fn from_file(mut file: File) -> Result<Self, AssetError> {
        let mut head = Vec::with_capacity(SNIFF_LEN);
        (&mut file)
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut head)
            .map_err(AssetError::Read)?;
        let content_type = sniff::content_type(&head);
        let len = file.metadata().ok().map(|m| m.len());
        Ok(Self {
            reader: Cursor::new(head).chain(file),
            content_type,
            len,
        })
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Total size from stat, if available.
    pub fn len(&self) -> Option<u64> {
        self.len
    }
}

impl Read for AssetBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}
