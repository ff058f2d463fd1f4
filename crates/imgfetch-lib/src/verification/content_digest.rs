//! Content digests used to recognise files that were already fetched.
//!
//! MD5 is enough here: the digest only has to tell accidental duplicates
//! apart, it carries no integrity guarantee against a hostile server.

use digest::Digest;
use md5::Md5;
use std::fmt;
use std::path::Path;
use tokio::io::AsyncReadExt;

const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 16]);

impl ContentDigest {
    pub fn of_bytes(data: impl AsRef<[u8]>) -> Self {
        let mut hasher = ContentDigestHasher::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Hashes a file without loading it into memory.
    pub async fn of_file(path: &Path) -> std::io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        let mut reader = tokio::io::BufReader::new(file);
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut hasher = ContentDigestHasher::new();

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

pub struct ContentDigestHasher {
    hasher: Md5,
}

impl ContentDigestHasher {
    #[inline]
    pub fn new() -> Self {
        Self { hasher: Md5::new() }
    }

    #[inline]
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        Digest::update(&mut self.hasher, data.as_ref());
    }

    pub fn finalize(self) -> ContentDigest {
        let mut out = [0u8; 16];
        out.copy_from_slice(&self.hasher.finalize());
        ContentDigest(out)
    }
}

impl Default for ContentDigestHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_md5_vectors() {
        assert_eq!(
            ContentDigest::of_bytes(b"").to_string(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            ContentDigest::of_bytes(b"The quick brown fox jumps over the lazy dog").to_string(),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn test_incremental_updates_match_single_update() {
        let mut hasher = ContentDigestHasher::new();
        hasher.update(b"The quick brown fox ");
        hasher.update(b"jumps over the lazy dog");
        assert_eq!(
            hasher.finalize(),
            ContentDigest::of_bytes(b"The quick brown fox jumps over the lazy dog")
        );
    }

    #[tokio::test]
    async fn test_file_digest_spans_multiple_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.bin");
        let content: Vec<u8> = (0..(READ_BUFFER_SIZE * 3 + 17))
            .map(|i| (i % 251) as u8)
            .collect();
        std::fs::write(&path, &content).unwrap();

        let from_file = ContentDigest::of_file(&path).await.unwrap();
        assert_eq!(from_file, ContentDigest::of_bytes(&content));
    }
}
