pub mod content_digest;

pub use content_digest::{ContentDigest, ContentDigestHasher};
