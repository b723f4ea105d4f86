use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`.
pub fn digest_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

/// Digest of a file's contents.
pub fn file_digest(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(digest_bytes(&bytes))
}

/// Whether two files hold byte-identical contents, compared by digest.
pub fn same_contents(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(file_digest(a)? == file_digest(b)?)
}
