use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Compute the SHA-256 hash of a file, returning a lowercase hex string.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute a deterministic SHA-256 fingerprint of a directory tree.
///
/// Every regular file contributes its path relative to `root` and the hash of
/// its contents, visited in sorted order. Top-level entries named in `skip`
/// are ignored.
pub fn sha256_tree(root: &Path, skip: &[&str]) -> std::io::Result<String> {
    let mut files = Vec::new();
    collect_files(root, root, skip, &mut files)?;
    files.sort();

    let mut hasher = Sha256::new();
    for rel in &files {
        hasher.update(b"file:");
        hasher.update(rel.as_bytes());
        hasher.update(b":");
        hasher.update(sha256_file(&root.join(rel))?.as_bytes());
        hasher.update(b"\n");
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn collect_files(
    root: &Path,
    dir: &Path,
    skip: &[&str],
    out: &mut Vec<String>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if dir == root {
            let name = entry.file_name();
            if skip.iter().any(|s| name == std::ffi::OsStr::new(s)) {
                continue;
            }
        }
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(root, &path, skip, out)?;
        } else if file_type.is_file() {
            if let Ok(rel) = path.strip_prefix(root) {
                // Forward slashes keep fingerprints stable across platforms
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    Ok(())
}
