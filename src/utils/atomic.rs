//! Atomic replacement of collection files.

use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` so readers see either the old file or the
/// new one, never a partial write.
///
/// Missing parent directories are created. The temporary file lives next to
/// the target so the final rename stays on one filesystem, and is removed if
/// any step fails.
pub async fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => Path::new(".").to_path_buf(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no parent directory", path.display()),
            ))
        }
    };
    let target = path.to_path_buf();
    let bytes = content.as_bytes().to_vec();

    tokio::task::spawn_blocking(move || -> io::Result<()> {
        use std::io::Write;

        std::fs::create_dir_all(&parent)?;
        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}
