//! Image discovery for upload.
//!
//! Lists the images in a single directory (no recursion) and returns them
//! sorted by file name so repeated runs see the same order.

use std::path::Path;

use crate::error::UploadError;
use crate::types::ImageFile;

/// Extensions accepted from a directory scan (compared case-insensitively).
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Returns `true` for `.png`, `.jpg` and `.jpeg` paths.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Scans `dir` for supported images.
pub fn scan_images(dir: &Path) -> Result<Vec<ImageFile>, UploadError> {
    let read_err = |source| UploadError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if !is_supported_image(&path) {
            continue;
        }

        // Follows symlinks; a dangling one is skipped, not fatal.
        match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => images.push(ImageFile::from_path(path)),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
            }
        }
    }

    images.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(dir = %dir.display(), images = images.len(), "image scan complete");

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("Zen Bowl Blue.png"), b"PNG").unwrap();
        fs::write(root.join("beanie-Navy.jpg"), b"JPG").unwrap();
        fs::write(root.join("Hoodie Red.JPEG"), b"JPEG").unwrap();
        fs::write(root.join("notes.txt"), b"TXT").unwrap();
        fs::write(root.join("Shirt.gif"), b"GIF").unwrap();
        fs::create_dir_all(root.join("nested.png")).unwrap();
        fs::write(root.join("nested.png").join("Inner Green.png"), b"PNG").unwrap();

        dir
    }

    #[test]
    fn scan_filters_by_extension_sorted() {
        let dir = create_test_dir();
        let images = scan_images(dir.path()).unwrap();

        let names: Vec<&str> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Hoodie Red.JPEG", "Zen Bowl Blue.png", "beanie-Navy.jpg"]
        );
        assert!(images.iter().all(|i| i.path().is_some()));
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_dangling_symlinks() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("Hat Navy.png"), b"PNG").unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", root.join("stale-link.txt")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", root.join(".#Hat Navy.png")).unwrap();

        let images = scan_images(root).unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Hat Navy.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_follows_symlinked_images() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("source.bin"), b"PNG").unwrap();
        std::os::unix::fs::symlink(root.join("source.bin"), root.join("Cap Red.png")).unwrap();

        let images = scan_images(root).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].name, "Cap Red.png");
    }

    #[test]
    fn scan_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(scan_images(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn scan_nonexistent_dir() {
        let result = scan_images(Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(matches!(result, Err(UploadError::Read { .. })));
    }

    #[test]
    fn supported_extensions() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("a b-c.jpeg")));
        assert!(!is_supported_image(Path::new("a.webp")));
        assert!(!is_supported_image(Path::new("png")));
        assert!(!is_supported_image(Path::new("")));
    }
}
