use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 判斷檔名（不分大小寫）是否以任一副檔名結尾
///
/// `extensions` 需已正規化為小寫且含前導點
#[must_use]
pub fn extension_matches(file_name: &str, extensions: &[String]) -> bool {
    let lower = file_name.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
}

/// 掃描資料夾第一層符合副檔名的檔案，依路徑排序
///
/// 不會遞迴進入子資料夾；指向檔案的符號連結視為檔案
pub fn scan_media_files(directory: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut media_files: Vec<PathBuf> = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| extension_matches(&entry.file_name().to_string_lossy(), extensions))
        .map(walkdir::DirEntry::into_path)
        .collect();

    if media_files.is_empty() {
        bail!(
            "在 {} 找不到副檔名為 {} 的檔案",
            directory.display(),
            extensions.join(", ")
        );
    }

    media_files.sort();
    Ok(media_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn mts() -> Vec<String> {
        vec![".mts".to_string()]
    }

    #[test]
    fn test_extension_matches_case_insensitive() {
        assert!(extension_matches("clip.MTS", &mts()));
        assert!(extension_matches("clip.mts", &mts()));
        assert!(extension_matches("clip.20190503_1020.Mts", &mts()));
        assert!(!extension_matches("clip.mp4", &mts()));
        assert!(!extension_matches("clipmts", &mts()));
    }

    #[test]
    fn test_extension_matches_any_of_list() {
        let exts = vec![".mts".to_string(), ".jpg".to_string()];
        assert!(extension_matches("a.JPG", &exts));
        assert!(extension_matches("b.mts", &exts));
        assert!(!extension_matches("c.png", &exts));
    }

    #[test]
    fn test_scan_media_files_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.MTS"), b"b").unwrap();
        fs::write(temp_dir.path().join("a.mts"), b"a").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"n").unwrap();

        let files = scan_media_files(temp_dir.path(), &mts()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.mts", "b.MTS"]);
    }

    #[test]
    fn test_scan_media_files_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.mts"), b"d").unwrap();
        fs::write(temp_dir.path().join("top.mts"), b"t").unwrap();

        let files = scan_media_files(temp_dir.path(), &mts()).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("top.mts")]);
    }

    #[test]
    fn test_scan_media_files_skips_matching_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("folder.mts")).unwrap();
        fs::write(temp_dir.path().join("real.mts"), b"r").unwrap();

        let files = scan_media_files(temp_dir.path(), &mts()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_scan_media_files_empty_is_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"n").unwrap();

        assert!(scan_media_files(temp_dir.path(), &mts()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_media_files_follows_symlink_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let source_dir = TempDir::new().unwrap();
        let real = source_dir.path().join("real.mts");
        fs::write(&real, b"r").unwrap();
        std::os::unix::fs::symlink(&real, temp_dir.path().join("linked.MTS")).unwrap();
        std::os::unix::fs::symlink(
            source_dir.path().join("missing.mts"),
            temp_dir.path().join("dangling.mts"),
        )
        .unwrap();

        let files = scan_media_files(temp_dir.path(), &mts()).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("linked.MTS")]);
    }
}
