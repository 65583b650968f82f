//! 重新命名計畫模組
//!
//! 在動到任何檔案之前，先為每個檔案解析拍攝時間並決定新路徑

use super::capture_time::CaptureTime;
use super::filename_stamper::target_file_name;
use crate::tools::FileMetadata;
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

/// 單一檔案的重新命名計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub source: PathBuf,
    /// `None` 表示檔名已含時間戳記，不需要改名
    pub target: Option<PathBuf>,
    pub capture_time: CaptureTime,
}

impl RenamePlan {
    pub fn from_metadata(metadata: &FileMetadata) -> Result<Self> {
        let source = metadata.source_file.clone();
        let raw = metadata.date_time_original()?;
        let capture_time = CaptureTime::parse(raw)
            .with_context(|| format!("檔案: {}", source.display()))?;

        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("檔名不是有效的 UTF-8: {}", source.display()))?;

        let target = target_file_name(file_name, &capture_time.stamp())
            .map(|new_name| source.with_file_name(new_name));

        Ok(Self {
            source,
            target,
            capture_time,
        })
    }

    #[must_use]
    pub const fn is_already_stamped(&self) -> bool {
        self.target.is_none()
    }
}

/// 為所有檔案建立計畫；任一檔案失敗時整批失敗，不會改名任何檔案
pub fn plan_renames(metadata: &[FileMetadata]) -> Result<Vec<RenamePlan>> {
    metadata.iter().map(RenamePlan::from_metadata).collect()
}
