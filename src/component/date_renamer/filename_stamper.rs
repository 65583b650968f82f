//! 檔名時間戳記模組
//!
//! 負責判斷檔名是否已含時間戳記，並產生 `NAME.YYYYMMDD_HHMM.ext` 形式的新檔名

/// 拆解後的檔名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitFilename<'a> {
    /// 去掉最後一個副檔名的部分
    pub stem: &'a str,
    /// 最後一個副檔名（含前導點，保留原始大小寫），沒有時為空字串
    pub suffix: &'a str,
}

/// 拆出最後一個副檔名；以點開頭的隱藏檔名本身不算副檔名
#[must_use]
pub fn split_suffix(file_name: &str) -> SplitFilename<'_> {
    match file_name.rfind('.') {
        Some(index) if index > 0 && index + 1 < file_name.len() => SplitFilename {
            stem: &file_name[..index],
            suffix: &file_name[index..],
        },
        _ => SplitFilename {
            stem: file_name,
            suffix: "",
        },
    }
}

/// 檔名是否已經以 `{stamp}{suffix}` 結尾
#[must_use]
pub fn is_already_stamped(file_name: &str, stamp: &str) -> bool {
    let split = split_suffix(file_name);
    file_name.ends_with(&format!("{stamp}{}", split.suffix))
}

/// 產生加上時間戳記的新檔名
///
/// # Returns
/// 已含相同時間戳記時回傳 `None`，否則回傳 `{stem}.{stamp}{suffix}`
#[must_use]
pub fn target_file_name(file_name: &str, stamp: &str) -> Option<String> {
    if is_already_stamped(file_name, stamp) {
        return None;
    }

    let split = split_suffix(file_name);
    Some(format!("{}.{stamp}{}", split.stem, split.suffix))
}
