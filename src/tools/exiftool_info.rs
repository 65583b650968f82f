use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// 拍攝時間標籤的名稱，exiftool 以 `-G` 輸出時前面會帶群組（例如 `EXIF:`）
pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";

const SOURCE_FILE_KEY: &str = "SourceFile";

/// 單一檔案的中繼資料
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    pub source_file: PathBuf,
    /// 依 exiftool 輸出順序保存的標籤（不含 `SourceFile`）
    pub tags: Map<String, Value>,
}

impl FileMetadata {
    /// 取得第一個名稱以 `DateTimeOriginal` 結尾的標籤值
    pub fn date_time_original(&self) -> Result<&str> {
        let (key, value) = self
            .tags
            .iter()
            .find(|(key, _)| key.ends_with(DATE_TIME_ORIGINAL))
            .ok_or_else(|| {
                anyhow!(
                    "找不到以 {DATE_TIME_ORIGINAL} 結尾的標籤: {}",
                    self.source_file.display()
                )
            })?;

        value.as_str().ok_or_else(|| {
            anyhow!(
                "標籤 {key} 不是字串 ({value}): {}",
                self.source_file.display()
            )
        })
    }
}

/// 批次讀取檔案中繼資料的來源
pub trait MetadataReader {
    /// 讀取所有檔案的中繼資料，回傳順序與 `paths` 相同
    fn read_batch(&self, paths: &[PathBuf]) -> Result<Vec<FileMetadata>>;
}

/// 透過外部 `exiftool` 指令讀取中繼資料
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ExifTool {
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("exiftool")
    }

    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 檢查 exiftool 是否可執行
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-ver")
            .output()
            .is_ok_and(|output| output.status.success())
    }
}

impl MetadataReader for ExifTool {
    fn read_batch(&self, paths: &[PathBuf]) -> Result<Vec<FileMetadata>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let arg_file = build_arg_file(paths)?;

        // 路徑經由 stdin 的參數檔傳入，不受命令列長度限制
        let mut child = Command::new(&self.program)
            .args(["-json", "-G", "-n", "-@", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("無法執行 exiftool: {}", self.program.display()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("無法取得 exiftool 的標準輸入"))?;
        // 另開執行緒寫入，避免輸出塞滿管線時互相等待
        let writer = thread::spawn(move || stdin.write_all(arg_file.as_bytes()));

        let output = child
            .wait_with_output()
            .with_context(|| format!("等待 exiftool 結束失敗: {}", self.program.display()))?;

        match writer.join() {
            Ok(Ok(())) => {}
            // 程式提早結束時不讀完輸入，交由結束狀態判斷
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e).context("無法寫入 exiftool 的標準輸入"),
            Err(_) => bail!("寫入 exiftool 標準輸入的執行緒異常結束"),
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stdout.trim().is_empty() {
                bail!("exiftool 執行失敗 ({}): {}", output.status, stderr.trim());
            }
            warn!("exiftool reported problems: {}", stderr.trim());
        }

        let metadata = parse_exiftool_output(&stdout)?;
        debug!("exiftool returned {} entries", metadata.len());
        order_by_request(paths, metadata)
    }
}

/// 產生 `-@ -` 使用的參數檔內容，每行一個路徑
fn build_arg_file(paths: &[PathBuf]) -> Result<String> {
    let mut arg_file = String::new();
    for path in paths {
        let line = path
            .to_str()
            .ok_or_else(|| anyhow!("路徑不是有效的 UTF-8: {}", path.display()))?;
        if line.contains(['\n', '\r']) {
            bail!("路徑含有換行字元: {}", path.display());
        }
        arg_file.push_str(line);
        arg_file.push('\n');
    }
    Ok(arg_file)
}

/// 解析 `exiftool -json` 的輸出
pub fn parse_exiftool_output(json: &str) -> Result<Vec<FileMetadata>> {
    let entries: Vec<Map<String, Value>> =
        serde_json::from_str(json).context("無法解析 exiftool 輸出")?;

    entries
        .into_iter()
        .map(|mut tags| {
            let source_file = match tags.remove(SOURCE_FILE_KEY) {
                Some(Value::String(path)) => PathBuf::from(path),
                _ => bail!("exiftool 輸出缺少 {SOURCE_FILE_KEY}"),
            };
            Ok(FileMetadata { source_file, tags })
        })
        .collect()
}

/// 依請求順序排列結果；exiftool 沒有回傳的檔案視為錯誤
fn order_by_request(paths: &[PathBuf], metadata: Vec<FileMetadata>) -> Result<Vec<FileMetadata>> {
    let mut by_source: HashMap<String, FileMetadata> = metadata
        .into_iter()
        .map(|entry| (source_key(&entry.source_file), entry))
        .collect();

    paths
        .iter()
        .map(|path| {
            let mut entry = by_source.remove(&source_key(path)).ok_or_else(|| {
                anyhow!("exiftool 沒有回傳檔案的中繼資料: {}", path.display())
            })?;
            entry.source_file.clone_from(path);
            Ok(entry)
        })
        .collect()
}

/// exiftool 會原樣回傳傳入的路徑，但在 Windows 上會把 `\` 換成 `/`
fn source_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
