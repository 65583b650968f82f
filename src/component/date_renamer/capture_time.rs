//! 拍攝時間解析模組
//!
//! 解析 exiftool 輸出的 `YYYY:MM:DD HH:MM:SS[.fff][±HH:MM|Z][ DST]` 字串

use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::fmt;

/// 檔名中時間戳記的格式
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M";

const OFFSET_FORMATS: [&str; 2] = ["%Y:%m:%d %H:%M:%S%.f%:z", "%Y:%m:%d %H:%M:%S%.f%z"];
const NAIVE_FORMAT: &str = "%Y:%m:%d %H:%M:%S%.f";
const DST_SUFFIX: &str = " DST";

/// 拍攝時間
///
/// 保留相機記錄的當地時間，不轉換到執行環境的時區
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTime {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl CaptureTime {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        // exiftool 會在夏令時間的 H264 時間後面加上 ` DST`
        let value = value.strip_suffix(DST_SUFFIX).unwrap_or(value).trim_end();

        for format in OFFSET_FORMATS {
            if let Ok(datetime) = DateTime::parse_from_str(value, format) {
                return Ok(Self {
                    local: datetime.naive_local(),
                    offset: Some(*datetime.offset()),
                });
            }
        }

        if let Some(utc) = value.strip_suffix('Z') {
            if let Ok(local) = NaiveDateTime::parse_from_str(utc, NAIVE_FORMAT) {
                return Ok(Self {
                    local,
                    offset: FixedOffset::east_opt(0),
                });
            }
        }

        NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
            .map(|local| Self {
                local,
                offset: None,
            })
            .map_err(|e| anyhow!("無法解析拍攝時間 {value:?}: {e}"))
    }

    /// 檔名用的時間戳記，例如 `20190503_1020`
    #[must_use]
    pub fn stamp(&self) -> String {
        self.local.format(STAMP_FORMAT).to_string()
    }

    #[must_use]
    pub const fn local(&self) -> NaiveDateTime {
        self.local
    }

    #[must_use]
    pub const fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }
}

impl fmt::Display for CaptureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%d %H:%M:%S"))?;
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}
