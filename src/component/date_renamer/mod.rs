//! 依拍攝時間重新命名元件
//!
//! 讀取媒體檔的 `DateTimeOriginal`，將檔名改為 `NAME.YYYYMMDD_HHMM.ext`

mod capture_time;
mod filename_stamper;
mod main;
mod rename_planner;

pub use capture_time::{CaptureTime, STAMP_FORMAT};
pub use filename_stamper::{SplitFilename, is_already_stamped, split_suffix, target_file_name};
pub use main::{DateRenamer, RenameSummary};
pub use rename_planner::{RenamePlan, plan_renames};
