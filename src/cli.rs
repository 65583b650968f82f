use clap::Parser;
use std::path::PathBuf;

/// 將資料夾內媒體檔的拍攝時間（DateTimeOriginal）加入檔名：
///
///     {FILENAME}.YYYYMMDD_HHMM.{原副檔名}
#[derive(Debug, Parser)]
#[command(name = "media_date_renamer", version)]
pub struct Cli {
    /// 要處理的資料夾；省略時以互動方式詢問並在改名前確認
    #[arg(short, long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// 要處理的副檔名，可重複指定（例如 -e mts -e jpg）；省略時使用設定值
    #[arg(short, long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,
}
