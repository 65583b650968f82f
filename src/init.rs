use env_logger::{Builder, Env, Target};
use std::io::Write;

/// 初始化日誌系統
///
/// 預設等級為 info，可透過 `RUST_LOG` 覆寫
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] ({}) {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
