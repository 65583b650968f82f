//! 拍攝時間重新命名主模組
//!
//! 協調檔案掃描、中繼資料讀取、計畫與重新命名的整體流程

use super::rename_planner::{RenamePlan, plan_renames};
use crate::config::Config;
use crate::tools::{ExifTool, MetadataReader, scan_media_files, validate_directory_exists};
use anyhow::{Result, bail};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// 拍攝時間重新命名器
pub struct DateRenamer<R: MetadataReader = ExifTool> {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
    reader: R,
}

/// 重新命名結果統計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: usize,
    /// 檔名已含時間戳記
    pub skipped: usize,
    /// 目標檔名已存在，未覆寫
    pub conflicts: usize,
    pub failed: usize,
    pub interrupted: bool,
}

impl RenameSummary {
    /// 有檔案改名失敗或流程被中斷時回傳錯誤
    pub fn ensure_complete(&self) -> Result<()> {
        if self.failed > 0 {
            bail!("{} 個檔案重新命名失敗", self.failed);
        }
        if self.interrupted {
            bail!("操作已中斷，其餘檔案未處理");
        }
        Ok(())
    }
}

impl DateRenamer<ExifTool> {
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self::with_reader(config, shutdown_signal, ExifTool::new())
    }
}

impl<R: MetadataReader> DateRenamer<R> {
    pub fn with_reader(config: Config, shutdown_signal: Arc<AtomicBool>, reader: R) -> Self {
        Self {
            config,
            shutdown_signal,
            reader,
        }
    }

    /// 執行完整流程
    ///
    /// 未指定資料夾時進入互動模式：詢問路徑、顯示預覽並在改名前確認
    pub fn run(&self, directory: Option<PathBuf>) -> Result<RenameSummary> {
        println!("{}", style("=== 依拍攝時間重新命名 ===").cyan().bold());

        let interactive = directory.is_none();
        let directory = match directory {
            Some(directory) => directory,
            None => self.prompt_directory()?,
        };

        println!(
            "{}",
            style(format!(
                "處理 {}（副檔名: {}）",
                directory.display(),
                self.config.extensions.join(", ")
            ))
            .dim()
        );

        let plans = self.prepare(&directory)?;

        if interactive {
            self.display_preview(&plans);
            if !self.confirm_rename()? {
                println!("{}", style("操作已取消").yellow());
                return Ok(RenameSummary::default());
            }
        }

        let summary = self.execute_plan(&plans)?;
        self.display_summary(&summary);

        Ok(summary)
    }

    /// 不經互動直接處理資料夾
    pub fn rename_directory(&self, directory: &Path) -> Result<RenameSummary> {
        let plans = self.prepare(directory)?;
        self.execute_plan(&plans)
    }

    /// 驗證資料夾、掃描檔案、批次讀取中繼資料並建立計畫
    pub fn prepare(&self, directory: &Path) -> Result<Vec<RenamePlan>> {
        validate_directory_exists(directory)?;

        let media_files = scan_media_files(directory, &self.config.extensions)?;
        info!(
            "Found {} file(s) in {}",
            media_files.len(),
            directory.display()
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("讀取 {} 個檔案的中繼資料...", media_files.len()));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let metadata = self.reader.read_batch(&media_files);
        spinner.finish_and_clear();

        plan_renames(&metadata?)
    }

    /// 依序執行重新命名；單一檔案失敗不影響其他檔案
    pub fn execute_plan(&self, plans: &[RenamePlan]) -> Result<RenameSummary> {
        let mut summary = RenameSummary::default();

        let progress_bar = ProgressBar::new(plans.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
                .progress_chars("#>-"),
        );
        progress_bar.set_message("重新命名中...");

        for plan in plans {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                summary.interrupted = true;
                progress_bar.abandon_with_message("操作已中斷");
                break;
            }

            let Some(target) = plan.target.as_ref() else {
                progress_bar.suspend(|| {
                    info!(
                        "SKIPPING - (filename already contains original_datetime) - {}",
                        plan.source.display()
                    );
                });
                summary.skipped += 1;
                progress_bar.inc(1);
                continue;
            };

            if target.exists() {
                progress_bar.suspend(|| {
                    warn!(
                        "Target already exists, not overwriting: {} -> {}",
                        plan.source.display(),
                        target.display()
                    );
                });
                summary.conflicts += 1;
                progress_bar.inc(1);
                continue;
            }

            match fs::rename(&plan.source, target) {
                Ok(()) => {
                    progress_bar.suspend(|| {
                        info!(
                            "changing filename: {} -> {} (captured {})",
                            plan.source.display(),
                            target.display(),
                            plan.capture_time
                        );
                    });
                    summary.renamed += 1;
                }
                Err(e) => {
                    progress_bar.suspend(|| {
                        error!("Failed to rename {}: {e}", plan.source.display());
                    });
                    summary.failed += 1;
                }
            }

            progress_bar.inc(1);
        }

        if !summary.interrupted {
            progress_bar.finish_with_message("完成");
        }

        Ok(summary)
    }

    fn prompt_directory(&self) -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt("請輸入媒體資料夾路徑")
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    fn confirm_rename(&self) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt("確定要重新命名這些檔案嗎？")
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    fn display_preview(&self, plans: &[RenamePlan]) {
        println!();
        println!("{}", style("預覽重新命名結果：").cyan());
        println!();

        for plan in plans {
            let current_name = file_name_lossy(&plan.source);
            println!(
                "  {} ({}):",
                style(&current_name).bold(),
                style(plan.capture_time).cyan()
            );
            match &plan.target {
                Some(target) => {
                    println!("    {} {}", style("新:").dim(), file_name_lossy(target));
                }
                None => println!("    {}", style("已含時間戳記，略過").dim()),
            }
        }
        println!();
    }

    fn display_summary(&self, summary: &RenameSummary) {
        println!();
        println!("{}", style("=== 重新命名結果 ===").cyan().bold());
        println!("  成功: {} 個", style(summary.renamed).green());
        if summary.skipped > 0 {
            println!("  已命名: {} 個", style(summary.skipped).dim());
        }
        if summary.conflicts > 0 {
            println!("  目標已存在: {} 個", style(summary.conflicts).yellow());
        }
        if summary.failed > 0 {
            println!("  失敗: {} 個", style(summary.failed).red());
        }
        if summary.interrupted {
            println!("{}", style("操作已中斷，其餘檔案未處理").yellow());
        }
    }
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
