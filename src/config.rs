use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::{ProjectDirs, UserDirs};

pub const WINDOW_TITLE: &str = "Campaigns Performance Overview 2025";
pub const PAGE_SIZE: usize = 8;

/// Estimated share of leads reaching each funnel stage when an upload
/// carries no explicit count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunnelRatios {
    pub mql: f64,
    pub sql: f64,
    pub opportunity: f64,
    pub closed: f64,
}

impl Default for FunnelRatios {
    fn default() -> Self {
        Self {
            mql: 0.60,
            sql: 0.35,
            opportunity: 0.20,
            closed: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub page_size: usize,
    pub preview_rows_per_file: usize,
    pub preview_rows_total: usize,
    pub funnel_ratios: FunnelRatios,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            preview_rows_per_file: 5,
            preview_rows_total: 10,
            funnel_ratios: FunnelRatios::default(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "campaigns", "dashboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// Where export dialogs open: the user's downloads folder when there is one.
pub fn default_export_dir() -> Option<PathBuf> {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .or_else(|| {
            project_dirs()
                .ok()
                .map(|dirs| dirs.data_local_dir().to_path_buf())
        })
}
