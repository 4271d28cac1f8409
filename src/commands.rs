//! 命令调度模块：
//! - 接收解析好的 CLI 参数，计算“有效参数”（CLI > 环境变量 > 默认值）
//! - 调用图标规范化、预览生成、README 生成与初始化

use anyhow::Result;
use std::path::PathBuf;

use crate::{
    cli::{Cli, Command},
    icons, init, preview, readme,
    utils::env_opt_path,
};

/// 运行指定的子命令
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::FixIcons { servers_dir } => {
            let dir = effective_servers_dir(servers_dir);
            icons::fix_all(&dir)
        }
        Command::Preview { servers_dir, out } => {
            let dir = effective_servers_dir(servers_dir);
            let out = out
                .or_else(|| env_opt_path("MAGPIE_PREVIEW_OUT"))
                .unwrap_or_else(|| PathBuf::from("scratchpad/preview.html"));
            preview::generate(&dir, &out)
        }
        Command::Readme { servers_dir, out } => {
            let dir = effective_servers_dir(servers_dir);
            let out = out
                .or_else(|| env_opt_path("MAGPIE_README_OUT"))
                .unwrap_or_else(|| PathBuf::from("README.md"));
            readme::generate(&dir, &out)
        }
        Command::Init { force, dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            init::init_scaffold(&dir, force)
        }
    }
}

// 目录根路径：CLI > MAGPIE_SERVERS_DIR > servers
fn effective_servers_dir(cli_dir: Option<PathBuf>) -> PathBuf {
    cli_dir
        .or_else(|| env_opt_path("MAGPIE_SERVERS_DIR"))
        .unwrap_or_else(|| PathBuf::from("servers"))
}
