//! 初始化模块：写出示例目录（清单 + 一个示例条目）。

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::catalog::{DESCRIPTOR_FILE, ICON_FILE, MANIFEST_FILE};

// 内置示例（用于 init）
const SAMPLE_MANIFEST: &str = include_str!("assets/sample.index.json");
const SAMPLE_DESCRIPTOR: &str = include_str!("assets/sample.server.json");
const SAMPLE_ICON: &str = include_str!("assets/sample.icon.svg");

/// 初始化示例目录；已存在文件默认跳过，--force 时覆盖
pub(crate) fn init_scaffold(dir: &Path, force: bool) -> Result<()> {
    let servers = dir.join("servers");
    let example = servers.join("example");
    if !example.exists() {
        fs::create_dir_all(&example)
            .with_context(|| format!("创建目录失败: {}", example.display()))?;
    }
    write_sample(&servers.join(MANIFEST_FILE), SAMPLE_MANIFEST, force)?;
    write_sample(&example.join(DESCRIPTOR_FILE), SAMPLE_DESCRIPTOR, force)?;
    write_sample(&example.join(ICON_FILE), SAMPLE_ICON, force)?;
    println!("✅ 初始化完成，可运行: cargo run -- preview");
    Ok(())
}

fn write_sample(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        eprintln!("跳过: {} 已存在，使用 --force 可覆盖", path.display());
        return Ok(());
    }
    fs::write(path, content.as_bytes())
        .with_context(|| format!("写入失败: {}", path.display()))?;
    println!("写入: {}", path.display());
    Ok(())
}
