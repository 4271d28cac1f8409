//! README 生成模块：
//! - 依据清单重建 README 的服务表格（固定路径无条件覆盖写入）
//! - 表格只收录平铺条目；分组条目跳过并告警
//!   （两个生成器共用同一清单抽象，差异点在此显式决定）

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::catalog::{load_catalog, Catalog};

/// 生成 README 到 out 文件
pub(crate) fn generate(servers_dir: &Path, out: &Path) -> Result<()> {
    let catalog = load_catalog(servers_dir)?;
    for (id, reason) in &catalog.skipped {
        eprintln!("⚠️ 跳过条目 {}: {}", id, reason);
    }
    for g in &catalog.groups {
        eprintln!("⚠️ README 表格不收录分组，跳过: {}", g.name);
    }

    fs::write(out, render(&catalog))
        .with_context(|| format!("写入 README 失败: {}", out.display()))?;
    println!("✅ README 已更新 -> {}（共 {} 个服务）", out.display(), catalog.servers.len());
    Ok(())
}

/// 渲染固定结构的 Markdown 文档
pub(crate) fn render(catalog: &Catalog) -> String {
    let mut md = String::from(
        "# MCP Servers\n\
         \n\
         A curated collection of Model Context Protocol (MCP) servers for various services and tools. \n\
         \n\
         To add a server, see the [Contributing Guidelines](CONTRIBUTING.md).\n\
         \n\
         | Server | Description | Install |\n\
         |--------|-------------|---------|\n",
    );
    for s in &catalog.servers {
        let install = match s.install_link.as_deref() {
            Some(link) => format!(
                "<a href=\"{}\" style=\"border: 1px solid rgba(128, 128, 128, 0.5); \
                 padding: 4px 8px; text-decoration: none; border-radius: 4px; \
                 font-size: 12px;\">Install</a>",
                link
            ),
            None => String::new(),
        };
        md.push_str(&format!("| **{}** | {} | {} |\n", s.name, s.description, install));
    }
    md.push_str(
        "\n\
         ## Setup\n\
         \n\
         Each server has its own configuration requirements. \
         Refer to the individual server documentation for specific setup instructions.\n",
    );
    md
}
