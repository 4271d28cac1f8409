//! 预览页生成模块：
//! - 读取清单并装配目录记录（逐条容错，坏条目只告警不中断）
//! - 用内嵌 tera 模板渲染亮/暗双栏对照页（两栏行结构完全一致）
//! - 输出为单个自包含 HTML 文件，固定路径覆盖写入

use std::{fs, path::Path};

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use tera::{Context as TContext, Tera};

use crate::catalog::load_catalog;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// 生成预览页到 out 文件
pub(crate) fn generate(servers_dir: &Path, out: &Path) -> Result<()> {
    let catalog = load_catalog(servers_dir)?;
    for (id, reason) in &catalog.skipped {
        eprintln!("⚠️ 跳过条目 {}: {}", id, reason);
    }

    let tera = embedded_templates()?;
    let mut ctx = TContext::new();
    ctx.insert("servers", &catalog.servers);
    ctx.insert("groups", &catalog.groups);
    ctx.insert("total", &catalog.total());
    ctx.insert("icon_base", &icon_base(servers_dir));
    ctx.insert(
        "panes",
        &serde_json::json!([
            { "class": "light-mode", "label": "Light mode" },
            { "class": "dark-mode", "label": "Dark mode" },
        ]),
    );
    let generated_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    ctx.insert("generated_at", &generated_at);

    let html = tera
        .render("preview.html.tera", &ctx)
        .context("渲染模板 preview.html.tera 失败")?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建输出目录失败: {}", parent.display()))?;
        }
    }
    fs::write(out, html).with_context(|| format!("写入预览页失败: {}", out.display()))?;
    println!("✅ 生成完成 -> {}（共 {} 个服务）", out.display(), catalog.total());
    Ok(())
}

// 装载编译期内嵌的模板
fn embedded_templates() -> Result<Tera> {
    let mut tera = Tera::default();
    for f in TEMPLATES_DIR.files() {
        let name = f.path().to_string_lossy();
        let Some(text) = f.contents_utf8() else { continue };
        tera.add_raw_template(name.as_ref(), text)
            .with_context(|| format!("装载模板失败: {}", name))?;
    }
    Ok(tera)
}

// 预览文件默认在与 servers/ 同级的 scratchpad/ 下，图标按 ../<目录名> 相对引用
fn icon_base(servers_dir: &Path) -> String {
    match servers_dir.file_name() {
        Some(n) => format!("../{}", n.to_string_lossy()),
        None => "../servers".to_string(),
    }
}
