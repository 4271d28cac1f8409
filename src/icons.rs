//! 图标颜色规范化模块：
//! - 将 SVG 中写死的 fill/stroke/渐变颜色统一改写为 currentColor，
//!   使图标跟随页面文字颜色适配亮/暗主题
//! - none 表示“不绘制该区域”，必须原样保留
//! - 基于正则的近似改写：不建结构树，各类规则分别幂等
//! - 非 SVG 内容（如误存成 .svg 的 PNG）原样跳过

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::catalog::{server_dirs, ICON_FILE};

/// 主题自适应哨兵值：继承外层文字颜色
const SENTINEL: &str = "currentColor";

lazy_static! {
    // 属性形式：fill="..." / stroke="..."（哨兵与 none 的排除在闭包里判断，
    // regex crate 不支持先行断言）
    static ref ATTR_FILL: Regex = Regex::new(r#"fill="([^"]*)""#).unwrap();
    static ref ATTR_STROKE: Regex = Regex::new(r#"stroke="([^"]*)""#).unwrap();
    // 样式类规则：点 + 短字母前缀 + 数字，如 .st0{...} / .cls12{...}
    static ref CSS_RULE: Regex = Regex::new(r"\.[A-Za-z]{1,4}\d+\s*\{[^}]*\}").unwrap();
    static ref CSS_FILL: Regex = Regex::new(r"fill:\s*([^;}]+);?").unwrap();
    static ref CSS_STROKE: Regex = Regex::new(r"stroke:\s*([^;}]+);?").unwrap();
    // 行内样式值：fill:#hex / fill:rgb(...) / fill:rgba(...)
    static ref STYLE_FILL_HEX: Regex = Regex::new(r"(?i)fill:\s*#([0-9a-f]+)").unwrap();
    static ref STYLE_FILL_RGB: Regex = Regex::new(r"fill:\s*rgba?\([^)]*\)").unwrap();
    // 渐变/图案引用
    static ref ATTR_FILL_URL: Regex = Regex::new(r#"fill="url\([^)]*\)""#).unwrap();
    static ref ATTR_STROKE_URL: Regex = Regex::new(r#"stroke="url\([^)]*\)""#).unwrap();
    // 渐变停色（引用被替换后定义可能残留，一并统一）
    static ref STOP_HEX: Regex = Regex::new(r"(?i)stop-color:\s*#[0-9a-f]{3,8}").unwrap();
    static ref STOP_ATTR: Regex = Regex::new(r#"stop-color="([^"]*)""#).unwrap();
}

/// 扫描目录下的全部图标并就地规范化；打印修复清单与总数
pub(crate) fn fix_all(servers_dir: &Path) -> Result<()> {
    let mut fixed = 0usize;
    for id in server_dirs(servers_dir)? {
        let icon_path = servers_dir.join(&id).join(ICON_FILE);
        if !icon_path.is_file() {
            // 没有图标可修
            continue;
        }
        match fix_svg(&icon_path) {
            Ok(true) => {
                println!("✅ 修复: {}", id);
                fixed += 1;
            }
            Ok(false) => {}
            Err(e) => eprintln!("⚠️ 跳过 {}: {:#}", id, e),
        }
    }
    println!("\n共修复 {} 个图标", fixed);
    Ok(())
}

/// 规范化单个图标文件；返回是否发生改写。
/// 所有规则跑完后只写一次盘，内容未变则不写。
pub(crate) fn fix_svg(path: &Path) -> Result<bool> {
    let bytes = fs::read(path).with_context(|| format!("读取图标失败: {}", path.display()))?;
    // 非 UTF-8 视作二进制图片，原样跳过
    let Ok(content) = String::from_utf8(bytes) else {
        return Ok(false);
    };
    if !looks_like_markup(&content) {
        return Ok(false);
    }
    let fixed = normalize_colors(&content);
    if fixed != content {
        fs::write(path, fixed.as_bytes())
            .with_context(|| format!("写入图标失败: {}", path.display()))?;
        return Ok(true);
    }
    Ok(false)
}

// 粗判是否为标记文本（防止误存的二进制文件被当作 SVG 改写）
fn looks_like_markup(content: &str) -> bool {
    content.contains("<svg") || content.trim_start().starts_with('<')
}

/// 按固定顺序执行全部改写规则；每条规则各自幂等
pub(crate) fn normalize_colors(content: &str) -> String {
    // 1) 属性颜色（保留 currentColor 与 none）
    let out = replace_attr_color(&ATTR_FILL, content, "fill");
    let out = replace_attr_color(&ATTR_STROKE, &out, "stroke");

    // 2) 样式类规则（.st0{fill:#7856FF;} 之类），保持选择器与花括号结构
    let out = CSS_RULE
        .replace_all(&out, |caps: &Captures| rewrite_css_rule(&caps[0]))
        .into_owned();

    // 3) 行内样式值（hex / rgb / rgba）
    let out = STYLE_FILL_HEX
        .replace_all(&out, |caps: &Captures| {
            if (3..=8).contains(&caps[1].len()) {
                format!("fill:{}", SENTINEL)
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();
    let out = STYLE_FILL_RGB
        .replace_all(&out, format!("fill:{}", SENTINEL).as_str())
        .into_owned();

    // 4) 渐变/图案引用：无法用单个继承色表达，刻意有损地替换
    let out = ATTR_FILL_URL
        .replace_all(&out, format!(r#"fill="{}""#, SENTINEL).as_str())
        .into_owned();
    let out = ATTR_STROKE_URL
        .replace_all(&out, format!(r#"stroke="{}""#, SENTINEL).as_str())
        .into_owned();

    // 5) 渐变停色
    let out = STOP_HEX
        .replace_all(&out, format!("stop-color:{}", SENTINEL).as_str())
        .into_owned();
    STOP_ATTR
        .replace_all(&out, format!(r#"stop-color="{}""#, SENTINEL).as_str())
        .into_owned()
}

// 属性值替换：currentColor 与 none 原样保留
fn replace_attr_color(re: &Regex, content: &str, attr: &str) -> String {
    re.replace_all(content, |caps: &Captures| {
        let value = &caps[1];
        if value == SENTINEL || value == "none" {
            caps[0].to_string()
        } else {
            format!(r#"{}="{}""#, attr, SENTINEL)
        }
    })
    .into_owned()
}

// 改写一条样式规则体内的 fill/stroke 声明；stroke: none 不动
fn rewrite_css_rule(rule: &str) -> String {
    let pass = CSS_FILL
        .replace_all(rule, format!("fill:{};", SENTINEL).as_str())
        .into_owned();
    CSS_STROKE
        .replace_all(&pass, |caps: &Captures| {
            let value = caps[1].trim();
            if value == "none" {
                caps[0].to_string()
            } else {
                format!("stroke:{};", SENTINEL)
            }
        })
        .into_owned()
}
