//! 目录数据模块：
//! - 定义清单（index.json）与条目描述（server.json）的数据结构
//! - 提供 load_catalog：按清单顺序装配渲染记录，逐条容错
//! - 目录布局约定：servers/<id>/{server.json,icon.svg}

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::install::install_link;

/// 清单文件名（直接枚举目录时需排除）
pub(crate) const MANIFEST_FILE: &str = "index.json";
/// 条目描述文件名
pub(crate) const DESCRIPTOR_FILE: &str = "server.json";
/// 图标文件名（条目子目录内的约定相对路径）
pub(crate) const ICON_FILE: &str = "icon.svg";

/// 清单条目：裸 id，或 [分组名, [id...]] 二元组
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ManifestEntry {
    Server(String),
    Group(String, Vec<String>),
}

/// 条目描述（server.json）
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Descriptor {
    pub(crate) name: String,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) transport: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) icon: Option<String>,
    #[serde(default)]
    pub(crate) oauth: Option<bool>,
    /// 仅提示语条目（无 config）也能生成只携带 id 的安装链接
    #[serde(default)]
    pub(crate) prompt: Option<String>,
    #[serde(default)]
    pub(crate) config: Option<ConnectionConfig>,
}

/// 连接配置；序列化时省略空字段（安装链接要求紧凑 JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ConnectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) env: Option<HashMap<String, String>>,
}

/// 渲染记录：每次运行现算，不落盘
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ServerRecord {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) install_link: Option<String>,
}

/// 分组记录（保留分组名与成员顺序）
#[derive(Debug, Serialize)]
pub(crate) struct GroupRecord {
    pub(crate) name: String,
    pub(crate) servers: Vec<ServerRecord>,
}

/// 一次装配的结果：成功记录 + 被跳过的条目（id, 原因）
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    pub(crate) servers: Vec<ServerRecord>,
    pub(crate) groups: Vec<GroupRecord>,
    pub(crate) skipped: Vec<(String, String)>,
}

impl Catalog {
    /// 条目总数（含分组成员）
    pub(crate) fn total(&self) -> usize {
        self.servers.len() + self.groups.iter().map(|g| g.servers.len()).sum::<usize>()
    }
}

/// 读取清单（整体失败向上传播，终止本次运行）
pub(crate) fn load_manifest(servers_dir: &Path) -> Result<Vec<ManifestEntry>> {
    let path = servers_dir.join(MANIFEST_FILE);
    let text =
        fs::read_to_string(&path).with_context(|| format!("读取清单失败: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("解析清单失败: {}", path.display()))
}

/// 读取单个条目的描述文件
pub(crate) fn load_descriptor(servers_dir: &Path, id: &str) -> Result<Descriptor> {
    let path = servers_dir.join(id).join(DESCRIPTOR_FILE);
    let text =
        fs::read_to_string(&path).with_context(|| format!("读取描述失败: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("解析描述失败: {}", path.display()))
}

/// 按清单顺序装配目录：单条失败只记入 skipped，不中断整体；
/// 分组成员全部失败时整组省略。
pub(crate) fn load_catalog(servers_dir: &Path) -> Result<Catalog> {
    let entries = load_manifest(servers_dir)?;
    let mut catalog = Catalog::default();
    for entry in entries {
        match entry {
            ManifestEntry::Server(id) => match load_record(servers_dir, &id) {
                Ok(rec) => catalog.servers.push(rec),
                Err(e) => catalog.skipped.push((id, format!("{e:#}"))),
            },
            ManifestEntry::Group(name, ids) => {
                let mut members = Vec::new();
                for id in ids {
                    match load_record(servers_dir, &id) {
                        Ok(rec) => members.push(rec),
                        Err(e) => catalog.skipped.push((id, format!("{e:#}"))),
                    }
                }
                if !members.is_empty() {
                    catalog.groups.push(GroupRecord { name, servers: members });
                }
            }
        }
    }
    Ok(catalog)
}

fn load_record(servers_dir: &Path, id: &str) -> Result<ServerRecord> {
    let desc = load_descriptor(servers_dir, id)?;
    Ok(ServerRecord {
        id: id.to_string(),
        install_link: install_link(id, &desc),
        name: desc.name,
        description: desc.description,
    })
}

/// 枚举目录下的条目子目录（排除清单文件与其它普通文件），按名称排序
pub(crate) fn server_dirs(servers_dir: &Path) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for entry in fs::read_dir(servers_dir)
        .with_context(|| format!("读取目录失败: {}", servers_dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name == MANIFEST_FILE || !entry.file_type()?.is_dir() {
            continue;
        }
        ids.push(name);
    }
    ids.sort();
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_entry(servers_dir: &Path, id: &str, descriptor: &str) {
        let dir = servers_dir.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DESCRIPTOR_FILE), descriptor).unwrap();
    }

    fn write_manifest(servers_dir: &Path, manifest: &str) {
        fs::create_dir_all(servers_dir).unwrap();
        fs::write(servers_dir.join(MANIFEST_FILE), manifest).unwrap();
    }

    const MINIMAL: &str = r#"{"name":"Foo","description":"Foo server"}"#;

    #[test]
    fn test_manifest_flat_and_group() {
        let tmp = tempdir().unwrap();
        write_manifest(tmp.path(), r#"["a", ["Group A", ["b", "c"]], "d"]"#);
        let entries = load_manifest(tmp.path()).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(matches!(&entries[0], ManifestEntry::Server(id) if id == "a"));
        match &entries[1] {
            ManifestEntry::Group(name, ids) => {
                assert_eq!(name, "Group A");
                assert_eq!(ids, &["b".to_string(), "c".to_string()]);
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_manifest_unreadable_is_fatal() {
        let tmp = tempdir().unwrap();
        assert!(load_manifest(tmp.path()).is_err());
        write_manifest(tmp.path(), "not json");
        assert!(load_manifest(tmp.path()).is_err());
    }

    #[test]
    fn test_descriptor_optional_fields() {
        let tmp = tempdir().unwrap();
        write_entry(
            tmp.path(),
            "full",
            r#"{
                "name": "Full",
                "description": "All fields",
                "transport": ["stdio", "sse"],
                "icon": "icon.svg",
                "oauth": true,
                "config": {"command": "npx", "args": ["-y", "full"], "env": {"KEY": "v"}}
            }"#,
        );
        let desc = load_descriptor(tmp.path(), "full").unwrap();
        assert_eq!(desc.transport.as_deref(), Some(&["stdio".to_string(), "sse".to_string()][..]));
        assert_eq!(desc.icon.as_deref(), Some("icon.svg"));
        assert_eq!(desc.oauth, Some(true));
        let config = desc.config.unwrap();
        assert_eq!(config.command.as_deref(), Some("npx"));
        assert_eq!(config.env.unwrap().get("KEY").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_catalog_preserves_manifest_order() {
        let tmp = tempdir().unwrap();
        write_manifest(tmp.path(), r#"["b", "a"]"#);
        write_entry(tmp.path(), "a", MINIMAL);
        write_entry(tmp.path(), "b", MINIMAL);
        let catalog = load_catalog(tmp.path()).unwrap();
        let ids: Vec<&str> = catalog.servers.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_broken_entry_skipped_with_reason() {
        let tmp = tempdir().unwrap();
        write_manifest(tmp.path(), r#"["ok", "missing", "bad"]"#);
        write_entry(tmp.path(), "ok", MINIMAL);
        write_entry(tmp.path(), "bad", "{ not json");
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.servers.len(), 1);
        assert_eq!(catalog.servers[0].id, "ok");
        let skipped: Vec<&str> = catalog.skipped.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(skipped, ["missing", "bad"]);
    }

    #[test]
    fn test_group_keeps_surviving_members() {
        let tmp = tempdir().unwrap();
        write_manifest(tmp.path(), r#"[["Group A", ["a", "b"]]]"#);
        write_entry(tmp.path(), "a", MINIMAL);
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].servers.len(), 1);
        assert_eq!(catalog.groups[0].servers[0].id, "a");
    }

    #[test]
    fn test_group_with_all_members_broken_is_omitted() {
        let tmp = tempdir().unwrap();
        write_manifest(tmp.path(), r#"[["Group A", ["a", "b"]]]"#);
        let catalog = load_catalog(tmp.path()).unwrap();
        assert!(catalog.groups.is_empty());
        assert_eq!(catalog.skipped.len(), 2);
    }

    #[test]
    fn test_total_counts_group_members() {
        let tmp = tempdir().unwrap();
        write_manifest(tmp.path(), r#"["a", ["G", ["b"]]]"#);
        write_entry(tmp.path(), "a", MINIMAL);
        write_entry(tmp.path(), "b", MINIMAL);
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.total(), 2);
    }

    #[test]
    fn test_server_dirs_excludes_manifest() {
        let tmp = tempdir().unwrap();
        write_manifest(tmp.path(), "[]");
        write_entry(tmp.path(), "a", MINIMAL);
        write_entry(tmp.path(), "b", MINIMAL);
        fs::write(tmp.path().join("stray.txt"), "x").unwrap();
        let dirs = server_dirs(tmp.path()).unwrap();
        assert_eq!(dirs, ["a", "b"]);
    }
}
