//! 安装链接模块：
//! - 将条目的连接配置编码为 cursor.com 安装深链
//! - command 与 args 合并为单条命令串（目标安装流程只接受单串命令）
//! - 编码失败一律视为“无链接”，不向外抛错

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::catalog::Descriptor;

const INSTALL_BASE: &str = "https://cursor.com/en/install-mcp";

/// 生成安装深链；无法生成时返回 None
pub(crate) fn install_link(id: &str, desc: &Descriptor) -> Option<String> {
    let Some(config) = desc.config.as_ref() else {
        // 仅提示语条目：链接只带 id，不嵌配置
        if desc.prompt.is_some() {
            return Some(format!("{}?name={}", INSTALL_BASE, urlencoding::encode(id)));
        }
        return None;
    };

    let mut config = config.clone();
    match (config.command.take(), config.args.take()) {
        (Some(cmd), Some(args)) => {
            config.command = Some(format!("{} {}", cmd, args.join(" ")));
        }
        (cmd, args) => {
            config.command = cmd;
            config.args = args;
        }
    }

    let json = serde_json::to_string(&config).ok()?;
    let b64 = STANDARD.encode(json.as_bytes());
    Some(format!(
        "{}?name={}&config={}",
        INSTALL_BASE,
        urlencoding::encode(id),
        urlencoding::encode(&b64)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConnectionConfig;

    fn descriptor(config: Option<ConnectionConfig>, prompt: Option<&str>) -> Descriptor {
        Descriptor {
            name: "Foo".to_string(),
            description: "Foo server".to_string(),
            transport: None,
            icon: None,
            oauth: None,
            prompt: prompt.map(str::to_string),
            config,
        }
    }

    fn stdio_config(command: &str, args: Option<Vec<&str>>) -> ConnectionConfig {
        ConnectionConfig {
            url: None,
            command: Some(command.to_string()),
            args: args.map(|a| a.into_iter().map(str::to_string).collect()),
            env: None,
        }
    }

    /// 从链接取出 config 参数并还原为 JSON
    fn decode_config(link: &str) -> serde_json::Value {
        let encoded = link.split("config=").nth(1).expect("config param");
        let b64 = urlencoding::decode(encoded).unwrap();
        let bytes = STANDARD.decode(b64.as_bytes()).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_command_args_merged() {
        let desc = descriptor(Some(stdio_config("run", Some(vec!["--x"]))), None);
        let link = install_link("foo", &desc).unwrap();
        let config = decode_config(&link);
        assert_eq!(config, serde_json::json!({"command": "run --x"}));
    }

    #[test]
    fn test_command_without_args_untouched() {
        let desc = descriptor(Some(stdio_config("run", None)), None);
        let link = install_link("foo", &desc).unwrap();
        let config = decode_config(&link);
        assert_eq!(config, serde_json::json!({"command": "run"}));
    }

    #[test]
    fn test_url_config_passthrough() {
        let config = ConnectionConfig {
            url: Some("https://mcp.example.com/sse".to_string()),
            command: None,
            args: None,
            env: None,
        };
        let link = install_link("foo", &descriptor(Some(config), None)).unwrap();
        assert_eq!(decode_config(&link), serde_json::json!({"url": "https://mcp.example.com/sse"}));
    }

    #[test]
    fn test_no_config_no_prompt_is_absent() {
        assert_eq!(install_link("foo", &descriptor(None, None)), None);
    }

    #[test]
    fn test_prompt_only_yields_name_only_link() {
        let link = install_link("foo", &descriptor(None, Some("Paste this prompt"))).unwrap();
        assert_eq!(link, "https://cursor.com/en/install-mcp?name=foo");
    }

    #[test]
    fn test_identifier_percent_encoded() {
        let desc = descriptor(Some(stdio_config("run", None)), None);
        let link = install_link("my server", &desc).unwrap();
        assert!(link.contains("name=my%20server"));
    }
}
