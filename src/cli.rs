//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 将 clap 的声明与业务逻辑解耦，便于在其它模块中复用参数。

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(name = "magpie", about = "MCP 服务目录维护工具", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// 规范化目录中全部图标的颜色（改写为 currentColor）
    FixIcons {
        /// 目录根路径，默认：servers
        #[arg(short, long, value_name = "DIR")]
        servers_dir: Option<PathBuf>,
    },
    /// 生成亮/暗双栏对照预览页
    Preview {
        /// 目录根路径，默认：servers
        #[arg(short, long, value_name = "DIR")]
        servers_dir: Option<PathBuf>,
        /// 输出文件路径，默认：scratchpad/preview.html
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// 依据目录清单重新生成 README 表格
    Readme {
        /// 目录根路径，默认：servers
        #[arg(short, long, value_name = "DIR")]
        servers_dir: Option<PathBuf>,
        /// README 输出路径，默认：README.md
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// 初始化示例目录（servers/ 与清单文件）
    Init {
        /// 强制覆盖已存在文件
        #[arg(long)]
        force: bool,
        /// 目标目录（默认当前目录）
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}
