//! 入口：解析命令行并分发到 commands 模块。

mod catalog;
mod cli;
mod commands;
mod icons;
mod init;
mod install;
mod preview;
mod readme;
mod utils;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    commands::run(cli)
}
