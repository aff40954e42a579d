// ==========================================
// 人力看板 - 原始数据导入 命令行入口
// ==========================================

use clap::Parser;
use manpower_import::cli::{self, Args, Outcome};
use manpower_import::logging;
use std::process;

fn main() {
    let args = Args::parse();

    if args.verbose {
        logging::init_with_level("debug");
    } else {
        logging::init();
    }
    tracing::debug!("系统版本: {}", manpower_import::VERSION);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("无法创建异步运行时: {}", e);
        process::exit(1);
    });

    match runtime.block_on(cli::run(args)) {
        Ok(Outcome::Success) => process::exit(0),
        Ok(Outcome::Failed) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
