// ==========================================
// 人力看板 - 命令行
// ==========================================
// preview  : 只解析，输出统计或完整 JSON
// import   : 解析并写入数据库，输出 ImportResult JSON
// template : 输出导入模板 CSV
// ==========================================

use crate::api::{preview_with_defaults, ImportApi};
use crate::db::get_default_db_path;
use crate::domain::import::ParseOutput;
use crate::importer::read_raw_text;
use crate::importer::template::TEMPLATE_FILE_NAME;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "manpower-import")]
#[command(about = "Import raw HR roster/movement exports into the manpower database")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file without writing anything
    Preview {
        /// Input file (.csv, .tsv, .txt, .xlsx, .xls)
        file: PathBuf,

        /// Print the full parse output as JSON
        #[arg(long)]
        json: bool,

        /// Read parse options from this database (defaults are used otherwise)
        #[arg(long)]
        db: Option<String>,
    },

    /// Parse a file and write employees and movements
    Import {
        /// Input file (.csv, .tsv, .txt, .xlsx, .xls)
        file: PathBuf,

        /// Database path (env MANPOWER_IMPORT_DB_PATH or the user data directory by default)
        #[arg(long)]
        db: Option<String>,
    },

    /// Write the import template CSV
    Template {
        /// Output path
        #[arg(short, long, default_value = TEMPLATE_FILE_NAME)]
        output: PathBuf,
    },
}

/// 命令执行结果，决定进程退出码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

pub async fn run(args: Args) -> Result<Outcome> {
    match args.command {
        Command::Preview { file, json, db } => {
            let output = match db {
                Some(db_path) => {
                    let api = ImportApi::open(&db_path)?;
                    api.preview_file(&file.to_string_lossy()).await?
                }
                None => {
                    let text = read_raw_text(&file)
                        .with_context(|| format!("读取文件失败: {}", file.display()))?;
                    preview_with_defaults(&text)
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_preview_summary(&output);
            }
            Ok(Outcome::Success)
        }

        Command::Import { file, db } => {
            let db_path = db.unwrap_or_else(get_default_db_path);
            info!(db_path = %db_path, "使用数据库");

            let api = ImportApi::open(&db_path)?;
            let result = api.import_file(&file.to_string_lossy()).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);

            Ok(if result.success {
                Outcome::Success
            } else {
                Outcome::Failed
            })
        }

        Command::Template { output } => {
            std::fs::write(&output, ImportApi::template_csv()?)
                .with_context(|| format!("写入模板失败: {}", output.display()))?;
            println!("{}", output.display());
            Ok(Outcome::Success)
        }
    }
}

fn print_preview_summary(output: &ParseOutput) {
    println!("employees: {}", output.employees.len());
    println!("movements: {}", output.movements.len());
    println!("warnings:  {}", output.warnings.len());
    for warning in &output.warnings {
        println!("  {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_args() {
        let args = Args::parse_from(["manpower-import", "-v", "import", "data.tsv", "--db", "x.db"]);
        assert!(args.verbose);
        match args.command {
            Command::Import { file, db } => {
                assert_eq!(file, PathBuf::from("data.tsv"));
                assert_eq!(db.as_deref(), Some("x.db"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_template_default_output() {
        let args = Args::parse_from(["manpower-import", "template"]);
        match args.command {
            Command::Template { output } => {
                assert_eq!(output, PathBuf::from(TEMPLATE_FILE_NAME))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
