use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rsrewriter::{ConfigManager, Rewriter, RewriterConfig};

/// 订阅条目 HTML 内容改写
#[derive(Debug, Parser)]
#[command(name = "rsrewriter", version, about)]
struct Cli {
    /// 条目 URL，用于域名规则匹配
    #[arg(short, long, default_value = "")]
    url: String,

    /// 自定义规则（逗号分隔），非空时替代域名预置规则
    #[arg(short, long, default_value = "")]
    rules: String,

    /// 输入 HTML 文件，缺省从标准输入读取
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 只输出最终执行的规则列表
    #[arg(long)]
    plan: bool,

    /// 列出已注册的规则
    #[arg(long)]
    list_rules: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误：{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rsrewriter=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => RewriterConfig::from_json_file(path)
            .with_context(|| format!("加载配置 {} 失败", path.display()))?,
        None => ConfigManager::get_default(),
    };
    config.verbose |= cli.verbose;

    let rewriter = Rewriter::new(config);

    if cli.list_rules {
        for name in rewriter.registry().names() {
            println!("{name}");
        }
        return Ok(());
    }

    if cli.plan {
        println!("{}", rewriter.plan(&cli.url, &cli.rules));
        return Ok(());
    }

    let content = read_input(cli.input.as_ref())?;
    print!("{}", rewriter.rewrite(&cli.url, &content, &cli.rules));
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("读取输入文件 {} 失败", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("读取标准输入失败")?;
            Ok(buf)
        }
    }
}
