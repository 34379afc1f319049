use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tyrano_l10n::io::{table_store_for, TableReader, TableWriter};
use tyrano_l10n::mt::{translated_output_path, BatchTranslator, DriverOptions, Engine, EngineOptions};
use tyrano_l10n::project::{self, count_by_kind};
use tyrano_l10n::table::{build_records, records_to_rows, TranslationMap};
use tyrano_l10n::utils::preview;
use tyrano_l10n::{ScenarioStats, StringKind};

#[derive(Parser)]
#[command(name = "tyrano_l10n")]
#[command(about = "TyranoScript 场景文件（.ks）的翻译提取与回填工具")]
#[command(version)]
struct Cli {
    /// 静默模式(仅输出警告和错误)
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 从场景目录提取可翻译字符串到翻译表
    Extract {
        /// 场景根目录
        input: PathBuf,

        /// 输出翻译表(.xlsx 或 .json)
        #[arg(short, long, default_value = "translations.xlsx")]
        output: PathBuf,
    },

    /// 把翻译表中的译文回填到场景文件
    Apply {
        /// 场景根目录（与提取时相同）
        input: PathBuf,

        /// 翻译表(.xlsx 或 .json)
        table: PathBuf,

        /// 输出目录
        #[arg(short, long, default_value = "translated")]
        output: PathBuf,
    },

    /// 用在线机器翻译填写翻译表中的空译文
    Translate {
        /// 翻译表(.xlsx 或 .json)
        #[arg(required_unless_present = "list")]
        table: Option<PathBuf>,

        /// 列出所选翻译服务支持的语言
        #[arg(long)]
        list: bool,

        /// 翻译服务
        #[arg(long, value_enum, default_value = "libre")]
        engine: Engine,

        /// 源语言
        #[arg(long, default_value = "en")]
        from: String,

        /// 目标语言
        #[arg(long, default_value = "ru")]
        to: String,

        /// 每批行数
        #[arg(long, default_value_t = 10)]
        batch_size: usize,

        /// 批间等待(秒)
        #[arg(long, default_value_t = 0.5)]
        delay: f64,

        /// 每翻译多少行保存一次
        #[arg(long, default_value_t = 50)]
        save_every: usize,

        /// LibreTranslate 地址（覆盖 LIBRETRANSLATE_URL）
        #[arg(long)]
        endpoint: Option<String>,

        /// DeepL API 密钥（覆盖 DEEPL_API_KEY）
        #[arg(long)]
        deepl_key: Option<String>,

        /// 该文件存在时暂停翻译
        #[arg(long)]
        pause_file: Option<PathBuf>,
    },

    /// 显示场景目录统计信息
    Stats {
        /// 场景根目录
        input: PathBuf,
    },

    /// 恒等翻译检查：列出回填原文后发生变化的行
    Verify {
        /// 场景根目录
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match &cli.command {
        Command::Extract { input, output } => handle_extract(&cli, input, output),
        Command::Apply { input, table, output } => handle_apply(&cli, input, table, output),
        Command::Translate {
            table,
            list,
            engine,
            from,
            to,
            batch_size,
            delay,
            save_every,
            endpoint,
            deepl_key,
            pause_file,
        } => {
            if *list {
                print_languages(*engine);
                return Ok(());
            }
            let Some(table) = table else {
                bail!("需要指定翻译表");
            };

            let engine_options = EngineOptions {
                endpoint: endpoint.clone(),
                deepl_key: deepl_key.clone(),
            };
            let options = DriverOptions {
                batch_size: *batch_size,
                delay: parse_delay(*delay)?,
                save_every: *save_every,
                pause_file: pause_file.clone(),
            };
            handle_translate(&cli, table, *engine, from, to, &engine_options, options)
        }
        Command::Stats { input } => handle_stats(input),
        Command::Verify { input } => handle_verify(input),
    }
}

/// 批间等待秒数 → Duration（负数、NaN 和溢出都报错）
fn parse_delay(seconds: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| anyhow::anyhow!("无效的 --delay {}: {}", seconds, e))
}

/// 初始化日志（RUST_LOG 优先）
fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 处理提取
fn handle_extract(cli: &Cli, input: &Path, output: &Path) -> anyhow::Result<()> {
    let files = project::discover_scenarios(input)?;
    if files.is_empty() {
        println!("在 {:?} 中没有找到 .ks 文件", input);
        return Ok(());
    }

    let strings = project::extract_directory(input)
        .with_context(|| format!("提取失败: {:?}", input))?;
    let records = build_records(&strings);

    let store = table_store_for(output)?;
    store
        .write_rows(&records_to_rows(&records), output)
        .with_context(|| format!("写入翻译表失败: {:?}", output))?;

    if !cli.quiet {
        println!("扫描了 {} 个文件", files.len());
        println!("  角色名: {}", count_by_kind(&strings, StringKind::CharacterName));
        println!("  对白: {}", count_by_kind(&strings, StringKind::Dialogue));
        println!("  按钮: {}", count_by_kind(&strings, StringKind::Button));
        println!("共 {} 条，已写入 {:?}", records.len(), output);

        for record in records.iter().take(5) {
            println!(
                "  [{}:{}] {} \"{}\"",
                record.file,
                record.line,
                record.kind,
                preview(&record.original, 50)
            );
        }
        if records.len() > 5 {
            println!("  ... 还有 {} 条", records.len() - 5);
        }
    }

    Ok(())
}

/// 处理回填
fn handle_apply(cli: &Cli, input: &Path, table: &Path, output: &Path) -> anyhow::Result<()> {
    if !table.exists() {
        bail!("翻译表不存在: {:?}", table);
    }

    let rows = table_store_for(table)?
        .read_rows(table)
        .with_context(|| format!("读取翻译表失败: {:?}", table))?;
    let translations = TranslationMap::from_rows(&rows);

    let summary = project::apply_directory(input, &translations, output)
        .with_context(|| format!("回填失败: {:?} -> {:?}", input, output))?;

    if !cli.quiet {
        println!(
            "已加载 {} 条译文（其中按钮 {} 条）",
            translations.len(),
            translations.button_count()
        );
        println!(
            "写出 {} 个文件到 {:?}，{} 个文件共 {} 行被替换",
            summary.files_written, output, summary.files_changed, summary.lines_changed
        );
    }

    Ok(())
}

/// 处理机器翻译
fn handle_translate(
    cli: &Cli,
    table: &Path,
    engine: Engine,
    from: &str,
    to: &str,
    engine_options: &EngineOptions,
    options: DriverOptions,
) -> anyhow::Result<()> {
    if !table.exists() {
        bail!("翻译表不存在: {:?}", table);
    }

    let store = table_store_for(table)?;
    let translator = tyrano_l10n::mt::create_translator(engine, from, to, engine_options)?;
    let output = translated_output_path(table);

    let stop = install_interrupt_handler()?;
    if !cli.quiet {
        println!("使用 {} 翻译 {} -> {}（Ctrl+C 中断并保存进度）", translator.provider_name(), from, to);
    }

    let report = BatchTranslator::new(&translator, options)
        .with_stop_flag(stop)
        .translate_table(store.as_ref(), table, &output)
        .with_context(|| format!("翻译失败: {:?}", table))?;

    if !cli.quiet {
        println!(
            "完成: 翻译 {} 行，失败 {} 行，此前已翻译 {} 行，共 {} 行",
            report.translated, report.failed, report.already_translated, report.total_rows
        );
        if report.interrupted {
            println!("已中断，重新运行同一命令即可继续");
        }
        println!("结果已保存到 {:?}", output);
    }

    Ok(())
}

/// 打印翻译服务支持的语言
fn print_languages(engine: Engine) {
    let languages = engine.supported_languages();
    println!("翻译服务: {}", engine.display_name());
    println!("支持的语言 ({}):", languages.len());
    println!("  {:<8} {}", "代码", "语言");
    for (code, name) in languages {
        println!("  {:<8} {}", code, name);
    }
}

/// 第一次 Ctrl+C 设置中断标志，第二次直接退出
fn install_interrupt_handler() -> anyhow::Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
    })
    .context("无法设置 Ctrl+C 处理函数")?;
    Ok(stop)
}

/// 处理统计
fn handle_stats(input: &Path) -> anyhow::Result<()> {
    let scenarios = project::load_scenarios(input)?;
    if scenarios.is_empty() {
        println!("在 {:?} 中没有找到 .ks 文件", input);
        return Ok(());
    }

    let mut total = ScenarioStats {
        name: format!("合计（{} 个文件）", scenarios.len()),
        ..Default::default()
    };
    for scenario in &scenarios {
        let stats = scenario.get_stats();
        println!("{}", stats);
        total.merge(&stats);
    }
    println!("{}", total);

    Ok(())
}

/// 处理恒等翻译检查
///
/// 有差异时只报告，不视为失败。
fn handle_verify(input: &Path) -> anyhow::Result<()> {
    let mismatches = project::verify_round_trip(input)?;

    if mismatches.is_empty() {
        println!("✓ 恒等翻译不改变任何行");
        return Ok(());
    }

    println!("恒等翻译后有 {} 行发生变化（含行内标签的对白会丢失标签）:", mismatches.len());
    for mismatch in &mismatches {
        println!("{}:{}", mismatch.file, mismatch.line);
        println!("  - {}", mismatch.original.trim_end());
        println!("  + {}", mismatch.rebuilt.trim_end());
    }

    Ok(())
}
