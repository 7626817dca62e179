mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use config::ConfigMerger;
use sbreport_configs::{ConfigPaths, FsMetadataResolver};
use sbreport_core::adapters::{AsciidoctorConverter, FsWritePort, ShellGitProbe};
use sbreport_core::ports::HtmlConverter;
use sbreport_core::settings::DEFAULT_TITLE;
use sbreport_core::{ReportError, ReportSettings, output_name, run_report, write_report};
use sbreport_types::{MemberKind, OutputFormat};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "sbreport",
    version,
    about = "Generate readable reports of build-set hierarchies."
)]
struct Cli {
    /// Build-sets to report on, one report each.
    names: Vec<String>,

    /// List the available build-sets and exit.
    #[arg(long, default_value_t = false)]
    list_bsets: bool,

    /// List the available package configs and exit.
    #[arg(long, default_value_t = false)]
    list_configs: bool,

    /// Print listings as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    format: FormatArg,

    /// Output file (only valid with a single name).
    #[arg(long)]
    output: Option<Utf8PathBuf>,

    /// Directory to search for build-sets and configs (repeatable, searched first).
    #[arg(long)]
    config_dir: Vec<Utf8PathBuf>,

    /// Define a macro as key=value (repeatable, overrides sbreport.toml).
    #[arg(long)]
    define: Vec<String>,

    /// Repository to report the status of.
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Config file (default: ./sbreport.toml when present).
    #[arg(long)]
    config_file: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Text,
    #[value(alias = "markup")]
    Asciidoc,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Asciidoc => OutputFormat::Asciidoc,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        match e.downcast_ref::<ReportError>() {
            Some(report) if report.is_internal() => error!("internal error: {:?}", e),
            _ => error!("{:?}", e),
        }
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    install_interrupt_handler()?;
    println!("Source Builder, Reporter v{}", env!("CARGO_PKG_VERSION"));

    let file_config = match &cli.config_file {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&Utf8PathBuf::from("."))
            .context("load sbreport.toml config")?,
    };
    let defines = config::parse_defines(&cli.define)?;
    let merged = ConfigMerger::new(file_config).merge(&cli.config_dir, &defines);
    debug!(
        "merged config: config_dirs={:?}, macros={:?}",
        merged.config_dirs, merged.macros
    );

    let paths = ConfigPaths::new(merged.config_dirs.clone());

    if cli.list_bsets || cli.list_configs {
        if cli.list_bsets {
            print_listing("Build sets", &paths.list(MemberKind::BuildSet)?, cli.json)?;
        }
        if cli.list_configs {
            print_listing("Configs", &paths.list(MemberKind::Config)?, cli.json)?;
        }
        return Ok(());
    }

    if cli.names.is_empty() {
        anyhow::bail!("no build-sets given (try --list-bsets)");
    }
    if cli.output.is_some() && cli.names.len() > 1 {
        anyhow::bail!("--output can only be used with a single build-set");
    }

    let format = OutputFormat::from(cli.format);
    let settings = ReportSettings {
        format,
        repo_root: cli.repo_root.clone(),
        title: merged.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        author: merged.author,
        intro: merged.intro,
        macros: merged.macros,
        ..ReportSettings::default()
    };

    let converter = AsciidoctorConverter::new(merged.asciidoctor);
    let converter: Option<&dyn HtmlConverter> = match format {
        OutputFormat::Html => Some(&converter),
        OutputFormat::Text | OutputFormat::Asciidoc => None,
    };

    let resolver = FsMetadataResolver::new(paths);
    for name in &cli.names {
        let outcome = run_report(&settings, name, &resolver, &ShellGitProbe, converter)?;
        let destination = cli
            .output
            .clone()
            .unwrap_or_else(|| output_name(name, format));
        write_report(&outcome.document, &destination, &FsWritePort)?;
        info!(
            name = %name,
            build_sets = outcome.stats.build_sets,
            packages = outcome.stats.packages,
            "report complete"
        );
        println!("Report: {}", destination);
    }

    Ok(())
}

/// Exit 1 with a notice on Ctrl-C. Reports are only written once complete,
/// so an interrupt never leaves a partial file behind.
fn install_interrupt_handler() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build signal runtime")?;
    std::thread::spawn(move || {
        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                error!("user terminated");
                std::process::exit(1);
            }
        });
    });
    Ok(())
}

fn print_listing(heading: &str, entries: &[Utf8PathBuf], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    println!("{}:", heading);
    for entry in entries {
        println!("  {}", entry);
    }
    Ok(())
}
