use crate::{
    breakdown,
    config::Config,
    document, ingest,
    pipeline::Pipeline,
    util::{ensure_dir, now_rfc3339},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "completion-check")]
#[command(about = "Job status completion analyzer (CSV tally + metric + PDF report)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./completion-check.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the status breakdown and print it as JSON.
    Breakdown {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the breakdown table and completion metric for humans.
    Show {
        #[arg(long)]
        input: PathBuf,
    },
    /// Run a full job: breakdown + report JSON + PDF artifact.
    Export {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;

    match &args.cmd {
        Command::Breakdown { input } => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            breakdown_cmd(&cfg, input)
        }
        Command::Show { input } => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            show(&cfg, input)
        }
        Command::Export { input, out_dir } => export(&args, &cfg, input, out_dir.as_deref()),
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    let default = PathBuf::from("completion-check.toml");
    if default.exists() {
        return Config::load(&default);
    }
    let cfg = Config::default();
    cfg.validate()?;
    Ok(cfg)
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn breakdown_cmd(cfg: &Config, input: &Path) -> Result<()> {
    validate_input(cfg, input)?;
    let loaded = ingest::load(cfg, input)?;
    let vocab = &cfg.vocabulary;
    let result = breakdown::compute(
        &loaded.table,
        &vocab.status_column_candidates,
        &vocab.expected_statuses,
        &vocab.completed_statuses,
    )?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "input": loaded.summary,
            "breakdown": result,
        }))?
    );
    Ok(())
}

fn show(cfg: &Config, input: &Path) -> Result<()> {
    validate_input(cfg, input)?;
    let loaded = ingest::load(cfg, input)?;
    let vocab = &cfg.vocabulary;
    let result = breakdown::compute(
        &loaded.table,
        &vocab.status_column_candidates,
        &vocab.expected_statuses,
        &vocab.completed_statuses,
    )?;
    let doc = document::render(&cfg.report.title, &result);
    let metric = document::metric(&result);

    print!("{}", doc.to_text());
    println!();
    println!("Jobs Completed: {} ({})", metric.value, metric.note);
    Ok(())
}

fn export(args: &Args, cfg: &Config, input: &Path, out_override: Option<&Path>) -> Result<()> {
    let out_root = out_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.out_dir));
    ensure_dir(&out_root)?;

    let log_path = resolve_log_path(cfg, Some(&out_root));
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    validate_input(cfg, input)?;
    info!("export input={} out={}", input.display(), out_root.display());

    if cfg.debug.dump_effective_config {
        let raw = toml::to_string(cfg).unwrap_or_default();
        std::fs::write(out_root.join("effective-config.toml"), raw)?;
    }

    let started = now_rfc3339();
    let pipeline = Pipeline::new(cfg);
    let out = pipeline.run_job(input)?;

    if cfg.output.write_report_json {
        let path = out_root.join(&cfg.output.report_filename);
        write_artifact(
            &path,
            serde_json::to_string_pretty(&out.report)?.as_bytes(),
            cfg.global.overwrite,
        )?;
        info!("wrote {}", path.display());
    }

    let mut pdf_written = false;
    if let Some(bytes) = &out.pdf {
        let path = out_root.join(&cfg.output.pdf_filename);
        write_artifact(&path, bytes, cfg.global.overwrite)?;
        info!("wrote {}", path.display());
        pdf_written = true;
    }

    if cfg.output.write_index_json {
        let index = serde_json::json!({
            "job_name": cfg.global.job_name,
            "started": started,
            "finished": now_rfc3339(),
            "input": out.report.input,
            "report": cfg.output.write_report_json.then(|| cfg.output.report_filename.clone()),
            "pdf": pdf_written.then(|| cfg.output.pdf_filename.clone()),
        });
        write_artifact(
            &out_root.join("index.json"),
            serde_json::to_string_pretty(&index)?.as_bytes(),
            cfg.global.overwrite,
        )?;
    }

    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "job_name": cfg.global.job_name,
                "out_dir": out_root,
                "total_jobs": out.report.breakdown.total_jobs,
                "completed_count": out.report.breakdown.completed_count,
                "completed_percent": out.report.breakdown.completed_percent,
                "status": "ok",
            }))?
        );
    }

    Ok(())
}

fn write_artifact(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(anyhow!(
            "artifact already exists and overwrite=false: {}",
            path.display()
        ));
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn validate_input(cfg: &Config, input: &Path) -> Result<()> {
    let input_str = input.display().to_string();

    if cfg.security.reject_url_inputs && looks_like_url(&input_str) {
        return Err(anyhow!("URL inputs are disabled: {input_str}"));
    }

    if !input.exists() {
        return Err(anyhow!("input does not exist: {}", input.display()));
    }

    if let Some(ext) = input.extension().and_then(|s| s.to_str()) {
        if ext.to_ascii_lowercase() != "csv" {
            warn!("input does not look like a CSV: {}", input.display());
        }
    } else {
        warn!("input has no extension; assuming CSV: {}", input.display());
    }

    Ok(())
}

fn looks_like_url(s: &str) -> bool {
    let s = s.to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}

fn resolve_log_path(cfg: &Config, out_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    if let Some(out_dir) = out_dir {
        return Some(out_dir.join("completion-check.log"));
    }

    Some(PathBuf::from(&cfg.paths.out_dir).join("completion-check.log"))
}
