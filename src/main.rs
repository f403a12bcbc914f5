//! kgrouper - export unmanaged Kubernetes resources grouped by workload
//!
//! Snapshots one namespace, works out which ConfigMaps, Secrets, volumes,
//! RBAC, Services, routes, autoscalers and network policies each workload
//! needs, and writes cleaned manifests into one directory per workload.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kgrouper::cli::{ConfigSubcommand, display_version, handle_config_command, init_logging};
use kgrouper::config::{ConfigLoader, LoggerConfig};
use kgrouper::export::{DirectorySink, export_dir_name};
use kgrouper::{ClusterSource, ExportService, FileClusterSource, KubeClusterSource};

/// Export unmanaged Kubernetes resources grouped by workload
#[derive(Parser, Debug)]
#[command(name = "kgrouper")]
#[command(about = "Export unmanaged Kubernetes resources grouped by the workload they belong to", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    /// Namespace to export
    #[arg(required = true)]
    namespace: Option<String>,

    /// Kubeconfig context to use instead of the current one
    #[arg(long)]
    context: Option<String>,

    /// Resolve and print the groups without writing files
    #[arg(long)]
    dry_run: bool,

    /// Concurrent requests while caching resources
    #[arg(long)]
    workers: Option<usize>,

    /// Directory to create the export directory in
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Read resources from a YAML dump instead of a cluster
    #[arg(long, value_name = "PATH")]
    from_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Config { subcommand }) => {
            init_logging(&LoggerConfig::default(), args.debug);
            return handle_config_command(subcommand);
        }
        Some(Command::Version) => {
            display_version();
            return Ok(());
        }
        None => {}
    }

    let namespace = args.namespace.context("A namespace is required")?;

    // Offline runs only use a context layer when one is named explicitly
    let context_name = match (&args.context, &args.from_file) {
        (Some(ctx), _) => Some(ctx.clone()),
        (None, None) => Some(kgrouper::kube::get_context()),
        (None, Some(_)) => None,
    };

    let mut config =
        ConfigLoader::load(context_name.as_deref()).context("Failed to load configuration")?;
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if args.dry_run {
        config.dry_run = true;
    }

    init_logging(&config.logger, args.debug);
    tracing::debug!(
        "Configuration loaded: workers={}, outputDir={}, dryRun={}",
        config.workers,
        config.output_dir.display(),
        config.dry_run
    );

    let source: Box<dyn ClusterSource> = match &args.from_file {
        Some(path) => Box::new(FileClusterSource::load(namespace.as_str(), path).await?),
        None => {
            let client = kgrouper::kube::connect(args.context.as_deref()).await?;
            tracing::info!(
                "Connected to Kubernetes context: {}",
                context_name.as_deref().unwrap_or("in-cluster")
            );
            Box::new(KubeClusterSource::new(client, namespace.as_str()))
        }
    };

    let service = ExportService::new(source)
        .workers(config.workers)
        .dry_run(config.dry_run);

    let export_dir = export_dir_name(&config.output_dir, &namespace, Local::now());
    let sink = DirectorySink::new(&export_dir);

    let mut summary = service
        .export(&namespace, &sink)
        .await
        .with_context(|| format!("Export of namespace {} failed", namespace))?;

    if !config.dry_run && !summary.is_empty() {
        summary.export_dir = Some(export_dir);
    }
    if summary.failed_writes > 0 {
        tracing::warn!("{} resources could not be written", summary.failed_writes);
    }

    print!("{}", summary);
    Ok(())
}
