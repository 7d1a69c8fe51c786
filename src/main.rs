use anyhow::{bail, Context, Result};
use clap::Parser;
use portprobe::cli::{Args, OutputFormat};
use portprobe::output;
use portprobe::probe::ProbeEngine;
use portprobe::report::{BatchReport, HostEntry};
use portprobe::types::{PortSpec, Timing};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let timing = Timing::from_secs(args.timeout).context("invalid --timeout")?;
    let spec: PortSpec = args.ports.parse().context("invalid --ports")?;
    let targets = args.target_list();
    if targets.is_empty() {
        bail!("no targets supplied");
    }

    let mut engine = ProbeEngine::new().with_concurrency(args.concurrency);
    if args.verbose && args.output == OutputFormat::Plain && !args.banner && !args.server_version {
        engine = engine.with_progress();
    }

    // Ctrl-C stops new attempts; whatever completed is still reported.
    let cancel = engine.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            output::print_warning("interrupt received, finishing in-flight probes");
            cancel.cancel();
        }
    });

    if args.banner {
        run_banner(&engine, &args, &targets, &spec, timing).await
    } else if args.server_version {
        run_version(&engine, &args, &targets, timing).await
    } else {
        run_scan(&engine, &args, &targets, &spec, timing).await
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "portprobe=debug" } else { "portprobe=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_banner(
    engine: &ProbeEngine,
    args: &Args,
    targets: &[String],
    spec: &PortSpec,
    timing: Timing,
) -> Result<()> {
    let [target] = targets else {
        bail!("banner mode takes exactly one target");
    };
    let port = spec
        .single()
        .context("banner mode takes exactly one port, e.g. -p 80")?;

    let banner = engine.grab_banner(target, port, timing).await?;
    output::print_banner(&banner, args.output)?;
    Ok(())
}

async fn run_version(
    engine: &ProbeEngine,
    args: &Args,
    targets: &[String],
    timing: Timing,
) -> Result<()> {
    let [target] = targets else {
        bail!("version mode takes exactly one target");
    };

    let version = engine.server_version(target, timing).await?;
    output::print_version(&version, args.output)?;
    Ok(())
}

async fn run_scan(
    engine: &ProbeEngine,
    args: &Args,
    targets: &[String],
    spec: &PortSpec,
    timing: Timing,
) -> Result<()> {
    // One target, one port: a single classification line.
    if let ([target], Some(port)) = (targets, spec.single()) {
        let result = engine.scan_single(target, port, timing).await?;
        output::print_single(&result, args.output)?;
        return Ok(());
    }

    if args.output == OutputFormat::Plain {
        output::print_scan_header(targets, spec.count(), args.timeout);
    }

    let batch = if let [target] = targets {
        let report = match spec {
            PortSpec::Range(range) => engine.scan_range(target, *range, timing).await?,
            _ => engine.scan_list(target, &spec.ports(), timing).await?,
        };
        BatchReport {
            hosts: vec![HostEntry::Scanned(report)],
        }
    } else {
        engine.scan_many(targets, &spec.ports(), timing).await
    };

    output::print_batch(&batch, args.output)?;
    if !batch.any_scanned() {
        bail!("no target could be scanned");
    }
    Ok(())
}
