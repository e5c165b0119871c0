use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use contraction::api::{
    analyse_pair, analyze, compare, default_blob_path, read_blob, read_series, render_analysis,
    render_block_average, render_comparison, write_blob, BlockSize, Comparison, RatioEstimate,
    Topology,
};
use contraction::blockavg::DEFAULT_BLOCK;
use contraction::SpectralCfg;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Contraction factors of polymer topologies and Rg² block averages")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the spectral pipeline for one topology and save its result blob
    Analyze {
        /// Preset name (see `topologies`)
        #[arg(long)]
        topology: String,
        /// Blob path; defaults to results/<topology>_results.json
        #[arg(long)]
        out: Option<PathBuf>,
        /// Replace an existing blob
        #[arg(long)]
        force: bool,
        /// Skip the step-by-step report
        #[arg(long)]
        quiet: bool,
    },
    /// Ratio g(theta)/g(tree) from two saved blobs
    Compare {
        #[arg(long)]
        theta: Option<PathBuf>,
        #[arg(long)]
        tree: Option<PathBuf>,
        /// Print JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Block-averaged <Rg²> of two series and their ratio
    BlockAverage {
        /// Series A: two columns (time, observable)
        #[arg(long = "mer", visible_alias = "series-a")]
        series_a: PathBuf,
        /// Series B, same format
        #[arg(long = "tree", visible_alias = "series-b")]
        series_b: PathBuf,
        /// Samples per block
        #[arg(long, default_value_t = DEFAULT_BLOCK as i64, allow_negative_numbers = true)]
        block: i64,
        #[arg(long)]
        json: bool,
    },
    /// List the preset topologies
    Topologies,
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Analyze {
            topology,
            out,
            force,
            quiet,
        } => analyze_topology(&topology, out, force, quiet).map(|_| ()),
        Action::Compare { theta, tree, json } => {
            let theta = theta.unwrap_or_else(|| default_blob_path("theta"));
            let tree = tree.unwrap_or_else(|| default_blob_path("tree"));
            let cmp = compare_blobs(&theta, &tree)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                println!("{}", render_comparison(&cmp));
            }
            Ok(())
        }
        Action::BlockAverage {
            series_a,
            series_b,
            block,
            json,
        } => {
            let est = block_average_files(&series_a, &series_b, block)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&est)?);
            } else {
                println!("{}", render_block_average(&est));
            }
            Ok(())
        }
        Action::Topologies => topologies(),
        Action::Report => report(),
    }
}

fn analyze_topology(name: &str, out: Option<PathBuf>, force: bool, quiet: bool) -> Result<PathBuf> {
    let topology = Topology::by_name(name)?;
    let cfg = SpectralCfg::default();
    tracing::info!(topology = %topology.name, "analyze");
    let analysis = analyze(&topology, &cfg)
        .with_context(|| format!("analyzing topology {}", topology.name))?;
    tracing::info!(
        v = analysis.metrics.vertices,
        e = analysis.metrics.edges,
        loops = analysis.metrics.loops,
        trace = analysis.trace(),
        trace_deviation = analysis.spectrum.trace_deviation(),
        g = analysis.g(),
        "contraction_factor"
    );
    if !quiet {
        println!("{}", render_analysis(&analysis));
    }

    let out = out.unwrap_or_else(|| default_blob_path(&topology.name));
    write_blob(&out, &analysis.to_blob(), force)
        .with_context(|| format!("saving result for {}", topology.name))?;
    let payload = Payload::new(
        "analyze",
        json!({
            "topology": topology.name,
            "eps_zero": cfg.eps_zero,
            "trace_tol": cfg.trace_tol,
            "force": force
        }),
    )
    .with_input(format!("preset:{}", topology.name));
    let prov = provenance::write_sidecar(&out, payload)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "saved");
    Ok(out)
}

fn compare_blobs(theta: &Path, tree: &Path) -> Result<Comparison> {
    tracing::info!(theta = %theta.display(), tree = %tree.display(), "compare");
    let subject = read_blob(theta).context("loading theta result")?;
    let reference = read_blob(tree).context("loading tree result")?;
    // Swapped or mislabelled paths would silently report the inverse ratio.
    for (flag, path, found) in [
        ("theta", theta, &subject.topology),
        ("tree", tree, &reference.topology),
    ] {
        if found != flag {
            bail!(
                "--{flag} expects a {flag} result, but {} holds topology {found}",
                path.display()
            );
        }
    }
    let cmp = compare(&subject, &reference)?;
    tracing::info!(ratio = cmp.ratio, "relative_contraction_factor");
    Ok(cmp)
}

fn block_average_files(series_a: &Path, series_b: &Path, block: i64) -> Result<RatioEstimate> {
    // Configuration is validated before any file is touched.
    let block = BlockSize::new(block)?;
    tracing::info!(
        series_a = %series_a.display(),
        series_b = %series_b.display(),
        block = block.get(),
        "block_average"
    );
    let a = read_series(series_a)?;
    let b = read_series(series_b)?;
    tracing::debug!(samples_a = a.len(), samples_b = b.len(), "series_loaded");
    let est = analyse_pair(&a.values, &b.values, block).with_context(|| {
        format!(
            "block averaging {} / {}",
            series_a.display(),
            series_b.display()
        )
    })?;
    if est.used_naive_fallback() {
        tracing::warn!(
            block = block.get(),
            samples_a = a.len(),
            samples_b = b.len(),
            "fewer than two full blocks; using the naive standard error"
        );
    }
    Ok(est)
}

fn topologies() -> Result<()> {
    for t in Topology::presets() {
        let g = t.build_graph();
        println!(
            "{:<6} v={:<3} e={:<3} loops={:<2} {}",
            t.name,
            g.vertex_count(),
            g.edge_count(),
            g.cycle_rank(),
            t.description
        );
    }
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::provenance_doc(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn analyze_then_compare_from_disk() {
        let dir = tempdir().unwrap();
        let theta = analyze_topology("theta", Some(dir.path().join("theta.json")), false, true)
            .unwrap();
        let tree =
            analyze_topology("tree", Some(dir.path().join("tree.json")), false, true).unwrap();
        assert!(dir.path().join("theta.provenance.json").exists());
        let cmp = compare_blobs(&theta, &tree).unwrap();
        assert!((cmp.ratio - 107.0 / 245.0).abs() < 1e-8);
        assert_eq!(cmp.ratio, cmp.subject.g / cmp.reference.g);
    }

    #[test]
    fn compare_rejects_swapped_blobs() {
        let dir = tempdir().unwrap();
        let theta = analyze_topology("theta", Some(dir.path().join("theta.json")), false, true)
            .unwrap();
        let tree =
            analyze_topology("tree", Some(dir.path().join("tree.json")), false, true).unwrap();
        let err = compare_blobs(&tree, &theta).unwrap_err();
        assert!(err.to_string().contains("--theta expects a theta result"));
        let err = compare_blobs(&theta, &theta).unwrap_err();
        assert!(err.to_string().contains("--tree expects a tree result"));
    }

    #[test]
    fn analyze_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("theta.json");
        analyze_topology("theta", Some(out.clone()), false, true).unwrap();
        let err = analyze_topology("theta", Some(out.clone()), false, true).unwrap_err();
        assert!(format!("{err:#}").contains("write-once"));
        analyze_topology("theta", Some(out), true, true).unwrap();
    }

    #[test]
    fn unknown_topology_is_an_error() {
        let err = analyze_topology("mercedes", None, false, true).unwrap_err();
        assert!(err.to_string().contains("unknown topology"));
    }

    #[test]
    fn block_average_from_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("mer.dat");
        let b = dir.path().join("tree.dat");
        let rows = |v: f64| (0..1000).map(|t| format!("{t} {v}\n")).collect::<String>();
        fs::write(&a, rows(3.0)).unwrap();
        fs::write(&b, rows(6.0)).unwrap();
        let est = block_average_files(&a, &b, 100).unwrap();
        assert!((est.ratio - 0.5).abs() < 1e-12);
        assert!(est.ratio_err.abs() < 1e-12);
        assert_eq!(est.series_a.blocks, 10);
    }

    #[test]
    fn block_size_is_checked_before_reading() {
        let err = block_average_files(Path::new("/nonexistent/a"), Path::new("/nonexistent/b"), 0)
            .unwrap_err();
        assert!(err.to_string().contains("block size must be positive"));
    }

    #[test]
    fn missing_series_names_the_path() {
        let dir = tempdir().unwrap();
        let b = dir.path().join("tree.dat");
        fs::write(&b, "0 1\n1 2\n").unwrap();
        let err = block_average_files(&dir.path().join("absent.dat"), &b, 500).unwrap_err();
        assert!(err.to_string().contains("absent.dat"));
    }

    #[test]
    fn cli_parses_block_average_flags() {
        let cmd = Cmd::try_parse_from([
            "cli", "block-average", "--mer", "a.dat", "--tree", "b.dat", "--block", "-3",
        ])
        .unwrap();
        match cmd.action {
            Action::BlockAverage { block, json, .. } => {
                assert_eq!(block, -3);
                assert!(!json);
            }
            _ => panic!("expected block-average"),
        }
        let cmd = Cmd::try_parse_from(["cli", "block-average", "--series-a", "a", "--tree", "b"])
            .unwrap();
        assert!(matches!(cmd.action, Action::BlockAverage { block: 500, .. }));
        assert!(Cmd::try_parse_from(["cli", "block-average", "--tree", "b"]).is_err());
    }
}
