//! In-memory theta-vs-tree comparison without touching the result store.
//!
//! Prints g for both presets and their ratio in one line each; the CLI
//! (`cli analyze` / `cli compare`) is the persisted, verbose path.

use contraction::prelude::*;

fn main() {
    let cfg = SpectralCfg::default();
    let theta = analyze(&Topology::theta(), &cfg).expect("theta analysis");
    let tree = analyze(&Topology::tree(), &cfg).expect("tree analysis");
    for a in [&theta, &tree] {
        println!(
            "topology={} v={} e={} loops={} trace={:.10} g={:.10}",
            a.topology.name,
            a.metrics.vertices,
            a.metrics.edges,
            a.metrics.loops,
            a.trace(),
            a.g()
        );
    }
    let cmp = compare(&theta.to_blob(), &tree.to_blob()).expect("nonzero reference");
    println!(
        "ratio={:.10} approx={}",
        cmp.ratio,
        cmp.ratio_rational
            .map(|r| r.to_string())
            .unwrap_or_default()
    );
}
