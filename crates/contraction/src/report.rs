//! Human-readable console reports (presentation only, not a machine contract).

use std::fmt::Write;

use nalgebra::DMatrix;

use crate::blockavg::RatioEstimate;
use crate::compare::Comparison;
use crate::factor::Analysis;
use crate::rational::Rational;

const RULE_WIDTH: usize = 90;

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}\n{title}\n{rule}");
}

fn step(out: &mut String, n: usize, title: &str) {
    let _ = writeln!(out, "\nSTEP {n}: {title}\n{}", "-".repeat(RULE_WIDTH));
}

fn frac(r: Option<Rational>) -> String {
    r.map(|r| r.to_string()).unwrap_or_else(|| "n/a".to_string())
}

/// Integer-valued matrix, numpy-style rows.
fn int_matrix(m: &DMatrix<f64>) -> String {
    let width = m.iter().map(|x| format!("{}", x.round() as i64).len()).max().unwrap_or(1);
    let rows: Vec<String> = m
        .row_iter()
        .map(|r| {
            let cells: Vec<String> = r
                .iter()
                .map(|x| format!("{:>width$}", x.round() as i64))
                .collect();
            format!("[{}]", cells.join(" "))
        })
        .collect();
    format!("[{}]", rows.join("\n "))
}

/// Real matrix rounded to `digits` decimals.
fn real_matrix(m: &DMatrix<f64>, digits: usize) -> String {
    let rows: Vec<String> = m
        .row_iter()
        .map(|r| {
            let cells: Vec<String> = r
                .iter()
                .map(|x| {
                    // Avoid printing "-0.0000".
                    let x = if x.abs() < 0.5 * 10f64.powi(-(digits as i32)) { 0.0 } else { *x };
                    format!("{:>width$.digits$}", x, width = digits + 4)
                })
                .collect();
            format!("[{}]", cells.join(" "))
        })
        .collect();
    format!("[{}]", rows.join("\n "))
}

/// Step-by-step report of one topology analysis.
pub fn render_analysis(a: &Analysis) -> String {
    let mut out = String::new();
    let name = &a.topology.name;
    banner(
        &mut out,
        &format!("{} GRAPH ANALYSIS\n{}", name.to_uppercase(), a.topology.description),
    );

    step(&mut out, 1, &format!("Build the {name} graph"));
    let m = a.metrics;
    let _ = writeln!(out, "Vertices (v): {}", m.vertices);
    let _ = writeln!(out, "Edges (e): {}", m.edges);
    let _ = writeln!(out, "Loops (cycle rank): {}", m.loops);
    let _ = writeln!(out, "\nEdge list:");
    for (label, edges) in &a.topology.edge_groups {
        let es: Vec<String> = edges.iter().map(|(i, j)| format!("({i}, {j})")).collect();
        let _ = writeln!(out, "  {label}: [{}]", es.join(", "));
    }
    let degs: Vec<String> = a
        .graph
        .degree_sequence()
        .iter()
        .map(|(v, d)| format!("{v}: {d}"))
        .collect();
    let _ = writeln!(out, "\nDegree sequence: {{{}}}", degs.join(", "));

    step(&mut out, 2, "Adjacency matrix (A)");
    let _ = writeln!(out, "{}", int_matrix(&a.matrices.adjacency));
    step(&mut out, 3, "Degree matrix (D)");
    let _ = writeln!(out, "{}", int_matrix(&a.matrices.degree));
    step(&mut out, 4, "Laplacian matrix (L = D - A)");
    let _ = writeln!(out, "{}", int_matrix(&a.matrices.laplacian));
    step(&mut out, 5, "Normalized Laplacian matrix");
    let _ = writeln!(out, "{}", real_matrix(&a.matrices.normalized, 4));
    let _ = writeln!(out, "\nDefinition: L̄_ij = 1 if i=j");
    let _ = writeln!(out, "                  = -1/√(d_i × d_j) if i and j are adjacent");
    let _ = writeln!(out, "                  = 0 otherwise");

    step(&mut out, 6, "Eigenvalues of the normalized Laplacian");
    let _ = writeln!(out, "Eigenvalues (sorted):");
    for (i, l) in a.spectrum.eigenvalues.iter().enumerate() {
        let _ = writeln!(out, "  λ_{i} = {l:.10}");
    }

    step(&mut out, 7, "Moore-Penrose pseudoinverse and trace");
    let s = &a.spectrum;
    let _ = writeln!(out, "Trace of L̄† (direct): {:.10}", s.trace);
    let _ = writeln!(out, "\nVerification using eigenvalues:");
    let _ = writeln!(out, "Number of nonzero eigenvalues: {}", s.nonzero_count);
    let _ = writeln!(out, "Sum of 1/λ_i (nonzero): {:.10}", s.trace_from_eigenvalues);
    let _ = writeln!(out, "Deviation: {:.3e}", s.trace_deviation());
    let _ = writeln!(
        out,
        "\nTrace as fraction: {} = {}",
        frac(a.trace_rational),
        a.trace_rational
            .map(|r| r.to_f64().to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );

    step(&mut out, 8, "Contraction factor");
    let t = a.terms;
    let _ = writeln!(out, "g(G∞) = 3 × [Tr(L̄†) + (1/3)×Loops(G) - 1/6] / e²");
    let _ = writeln!(out, "\n  Tr(L̄†) = {:.6}", s.trace);
    let _ = writeln!(out, "  Loops = {}", m.loops);
    let _ = writeln!(out, "  e = {}", m.edges);
    let _ = writeln!(
        out,
        "\n  Numerator = 3 × ({:.6} + {}/3 - 1/6)",
        s.trace, m.loops
    );
    let _ = writeln!(
        out,
        "            = 3 × ({:.6} + {:.6} - 0.166667)",
        s.trace,
        m.loops as f64 / 3.0
    );
    let _ = writeln!(
        out,
        "            = 3 × {:.6}",
        s.trace + m.loops as f64 / 3.0 - 1.0 / 6.0
    );
    let _ = writeln!(out, "            = {:.6}", t.numerator);
    let _ = writeln!(
        out,
        "\n  Denominator = e² = {}² = {}",
        m.edges, t.denominator
    );
    let _ = writeln!(out, "\n  g(∞-{name}) = {:.6} / {}", t.numerator, t.denominator);
    let _ = writeln!(out, "             = {:.10}", t.g);
    let _ = writeln!(out, "             ≈ {}", frac(a.g_rational));

    out.push('\n');
    banner(&mut out, &format!("SUMMARY: {}", name.to_uppercase()));
    let _ = writeln!(out, "Topology: {}", a.topology.description);
    let _ = writeln!(out, "Vertices: {}", m.vertices);
    let _ = writeln!(out, "Edges: {}", m.edges);
    let _ = writeln!(out, "Loops: {}", m.loops);
    let _ = writeln!(out, "Trace(L̄†): {:.6}", s.trace);
    let _ = writeln!(out, "g(∞-{name}): {:.10} ≈ {}", t.g, frac(a.g_rational));
    out
}

/// Side-by-side table and ratio.
pub fn render_comparison(c: &Comparison) -> String {
    let mut out = String::new();
    let (s, r) = (&c.subject, &c.reference);
    banner(
        &mut out,
        &format!(
            "RELATIVE CONTRACTION FACTOR ANALYSIS\n{} vs. {}",
            s.topology, r.topology
        ),
    );
    for blob in [s, r] {
        let _ = writeln!(out, "\n{}:", blob.topology);
        let _ = writeln!(out, "  g(∞-{}) = {:.10}", blob.topology, blob.g);
        let _ = writeln!(out, "  Trace = {:.6}", blob.trace);
        let _ = writeln!(out, "  v={}, e={}, loops={}", blob.v, blob.e, blob.loops);
    }
    let ratio_frac = frac(c.ratio_rational);
    let _ = writeln!(out, "\nRelative contraction factor:");
    let _ = writeln!(
        out,
        "  g({})/g({}) = {:.10} / {:.10}",
        s.topology, r.topology, s.g, r.g
    );
    let _ = writeln!(out, "               = {:.10}", c.ratio);
    let _ = writeln!(out, "               ≈ {ratio_frac}");

    let line = |l: &str, m: &str, rt: &str| {
        format!("│ {:<19} │ {:<16} │ {:<16} │\n", l, m, rt)
    };
    out.push_str("\n┌─────────────────────┬──────────────────┬──────────────────┐\n");
    out.push_str(&line("Parameter", &s.topology, &r.topology));
    out.push_str("├─────────────────────┼──────────────────┼──────────────────┤\n");
    out.push_str(&line("Vertices", &s.v.to_string(), &r.v.to_string()));
    out.push_str(&line("Edges", &s.e.to_string(), &r.e.to_string()));
    out.push_str(&line("Loops", &s.loops.to_string(), &r.loops.to_string()));
    out.push_str(&line(
        "Tr(L̄†)",
        &format!("{:.6}", s.trace),
        &format!("{:.6}", r.trace),
    ));
    out.push_str(&line(
        "g(G∞)",
        &format!("{:.10}", s.g),
        &format!("{:.10}", r.g),
    ));
    out.push_str("└─────────────────────┴──────────────────┴──────────────────┘\n");
    let _ = writeln!(out, "\nFINAL RATIO: {:.6} ≈ {ratio_frac}", c.ratio);
    let _ = writeln!(
        out,
        "\nThe {} polymer is approximately {:.2}% as compact as the {} reference polymer\nin the infinite subdivision limit.",
        s.topology,
        c.percent(),
        r.topology
    );
    out
}

/// Three-line block-average summary.
pub fn render_block_average(r: &RatioEstimate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<Rg^2>_series_a = {:.6} ± {:.6}",
        r.series_a.mean, r.series_a.sem
    );
    let _ = writeln!(
        out,
        "<Rg^2>_series_b = {:.6} ± {:.6}",
        r.series_b.mean, r.series_b.sem
    );
    let _ = write!(out, "g = {:.6} ± {:.6}", r.ratio, r.ratio_err);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockavg::{analyse_pair, BlockSize};
    use crate::compare::compare;
    use crate::factor::analyze;
    use crate::graph::Topology;
    use crate::SpectralCfg;

    #[test]
    fn analysis_report_lists_every_stage() {
        let a = analyze(&Topology::theta(), &SpectralCfg::default()).unwrap();
        let text = render_analysis(&a);
        for needle in [
            "THETA GRAPH ANALYSIS",
            "ring: [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]",
            "branches: [(6, 1), (6, 3), (6, 5)]",
            "Degree sequence: {0: 2, 1: 3,",
            "[0 1 0 0 0 1 0]",
            "λ_0 =",
            "Trace as fraction: 63/10",
            "Denominator = e² = 9² = 81",
            "≈ 107/405",
        ] {
            assert!(text.contains(needle), "missing {needle:?} in\n{text}");
        }
        assert!(!text.contains("-0.0000"));
    }

    #[test]
    fn comparison_report_has_table_and_conclusion() {
        let cfg = SpectralCfg::default();
        let theta = analyze(&Topology::theta(), &cfg).unwrap().to_blob();
        let tree = analyze(&Topology::tree(), &cfg).unwrap().to_blob();
        let text = render_comparison(&compare(&theta, &tree).unwrap());
        assert!(text.contains("FINAL RATIO: 0.436735 ≈ 107/245"));
        assert!(text.contains("│ Loops               │ 3                │ 0                │"));
        assert!(text.contains("approximately 43.67% as compact"));
    }

    #[test]
    fn block_report_is_three_lines() {
        let r = analyse_pair(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0], BlockSize::new(500).unwrap())
            .unwrap();
        let text = render_block_average(&r);
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("<Rg^2>_series_a = 2.000000 ± 0.577350"));
        assert!(text.ends_with("g = 1.000000 ± 0.288675"));
        assert!(r.used_naive_fallback());
    }
}
