use super::report::AnalysisReport;
use crate::analysis::Analysis;
use std::fmt::Write;

/// Plain-text audit of every stage, in pipeline order.
pub fn format_trace(analysis: &Analysis) -> String {
    let report = analysis.report();
    let mut out = String::new();

    let _ = writeln!(out, "STRUCTURAL ANALYSIS for '{}':", report.name);
    let _ = writeln!(out, "--------------------------------------------------");
    write_list(&mut out, "Known variables", &report.known);
    write_list(&mut out, "Unknown variables", &report.unknown);
    write_list(&mut out, "Constraints", &report.constraints);
    write_list(&mut out, "Reduced constraints", &report.reduced_constraints);

    let _ = writeln!(out, "Matching:");
    for (c, v) in &report.matching {
        let _ = writeln!(out, "  {} -> {}", c, v);
    }
    write_list(&mut out, "Unmatched constraints", &report.unmatched_constraints);
    if !report.unmatched_unknowns.is_empty() {
        write_list(&mut out, "Unknowns not computed", &report.unmatched_unknowns);
    }

    write_relations(&mut out, &report);
    write_list(&mut out, "Detectable constraints", &report.detectable);
    write_list(&mut out, "Isolable constraints", &report.isolable);
    out
}

fn write_relations(out: &mut String, report: &AnalysisReport) {
    let _ = writeln!(out, "Redundancy relations ({}):", report.relations.len());
    for (i, path) in report.relations.iter().enumerate() {
        let _ = writeln!(out, "  [R{}] {}", i + 1, path.join(" -> "));
    }
}

fn write_list(out: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "{}: (none)", label);
    } else {
        let _ = writeln!(out, "{}: {}", label, items.join(", "));
    }
}
