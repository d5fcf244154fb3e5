use colored::*;

use evaluator::report::MetricsReport;

const STATUS_COLUMN: usize = 48;

fn line(label: &str, value: impl std::fmt::Display) -> String {
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.chars().count()));
    format!("{} {} {}\n", label.bold(), dots.dimmed(), value)
}

fn score(value: f64, precision: usize) -> ColoredString {
    let text = format!("{value:.precision$}");
    if value >= 0.5 {
        text.green()
    } else if value >= 0.0 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Renders the end-of-run summary shown by `bench-report report`.
pub fn render_summary(report: &MetricsReport, precision: usize) -> String {
    let summary = &report.summary;
    let overall = &report.analysis.overall;
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Benchmark report".bold().underline()));
    out.push_str(&line("Files discovered", summary.files_discovered));
    out.push_str(&line("Files parsed", summary.files_parsed.to_string().green()));
    let skipped = summary.files_skipped.len().to_string();
    out.push_str(&line(
        "Files skipped",
        if summary.files_skipped.is_empty() { skipped.normal() } else { skipped.red() },
    ));
    if !summary.timed_out.is_empty() {
        out.push_str(&line("Timed out logs", summary.timed_out.len().to_string().yellow()));
    }
    out.push_str(&line(
        "Test cases",
        format!("{} ({} ok, {} failed)", summary.test_cases, summary.successful, summary.failed),
    ));
    out.push_str(&line("Normalized score", score(overall.normalized_score, precision)));
    out.push_str(&line("Correct", format!("{:.1}%", overall.correct_pct)));
    out.push_str(&line("Missing", format!("{:.1}%", overall.missing_pct)));
    out.push_str(&line("Unexpected", format!("{:.1}%", overall.unexpected_pct)));
    out.push_str(&line(
        "Avg extraction time",
        format!("{:.2}s", report.timing.overall.avg),
    ));

    for axis in &report.axis_order {
        let Some(perf) = report.analysis.axes.get(axis) else {
            continue;
        };
        out.push_str(&line(
            axis,
            format!(
                "best {} {}, worst {} {}, gap {:.precision$}",
                perf.best.key.cyan(),
                score(perf.best.score, precision),
                perf.worst.key.cyan(),
                score(perf.worst.score, precision),
                perf.gap
            ),
        ));
    }

    for skipped in &summary.files_skipped {
        out.push_str(&format!("  {} {} ({})\n", "skipped".red(), skipped.path, skipped.reason.dimmed()));
    }
    for path in &summary.timed_out {
        out.push_str(&format!("  {} {}\n", "timeout".yellow(), path));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use evaluator::evaluation::Evaluation;
    use evaluator::reconcile::ReconciledCounts;
    use std::path::Path;
    use util::report_config::GroupingAxis;

    #[test]
    fn summary_lists_totals_and_axes() {
        colored::control::set_override(false);

        let mut eval = Evaluation::new(&[GroupingAxis::Method]);
        let counts = ReconciledCounts { expected: 2, correct: 2, ..Default::default() };
        eval.aggregator.ensure(GroupingAxis::Method, "json").add(&counts, 0, 1.5);
        eval.summary.files_discovered = 2;
        eval.summary.files_parsed = 1;
        eval.summary.record_skip("bad.json", "invalid JSON: EOF");
        eval.summary.record_timeout("format_experiment_json_en.log");

        let report = MetricsReport::build(&eval, Path::new("logs"));
        let text = render_summary(&report, 2);

        assert!(text.contains("Files discovered"));
        assert!(text.contains("by_method"));
        assert!(text.contains("best json 1.00"));
        assert!(text.contains("skipped bad.json (invalid JSON: EOF)"));
        assert!(text.contains("Timed out logs"));
        assert!(text.contains("timeout format_experiment_json_en.log"));
    }
}
