//! Plain-text and CSV rendering
//!
//! Every function here returns the rendered document as a `String`; the
//! caller decides where it goes.

use crate::config::baselines::MetricSource;
use crate::config::profiles::WorkloadProfile;
use crate::models::{
    DiskRawResults, Domain, IoPattern, MetricScore, MetricStatistics, NormalizedResults, Outcome, RawResults,
    Recommendation, RunSetOutcome, SystemRecord,
};
use crate::performance::{best_performance, best_value, ComparisonSummary, ScoreBand, WorkloadMatrixEntry};
use chrono::Local;
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 80;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Quote a CSV field when it contains a separator, quote or newline.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    let mut row = fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(",");
    row.push('\n');
    row
}

fn fmt2(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Thousands-separated currency amount (`1,234.50`).
fn fmt_money(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Five-tier rating of a single system's overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceRating {
    NeedsImprovement,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl PerformanceRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceRating::Excellent
        } else if score >= 75.0 {
            PerformanceRating::VeryGood
        } else if score >= 60.0 {
            PerformanceRating::Good
        } else if score >= 40.0 {
            PerformanceRating::Fair
        } else {
            PerformanceRating::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "Excellent",
            PerformanceRating::VeryGood => "Very Good",
            PerformanceRating::Good => "Good",
            PerformanceRating::Fair => "Fair",
            PerformanceRating::NeedsImprovement => "Needs Improvement",
        }
    }

    /// 1 (needs improvement) to 5 (excellent)
    pub fn stars(&self) -> usize {
        *self as usize + 1
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), "*".repeat(self.stars()))
    }
}

/// Headline metric of a cpu/memory/network section: title, quantity, unit.
fn scalar_section_labels(source: MetricSource) -> (&'static str, &'static str, &'static str) {
    match source {
        MetricSource::Cpu => ("CPU BENCHMARK RESULTS", "Events per Second", ""),
        MetricSource::Memory => ("MEMORY BENCHMARK RESULTS", "Transfer Rate", " MiB/sec"),
        _ => ("NETWORK BENCHMARK RESULTS", "Bandwidth", " Mbps"),
    }
}

fn primary_statistics(source: MetricSource, run_set: &RunSetOutcome) -> Result<MetricStatistics, &str> {
    match run_set {
        Outcome::Success(summary) => Ok(summary
            .statistic(source.primary_metric())
            .copied()
            .unwrap_or_default()),
        Outcome::Failure(reason) => Err(reason.as_str()),
    }
}

fn write_scalar_section(
    out: &mut String,
    source: MetricSource,
    run_set: &RunSetOutcome,
    score: Option<&MetricScore>,
) {
    let (title, quantity, unit) = scalar_section_labels(source);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", light_rule());

    match primary_statistics(source, run_set) {
        Ok(stats) => {
            let _ = writeln!(out, "{}: {:.2}{}", quantity, stats.mean, unit);
            let _ = writeln!(out, "Standard Deviation: {:.2}", stats.stdev);
            let _ = writeln!(out, "Variance: {:.2}%", stats.variance_percent);
            let _ = writeln!(
                out,
                "Normalized Score: {:.2}/100",
                score.map(|s| s.score).unwrap_or(0.0)
            );
        }
        Err(reason) => {
            let _ = writeln!(out, "Error: {}", reason);
        }
    }
    let _ = writeln!(out);
}

fn write_disk_section(out: &mut String, disk: &Outcome<DiskRawResults>, normalized: &NormalizedResults) {
    let _ = writeln!(out, "DISK I/O BENCHMARK RESULTS");
    let _ = writeln!(out, "{}", light_rule());

    let patterns = match disk {
        Outcome::Success(patterns) => patterns,
        Outcome::Failure(reason) => {
            let _ = writeln!(out, "Error: {}", reason);
            let _ = writeln!(out);
            return;
        }
    };

    for pattern in IoPattern::ALL {
        let Some(run_set) = patterns.get(&pattern) else {
            continue;
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({}):", pattern.as_str().to_uppercase(), pattern.label());

        let source = MetricSource::DiskPattern(pattern);
        match primary_statistics(source, run_set) {
            Ok(stats) => {
                if pattern.is_random() {
                    let _ = writeln!(out, "  IOPS: {:.2}", stats.mean);
                } else {
                    let _ = writeln!(out, "  Bandwidth: {:.2} KB/s", stats.mean);
                }
                let _ = writeln!(out, "  Variance: {:.2}%", stats.variance_percent);
                let _ = writeln!(
                    out,
                    "  Normalized Score: {:.2}/100",
                    normalized.disk_pattern(pattern).map(|s| s.score).unwrap_or(0.0)
                );
            }
            Err(reason) => {
                let _ = writeln!(out, "  Error: {}", reason);
            }
        }
    }

    let _ = writeln!(out);
    match (normalized.domain_score(Domain::Disk), normalized.domain_error(Domain::Disk)) {
        (Some(average), _) => {
            let _ = writeln!(out, "Average Disk Score: {:.2}/100", average);
        }
        (None, Some(reason)) => {
            let _ = writeln!(out, "Average Disk Score: n/a ({})", reason);
        }
        (None, None) => {
            let _ = writeln!(out, "Average Disk Score: n/a");
        }
    }
    let _ = writeln!(out);
}

/// Per-system benchmark report: overall score and rating, then one section
/// per domain that was run.
pub fn render_benchmark_report(raw: &RawResults, normalized: &NormalizedResults) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(out, "HARDWARE BENCHMARK REPORT");
    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    let _ = writeln!(out, "OVERALL PERFORMANCE SCORE");
    let _ = writeln!(out, "{}", light_rule());
    let _ = writeln!(out, "Score: {:.2}/100", normalized.overall_score);
    let _ = writeln!(out, "Rating: {}", PerformanceRating::from_score(normalized.overall_score));
    let _ = writeln!(out);

    if let Some(cpu) = &raw.cpu {
        write_scalar_section(&mut out, MetricSource::Cpu, cpu, normalized.metric_score(Domain::Cpu));
    }
    if let Some(memory) = &raw.memory {
        write_scalar_section(
            &mut out,
            MetricSource::Memory,
            memory,
            normalized.metric_score(Domain::Memory),
        );
    }
    if let Some(disk) = &raw.disk {
        write_disk_section(&mut out, disk, normalized);
    }
    if let Some(network) = &raw.network {
        write_scalar_section(
            &mut out,
            MetricSource::Network,
            network,
            normalized.metric_score(Domain::Network),
        );
    }

    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(out, "End of Report");
    let _ = writeln!(out, "{}", heavy_rule());
    out
}

/// Capacity planning report for one workload.
///
/// `recommendations` are expected in ranked order.
pub fn render_capacity_plan(profile: &WorkloadProfile, recommendations: &[Recommendation]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(out, "CAPACITY PLANNING REPORT - {}", profile.name.to_uppercase());
    let _ = writeln!(out, "{}", heavy_rule());
    if !profile.description.is_empty() {
        let _ = writeln!(out, "{}", profile.description);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "WORKLOAD PROFILE");
    let _ = writeln!(out, "{}", light_rule());
    for (domain, weight) in profile.weights.iter() {
        let _ = writeln!(out, "{} Weight: {:.0}%", domain.label(), weight * 100.0);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "MINIMUM REQUIREMENTS");
    let _ = writeln!(out, "{}", light_rule());
    for (domain, min) in profile.min_scores.iter() {
        let _ = writeln!(out, "{}: {}/100", domain.as_str().to_uppercase(), min);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "SYSTEM RECOMMENDATIONS (Ranked)");
    let _ = writeln!(out, "{}", light_rule());
    for (i, rec) in recommendations.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", i + 1, rec.system_name);
        let _ = writeln!(out, "   Workload Score: {:.2}/100", rec.workload_score);
        let _ = writeln!(
            out,
            "   Meets Requirements: {}",
            if rec.meets_requirements { "YES" } else { "NO" }
        );
        if let Some(cost) = rec.cost {
            let _ = writeln!(out, "   Cost: ${}", fmt_money(cost));
        }
        if let Some(ratio) = rec.cost_performance_ratio {
            let _ = writeln!(out, "   Cost/Performance: ${:.2} per point", ratio);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(out, "RECOMMENDATION SUMMARY");
    let _ = writeln!(out, "{}", heavy_rule());

    match best_performance(recommendations) {
        Some(best) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Best Performance: {}", best.system_name);
            let _ = writeln!(out, "   Score: {:.2}/100", best.workload_score);
        }
        None => {
            let _ = writeln!(out);
            let _ = writeln!(out, "No systems loaded.");
        }
    }

    match best_value(recommendations) {
        Some(value) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Best Value: {}", value.system_name);
            let _ = writeln!(out, "   Score: {:.2}/100", value.workload_score);
            if let Some(ratio) = value.cost_performance_ratio {
                let _ = writeln!(out, "   Cost/Performance: ${:.2} per point", ratio);
            }
        }
        None if !recommendations.is_empty() => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Best Value: no cost data available");
        }
        None => {}
    }

    let failed: Vec<&Recommendation> = recommendations
        .iter()
        .filter(|r| !r.meets_requirements)
        .collect();
    if !failed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Systems NOT Meeting Requirements: {}", failed.len());
        for rec in failed {
            let _ = writeln!(out, "   - {}", rec.system_name);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heavy_rule());
    out
}

/// Systems × workloads score matrix.
///
/// Columns follow the first appearance of each workload, rows the first
/// appearance of each system.
pub fn render_workload_matrix_csv(matrix: &[WorkloadMatrixEntry]) -> String {
    let mut workloads: Vec<&str> = Vec::new();
    let mut systems: Vec<&str> = Vec::new();
    for entry in matrix {
        if !workloads.contains(&entry.workload.as_str()) {
            workloads.push(&entry.workload);
        }
        if !systems.contains(&entry.system.as_str()) {
            systems.push(&entry.system);
        }
    }

    let mut header = vec!["System".to_string()];
    header.extend(workloads.iter().map(|w| w.to_string()));
    let mut out = csv_row(&header);

    for system in &systems {
        let mut row = vec![system.to_string()];
        for workload in &workloads {
            let score = matrix
                .iter()
                .find(|e| e.system == *system && e.workload == *workload)
                .map(|e| e.score);
            row.push(fmt2(score));
        }
        out.push_str(&csv_row(&row));
    }
    out
}

/// One row per (workload, system) pair.
pub fn render_workload_detail_csv(matrix: &[WorkloadMatrixEntry]) -> String {
    let header = ["Workload", "System", "Score", "Meets_Requirements", "Cost"].map(String::from);
    let mut out = csv_row(&header);
    for entry in matrix {
        out.push_str(&csv_row(&[
            entry.workload.clone(),
            entry.system.clone(),
            format!("{:.2}", entry.score),
            if entry.meets_requirements { "True" } else { "False" }.to_string(),
            fmt2(entry.cost),
        ]));
    }
    out
}

const COMPARISON_COLUMNS: [&str; 13] = [
    "System",
    "Overall Score",
    "CPU Score",
    "CPU Events/sec",
    "CPU Variance %",
    "Memory Score",
    "Memory MiB/sec",
    "Memory Variance %",
    "Disk Score",
    "Rand Read IOPS",
    "Rand Write IOPS",
    "Network Score",
    "Network Mbps",
];

/// Comparison cells for one system; failed or absent values are empty.
fn comparison_row(system: &SystemRecord) -> Vec<String> {
    let results = &system.normalized;
    let cpu = results.metric_score(Domain::Cpu);
    let memory = results.metric_score(Domain::Memory);
    let network = results.metric_score(Domain::Network);

    vec![
        system.name.clone(),
        fmt2(Some(results.overall_score)),
        fmt2(cpu.map(|m| m.score)),
        fmt2(cpu.map(|m| m.raw_value)),
        fmt2(cpu.map(|m| m.variance_percent)),
        fmt2(memory.map(|m| m.score)),
        fmt2(memory.map(|m| m.raw_value)),
        fmt2(memory.map(|m| m.variance_percent)),
        fmt2(results.domain_score(Domain::Disk)),
        fmt2(results.disk_pattern(IoPattern::RandRead).map(|m| m.raw_value)),
        fmt2(results.disk_pattern(IoPattern::RandWrite).map(|m| m.raw_value)),
        fmt2(network.map(|m| m.score)),
        fmt2(network.map(|m| m.raw_value)),
    ]
}

pub fn render_comparison_csv(systems: &[SystemRecord]) -> String {
    let mut out = csv_row(&COMPARISON_COLUMNS.map(String::from));
    for system in systems {
        out.push_str(&csv_row(&comparison_row(system)));
    }
    out
}

/// Fixed-width comparison table followed by winners and stability notes.
pub fn render_comparison_text(systems: &[SystemRecord]) -> String {
    let rows: Vec<Vec<String>> = systems.iter().map(comparison_row).collect();
    let widths: Vec<usize> = COMPARISON_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, title)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(title.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "HARDWARE PERFORMANCE COMPARISON");
    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(out);

    let header: Vec<String> = COMPARISON_COLUMNS
        .iter()
        .zip(&widths)
        .map(|(title, w)| format!("{:>w$}", title, w = *w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = *w))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  "));
    }

    let summary = ComparisonSummary::from_systems(systems);
    let _ = writeln!(out);
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", light_rule());
    if let Some(best) = &summary.best_overall {
        let _ = writeln!(
            out,
            "Best Overall: {} ({:.2}/100, {})",
            best.system,
            best.overall_score,
            ScoreBand::from_score(best.overall_score)
        );
    }
    for winner in &summary.domain_winners {
        let _ = writeln!(
            out,
            "{} Winner: {} ({:.2}/100)",
            winner.domain.label(),
            winner.system,
            winner.score
        );
    }
    let _ = writeln!(
        out,
        "Average Variance (all systems): {:.2}%",
        summary.fleet_average_variance_percent
    );
    for variance in &summary.variance {
        match variance.average_variance_percent {
            Some(v) => {
                let _ = writeln!(out, "{} Avg Variance: {:.2}%", variance.system, v);
            }
            None => {
                let _ = writeln!(out, "{} Avg Variance: n/a", variance.system);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::profiles::get_profile;
    use crate::models::{DiskScore, RunMetrics};
    use crate::performance::{aggregate_domain, rank, Normalizer};

    fn metric(score: f64, raw: f64) -> Option<Outcome<MetricScore>> {
        Some(Outcome::Success(MetricScore {
            score,
            raw_value: raw,
            metric_name: "m".to_string(),
            variance_percent: 1.5,
        }))
    }

    fn system(name: &str, score: f64, cost: Option<f64>) -> SystemRecord {
        let mut disk = DiskScore {
            average_score: score,
            ..Default::default()
        };
        disk.patterns.insert(IoPattern::RandRead, metric(score, 50_000.0).unwrap());
        SystemRecord::new(
            name,
            NormalizedResults {
                cpu: metric(score, 5500.0),
                memory: metric(score, 20_000.0),
                disk: Some(Outcome::Success(disk)),
                network: Some(Outcome::failure("iperf3 not found")),
                overall_score: score,
            },
            cost,
        )
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_fmt_money() {
        assert_eq!(fmt_money(1234.5), "1,234.50");
        assert_eq!(fmt_money(999.0), "999.00");
        assert_eq!(fmt_money(1_000_000.0), "1,000,000.00");
    }

    #[test]
    fn test_capacity_plan_sections() {
        let profile = get_profile("web_server").unwrap();
        let systems = vec![system("alpha", 80.0, Some(2000.0)), system("beta", 40.0, Some(500.0))];
        let ranked = rank(&systems, &profile);
        let report = render_capacity_plan(&profile, &ranked);

        assert!(report.contains("CAPACITY PLANNING REPORT - WEB_SERVER"));
        assert!(report.contains("CPU Weight: 35%"));
        assert!(report.contains("1. alpha"));
        assert!(report.contains("Cost: $2,000.00"));
        assert!(report.contains("Best Performance: alpha"));
        assert!(report.contains("Best Value: beta"));
        assert!(report.contains("Systems NOT Meeting Requirements: 2"));
    }

    #[test]
    fn test_capacity_plan_without_costs() {
        let profile = get_profile("database").unwrap();
        let ranked = rank(&[system("alpha", 80.0, None)], &profile);
        let report = render_capacity_plan(&profile, &ranked);
        assert!(report.contains("no cost data available"));
        assert!(!report.contains("Cost/Performance"));
    }

    #[test]
    fn test_matrix_csv_pivot() {
        let matrix = vec![
            WorkloadMatrixEntry {
                workload: "database".to_string(),
                system: "alpha".to_string(),
                score: 71.457,
                meets_requirements: false,
                cost: None,
            },
            WorkloadMatrixEntry {
                workload: "file_server".to_string(),
                system: "alpha".to_string(),
                score: 60.0,
                meets_requirements: true,
                cost: None,
            },
        ];
        let csv = render_workload_matrix_csv(&matrix);
        assert_eq!(csv, "System,database,file_server\nalpha,71.46,60.00\n");

        let detail = render_workload_detail_csv(&matrix);
        assert!(detail.starts_with("Workload,System,Score,Meets_Requirements,Cost\n"));
        assert!(detail.contains("database,alpha,71.46,False,\n"));
    }

    #[test]
    fn test_comparison_outputs() {
        let systems = vec![system("alpha", 80.0, None), system("beta", 60.0, None)];
        let csv = render_comparison_csv(&systems);
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("System,Overall Score,CPU Score"));
        assert_eq!(
            lines.next().unwrap(),
            "alpha,80.00,80.00,5500.00,1.50,80.00,20000.00,1.50,80.00,50000.00,,,"
        );

        let text = render_comparison_text(&systems);
        assert!(text.contains("Best Overall: alpha (80.00/100, Good)"));
        assert!(text.contains("CPU Winner: alpha"));
        assert!(!text.contains("Network Winner"));
        assert!(text.contains("beta Avg Variance: 1.50%"));
        assert!(text.contains("Average Variance (all systems): 1.50%"));
    }

    #[test]
    fn test_performance_rating_tiers() {
        assert_eq!(PerformanceRating::from_score(90.0), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::from_score(89.99), PerformanceRating::VeryGood);
        assert_eq!(PerformanceRating::from_score(60.0), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_score(40.0), PerformanceRating::Fair);
        assert_eq!(PerformanceRating::from_score(39.99), PerformanceRating::NeedsImprovement);
        assert_eq!(PerformanceRating::VeryGood.to_string(), "Very Good (****)");
        assert_eq!(PerformanceRating::NeedsImprovement.stars(), 1);
    }

    fn run(metric: &str, value: f64) -> crate::models::RunRecord {
        Outcome::Success(RunMetrics::new().with(metric, value))
    }

    #[test]
    fn test_benchmark_report_sections() {
        let mut disk = DiskRawResults::new();
        disk.insert(
            IoPattern::RandRead,
            aggregate_domain(Domain::Disk, &[run("iops", 80_020.0)]),
        );
        disk.insert(IoPattern::RandWrite, Outcome::failure("fio: permission denied"));
        disk.insert(
            IoPattern::Read,
            aggregate_domain(Domain::Disk, &[run("bandwidth_kb", 3_004_000.0)]),
        );
        let raw = RawResults {
            cpu: Some(aggregate_domain(
                Domain::Cpu,
                &[run("events_per_second", 5400.0), run("events_per_second", 5600.0)],
            )),
            memory: Some(Outcome::failure("sysbench: command not found")),
            disk: Some(Outcome::Success(disk)),
            network: None,
        };
        let normalized = Normalizer::new().normalize(&raw);
        let report = render_benchmark_report(&raw, &normalized);

        assert!(report.contains("HARDWARE BENCHMARK REPORT"));
        assert!(report.contains(&format!("Score: {:.2}/100", normalized.overall_score)));
        // (0.3*54.55 + 0.3*70) / 0.6, memory drops out
        assert!(report.contains("Rating: Good (***)"));

        assert!(report.contains("CPU BENCHMARK RESULTS"));
        assert!(report.contains("Events per Second: 5500.00"));
        assert!(report.contains("Standard Deviation: 141.42"));
        assert!(report.contains("Normalized Score: 54.55/100"));

        assert!(report.contains("MEMORY BENCHMARK RESULTS\n"));
        assert!(report.contains("Error: sysbench: command not found"));

        assert!(report.contains("RANDREAD (Random Read):\n  IOPS: 80020.00"));
        assert!(report.contains("RANDWRITE (Random Write):\n  Error: fio: permission denied"));
        assert!(report.contains("  Bandwidth: 3004000.00 KB/s"));
        assert!(!report.contains("WRITE (Sequential Write)"));
        assert!(report.contains("Average Disk Score: 70.00/100"));

        assert!(!report.contains("NETWORK BENCHMARK RESULTS"));
        assert!(report.trim_end().ends_with(&heavy_rule()));
    }

    #[test]
    fn test_benchmark_report_failed_disk_domain() {
        let mut disk = DiskRawResults::new();
        disk.insert(IoPattern::Write, Outcome::failure("Benchmark timed out"));
        let raw = RawResults {
            disk: Some(Outcome::Success(disk)),
            ..Default::default()
        };
        let normalized = Normalizer::new().normalize(&raw);
        let report = render_benchmark_report(&raw, &normalized);
        assert!(report.contains("Rating: Needs Improvement (*)"));
        assert!(report.contains("Average Disk Score: n/a (Benchmark timed out)"));
    }
}
