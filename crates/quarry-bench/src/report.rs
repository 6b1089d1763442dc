use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Load a baseline from a JSON file. Returns None if the file doesn't exist.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Compare current results against a baseline. Returns a list of regressions
/// (scene name, percent change) where the threshold is exceeded.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<(String, f64)> {
    let mut regressions = Vec::new();

    for result in current {
        if let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        {
            let pct_change =
                (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
            if pct_change > threshold_pct {
                regressions.push((result.scene_name.clone(), pct_change));
            }
        }
    }

    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str(
        "| Scene | Faces | Blocks | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Shaded px | Sentinel px |\n",
    );
    out.push_str(
        "|-------|-------|--------|-----------|-------------|----------|----------|-----------|-------------|\n",
    );

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {} | {} |\n",
            r.scene_name,
            r.face_count,
            r.solid_blocks,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.tally.shaded(),
            r.tally.sentinel,
        ));
    }

    out
}

/// Format a comparison report showing regressions.
pub fn format_comparison(regressions: &[(String, f64)], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {:.0}% threshold. No regressions detected.\n",
            threshold_pct
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "REGRESSIONS DETECTED (>{:.0}% threshold):\n",
        threshold_pct
    ));
    for (scene, pct) in regressions {
        out.push_str(&format!("  - {}: +{:.1}%\n", scene, pct));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{PixelTally, TimingSeries};

    fn result(name: &str, mean_ms: f64) -> BenchmarkResult {
        BenchmarkResult {
            scene_name: name.to_string(),
            face_count: 6,
            solid_blocks: 1,
            frame_count: 10,
            timings: TimingSeries {
                mean_ms,
                median_ms: mean_ms,
                p95_ms: mean_ms,
                p99_ms: mean_ms,
                min_ms: mean_ms,
                max_ms: mean_ms,
            },
            tally: PixelTally {
                dark: 100,
                mid: 50,
                bright: 25,
                sentinel: 0,
                background: 1000,
                other: 0,
            },
        }
    }

    #[test]
    fn test_compare_flags_regression_over_threshold() {
        let baseline = Baseline {
            timestamp: "t".to_string(),
            results: vec![result("wedge", 10.0)],
        };
        let current = vec![result("wedge", 12.0)];
        let regressions = compare(&current, &baseline, 10.0);
        assert_eq!(regressions.len(), 1);
        assert_eq!(regressions[0].0, "wedge");
        assert!((regressions[0].1 - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_ignores_changes_within_threshold() {
        let baseline = Baseline {
            timestamp: "t".to_string(),
            results: vec![result("wedge", 10.0)],
        };
        let current = vec![result("wedge", 10.5)];
        assert!(compare(&current, &baseline, 10.0).is_empty());
    }

    #[test]
    fn test_compare_skips_unknown_scenes() {
        let baseline = Baseline {
            timestamp: "t".to_string(),
            results: vec![result("wedge", 10.0)],
        };
        let current = vec![result("single-block", 100.0)];
        assert!(compare(&current, &baseline, 10.0).is_empty());
    }

    #[test]
    fn test_markdown_has_row_per_scene() {
        let results = vec![result("a", 1.0), result("b", 2.0)];
        let md = format_markdown(&results);
        assert_eq!(md.lines().count(), 4);
        assert!(md.contains("| a |"));
        assert!(md.contains("| b |"));
        assert!(md.contains("| 175 |"));
    }

    #[test]
    fn test_baseline_roundtrips_through_json() {
        let baseline = Baseline {
            timestamp: "t".to_string(),
            results: vec![result("wedge", 10.0)],
        };
        let json = serde_json::to_string(&baseline).unwrap();
        let back: Baseline = serde_json::from_str(&json).unwrap();
        assert_eq!(back.results.len(), 1);
        assert_eq!(back.results[0].scene_name, "wedge");
        assert_eq!(back.results[0].tally.dark, 100);
    }

    #[test]
    fn test_comparison_formatting() {
        let clean = format_comparison(&[], 10.0);
        assert!(clean.contains("No regressions"));
        let bad = format_comparison(&[("wedge".to_string(), 25.0)], 10.0);
        assert!(bad.contains("REGRESSIONS"));
        assert!(bad.contains("wedge: +25.0%"));
    }
}
