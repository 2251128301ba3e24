//! Score statistics and a text histogram.

use std::collections::HashMap;
use std::fmt::Write;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub n: usize,
    pub mean: f64,
    pub median: i32,
    pub std_dev: f64,
    pub min: i32,
    pub max: i32,
}

/// `None` for an empty slice.
pub fn summarize_scores(scores: &[i32]) -> Option<ScoreSummary> {
    if scores.is_empty() {
        return None;
    }
    // Single pass for min/max/mean/std + a frequency table for exact median.
    let mut min = i32::MAX;
    let mut max = i32::MIN;
    let mut sum = 0f64;
    let mut sum_sq = 0f64;

    for &s in scores {
        min = min.min(s);
        max = max.max(s);
        let sf = s as f64;
        sum += sf;
        sum_sq += sf * sf;
    }

    let n = scores.len() as f64;
    let mean = sum / n;
    let var = (sum_sq / n) - mean * mean;
    let std_dev = var.max(0.0).sqrt();

    let range = (max - min) as usize + 1;
    let mut freq = vec![0usize; range];
    for &s in scores {
        freq[(s - min) as usize] += 1;
    }
    let target = scores.len() / 2;
    let mut cum = 0usize;
    let mut median = min;
    for (i, &c) in freq.iter().enumerate() {
        cum += c;
        if cum > target {
            median = min + i as i32;
            break;
        }
    }

    Some(ScoreSummary {
        n: scores.len(),
        mean,
        median,
        std_dev,
        min,
        max,
    })
}

const BUCKET: i32 = 10;
const BAR_WIDTH: usize = 50;

/// Histogram of scores (bucket size = 10) plus a summary line.
pub fn format_histogram(scores: &[i32]) -> String {
    let mut out = String::new();
    let Some(s) = summarize_scores(scores) else {
        out.push_str("no scores\n");
        return out;
    };

    let min_bucket = s.min.div_euclid(BUCKET) * BUCKET;
    let max_bucket = s.max.div_euclid(BUCKET) * BUCKET;

    let mut buckets: HashMap<i32, usize> = HashMap::new();
    for &score in scores {
        *buckets.entry(score.div_euclid(BUCKET) * BUCKET).or_insert(0) += 1;
    }
    let max_count = buckets.values().copied().max().unwrap_or(1).max(1);

    let _ = writeln!(out, "Score histogram (N={}, bin={}):", scores.len(), BUCKET);
    let _ = writeln!(out, "{}", "─".repeat(70));

    let mut bucket = min_bucket;
    while bucket <= max_bucket {
        let count = buckets.get(&bucket).copied().unwrap_or(0);
        let bar = "█".repeat(count * BAR_WIDTH / max_count);
        let _ = writeln!(
            out,
            "{:3}-{:3} │{:<50} {:4} ({:.1}%)",
            bucket,
            bucket + BUCKET - 1,
            bar,
            count,
            count as f64 / scores.len() as f64 * 100.0
        );
        bucket += BUCKET;
    }

    let _ = writeln!(out, "{}", "─".repeat(70));
    let _ = writeln!(
        out,
        "Summary: mean={:.2}, median={}, std={:.2}, min={}, max={}",
        s.mean, s.median, s.std_dev, s.min, s.max
    );
    out
}

pub fn print_histogram(scores: &[i32]) {
    println!();
    print!("{}", format_histogram(scores));
}
