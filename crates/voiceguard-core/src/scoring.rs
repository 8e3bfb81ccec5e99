//! Aggregate probability for a set of chunk predictions.

/// Round a chunk score in `[0, 1]` to a whole percent.
pub fn chunk_percent(score: f32) -> i64 {
    (f64::from(score) * 100.0).round() as i64
}

/// Reduce chunk scores to one integer percentage.
///
/// Each score is rounded to a whole percent first, then the mean of those
/// percents is rounded again. `[0.81, 0.93, 0.50]` gives `[81, 93, 50]`,
/// a mean of 74.67 and an aggregate of 75. No scores gives 0.
pub fn aggregate_probability<I>(scores: I) -> i32
where
    I: IntoIterator<Item = f32>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), score| {
            (sum + chunk_percent(score), count + 1)
        });

    if count == 0 {
        return 0;
    }

    (sum as f64 / count as f64).round() as i32
}
