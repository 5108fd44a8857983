//! crates/journal_core/src/analysis.rs
//!
//! Batch analysis built on top of the `EmotionAnalysisService` port.

use crate::domain::DailyEmotion;
use crate::ports::{EmotionAnalysisService, PortResult};

/// Analyzes each entry in order and labels the results "Day 1", "Day 2", ...
/// by position.
///
/// Entries are sent one at a time. The first failure aborts the whole batch and
/// no partial results are returned.
pub async fn weekly_analysis<S>(service: &S, contents: &[String]) -> PortResult<Vec<DailyEmotion>>
where
    S: EmotionAnalysisService + ?Sized,
{
    let mut results = Vec::with_capacity(contents.len());
    for (index, content) in contents.iter().enumerate() {
        let analysis = service.analyze_emotion(content).await?;
        results.push(DailyEmotion {
            day: format!("Day {}", index + 1),
            score: analysis.score,
            emotion: analysis.emotion,
        });
    }
    Ok(results)
}
