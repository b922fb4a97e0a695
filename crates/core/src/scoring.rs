use crate::model::{Skill, SkillId};

/// How many of a user's most recent attempts feed the summary.
pub const RECENT_ATTEMPT_WINDOW: usize = 50;

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

/// One attempt as seen by the aggregator: the skill of its question and the
/// score, if one was given.
#[derive(Debug, Clone, Copy)]
pub struct AttemptSample<'a> {
    pub skill: &'a Skill,
    pub score: Option<i32>,
}

//
// ─── OUTPUT ────────────────────────────────────────────────────────────────────
//

/// Mean score of one skill over the sampled attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillAverage {
    pub skill: Skill,
    pub average: f64,
    pub scored_attempts: usize,
}

/// Summary statistics over a user's recent attempts.
///
/// # Examples
///
/// ```
/// # use prep_core::model::{Skill, SkillId};
/// # use prep_core::scoring::{summarize, AttemptSample};
/// let a = Skill::new(SkillId::new(1), "Algorithms").unwrap();
/// let b = Skill::new(SkillId::new(2), "Behavioral").unwrap();
/// let samples = [
///     AttemptSample { skill: &a, score: Some(90) },
///     AttemptSample { skill: &b, score: Some(60) },
///     AttemptSample { skill: &b, score: None },
/// ];
/// let summary = summarize(&samples);
/// assert_eq!(summary.total_attempts, 3);
/// assert_eq!(summary.average_score, Some(75.0));
/// assert_eq!(summary.weakest_skill().map(Skill::name), Some("Behavioral"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressSummary {
    /// Every sampled attempt, scored or not.
    pub total_attempts: usize,
    /// Mean over scored attempts; `None` when nothing was scored.
    pub average_score: Option<f64>,
    /// Per-skill means in first-encountered order.
    pub by_skill: Vec<SkillAverage>,
    best: Option<usize>,
    weakest: Option<usize>,
}

impl ProgressSummary {
    #[must_use]
    pub fn best_skill(&self) -> Option<&Skill> {
        self.best.map(|idx| &self.by_skill[idx].skill)
    }

    #[must_use]
    pub fn weakest_skill(&self) -> Option<&Skill> {
        self.weakest.map(|idx| &self.by_skill[idx].skill)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_attempts == 0
    }
}

//
// ─── AGGREGATION ───────────────────────────────────────────────────────────────
//

struct Bucket<'a> {
    skill: &'a Skill,
    sum: i64,
    count: usize,
}

/// Aggregate a recency-ordered slice of attempts.
///
/// Unscored attempts count toward `total_attempts` only. Skill ties resolve
/// to the skill seen first in `samples`.
#[must_use]
pub fn summarize(samples: &[AttemptSample<'_>]) -> ProgressSummary {
    let mut buckets: Vec<Bucket<'_>> = Vec::new();
    let mut sum: i64 = 0;
    let mut scored: usize = 0;

    for sample in samples {
        let Some(score) = sample.score else {
            continue;
        };
        sum += i64::from(score);
        scored += 1;

        let skill_id: SkillId = sample.skill.id();
        match buckets.iter_mut().find(|b| b.skill.id() == skill_id) {
            Some(bucket) => {
                bucket.sum += i64::from(score);
                bucket.count += 1;
            }
            None => buckets.push(Bucket {
                skill: sample.skill,
                sum: i64::from(score),
                count: 1,
            }),
        }
    }

    let by_skill: Vec<SkillAverage> = buckets
        .into_iter()
        .map(|b| SkillAverage {
            skill: b.skill.clone(),
            average: mean(b.sum, b.count),
            scored_attempts: b.count,
        })
        .collect();

    let mut best: Option<usize> = None;
    let mut weakest: Option<usize> = None;
    for (idx, entry) in by_skill.iter().enumerate() {
        if best.is_none_or(|b| entry.average > by_skill[b].average) {
            best = Some(idx);
        }
        if weakest.is_none_or(|w| entry.average < by_skill[w].average) {
            weakest = Some(idx);
        }
    }

    ProgressSummary {
        total_attempts: samples.len(),
        average_score: (scored > 0).then(|| mean(sum, scored)),
        by_skill,
        best,
        weakest,
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: i64, count: usize) -> f64 {
    sum as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: u64, name: &str) -> Skill {
        Skill::new(SkillId::new(id), name).unwrap()
    }

    fn sample(skill: &Skill, score: Option<i32>) -> AttemptSample<'_> {
        AttemptSample { skill, score }
    }

    #[test]
    fn empty_history_has_no_statistics() {
        let summary = summarize(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.average_score, None);
        assert!(summary.best_skill().is_none());
        assert!(summary.weakest_skill().is_none());
    }

    #[test]
    fn total_counts_unscored_attempts() {
        let a = skill(1, "A");
        let samples = [sample(&a, None), sample(&a, Some(40)), sample(&a, None)];
        let summary = summarize(&samples);
        assert_eq!(summary.total_attempts, 3);
        assert_eq!(summary.average_score, Some(40.0));
        assert_eq!(summary.by_skill[0].scored_attempts, 1);
    }

    #[test]
    fn only_unscored_attempts_leave_average_absent() {
        let a = skill(1, "A");
        let summary = summarize(&[sample(&a, None), sample(&a, None)]);
        assert_eq!(summary.total_attempts, 2);
        assert_eq!(summary.average_score, None);
        assert!(summary.weakest_skill().is_none());
    }

    #[test]
    fn picks_best_and_weakest_by_mean() {
        let a = skill(1, "A");
        let b = skill(2, "B");
        let samples = [
            sample(&a, Some(80)),
            sample(&b, Some(70)),
            sample(&a, Some(100)),
            sample(&b, Some(50)),
        ];
        let summary = summarize(&samples);
        assert_eq!(summary.best_skill(), Some(&a));
        assert_eq!(summary.weakest_skill(), Some(&b));
        assert_eq!(summary.average_score, Some(75.0));
    }

    #[test]
    fn single_skill_is_both_best_and_weakest() {
        let a = skill(1, "A");
        let summary = summarize(&[sample(&a, Some(10)), sample(&a, Some(20))]);
        assert_eq!(summary.best_skill(), Some(&a));
        assert_eq!(summary.weakest_skill(), Some(&a));
    }

    #[test]
    fn ties_resolve_to_first_encountered_skill() {
        let a = skill(1, "A");
        let b = skill(2, "B");
        let c = skill(3, "C");
        let samples = [
            sample(&b, Some(60)),
            sample(&a, Some(60)),
            sample(&c, Some(60)),
        ];
        let summary = summarize(&samples);
        assert_eq!(summary.best_skill(), Some(&b));
        assert_eq!(summary.weakest_skill(), Some(&b));
    }

    #[test]
    fn skills_are_grouped_by_id_not_name() {
        let first = skill(1, "Same");
        let second = skill(2, "Same");
        let summary = summarize(&[sample(&first, Some(90)), sample(&second, Some(30))]);
        assert_eq!(summary.by_skill.len(), 2);
        assert_eq!(summary.weakest_skill().map(Skill::id), Some(SkillId::new(2)));
    }

    #[test]
    fn averages_do_not_truncate() {
        let a = skill(1, "A");
        let summary = summarize(&[sample(&a, Some(1)), sample(&a, Some(2))]);
        assert_eq!(summary.average_score, Some(1.5));
    }
}
