use std::collections::HashMap;

use thiserror::Error;

use super::filter::{self, FilterCriteria};
use super::model::{JobDataset, JobRecord};

/// Average salaries are coarsened to this step for presentation.
pub const SALARY_ROUNDING_STEP: f64 = 100_000.0;

/// Returned when the filtered subset has no rows; the caller reports
/// "no data" instead of drawing a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no data available for the selected filters")]
pub struct EmptyDataset;

// ---------------------------------------------------------------------------
// Rounding (half away from zero, like `f64::round`)
// ---------------------------------------------------------------------------

/// Round to `decimals` places after the point.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to the nearest multiple of `step`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

// ---------------------------------------------------------------------------
// Skill distribution
// ---------------------------------------------------------------------------

/// Mentions of one skill and its share of all mentions.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillShare {
    pub skill: String,
    pub count: usize,
    /// Percentage of all mentions, one decimal place.
    pub percentage: f64,
}

/// Skills sorted ascending by count.
pub type SkillDistribution = Vec<SkillShare>;

/// Count every skill mention in `subset` and compute percentage shares.
///
/// Ties in count keep the order in which the skills were first seen.
pub fn skill_distribution(subset: &[&JobRecord]) -> SkillDistribution {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in subset {
        for skill in &record.skills {
            match index.get(skill.as_str()) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(skill.as_str(), order.len());
                    order.push((skill.as_str(), 1));
                }
            }
        }
    }

    let total: usize = order.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: SkillDistribution = order
        .into_iter()
        .map(|(skill, count)| SkillShare {
            skill: skill.to_string(),
            count,
            percentage: round_to_decimals(100.0 * count as f64 / total as f64, 1),
        })
        .collect();
    // `sort_by_key` is stable.
    shares.sort_by_key(|s| s.count);
    shares
}

// ---------------------------------------------------------------------------
// Salary by experience
// ---------------------------------------------------------------------------

/// Rounded mean salary of one experience bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryBucket {
    pub experience: i64,
    pub average_salary: f64,
    /// Number of postings averaged.
    pub postings: usize,
}

/// Buckets sorted descending by rounded average salary.
pub type SalaryByExperience = Vec<SalaryBucket>;

/// Average salary per experience bucket, rounded to [`SALARY_ROUNDING_STEP`].
///
/// Ties in the rounded average keep grouping-encounter order.
pub fn salary_by_experience(subset: &[&JobRecord]) -> SalaryByExperience {
    let mut groups: Vec<(i64, f64, usize)> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for record in subset {
        match index.get(&record.experience) {
            Some(&i) => {
                groups[i].1 += record.salary;
                groups[i].2 += 1;
            }
            None => {
                index.insert(record.experience, groups.len());
                groups.push((record.experience, record.salary, 1));
            }
        }
    }

    let mut buckets: SalaryByExperience = groups
        .into_iter()
        .map(|(experience, sum, postings)| SalaryBucket {
            experience,
            average_salary: round_to_step(sum / postings as f64, SALARY_ROUNDING_STEP),
            postings,
        })
        .collect();
    // Stable; descending by rounded average.
    buckets.sort_by(|a, b| b.average_salary.total_cmp(&a.average_salary));
    buckets
}

// ---------------------------------------------------------------------------
// Report entry points: filter, check for empty, aggregate
// ---------------------------------------------------------------------------

pub fn skills_report(
    dataset: &JobDataset,
    criteria: &FilterCriteria,
) -> Result<SkillDistribution, EmptyDataset> {
    let subset = filter::apply(dataset, criteria);
    if subset.is_empty() {
        return Err(EmptyDataset);
    }
    Ok(skill_distribution(&subset))
}

pub fn salary_report(
    dataset: &JobDataset,
    criteria: &FilterCriteria,
) -> Result<SalaryByExperience, EmptyDataset> {
    let subset = filter::apply(dataset, criteria);
    if subset.is_empty() {
        return Err(EmptyDataset);
    }
    Ok(salary_by_experience(&subset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Selection;

    fn rec(title: &str, skills: &str, experience: i64, salary: f64) -> JobRecord {
        JobRecord::new(title, "IT", skills, experience, salary)
    }

    #[test]
    fn skill_distribution_example() {
        let a = rec("A", "Python, SQL", 1, 1.0);
        let b = rec("B", "Python", 1, 1.0);
        let dist = skill_distribution(&[&a, &b]);
        assert_eq!(
            dist,
            vec![
                SkillShare { skill: "SQL".into(), count: 1, percentage: 33.3 },
                SkillShare { skill: "Python".into(), count: 2, percentage: 66.7 },
            ]
        );
    }

    #[test]
    fn repeated_skill_in_one_record_counts_twice() {
        let a = rec("A", "Java, Java, Spring", 1, 1.0);
        let dist = skill_distribution(&[&a]);
        let java = dist.iter().find(|s| s.skill == "Java").unwrap();
        assert_eq!(java.count, 2);
        assert_eq!(java.percentage, 66.7);
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let a = rec("A", "Go, Rust, C", 1, 1.0);
        let b = rec("B", "Rust", 1, 1.0);
        let dist = skill_distribution(&[&a, &b]);
        let names: Vec<&str> = dist.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, vec!["Go", "C", "Rust"]);
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let rows = vec![
            rec("A", "Python, SQL, Excel", 1, 1.0),
            rec("B", "Python, Tableau, Power BI", 1, 1.0),
            rec("C", "SQL, Excel, Statistics", 1, 1.0),
            rec("D", "R", 1, 1.0),
        ];
        let refs: Vec<&JobRecord> = rows.iter().collect();
        let dist = skill_distribution(&refs);
        assert!(drift_within_rounding(&dist), "{dist:?}");
        assert!(dist.windows(2).all(|w| w[0].count <= w[1].count));
    }

    /// Each share is rounded on its own, so the sum may drift by half a unit per skill.
    fn drift_within_rounding(dist: &[SkillShare]) -> bool {
        let sum: f64 = dist.iter().map(|s| s.percentage).sum();
        (sum - 100.0).abs() <= 0.05 * dist.len() as f64 + 1e-9
    }

    #[test]
    fn six_equal_skills_overshoot_by_rounding() {
        let row = rec("A", "a, b, c, d, e, f", 1, 1.0);
        let dist = skill_distribution(&[&row]);
        assert!(dist.iter().all(|s| s.percentage == 16.7));
        let sum: f64 = dist.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.2).abs() < 1e-9, "sum was {sum}");
        assert!(drift_within_rounding(&dist));
    }

    #[test]
    fn empty_inputs_yield_empty_results() {
        assert!(skill_distribution(&[]).is_empty());
        assert!(salary_by_experience(&[]).is_empty());

        let blank = rec("A", "", 1, 1.0);
        assert!(skill_distribution(&[&blank]).is_empty());
    }

    #[test]
    fn salary_average_is_rounded_to_step() {
        let a = rec("A", "SQL", 2, 450_000.0);
        let b = rec("B", "SQL", 2, 550_000.0);
        let out = salary_by_experience(&[&a, &b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].experience, 2);
        assert_eq!(out[0].average_salary, 500_000.0);
        assert_eq!(out[0].postings, 2);
    }

    #[test]
    fn salary_rounding_half_goes_away_from_zero() {
        assert_eq!(round_to_step(250_000.0, SALARY_ROUNDING_STEP), 300_000.0);
        assert_eq!(round_to_step(349_999.0, SALARY_ROUNDING_STEP), 300_000.0);
        assert_eq!(round_to_step(49_999.0, SALARY_ROUNDING_STEP), 0.0);
        assert_eq!(round_to_decimals(12.25, 1), 12.3);
    }

    #[test]
    fn salary_buckets_sorted_descending_with_stable_ties() {
        let rows = vec![
            rec("A", "SQL", 1, 310_000.0),
            rec("A", "SQL", 5, 1_520_000.0),
            rec("A", "SQL", 3, 290_000.0),
            rec("A", "SQL", 4, 800_000.0),
        ];
        let refs: Vec<&JobRecord> = rows.iter().collect();
        let out = salary_by_experience(&refs);
        let order: Vec<(i64, f64)> = out.iter().map(|b| (b.experience, b.average_salary)).collect();
        assert_eq!(
            order,
            vec![
                (5, 1_500_000.0),
                (4, 800_000.0),
                (1, 300_000.0),
                (3, 300_000.0),
            ]
        );
    }

    #[test]
    fn reports_short_circuit_on_empty_subset() {
        let ds = JobDataset::from_records(vec![rec("Data Analyst", "SQL", 1, 400_000.0)]);
        let missing = FilterCriteria::for_title("Astronaut");
        assert_eq!(skills_report(&ds, &missing), Err(EmptyDataset));
        assert_eq!(salary_report(&ds, &missing), Err(EmptyDataset));

        let cat = FilterCriteria::new(Selection::All, Selection::only("IT"));
        assert_eq!(skills_report(&ds, &cat).unwrap().len(), 1);
        assert_eq!(salary_report(&ds, &cat).unwrap()[0].average_salary, 400_000.0);
    }
}
