use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Column names of the job postings table
// ---------------------------------------------------------------------------

pub const COL_TITLE: &str = "TITLE";
pub const COL_CATEGORY: &str = "CATEGORY";
pub const COL_SKILLS: &str = "SKILLS";
pub const COL_EXPERIENCE: &str = "EXPERIENCE";
pub const COL_SALARY: &str = "SALARY";

/// Every column a job postings file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_TITLE,
    COL_CATEGORY,
    COL_SKILLS,
    COL_EXPERIENCE,
    COL_SALARY,
];

/// Separator used in the serialized `SKILLS` column.
pub const SKILL_SEPARATOR: &str = ", ";

/// Split a serialized skill list (`"Python, SQL, Excel"`) into trimmed tokens.
/// Empty tokens are dropped so a blank cell contributes no mentions.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(SKILL_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// JobRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single job posting.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub title: String,
    pub category: String,
    /// Skill tokens in the order they were listed.
    pub skills: Vec<String>,
    /// Years of experience (grouping key for salary averages).
    pub experience: i64,
    pub salary: f64,
}

impl JobRecord {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        skills: &str,
        experience: i64,
        salary: f64,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            skills: split_skills(skills),
            experience,
            salary,
        }
    }
}

// ---------------------------------------------------------------------------
// JobDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the distinct selector values pre-computed.
#[derive(Debug, Clone, Default)]
pub struct JobDataset {
    /// All postings, in file order.
    pub records: Vec<JobRecord>,
    /// Distinct titles in first-encounter order.
    pub titles: Vec<String>,
    /// Distinct categories in first-encounter order.
    pub categories: Vec<String>,
}

impl JobDataset {
    /// Build the distinct value lists from the loaded records.
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        let titles = distinct_in_order(records.iter().map(|r| r.title.as_str()));
        let categories = distinct_in_order(records.iter().map(|r| r.category.as_str()));
        JobDataset {
            records,
            titles,
            categories,
        }
    }

    /// Number of postings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted set of experience buckets present in the dataset.
    pub fn experience_levels(&self) -> BTreeSet<i64> {
        self.records.iter().map(|r| r.experience).collect()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_skills_trims_and_keeps_duplicates() {
        assert_eq!(
            split_skills("Python, SQL ,  Excel, Python"),
            vec!["Python", "SQL", "Excel", "Python"]
        );
    }

    #[test]
    fn split_skills_only_splits_on_comma_space() {
        assert_eq!(split_skills("C,C++, Go"), vec!["C,C++", "Go"]);
    }

    #[test]
    fn split_skills_blank_cell_is_empty() {
        assert!(split_skills("").is_empty());
        assert!(split_skills("   ").is_empty());
    }

    #[test]
    fn distinct_values_keep_first_encounter_order() {
        let ds = JobDataset::from_records(vec![
            JobRecord::new("Data Analyst", "Data", "SQL", 1, 400_000.0),
            JobRecord::new("Backend Developer", "Software", "Rust", 3, 900_000.0),
            JobRecord::new("Data Analyst", "Data", "Excel", 2, 450_000.0),
            JobRecord::new("DevOps Engineer", "Cloud", "AWS", 4, 1_100_000.0),
        ]);
        assert_eq!(
            ds.titles,
            vec!["Data Analyst", "Backend Developer", "DevOps Engineer"]
        );
        assert_eq!(ds.categories, vec!["Data", "Software", "Cloud"]);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.experience_levels().into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }
}
