use std::fmt;

use super::model::{JobDataset, JobRecord};

// ---------------------------------------------------------------------------
// Selection: one filter dimension
// ---------------------------------------------------------------------------

/// A selector value: either every value of the column, or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    /// Whether `value` passes this selection.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Closed list of choices for a selector: `All` followed by each value.
    pub fn options(values: &[String]) -> Vec<Selection> {
        std::iter::once(Selection::All)
            .chain(values.iter().cloned().map(Selection::Only))
            .collect()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Equality filters over the title and category columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title: Selection,
    pub category: Selection,
}

impl FilterCriteria {
    pub fn new(title: Selection, category: Selection) -> Self {
        Self { title, category }
    }

    /// Restrict by title only.
    pub fn for_title(title: impl Into<String>) -> Self {
        Self {
            title: Selection::only(title),
            category: Selection::All,
        }
    }

    /// True when neither dimension restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.title.is_all() && self.category.is_all()
    }

    /// Heading shown above the skills chart.
    pub fn skills_heading(&self) -> String {
        if self.is_unrestricted() {
            "Skills Required for All Job Titles".to_string()
        } else {
            format!(
                "Skills Required for {} in {} Category",
                self.title, self.category
            )
        }
    }
}

/// Return the records that pass `criteria`, in dataset order.
///
/// The title filter runs first and the category filter is applied to its
/// result. An empty result is a normal outcome.
pub fn apply<'a>(dataset: &'a JobDataset, criteria: &FilterCriteria) -> Vec<&'a JobRecord> {
    let by_title = dataset
        .records
        .iter()
        .filter(|r| criteria.title.matches(&r.title));
    by_title
        .filter(|r| criteria.category.matches(&r.category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobDataset {
        JobDataset::from_records(vec![
            JobRecord::new("Data Analyst", "Data", "Python, SQL", 1, 400_000.0),
            JobRecord::new("Data Analyst", "Analytics", "Excel", 2, 450_000.0),
            JobRecord::new("Data Engineer", "Data", "Spark, SQL", 3, 900_000.0),
            JobRecord::new("Web Developer", "Software", "JavaScript", 2, 500_000.0),
        ])
    }

    fn titles(rows: &[&JobRecord]) -> Vec<(String, String)> {
        rows.iter()
            .map(|r| (r.title.clone(), r.category.clone()))
            .collect()
    }

    #[test]
    fn all_all_is_identity() {
        let ds = sample();
        let rows = apply(&ds, &FilterCriteria::default());
        assert_eq!(rows.len(), ds.len());
        for (kept, original) in rows.iter().zip(&ds.records) {
            assert_eq!(*kept, original);
        }
    }

    #[test]
    fn title_filter_uses_exact_equality() {
        let ds = sample();
        let rows = apply(&ds, &FilterCriteria::for_title("Data Analyst"));
        assert_eq!(rows.len(), 2);
        assert!(apply(&ds, &FilterCriteria::for_title("data analyst")).is_empty());
        assert!(apply(&ds, &FilterCriteria::for_title("Data")).is_empty());
    }

    #[test]
    fn filters_compose_as_intersection() {
        let ds = sample();
        let criteria = FilterCriteria::new(Selection::only("Data Analyst"), Selection::only("Data"));
        let rows = apply(&ds, &criteria);
        assert_eq!(titles(&rows), vec![("Data Analyst".into(), "Data".into())]);
    }

    #[test]
    fn filter_order_does_not_matter() {
        let ds = sample();
        let title = Selection::only("Data Analyst");
        let category = Selection::only("Data");

        let title_first: Vec<&JobRecord> = apply(&ds, &FilterCriteria::new(title.clone(), Selection::All))
            .into_iter()
            .filter(|r| category.matches(&r.category))
            .collect();
        let category_first: Vec<&JobRecord> = apply(&ds, &FilterCriteria::new(Selection::All, category))
            .into_iter()
            .filter(|r| title.matches(&r.title))
            .collect();
        assert_eq!(title_first, category_first);
    }

    #[test]
    fn no_match_yields_empty_subset() {
        let ds = sample();
        let criteria = FilterCriteria::new(Selection::only("Web Developer"), Selection::only("Data"));
        assert!(apply(&ds, &criteria).is_empty());
    }

    #[test]
    fn options_start_with_all() {
        let opts = Selection::options(&["A".to_string(), "B".to_string()]);
        assert_eq!(
            opts,
            vec![Selection::All, Selection::only("A"), Selection::only("B")]
        );
    }

    #[test]
    fn skills_heading_variants() {
        assert_eq!(
            FilterCriteria::default().skills_heading(),
            "Skills Required for All Job Titles"
        );
        assert_eq!(
            FilterCriteria::for_title("Data Analyst").skills_heading(),
            "Skills Required for Data Analyst in All Category"
        );
        assert_eq!(
            FilterCriteria::new(Selection::All, Selection::only("Data")).skills_heading(),
            "Skills Required for All in Data Category"
        );
    }
}
