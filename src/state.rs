use std::path::Path;

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::aggregate::{
    EmptyDataset, SalaryByExperience, SkillDistribution, salary_report, skills_report,
};
use crate::data::filter::FilterCriteria;
use crate::data::loader;
use crate::data::model::JobDataset;
use crate::recommend::{
    self, CareerProfile, CompletionService, HostedCompletionClient, RetryPolicy,
};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Skills,
    Salary,
    Career,
    Profile,
    About,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Skills, Tab::Salary, Tab::Career, Tab::Profile, Tab::About];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Skills => "Skills Analysis",
            Tab::Salary => "Salary",
            Tab::Career => "Career Advice",
            Tab::Profile => "My Profile",
            Tab::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Filter selections are plain [`FilterCriteria`] values; the views derived
/// from them are recomputed only when a selection changes.
pub struct AppState {
    pub config: Config,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<JobDataset>,

    pub tab: Tab,

    /// Selections of the skills view.
    pub skills_criteria: FilterCriteria,
    pub skills_view: Option<Result<SkillDistribution, EmptyDataset>>,

    /// The salary view is always restricted to one concrete title.
    pub salary_title: Option<String>,
    pub salary_view: Option<Result<SalaryByExperience, EmptyDataset>>,

    /// One colour per experience bucket of the loaded dataset.
    pub color_map: ColorMap,

    pub career: CareerProfile,
    pub recommendation: Option<Result<String, String>>,
    recommender: Option<Box<dyn CompletionService>>,
    retry_policy: RetryPolicy,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let recommender = config.service.as_ref().and_then(|svc| {
            match HostedCompletionClient::new(svc) {
                Ok(client) => Some(Box::new(client) as Box<dyn CompletionService>),
                Err(e) => {
                    log::error!("Recommendation service disabled: {e:#}");
                    None
                }
            }
        });
        Self {
            config,
            dataset: None,
            tab: Tab::default(),
            skills_criteria: FilterCriteria::default(),
            skills_view: None,
            salary_title: None,
            salary_view: None,
            color_map: ColorMap::default(),
            career: CareerProfile::default(),
            recommendation: None,
            recommender,
            retry_policy: RetryPolicy::default(),
            status_message: None,
        }
    }

    /// Replace the recommendation backend (tests, alternative services).
    pub fn with_recommender(
        mut self,
        service: Box<dyn CompletionService>,
        policy: RetryPolicy,
    ) -> Self {
        self.recommender = Some(service);
        self.retry_policy = policy;
        self
    }

    pub fn recommendation_enabled(&self) -> bool {
        self.recommender.is_some()
    }

    /// Load a file and ingest it. On failure the current dataset stays.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} postings ({} titles, {} categories) from {}",
                    dataset.len(),
                    dataset.titles.len(),
                    dataset.categories.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset every selection.
    pub fn set_dataset(&mut self, dataset: JobDataset) {
        self.color_map = ColorMap::new(&dataset.experience_levels());
        self.skills_criteria = FilterCriteria::default();
        self.salary_title = dataset.titles.first().cloned();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh_skills();
        self.refresh_salary();
    }

    pub fn set_skills_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.skills_criteria {
            self.skills_criteria = criteria;
            self.refresh_skills();
        }
    }

    pub fn set_salary_title(&mut self, title: String) {
        if self.salary_title.as_deref() != Some(title.as_str()) {
            self.salary_title = Some(title);
            self.refresh_salary();
        }
    }

    pub fn salary_heading(&self) -> Option<String> {
        self.salary_title
            .as_ref()
            .map(|t| format!("Average Salary for {t}"))
    }

    fn refresh_skills(&mut self) {
        self.skills_view = self.dataset.as_ref().map(|ds| {
            log::debug!("Recomputing skills for {:?}", self.skills_criteria);
            let report = skills_report(ds, &self.skills_criteria);
            if report.is_err() {
                log::warn!("No postings match {:?}", self.skills_criteria);
            }
            report
        });
    }

    fn refresh_salary(&mut self) {
        self.salary_view = match (&self.dataset, &self.salary_title) {
            (Some(ds), Some(title)) => {
                log::debug!("Recomputing salaries for {title}");
                let report = salary_report(ds, &FilterCriteria::for_title(title.clone()));
                if report.is_err() {
                    log::warn!("No postings for title {title}");
                }
                Some(report)
            }
            // A loaded file without rows has no title to select.
            (Some(_), None) => Some(Err(EmptyDataset)),
            (None, _) => None,
        };
    }

    /// Run the blocking recommendation call and keep its outcome for display.
    pub fn request_recommendation(&mut self) {
        let Some(service) = self.recommender.as_deref() else {
            self.recommendation = Some(Err(
                "Recommendation service is not configured.".to_string()
            ));
            return;
        };
        self.recommendation = Some(
            recommend::recommend(service, &self.career, self.retry_policy)
                .map_err(|e| e.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::data::filter::Selection;
    use crate::data::model::JobRecord;

    fn config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn dataset() -> JobDataset {
        JobDataset::from_records(vec![
            JobRecord::new("Data Analyst", "Data", "Python, SQL", 2, 450_000.0),
            JobRecord::new("Data Analyst", "Data", "Python", 2, 550_000.0),
            JobRecord::new("Web Developer", "Software", "HTML, CSS", 1, 300_000.0),
        ])
    }

    struct Echo;

    impl CompletionService for Echo {
        fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok("Analytics Engineer".to_string())
        }
    }

    struct Down;

    impl CompletionService for Down {
        fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    fn instant() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn set_dataset_computes_default_views() {
        let mut state = AppState::new(config());
        state.set_dataset(dataset());

        assert_eq!(state.salary_title.as_deref(), Some("Data Analyst"));
        assert_eq!(
            state.salary_heading().as_deref(),
            Some("Average Salary for Data Analyst")
        );
        let skills = state.skills_view.clone().unwrap().unwrap();
        assert_eq!(skills.last().unwrap().skill, "Python");
        let salary = state.salary_view.clone().unwrap().unwrap();
        assert_eq!(salary[0].average_salary, 500_000.0);
    }

    #[test]
    fn empty_file_reports_no_data_on_both_views() {
        let mut state = AppState::new(config());
        state.set_dataset(JobDataset::from_records(Vec::new()));

        assert_eq!(state.salary_title, None);
        assert_eq!(state.skills_view, Some(Err(EmptyDataset)));
        assert_eq!(state.salary_view, Some(Err(EmptyDataset)));
        assert_eq!(state.salary_heading(), None);
    }

    #[test]
    fn changing_criteria_recomputes_and_reports_empty() {
        let mut state = AppState::new(config());
        state.set_dataset(dataset());

        state.set_skills_criteria(FilterCriteria::new(
            Selection::only("Web Developer"),
            Selection::only("Data"),
        ));
        assert_eq!(state.skills_view, Some(Err(EmptyDataset)));

        state.set_skills_criteria(FilterCriteria::for_title("Web Developer"));
        let skills = state.skills_view.clone().unwrap().unwrap();
        assert_eq!(skills.len(), 2);

        state.set_salary_title("Web Developer".to_string());
        let salary = state.salary_view.clone().unwrap().unwrap();
        assert_eq!(salary[0].experience, 1);
        assert_eq!(salary[0].average_salary, 300_000.0);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::new(config());
        state.set_dataset(dataset());

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"TITLE,SALARY\nA,1\n").unwrap();
        state.load_path(file.path());

        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(3));
        assert!(state.status_message.as_deref().unwrap().contains("CATEGORY"));
    }

    #[test]
    fn recommendation_without_service_reports_configuration() {
        let mut state = AppState::new(config());
        assert!(!state.recommendation_enabled());
        state.request_recommendation();
        assert!(matches!(state.recommendation, Some(Err(_))));
    }

    #[test]
    fn recommendation_outcomes_are_kept() {
        let mut state = AppState::new(config()).with_recommender(Box::new(Echo), instant());
        state.career.interests = "dashboards".into();
        state.request_recommendation();
        assert_eq!(state.recommendation, Some(Ok("Analytics Engineer".to_string())));

        let mut state = AppState::new(config()).with_recommender(Box::new(Down), instant());
        state.career.skills = "SQL".into();
        state.request_recommendation();
        let msg = state.recommendation.unwrap().unwrap_err();
        assert!(msg.contains("3 attempts") && msg.contains("connection refused"), "{msg}");
    }
}
