use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Static pages
// ---------------------------------------------------------------------------

const PROFILE: &str = "\
Mohd Khizar is a budding professional in data analytics and technology, with a \
background in data analysis and a passion for data visualization, working \
towards becoming a data scientist.

Alongside work he has built projects in web scraping, exploratory data analysis, \
prediction models and Tableau dashboards, and holds certifications in data \
visualization, machine learning, Excel, SQL fundamentals and Python data \
structures and algorithms.

Guidance from the data science community is always welcome, and so is sharing \
what he has learned.";

const PROFILE_LINKS: [(&str, &str); 3] = [
    ("My LinkedIn", "https://www.linkedin.com/in/khizar246/"),
    (
        "My Tableau profile",
        "https://public.tableau.com/app/profile/mohd.khizer/vizzes",
    ),
    ("My portfolio", "https://www.datascienceportfol.io/Khizar246"),
];

const ABOUT: [(&str, &str); 3] = [
    (
        "Project Description",
        "An exploration of IT job skills and salaries in India, built on a \
         collected and cleaned dataset of job postings. It combines data \
         analysis and visualization to give job seekers and employers a view \
         of which skills are in demand and how pay grows with experience.",
    ),
    (
        "Skills Utilized",
        "Data cleaning, exploratory data analysis and data visualization: \
         loading the postings, filtering by title and category, counting skill \
         mentions and averaging salaries per experience level.",
    ),
    (
        "Motivation and Future Plans",
        "Data-driven decisions for the IT job market. Planned next steps are \
         richer interactive charts and predictive models, starting with the \
         career advice page.",
    ),
];

const ABOUT_LINKS: [(&str, &str); 3] = [
    (
        "Link to Dataset",
        "https://www.kaggle.com/datasets/khizar246/it-jobs-in-india",
    ),
    (
        "GitHub Repository",
        "https://github.com/Khizar246/Data-Analytics/blob/main/Job_Project.ipynb",
    ),
    ("YouTube", "https://www.youtube.com/watch?v=7G_Kz5MOqps"),
];

pub fn profile_page(ui: &mut Ui) {
    ui.heading("My Profile");
    ui.add_space(6.0);
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.label(PROFILE);
        ui.add_space(8.0);
        numbered_links(ui, &PROFILE_LINKS);
    });
}

pub fn about_page(ui: &mut Ui) {
    ui.heading("About");
    ui.add_space(6.0);
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        for (title, body) in ABOUT {
            ui.label(RichText::new(title).strong());
            ui.label(body);
            ui.add_space(6.0);
        }
        numbered_links(ui, &ABOUT_LINKS);
    });
}

fn numbered_links(ui: &mut Ui, links: &[(&str, &str)]) {
    for (i, (text, url)) in links.iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("{}.", i + 1));
            ui.hyperlink_to(*text, *url);
        });
    }
}

// ---------------------------------------------------------------------------
// Career advice
// ---------------------------------------------------------------------------

pub fn career_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Career Advice");
    ui.label("Describe yourself and get a suggested career path in IT.");
    ui.add_space(6.0);

    egui::Grid::new("career_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            let fields = [
                ("Interests", &mut state.career.interests),
                ("Skills", &mut state.career.skills),
                ("Degree", &mut state.career.degree),
                ("Employment status", &mut state.career.employment_status),
            ];
            for (label, value) in fields {
                ui.label(label);
                ui.add(egui::TextEdit::singleline(value).desired_width(320.0));
                ui.end_row();
            }
        });

    ui.add_space(6.0);
    let enabled = state.recommendation_enabled();
    let button = ui.add_enabled(enabled, egui::Button::new("Get recommendation"));
    if !enabled {
        ui.label(
            RichText::new("Set CAREER_ACCESS_TOKEN, CAREER_WORKSPACE_ID and CAREER_MODEL_ID to enable.")
                .color(Color32::GRAY),
        );
    }
    if button.clicked() {
        // Blocks this frame until the service answers or retries run out.
        state.request_recommendation();
    }

    match &state.recommendation {
        Some(Ok(text)) => {
            ui.separator();
            ui.strong("Suggestion");
            ui.label(text);
        }
        Some(Err(msg)) => {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        None => {}
    }

    ui.add_space(12.0);
    egui::CollapsingHeader::new("Environment")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for (key, set) in &state.config.env_report {
                let (mark, color) = if *set {
                    ("set", Color32::GREEN)
                } else {
                    ("not set", Color32::GRAY)
                };
                ui.horizontal(|ui: &mut Ui| {
                    ui.monospace(*key);
                    ui.label(RichText::new(mark).color(color));
                });
            }
        });
}
