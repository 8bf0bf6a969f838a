//! Writes a deterministic synthetic job postings dataset.
//!
//! Usage: `generate_sample [OUTPUT]` where OUTPUT ends in `.csv` (default
//! `sample_jobs.csv`) or `.parquet`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Posting {
    #[serde(rename = "TITLE")]
    title: String,
    #[serde(rename = "CATEGORY")]
    category: String,
    #[serde(rename = "SKILLS")]
    skills: String,
    #[serde(rename = "EXPERIENCE")]
    experience: i64,
    #[serde(rename = "SALARY")]
    salary: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// (title, category, skill pool, base salary at zero experience)
const ROLES: [(&str, &str, &[&str], f64); 6] = [
    ("Data Analyst", "Data Science", &["Python", "SQL", "Excel", "Tableau", "Power BI", "Statistics"], 350_000.0),
    ("Data Scientist", "Data Science", &["Python", "Machine Learning", "SQL", "Statistics", "Deep Learning", "R"], 600_000.0),
    ("Backend Developer", "Software Development", &["Java", "Spring", "SQL", "Docker", "REST", "Microservices"], 450_000.0),
    ("Frontend Developer", "Software Development", &["JavaScript", "React", "HTML", "CSS", "TypeScript", "Redux"], 400_000.0),
    ("DevOps Engineer", "Cloud & Infrastructure", &["AWS", "Docker", "Kubernetes", "Linux", "Terraform", "Jenkins"], 550_000.0),
    ("QA Engineer", "Testing", &["Selenium", "Java", "Manual Testing", "API Testing", "JIRA", "Python"], 300_000.0),
];

const POSTINGS_PER_ROLE: usize = 40;

fn generate(rng: &mut SimpleRng) -> Vec<Posting> {
    let mut postings = Vec::with_capacity(ROLES.len() * POSTINGS_PER_ROLE);
    for &(title, category, pool, base) in &ROLES {
        for _ in 0..POSTINGS_PER_ROLE {
            let experience = rng.below(11) as i64;
            let n_skills = 2 + rng.below(3);
            let skills: Vec<&str> = (0..n_skills).map(|_| pool[rng.below(pool.len())]).collect();
            // Roughly 12% growth per year with ±15% noise, whole rupees.
            let growth = 1.12f64.powi(experience as i32);
            let noise = 0.85 + 0.3 * rng.next_f64();
            postings.push(Posting {
                title: title.to_string(),
                category: category.to_string(),
                skills: skills.join(", "),
                experience,
                salary: (base * growth * noise).round(),
            });
        }
    }
    postings
}

fn write_csv(path: &Path, postings: &[Posting]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for p in postings {
        writer.serialize(p).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, postings: &[Posting]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("TITLE", DataType::Utf8, false),
        Field::new("CATEGORY", DataType::Utf8, false),
        Field::new("SKILLS", DataType::Utf8, false),
        Field::new("EXPERIENCE", DataType::Int64, false),
        Field::new("SALARY", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(postings.iter().map(|p| p.title.as_str()))),
            Arc::new(StringArray::from_iter_values(postings.iter().map(|p| p.category.as_str()))),
            Arc::new(StringArray::from_iter_values(postings.iter().map(|p| p.skills.as_str()))),
            Arc::new(Int64Array::from_iter_values(postings.iter().map(|p| p.experience))),
            Arc::new(Float64Array::from_iter_values(postings.iter().map(|p| p.salary))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args().nth(1).unwrap_or_else(|| "sample_jobs.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let postings = generate(&mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(path, &postings)?,
        Some("parquet") | Some("pq") => write_parquet(path, &postings)?,
        _ => bail!("output must end in .csv or .parquet: {output}"),
    }

    println!(
        "Wrote {} postings ({} titles) to {output}",
        postings.len(),
        ROLES.len()
    );
    Ok(())
}
