//! Writes a synthetic paper metadata file for trying out the explorer.
//!
//! The output mimics a cleaned CORD-19 sample, including the rough edges the
//! dashboard has to cope with: missing journals, unparseable dates and missing
//! years. Written as CSV, or as Parquet when the output ends in `.parquet`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use parquet::arrow::ArrowWriter;

const JOURNALS: &[&str] = &[
    "PLoS One",
    "bioRxiv",
    "BMJ",
    "The Lancet",
    "Nature",
    "Science",
    "Cell",
    "Viruses",
    "Journal of Virology",
    "Emerging Infectious Diseases",
    "Vaccine",
    "Scientific Reports",
];

const SUBJECTS: &[&str] = &[
    "SARS-CoV-2",
    "COVID-19",
    "coronavirus",
    "influenza",
    "MERS-CoV",
    "viral pneumonia",
    "respiratory infection",
];

const TOPICS: &[&str] = &[
    "transmission dynamics",
    "clinical characteristics",
    "vaccine development",
    "antibody response",
    "genome sequencing",
    "public health interventions",
    "mortality risk factors",
    "mental health outcomes",
    "diagnostic testing",
];

const PATTERNS: &[&str] = &[
    "{topic} of {subject}",
    "{subject}: a review of {topic}",
    "Modelling {topic} in {subject} patients",
    "{topic} during the {subject} pandemic",
    "Early evidence on {topic} for {subject}",
];

#[derive(Parser)]
#[command(about = "Generate a synthetic paper metadata sample")]
struct Args {
    /// Output file (.csv or .parquet)
    #[arg(long, default_value = "metadata_cleaned_sample.csv")]
    out: PathBuf,

    /// Number of papers
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick with a bias towards the front of the list, so rankings have a
    /// clear head.
    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        let u = self.next_f64();
        let idx = ((u * u) * items.len() as f64) as usize;
        items[idx.min(items.len() - 1)]
    }
}

struct Paper {
    cord_uid: String,
    title: String,
    abstract_text: String,
    publish_time: Option<String>,
    journal: Option<String>,
    year: Option<i64>,
}

fn generate(rng: &mut SimpleRng, rows: usize) -> Vec<Paper> {
    (0..rows)
        .map(|i| {
            let subject = rng.pick(SUBJECTS);
            let topic = rng.pick(TOPICS);
            let title = rng
                .pick(PATTERNS)
                .replace("{subject}", subject)
                .replace("{topic}", topic);
            let title = capitalize(&title);

            let year = (rng.gauss(2020.4, 0.8).round() as i32).clamp(2019, 2022);
            let day_of_year = (rng.next_f64() * 365.0) as u32 + 1;
            let date = NaiveDate::from_yo_opt(year, day_of_year.min(365));

            let (publish_time, year) = match date {
                Some(_) if rng.chance(0.03) => (Some("unknown".to_string()), None),
                Some(d) if rng.chance(0.10) => (Some(d.year().to_string()), Some(d.year() as i64)),
                Some(d) => (Some(d.format("%Y-%m-%d").to_string()), Some(d.year() as i64)),
                None => (None, None),
            };

            let journal = (!rng.chance(0.08)).then(|| rng.pick(JOURNALS).to_string());

            Paper {
                cord_uid: format!("s{i:07}"),
                abstract_text: format!(
                    "We report on {topic} related to {subject}. Results are preliminary."
                ),
                title,
                publish_time,
                journal,
                year,
            }
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn write_csv(path: &Path, papers: &[Paper]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["cord_uid", "title", "abstract", "publish_time", "journal", "year"])?;
    for p in papers {
        let year = p.year.map(|y| format!("{y}.0")).unwrap_or_default();
        writer.write_record([
            p.cord_uid.as_str(),
            p.title.as_str(),
            p.abstract_text.as_str(),
            p.publish_time.as_deref().unwrap_or(""),
            p.journal.as_deref().unwrap_or(""),
            year.as_str(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, papers: &[Paper]) -> Result<()> {
    let text_field = |name: &str, nullable: bool| Field::new(name, DataType::Utf8, nullable);
    let schema = Arc::new(Schema::new(vec![
        text_field("cord_uid", false),
        text_field("title", false),
        text_field("abstract", false),
        text_field("publish_time", true),
        text_field("journal", true),
        Field::new("year", DataType::Int64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(papers.iter().map(|p| &p.cord_uid))),
            Arc::new(StringArray::from_iter_values(papers.iter().map(|p| &p.title))),
            Arc::new(StringArray::from_iter_values(
                papers.iter().map(|p| &p.abstract_text),
            )),
            Arc::new(StringArray::from_iter(
                papers.iter().map(|p| p.publish_time.as_deref()),
            )),
            Arc::new(StringArray::from_iter(papers.iter().map(|p| p.journal.as_deref()))),
            Arc::new(Int64Array::from_iter(papers.iter().map(|p| p.year))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let papers = generate(&mut rng, args.rows);

    let is_parquet = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&args.out, &papers)?;
    } else {
        write_csv(&args.out, &papers)?;
    }

    println!("Wrote {} papers to {}", papers.len(), args.out.display());
    Ok(())
}
