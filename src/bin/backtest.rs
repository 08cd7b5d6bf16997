use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use matchday_signals::football_data::{parse_finished_json, parse_scheduled_json};
use matchday_signals::predict::{EngineConfig, ScoringModel, predict_all};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let scheduled = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/scheduled_matches.json"));
    let finished = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/finished_matches.json"));
    let model = match args.next() {
        Some(raw) => raw.parse::<ScoringModel>().map_err(anyhow::Error::msg)?,
        None => ScoringModel::default(),
    };

    let fixtures = parse_scheduled_json(&read(&scheduled)?)?;
    let history = parse_finished_json(&read(&finished)?)?;

    // Offline run over saved provider responses; no network, every fixture is printed.
    let cfg = EngineConfig {
        model,
        ..EngineConfig::default()
    };
    let rows = predict_all(&fixtures, &history, &cfg, false);

    println!("Model: {model}  fixtures: {}  history: {}", fixtures.len(), history.len());
    for row in &rows {
        print!("{:<48} {:<10} {:>7}", row.fixture, row.prediction.to_string(), row.rating);
        if let Some(p) = row.probabilities {
            print!("  H {:.1}% D {:.1}% A {:.1}%", p.home, p.draw, p.away);
        }
        println!();
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
