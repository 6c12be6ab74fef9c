//! CLI command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::alignment::{MarkedSegment, SegmentKind};
use crate::diagnosis::{Age, Category, ClassTotals, Diagnosis, NormTable};
use crate::inventory::{TestMode, INVENTORY};
use crate::phonetic::normalize;
use crate::process::{analyze_item, analyze_pair, ProcessClass, ProcessCode, WordAnalysis};
use crate::syllable::{hyphenate, syllabify};

use super::args::{Cli, Commands, ModeArg};

/// Execute a parsed command line
pub fn execute(cli: Cli) -> Result<()> {
    let norms = match &cli.norms {
        Some(path) => NormTable::from_json_path(path)
            .with_context(|| format!("Failed to load norms from {}", path.display()))?,
        None => NormTable::default(),
    };
    let json = cli.json;

    match cli.command {
        Commands::Normalize { words } => cmd_normalize(&words, json),
        Commands::Syllabify { words } => cmd_syllabify(&words, json),
        Commands::Analyze { item, produced } => {
            let analysis = analyze_item(item, &produced)
                .with_context(|| format!("Unknown item {}", item))?;
            print_analysis(&analysis, json)
        }
        Commands::Compare { target, produced } => {
            print_analysis(&analyze_pair(&target, &produced, None), json)
        }
        Commands::Diagnose {
            age,
            birth,
            evaluated,
            mode,
            structure,
            assimilation,
            substitution,
        } => {
            let age = resolve_age(age, birth, evaluated, json)?;
            let totals = ClassTotals::new(structure, assimilation, substitution);
            cmd_diagnose(&norms, totals, age, mode, json)
        }
        Commands::Items { mode } => cmd_items(mode, json),
        Commands::Norms => {
            println!("{}", norms.to_json()?);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Normalize command
fn cmd_normalize(words: &[String], json: bool) -> Result<()> {
    let pairs: Vec<(&str, String)> = words.iter().map(|w| (w.as_str(), normalize(w))).collect();
    if json {
        return print_json(&pairs);
    }
    for (word, phonemic) in pairs {
        println!("{} {} {}", word, "→".dimmed(), phonemic.bold());
    }
    Ok(())
}

/// Syllabify command
fn cmd_syllabify(words: &[String], json: bool) -> Result<()> {
    let pairs: Vec<(&str, Vec<String>)> = words.iter().map(|w| (w.as_str(), syllabify(w))).collect();
    if json {
        return print_json(&pairs);
    }
    for (word, syllables) in pairs {
        println!("{} {} {}", word, "→".dimmed(), hyphenate(&syllables).bold());
    }
    Ok(())
}

fn paint(segment: &MarkedSegment) -> ColoredString {
    let text = segment.text.as_str();
    match segment.kind {
        SegmentKind::Equal => text.normal(),
        SegmentKind::Deleted => text.red().bold().strikethrough(),
        SegmentKind::Inserted => text.green().bold(),
        SegmentKind::Changed => text.yellow().bold(),
    }
}

fn paint_code(code: ProcessCode) -> ColoredString {
    let tag = code.to_string();
    match code.class() {
        ProcessClass::Structure => tag.magenta().bold(),
        ProcessClass::Assimilation => tag.blue().bold(),
        ProcessClass::Substitution => tag.red().bold(),
    }
}

fn print_analysis(analysis: &WordAnalysis, json: bool) -> Result<()> {
    if json {
        return print_json(analysis);
    }

    let line = |segments: &[MarkedSegment]| -> String {
        segments.iter().map(|s| paint(s).to_string()).collect()
    };
    if let Some(item) = analysis.item {
        println!("{} {}", "Item".bold(), item);
    }
    println!(
        "{:>9} {}  ({})",
        "META:".bold(),
        line(&analysis.markup.target),
        hyphenate(&analysis.target_syllables).dimmed()
    );
    println!(
        "{:>9} {}  ({})",
        "NIÑO:".bold(),
        line(&analysis.markup.produced),
        hyphenate(&analysis.produced_syllables).dimmed()
    );

    if analysis.implausible {
        println!(
            "{} the transcription looks very different from the target; check it",
            "Warning:".yellow().bold()
        );
    }

    if analysis.is_correct() {
        println!("{}", "Correct production".green());
    } else if analysis.processes.is_empty() {
        println!("{}", "No processes detected".dimmed());
    } else {
        println!();
        for &code in &analysis.processes {
            println!("  {:<6} {}", paint_code(code), code.label());
        }
        let totals = ClassTotals::from(&analysis.processes);
        println!(
            "\n  E:{} A:{} S:{}",
            totals.structure, totals.assimilation, totals.substitution
        );
    }
    Ok(())
}

fn resolve_age(
    age: Option<u32>,
    birth: Option<NaiveDate>,
    evaluated: Option<NaiveDate>,
    json: bool,
) -> Result<u32> {
    match (age, birth, evaluated) {
        (Some(age), _, _) => Ok(age),
        (None, Some(birth), Some(evaluated)) => {
            let age = Age::between(birth, evaluated);
            tracing::info!(
                %birth,
                %evaluated,
                years = age.years,
                months = age.months,
                "resolved age"
            );
            if !json {
                println!("{} {}", "Age:".bold(), age);
            }
            Ok(age.years)
        }
        _ => anyhow::bail!("Either --age or both --birth and --evaluated are required"),
    }
}

/// Diagnose command
fn cmd_diagnose(
    norms: &NormTable,
    totals: ClassTotals,
    age: u32,
    mode: ModeArg,
    json: bool,
) -> Result<()> {
    let diagnosis = norms.diagnose(totals, age, mode.into());
    if json {
        return print_json(&diagnosis);
    }

    let Diagnosis::Scored(assessment) = &diagnosis else {
        println!("{}", diagnosis.to_string().dimmed());
        return Ok(());
    };

    let headline = diagnosis.to_string();
    let painted = match assessment.category {
        Category::Normal => headline.green().bold(),
        Category::Risk => headline.yellow().bold(),
        Category::Deficit => headline.red().bold(),
    };
    println!(
        "{} {} ({}, {} años)",
        "Diagnóstico:".bold(),
        painted,
        TestMode::from(mode).label(),
        assessment.age_band
    );
    println!("Total: {}", assessment.total);

    if let Some(b) = &assessment.breakdown {
        println!();
        println!(
            "  {:<13} {:>6} {:>7} {:>6} {:>7}  {}",
            "", "Score", "Mean", "SD", "z", "Interp."
        );
        for (name, score) in [
            ("Total", b.total),
            ("Estructura", b.structure),
            ("Asimilación", b.assimilation),
            ("Sustitución", b.substitution),
        ] {
            println!(
                "  {:<13} {:>6} {:>7.1} {:>6.1} {:>+7.2}  {}",
                name, score.score, score.mean, score.sd, score.z, score.interpretation
            );
        }
    }
    if assessment.structure_predominant {
        println!(
            "\n{} structure processes predominate",
            "Note:".yellow().bold()
        );
    }
    Ok(())
}

/// Items command
fn cmd_items(mode: Option<ModeArg>, json: bool) -> Result<()> {
    let items = match mode {
        Some(mode) => TestMode::from(mode).items(),
        None => &INVENTORY[..],
    };
    if json {
        return print_json(&items);
    }
    for spec in items {
        let syllables: Vec<String> = spec
            .syllables
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == spec.stressed {
                    s.bold().underline().to_string()
                } else {
                    s.dimmed().to_string()
                }
            })
            .collect();
        println!("{:>3}. {:<14} {}", spec.number, spec.word, syllables.join("-"));
    }
    Ok(())
}
