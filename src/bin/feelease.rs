//! Terminal frontend for the FeelEase companion.
//!
//! A line-oriented REPL: plain text goes to the chat engine, `/`
//! commands reach the side features (breathing, mood, journal, goals,
//! quotes, transcript export). Speech in/out and the exhale cue are
//! wired to the null engines here; platform speech integrations plug in
//! through the same traits.

use feelease::audio::NullCue;
use feelease::breathing::SessionState;
use feelease::classifier::EmotionCategory;
use feelease::config::CompanionConfig;
use feelease::resources::{self, QuoteClient};
use feelease::session::{GoalCategory, MOOD_SCALE};
use feelease::speech::{NullRecognizer, NullSynthesizer};
use feelease::translate::Language;
use feelease::Companion;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing — quiet by default, RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feelease=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CompanionConfig::load(&PathBuf::from(path))?,
        None => CompanionConfig::load_default()?,
    };
    let quotes = QuoteClient::new(&config.quotes)?;

    let mut companion = Companion::new(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(NullRecognizer),
        Arc::new(NullCue),
    )?;

    println!("FeelEase v{}", env!("CARGO_PKG_VERSION"));
    println!("Hi, I'm here to listen. Type /help for commands, /quit to leave.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(command, &mut companion, &quotes).await? {
                break;
            }
            continue;
        }

        let reply = companion.respond(line).await?;
        for reply_line in &reply.lines {
            println!("{reply_line}");
        }
    }

    println!("Take care of yourself. I'm here whenever you need me.");
    Ok(())
}

/// Handle a `/` command; returns `false` to exit the REPL.
async fn handle_command(
    command: &str,
    companion: &mut Companion,
    quotes: &QuoteClient,
) -> anyhow::Result<bool> {
    let (verb, rest) = match command.split_once(' ') {
        Some((v, r)) => (v, r.trim()),
        None => (command, ""),
    };

    match verb {
        "quit" | "exit" => return Ok(false),
        "help" => print_help(),
        "lang" => match rest.parse::<Language>() {
            Ok(language) => {
                companion.session.language = language;
                println!("Replies will now be in {language}.");
            }
            Err(_) => println!(
                "Supported languages: {}",
                Language::all()
                    .iter()
                    .map(|l| l.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        },
        "quick" => match rest.to_lowercase().as_str() {
            "anxiety" => quick(companion, EmotionCategory::Anxiety).await?,
            "sadness" => quick(companion, EmotionCategory::Sadness).await?,
            "lonely" => quick(companion, EmotionCategory::Lonely).await?,
            "unmotivated" => quick(companion, EmotionCategory::Unmotivated).await?,
            "anger" => quick(companion, EmotionCategory::Anger).await?,
            _ => println!("Pick one: anxiety, sadness, lonely, unmotivated, anger"),
        },
        "breathe" => run_breathing(companion).await?,
        "mood" => match rest.parse::<u8>() {
            Ok(rating) if companion.session.add_mood(rating).is_ok() => {
                println!("Noted. Thanks for checking in.");
            }
            _ => {
                for (emoji, score, label) in MOOD_SCALE {
                    print!("{emoji} {score} ({label})  ");
                }
                println!("\nUsage: /mood <1-5>");
            }
        },
        "journal" => {
            if rest.is_empty() {
                println!("A prompt if you'd like one:");
                for prompt in resources::JOURNAL_PROMPTS {
                    println!("  - {prompt}");
                }
            } else {
                companion.session.add_journal_entry(rest, None)?;
                println!("Saved. Writing it down is a good step.");
            }
        }
        "goal" => match rest.split_once(' ') {
            Some((category, text)) if !text.trim().is_empty() => {
                match parse_goal_category(category) {
                    Some(category) => {
                        companion.session.add_goal(text.trim(), category)?;
                        println!("Goal added. Small steps count.");
                    }
                    None => println!(
                        "Categories: wellness, social, productivity, mindfulness, growth"
                    ),
                }
            }
            _ => println!("Usage: /goal <category> <description>"),
        },
        "quote" => {
            let quote = quotes
                .fetch_random()
                .await
                .unwrap_or_else(|_| resources::QUOTE_FALLBACK.to_owned());
            println!("{quote}");
        }
        "speak" => {
            companion.speak_last();
            println!("(speaking)");
        }
        "listen" => match companion.listen_and_respond().await? {
            Some(reply) => {
                for reply_line in &reply.lines {
                    println!("{reply_line}");
                }
            }
            None => println!("Sorry, I didn't catch that."),
        },
        "streak" => {
            companion.session.record_visit(chrono::Local::now().date_naive());
            println!(
                "You've checked in {} day(s) in a row.",
                companion.session.streak_days()
            );
        }
        "export" => {
            print!("{}", companion.session.export_transcript());
        }
        other => println!("Unknown command: /{other} (try /help)"),
    }
    Ok(true)
}

async fn quick(companion: &mut Companion, category: EmotionCategory) -> anyhow::Result<()> {
    let reply = companion.quick_response(category).await?;
    for line in &reply.lines {
        println!("{line}");
    }
    Ok(())
}

/// Run a guided breathing session until it completes or ctrl-c cancels.
async fn run_breathing(companion: &mut Companion) -> anyhow::Result<()> {
    companion.start_breathing(Instant::now())?;
    info!("breathing session started");
    println!("Let's breathe together. Press ctrl-c to stop early.");

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let tick = companion.breathing_tick(Instant::now());
                match tick.state {
                    SessionState::Running => {
                        if let Some(phase) = tick.phase {
                            println!(
                                "{} … {:>3.0}%",
                                phase,
                                tick.percent_complete * 100.0
                            );
                        }
                    }
                    SessionState::Completed => {
                        println!("Well done. Notice how you feel now.");
                        return Ok(());
                    }
                    SessionState::Cancelled | SessionState::Idle => return Ok(()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                companion.stop_breathing();
                println!("\nThat's okay — stop whenever you need to.");
                return Ok(());
            }
        }
    }
}

fn parse_goal_category(s: &str) -> Option<GoalCategory> {
    match s.to_lowercase().as_str() {
        "wellness" => Some(GoalCategory::Wellness),
        "social" => Some(GoalCategory::Social),
        "productivity" => Some(GoalCategory::Productivity),
        "mindfulness" => Some(GoalCategory::Mindfulness),
        "growth" | "personal_growth" => Some(GoalCategory::PersonalGrowth),
        _ => None,
    }
}

fn print_help() {
    println!("Just type how you're feeling, or:");
    println!("  /quick <category>   pick the feeling that fits best");
    println!("  /breathe            start a guided breathing session");
    println!("  /mood <1-5>         log today's mood");
    println!("  /journal [text]     write a journal entry (no text: show prompts)");
    println!("  /goal <cat> <text>  set a wellness goal");
    println!("  /quote              a motivational quote");
    println!("  /lang <language>    switch reply language");
    println!("  /speak              speak the last reply aloud");
    println!("  /listen             talk instead of typing");
    println!("  /streak             record today's visit");
    println!("  /export             print the conversation transcript");
    println!("  /quit               leave");
}
