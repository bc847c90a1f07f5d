//! Simple TUI example for item-quiz

use item_quiz::format::{clean_description, format_timer};
use item_quiz::{GameStatus, Quiz, QuizConfig, QuizEvent};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("item-quiz TUI Example");
    println!("=====================\n");

    let quiz = Quiz::new(QuizConfig::new().time_limit_ms(15000)).await;

    println!("Loading item catalog...");
    quiz.load_catalog().await;
    quiz.start().await?;
    println!(
        "Loaded {} items (version {})\n",
        quiz.item_count().await,
        quiz.catalog_version().await
    );

    println!("Commands:");
    println!("  g <name> - Guess the item by name");
    println!("  s - Skip the current item");
    println!("  t <ms> - Change the time limit (5000-60000)");
    println!("  i - Show current round info");
    println!("  r - Reset the game");
    println!("  q - Quit\n");

    loop {
        // Check for events
        while let Some(event) = quiz.try_recv().await {
            match event {
                QuizEvent::RoundStarted => {
                    let snapshot = quiz.snapshot().await;
                    if let Some(target) = snapshot.target {
                        println!("\n[Round] Guess this item:");
                        println!("{}\n", clean_description(&target.description));
                    }
                }
                QuizEvent::Resolved { outcome, record } => {
                    println!(
                        "[Event] {:?} - {} ({}s) | streak {}",
                        outcome,
                        record.item_name,
                        record.time_spent,
                        quiz.snapshot().await.current_streak
                    );
                }
                QuizEvent::TimeLimitChanged(ms) => {
                    println!("[Event] Time limit is now {} ms", ms);
                }
                QuizEvent::GameReset => {
                    println!("[Event] Game reset");
                }
                QuizEvent::CatalogFailed(msg) => {
                    println!("[Error] Catalog load failed: {}", msg);
                }
                _ => {}
            }
        }

        // Read input
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let arg = parts.get(1).copied().unwrap_or("");

        match cmd {
            "g" => {
                if arg.is_empty() {
                    println!("Usage: g <item name>");
                    continue;
                }
                match quiz.submit_guess_by_name(arg).await {
                    Ok(outcome) => println!("Outcome: {:?}", outcome),
                    Err(e) => println!("Cannot guess right now: {}", e),
                }
            }
            "s" => match quiz.skip().await {
                Ok(_) => {
                    let snapshot = quiz.snapshot().await;
                    if let Some(target) = snapshot.target {
                        println!("Skipped. It was: {}", target.name);
                    }
                }
                Err(e) => println!("Cannot skip right now: {}", e),
            },
            "t" => match arg.parse::<u64>() {
                Ok(ms) => match quiz.change_time_limit(ms).await {
                    Ok(effective) => println!("Time limit set to {} ms", effective),
                    Err(e) => println!("Rejected: {}", e),
                },
                Err(_) => println!("Usage: t <milliseconds>"),
            },
            "i" => {
                let snapshot = quiz.snapshot().await;
                println!(
                    "Status: {:?} | time left {} | streak {} (best {}) | {} guesses recorded",
                    snapshot.status,
                    format_timer(snapshot.time_left_ms),
                    snapshot.current_streak,
                    snapshot.longest_streak,
                    snapshot.history.len()
                );
                if snapshot.status == GameStatus::Idle {
                    println!("No round is running.");
                }
            }
            "r" => match quiz.reset().await {
                Ok(()) => println!("Starting over."),
                Err(e) => println!("Reset failed: {}", e),
            },
            "q" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Unknown command: {}", cmd);
            }
        }
    }

    Ok(())
}
