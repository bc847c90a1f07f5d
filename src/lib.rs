//! # item-quiz
//!
//! Timed guess-the-item trivia game core.
//!
//! ## Features
//!
//! - **Item Catalog**: One-time load from the Data Dragon CDN
//! - **Round Lifecycle**: Draw a target, count down, resolve, advance
//! - **Countdown Timer**: Fixed-interval ticks, single-fire timeout
//! - **Streak Tracking**: Current and longest streak
//! - **Guess History**: Newest-first ledger of concluded rounds
//!
//! ## Example
//!
//! ```rust,ignore
//! use item_quiz::{Quiz, QuizConfig, QuizEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let quiz = Quiz::new(QuizConfig::new().time_limit_ms(15000)).await;
//!     quiz.load_catalog().await;
//!     quiz.start().await?;
//!
//!     while let Some(event) = quiz.recv().await {
//!         match event {
//!             QuizEvent::RoundStarted => {
//!                 let snapshot = quiz.snapshot().await;
//!                 println!("{}", snapshot.target.unwrap().description);
//!             }
//!             QuizEvent::Resolved { outcome, record } => {
//!                 println!("{outcome:?} after {:.1}s", record.time_spent);
//!             }
//!             _ => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod format;
pub mod game;
pub mod ledger;
pub mod timer;
pub mod types;


pub use catalog::{ItemCatalog, LoadStatus};
pub use error::{QuizError, Result};
pub use game::{GameState, Quiz, QuizEvent};
pub use ledger::GuessHistory;
pub use timer::CountdownTimer;
pub use types::*;
