//! Interactive question loop.
//!
//! A [`Session`] owns the resolver and answers one line at a time; the
//! loop in [`Session::run`] reads lines until `exit` or end of input. No
//! state carries over between questions.

use crate::config::HoopgraphConfig;
use crate::intent::{Intent, IntentResolver, NameCatalog};
use crate::rendering::Block;
use crate::services::QueryService;
use crate::storage::GraphStore;
use crate::{Error, Result};
use std::fmt;
use std::io::{BufRead, Write};
use std::time::Instant;

/// Prompt printed before each line is read.
pub const PROMPT: &str = "> ";

const GREETING: &str = "Ask about a player, a team, or a stat leader. Type help for examples, exit to quit.";

const HELP: &str = "\
Questions you can ask:
  who has the most points        top 10 by points per game
  who has the most assists       top 10 by assists per game
  who has the most rebounds      top 10 by rebounds per game
  who is the tallest player      tallest player with a recorded height
  who is the shortest player     shortest player with a recorded height
  <player name>                  profile, season history, teams, similar players
  <team name>                    profile, franchise history, recent players
  exit (or e)                    leave";

/// The response to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print; prompt again.
    Silent,
    /// Leave the loop.
    Exit,
    /// Output to print.
    Blocks(Vec<Block>),
}

impl Reply {
    /// The output blocks, empty for silent and exit replies.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        match self {
            Self::Blocks(blocks) => blocks,
            Self::Silent | Self::Exit => &[],
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// An interactive session over one graph store.
pub struct Session<'a> {
    store: &'a dyn GraphStore,
    resolver: IntentResolver,
}

impl<'a> Session<'a> {
    /// Opens a session, fetching the name catalog from `store`.
    ///
    /// A catalog that cannot be fetched is reported and left empty, so only
    /// stat and height questions will resolve.
    #[must_use]
    pub fn open(store: &'a dyn GraphStore, config: &HoopgraphConfig) -> Self {
        let catalog = NameCatalog::load(store).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load player and team names");
            NameCatalog::default()
        });
        Self::new(store, IntentResolver::new(catalog, config.features))
    }

    /// Creates a session with a prepared resolver.
    #[must_use]
    pub const fn new(store: &'a dyn GraphStore, resolver: IntentResolver) -> Self {
        Self { store, resolver }
    }

    /// The resolver in use.
    #[must_use]
    pub const fn resolver(&self) -> &IntentResolver {
        &self.resolver
    }

    /// Answers one line of input.
    #[must_use]
    pub fn answer(&self, line: &str) -> Reply {
        let started = Instant::now();
        let intent = self.resolver.resolve(line);

        let reply = match &intent {
            Intent::Empty => Reply::Silent,
            Intent::Exit => Reply::Exit,
            Intent::Help => Reply::Blocks(vec![Block::notice(HELP)]),
            Intent::Invalid(text) => Reply::Blocks(vec![Block::notice(format!(
                "\"{text}\" is not a known player, team or question. Type help for examples."
            ))]),
            Intent::Player { query, .. } | Intent::Team { query, .. } => {
                let mut blocks = vec![Block::notice(format!("Results for {query}:"))];
                blocks.extend(QueryService::new(self.store).answer(&intent));
                Reply::Blocks(blocks)
            },
            Intent::Leaderboard(_) | Intent::Extremum(_) => {
                Reply::Blocks(QueryService::new(self.store).answer(&intent))
            },
        };

        metrics::counter!("hoopgraph_questions_total", "intent" => intent.kind()).increment(1);
        tracing::debug!(
            intent = intent.kind(),
            elapsed_ms = started.elapsed().as_millis(),
            "Answered"
        );
        reply
    }

    /// Reads questions from `input` and writes answers to `output` until
    /// `exit` or end of input. Returns the number of questions answered.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so
    /// a garbled line gets an answer instead of ending the session.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, output: &mut W) -> Result<usize> {
        writeln!(output, "{GREETING}").map_err(|e| Error::operation("write_output", e))?;

        let mut answered = 0;
        let mut buf = Vec::new();
        loop {
            write!(output, "{PROMPT}").map_err(|e| Error::operation("write_output", e))?;
            output.flush().map_err(|e| Error::operation("flush_output", e))?;

            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .map_err(|e| Error::operation("read_input", e))?;
            if read == 0 {
                writeln!(output).map_err(|e| Error::operation("write_output", e))?;
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);

            match self.answer(line) {
                Reply::Exit => break,
                Reply::Silent => {},
                reply @ Reply::Blocks(_) => {
                    answered += 1;
                    writeln!(output, "{reply}\n").map_err(|e| Error::operation("write_output", e))?;
                },
            }
        }

        Ok(answered)
    }
}
