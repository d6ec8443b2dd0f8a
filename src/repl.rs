//! Read-eval loop
//!
//! Owns the command table, catalog client and session for one run. The
//! cache is borrowed so its owner decides when the reaper stops.

use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::cache::Cache;
use crate::client::PokeApiClient;
use crate::commands::{clean_input, execute, CommandContext, CommandRegistry, Flow};
use crate::error::{PokedexError, Result};
use crate::session::Session;

/// Prompt printed before every line.
pub const PROMPT: &str = "Pokedex > ";

/// One interactive Pokedex session.
pub struct Repl<R: Rng> {
    registry: CommandRegistry,
    client: PokeApiClient,
    session: Session,
    rng: R,
}

impl<R: Rng> Repl<R> {
    /// Creates a session starting at the first location page of `client`.
    pub fn new(client: PokeApiClient, rng: R) -> Self {
        let session = Session::new(client.location_areas_url());
        Self {
            registry: CommandRegistry::new(),
            client,
            session,
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // == Handle Line ==
    /// Tokenizes and runs one input line. Blank lines do nothing.
    pub async fn handle_line<W: Write>(
        &mut self,
        line: &str,
        cache: &Cache,
        out: &mut W,
    ) -> Result<Flow> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        let command = *self
            .registry
            .get(name)
            .ok_or_else(|| PokedexError::UnknownCommand(name.clone()))?;

        let mut ctx = CommandContext {
            registry: &self.registry,
            client: &self.client,
            cache,
            session: &mut self.session,
            rng: &mut self.rng,
        };
        execute(&command, args, &mut ctx, out).await
    }

    // == Run ==
    /// Prompts and dispatches lines from `input` until `exit` or end of input.
    ///
    /// Command errors are printed and the loop continues; only I/O failures
    /// on `input` or `out` end it early.
    pub async fn run<I, W>(&mut self, input: I, cache: &Cache, out: &mut W) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                debug!("End of input");
                break;
            };

            match self.handle_line(&line, cache, out).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(PokedexError::Io(err)) => return Err(PokedexError::Io(err)),
                Err(err) => writeln!(out, "{}", err)?,
            }
        }

        info!(caught = self.session.caught_names().len(), "Session finished");
        Ok(())
    }
}
