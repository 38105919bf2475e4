//! Shell Session
//!
//! Executes commands against the PokeAPI through the lookup cache and keeps
//! per-session state: the pagination cursor and the caught-Pokemon registry.

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::api::memo::{page_key, pokemon_key};
use crate::api::{fetch_cached, LocationArea, LocationAreaPage, PokeApiClient, Pokemon};
use crate::cache::Cache;
use crate::error::{PokedexError, Result};
use crate::repl::{clean_input, Command, Pokedex, COMMANDS};

pub const PROMPT: &str = "Pokedex > ";

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Page Cursor ==
/// Links to the neighbours of the last listing page shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub next: Option<String>,
    pub previous: Option<String>,
    /// False until the first page has been shown
    pub started: bool,
}

impl PageCursor {
    fn follow(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.started = true;
    }
}

// == Session ==
/// One interactive shell session.
pub struct Session {
    client: PokeApiClient,
    cache: Cache,
    cursor: PageCursor,
    pokedex: Pokedex,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient, cache: Cache) -> Self {
        Self::with_rng(client, cache, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG for catch rolls.
    pub fn with_rng(client: PokeApiClient, cache: Cache, rng: StdRng) -> Self {
        Self {
            client,
            cache,
            cursor: PageCursor::default(),
            pokedex: Pokedex::new(),
            rng,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Stops the cache reaper. Call once when the shell ends.
    pub fn shutdown(&self) {
        self.cache.stop();
    }

    // == Line Handling ==
    /// Parses and runs one input line, writing all output to `out`.
    ///
    /// Parse and remote failures are reported to `out` and the session
    /// continues. Only failures to write output are returned.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let command = match Command::parse(&clean_input(line)) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match self.execute(command, out).await {
            Err(PokedexError::Io(e)) => Err(PokedexError::Io(e)),
            Err(e) => {
                warn!("Command failed: {}", e);
                writeln!(out, "Error making request: {}", e)?;
                Ok(Flow::Continue)
            }
            flow => flow,
        }
    }

    /// Runs a parsed command.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::CacheStats => self.cache_stats(out).await?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            writeln!(out, "  {}: {}", info.usage, info.description)?;
        }
        Ok(())
    }

    // == Map ==
    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let url = if !self.cursor.started {
            self.client.location_areas_url()
        } else if let Some(next) = self.cursor.next.clone() {
            next
        } else {
            writeln!(out, "You're on the last page")?;
            return Ok(());
        };

        self.show_page(&url, out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(previous) = self.cursor.previous.clone() else {
            writeln!(out, "You're on the first page")?;
            return Ok(());
        };

        self.show_page(&previous, out).await
    }

    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let client = &self.client;
        let page: LocationAreaPage =
            fetch_cached(&self.cache, &page_key(url), || client.location_areas(Some(url))).await?;

        self.cursor.follow(&page);
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    // == Explore ==
    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        let client = &self.client;
        let key = page_key(&client.location_area_url(area));
        let location: LocationArea =
            fetch_cached(&self.cache, &key, || client.location_area(area)).await?;

        writeln!(out, "Exploring {}...", area)?;
        writeln!(out, "Found Pokemon:")?;
        for encounter in &location.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    // == Catch ==
    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        let client = &self.client;
        let pokemon: Pokemon =
            fetch_cached(&self.cache, &pokemon_key(name), || client.pokemon(name)).await?;

        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

        if self.pokedex.contains(&pokemon.name) {
            writeln!(out, "{} is already in your Pokedex!", pokemon.name)?;
            return Ok(());
        }

        if roll_catch(&mut self.rng, pokemon.base_experience.unwrap_or(0)) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    // == Inspect ==
    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty. Go catch some Pokemon!")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let stats = self.cache.stats().await;
        writeln!(
            out,
            "Cache (ttl {:?}): {} entries, {} hits, {} misses, {} expired, {} reaped, hit rate {:.1}%",
            self.cache.ttl(),
            stats.total_entries,
            stats.hits,
            stats.misses,
            stats.expired,
            stats.reaped,
            stats.hit_rate() * 100.0
        )?;
        Ok(())
    }
}

/// Rolls a catch attempt. Higher base experience makes a catch harder.
pub fn roll_catch<R: Rng>(rng: &mut R, base_experience: u32) -> bool {
    let roll = rng.gen_range(0..base_experience.saturating_add(100));
    roll > base_experience / 2
}
