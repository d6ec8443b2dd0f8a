//! Command handlers
//!
//! One function per command. Output goes to the writer passed in so the
//! REPL and tests share the same code path.

use std::io::Write;

use rand::Rng;
use tracing::debug;

use crate::cache::Cache;
use crate::client::PokeApiClient;
use crate::commands::{Command, CommandKind, CommandRegistry};
use crate::error::{PokedexError, Result};
use crate::models::LocationAreaPage;
use crate::session::Session;

/// Whether the REPL keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything a command may read or mutate.
pub struct CommandContext<'a, R: Rng> {
    pub registry: &'a CommandRegistry,
    pub client: &'a PokeApiClient,
    pub cache: &'a Cache,
    pub session: &'a mut Session,
    pub rng: &'a mut R,
}

// == Execute ==
/// Runs `command` with `args`, writing its output to `out`.
///
/// Extra arguments are ignored. A command that takes an argument fails with
/// [`PokedexError::MissingArgument`] when none is given.
pub async fn execute<R: Rng, W: Write>(
    command: &Command,
    args: &[String],
    ctx: &mut CommandContext<'_, R>,
    out: &mut W,
) -> Result<Flow> {
    let arg = match (command.takes_argument, args.first()) {
        (true, None) => return Err(PokedexError::MissingArgument(command.name.to_string())),
        (_, arg) => arg.map(String::as_str).unwrap_or_default(),
    };
    debug!(command = command.name, arg, "Executing command");

    match command.kind {
        CommandKind::Exit => {
            writeln!(out, "Closing the Pokedex... Goodbye!")?;
            return Ok(Flow::Exit);
        }
        CommandKind::Help => help(ctx.registry, out)?,
        CommandKind::Map => map(ctx, out).await?,
        CommandKind::Mapb => map_back(ctx, out).await?,
        CommandKind::Pokedex => pokedex(ctx.session, out)?,
        CommandKind::Explore => explore(arg, ctx, out).await?,
        CommandKind::Catch => catch(arg, ctx, out).await?,
        CommandKind::Inspect => inspect(arg, ctx.session, out)?,
    }
    Ok(Flow::Continue)
}

fn help<W: Write>(registry: &CommandRegistry, out: &mut W) -> Result<()> {
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for command in registry.commands() {
        if command.takes_argument {
            writeln!(out, "{} <name>: {}", command.name, command.description)?;
        } else {
            writeln!(out, "{}: {}", command.name, command.description)?;
        }
    }
    Ok(())
}

async fn map<R: Rng, W: Write>(ctx: &mut CommandContext<'_, R>, out: &mut W) -> Result<()> {
    let Some(url) = ctx.session.next.clone() else {
        writeln!(out, "you're on the last page")?;
        return Ok(());
    };
    show_page(&url, ctx, out).await
}

async fn map_back<R: Rng, W: Write>(ctx: &mut CommandContext<'_, R>, out: &mut W) -> Result<()> {
    let Some(url) = ctx.session.previous.clone() else {
        writeln!(out, "you're on the first page")?;
        return Ok(());
    };
    show_page(&url, ctx, out).await
}

/// Fetches a location page, moves the session cursor to it and prints it.
async fn show_page<R: Rng, W: Write>(
    url: &str,
    ctx: &mut CommandContext<'_, R>,
    out: &mut W,
) -> Result<()> {
    let page: LocationAreaPage = ctx.client.location_area_page(url, ctx.cache).await?;
    ctx.session.next = page.next;
    ctx.session.previous = page.previous;

    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    Ok(())
}

async fn explore<R: Rng, W: Write>(
    area_name: &str,
    ctx: &mut CommandContext<'_, R>,
    out: &mut W,
) -> Result<()> {
    let area = ctx.client.location_area(area_name, ctx.cache).await?;

    writeln!(out, "Exploring {}...", area_name)?;
    writeln!(out, "Found Pokemon:")?;
    for encounter in &area.pokemon_encounters {
        writeln!(out, " - {}", encounter.pokemon.name)?;
    }
    Ok(())
}

async fn catch<R: Rng, W: Write>(
    name: &str,
    ctx: &mut CommandContext<'_, R>,
    out: &mut W,
) -> Result<()> {
    let pokemon = ctx.client.pokemon(name, ctx.cache).await?;

    writeln!(out, "Throwing a Pokeball at {}...", name)?;
    let base = pokemon.base_experience.unwrap_or(0);
    let roll = if base == 0 { 0 } else { ctx.rng.gen_range(0..base) };

    if is_caught(base, roll) {
        writeln!(out, "{} was caught!", name)?;
        writeln!(out, "You may now inspect it with the inspect command.")?;
        ctx.session.record_catch(name, pokemon);
    } else {
        writeln!(out, "{} escaped!", name)?;
    }
    Ok(())
}

/// A roll in `[0, base)` catches when it lands in the top third of the range.
/// Zero base experience always catches.
pub fn is_caught(base_experience: u32, roll: u32) -> bool {
    base_experience == 0 || roll >= base_experience - base_experience / 3
}

fn inspect<W: Write>(name: &str, session: &Session, out: &mut W) -> Result<()> {
    let Some(pokemon) = session.caught(name) else {
        writeln!(out, "{} has not been caught, or is not a Pokemon", name)?;
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

fn pokedex<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let names = session.caught_names();
    if names.is_empty() {
        writeln!(out, "No Pokemon were found")?;
        return Ok(());
    }

    writeln!(out, "Your Pokedex:")?;
    for name in names {
        writeln!(out, " - {}", name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rand::rngs::mock::StepRng;

    use crate::models::{NamedResource, Pokemon, PokemonStat, PokemonType};

    fn named(name: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: String::new(),
        }
    }

    fn bulbasaur() -> Pokemon {
        Pokemon {
            name: "bulbasaur".to_string(),
            base_experience: Some(64),
            height: 7,
            weight: 69,
            stats: vec![PokemonStat {
                base_stat: 45,
                stat: named("hp"),
            }],
            types: vec![PokemonType {
                slot: 1,
                kind: named("grass"),
            }],
        }
    }

    async fn run(name: &str, args: &[&str], session: &mut Session, cache: &Cache) -> (Result<Flow>, String) {
        let registry = CommandRegistry::new();
        // Unreachable port; tests that hit the network must seed the cache.
        let client = PokeApiClient::with_base_url("http://127.0.0.1:1").unwrap();
        let mut rng = StepRng::new(0, 0);
        let mut ctx = CommandContext {
            registry: &registry,
            client: &client,
            cache,
            session,
            rng: &mut rng,
        };
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let command = *registry.get(name).unwrap();

        let mut out = Vec::new();
        let result = execute(&command, &args, &mut ctx, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_is_caught_threshold() {
        assert!(is_caught(0, 0));
        assert!(!is_caught(60, 0));
        assert!(!is_caught(60, 39));
        assert!(is_caught(60, 40));
        assert!(is_caught(60, 59));
    }

    #[tokio::test]
    async fn test_exit_returns_exit_flow() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let mut session = Session::default();

        let (result, out) = run("exit", &[], &mut session, &cache).await;

        assert_eq!(result.unwrap(), Flow::Exit);
        assert!(out.contains("Goodbye"));
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let mut session = Session::default();

        let (result, out) = run("help", &[], &mut session, &cache).await;

        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(out.starts_with("Welcome to the Pokedex!"));
        assert!(out.contains("catch <name>: "));
        assert!(out.contains("mapb: "));
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_missing_argument() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let mut session = Session::default();

        let (result, _) = run("catch", &[], &mut session, &cache).await;

        assert!(matches!(result, Err(PokedexError::MissingArgument(name)) if name == "catch"));
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_mapb_on_first_page() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let mut session = Session::new("http://127.0.0.1:1/location-area");

        let (result, out) = run("mapb", &[], &mut session, &cache).await;

        assert!(result.is_ok());
        assert_eq!(out, "you're on the first page\n");
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_map_past_last_page() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let mut session = Session::default();

        let (result, out) = run("map", &[], &mut session, &cache).await;

        assert!(result.is_ok());
        assert_eq!(out, "you're on the last page\n");
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_map_reads_page_from_cache() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let url = "http://127.0.0.1:1/location-area";
        cache.add(
            url,
            br#"{"count": 2, "next": "http://127.0.0.1:1/location-area?offset=2", "previous": null,
                "results": [{"name": "area-one"}, {"name": "area-two"}]}"#
                .to_vec(),
        );
        let mut session = Session::new(url);

        let (result, out) = run("map", &[], &mut session, &cache).await;

        assert!(result.is_ok());
        assert_eq!(out, "area-one\narea-two\n");
        assert_eq!(
            session.next.as_deref(),
            Some("http://127.0.0.1:1/location-area?offset=2")
        );
        assert!(session.previous.is_none());
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_catch_escape_with_low_roll() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        cache.add(
            "http://127.0.0.1:1/pokemon/mewtwo",
            br#"{"name": "mewtwo", "base_experience": 340}"#.to_vec(),
        );
        let mut session = Session::default();

        let (result, out) = run("catch", &["mewtwo"], &mut session, &cache).await;

        assert!(result.is_ok());
        assert!(out.contains("Throwing a Pokeball at mewtwo..."));
        assert!(out.contains("mewtwo escaped!"));
        assert!(session.caught("mewtwo").is_none());
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_catch_zero_experience_always_caught() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        cache.add(
            "http://127.0.0.1:1/pokemon/magikarp",
            br#"{"name": "magikarp", "base_experience": null, "height": 9, "weight": 100}"#.to_vec(),
        );
        let mut session = Session::default();

        let (result, out) = run("catch", &["magikarp"], &mut session, &cache).await;

        assert!(result.is_ok());
        assert!(out.contains("magikarp was caught!"));
        assert_eq!(session.caught("magikarp").unwrap().weight, 100);
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_catch_by_id_then_inspect_by_id() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        cache.add(
            "http://127.0.0.1:1/pokemon/129",
            br#"{"name": "magikarp", "base_experience": 0, "height": 9, "weight": 100}"#.to_vec(),
        );
        let mut session = Session::default();

        let (result, out) = run("catch", &["129"], &mut session, &cache).await;
        assert!(result.is_ok());
        assert!(out.contains("129 was caught!"));

        let (result, out) = run("inspect", &["129"], &mut session, &cache).await;
        assert!(result.is_ok());
        assert!(out.starts_with("Name: magikarp\nHeight: 9\nWeight: 100\n"));
        assert!(!out.contains("has not been caught"));
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_inspect_and_pokedex() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let mut session = Session::default();

        let (_, out) = run("pokedex", &[], &mut session, &cache).await;
        assert_eq!(out, "No Pokemon were found\n");

        let (_, out) = run("inspect", &["bulbasaur"], &mut session, &cache).await;
        assert_eq!(out, "bulbasaur has not been caught, or is not a Pokemon\n");

        session.record_catch("bulbasaur", bulbasaur());

        let (_, out) = run("inspect", &["bulbasaur"], &mut session, &cache).await;
        assert_eq!(
            out,
            "Name: bulbasaur\nHeight: 7\nWeight: 69\nStats:\n  -hp: 45\nTypes:\n  - grass\n"
        );

        let (_, out) = run("pokedex", &[], &mut session, &cache).await;
        assert_eq!(out, "Your Pokedex:\n - bulbasaur\n");
        cache.stop().await;
    }
}
