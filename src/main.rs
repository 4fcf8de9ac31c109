use anyhow::{bail, Context, Result};
use serde::Serialize;
use simc_data::{
    cli::{Cli, Commands, DumpArgs},
    download::{ensure_dumps_downloaded, CacheManager, DumpClient},
    filter::resolve_file_types,
    schema::{FileType, InventoryType, ItemQuality},
    DataProvider, DumpDirProvider, ItemRef, ScalingEngine,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Download {
            include,
            exclude,
            force,
        } => {
            let start = Instant::now();
            let file_types = resolve_file_types(include, exclude)?;
            let cache = CacheManager::new(cli.cache_dir)?;
            let client = DumpClient::new().context("Failed to create HTTP client")?;

            let (dir, summary) =
                ensure_dumps_downloaded(&client, &cache, &cli.branch, &file_types, force)?;
            info!(
                "{} downloaded, {} unchanged in {:.1}s",
                summary.downloaded.len(),
                summary.unchanged.len(),
                start.elapsed().as_secs_f64()
            );
            println!("{}", dir.display());
        }

        Commands::Decode { file_type, dumps } => {
            let file_type: FileType = file_type.parse()?;
            let provider = open_provider(cli.cache_dir, &cli.branch, &dumps)?;
            let table = provider.table(file_type)?;
            print_json(&*table)?;
        }

        Commands::Item { line, dumps } => {
            let item_ref = ItemRef::parse_simc_line(&line)?;
            let provider = open_provider(cli.cache_dir, &cli.branch, &dumps)?;
            let engine = ScalingEngine::new(&provider);
            match engine.build_item(&item_ref)? {
                Some(item) => print_json(&item)?,
                None => bail!("item {} not found", item_ref.item_id),
            }
        }

        Commands::ItemSpell {
            spell_id,
            item_level,
            quality,
            inventory_type,
            dumps,
        } => {
            let provider = open_provider(cli.cache_dir, &cli.branch, &dumps)?;
            let engine = ScalingEngine::new(&provider);
            let spell = engine.build_item_spell(
                spell_id,
                item_level,
                ItemQuality::from_raw(quality),
                InventoryType::from_raw(inventory_type),
            )?;
            match spell {
                Some(spell) => print_json(&spell)?,
                None => bail!("spell {} not found", spell_id),
            }
        }

        Commands::PlayerSpell {
            spell_id,
            level,
            dumps,
        } => {
            let provider = open_provider(cli.cache_dir, &cli.branch, &dumps)?;
            let engine = ScalingEngine::new(&provider);
            match engine.build_player_spell(level, spell_id)? {
                Some(spell) => print_json(&spell)?,
                None => bail!("spell {} not found", spell_id),
            }
        }

        Commands::Conduit {
            conduit_id,
            level,
            dumps,
        } => {
            let provider = open_provider(cli.cache_dir, &cli.branch, &dumps)?;
            let engine = ScalingEngine::new(&provider);
            let Some(spell_id) = engine.spell_id_for_conduit(conduit_id)? else {
                bail!("conduit {} not found", conduit_id);
            };
            match engine.build_player_spell(level, spell_id)? {
                Some(spell) => print_json(&spell)?,
                None => bail!("conduit {} spell {} not found", conduit_id, spell_id),
            }
        }

        Commands::ListFileTypes => {
            println!("Available file types:\n");
            for file_type in FileType::ALL {
                println!("  {:<20} {}", file_type.name(), file_type.source_files().join(", "));
            }
        }
    }

    Ok(())
}

/// Explicit dump directory, or the cached branch directory
fn open_provider(
    cache_dir: Option<PathBuf>,
    branch: &str,
    dumps: &DumpArgs,
) -> Result<DumpDirProvider> {
    let dir = match &dumps.dump_dir {
        Some(dir) => dir.clone(),
        None => {
            let cache = CacheManager::new(cache_dir)?;
            let dir = cache.branch_dir(branch);
            if !dir.exists() {
                warn!("no cached dumps for {}, run `simc-data download` first", branch);
            }
            dir
        }
    };
    Ok(DumpDirProvider::new(dir).persist_parsed(dumps.persist_parsed))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}
