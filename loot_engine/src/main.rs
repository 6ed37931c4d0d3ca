#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** loot_inspect **
//! Prints the loot menu contents of a container in a scene.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use log::{info, warn};

use loot_engine::classify::EnchantmentType;
use loot_engine::sim::{SimFormulas, SimWorld};
use loot_engine::style::LootStyle;
use loot_engine::{ItemStack, LootEnv, RefHandle, RenderContext, World, load_config, load_container_inventory, load_scene};

#[derive(Parser)]
#[command(author, version, about = "Show what the loot menu would list for a container.")]
struct Cli {
    /// Scene file (RON).
    #[arg(long, value_name = "FILE", default_value = "loot_engine/data/scene.ron")]
    scene: PathBuf,
    /// Settings file (TOML).
    #[arg(long, value_name = "FILE", default_value = "loot_engine/data/loot.toml")]
    config: PathBuf,
    /// Handle of the container to open, in hex. Lists the scene's containers if omitted.
    #[arg(long, value_name = "HANDLE", value_parser = parse_handle)]
    container: Option<u32>,
    /// Print the raw payloads as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_handle(text: &str) -> Result<u32, String> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("'{text}' is not a hex handle: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(&cli.config);
    let world = load_scene(&cli.scene).context("while loading scene")?;
    info!("scene loaded from '{}'", cli.scene.display());

    let Some(container) = cli.container else {
        list_containers(&world);
        return Ok(());
    };

    let handle = RefHandle::new(container);
    if handle.get(&world).is_none() {
        bail!("no reference with handle {container:08X} in '{}'", cli.scene.display());
    }

    let formulas = SimFormulas::default();
    let render = RenderContext::from(&config.view);
    let env = LootEnv::new(&world, &formulas, &render);

    let stacks = load_container_inventory(env, handle, |_| true);
    if cli.json {
        let payloads: Vec<_> = stacks.iter().map(ItemStack::data).collect();
        println!("{}", serde_json::to_string_pretty(&payloads)?);
    } else {
        print_stacks(&world, handle, &stacks);
    }
    drop(stacks);

    let outstanding = world.ledger().outstanding();
    if outstanding > 0 {
        warn!("{outstanding} inventory entries were not released");
    }
    Ok(())
}

fn list_containers(world: &SimWorld) {
    println!("{}", "References".container_style());
    for reference in world.references() {
        let name = world
            .form(reference.base)
            .map_or_else(|| "<unknown>".to_string(), |form| form.editor_id.clone());
        let slots = reference.inventory.len() + reference.dropped.len();
        if slots == 0 {
            continue;
        }
        println!(
            "  {:08X}  {} {}",
            reference.handle,
            name.item_style(),
            format!("({slots} stacks)").dim_style()
        );
    }
}

fn print_stacks(world: &SimWorld, container: RefHandle, stacks: &[ItemStack<'_>]) {
    let title = container
        .get(world)
        .and_then(|reference| world.form(reference.base))
        .map_or_else(|| format!("{:08X}", container.id()), |form| form.editor_id.clone());
    println!("{}", title.container_style());

    if stacks.is_empty() {
        println!("  {}", "(empty)".dim_style());
        return;
    }

    for stack in stacks {
        let mut line = format!("  {:>4} x {}", stack.count(), stack.name().item_style());
        line.push_str(&format!(" {}", format!("[{:?}]", stack.item_type()).field_style()));
        match stack.enchantment_type() {
            EnchantmentType::None => {},
            enchantment => line.push_str(&format!(" {}", format!("{enchantment:?}").enchant_style())),
        }
        if let Some(chance) = stack.pickpocket_chance() {
            line.push_str(&format!(" {}", format!("{chance}%").bold()));
        }
        if stack.is_stealing() == Some(true) {
            line.push_str(&format!(" {}", "STEAL".stolen_style()));
        }
        if stack.origin().is_dropped() {
            line.push_str(&format!(" {}", "(dropped)".dim_style()));
        }
        println!("{line}");
    }
}
