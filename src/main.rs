//! # Warren Preview
//!
//! Generates one dungeon from the command line and prints it as ASCII art or
//! as a JSON summary of rooms and markers.

use clap::Parser;
use log::info;
use warren::generation::utils::create_rng;
use warren::{
    render_ascii, DungeonGenerator, GenerationConfig, Generator, Layer, Theme, WarrenResult,
};

/// Command line arguments for the dungeon preview.
#[derive(Parser, Debug)]
#[command(name = "warren-preview")]
#[command(about = "Generate and print a procedural dungeon layout")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation; omitted means a fresh random layout
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level theme (hotel, subway, hospital)
    #[arg(short, long, default_value = "hotel")]
    theme: Theme,

    /// Number of enemy rooms
    #[arg(long, default_value_t = 5)]
    enemy_rooms: usize,

    /// Number of transition rooms
    #[arg(long, default_value_t = 5)]
    transition_rooms: usize,

    /// Print a JSON summary instead of the ASCII map
    #[arg(long)]
    json: bool,

    /// Log filter (error, warn, info, debug, trace or env_logger directives)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> WarrenResult<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    info!("warren-preview v{}", warren::VERSION);

    let config = GenerationConfig {
        seed: args.seed,
        enemy_rooms: args.enemy_rooms,
        transition_rooms: args.transition_rooms,
        ..GenerationConfig::unseeded()
    };
    let generator = DungeonGenerator::for_theme(args.theme);
    let mut rng = create_rng(&config);

    info!("generating {} dungeon (seed {:?})", args.theme, config.seed);
    let dungeon = generator.generate(&config, &mut rng)?;
    generator.validate(&dungeon, &config)?;

    if args.json {
        let layers: Vec<_> = Layer::ALL
            .iter()
            .map(|layer| {
                serde_json::json!({
                    "layer": layer,
                    "cells": dungeon.grid.sorted_cells(*layer),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "theme": args.theme.name(),
            "seed": config.seed,
            "attempts": dungeon.attempts,
            "player_spawn": dungeon.player_spawn,
            "rooms": dungeon.rooms,
            "markers": dungeon.markers,
            "layers": layers,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_ascii(&dungeon.grid, &dungeon.markers));
        println!(
            "{} rooms, {} doors, {} attempts",
            dungeon.room_count(),
            dungeon.markers.doors.len(),
            dungeon.attempts
        );
    }

    Ok(())
}
