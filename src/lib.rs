pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod handicap;
pub mod services;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use clap::Parser;
use cli::Cli;
use serde::Serialize;
use std::path::Path;

use crate::config::{AppConfig, database_path};
use crate::database::SqliteLeague;
use crate::handicap::{EventId, PlayerId, RankMode, RoundId};
use crate::services::{HandicapService, LoadService, ServerService};

pub fn interpret() -> Cli {
    Cli::parse()
}

fn open_service(config: AppConfig) -> Result<HandicapService<SqliteLeague>> {
    let pool = database::create_pool(&database_path())?;
    Ok(HandicapService::new(SqliteLeague::new(pool), config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn handle_serve(port: u16, config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_load(path: &Path, config: AppConfig) -> Result<()> {
    LoadService::new(config).run(path, &database_path())
}

pub fn handle_index(player: PlayerId, as_of: Option<NaiveDate>, config: AppConfig) -> Result<()> {
    let service = open_service(config)?;
    let index = match as_of {
        Some(date) => service.index_as_of(player, date)?,
        None => service.current_index(player)?,
    };
    let index = index.ok_or_else(|| anyhow!("Player {} not found", player))?;
    print_json(&serde_json::json!({ "playerId": player, "asOf": as_of, "index": index }))
}

pub fn handle_trend(player: PlayerId, config: AppConfig) -> Result<()> {
    let service = open_service(config)?;
    let trend = service
        .trend(player)?
        .ok_or_else(|| anyhow!("Player {} not found", player))?;
    print_json(&trend)
}

pub fn handle_results(event: EventId, mode: RankMode, config: AppConfig) -> Result<()> {
    let service = open_service(config)?;
    let results = service
        .tournament_results(event, mode)?
        .ok_or_else(|| anyhow!("Event {} not found", event))?;
    print_json(&results.results)
}

pub fn handle_correct(
    score: RoundId,
    out_score: Option<i32>,
    in_score: Option<i32>,
    total_score: Option<i32>,
    config: AppConfig,
) -> Result<()> {
    let service = open_service(config)?;
    let player = service
        .correct_score(score, out_score, in_score, total_score)?
        .ok_or_else(|| anyhow!("Score {} not found", score))?;
    let index = service
        .current_index(player)?
        .ok_or_else(|| anyhow!("Player {} not found", player))?;
    print_json(&serde_json::json!({ "scoreId": score, "playerId": player, "currentIndex": index }))
}
