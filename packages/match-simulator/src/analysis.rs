//! Aggregate win rates across simulated matches.

use flate2::read::GzDecoder;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::metrics::MatchMetrics;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct WinStats {
    pub wins: u32,
    pub seats_played: u32,
    pub win_rate: f64,
}

#[derive(Default, Debug)]
pub struct Summary {
    pub matches: u32,
    pub team_wins: [u32; 2],
    pub total_deals: u32,
    /// Keyed by player kind; a seat counts as a win when its team won.
    pub by_player: BTreeMap<String, WinStats>,
}

impl Summary {
    pub fn add(&mut self, winner: u8, players: &[String], deals: u32) {
        self.matches += 1;
        self.total_deals += deals;
        if let Some(wins) = self.team_wins.get_mut(winner as usize) {
            *wins += 1;
        }
        for (seat, player) in players.iter().enumerate() {
            let entry = self.by_player.entry(player.clone()).or_default();
            entry.seats_played += 1;
            if seat % 2 == winner as usize {
                entry.wins += 1;
            }
        }
        for stat in self.by_player.values_mut() {
            stat.win_rate = (stat.wins as f64 / stat.seats_played as f64) * 100.0;
        }
    }

    pub fn add_metrics(&mut self, metrics: &MatchMetrics) {
        self.add(metrics.result.winner, &metrics.config.players, metrics.result.deals);
    }

    pub fn avg_deals(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.total_deals as f64 / self.matches as f64
        }
    }

    pub fn print(&self) {
        print!("{}", self.report());
    }

    /// Per-team and per-player win rates as printable text.
    pub fn report(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "\n=== Results by Team ===");
        for (team, wins) in self.team_wins.iter().enumerate() {
            let rate = if self.matches > 0 {
                (*wins as f64 / self.matches as f64) * 100.0
            } else {
                0.0
            };
            let _ = writeln!(out, "Team {team}: wins={wins} ({rate:.1}%)");
        }
        let _ = writeln!(out, "Average deals per match: {:.1}", self.avg_deals());

        let _ = writeln!(out, "\n=== Results by Player ===");
        for (player, stats) in &self.by_player {
            let _ = writeln!(
                out,
                "{player}: seats={}, wins={} ({:.1}%)",
                stats.seats_played, stats.wins, stats.win_rate
            );
        }
        out
    }
}

/// Rebuild a summary from a JSONL results file, gzipped or plain.
pub fn analyze_jsonl<P: AsRef<Path>>(path: P) -> Result<Summary, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let input: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut summary = Summary::default();
    for line in BufReader::new(input).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let game: Value = serde_json::from_str(&line)?;
        if let (Some(winner), Some(players)) = (
            game["result"]["winner"].as_u64(),
            game["config"]["players"].as_array(),
        ) {
            let players: Vec<String> = players
                .iter()
                .filter_map(|p| p.as_str().map(str::to_string))
                .collect();
            let deals = game["result"]["deals"].as_u64().unwrap_or(0) as u32;
            summary.add(winner as u8, &players, deals);
        }
    }
    Ok(summary)
}
