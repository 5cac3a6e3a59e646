//! Per-match metrics written by the CLI.

use guandan_engine::domain::match_state::DealRecord;
use guandan_engine::simulator::{SeatStats, TeamStats};
use guandan_engine::MatchResult;
use serde::Serialize;

/// Everything recorded about one simulated match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetrics {
    pub match_id: u32,
    pub seed: u64,
    pub seed_hex: String,
    pub timestamp: String,
    pub config: MatchSetup,
    pub result: MatchOutcomeMetrics,
    pub deals: Vec<DealMetrics>,
    pub teams: [TeamStats; 2],
    pub seats: Vec<SeatMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSetup {
    pub players: [String; 4],
    pub total_matches: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcomeMetrics {
    pub winner: u8,
    pub final_levels: [u8; 2],
    pub deals: u32,
    pub tricks: u32,
    pub tributes_paid: u32,
    pub tributes_skipped: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DealMetrics {
    pub deal_no: u32,
    pub level: u8,
    pub host_team: u8,
    pub winning_team: u8,
    pub victory: String,
    pub finishing_order: [u8; 4],
    pub tricks: u32,
    pub forced_end: bool,
    pub tribute: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMetrics {
    pub seat: u8,
    pub player: String,
    #[serde(flatten)]
    pub stats: SeatStats,
    pub avg_finish_rank: f64,
}

pub fn build_match_metrics(
    match_id: u32,
    players: [String; 4],
    total_matches: u32,
    result: &MatchResult,
) -> MatchMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));
    let stats = &result.statistics;

    let seats = (0..4)
        .map(|seat| SeatMetrics {
            seat: seat as u8,
            player: players[seat].clone(),
            stats: stats.seat_stats[seat].clone(),
            avg_finish_rank: avg_finish_rank(&stats.seat_stats[seat]),
        })
        .collect();

    MatchMetrics {
        match_id,
        seed: result.seed,
        seed_hex: hex::encode(result.seed.to_be_bytes()),
        timestamp,
        config: MatchSetup {
            players,
            total_matches,
        },
        result: MatchOutcomeMetrics {
            winner: result.winner.0,
            final_levels: result.final_levels,
            deals: stats.total_deals,
            tricks: stats.total_tricks,
            tributes_paid: stats.tributes_paid,
            tributes_skipped: stats.tributes_skipped,
            duration_ms: result.duration_ms(),
        },
        deals: result.history.iter().map(build_deal_metrics).collect(),
        teams: stats.team_stats.clone(),
        seats,
    }
}

fn build_deal_metrics(record: &DealRecord) -> DealMetrics {
    DealMetrics {
        deal_no: record.deal_no,
        level: record.level,
        host_team: record.host_team.0,
        winning_team: record.outcome.winning_team.0,
        victory: format!("{:?}", record.outcome.victory),
        finishing_order: record.outcome.finishing_order,
        tricks: record.tricks,
        forced_end: record.forced_end,
        tribute: record.tribute.as_ref().map(|t| format!("{:?}", t.status)),
    }
}

fn avg_finish_rank(stats: &SeatStats) -> f64 {
    let deals: u32 = stats.finish_ranks.iter().sum();
    if deals == 0 {
        return 0.0;
    }
    let weighted: u32 = stats
        .finish_ranks
        .iter()
        .enumerate()
        .map(|(i, &n)| (i as u32 + 1) * n)
        .sum();
    weighted as f64 / deals as f64
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub match_id: u32,
    pub seed: u64,
    pub winner: u8,
    pub team0_level: u8,
    pub team1_level: u8,
    pub deals: u32,
    pub tricks: u32,
    pub seat0_player: String,
    pub seat1_player: String,
    pub seat2_player: String,
    pub seat3_player: String,
    pub duration_ms: f64,
}

impl From<&MatchMetrics> for CsvSummaryRow {
    fn from(metrics: &MatchMetrics) -> Self {
        CsvSummaryRow {
            match_id: metrics.match_id,
            seed: metrics.seed,
            winner: metrics.result.winner,
            team0_level: metrics.result.final_levels[0],
            team1_level: metrics.result.final_levels[1],
            deals: metrics.result.deals,
            tricks: metrics.result.tricks,
            seat0_player: metrics.config.players[0].clone(),
            seat1_player: metrics.config.players[1].clone(),
            seat2_player: metrics.config.players[2].clone(),
            seat3_player: metrics.config.players[3].clone(),
            duration_ms: metrics.result.duration_ms,
        }
    }
}
