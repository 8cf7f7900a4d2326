use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use tracing::info;

use crate::api::ApiClient;
use crate::state::{Delta, FetchCommand, FetchOutcome};

/// Serves fetch commands on a background thread until either channel closes.
pub fn spawn_provider(
    api: ApiClient,
    tx: Sender<Delta>,
    cmd_rx: Receiver<FetchCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!(base = api.base(), "provider started");
        if tx
            .send(Delta::Log(format!("[INFO] Backend {}", api.base())))
            .is_err()
        {
            return;
        }
        while let Ok(cmd) = cmd_rx.recv() {
            let delta = run_command(&api, cmd);
            if tx.send(delta).is_err() {
                break;
            }
        }
        info!("provider stopped");
    })
}

/// Performs one GET and wraps the reply with the generation it was issued for.
pub fn run_command(api: &ApiClient, cmd: FetchCommand) -> Delta {
    match cmd {
        FetchCommand::Roster { generation } => Delta::Roster {
            generation,
            outcome: FetchOutcome::from_result(
                api.roster()
                    .map(|roster| (!roster.is_empty()).then_some(roster)),
            ),
        },
        FetchCommand::Overview { generation, query } => Delta::Overview {
            generation,
            outcome: FetchOutcome::from_result(api.overview(&query)),
        },
        FetchCommand::PunchCard { generation, query } => Delta::PunchCard {
            generation,
            outcome: FetchOutcome::from_result(api.punch_card(&query)),
        },
        FetchCommand::RankingGraph { generation, query } => Delta::RankingGraph {
            generation,
            outcome: FetchOutcome::from_result(api.ranking_graph(&query)),
        },
        FetchCommand::Leaderboard { generation, query } => Delta::Leaderboard {
            generation,
            outcome: FetchOutcome::from_result(api.leaderboard(&query)),
        },
    }
}
