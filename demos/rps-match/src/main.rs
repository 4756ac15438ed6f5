use rand::Rng;
use rps_escrow::prelude::*;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

const ALICE: AccountId = AccountId(1);
const BOB: AccountId = AccountId(2);
const STARTING_BALANCE: u64 = 1_000;

fn funded_ledger() -> Result<InMemoryLedger, RpsEscrowError> {
    let mut ledger = InMemoryLedger::new();
    ledger.fund(ALICE, STARTING_BALANCE)?;
    ledger.fund(BOB, STARTING_BALANCE)?;
    Ok(ledger)
}

fn random_move(rng: &mut impl Rng) -> Move {
    Move::PLAYABLE[rng.random_range(0..Move::PLAYABLE.len())]
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

fn print_receipt(receipt: &Receipt) {
    match serde_json::to_string(receipt) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "failed to encode receipt"),
    }
}

/// Plays one full match and returns the settling receipt.
async fn play(
    handle: &EngineHandle,
    move1: Move,
    move2: Move,
) -> Result<Receipt, RpsEscrowError> {
    let enrolled = handle.enroll(ALICE, BOB, REQUIRED_STAKE).await?;
    print_receipt(&enrolled);
    let Some(Response::Enrolled { game_id }) = enrolled.response().cloned() else {
        return Ok(enrolled);
    };

    for receipt in [
        handle.join_game(BOB, game_id, REQUIRED_STAKE).await?,
        handle.set_move(ALICE, game_id, move1).await?,
    ] {
        print_receipt(&receipt);
    }

    let settled = handle.set_move(BOB, game_id, move2).await?;
    print_receipt(&settled);
    Ok(settled)
}

async fn run(config: AppConfig, random_rounds: usize) -> Result<EngineHandle, RpsEscrowError> {
    let handle = launch(config, funded_ledger()?);

    // Player 1 wins, player 2 wins, tie.
    for (m1, m2) in [
        (Move::Rock, Move::Scissors),
        (Move::Rock, Move::Paper),
        (Move::Paper, Move::Paper),
    ] {
        play(&handle, m1, m2).await?;
    }

    for _ in 0..random_rounds {
        let (m1, m2) = {
            let mut rng = rand::rng();
            (random_move(&mut rng), random_move(&mut rng))
        };
        play(&handle, m1, m2).await?;
    }

    print_receipt(&handle.my_games(ALICE).await?);
    Ok(handle)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rps_escrow::telemetry::init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let handle = run(config, 5).await?;
    let holdings = handle.holdings().await?;
    tracing::info!(
        alice = handle.balance(ALICE).await?,
        bob = handle.balance(BOB).await?,
        custody = holdings.custody,
        "all matches settled"
    );
    handle.shutdown().await?;
    Ok(())
}
