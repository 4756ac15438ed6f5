//! End-to-end tests through the meta crate: config, launch and the three
//! basic match outcomes.

use rps_escrow::prelude::*;

const A: AccountId = AccountId(1);
const B: AccountId = AccountId(2);

fn funded_ledger() -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    ledger.fund(A, 100).unwrap();
    ledger.fund(B, 100).unwrap();
    ledger
}

async fn play(handle: &EngineHandle, m1: Move, m2: Move) -> Receipt {
    let enrolled = handle.enroll(A, B, REQUIRED_STAKE).await.unwrap();
    let game_id = match enrolled.response() {
        Some(Response::Enrolled { game_id }) => *game_id,
        other => panic!("expected Enrolled, got {other:?}"),
    };
    handle.join_game(B, game_id, REQUIRED_STAKE).await.unwrap();
    handle.set_move(A, game_id, m1).await.unwrap();
    handle.set_move(B, game_id, m2).await.unwrap()
}

#[tokio::test]
async fn test_player1_wins() {
    let handle = launch(AppConfig::default(), funded_ledger());
    let receipt = play(&handle, Move::Rock, Move::Scissors).await;
    assert!(matches!(
        receipt.response(),
        Some(Response::Resolved { winner: Winner::Player { account: A }, .. })
    ));
    assert_eq!(handle.balance(A).await.unwrap(), 110);
    assert_eq!(handle.balance(B).await.unwrap(), 90);
}

#[tokio::test]
async fn test_player2_wins() {
    let handle = launch(AppConfig::default(), funded_ledger());
    let receipt = play(&handle, Move::Rock, Move::Paper).await;
    assert!(matches!(
        receipt.response(),
        Some(Response::Resolved { winner: Winner::Player { account: B }, .. })
    ));
    assert_eq!(handle.balance(A).await.unwrap(), 90);
    assert_eq!(handle.balance(B).await.unwrap(), 110);
}

#[tokio::test]
async fn test_tie_refunds_both() {
    let handle = launch(AppConfig::default(), funded_ledger());
    let receipt = play(&handle, Move::Scissors, Move::Scissors).await;
    assert!(matches!(
        receipt.response(),
        Some(Response::Resolved { winner: Winner::Tie, .. })
    ));
    assert_eq!(handle.balance(A).await.unwrap(), 100);
    assert_eq!(handle.balance(B).await.unwrap(), 100);
    assert_eq!(handle.holdings().await.unwrap().custody, 0);
}

#[tokio::test]
async fn test_self_play_follows_config() {
    let handle = launch(AppConfig::default(), funded_ledger());
    let r = handle.enroll(A, A, REQUIRED_STAKE).await.unwrap();
    assert_eq!(r.reason(), Some(RejectReason::SelfPlay));

    let config = AppConfig::from_json(r#"{ "engine": { "allow_self_play": true } }"#).unwrap();
    let handle = launch(config, funded_ledger());
    let r = handle.enroll(A, A, REQUIRED_STAKE).await.unwrap();
    assert!(r.is_applied());
}
