//! Integration tests for the Game aggregate and the game service.
//!
//! These tests drive whole games through the service and verify
//! persistence, rehydration, concurrency handling and the published
//! event trail.

use std::sync::Arc;

use common::{GameId, PlayerId};
use domain::{
    DomainError, GameError, GameService, GameState, GameStatus, JoinGame, Mark, NewGame,
    NewPlayer, PlaceMove,
};
use game_store::{
    GameStore, InMemoryEventBus, InMemoryGameStore, InMemoryPlayerStore, StoreError, Version,
};

type Service = GameService<InMemoryGameStore, InMemoryPlayerStore, InMemoryEventBus>;

struct Fixture {
    service: Service,
    games: InMemoryGameStore,
    bus: InMemoryEventBus,
}

fn create_fixture() -> Fixture {
    let games = InMemoryGameStore::new();
    let bus = InMemoryEventBus::new();
    let service = GameService::new(games.clone(), InMemoryPlayerStore::new(), bus.clone());
    Fixture {
        service,
        games,
        bus,
    }
}

async fn register(service: &Service, email: &str) -> PlayerId {
    service.new_player(NewPlayer::new(email)).await.unwrap()
}

async fn start_game(service: &Service) -> (GameId, PlayerId, PlayerId) {
    let p1 = register(service, "one@example.com").await;
    let p2 = register(service, "two@example.com").await;
    let game_id = service.new_game(NewGame::new()).await.unwrap();
    for player in [&p1, &p2] {
        service
            .join_game(JoinGame::new(game_id.clone(), player.clone()))
            .await
            .unwrap();
    }
    (game_id, p1, p2)
}

async fn play(
    service: &Service,
    game_id: &GameId,
    players: [&PlayerId; 2],
    cells: &[(i32, i32)],
) -> Result<GameState, DomainError> {
    let mut state = None;
    for (turn, (row, column)) in cells.iter().copied().enumerate() {
        let mark = if turn % 2 == 0 { Mark::X } else { Mark::O };
        let cmd = PlaceMove::new(
            game_id.clone(),
            players[turn % 2].clone(),
            row,
            column,
            mark,
        );
        state = Some(service.place_move(cmd).await?);
    }
    Ok(state.unwrap_or_else(GameState::in_progress))
}

mod game_lifecycle {
    use super::*;

    #[tokio::test]
    async fn horizontal_win_for_player_one() {
        let fixture = create_fixture();
        let (game_id, p1, p2) = start_game(&fixture.service).await;

        let state = play(
            &fixture.service,
            &game_id,
            [&p1, &p2],
            &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)],
        )
        .await
        .unwrap();

        assert_eq!(state.status, GameStatus::HorizontalWin);
        assert_eq!(state.winner, Some(p1));
    }

    #[tokio::test]
    async fn draw_fills_the_board() {
        let fixture = create_fixture();
        let (game_id, p1, p2) = start_game(&fixture.service).await;

        let state = play(
            &fixture.service,
            &game_id,
            [&p1, &p2],
            &[
                (0, 0),
                (1, 1),
                (0, 1),
                (0, 2),
                (2, 0),
                (1, 0),
                (1, 2),
                (2, 1),
                (2, 2),
            ],
        )
        .await
        .unwrap();

        assert_eq!(state.status, GameStatus::Draw);
        assert!(state.winner.is_none());

        let game = fixture.service.game(game_id).await.unwrap().unwrap();
        assert!(game.board_is_full());
        assert_eq!(game.moves_from_board().len(), 9);
    }

    #[tokio::test]
    async fn finished_game_stays_closed_after_reload() {
        let fixture = create_fixture();
        let (game_id, p1, p2) = start_game(&fixture.service).await;
        play(
            &fixture.service,
            &game_id,
            [&p1, &p2],
            &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)],
        )
        .await
        .unwrap();

        let result = fixture
            .service
            .place_move(PlaceMove::new(game_id.clone(), p2, 2, 0, Mark::O))
            .await;

        assert!(matches!(result, Err(DomainError::Game(GameError::GameEnded))));
        let game = fixture.service.game(game_id).await.unwrap().unwrap();
        assert_eq!(game.state().status, GameStatus::DiagonalWin);
        assert_eq!(game.moves().len(), 5);
    }

    #[tokio::test]
    async fn reloaded_game_knows_whose_turn_it_is() {
        let fixture = create_fixture();
        let (game_id, p1, p2) = start_game(&fixture.service).await;

        play(&fixture.service, &game_id, [&p1, &p2], &[(0, 0), (2, 2), (1, 1)])
            .await
            .unwrap();

        let game = fixture.service.game(game_id).await.unwrap().unwrap();
        assert_eq!(game.current_player(), Some(&p2));
        assert_eq!(game.version(), Version::new(6));
    }
}

mod event_trail {
    use super::*;

    #[tokio::test]
    async fn full_game_publishes_every_event_in_order() {
        let fixture = create_fixture();
        let (game_id, p1, p2) = start_game(&fixture.service).await;

        play(
            &fixture.service,
            &game_id,
            [&p1, &p2],
            &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)],
        )
        .await
        .unwrap();

        let game_events: Vec<String> = fixture
            .bus
            .published()
            .await
            .into_iter()
            .filter(|e| e.aggregate_id == game_id.as_str())
            .map(|e| e.event_type)
            .collect();

        assert_eq!(
            game_events,
            vec![
                "NewGameCreated",
                "PlayerJoined",
                "PlayerJoined",
                "PlayerMoved",
                "PlayerMoved",
                "PlayerMoved",
                "PlayerMoved",
                "PlayerMoved",
                "GameEnded",
            ]
        );
        assert_eq!(
            fixture.bus.published_of_type("NewPlayerCreated").await.len(),
            2
        );
    }

    #[tokio::test]
    async fn rejoin_is_announced_again() {
        let fixture = create_fixture();
        let (game_id, p1, _) = start_game(&fixture.service).await;
        fixture.bus.clear().await;

        fixture
            .service
            .join_game(JoinGame::new(game_id, p1.clone()))
            .await
            .unwrap();

        let joined = fixture.bus.published_of_type("PlayerJoined").await;
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].payload["data"]["player_id"], p1.as_str());
    }
}

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn stale_writer_is_rejected() {
        let fixture = create_fixture();
        let (game_id, _, _) = start_game(&fixture.service).await;

        let mut record = fixture.games.load(&game_id).await.unwrap().unwrap();
        let stale = record.version;
        record.moves.clear();
        fixture.games.save(record.clone(), stale).await.unwrap();

        let result = fixture.games.save(record, stale).await;
        assert!(matches!(
            result,
            Err(StoreError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn concurrent_placements_leave_a_consistent_game() {
        let fixture = create_fixture();
        let (game_id, p1, _) = start_game(&fixture.service).await;
        let service = Arc::new(fixture.service);

        // Player one races itself for two cells; at most one may land.
        let handles: Vec<_> = [(0, 0), (2, 2)]
            .into_iter()
            .map(|(row, column)| {
                let service = Arc::clone(&service);
                let cmd = PlaceMove::new(game_id.clone(), p1.clone(), row, column, Mark::X);
                tokio::spawn(async move { service.place_move(cmd).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(DomainError::Game(GameError::NotPlayersTurn { .. }))
                | Err(DomainError::Store(StoreError::ConcurrencyConflict { .. })) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(accepted, 1);
        let game = service.game(game_id).await.unwrap().unwrap();
        assert_eq!(game.moves().len(), 1);
    }
}

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn non_member_cannot_move() {
        let fixture = create_fixture();
        let (game_id, _, _) = start_game(&fixture.service).await;
        let outsider = register(&fixture.service, "three@example.com").await;

        let result = fixture
            .service
            .place_move(PlaceMove::new(game_id, outsider.clone(), 0, 0, Mark::X))
            .await;

        let error = result.unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("Player with id: {outsider} is not part of the game")
        );
    }

    #[tokio::test]
    async fn out_of_bounds_and_occupied_cells() {
        let fixture = create_fixture();
        let (game_id, p1, p2) = start_game(&fixture.service).await;

        for (row, column, message) in [
            (3, 0, "Row is out of bounds"),
            (-1, 0, "Row is out of bounds"),
            (0, 3, "Column is out of bounds"),
        ] {
            let error = fixture
                .service
                .place_move(PlaceMove::new(game_id.clone(), p1.clone(), row, column, Mark::X))
                .await
                .unwrap_err();
            assert_eq!(error.to_string(), message);
        }

        fixture
            .service
            .place_move(PlaceMove::new(game_id.clone(), p1, 1, 1, Mark::X))
            .await
            .unwrap();
        let error = fixture
            .service
            .place_move(PlaceMove::new(game_id, p2, 1, 1, Mark::O))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Cell is not empty");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let fixture = create_fixture();
        register(&fixture.service, "ada@example.com").await;

        let result = fixture
            .service
            .new_player(NewPlayer::new("ADA@example.com"))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Store(StoreError::DuplicateEmail { .. }))
        ));
    }

    #[tokio::test]
    async fn third_player_is_turned_away() {
        let fixture = create_fixture();
        let (game_id, _, _) = start_game(&fixture.service).await;
        let p3 = register(&fixture.service, "three@example.com").await;

        let error = fixture
            .service
            .join_game(JoinGame::new(game_id, p3))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Game is full");
    }
}
