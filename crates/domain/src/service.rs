//! Command dispatch for games and players.
//!
//! Every command follows the same path: load, mutate, persist, drain the
//! recorded events, wrap them in envelopes and publish them. A command the
//! domain rejects is neither persisted nor published.

use common::{GameId, PlayerId};
use game_store::{EventBus, EventEnvelope, EventId, GameStore, PlayerStore};

use crate::aggregate::{AggregateRoot, DomainEvent};
use crate::error::DomainError;
use crate::game::{Game, GameState, JoinGame, Move, NewGame, PlaceMove};
use crate::player::{Email, NewPlayer, Player};
use crate::repository::{Games, Players};

/// Service for managing games and players.
///
/// Provides a high-level API over the persistence gateways and the event
/// bus, one method per command.
pub struct GameService<G: GameStore, P: PlayerStore, B: EventBus> {
    games: Games<G>,
    players: Players<P>,
    bus: B,
}

impl<G, P, B> GameService<G, P, B>
where
    G: GameStore,
    P: PlayerStore,
    B: EventBus,
{
    /// Creates a new service over the given stores and bus.
    pub fn new(game_store: G, player_store: P, bus: B) -> Self {
        Self {
            games: Games::new(game_store),
            players: Players::new(player_store),
            bus,
        }
    }

    /// Returns the game gateway.
    pub fn games(&self) -> &Games<G> {
        &self.games
    }

    /// Returns the player gateway.
    pub fn players(&self) -> &Players<P> {
        &self.players
    }

    /// Returns the event bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Registers a player.
    #[tracing::instrument(skip(self))]
    pub async fn new_player(&self, cmd: NewPlayer) -> Result<PlayerId, DomainError> {
        let email = Email::parse(&cmd.email).inspect_err(|error| {
            tracing::warn!(%error, "player registration rejected");
        })?;

        let mut player = Player::new(self.players.next_identity(), email);
        self.players.persist(&player).await?;
        metrics::counter!("players_created_total").increment(1);

        self.publish(&mut player).await?;

        tracing::info!(player_id = %player.id(), "player created");
        Ok(player.id().clone())
    }

    /// Creates a new game without players.
    #[tracing::instrument(skip(self))]
    pub async fn new_game(&self, _cmd: NewGame) -> Result<GameId, DomainError> {
        let mut game = Game::new(self.games.next_identity());
        self.games.persist(&mut game).await?;
        metrics::counter!("games_created_total").increment(1);

        self.publish(&mut game).await?;

        tracing::info!(game_id = %game.id(), "game created");
        Ok(game.id().clone())
    }

    /// Seats a registered player in a game.
    #[tracing::instrument(skip(self))]
    pub async fn join_game(&self, cmd: JoinGame) -> Result<(), DomainError> {
        if self.players.by_id(&cmd.player_id).await?.is_none() {
            return Err(DomainError::PlayerNotFound(cmd.player_id));
        }
        let mut game = self.load_game(&cmd.game_id).await?;

        game.player_join(cmd.player_id).inspect_err(|error| {
            tracing::warn!(%error, "join rejected");
        })?;

        self.games.persist(&mut game).await?;
        metrics::counter!("players_joined_total").increment(1);

        self.publish(&mut game).await
    }

    /// Places a move and returns the resulting game state.
    #[tracing::instrument(skip(self))]
    pub async fn place_move(&self, cmd: PlaceMove) -> Result<GameState, DomainError> {
        let mut game = self.load_game(&cmd.game_id).await?;

        let mv = Move::new(
            self.games.next_move_identity(),
            cmd.game_id,
            cmd.player_id,
            cmd.row,
            cmd.column,
            cmd.mark,
        );

        let state = game.place(mv).inspect_err(|error| {
            metrics::counter!("moves_rejected_total").increment(1);
            tracing::warn!(%error, "placement rejected");
        })?;

        self.games.persist(&mut game).await?;
        metrics::counter!("moves_placed_total").increment(1);

        if state.is_ended() {
            metrics::counter!("games_ended_total", "outcome" => state.status.as_str())
                .increment(1);
            tracing::info!(
                game_id = %game.id(),
                status = %state.status,
                winner = ?state.winner,
                "game ended"
            );
        }

        self.publish(&mut game).await?;
        Ok(state)
    }

    /// Loads a game by ID.
    ///
    /// Returns None if the game doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn game(&self, game_id: GameId) -> Result<Option<Game>, DomainError> {
        self.games.by_id(&game_id).await
    }

    async fn load_game(&self, game_id: &GameId) -> Result<Game, DomainError> {
        self.games
            .by_id(game_id)
            .await?
            .ok_or_else(|| DomainError::GameNotFound(game_id.clone()))
    }

    /// Drains the aggregate's events and hands them to the bus.
    async fn publish<A>(&self, aggregate: &mut A) -> Result<(), DomainError>
    where
        A: AggregateRoot,
    {
        let events = aggregate.drain_events();
        if events.is_empty() {
            return Ok(());
        }

        let envelopes = build_envelopes(&*aggregate, &events)?;
        let count = envelopes.len() as u64;
        self.bus.publish_all(envelopes).await?;
        metrics::counter!("events_published_total").increment(count);

        Ok(())
    }
}

/// Wraps drained events for publication, preserving their order.
///
/// Envelopes from one batch share a `correlation_id` and carry their
/// `sequence` within it.
pub fn build_envelopes<A: AggregateRoot>(
    aggregate: &A,
    events: &[A::Event],
) -> Result<Vec<EventEnvelope>, DomainError> {
    let correlation_id = EventId::new().to_string();

    events
        .iter()
        .enumerate()
        .map(|(sequence, event)| {
            EventEnvelope::builder()
                .event_type(event.event_type())
                .aggregate_id(aggregate.aggregate_id())
                .aggregate_type(A::aggregate_type())
                .timestamp(event.occurred_at())
                .metadata("correlation_id", serde_json::json!(correlation_id))
                .metadata("sequence", serde_json::json!(sequence))
                .payload(event)?
                .try_build()
                .ok_or(DomainError::IncompleteEnvelope {
                    event_type: event.event_type(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameError, GameStatus, Mark};
    use crate::player::PlayerError;
    use game_store::{InMemoryEventBus, InMemoryGameStore, InMemoryPlayerStore};

    type Service = GameService<InMemoryGameStore, InMemoryPlayerStore, InMemoryEventBus>;

    fn service() -> (Service, InMemoryEventBus) {
        let bus = InMemoryEventBus::new();
        let service = GameService::new(
            InMemoryGameStore::new(),
            InMemoryPlayerStore::new(),
            bus.clone(),
        );
        (service, bus)
    }

    async fn seated_game(service: &Service) -> (GameId, PlayerId, PlayerId) {
        let p1 = service
            .new_player(NewPlayer::new("one@example.com"))
            .await
            .unwrap();
        let p2 = service
            .new_player(NewPlayer::new("two@example.com"))
            .await
            .unwrap();
        let game_id = service.new_game(NewGame::new()).await.unwrap();
        service
            .join_game(JoinGame::new(game_id.clone(), p1.clone()))
            .await
            .unwrap();
        service
            .join_game(JoinGame::new(game_id.clone(), p2.clone()))
            .await
            .unwrap();
        (game_id, p1, p2)
    }

    #[tokio::test]
    async fn test_new_player() {
        let (service, bus) = service();

        let id = service
            .new_player(NewPlayer::new(" ada@example.com "))
            .await
            .unwrap();

        let player = service.players().by_id(&id).await.unwrap().unwrap();
        assert_eq!(player.email().as_str(), "ada@example.com");
        assert_eq!(bus.published_of_type("NewPlayerCreated").await.len(), 1);
    }

    #[tokio::test]
    async fn test_new_player_rejects_invalid_email() {
        let (service, bus) = service();

        let result = service.new_player(NewPlayer::new("nope")).await;

        assert!(matches!(
            result,
            Err(DomainError::Player(PlayerError::InvalidEmail { .. }))
        ));
        assert_eq!(bus.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_new_game() {
        let (service, bus) = service();

        let id = service.new_game(NewGame::new()).await.unwrap();

        let game = service.game(id.clone()).await.unwrap().unwrap();
        assert!(game.board_is_empty());
        let published = bus.published().await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_type, "NewGameCreated");
        assert_eq!(published[0].aggregate_type, "Game");
        assert_eq!(published[0].aggregate_id, id.as_str());
    }

    #[tokio::test]
    async fn test_join_requires_existing_player_and_game() {
        let (service, _) = service();
        let game_id = service.new_game(NewGame::new()).await.unwrap();

        let result = service
            .join_game(JoinGame::new(game_id, PlayerId::of("ghost")))
            .await;
        assert!(matches!(result, Err(DomainError::PlayerNotFound(_))));

        let player = service
            .new_player(NewPlayer::new("ada@example.com"))
            .await
            .unwrap();
        let result = service
            .join_game(JoinGame::new(GameId::of("missing"), player))
            .await;
        assert!(matches!(result, Err(DomainError::GameNotFound(_))));
    }

    #[tokio::test]
    async fn test_rejected_join_publishes_nothing() {
        let (service, bus) = service();
        let (game_id, _, _) = seated_game(&service).await;
        let p3 = service
            .new_player(NewPlayer::new("three@example.com"))
            .await
            .unwrap();
        bus.clear().await;

        let result = service.join_game(JoinGame::new(game_id.clone(), p3)).await;

        assert!(matches!(result, Err(DomainError::Game(GameError::GameFull))));
        assert_eq!(bus.event_count().await, 0);
        let game = service.game(game_id).await.unwrap().unwrap();
        assert!(game.is_full());
    }

    #[tokio::test]
    async fn test_place_move_persists_and_publishes() {
        let (service, bus) = service();
        let (game_id, p1, p2) = seated_game(&service).await;
        bus.clear().await;

        let state = service
            .place_move(PlaceMove::new(game_id.clone(), p1, 1, 1, Mark::X))
            .await
            .unwrap();

        assert_eq!(state.status, GameStatus::InProgress);
        let game = service.game(game_id).await.unwrap().unwrap();
        assert_eq!(game.moves().len(), 1);
        assert_eq!(game.current_player(), Some(&p2));
        assert_eq!(bus.published_of_type("PlayerMoved").await.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_move_is_not_persisted() {
        let (service, bus) = service();
        let (game_id, _, p2) = seated_game(&service).await;
        bus.clear().await;

        let result = service
            .place_move(PlaceMove::new(game_id.clone(), p2, 0, 0, Mark::O))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Game(GameError::NotPlayersTurn { .. }))
        ));
        let game = service.game(game_id).await.unwrap().unwrap();
        assert!(game.board_is_empty());
        assert_eq!(bus.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_place_move_on_missing_game() {
        let (service, _) = service();

        let result = service
            .place_move(PlaceMove::new(
                GameId::of("missing"),
                PlayerId::of("p1"),
                0,
                0,
                Mark::X,
            ))
            .await;

        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "Game with id missing does not exist");
    }

    #[tokio::test]
    async fn test_winning_move_publishes_game_ended() {
        let (service, bus) = service();
        let (game_id, p1, p2) = seated_game(&service).await;

        for (player, row, column, mark) in [
            (&p1, 0, 0, Mark::X),
            (&p2, 1, 0, Mark::O),
            (&p1, 0, 1, Mark::X),
            (&p2, 1, 1, Mark::O),
        ] {
            service
                .place_move(PlaceMove::new(
                    game_id.clone(),
                    player.clone(),
                    row,
                    column,
                    mark,
                ))
                .await
                .unwrap();
        }
        bus.clear().await;

        let state = service
            .place_move(PlaceMove::new(game_id, p1.clone(), 0, 2, Mark::X))
            .await
            .unwrap();

        assert_eq!(state.status, GameStatus::HorizontalWin);
        assert_eq!(state.winner, Some(p1));
        let types: Vec<String> = bus
            .published()
            .await
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["PlayerMoved", "GameEnded"]);
    }

    #[test]
    fn build_envelopes_preserves_order() {
        let mut game = Game::new(GameId::of("g"));
        game.player_join(PlayerId::of("p1")).unwrap();
        let events = game.drain_events();

        let envelopes = build_envelopes(&game, &events).unwrap();

        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].event_type, "NewGameCreated");
        assert_eq!(envelopes[1].event_type, "PlayerJoined");
        assert_eq!(envelopes[1].payload["type"], "PlayerJoined");
        assert_eq!(envelopes[1].payload["data"]["player_id"], "p1");
        assert_eq!(envelopes[1].timestamp, events[1].occurred_at());
    }

    #[test]
    fn build_envelopes_correlates_one_batch() {
        let mut game = Game::new(GameId::of("g"));
        game.player_join(PlayerId::of("p1")).unwrap();
        game.player_join(PlayerId::of("p2")).unwrap();
        let events = game.drain_events();

        let envelopes = build_envelopes(&game, &events).unwrap();
        let next_batch = build_envelopes(&game, &events[..1]).unwrap();

        let correlation = &envelopes[0].metadata["correlation_id"];
        assert!(correlation.is_string());
        assert!(
            envelopes
                .iter()
                .all(|e| &e.metadata["correlation_id"] == correlation)
        );
        assert_ne!(&next_batch[0].metadata["correlation_id"], correlation);

        let sequences: Vec<u64> = envelopes
            .iter()
            .map(|e| e.metadata["sequence"].as_u64().unwrap())
            .collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }
}
