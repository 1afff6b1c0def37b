//! Domain layer for the tic-tac-toe service.
//!
//! This crate provides the core domain abstractions including:
//! - AggregateRoot trait and EventLog for event-recording entities
//! - DomainEvent trait for domain events
//! - Game aggregate with turn, bounds and win/draw rules
//! - Player aggregate with e-mail validation
//! - Persistence gateways and the command-dispatching GameService

pub mod aggregate;
pub mod error;
pub mod game;
pub mod player;
pub mod repository;
pub mod service;

pub use aggregate::{AggregateRoot, DomainEvent, EventLog};
pub use error::DomainError;
pub use game::{
    BOARD_SIZE, Game, GameError, GameEvent, GameResult, GameState, GameStatus, InvalidMark,
    JoinGame, Mark, Move, NewGame, PlaceMove,
};
pub use player::{Email, NewPlayer, Player, PlayerError, PlayerEvent};
pub use repository::{Games, Players};
pub use service::{GameService, build_envelopes};
