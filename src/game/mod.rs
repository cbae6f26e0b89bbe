pub mod alliance;
pub mod clock;
pub mod execution;
pub mod kernel;
pub mod player;
pub mod territory;

pub use alliance::{Alliance, AllianceRequest};
pub use clock::GameClock;
pub use execution::{Execution, ExecutionScheduler};
pub use kernel::Game;
pub use player::{Player, PlayerInfo};
