pub mod assessment;
pub mod financial;
pub mod gamification;
pub mod library;
pub mod media;
pub mod messaging;
pub mod progress;
pub mod session;
pub mod stats;
pub mod user;
pub mod workout;

pub use messaging::{ChatMessage, Conversation, Notification};
pub use progress::{EvolutionPoint, ProgressLog, ProgressRecord, SetEntry};
pub use session::{CompleteSessionRequest, WorkoutSession};
pub use user::{Role, User};
pub use workout::{Exercise, Routine, Workout, WorkoutDay};
