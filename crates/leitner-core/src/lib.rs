//! leitner-core: card store, Leitner scheduler and review sessions.
//!
//! This crate owns the flashcard collection and every rule that moves a card
//! between the five Leitner boxes. Front ends talk to it through
//! [`store::CardStore`], the functions in [`scheduler`] and
//! [`session::ReviewSession`].

pub mod clock;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod store;
pub mod traits;

pub use error::{LeitnerError, Result};
pub use model::{BoxIndex, Card, CardUpdate, ALL_CATEGORIES};
pub use session::{ReviewResult, ReviewSession};
pub use store::CardStore;
