//! Opportunity board core: the repository over the persisted snapshot, the
//! status-grouped projection, and intent dispatch for presentation adapters.

pub mod board;
pub mod clock;
pub mod intent;
pub mod projector;
pub mod repository;

pub use board::{Board, BoardOptions, SAMPLE_OPPORTUNITIES};
pub use clock::{Clock, ManualClock, SystemClock};
pub use intent::{BoardIntent, Effect};
pub use projector::{project, BoardProjection, CardView, ColumnView, Segment};
pub use repository::{LoadState, OpportunityRepository};
