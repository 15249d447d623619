//! Episode execution: the stepping loop, snapshot delivery, the
//! locomotion task, and the parallel episode runner.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod listener;
pub mod locomotion;
pub mod runner;
pub mod step;

pub use error::EpisodeError;
pub use listener::{SnapshotListener, SnapshotLog};
pub use locomotion::{Locomotion, Outcome};
pub use runner::{BatchOutcome, EpisodeJob, EpisodeRunner};
pub use step::{advance_world, Robot};
