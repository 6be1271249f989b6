//! Background job dispatch.
//!
//! An in-process broker: submissions are validated, recorded as `PENDING` and
//! pushed onto a channel; a fixed pool of workers pulls one job at a time and
//! runs it under a wall-clock limit. Finished results are kept for a retention
//! window and then reported as `EXPIRED`.

pub mod queue;
pub mod spec;
pub mod store;

pub use queue::{JobQueue, JobSubmission};
pub use spec::{
    InstagramHashtagJob, InstagramPostsJob, InstagramProfileJob, JobSpec, TikTokHashtagJob,
    YouTubeSearchJob,
};
pub use store::{JobState, JobStatus, JobStore, EXPIRED_MESSAGE};
