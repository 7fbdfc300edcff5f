pub mod now_playing_poll;

pub use now_playing_poll::{
    CycleOutcome, DEFAULT_POLL_INTERVAL, PollState, run_detection_cycle, spawn_now_playing_poll_task,
};
