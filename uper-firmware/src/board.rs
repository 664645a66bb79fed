//! Board settings from board.toml (validated by build.rs)

include!(concat!(env!("OUT_DIR"), "/board.rs"));

/// SysTick rate used to poll interrupt re-arm deadlines
pub const REARM_TICK_HZ: u32 = 1_000;
