//! Catalog Admin TUI Library
//!
//! Exposes modules for testing

pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod services;
pub mod utils;

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for debug mode, set from `--debug`
pub static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Append a line to the debug log when debug mode is on
pub fn log_debug(msg: &str) {
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let _ = writeln!(file, "{}", msg);
    }
}

/// Catalog entity managed by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Banner,
    Course,
    Test,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Banner, Entity::Course, Entity::Test];

    /// Singular display name ("Banner", "Course", "Test")
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Banner => "Banner",
            Entity::Course => "Course",
            Entity::Test => "Test",
        }
    }

    /// Label used by the data browser selector
    pub fn listing_label(&self) -> &'static str {
        match self {
            Entity::Banner => "Banner",
            Entity::Course => "Courses",
            Entity::Test => "Tests",
        }
    }

    /// Name of the JSON part in multipart submissions
    pub fn part_name(&self) -> &'static str {
        match self {
            Entity::Banner => "banner",
            Entity::Course => "course",
            Entity::Test => "test",
        }
    }
}

/// Page sizes offered by the data browser
pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];
