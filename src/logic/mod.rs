//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - auth: Login gate credential check
//! - errors: Error classification (not found vs. everything else)
//! - formatting: Prices, dates and record text for display
//! - navigation: Wrapping selection for menus, lists and form focus
//! - outcome: Maps backend replies to the banner shown on each screen
//! - pagination: Pager window and button enablement
//! - records: Lookup checks and listing column fallbacks
//! - ui: Toast timing and small UI transitions
//! - validation: Form validation and payload building

pub mod auth;
pub mod errors;
pub mod formatting;
pub mod navigation;
pub mod outcome;
pub mod pagination;
pub mod records;
pub mod ui;
pub mod validation;
