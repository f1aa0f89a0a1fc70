// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (nav bar, content, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - nav_bar: Renders top bar (brand, current screen, signed-in user)
// - login: Renders the login gate
// - dashboard: Renders the screen menu
// - form: Renders input forms and alert banners
// - entity_screens: Renders add, modify and delete screens
// - record_card: Renders the summary of a fetched record
// - data_table: Renders the data browser table and pager
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar
// - dialogs: Renders delete confirmation and record details popups
// - toast: Renders toast notifications (brief pop-up messages)

pub mod dashboard;
pub mod data_table;
pub mod dialogs;
pub mod entity_screens;
pub mod form;
pub mod layout;
pub mod legend;
pub mod login;
pub mod nav_bar;
pub mod record_card;
pub mod render;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
