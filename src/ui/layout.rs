use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

use super::legend::{self, LegendContext};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top navigation bar area
    pub nav_area: Rect,
    /// Screen content area
    pub content_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, context: LegendContext) -> LayoutInfo {
    let legend_height = legend::calculate_legend_height(terminal_size.width, context);

    // Nav bar (top) + content + legend + status bar (bottom)
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Nav bar (3 lines: top border, text, bottom border)
            Constraint::Min(3),                // Screen content
            Constraint::Length(legend_height), // Legend area (exact fit for wrapped content)
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    LayoutInfo {
        nav_area: main_chunks[0],
        content_area: main_chunks[1],
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}

/// Rectangle of at most `width` x `height` centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_terminal() {
        let size = Rect::new(0, 0, 120, 40);
        let info = calculate_layout(size, LegendContext::Dashboard);
        assert_eq!(info.nav_area.height, 3);
        assert_eq!(info.status_area.height, 3);
        assert_eq!(info.status_area.y + 3, 40);
        assert_eq!(
            info.nav_area.height + info.content_area.height + info.legend_area.height + 3,
            40
        );
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered(area, 50, 4);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }
}
