//! Plot rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::app::App;

/// Draw the plot with a one-line footer underneath.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Plot
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_chart(frame, chunks[0], app);
    draw_footer(frame, chunks[1]);
}

/// The plot itself: the query as the title, white axes, the series in red
/// with dot markers. An empty series draws as an empty plot.
fn draw_chart(frame: &mut Frame, area: Rect, app: &App) {
    let points = app.points();
    let [x_min, x_max] = app.x_bounds();
    let [y_min, y_max] = app.y_bounds();

    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Red))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(Span::styled(
                    app.query.clone(),
                    Style::default().fg(Color::White),
                )),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::White))
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::raw(format!("{x_min:.0}")),
                    Span::raw(format!("{x_max:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::White))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{y_min:.2}")),
                    Span::raw(format!("{y_max:.2}")),
                ]),
        );

    frame.render_widget(chart, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled(" [q]", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
        Span::styled(
            "last 15m, 15s resolution, refreshed every 15s",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}
