use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::display::SnapshotView;

/// Location heading, current temperature, condition and the day's range
pub struct ConditionsPanel;

pub struct ConditionsPanelProps<'a> {
    pub view: &'a SnapshotView,
}

impl Component<Action> for ConditionsPanel {
    type Props<'a> = ConditionsPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let view = props.view;
        let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Temperature + condition
            Constraint::Length(1), // High / low
        ])
        .split(inner);

        let heading = Line::from(Span::styled(
            view.heading.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(heading), rows[0]);

        let current = Line::from(vec![
            Span::styled(
                view.temperature.clone(),
                Style::default().fg(Color::Rgb(253, 186, 116)).bold(),
            ),
            Span::raw("  "),
            Span::raw(view.glyph),
            Span::raw(" "),
            Span::styled(view.description.clone(), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(current), rows[2]);

        let range = Line::from(vec![
            Span::styled("High ", Style::default().fg(Color::DarkGray)),
            Span::raw(view.high.clone()),
            Span::styled("   Low ", Style::default().fg(Color::DarkGray)),
            Span::raw(view.low.clone()),
        ]);
        frame.render_widget(Paragraph::new(range), rows[3]);
    }
}
