use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::display::SnapshotView;

/// One labelled tile per secondary reading
pub struct DetailsPanel;

pub struct DetailsPanelProps<'a> {
    pub view: &'a SnapshotView,
}

impl Component<Action> for DetailsPanel {
    type Props<'a> = DetailsPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let view = props.view;
        let block = Block::bordered()
            .title(" Details ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let wind = match view.wind_direction {
            Some(direction) => format!("{} {}", view.wind_speed, direction),
            None => view.wind_speed.clone(),
        };
        let tiles = [
            ("Visibility", view.visibility.clone()),
            ("Humidity", view.humidity.clone()),
            ("Pressure", view.pressure.clone()),
            ("Feels Like", view.feels_like.clone()),
            ("Wind Speed", wind),
        ];

        let columns = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(inner);
        for ((label, value), column) in tiles.into_iter().zip(columns.iter()) {
            let lines = vec![
                Line::styled(label, Style::default().fg(Color::DarkGray)).centered(),
                Line::from(value).centered(),
            ];
            frame.render_widget(Paragraph::new(lines), *column);
        }
    }
}
