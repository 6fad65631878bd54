use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, ConditionsPanel, ConditionsPanelProps, DetailsPanel, DetailsPanelProps, LookupBar,
    LookupBarProps,
};
use crate::action::Action;
use crate::display::{DisplayModel, LookupView, SnapshotView, IDLE_HINT, LOADING_MESSAGE};
use crate::state::{AppState, Units};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for LookupDisplay - read-only view of state
pub struct LookupDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole lookup screen: input, status lines, result panels, help bar
#[derive(Default)]
pub struct LookupDisplay {
    bar: LookupBar,
}

impl LookupDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Keys that act on the lookup rather than on the text being typed.
pub fn commit_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::LookupSubmit),
        KeyCode::F(5) => Some(Action::LookupRefresh),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}

impl Component<Action> for LookupDisplay {
    type Props<'a> = LookupDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if let Some(action) = commit_action(key) {
                return vec![action];
            }
        }

        // Everything else is typing
        self.bar
            .handle_event(
                event,
                LookupBarProps {
                    query: &props.state.query,
                    fahrenheit: None,
                    is_focused: true,
                    on_query_change: Action::LookupQueryChange,
                    on_query_submit: |_| Action::LookupSubmit,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: LookupDisplayProps<'_>) {
        let state = props.state;
        let model = DisplayModel::from_state(state);

        let chunks = Layout::vertical([
            Constraint::Length(9), // Banner + input
            Constraint::Length(1), // Lookup status
            Constraint::Length(1), // Location banner
            Constraint::Min(0),    // Result panels
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        self.bar.render(
            frame,
            chunks[0],
            LookupBarProps {
                query: &state.query,
                fahrenheit: current_fahrenheit(state),
                is_focused: props.is_focused,
                on_query_change: Action::LookupQueryChange,
                on_query_submit: |_| Action::LookupSubmit,
            },
        );

        if let Some(status) = status_line(&model.lookup) {
            frame.render_widget(Paragraph::new(status), chunks[1]);
        }

        if let Some(message) = &model.location_error {
            frame.render_widget(Paragraph::new(error_line(message)), chunks[2]);
        }

        if let LookupView::Ready(view) = &model.lookup {
            render_results(frame, chunks[3], view);
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("F5", "refresh"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_results(frame: &mut Frame, area: Rect, view: &SnapshotView) {
    let chunks = Layout::vertical([
        Constraint::Length(6), // Conditions
        Constraint::Length(4), // Details
    ])
    .split(area);

    let mut conditions = ConditionsPanel;
    conditions.render(frame, chunks[0], ConditionsPanelProps { view });

    let mut details = DetailsPanel;
    details.render(frame, chunks[1], DetailsPanelProps { view });
}

fn status_line(view: &LookupView) -> Option<Line<'static>> {
    match view {
        LookupView::Idle => Some(
            Line::from(Span::styled(IDLE_HINT, Style::default().fg(Color::DarkGray))).centered(),
        ),
        LookupView::Loading { spinner } => Some(
            Line::from(vec![
                Span::styled(*spinner, Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(LOADING_MESSAGE, Style::default().fg(Color::Gray)),
            ])
            .centered(),
        ),
        LookupView::Error(message) => Some(error_line(message)),
        LookupView::Ready(_) => None,
    }
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(ERROR_ICON),
        Span::raw(" "),
        Span::styled(message.to_string(), Style::default().fg(Color::Red).bold()),
    ])
    .centered()
}

fn current_fahrenheit(state: &AppState) -> Option<f64> {
    let temp = state.lookup.snapshot()?.temperature;
    Some(match state.units {
        Units::Imperial => temp,
        Units::Metric => temp * 9.0 / 5.0 + 32.0,
    })
}
