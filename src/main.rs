//! Weather lookup TUI

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_lookup::action::Action;
use weather_lookup::api::{OpenWeatherClient, OPENWEATHER_ENDPOINT};
use weather_lookup::components::{Component, LookupDisplay, LookupDisplayProps};
use weather_lookup::config::LookupConfig;
use weather_lookup::effect::Effect;
use weather_lookup::geolocation::LocationSource;
use weather_lookup::reducer::reducer;
use weather_lookup::state::{AppState, Units, SPINNER_TICK_MS};

/// Weather lookup - current conditions for a city or your location
#[derive(Parser, Debug)]
#[command(name = "weather-lookup")]
#[command(about = "Look up current weather conditions from OpenWeatherMap")]
struct Args {
    /// City to look up at startup (skips location lookup)
    #[arg(long, short)]
    city: Option<String>,

    /// Measurement system requested from the provider
    #[arg(long, value_enum, default_value = "imperial")]
    units: Units,

    /// OpenWeatherMap API key (defaults to $OPENWEATHER_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Current-weather endpoint
    #[arg(long, default_value = OPENWEATHER_ENDPOINT)]
    endpoint: String,

    /// Fixed latitude to use as "current location"
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Fixed longitude to use as "current location"
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Don't try to determine the current location
    #[arg(long)]
    no_locate: bool,

    /// IP geolocation endpoint (ip-api compatible)
    #[arg(long)]
    locate_endpoint: Option<String>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum LookupComponentId {
    Lookup,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum LookupContext {
    Main,
}

impl EventRoutingState<LookupComponentId, LookupContext> for AppState {
    fn focused(&self) -> Option<LookupComponentId> {
        Some(LookupComponentId::Lookup)
    }

    fn modal(&self) -> Option<LookupComponentId> {
        None
    }

    fn binding_context(&self, _id: LookupComponentId) -> LookupContext {
        LookupContext::Main
    }

    fn default_context(&self) -> LookupContext {
        LookupContext::Main
    }
}

/// Long-lived clients handed to the effect handler
struct Services {
    weather: OpenWeatherClient,
    location: LocationSource,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = LookupConfig {
        api_key: LookupConfig::resolve_api_key(args.api_key),
        endpoint: LookupConfig::parse_endpoint(&args.endpoint).map_err(io::Error::other)?,
        units: args.units,
        location: LookupConfig::location_source(
            args.lat,
            args.lon,
            args.no_locate,
            args.locate_endpoint,
        ),
    };
    if config.api_key.is_empty() {
        tracing::warn!("no API key configured; requests will be rejected by the provider");
    }
    tracing::info!(units = config.units.as_param(), location = ?config.location, "starting");

    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let units = config.units;
    let city = args.city;
    let init_action = if city.is_some() {
        Action::LookupSubmit
    } else {
        Action::LocationRequest
    };

    let state = debug
        .load_state_or_else_async(move || async move {
            let state = match city {
                Some(city) => AppState::with_query(units, city),
                None => AppState::new(units),
            };
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let services = Services {
        weather: config.weather_client(),
        location: config.location.clone(),
    };

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        services,
        init_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// The terminal belongs to the UI, so logs only go to a file when asked for.
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct LookupUi {
    display: LookupDisplay,
}

impl LookupUi {
    fn new() -> Self {
        Self {
            display: LookupDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<LookupComponentId>,
    ) {
        event_ctx.set_component_area(LookupComponentId::Lookup, area);

        let props = LookupDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = LookupDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    services: Services,
    init_action: Action,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(LookupUi::new()));
    let mut bus: EventBus<AppState, Action, LookupComponentId, LookupContext> = EventBus::new();
    let keybindings: Keybindings<LookupContext> = Keybindings::new();

    let ui_lookup = Rc::clone(&ui);
    bus.register(LookupComponentId::Lookup, move |event, state| {
        ui_lookup.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(init_action),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &services),
        )
        .await
}

/// Handle effects by spawning tasks. Every task resolves to exactly one
/// result action, so a lookup can't stay in Loading.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::FetchWeather { seq, query } => {
            let client = services.weather.clone();
            ctx.tasks().spawn("lookup", async move {
                match client.fetch_current(&query).await {
                    Ok(snapshot) => Action::LookupDidLoad { seq, snapshot },
                    Err(error) => Action::LookupDidError { seq, error },
                }
            });
        }
        Effect::LocateDevice => {
            let source = services.location.clone();
            ctx.tasks().spawn("locate", async move {
                match source.locate().await {
                    Ok(coords) => {
                        tracing::info!(lat = coords.lat, lon = coords.lon, "location resolved");
                        Action::LocationDidResolve(coords)
                    }
                    Err(error) => {
                        tracing::warn!(?error, "location unavailable");
                        Action::LocationDidError(error.to_string())
                    }
                }
            });
        }
    }
}
