//! Command line front end for the touch overlay
//!
//! `touch-demo check` runs the startup self checks.
//! `touch-demo replay` feeds a scripted play session through the overlay and
//! logs every virtual key and mouse event it produces.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use touch_gui::build_info;
use touch_gui::camera::PinholeCamera;
use touch_gui::config::TouchConfig;
use touch_gui::health;
use touch_gui::touch::{
    ControlEvent, InputReceiver, LayoutParams, MenuStyle, PointerId, PressLedger, Rect,
    TouchEvent, TouchScreen, VirtualButtonId,
};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "touch-demo", version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Touchscreen controls for a first-person game")]
struct Cli {
    /// Config profile; falls back to TOUCH_PROFILE, then "release"
    #[arg(long, short, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the startup self checks and exit with their status
    Check,
    /// Replay a scripted session through the overlay
    Replay {
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 720.0)]
        height: f32,
        #[arg(long, default_value_t = 1.0)]
        density: f32,
        #[arg(long, value_enum, default_value_t = Menu::Minimap)]
        menu: Menu,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Menu {
    Minimap,
    Escape,
}

impl From<Menu> for MenuStyle {
    fn from(menu: Menu) -> Self {
        match menu {
            Menu::Minimap => MenuStyle::Minimap,
            Menu::Escape => MenuStyle::Menu,
        }
    }
}

/// Logs each event, then records it
struct LoggingReceiver {
    ledger: PressLedger,
}

impl InputReceiver for LoggingReceiver {
    fn on_event(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::AimChanged { ray } => debug!(direction = ?ray.direction, "aim"),
            other => info!(event = ?other, "control"),
        }
        self.ledger.on_event(event);
    }
}

type Screen = TouchScreen<LoggingReceiver, PinholeCamera>;

enum Step {
    Touch(TouchEvent),
    Wait(Duration),
    Hide,
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.profile {
        Some(profile) => TouchConfig::load(profile),
        None => TouchConfig::load_from_env(),
    }
    .context("loading touch profile")?;

    match cli.command {
        Command::Check => {
            let report = health::run_all_checks();
            health::print_report(&report);
            std::process::exit(report.exit_code());
        }
        Command::Replay {
            width,
            height,
            density,
            menu,
        } => replay(
            &config,
            LayoutParams::new(width, height)
                .with_density(density)
                .with_menu(menu.into()),
        ),
    }
}

fn replay(config: &TouchConfig, params: LayoutParams) -> Result<()> {
    info!(version = %build_info::version_string(), profile = %config.profile, "Starting replay");

    let camera = PinholeCamera::new(Vec2::new(params.width, params.height));
    let receiver = LoggingReceiver {
        ledger: PressLedger::new(),
    };
    let mut screen = TouchScreen::new(config, params, receiver, camera)?;
    screen.register_hud(0, Rect::new(params.width / 2.0 - 90.0, params.height - 60.0, 60.0, 60.0));
    screen.register_hud(1, Rect::new(params.width / 2.0 - 30.0, params.height - 60.0, 60.0, 60.0));

    let steps = script(&screen, config)?;
    for step in steps {
        match step {
            Step::Touch(event) => screen.handle_touch(&event),
            Step::Wait(duration) => run_frames(&mut screen, duration),
            Step::Hide => screen.hide(),
            Step::Show => screen.show(),
        }
    }

    let camera = screen.picker_mut();
    info!(yaw = camera.yaw, pitch = camera.pitch, "Camera after replay");

    let ledger = &screen.receiver().ledger;
    info!(
        events = ledger.events().len(),
        presses = ledger.presses(),
        releases = ledger.releases(),
        "Replay finished"
    );
    if !ledger.is_balanced() {
        bail!("{} controls left held after replay", ledger.outstanding());
    }
    if ledger.unmatched_releases() > 0 {
        warn!(count = ledger.unmatched_releases(), "Releases without a matching press");
    }
    Ok(())
}

/// Ticks the overlay frame by frame and keeps the camera in step with drags
fn run_frames(screen: &mut Screen, duration: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < duration {
        screen.tick(FRAME);
        let yaw_change = screen.take_yaw_change();
        let pitch = screen.pitch();
        screen.picker_mut().look(yaw_change, pitch);
        elapsed += FRAME;
    }
}

fn script(screen: &Screen, config: &TouchConfig) -> Result<Vec<Step>> {
    let center = |id: VirtualButtonId| -> Result<Vec2> {
        screen
            .button_tracker()
            .get(id)
            .map(|b| b.rect.center())
            .with_context(|| format!("{id:?} is not laid out"))
    };
    let params = screen.layout_params();
    let open = Vec2::new(params.width * 0.6, params.height * 0.4);
    let hotbar = Vec2::new(params.width / 2.0 - 60.0, params.height - 30.0);

    let forward = center(VirtualButtonId::ForwardTwo)?;
    let forward_right = center(VirtualButtonId::ForwardThree)?;
    let jump = center(VirtualButtonId::Jump)?;
    let chat = center(VirtualButtonId::Chat)?;

    let start = |id: PointerId, pos| Step::Touch(TouchEvent::started(id, pos));
    let to = |id: PointerId, pos| Step::Touch(TouchEvent::moved(id, pos));
    let end = |id: PointerId, pos| Step::Touch(TouchEvent::ended(id, pos));
    let wait = |ms| Step::Wait(Duration::from_millis(ms));

    let mut steps = vec![
        // walk forward while looking around
        start(1, forward),
        wait(100),
        start(2, open),
        wait(50),
    ];
    for i in 1..=10 {
        steps.push(to(2, open + Vec2::new(i as f32 * 8.0, i as f32 * 2.0)));
        steps.push(wait(16));
    }
    steps.extend([
        to(1, forward_right),
        wait(400),
        end(2, open + Vec2::new(80.0, 20.0)),
        end(1, forward_right),
        // interact with what is in front
        start(3, open),
        wait(120),
        end(3, open),
        // dig
        start(4, open),
        wait(config.controls.dig_time_ms + 300),
        to(4, open + Vec2::new(6.0, 4.0)),
        wait(200),
        end(4, open + Vec2::new(6.0, 4.0)),
        // two thumbs on jump, then pick a hotbar slot
        start(5, jump),
        start(6, jump + Vec2::new(4.0, 4.0)),
        wait(300),
        end(5, jump),
        start(7, hotbar),
        wait(100),
        end(7, hotbar),
        end(6, jump),
        start(8, chat),
        end(8, chat),
        // hide mid-gesture
        start(9, forward),
        start(10, open),
        wait(config.controls.dig_time_ms + 100),
        Step::Hide,
        end(9, forward),
        end(10, open),
        Step::Show,
    ]);
    Ok(steps)
}
