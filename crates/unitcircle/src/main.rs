use anyhow::Context as _;
use clap::Parser;
use parking_lot::Mutex;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use unitcircle::config::{self, Config, Settings};
use unitcircle::engine::{InputController, SharedStore, TrigDataStore, pump};
use unitcircle::render::{CurvePanel, RenderSink, TextRenderer};
use unitcircle::sys::runtime;

#[derive(Parser, Debug)]
#[command(version, about = "Unit circle trigonometry viewer", long_about = None)]
struct Args {
    /// Config file to use instead of the one in the user config directory
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the default config file and print its path
    #[arg(long)]
    write_config: bool,

    /// Circle radius, fixed for the session
    #[arg(short = 'r', long)]
    radius: Option<f64>,

    /// Initial angle in radians
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    angle: Option<f64>,

    /// Step of the angle control in radians
    #[arg(short = 's', long)]
    step: Option<f64>,

    /// Also plot sin, cos and tan with the current angle marked
    #[arg(long)]
    curves: bool,

    /// Plain output without ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Draw the initial frame and exit
    #[arg(long)]
    once: bool,

    /// Also write every frame to this PNG file (needs the `cairo` feature)
    #[arg(long)]
    png: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(angle) = self.angle {
            config.angle.initial = angle;
        }
        if let Some(step) = self.step {
            config.angle.step = step;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    args.apply(&mut config);
    let settings = config.validate()?;
    log::info!(
        "Starting with radius {} and angle {} (step {})",
        settings.radius,
        settings.initial_angle,
        settings.range.step()
    );

    let store: SharedStore = Arc::new(Mutex::new(TrigDataStore::new(
        settings.initial_angle,
        settings.radius,
        settings.circle_segments,
    )));
    subscribe_renderers(&store, &settings, &args)?;
    store.lock().publish();

    if args.once {
        return Ok(());
    }

    let mut controller =
        InputController::new(settings.range, settings.initial_angle, store.clone());
    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    pump::run(&rx, &mut controller, || store.lock().publish());
    Ok(())
}

fn subscribe_renderers(
    store: &SharedStore,
    settings: &Settings,
    args: &Args,
) -> anyhow::Result<()> {
    let mut store = store.lock();
    let circle = store.reference_circle().to_vec();
    let theme = settings.theme.clone();

    let text = TextRenderer::new(
        io::stdout(),
        settings.canvas.width,
        settings.canvas.height,
        settings.radius,
        circle.clone(),
        theme.clone(),
    )
    .with_color(!args.no_color);
    store.subscribe(RenderSink::new("text", text));

    if args.curves {
        for &function in &settings.curve_functions {
            let panel = CurvePanel::new(
                io::stdout(),
                function,
                settings.curve_resolution,
                settings.canvas.width * 2,
                settings.canvas.height / 2 + 1,
                *theme.curve(function),
                theme.marker,
            )?
            .with_color(!args.no_color);
            store.subscribe(RenderSink::new("curve", panel));
        }
    }

    if let Some(path) = &args.png {
        #[cfg(feature = "cairo")]
        {
            let png = unitcircle::render::png::PngRenderer::new(
                path.clone(),
                settings.radius,
                circle,
                theme,
            );
            store.subscribe(RenderSink::new("png", png));
        }
        #[cfg(not(feature = "cairo"))]
        log::warn!("Ignoring --png {}: built without the cairo feature", path.display());
    }

    log::debug!("{} renderers subscribed", store.observer_count());
    Ok(())
}
