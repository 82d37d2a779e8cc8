use std::error::Error;

use thermal_route::cache::{CacheConfig, CachedRouteClient};
use thermal_route::console::Command;
use thermal_route::domain::{UnitSystem, format_summary};
use thermal_route::overlay::{
    DisplaySurface, Graphic, GraphicHandle, LayerId, MARKER_LAYER, MarkerRole, MemorySurface,
    ROUTE_LAYER,
};
use thermal_route::service::{
    FixtureRouteProvider, HttpRouteClient, RouteError, RouteProvider, RouteServiceConfig,
};
use thermal_route::sync::{Notifier, RouteController, RouteSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Surface that prints every change it is asked to make.
struct ConsoleSurface(MemorySurface);

impl DisplaySurface for ConsoleSurface {
    fn find_layer(&self, id: &str) -> Option<LayerId> {
        self.0.find_layer(id)
    }

    fn add_graphic(&mut self, layer: Option<LayerId>, graphic: Graphic) -> GraphicHandle {
        match &graphic {
            Graphic::Marker { role, at } => {
                let role = match role {
                    MarkerRole::Start => "start",
                    MarkerRole::End => "end",
                };
                println!("+ {role} marker at {}", at.coordinate());
            }
            Graphic::Segment {
                path,
                metric,
                style,
            } => println!(
                "+ segment {} -> {} {metric:.1}°C {}",
                path[0], path[1], style.color
            ),
        }
        self.0.add_graphic(layer, graphic)
    }

    fn remove_graphic(&mut self, handle: GraphicHandle) {
        self.0.remove_graphic(handle);
    }
}

/// Prints route failures the way a UI would toast them.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn report(&mut self, error: &RouteError) {
        eprintln!("! route unavailable ({}): {error}", error.kind());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thermal_route=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let units = match std::env::var("THERMAL_ROUTE_UNITS") {
        Ok(raw) => UnitSystem::parse(&raw).unwrap_or_else(|| {
            warn!(value = %raw, "unknown THERMAL_ROUTE_UNITS, using metric");
            UnitSystem::Metric
        }),
        Err(_) => UnitSystem::Metric,
    };

    match std::env::var("THERMAL_ROUTE_FIXTURE") {
        Ok(path) => {
            let provider = FixtureRouteProvider::from_file(&path)?;
            info!("serving routes from fixture {path}");
            run_console(provider, units).await
        }
        Err(_) => {
            let config = RouteServiceConfig::from_env();
            info!(endpoint = %config.endpoint(), "using routing service");
            let client = HttpRouteClient::new(config)?;
            let provider = CachedRouteClient::new(client, &CacheConfig::default());
            run_console(provider, units).await
        }
    }
}

async fn run_console<P>(provider: P, units: UnitSystem) -> Result<(), Box<dyn Error>>
where
    P: RouteProvider + 'static,
{
    let surface = ConsoleSurface(MemorySurface::with_layers([MARKER_LAYER, ROUTE_LAYER]));
    let controller = RouteController::new(surface, ConsoleNotifier);
    let legend = controller.scale().legend();
    info!(time = %controller.inputs().time, "target time");

    let session = RouteSession::new(controller, provider);
    let mut summaries = session.subscribe_summary();
    let (tx, rx) = mpsc::channel(32);
    let driver = tokio::spawn(session.run(rx));

    tokio::spawn(async move {
        while summaries.changed().await.is_ok() {
            let summary = *summaries.borrow_and_update();
            match summary.as_ref().and_then(|s| format_summary(s, units)) {
                Some([mrt, length]) => println!("= {mrt}, {length}"),
                None => println!("= no route"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Some(Command::Input(event))) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(Some(Command::Legend)) => {
                for entry in &legend {
                    println!("  {} {}", entry.color, entry.label);
                }
            }
            Ok(Some(Command::Quit)) => break,
            Ok(None) => {}
            Err(e) => eprintln!("? {e}"),
        }
    }

    drop(tx);
    let controller = driver.await?;
    info!(phase = ?controller.phase(), "session finished");
    Ok(())
}
