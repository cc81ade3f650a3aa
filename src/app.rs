use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog;
use crate::config::{self, WidgetConfig};
use crate::display;
use crate::favorites::{self, FavoritesStore};
use crate::format::TimeFormatter;
use crate::ipc::{self, IpcCommand, IpcResponse, ZoneInfo};
use crate::scheduler::RefreshScheduler;

struct App {
    config: WidgetConfig,
    config_path: PathBuf,
    store: FavoritesStore,
    formatter: TimeFormatter,
    scheduler: RefreshScheduler,
    reference: DateTime<Utc>,
    needs_redraw: bool,
    should_quit: bool,
}

pub fn run(config: WidgetConfig, config_path: PathBuf, socket_override: Option<PathBuf>) -> Result<()> {
    let favorites_path = config
        .storage
        .favorites_path
        .clone()
        .unwrap_or_else(favorites::default_favorites_path);
    let store = FavoritesStore::load(favorites_path);
    log::info!("Loaded {} favorite cities from {}", store.cities().len(), store.path().display());

    let ipc_socket_path = ipc::socket_path(socket_override.as_ref());
    let listener = ipc::create_listener(&ipc_socket_path)?;

    // Signal handling
    let running = Arc::new(AtomicBool::new(true));
    {
        let r = running.clone();
        ctrlc::set_handler(move || {
            r.store(false, Ordering::SeqCst);
        }).expect("Failed to set signal handler");
    }

    let formatter = TimeFormatter::from_settings(&config.clock);
    let mut scheduler = RefreshScheduler::new(Duration::from_secs(config.refresh.period_secs));
    scheduler.start(Instant::now());

    let mut app = App {
        config,
        config_path,
        store,
        formatter,
        scheduler,
        reference: Utc::now(),
        needs_redraw: true,
        should_quit: false,
    };

    // Main event loop: single-threaded, cooperative. IPC intents and timer
    // ticks are both handled here, so no mutation ever interleaves with
    // another.
    loop {
        if app.should_quit || !running.load(Ordering::SeqCst) {
            break;
        }

        app.poll_ipc(&listener);

        if app.scheduler.poll(Instant::now()) {
            app.reference = Utc::now();
            app.needs_redraw = true;
        }

        if app.needs_redraw {
            app.draw();
            app.needs_redraw = false;
        }

        std::thread::sleep(Duration::from_millis(100));
    }

    // Cleanup
    app.scheduler.stop();
    ipc::cleanup_socket(&ipc_socket_path);

    Ok(())
}

impl App {
    fn poll_ipc(&mut self, listener: &UnixListener) {
        loop {
            match listener.accept() {
                Ok((mut stream, _)) => {
                    let response = match ipc::read_command(&stream) {
                        Ok(cmd) => self.handle_command(cmd),
                        Err(e) => IpcResponse::err(format!("Invalid command: {}", e)),
                    };
                    if let Err(e) = ipc::write_response(&mut stream, &response) {
                        log::warn!("Failed to write IPC response: {}", e);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    log::warn!("IPC accept failed: {}", e);
                    break;
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: IpcCommand) -> IpcResponse {
        match cmd {
            IpcCommand::AddCity { name, zone } => {
                if catalog::lookup(&zone).is_none() {
                    return IpcResponse::err(format!("Unknown zone id: {:?}", zone));
                }
                match self.store.add(&name, &zone) {
                    Some(city) => {
                        let city = city.clone();
                        log::info!("Added favorite {:?} ({})", city.name, city.time_zone_id);
                        self.needs_redraw = true;
                        IpcResponse::with_city(city)
                    }
                    None => IpcResponse::err("City name must not be empty"),
                }
            }
            IpcCommand::RemoveCity { id } => {
                if self.store.remove(&id) {
                    log::info!("Removed favorite {}", id);
                    self.needs_redraw = true;
                }
                IpcResponse::ok()
            }
            IpcCommand::ListCities => IpcResponse::with_cities(self.store.cities().to_vec()),
            IpcCommand::ListZones => {
                let zones = catalog::all()
                    .iter()
                    .map(|z| ZoneInfo {
                        id: z.id.into(),
                        name: z.display_name.into(),
                        offset: z.offset_label(),
                        has_dst: z.dst.is_some(),
                    })
                    .collect();
                IpcResponse::with_zones(zones)
            }
            IpcCommand::GetState => IpcResponse::state(
                self.config.refresh.period_secs,
                self.store.cities().len(),
                &self.config_path.display().to_string(),
                &self.store.path().display().to_string(),
            ),
            IpcCommand::ReloadConfig => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    self.formatter = TimeFormatter::from_settings(&new_config.clock);
                    self.scheduler.set_period(Duration::from_secs(new_config.refresh.period_secs));
                    self.config = new_config;
                    self.needs_redraw = true;
                    log::info!("Reloaded config from {}", self.config_path.display());
                    IpcResponse::ok()
                }
                Err(e) => IpcResponse::err(format!("Reload failed: {}", e)),
            },
            IpcCommand::Quit => {
                self.should_quit = true;
                IpcResponse::ok()
            }
        }
    }

    fn draw(&self) {
        let board = display::render_board(
            self.store.cities(),
            self.reference,
            &self.formatter,
            self.config.clock.show_date,
        );
        let mut stdout = std::io::stdout();
        // Clear screen and home the cursor before each frame
        let _ = write!(stdout, "\x1b[2J\x1b[H{}", board);
        let _ = stdout.flush();
    }
}
