//! Unmaze driver - animates the solver one step per frame
//!
//! Storage locations:
//! - Linux: ~/.local/share/unmaze/
//! - Windows: %APPDATA%\unmaze\
//! - MacOS: ~/Library/Application Support/unmaze/
//!
//! `config.json` holds the driver settings, `maze.txt` the last maze as a
//! share code. `UNMAZED_FPS` overrides the configured frame rate.

use std::fs;
use std::time::Duration;

use tokio::time;
use tracing::{error, info, warn};
use unmaze::error::MazeError;
use unmaze::session::Session;
use unmaze::solver::SolveStatus;

mod config;
mod error;
mod paths;

use config::{DriverConfig, FPS_ENV};
use error::DriverError;
use paths::AppPaths;

/// What the loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Continue,
    Finished,
}

struct Driver {
    config: DriverConfig,
    paths: AppPaths,
    session: Session,
    seed: u64,
    rounds: u32,
    last_status: Option<SolveStatus>,
}

impl Driver {
    fn new(config: DriverConfig, paths: AppPaths) -> Result<Self, DriverError> {
        let seed = config.seed;
        let session = Session::new(config.maze_config(seed))?;
        Ok(Self {
            config,
            paths,
            session,
            seed,
            rounds: 0,
            last_status: None,
        })
    }

    /// Replaces the generated maze with `maze.txt` when it exists. A corrupt
    /// file is logged and the generated maze kept.
    fn load_maze(&mut self) -> Result<(), DriverError> {
        let path = self.paths.maze_file();
        if !path.exists() {
            return Ok(());
        }
        let code = fs::read_to_string(&path)?;
        match self.session.load(code.trim()) {
            Ok(()) => {
                info!("Maze loaded from {:?}", path);
                Ok(())
            }
            Err(e @ (MazeError::CorruptData(_) | MazeError::UninitializedStart)) => {
                warn!("Ignoring {:?}: {}", path, e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the maze layout without the current trail.
    fn save_maze(&self) -> Result<(), DriverError> {
        let mut grid = self.session.grid().clone();
        grid.reset_agent()?;
        let path = self.paths.maze_file();
        fs::write(&path, grid.serialize())?;
        info!("Maze saved to {:?}", path);
        Ok(())
    }

    fn tick(&mut self) -> Result<Tick, DriverError> {
        let status = self.session.step()?;
        if Some(status) != self.last_status {
            info!(
                status = status.label(),
                steps = self.session.solver().map_or(0, |s| s.steps()),
                seed = self.seed,
                "status"
            );
            self.last_status = Some(status);
        }
        if !status.is_terminal() {
            return Ok(Tick::Continue);
        }

        self.rounds += 1;
        if self.config.max_rounds.is_some_and(|max| self.rounds >= max) {
            info!("Finished {} rounds", self.rounds);
            return Ok(Tick::Finished);
        }
        if !self.config.regenerate_after_round {
            return Ok(Tick::Finished);
        }

        self.seed = self.seed.wrapping_add(1);
        self.session.regenerate(self.seed)?;
        self.last_status = None;
        Ok(Tick::Continue)
    }
}

async fn run(driver: &mut Driver) -> Result<(), DriverError> {
    let mut interval = time::interval(Duration::from_millis(driver.config.frame_millis()));
    interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if driver.tick()? == Tick::Finished {
                    print!("{}", driver.session.render());
                    return Ok(());
                }
            }
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    error!("Ctrl-C handler failed: {}", e);
                }
                info!("Ctrl-C: stopping");
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let paths = AppPaths::new()?;
    info!("Data directory: {:?}", paths.data_dir());

    let config = DriverConfig::load_or_create(&paths.config_file())?
        .with_fps_override(std::env::var(FPS_ENV).ok().as_deref());
    info!(
        fps = config.fps,
        width = config.width,
        height = config.height,
        seed = config.seed,
        "Driver config"
    );

    let mut driver = Driver::new(config, paths)?;
    driver.load_maze()?;

    let result = run(&mut driver).await;
    if let Err(e) = driver.save_maze() {
        error!("Save failed: {}", e);
    }
    result?;
    Ok(())
}
