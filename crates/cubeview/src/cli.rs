use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cubeview_core::{
    Coords, DEFAULT_SCRAMBLE_LENGTH, Face, FaceletState, Rgb, format_moves, parse_moves,
    random_scramble,
};
use cubeview_prefs::Preferences;
use cubeview_view::CubeSimulation;
use eyre::{Context, Result, ensure};
use rand::SeedableRng;
use serde::Serialize;

use crate::renderer::LoggingRenderer;

/// Cubeview command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to use instead of the default location.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Apply moves to a facelet state and print the resulting state.
    Apply {
        /// 54-character facelet state (blocks U, L, F, R, B, D).
        state: String,
        /// Moves such as `R`, `U'`, or `F2`.
        moves: Vec<String>,
    },
    /// Print whether a facelet state is solved, as JSON.
    Check {
        /// 54-character facelet state.
        state: String,
    },
    /// Generate a random scramble and print it with its facelet state, as
    /// JSON.
    Scramble {
        /// Number of moves.
        #[arg(short, long, default_value_t = DEFAULT_SCRAMBLE_LENGTH)]
        length: usize,
        /// Seed for a reproducible scramble.
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Animate moves headlessly at a fixed frame rate and print every cubie,
    /// as JSON.
    Simulate {
        /// Initial facelet state (default solved).
        #[arg(long)]
        state: Option<String>,
        /// Frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Moves to animate.
        moves: Vec<String>,
    },
    /// Write the preferences in effect, with every default filled in, to the
    /// preferences file.
    SavePrefs,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    match args.subcommand {
        Subcommand::Apply { state, moves } => {
            println!("{}", apply(&state, &moves)?);
            Ok(())
        }

        Subcommand::Check { state } => write_json_output(&check(&state)?),

        Subcommand::Scramble { length, seed } => write_json_output(&scramble(length, seed)),

        Subcommand::Simulate { state, fps, moves } => {
            let prefs = load_prefs(args.prefs.as_deref())?;
            write_json_output(&simulate(&prefs, state.as_deref(), fps, &moves)?)
        }

        Subcommand::SavePrefs => {
            let path = save_prefs(args.prefs.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn load_prefs(path: Option<&Path>) -> Result<Preferences> {
    match path {
        Some(path) => Preferences::load_from_file(path),
        None => Ok(Preferences::load(None)),
    }
}

fn save_prefs(path: Option<&Path>) -> Result<PathBuf> {
    let prefs = load_prefs(path)?;
    match path {
        Some(path) => {
            prefs.save_to(path)?;
            Ok(path.to_path_buf())
        }
        None => Ok(prefs.save()?.to_path_buf()),
    }
}

fn apply(state: &str, moves: &[String]) -> Result<FaceletState> {
    let state: FaceletState = state.parse().context("error parsing facelet state")?;
    let moves = parse_moves(&moves.join(" ")).context("error parsing moves")?;
    Ok(state.apply_moves(moves))
}

#[derive(Serialize, Debug, PartialEq)]
struct CheckOutput {
    solved: bool,
}

fn check(state: &str) -> Result<CheckOutput> {
    let state: FaceletState = state.parse().context("error parsing facelet state")?;
    Ok(CheckOutput {
        solved: state.is_solved(),
    })
}

#[derive(Serialize, Debug, PartialEq)]
struct ScrambleOutput {
    scramble: String,
    state: String,
}

fn scramble(length: usize, seed: Option<u64>) -> ScrambleOutput {
    let moves = match seed {
        Some(seed) => random_scramble(&mut rand_chacha::ChaCha12Rng::seed_from_u64(seed), length),
        None => random_scramble(&mut rand::rng(), length),
    };
    ScrambleOutput {
        scramble: format_moves(&moves),
        state: FaceletState::solved().apply_moves(moves).to_string(),
    }
}

#[derive(Serialize, Debug)]
struct SimulateOutput {
    frames: usize,
    redraws: usize,
    state: Option<String>,
    cubies: Vec<CubieSnapshot>,
}

#[derive(Serialize, Debug)]
struct CubieSnapshot {
    id: u8,
    home: Coords,
    coords: Coords,
    position: [f32; 3],
    /// Color facing each direction, keyed by face letter.
    colors: BTreeMap<char, Rgb>,
}

fn simulate(
    prefs: &Preferences,
    state: Option<&str>,
    fps: f32,
    moves: &[String],
) -> Result<SimulateOutput> {
    ensure!(fps > 0.0 && fps.is_finite(), "fps must be positive");
    let frame = Duration::from_secs_f32(1.0 / fps);

    let mut sim = CubeSimulation::new(LoggingRenderer::default(), prefs);
    match state {
        Some(s) => sim.colorize(s).context("error parsing facelet state")?,
        None => sim.set_state(FaceletState::solved()),
    }
    sim.apply_moves(&moves.join(" ")).context("error parsing moves")?;
    log::info!("simulating {} moves at {fps} fps", sim.pending_moves());

    let mut frames = 0;
    while sim.tick(frame) {
        frames += 1;
    }

    let model = sim.model();
    let cubies = model
        .iter()
        .map(|(id, cubie)| CubieSnapshot {
            id: id.0,
            home: cubie.home(),
            coords: cubie.coords(),
            position: cubie.transform().position.into(),
            colors: Face::ALL
                .into_iter()
                .filter(|&direction| cubie.coords().is_on_face(direction))
                .map(|direction| (direction.to_char(), cubie.color(cubie.slot_facing(direction))))
                .collect(),
        })
        .collect();

    let state = sim.latest_state().map(|s| s.to_string());
    Ok(SimulateOutput {
        frames,
        redraws: sim.into_renderer().redraws,
        state,
        cubies,
    })
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
