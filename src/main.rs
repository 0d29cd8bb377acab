use std::time::Duration;

use clap::{Parser, Subcommand};

use twophase::scramble::{gen_scramble, scramble_to_facelets, scramble_to_str};
use twophase::solver::{solve, solve_scramble, SolveOptions};
use twophase::{apply_moves, validate, Error};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves a cube given as a facelet string or a scramble")]
    #[clap(group(
        clap::ArgGroup::new("state")
            .required(true)
            .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(short, long, default_value_t = 20)]
        max: usize,

        #[arg(short, long)]
        timeout: Option<f32>,
    },

    #[command(about = "generates a random scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 25)]
        number: usize,
    },

    #[command(about = "applies a move sequence to a facelet string")]
    Apply {
        #[arg(short, long)]
        facelet: String,

        #[arg(short, long)]
        moves: String,
    },

    #[command(about = "checks a facelet string for solvability")]
    Validate {
        #[arg(short, long)]
        facelet: String,
    },
}

fn run_solve(
    scramble: Option<&str>,
    facelet: Option<&str>,
    max: usize,
    timeout: Option<f32>,
) -> Result<(), Error> {
    let options = SolveOptions {
        max_total_moves: max,
        time_budget: timeout.map(Duration::from_secs_f32),
    };
    let result = if let Some(scramble) = scramble {
        solve_scramble(scramble, &options)?
    } else if let Some(facelet) = facelet {
        solve(facelet, &options)?
    } else {
        return Ok(());
    };
    println!(
        "{} ({} moves, {:?})",
        scramble_to_str(&result.moves),
        result.moves.len(),
        result.solve_time
    );
    Ok(())
}

fn run_scramble(number: usize) -> Result<(), Error> {
    let scramble = gen_scramble(number);
    println!("{}", scramble_to_str(&scramble));
    println!("{}", scramble_to_facelets(&scramble));
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Solve {
            scramble,
            facelet,
            max,
            timeout,
        } => run_solve(scramble.as_deref(), facelet.as_deref(), *max, *timeout),
        Commands::Scramble { number } => run_scramble(*number),
        Commands::Apply { facelet, moves } => {
            apply_moves(facelet, moves).map(|state| println!("{}", state))
        }
        Commands::Validate { facelet } => {
            println!("{}", validate(facelet));
            Ok(())
        }
    };

    if let Err(error) = result {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
