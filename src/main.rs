use antworld::brain::load_brain;
use antworld::prelude::*;
use antworld::world::load_world;
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr so generated worlds can be piped from stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(err) = execute(args.command) {
        eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
        std::process::exit(1);
    }
    Ok(())
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Run {
            red,
            black,
            world,
            rounds,
            seed,
            contest,
            quiet,
        } => {
            let red = load_brain(&red)?;
            let black = load_brain(&black)?;
            let world = WorldGrid::new(&load_world(&world, contest)?);
            let rng = seed.map_or_else(AntRng::new, AntRng::with_seed);

            let mut game = Game::with_rng(red, black, world, rng);
            let start = Instant::now();
            game.run(rounds);
            let elapsed = start.elapsed();

            if quiet {
                println!("{}", game.score());
            } else {
                game.print_summary(elapsed);
            }
        }
        Command::Generate { seed, out } => {
            let mut rng = seed.map_or_else(AntRng::new, AntRng::with_seed);
            let source = generate_world(&mut rng);
            match out {
                Some(path) => {
                    fs::write(&path, source)?;
                    println!(
                        "{} {}",
                        "✓ world written to".green(),
                        path.display().to_string().cyan()
                    );
                }
                None => print!("{}", source),
            }
        }
        Command::CheckBrain { file } => {
            let brain = load_brain(&file)?;
            println!(
                "{} {}",
                "✓ brain ok:".green().bold(),
                format!("{} states", brain.len()).cyan()
            );
        }
        Command::CheckWorld { file, contest } => {
            let world = load_world(&file, contest)?;
            let rules = if contest { "contest rules" } else { "basic rules" };
            println!(
                "{} {} {}",
                "✓ world ok:".green().bold(),
                format!("{}x{}", world.width, world.height).cyan(),
                format!("({})", rules).dimmed()
            );
        }
    }
    Ok(())
}
