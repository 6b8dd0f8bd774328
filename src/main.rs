use std::error::Error;
use std::process;

use unmaze::prelude::*;
use unmaze::render;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_help();
        process::exit(2);
    };

    let opts = match Options::parse(&args[1..]) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("{msg}");
            print_help();
            process::exit(2);
        }
    };

    let result = match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            return;
        }
        "solve" => run_solve(&opts),
        "generate" => run_generate(&opts),
        "show" => run_show(&opts),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(2);
    }
}

fn print_help() {
    println!("unmaze (grid maze solver)");
    println!("usage:");
    println!("  unmaze solve [--size WxH] [--seed N] [--braid P] [--code CODE] [--quiet]");
    println!("  unmaze generate [--size WxH] [--seed N] [--braid P]");
    println!("  unmaze show --code CODE");
    println!("  unmaze help");
    println!();
    println!("Without --seed the maze is open (no walls). --code loads a share code");
    println!("and overrides --size/--seed/--braid.");
}

#[derive(Debug, Default)]
struct Options {
    size: Option<(u32, u32)>,
    seed: Option<u64>,
    braid: f32,
    code: Option<String>,
    quiet: bool,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Options::default();
        let mut it = args.iter();
        while let Some(arg) = it.next() {
            let mut value = |name: &str| {
                it.next()
                    .cloned()
                    .ok_or_else(|| format!("{name} needs a value"))
            };
            match arg.as_str() {
                "--size" => {
                    let v = value("--size")?;
                    let (w, h) = v
                        .split_once('x')
                        .ok_or_else(|| format!("--size must look like WxH, got {v:?}"))?;
                    let w = w.parse::<u32>().map_err(|_| format!("bad width {w:?}"))?;
                    let h = h.parse::<u32>().map_err(|_| format!("bad height {h:?}"))?;
                    opts.size = Some((w, h));
                }
                "--seed" => {
                    let v = value("--seed")?;
                    opts.seed = Some(v.parse::<u64>().map_err(|_| format!("bad seed {v:?}"))?);
                }
                "--braid" => {
                    let v = value("--braid")?;
                    opts.braid = v.parse::<f32>().map_err(|_| format!("bad braid {v:?}"))?;
                }
                "--code" => opts.code = Some(value("--code")?),
                "--quiet" | "-q" => opts.quiet = true,
                other => return Err(format!("Unknown option: {other}")),
            }
        }
        Ok(opts)
    }

    fn config(&self) -> MazeConfig {
        let mut cfg = MazeConfig::default();
        if let Some((w, h)) = self.size {
            cfg = cfg.with_size(w, h);
        }
        if let Some(seed) = self.seed {
            cfg = cfg.carved(seed, self.braid);
        }
        cfg
    }

    fn session(&self) -> Result<Session, MazeError> {
        let mut session = Session::new(self.config())?;
        if let Some(code) = &self.code {
            session.load(code)?;
        }
        Ok(session)
    }
}

fn run_solve(opts: &Options) -> Result<(), Box<dyn Error>> {
    let mut session = opts.session()?;
    let status = session.solve_to_end()?;
    if !opts.quiet {
        print!("{}", session.render());
    }
    let steps = session.solver().map_or(0, Solver::steps);
    match status {
        SolveStatus::Solved => println!("solved in {steps} steps"),
        _ => println!("no path to the end ({steps} steps)"),
    }
    Ok(())
}

fn run_generate(opts: &Options) -> Result<(), Box<dyn Error>> {
    let session = opts.session()?;
    println!("{}", session.save());
    Ok(())
}

fn run_show(opts: &Options) -> Result<(), Box<dyn Error>> {
    let Some(code) = &opts.code else {
        return Err("show needs --code".into());
    };
    let grid = Grid::from_code(code)?;
    print!("{}", render::render(&grid));
    Ok(())
}
