// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front-end for the `steerage` controllability analyzer.
//!
//! Reads a network from a file, standard input or a generator spec, runs one analysis mode under
//! one model, and writes the result to standard output or a file.
//!
//! Exit codes: 0 on success, 1 for command-line errors, 2 when the graph cannot be loaded, 3 when
//! the output cannot be opened or written.

use clap::{ArgEnum, ErrorKind, Parser};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::exit;
use steerage::io::{read_network, read_network_from_path, Format};
use steerage::{
    run_analysis, AnalysisMode, AnalysisOptions, Error, Model, Network, DEFAULT_TRIALS,
};

#[derive(Debug, Parser)]
#[clap(
    name = "steerage",
    version,
    about = "Structural controllability analysis of directed networks"
)]
struct Args {
    /// Input network: a file path, '-' for standard input, or 'er://n,k[,directed]' for a
    /// random Erdős–Rényi network with n vertices and mean degree k
    input: String,

    /// Controllability model
    #[clap(short, long, arg_enum, default_value = "liu")]
    model: ModelArg,

    /// Analysis mode
    #[clap(short = 'M', long, arg_enum, default_value = "driver_nodes")]
    mode: ModeArg,

    /// Write the output here instead of standard output
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Input format (inferred from the input file extension by default; edgelist for '-')
    #[clap(short = 'f', long, arg_enum)]
    input_format: Option<FormatArg>,

    /// Output format for graph mode (inferred from the output file extension; graphml by
    /// default)
    #[clap(short = 'F', long, arg_enum)]
    output_format: Option<FormatArg>,

    /// Trials per ensemble in significance mode
    #[clap(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Seed for the random networks drawn by 'er://' inputs and significance mode
    #[clap(long)]
    seed: Option<u64>,

    /// Log more (repeat for debug output)
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,

    /// Log errors only
    #[clap(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum ModelArg {
    Liu,
    Switchboard,
}

impl From<ModelArg> for Model {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Liu => Model::Liu,
            ModelArg::Switchboard => Model::Switchboard,
        }
    }
}

#[derive(ArgEnum, Clone, Copy, Debug)]
#[clap(rename_all = "snake_case")]
enum ModeArg {
    DriverNodes,
    ControlPaths,
    Statistics,
    Significance,
    Graph,
}

impl From<ModeArg> for AnalysisMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::DriverNodes => AnalysisMode::DriverNodes,
            ModeArg::ControlPaths => AnalysisMode::ControlPaths,
            ModeArg::Statistics => AnalysisMode::Statistics,
            ModeArg::Significance => AnalysisMode::Significance,
            ModeArg::Graph => AnalysisMode::Graph,
        }
    }
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum FormatArg {
    Edgelist,
    Ncol,
    Lgl,
    Graphml,
    Gml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Edgelist => Format::EdgeList,
            FormatArg::Ncol => Format::Ncol,
            FormatArg::Lgl => Format::Lgl,
            FormatArg::Graphml => Format::GraphML,
            FormatArg::Gml => Format::Gml,
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind {
            // --help and --version leave through here with a zero exit code.
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{}", err);
                exit(0);
            }
            _ => {
                eprintln!("{}", err);
                exit(1);
            }
        },
    };
    init_logging(&args);
    exit(run(&args));
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Error
    } else {
        match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> i32 {
    info!("loading {}", args.input);
    let network = match load_network(args) {
        Ok(network) => network,
        Err(err) => {
            error!("failed to load graph: {}", err);
            return 2;
        }
    };
    info!(
        "loaded network with {} vertices and {} edges",
        network.vertex_count(),
        network.edge_count()
    );

    let mut options = AnalysisOptions::new(args.model.into(), args.mode.into());
    options.trials = args.trials;
    options.seed = args.seed;
    options.graph_format = match (args.output_format, &args.output) {
        (Some(format), _) => format.into(),
        (None, Some(path)) => Format::from_path(path).unwrap_or(Format::GraphML),
        (None, None) => Format::GraphML,
    };

    info!("calculating");
    let result = match &args.output {
        Some(path) => match File::create(path) {
            Ok(file) => run_analysis(&network, &options, &mut BufWriter::new(file)),
            Err(err) => {
                error!("cannot open output file {}: {}", path.display(), err);
                return 3;
            }
        },
        None => {
            let stdout = io::stdout();
            run_analysis(&network, &options, &mut stdout.lock())
        }
    };

    match result {
        Ok(()) => 0,
        Err(err @ Error::OutputError(_)) => {
            error!("{}", err);
            3
        }
        Err(err) => {
            error!("{}", err);
            2
        }
    }
}

fn load_network(args: &Args) -> Result<Network, Error> {
    if let Some(spec) = args.input.strip_prefix("er://") {
        return generate_er(spec, args.seed);
    }
    if args.input == "-" {
        let format = args.input_format.map(Format::from).unwrap_or(Format::EdgeList);
        let stdin = io::stdin();
        return read_network(stdin.lock(), format);
    }
    read_network_from_path(Path::new(&args.input), args.input_format.map(Into::into))
}

/// Parses `n,k[,directed]` and draws the corresponding G(n, m) network, with `m = n * k / 2`
/// rounded to the nearest integer.
fn generate_er(spec: &str, seed: Option<u64>) -> Result<Network, Error> {
    let fields: Vec<&str> = spec.split(',').collect();
    if fields.len() < 2 || fields.len() > 3 {
        return Err(Error::InvalidParameter(format!(
            "expected er://n,k[,directed], found 'er://{}'",
            spec
        )));
    }
    let n: usize = fields[0].trim().parse().map_err(|_| {
        Error::InvalidParameter(format!("vertex count '{}' is not an integer", fields[0]))
    })?;
    let k: f64 = fields[1].trim().parse().map_err(|_| {
        Error::InvalidParameter(format!("mean degree '{}' is not a number", fields[1]))
    })?;
    if !k.is_finite() || k < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "mean degree {} is out of range",
            k
        )));
    }
    let directed = match fields.get(2).map(|field| field.trim().to_ascii_lowercase()) {
        None => true,
        Some(flag) => match flag.as_str() {
            "directed" | "true" | "1" => true,
            "undirected" | "false" | "0" => false,
            other => {
                return Err(Error::InvalidParameter(format!(
                    "unknown directedness flag '{}'",
                    other
                )))
            }
        },
    };

    let m = (n as f64 * k / 2.0).round() as usize;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    steerage::generate::erdos_renyi_gnm(n, m, directed, &mut rng)
}
