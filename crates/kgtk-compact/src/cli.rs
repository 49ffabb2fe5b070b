use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kgtk_io::format::LIST_SEPARATOR;
use kgtk_io::{FileMode, KgtkIoError, ReaderOptions, RowSource, TsvReader, TsvWriter};

use crate::output::Output;
use crate::{CompactError, CompactOptions, Compactor, GroupingMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Auto,
    Edge,
    Node,
    None,
}

impl From<ModeArg> for FileMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => FileMode::Auto,
            ModeArg::Edge => FileMode::Edge,
            ModeArg::Node => FileMode::Node,
            ModeArg::None => FileMode::None,
        }
    }
}

#[derive(Parser)]
#[command(
    about = "Copy a KGTK file to the output, merging rows that share a key into multi-value cells."
)]
pub struct Args {
    /// KGTK file with the input data (`-` reads stdin).
    #[arg(default_value = "-")]
    input: PathBuf,

    /// KGTK file to write (`-` writes stdout).
    #[arg(short = 'o', long = "output-file", default_value = "-")]
    output_file: PathBuf,

    /// Extra key columns, appended to the edge (node1, label, node2) or node (id) key.
    ///
    /// Key columns are never merged.
    #[arg(long = "columns", num_args = 1..)]
    key_column_names: Vec<String>,

    /// The input is already grouped by key; process it as a stream.
    ///
    /// Without this flag the whole input is loaded and sorted in memory.
    #[arg(long)]
    presorted: bool,

    /// Fail if a key reappears after its group was written (with `--presorted`).
    #[arg(long, requires = "presorted")]
    verify_grouping: bool,

    /// Separator used to build keys and to join merged values.
    #[arg(long, default_value_t = LIST_SEPARATOR.to_string(), value_parser = parse_separator)]
    field_separator: String,

    /// How to interpret the input header.
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,

    /// Print the resolved options to stderr before processing.
    #[arg(long)]
    show_options: bool,

    /// Log progress (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,

    /// Log details (overridden by `RUST_LOG`).
    #[arg(long)]
    very_verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

pub fn run_with_args(args: Args) -> Result<()> {
    init_logging(&args);

    let options = CompactOptions {
        key_column_names: args.key_column_names.clone(),
        mode: if args.presorted {
            GroupingMode::Streaming
        } else {
            GroupingMode::Buffered
        },
        field_separator: args.field_separator.clone(),
        verify_grouping: args.verify_grouping,
    };

    if args.show_options {
        show_options(&args, &options);
    }

    match process(&args, options) {
        // A downstream consumer closing the pipe early (e.g. `| head`) is not a failure.
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}

fn init_logging(args: &Args) {
    let default_filter = if args.very_verbose {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // Only fails when a logger is already installed, e.g. by an embedding caller.
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already initialized; keeping it");
    }
}

fn parse_separator(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("the separator must not be empty".to_string());
    }
    Ok(value.to_string())
}

fn show_options(args: &Args, options: &CompactOptions) {
    eprintln!("input: {}", args.input.display());
    eprintln!("--columns {}", options.key_column_names.join(" "));
    eprintln!("--presorted={}", args.presorted);
    eprintln!("--verify-grouping={}", options.verify_grouping);
    eprintln!("--field-separator={}", options.field_separator);
    eprintln!("--mode={}", FileMode::from(args.mode));
    eprintln!("--output-file={}", args.output_file.display());
}

fn open_input(path: &Path, options: &ReaderOptions) -> Result<TsvReader<Box<dyn Read>>> {
    let input: Box<dyn Read> = if path == Path::new("-") {
        log::info!("reading the input data from stdin");
        Box::new(io::stdin())
    } else {
        log::info!("opening the input file: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("open input file {}", path.display()))?;
        Box::new(file)
    };
    TsvReader::new(input, options).with_context(|| format!("read header of {}", path.display()))
}

fn process(args: &Args, options: CompactOptions) -> Result<()> {
    let reader = open_input(
        &args.input,
        &ReaderOptions {
            mode: args.mode.into(),
        },
    )?;
    // Resolve keys before touching the output so configuration errors leave nothing behind.
    let compactor = Compactor::new(reader.header(), options)?;

    let output = Output::create(&args.output_file)
        .with_context(|| format!("create output file {}", args.output_file.display()))?;
    let mut writer = TsvWriter::new(output, reader.header().names().to_vec())?;
    compactor.run(reader, &mut writer)?;
    writer
        .finish()?
        .commit()
        .with_context(|| format!("write output file {}", args.output_file.display()))?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    // Transparent error variants hide the inner `io::Error` from `chain()`.
    err.chain().any(|cause| {
        let io_err = cause
            .downcast_ref::<io::Error>()
            .or_else(|| match cause.downcast_ref::<KgtkIoError>() {
                Some(KgtkIoError::Io(err)) => Some(err),
                _ => None,
            })
            .or_else(|| match cause.downcast_ref::<CompactError>() {
                Some(CompactError::Io(KgtkIoError::Io(err))) => Some(err),
                _ => None,
            });
        io_err.is_some_and(|err| err.kind() == io::ErrorKind::BrokenPipe)
    })
}
