use cardfit::config::read_participants;
use cardfit::{
    BatchReport, EventConfig, ExecutorImpl, GeneratorBuilder, OverflowPolicy, PaperSpec,
    PipelineError,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generates one auto-fit invitation card per participant.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Event configuration (JSON)
    #[arg(long)]
    config: PathBuf,

    /// File with one participant name per line; replaces the configured list
    #[arg(long)]
    participants: Option<PathBuf>,

    /// Paper preset name (A4, A5, A6, LETTER, CARD_5X7, SQUARE) or a width in pixels
    #[arg(long)]
    paper: Option<PaperSpec>,

    /// Output directory; defaults to the configured folder
    #[arg(long)]
    output: Option<PathBuf>,

    /// Extra directory to load fonts from (repeatable)
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Do not scan the system for installed fonts
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Draw lines that are wider than the margins instead of failing
    #[arg(long, default_value_t = false)]
    allow_overflow: bool,

    /// Render cards one at a time
    #[arg(long, default_value_t = false)]
    sequential: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("cardfit=info"))
        .init();

    match run(Args::parse()) {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(report) => {
            for failure in &report.failures {
                eprintln!("✗ {}: {}", failure.participant, failure.error);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<BatchReport, PipelineError> {
    let mut config = EventConfig::load(&args.config)?;
    if let Some(path) = &args.participants {
        config.participants = read_participants(path)?
            .into_iter()
            .map(|p| p.display_name)
            .collect();
    }
    if let Some(paper) = args.paper {
        config.paper_size = paper;
    }
    if let Some(output) = args.output {
        config.output_folder = output;
    }
    if config.participants.is_empty() {
        return Err(PipelineError::Config(
            "No participants given. List them under \"participants\" or pass --participants."
                .to_string(),
        ));
    }

    let mut builder = GeneratorBuilder::new().with_system_fonts(!args.no_system_fonts);
    for dir in &args.font_dirs {
        builder = builder.with_font_dir(dir);
    }
    if args.allow_overflow {
        builder = builder.with_overflow_policy(OverflowPolicy::Allow);
    }
    if args.sequential {
        builder = builder.with_executor(ExecutorImpl::sequential());
    }
    let generator = builder.build();

    println!("{}", "=".repeat(60));
    println!("Invitation Card Generator (auto-fit height)");
    println!("{}", "=".repeat(60));
    println!("Event:        {}", config.event.title);
    println!("Paper width:  {}", config.paper_size);
    println!("Participants: {}", config.participants.len());
    println!("Output:       {}/", config.output_folder.display());
    println!("{}", "=".repeat(60));

    let report = generator.generate_from_config(&config)?;

    println!();
    println!("✓ Generated {} invitation cards on {}", report.count(), report.paper.name());
    if let Some(size) = report.card_size() {
        println!("  Actual size: {} × {} pixels", size.width, size.height);
    }
    println!("  Location:    {}/", report.output_folder.display());
    if !report.is_complete() {
        println!("  Failed:      {}", report.failures.len());
    }
    Ok(report)
}
