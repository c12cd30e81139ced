use clap::Parser;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use typeahead::config::{FormSpec, SuggestConfig, load_source_file, parse_source_lines};
use typeahead::form::Form;
use typeahead::renderer::{Renderer, RendererConfig};
use typeahead::runtime::{Runtime, Session, replay};
use typeahead::terminal::Terminal;
use typeahead::widgets::inputs::text::TextInput;
use typeahead::{Error, NodeId, Result};

const BUNDLED_COUNTRIES: &str = include_str!("../assets/countries.txt");

/// Terminal form with screen-reader friendly typeahead suggestions.
#[derive(Parser, Debug)]
#[command(name = "typeahead", version)]
struct Args {
    /// Form definition (YAML or JSON). Without it a country form is shown.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Newline separated suggestions for the country field.
    #[arg(long, value_name = "FILE", conflicts_with = "config")]
    source: Option<PathBuf>,

    #[arg(long, conflicts_with = "config")]
    min_length: Option<usize>,

    #[arg(long, conflicts_with = "config")]
    max_results: Option<usize>,

    /// Text announced when the country field gains focus.
    #[arg(long, conflicts_with = "config")]
    instructions: Option<String>,

    /// Draw live region announcements as a status line.
    #[arg(long)]
    show_live_region: bool,

    /// Write tracing output here. RUST_LOG overrides the default filter.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Run a key script headlessly and print the result as JSON.
    #[arg(long, value_name = "SCRIPT")]
    replay: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let form = build_form(&args)?;
    tracing::info!(fields = form.len(), "form ready");

    let interactive = args.replay.is_none();
    let renderer = Renderer::new(RendererConfig {
        title: Some("typeahead".to_string()),
        show_live_region: args.show_live_region,
        show_key_hints: interactive,
        ..RendererConfig::default()
    });
    let mut session = Session::new(form, renderer);

    if let Some(script_path) = &args.replay {
        let script = read_file(script_path)?;
        let steps = replay::parse_script(&script)?;
        let report = replay::run(&mut session, &steps, Instant::now());
        let json = serde_json::to_string_pretty(&report).map_err(Error::Report)?;
        println!("{json}");
        return Ok(());
    }

    let mut runtime = Runtime::new(session, Terminal::new()?);
    runtime.run()?;

    for (id, value) in runtime.session().form().values() {
        println!("{id}: {value}");
    }
    Ok(())
}

fn build_form(args: &Args) -> Result<Form> {
    if let Some(path) = &args.config {
        let spec = FormSpec::load(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        return Form::from_spec(&spec, base_dir);
    }

    let source = match &args.source {
        Some(path) => load_source_file(path)?,
        None => parse_source_lines(BUNDLED_COUNTRIES),
    };
    let mut config = SuggestConfig::new(source);
    if let Some(min_length) = args.min_length {
        config = config.with_min_length(min_length);
    }
    if let Some(max_results) = args.max_results {
        config = config.with_max_results(max_results);
    }
    if let Some(instructions) = &args.instructions {
        config = config.with_instructions(instructions.clone());
    }

    let country = NodeId::from("country");
    let mut form = Form::new()
        .with_field(
            TextInput::new(country.clone(), "Country").with_placeholder("Start typing a country"),
        )
        .with_field(TextInput::new("notes", "Notes"));
    form.attach(&country, config);
    Ok(form)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typeahead=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
