//! Binary entry point: parses CLI arguments, initializes the logger once
//! (the library never does this itself), runs the lex/parse/emit pipeline,
//! and reports a core `Error` as a formatted diagnostic before falling
//! through to ordinary `?`-propagated I/O errors for genuinely unexpected
//! OS failures.

use std::error::Error;
use std::fs;

use clap::Parser;
use log::{debug, info};

use argonc::cli::{Cli, Config};
use argonc::codegen::runtime_template;
use argonc::codegen;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;
use argonc::source::SourceManager;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let config: Config = args.into();

    simple_logger::init_with_level(config.log_level).unwrap();

    let path = config.input.to_string_lossy().into_owned();
    let mut sources = SourceManager::new();
    if !sources.load_from_disk(&path) {
        return Err(format!("could not read {path}").into());
    }
    let text = fs::read_to_string(&config.input)?;
    debug!("{path}: {} bytes loaded", text.len());

    info!("compiling {path}");

    let tokens = match tokenize(&path, &text) {
        Ok(tokens) => tokens,
        Err(err) => return fail(&err),
    };
    debug!("{path}: {} tokens produced", tokens.len());

    let program = match parse_program(&path, tokens) {
        Ok(program) => program,
        Err(err) => return fail(&err.with_snippet_from(&sources, argonc::source::IndicatorKind::Caret)),
    };
    debug!("{path}: {} top-level declarations parsed", program.declarations.len());

    let (body, dependencies) = match codegen::generate(&program) {
        Ok(result) => result,
        Err(err) => return fail(&err.with_snippet_from(&sources, argonc::source::IndicatorKind::Caret)),
    };
    debug!("{path}: {} dependency tags emitted", dependencies.len());

    let emitted = format!("{}{body}", runtime_template::assemble(&dependencies));
    fs::write(&config.output, emitted)?;
    info!("wrote {}", config.output.display());

    if let Some(dot_path) = &config.dot {
        argonc::dot::emit(&program, dot_path);
    }

    Ok(())
}

/// Formats a core `Error` as a diagnostic and exits with status 1,
/// matching y-lang's `error!(...); std::process::exit(-1)` posture
/// but printing the already-built diagnostic text rather than
/// `Display`-ing a bare error value.
fn fail(err: &argonc::ArgonError) -> Result<(), Box<dyn Error>> {
    eprintln!("{}", err.formatted_message());
    std::process::exit(1);
}
