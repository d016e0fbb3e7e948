//! `trussview <model.json> [options.toml]`
//!
//! Opens a window showing the structural model. Without a model path the
//! window starts empty; press the open-model key (default `O`) to pick one.

use std::path::PathBuf;
use std::process::ExitCode;

use trussview::{Options, Viewer};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let model = args.next();
    let options = match args.next() {
        Some(path) => match Options::load(&path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("Failed to load options {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    if let Some(path) = model {
        builder = builder.with_path(path);
    }

    match builder.build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
