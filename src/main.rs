//! Backdrop viewer binary: opens a window running the animated scene.
//! Usage: `backdrop [preset.toml]`.

use backdrop::{options::Options, Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            match Options::load(std::path::Path::new(&path)) {
                Ok(options) => options,
                Err(e) => {
                    log::error!("failed to load options preset: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => Options::default(),
    };

    let result = Viewer::builder()
        .with_title("Backdrop")
        .with_options(options)
        .build()
        .run();

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
