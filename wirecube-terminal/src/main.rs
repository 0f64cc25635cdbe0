/// wirecube - animated wireframe cube in the terminal
///
/// The cube spins about the chosen axis while sliding toward its translated
/// position one small step per frame.
/// Controls:
///   - Space: Pause / resume
///   - Q/ESC: Quit
///
/// Logging goes to stderr and is controlled by `RUST_LOG`; redirect stderr
/// when running interactively.
use clap::Parser;
use std::io;
use wirecube_core::SceneModel;
use wirecube_terminal::{run_headless, Cli, Result, TerminalApp};

fn run(cli: &Cli) -> Result<()> {
    cli.validate()?;
    let config = cli.scene_config();
    log::debug!("scene config: {:?}", config);
    let mut scene = SceneModel::new(&config)?;

    if cli.headless {
        let stdout = io::stdout();
        return run_headless(&mut scene, cli.headless_frames(), &mut stdout.lock());
    }

    let mut app = TerminalApp::new(scene, cli.run_settings()?)?;
    app.run()?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        eprintln!("wirecube: {}", e);
        std::process::exit(1);
    }
}
