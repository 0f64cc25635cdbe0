/// Example: a flatter cube tumbling about the X axis while it drifts upward
///
/// Usage: cargo run --example custom_cube

use wirecube_core::{Axis, SceneConfig, SceneModel};
use wirecube_terminal::{RunSettings, Result, TerminalApp};

fn main() -> Result<()> {
    env_logger::init();

    let config = SceneConfig {
        half_extent: 3.0,
        depth: 2.0,
        translation: [0.0, 3.0, 0.0],
        step: 0.02,
        axis: Axis::X,
        ..SceneConfig::default()
    };
    let scene = SceneModel::new(&config)?;

    let mut app = TerminalApp::new(scene, RunSettings::default())?;
    app.run()?;
    Ok(())
}
