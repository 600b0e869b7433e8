use lantern::{AppConfig, LanternApp};
use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("lantern=info,warn"))
        .init();

    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    LanternApp::new(config).run()?;
    Ok(())
}
