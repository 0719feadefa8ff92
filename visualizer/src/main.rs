use clap::Parser;
use pathlab_core::{App, AppConfig};
use pathlab_crossterm::CrosstermDriver;
use pathlab_lib::{Args, Settings, Visualizer, logging};

fn main() {
    let settings = Settings::from(Args::parse());
    if let Err(e) = run(&settings) {
        eprintln!("pathlab: {e}");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(settings.log_level).map_err(|e| e.to_string())?;
    let model = Visualizer::new(settings);
    let (width, height) = (model.width(), model.height());
    let driver = CrosstermDriver::new().with_mouse(settings.mouse);
    let mut app = App::new(AppConfig {
        model,
        driver,
        width,
        height,
    });
    app.run()?;
    let status = app.model().context().status();
    if !status.to_string().is_empty() {
        println!("{status}");
    }
    Ok(())
}
