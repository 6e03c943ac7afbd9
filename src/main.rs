use glint::{App, Result, ViewerSettings};

fn main() -> Result<()> {
    env_logger::init();

    let mut settings = ViewerSettings::default();
    if let Some(path) = std::env::args().nth(1) {
        settings.model_path = path.into();
    }

    App::new(settings).run()
}
