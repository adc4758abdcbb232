use std::path::Path;

use tw_sheet::Settings;

pub fn run(workbook: Option<&Path>, seed: Option<u64>, settings: &Settings) -> Result<(), String> {
    let mut settings = settings.clone();
    if let Some(path) = workbook {
        settings.workbook = Some(path.to_path_buf());
    }

    let mut app = tw_tui::app::App::new(settings, seed);
    let result = tw_tui::terminal::run(&mut app);
    app.save_settings().ok();
    result
}
