//! HUD and screen synchronisation
//!
//! The session pushes score/health changes and screen transitions through
//! `Hud`; the browser build implements it over the DOM.

/// Host UI the session keeps in sync
pub trait Hud {
    fn set_score(&mut self, score: u32);
    /// Health bar fill, 0-100
    fn set_health_percent(&mut self, percent: f32);
    fn show_start_screen(&mut self);
    fn show_game_over_screen(&mut self, final_score: u32);
    fn hide_screens(&mut self);
}

/// HUD that reports through the log (headless runs)
#[derive(Debug, Default)]
pub struct LogHud {
    last_health: Option<f32>,
}

impl Hud for LogHud {
    fn set_score(&mut self, score: u32) {
        log::debug!("Score: {}", score);
    }

    fn set_health_percent(&mut self, percent: f32) {
        // Only log 10% steps, contact damage updates every frame
        let bucket = (percent / 10.0).floor();
        if self.last_health.map(|h| (h / 10.0).floor()) != Some(bucket) {
            log::info!("Health: {:.0}%", percent);
        }
        self.last_health = Some(percent);
    }

    fn show_start_screen(&mut self) {
        log::info!("Press start");
    }

    fn show_game_over_screen(&mut self, final_score: u32) {
        log::info!("GAME OVER - final score {}", final_score);
    }

    fn hide_screens(&mut self) {}
}
