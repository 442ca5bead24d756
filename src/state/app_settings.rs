use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Whether the adaptive refresher starts on launch.
    pub auto_refresh: bool,
    pub log_level: Option<LevelFilter>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { auto_refresh: true, log_level: None }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        // ASTROS_TUI_NO_AUTOREFRESH opts out of polling on start.
        let auto_refresh = std::env::var("ASTROS_TUI_NO_AUTOREFRESH").is_err();
        // ASTROS_TUI_LOG raises the in-app log pane level (error/warn/info/debug).
        let log_level = std::env::var("ASTROS_TUI_LOG")
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok());
        Self { auto_refresh, log_level }
    }
}
