use anyhow::Result;
use hn_search_tui::config::AppConfig;
use hn_search_tui::internal::ui::app::App;
use hn_search_tui::tui;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first to get logging settings.
    let config = AppConfig::load();

    // Try to initialize the terminal first so we can decide where tracing
    // should write. While the TUI owns the terminal, logs must not go to
    // stdout/stderr (that would corrupt the UI), so they go to a rotating
    // file instead. If TUI init fails we log to the console so the message
    // is visible.
    match tui::init() {
        Ok(terminal) => {
            let log_dir = config.logging.log_directory.as_deref().unwrap_or("logs");
            let file_appender = tracing_appender::rolling::daily(log_dir, "hn-search-tui.log");
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

            // RUST_LOG takes precedence over the configured level.
            let env_filter = match std::env::var("RUST_LOG") {
                Ok(_) => tracing_subscriber::EnvFilter::from_default_env(),
                Err(_) => tracing_subscriber::EnvFilter::new(config.logging.level.clone()),
            };

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact()
                .init();

            let mut app = App::new(config);
            let res = app.run(terminal).await;

            // Restore terminal state before exiting so the console is usable again.
            tui::restore()?;

            if let Err(err) = res {
                eprintln!("{err:?}");
            }

            Ok(())
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();

            eprintln!("Failed to initialize TUI: {e:?}");
            Err(e)
        }
    }
}
