//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use diskdrag_app::{App, AppConfig, DEMO_ENV_VAR};

    env_logger::init();
    log::info!("Starting diskdrag");

    let config = match AppConfig::from_args(std::env::args().skip(1), std::env::var(DEMO_ENV_VAR).ok()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = App::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
