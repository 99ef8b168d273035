mod app;
mod catalog;
mod config;
mod export;
mod raster;
mod render;
mod sim;
mod util;

fn main() {
    env_logger::init();
    log::info!("eggsplat starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
