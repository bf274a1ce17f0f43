//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting Shapeboard");

    pollster::block_on(shapeboard_app::App::run());
}
