//! Knotline demo - range editor and transfer function editor side by side

mod app;

use app::KnotlineDemo;

fn title(_app: &KnotlineDemo) -> String {
    String::from("knotline - Widget Demo")
}

fn main() -> iced::Result {
    // Set RUST_LOG=debug to see drag and commit events
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("knotline-demo starting up");

    iced::application(KnotlineDemo::new, KnotlineDemo::update, KnotlineDemo::view)
        .title(title)
        .window_size(iced::Size::new(720.0, 480.0))
        .theme(KnotlineDemo::theme)
        .run()
}
