//! Browser entry point: mounts the root component on `#app`.

fn main() {
    dioxus::LaunchBuilder::web()
        .with_cfg(dioxus::web::Config::new().rootname("app"))
        .launch(todo_api_client::app::App);
}
