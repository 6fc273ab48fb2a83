mod app;
mod settings;

fn main() -> anyhow::Result<()> {
    app::run()
}
