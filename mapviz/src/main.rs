use clap::Parser;

mod args;
mod ops;
mod state;
mod ui;

use args::{Cli, Commands};

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut session = ops::load_from_cli(&cli)?;

    match cli.command {
        Commands::Regions => println!("{}", ops::dump_regions(session.map())?),
        Commands::Stats => println!("{}", ops::stats(session.map())),
        Commands::Locate { x, y } => println!("{}", ops::locate(&mut session, x, y)),
        Commands::Replay { script } => {
            for frame in ops::replay_file(session, &script)? {
                println!("{}", frame);
            }
        }
        Commands::Overlay {
            output,
            select,
            hover,
        } => ops::render_overlay(session, &select, hover, &output)?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_run_reports_load_failure() {
        let dir = tempdir().unwrap();
        let catalog = dir.path().join("regions.txt");
        std::fs::write(&catalog, "; only a comment\n").unwrap();
        RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))
            .save(dir.path().join("map.png"))
            .unwrap();

        let cli = Cli::parse_from([
            "mapviz",
            "--catalog",
            catalog.to_str().unwrap(),
            "--map",
            dir.path().join("map.png").to_str().unwrap(),
            "stats",
        ]);
        let err = run(cli).unwrap_err();
        assert!(format!("{:#}", err).contains("catalog is empty"));
    }
}
