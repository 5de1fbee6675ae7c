mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::LaunchDashboardApp;
use clap::Parser;
use eframe::egui;

/// Loaded at startup when no path is given and the file exists.
const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

#[derive(Parser, Debug)]
#[command(
    name = "launch-dashboard",
    version,
    about = "SpaceX launch records dashboard"
)]
struct Args {
    /// Launch records to open (.csv, .json or .parquet).
    /// Defaults to spacex_launch_dash.csv in the working directory, if present.
    dataset: Option<PathBuf>,
}

impl Args {
    /// Dataset path: the argument, else the default file if present.
    fn dataset_path(self) -> Option<PathBuf> {
        self.dataset.or_else(|| {
            let default = PathBuf::from(DEFAULT_DATASET);
            default.is_file().then_some(default)
        })
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let path = Args::parse().dataset_path();
    match &path {
        Some(p) => log::info!("Dataset: {}", p.display()),
        None => log::info!("No dataset found; waiting for File → Open…"),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashboardApp::with_dataset(path.as_deref())))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_positional_dataset() {
        let args = Args::try_parse_from(["launch-dashboard", "launches.parquet"]).unwrap();
        assert_eq!(args.dataset, Some(PathBuf::from("launches.parquet")));
        assert_eq!(args.dataset_path(), Some(PathBuf::from("launches.parquet")));
    }

    #[test]
    fn test_args_reject_unknown_flag() {
        assert!(Args::try_parse_from(["launch-dashboard", "--foo"]).is_err());
    }

    #[test]
    fn test_args_dataset_optional() {
        let args = Args::try_parse_from(["launch-dashboard"]).unwrap();
        assert!(args.dataset.is_none());
    }
}
