//! Uploads images to the gallery server from the command line.

use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use photo_gallery::config::{DEFAULT_SERVER_URL, upload_endpoint};
use photo_gallery::upload::{TransferProgress, UploadClient, read_paths};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "gallery-upload", version, about = "Upload images to the photo gallery server")]
struct Args {
    /// Base URL of the gallery server
    #[arg(long, env = "GALLERY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,
    /// Images to upload in one batch
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let files = match read_paths(&args.files) {
        Ok(files) => files,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let style = ProgressStyle::with_template("{msg:24!} [{bar:40.cyan/blue}] {bytes:>9}/{total_bytes:9}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    let multi = MultiProgress::new();
    let bars: Vec<ProgressBar> = files
        .iter()
        .map(|file| {
            let bar = multi.add(ProgressBar::new(file.size()));
            bar.set_style(style.clone());
            bar.set_message(file.name.clone());
            bar
        })
        .collect();

    let progress_bars = bars.clone();
    let on_progress = move |progress: TransferProgress| {
        if let Some(bar) = progress_bars.get(progress.file_index) {
            bar.set_position(progress.sent);
        }
    };

    let client = UploadClient::new(upload_endpoint(&args.server));
    let result = client.upload(files, on_progress).await;

    for bar in &bars {
        bar.finish();
    }

    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
