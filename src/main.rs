// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use clap::{crate_version, Parser, Subcommand};
use earmark::config;
use earmark::controller::{keyboard, Controller};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "An audio annotation survey."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs a survey, reading commands from the keyboard.
    Start {
        /// The path to the survey config.
        survey_path: String,
    },
    /// Verifies a survey config and prints it.
    Verify {
        /// The path to the survey config.
        survey_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start { survey_path } => {
            let survey = config::init_survey(&PathBuf::from(survey_path))?;
            Controller::new(survey, Arc::new(keyboard::Driver::new()))?
                .join()
                .await?;
            // The keyboard driver may still be blocked on stdin, which would hold the runtime
            // open on shutdown.
            std::process::exit(0);
        }
        Commands::Verify { survey_path } => {
            let survey = config::Survey::deserialize(&PathBuf::from(&survey_path))?;
            println!("{}", survey);
            println!("Survey {} is valid.", survey_path);
        }
    }

    Ok(())
}
