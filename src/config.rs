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
use std::error::Error;
use std::path::Path;

use tracing::info;

use crate::{annotator::Annotator, audio, canvas, page};

mod error;
mod survey;

pub use self::error::ConfigError;
pub use self::survey::Survey;

/// Loads the survey described by the given config file and enters its first sample.
pub fn init_survey(path: &Path) -> Result<crate::survey::Survey, Box<dyn Error>> {
    let config = Survey::deserialize(path)?;
    info!(path = %path.display(), samples = config.samples().len(), "Loaded survey config.");

    let dimensions = config.dimensions();
    let surface = canvas::get_surface(&config.surface_kind(), dimensions)?;
    let player = audio::get_player(config.player())?;
    let page = page::get_page(config.page())?;
    let annotator = Annotator::new(config.timeline()?, dimensions, surface, config.bindings()?);

    Ok(crate::survey::Survey::new(
        annotator,
        config.samples().to_vec(),
        config.completion(),
        player,
        page,
        config.looping(),
    )?)
}
