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

use crate::timeline::TimelineError;

/// Typed error for survey config load/parse failures so callers can distinguish
/// e.g. file-not-found from validation errors without string matching.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config load/parse error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("a survey needs at least one sample")]
    NoSamples,
    #[error("surface dimensions must be positive (width: {width}, height: {height})")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("invalid timeline: {0}")]
    Timeline(#[from] TimelineError),
    #[error("invalid {binding} binding: {reason}")]
    Binding { binding: &'static str, reason: String },
}
