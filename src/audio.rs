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
use std::{error::Error, fmt, sync::Arc};

pub mod log;
pub mod mock;

/// The page's audio element. Swapping sources is fire-and-forget: nothing here reports
/// failure back to the caller.
pub trait Player: fmt::Display + Send + Sync {
    /// Points the player at the given audio source.
    fn set_source(&self, source: &str);

    /// Loads the current source so it's ready to play.
    fn load(&self);

    /// Sets whether playback loops.
    fn set_loop(&self, enabled: bool);
}

/// Gets a player with the given name.
pub fn get_player(name: &str) -> Result<Arc<dyn Player>, Box<dyn Error>> {
    if name.starts_with("mock") {
        return Ok(Arc::new(mock::Player::get(name)));
    };

    match name {
        "log" => Ok(Arc::new(log::Player::new())),
        _ => Err(format!("unsupported audio player {}", name).into()),
    }
}

#[cfg(test)]
mod test {
    use super::get_player;

    #[test]
    fn test_get_player() {
        assert!(get_player("log").is_ok());
        assert!(get_player("mock-player").is_ok());
        assert!(get_player("cpal").is_err());
    }
}
