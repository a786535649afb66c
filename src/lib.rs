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
//! An audio annotation survey: listeners place, drag and delete timestamp markers on a fixed
//! timeline for each sample in a sequence, then submit.
pub mod annotator;
pub mod audio;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod gesture;
pub mod markers;
pub mod page;
pub mod progression;
pub mod survey;
pub mod timeline;
