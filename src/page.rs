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
use std::{error::Error, sync::Arc};

pub mod console;
pub mod mock;

/// The text display that names the current sample.
pub trait Label: Send + Sync {
    fn set_text(&self, text: &str);
}

/// The control that advances to the next sample or submits the survey.
pub trait AdvanceControl: Send + Sync {
    fn set_label(&self, label: &str);

    fn set_enabled(&self, enabled: bool);
}

/// Takes the listener away from the survey once it's complete.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &str);
}

/// The page elements the progression drives.
#[derive(Clone)]
pub struct Page {
    pub label: Arc<dyn Label>,
    pub control: Arc<dyn AdvanceControl>,
    pub navigator: Arc<dyn Navigator>,
}

impl Page {
    /// Builds a page whose elements are all backed by the same implementation.
    pub fn shared<T>(elements: Arc<T>) -> Page
    where
        T: Label + AdvanceControl + Navigator + 'static,
    {
        Page {
            label: elements.clone(),
            control: elements.clone(),
            navigator: elements,
        }
    }
}

/// Gets the page with the given name.
pub fn get_page(name: &str) -> Result<Page, Box<dyn Error>> {
    if name.starts_with("mock") {
        return Ok(Page::shared(Arc::new(mock::Page::get(name))));
    }

    match name {
        "console" => Ok(Page::shared(Arc::new(console::Page::new()))),
        _ => Err(format!("unsupported page {}", name).into()),
    }
}
