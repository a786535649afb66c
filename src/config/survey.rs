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
use std::{fmt, path::Path};

use config::{Config, File};
use serde::Deserialize;

use crate::{
    canvas::Dimensions,
    gesture::{Bindings as GestureBindings, Modifier},
    timeline::Timeline,
};

use super::error::ConfigError;

const DEFAULT_COMPLETION: &str = "thankyou.html";
const DEFAULT_PLAYER: &str = "log";
const DEFAULT_PAGE: &str = "console";
const DEFAULT_SURFACE_KIND: &str = "text";
const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 100.0;
const DEFAULT_LEFT_INSET: f64 = 107.0;
const DEFAULT_RIGHT_INSET: f64 = 188.0;

/// A YAML representation of the rendering surface.
#[derive(Deserialize, Clone, Default)]
pub struct Surface {
    /// The kind of surface to draw on (default: "text").
    kind: Option<String>,
    /// The surface width (default: 800).
    width: Option<f64>,
    /// The surface height (default: 100).
    height: Option<f64>,
    /// Space left of the timeline reserved for the rest of the page (default: 107).
    left_inset: Option<f64>,
    /// Space right of the timeline reserved for the rest of the page (default: 188).
    right_inset: Option<f64>,
}

/// A YAML representation of the modifier bindings.
#[derive(Deserialize, Clone, Default)]
pub struct Bindings {
    /// The modifier held to delete a marker (default: shift).
    delete: Option<String>,
    /// The modifier held to insert a marker (default: ctrl).
    insert: Option<String>,
}

/// The configuration for a survey.
#[derive(Deserialize, Clone)]
pub struct Survey {
    /// The audio sources to annotate, in order.
    #[serde(default)]
    samples: Vec<String>,
    /// Where to send the listener after the last sample.
    completion: Option<String>,
    /// Whether the player starts out looping.
    #[serde(rename = "loop")]
    looping: Option<bool>,
    /// The audio player to use.
    player: Option<String>,
    /// The page to display labels and controls on.
    page: Option<String>,
    /// The rendering surface.
    surface: Option<Surface>,
    /// The modifier bindings.
    bindings: Option<Bindings>,
}

impl Survey {
    /// Creates a new survey configuration with defaults for everything but the samples.
    pub fn new(samples: &[String]) -> Survey {
        Survey {
            samples: samples.to_owned(),
            completion: None,
            looping: None,
            player: None,
            page: None,
            surface: None,
            bindings: None,
        }
    }

    /// Parse and validate a survey from a YAML file.
    pub fn deserialize(path: &Path) -> Result<Survey, ConfigError> {
        let survey = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<Survey>()?;
        survey.validate()?;
        Ok(survey)
    }

    /// Checks that the survey can be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples.is_empty() {
            return Err(ConfigError::NoSamples);
        }
        self.timeline()?;
        self.bindings()?;
        Ok(())
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn completion(&self) -> &str {
        self.completion.as_deref().unwrap_or(DEFAULT_COMPLETION)
    }

    pub fn looping(&self) -> bool {
        self.looping.unwrap_or(false)
    }

    pub fn player(&self) -> &str {
        self.player.as_deref().unwrap_or(DEFAULT_PLAYER)
    }

    pub fn page(&self) -> &str {
        self.page.as_deref().unwrap_or(DEFAULT_PAGE)
    }

    fn surface(&self) -> Surface {
        self.surface.clone().unwrap_or_default()
    }

    pub fn surface_kind(&self) -> String {
        self.surface()
            .kind
            .unwrap_or_else(|| DEFAULT_SURFACE_KIND.to_string())
    }

    pub fn dimensions(&self) -> Dimensions {
        let surface = self.surface();
        Dimensions::new(
            surface.width.unwrap_or(DEFAULT_WIDTH),
            surface.height.unwrap_or(DEFAULT_HEIGHT),
        )
    }

    /// The timeline, derived from the surface width and insets.
    pub fn timeline(&self) -> Result<Timeline, ConfigError> {
        let dimensions = self.dimensions();
        let valid = |extent: f64| extent.is_finite() && extent > 0.0;
        if !valid(dimensions.width) || !valid(dimensions.height) {
            return Err(ConfigError::InvalidDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }

        let surface = self.surface();
        Ok(Timeline::from_surface(
            dimensions.width,
            surface.left_inset.unwrap_or(DEFAULT_LEFT_INSET),
            surface.right_inset.unwrap_or(DEFAULT_RIGHT_INSET),
        )?)
    }

    pub fn bindings(&self) -> Result<GestureBindings, ConfigError> {
        let defaults = GestureBindings::default();
        let bindings = self.bindings.clone().unwrap_or_default();
        let parse = |binding: &'static str, value: Option<String>, default: Modifier| match value {
            Some(value) => value.parse::<Modifier>().map_err(|e| ConfigError::Binding {
                binding,
                reason: e.to_string(),
            }),
            None => Ok(default),
        };

        let resolved = GestureBindings {
            delete: parse("delete", bindings.delete, defaults.delete)?,
            insert: parse("insert", bindings.insert, defaults.insert)?,
        };
        if resolved.delete == resolved.insert {
            return Err(ConfigError::Binding {
                binding: "insert",
                reason: format!("{} is already bound to delete", resolved.insert),
            });
        }

        Ok(resolved)
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Survey ({} samples):", self.samples.len())?;
        for sample in self.samples.iter() {
            writeln!(f, "  - {}", sample)?;
        }
        let dimensions = self.dimensions();
        writeln!(
            f,
            "Surface: {} ({}x{})",
            self.surface_kind(),
            dimensions.width,
            dimensions.height
        )?;
        match self.timeline() {
            Ok(timeline) => writeln!(f, "Timeline: {}", timeline)?,
            Err(e) => writeln!(f, "Timeline: invalid ({})", e)?,
        }
        writeln!(f, "Player: {} (loop: {})", self.player(), self.looping())?;
        writeln!(f, "Completion: {}", self.completion())
    }
}

#[cfg(test)]
mod test {
    use std::{error::Error, fs, path::PathBuf};

    use tempfile::TempDir;

    use crate::{config::ConfigError, gesture::Modifier};

    use super::Survey;

    fn write_survey(dir: &TempDir, contents: &str) -> Result<PathBuf, Box<dyn Error>> {
        let path = dir.path().join("survey.yaml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn test_defaults() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = write_survey(
            &dir,
            r#"
samples:
  - audio/one.wav
  - audio/two.wav
"#,
        )?;

        let survey = Survey::deserialize(&path)?;
        assert_eq!(
            &["audio/one.wav".to_string(), "audio/two.wav".to_string()],
            survey.samples()
        );
        assert_eq!("thankyou.html", survey.completion());
        assert!(!survey.looping());
        assert_eq!("log", survey.player());
        assert_eq!("console", survey.page());
        assert_eq!("text", survey.surface_kind());
        assert_eq!(800.0, survey.dimensions().width);
        assert_eq!(100.0, survey.dimensions().height);

        let timeline = survey.timeline()?;
        assert_eq!(107.0, timeline.lower());
        assert_eq!(612.0, timeline.upper());

        let bindings = survey.bindings()?;
        assert_eq!(Modifier::Shift, bindings.delete);
        assert_eq!(Modifier::Ctrl, bindings.insert);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = write_survey(
            &dir,
            r#"
samples:
  - a.wav
completion: done.html
loop: true
player: mock-player
page: mock-page
surface:
  kind: mock-surface
  width: 1000
  height: 60
  left_inset: 50
  right_inset: 50
bindings:
  delete: alt
  insert: shift
"#,
        )?;

        let survey = Survey::deserialize(&path)?;
        assert_eq!("done.html", survey.completion());
        assert!(survey.looping());
        assert_eq!("mock-player", survey.player());
        assert_eq!("mock-page", survey.page());
        assert_eq!("mock-surface", survey.surface_kind());
        assert_eq!(30.0, survey.dimensions().baseline());

        let timeline = survey.timeline()?;
        assert_eq!(50.0, timeline.lower());
        assert_eq!(950.0, timeline.upper());

        let bindings = survey.bindings()?;
        assert_eq!(Modifier::Alt, bindings.delete);
        assert_eq!(Modifier::Shift, bindings.insert);
        Ok(())
    }

    #[test]
    fn test_no_samples() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = write_survey(&dir, "samples: []\n")?;
        assert!(matches!(
            Survey::deserialize(&path),
            Err(ConfigError::NoSamples)
        ));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Survey::deserialize(&PathBuf::from("/nonexistent/survey.yaml")),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_invalid_surface() {
        let mut survey = Survey::new(&["a.wav".to_string()]);
        survey.surface = Some(super::Surface {
            width: Some(200.0),
            ..Default::default()
        });
        assert!(matches!(survey.validate(), Err(ConfigError::Timeline(_))));

        for height in [0.0, f64::NAN, f64::INFINITY] {
            survey.surface = Some(super::Surface {
                height: Some(height),
                ..Default::default()
            });
            assert!(matches!(
                survey.validate(),
                Err(ConfigError::InvalidDimensions { .. })
            ));
        }

        survey.surface = Some(super::Surface {
            width: Some(f64::NAN),
            ..Default::default()
        });
        assert!(matches!(
            survey.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_invalid_bindings() {
        let mut survey = Survey::new(&["a.wav".to_string()]);
        survey.bindings = Some(super::Bindings {
            delete: Some("hyper".to_string()),
            insert: None,
        });
        assert!(matches!(
            survey.validate(),
            Err(ConfigError::Binding {
                binding: "delete",
                ..
            })
        ));

        survey.bindings = Some(super::Bindings {
            delete: Some("ctrl".to_string()),
            insert: None,
        });
        assert!(matches!(
            survey.validate(),
            Err(ConfigError::Binding {
                binding: "insert",
                ..
            })
        ));
    }
}
