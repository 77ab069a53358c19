//! Scripted replay of editor input.
//!
//! A script is a JSON document listing input events, commands and
//! text-entry results. Replaying one drives a fresh [`Editor`] exactly as a
//! host would and reports what ended up on the canvas.

use serde::{Deserialize, Serialize};
use sketchpad_core::{
    ConfigError, DrawingElement, Editor, EditorCommand, EditorConfig, EditorResponse, InputEvent,
};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Script parse error: {0}")]
    Parse(String),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Feed an input event.
    Event { event: InputEvent },
    /// Run a command directly, as a toolbar would.
    Command { command: EditorCommand },
    /// Answer the open text-entry request.
    CommitText { text: String },
    /// Dismiss the open text-entry request.
    CancelText,
    /// Report a new viewport size in screen pixels.
    Viewport { width: f64, height: f64 },
}

/// A replay script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Inline editor config, used when none is given on the command line.
    #[serde(default)]
    pub config: Option<EditorConfig>,
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        let script: Self = serde_json::from_str(json).map_err(|e| ReplayError::Parse(e.to_string()))?;
        if let Some(config) = &script.config {
            config.validate()?;
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ReplayError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

/// Run every step against a fresh editor.
///
/// `config` overrides the script's inline config.
pub fn run(script: &Script, config: Option<EditorConfig>) -> Editor {
    let config = config.or_else(|| script.config.clone()).unwrap_or_default();
    let mut editor = Editor::new(config);
    for (index, step) in script.steps.iter().enumerate() {
        let response = apply(&mut editor, step);
        log::debug!("Step {index}: {step:?} -> {response:?}");
        if let EditorResponse::BeginTextEntry(request) = &response {
            log::info!("Step {index} opened text entry at {:?}", request.position);
        }
    }
    if editor.pending_text_entry().is_some() {
        log::warn!("Script ended with an unanswered text entry");
    }
    editor
}

fn apply(editor: &mut Editor, step: &ScriptStep) -> EditorResponse {
    match step {
        ScriptStep::Event { event } => editor.handle_event(*event),
        ScriptStep::Command { command } => editor.execute(*command),
        ScriptStep::CommitText { text } => editor.commit_text(text),
        ScriptStep::CancelText => editor.cancel_text(),
        ScriptStep::Viewport { width, height } => {
            editor.set_viewport_size(kurbo::Size::new(*width, *height));
            EditorResponse::Redraw
        }
    }
}

/// What a replay left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub strokes: usize,
    pub lines: usize,
    pub rectangles: usize,
    pub circles: usize,
    pub texts: usize,
    pub selected: usize,
    /// Snapshots in history, including the initial empty one.
    pub history_len: usize,
    pub zoom: f64,
}

impl Summary {
    pub fn of(editor: &Editor) -> Self {
        let mut summary = Self {
            selected: editor.selection().len(),
            history_len: editor.history().len(),
            zoom: editor.camera().zoom(),
            ..Default::default()
        };
        for element in editor.store().iter() {
            match element {
                DrawingElement::Stroke(_) => summary.strokes += 1,
                DrawingElement::Line(_) => summary.lines += 1,
                DrawingElement::Rectangle(_) => summary.rectangles += 1,
                DrawingElement::Circle(_) => summary.circles += 1,
                DrawingElement::Text(_) => summary.texts += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.strokes + self.lines + self.rectangles + self.circles + self.texts
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} element(s): {} stroke, {} line, {} rectangle, {} circle, {} text; {} selected; {} snapshot(s); zoom {:.2}",
            self.total(),
            self.strokes,
            self.lines,
            self.rectangles,
            self.circles,
            self.texts,
            self.selected,
            self.history_len,
            self.zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCRIPT: &str = r#"{
        "steps": [
            {"type": "command", "command": {"SetTool": "rectangle"}},
            {"type": "event", "event": {"PointerDown": {"button": "Left", "position": {"x": 10.0, "y": 10.0}}}},
            {"type": "event", "event": {"PointerMove": {"position": {"x": 50.0, "y": 40.0}}}},
            {"type": "event", "event": {"PointerUp": {}}},
            {"type": "command", "command": "SelectAll"},
            {"type": "command", "command": "Duplicate"},
            {"type": "command", "command": {"SetTool": "text"}},
            {"type": "event", "event": {"PointerDown": {"button": "Left", "position": {"x": 200.0, "y": 200.0}}}},
            {"type": "commit_text", "text": "label"},
            {"type": "event", "event": {"KeyDown": {"key": {"Character": "z"}, "modifiers": {"ctrl": true}}}}
        ]
    }"#;

    #[test]
    fn test_replay_script() {
        let script = Script::from_json(SCRIPT).unwrap();
        assert_eq!(script.steps.len(), 10);
        let editor = run(&script, None);
        let summary = Summary::of(&editor);
        // The label was undone; both rectangles remain.
        assert_eq!(summary.rectangles, 2);
        assert_eq!(summary.texts, 0);
        assert_eq!(summary.selected, 1);
        assert_eq!(summary.history_len, 4);
        assert!(summary.to_string().starts_with("2 element(s)"));
    }

    #[test]
    fn test_cancelled_text_adds_nothing() {
        let script = Script {
            config: None,
            steps: vec![
                ScriptStep::Command {
                    command: EditorCommand::SetTool(sketchpad_core::ToolKind::Text),
                },
                ScriptStep::Event {
                    event: InputEvent::PointerDown {
                        button: sketchpad_core::MouseButton::Left,
                        position: kurbo::Point::new(5.0, 5.0),
                        modifiers: Default::default(),
                    },
                },
                ScriptStep::CancelText,
                ScriptStep::CommitText { text: "late".into() },
            ],
        };
        let editor = run(&script, None);
        assert!(editor.store().is_empty());
    }

    #[test]
    fn test_inline_config_and_override() {
        let json = r#"{"config": {"snap_to_grid": true, "grid_size": 50.0}, "steps": []}"#;
        let script = Script::from_json(json).unwrap();
        assert!(run(&script, None).grid().snap_enabled);
        assert!(!run(&script, Some(EditorConfig::default())).grid().snap_enabled);
    }

    #[test]
    fn test_invalid_inline_config() {
        let err = Script::from_json(r#"{"config": {"grid_size": -1.0}, "steps": []}"#).unwrap_err();
        assert!(matches!(err, ReplayError::Config(_)));
    }

    #[test]
    fn test_load_from_files() {
        let mut script_file = tempfile::NamedTempFile::new().unwrap();
        script_file.write_all(SCRIPT.as_bytes()).unwrap();
        let script = Script::load(script_file.path()).unwrap();

        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        config_file
            .write_all(br#"{"duplicate_offset": {"x": 100.0, "y": 0.0}}"#)
            .unwrap();
        let config = EditorConfig::load(config_file.path()).unwrap();

        let editor = run(&script, Some(config));
        let xs: Vec<f64> = editor.store().iter().map(|el| el.bounding_box().x0).collect();
        assert_eq!(xs, vec![10.0, 110.0]);
    }

    #[test]
    fn test_missing_and_malformed_scripts() {
        assert!(matches!(Script::load("/nonexistent/script.json"), Err(ReplayError::Io(_))));
        assert!(matches!(Script::from_json("[1, 2"), Err(ReplayError::Parse(_))));
    }
}
