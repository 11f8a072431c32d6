use std::sync::Arc;

use gridmenu_config::SoundDefaults;
use gridmenu_engine::{behavior, Action, Sound, SoundCategory, Viewer};
use serde_json::{Map, Value};

use crate::error::ReadError;
use crate::fragment::Fragment;
use crate::registry::{ActionParser, ParserContext};

/// Where a text action sends its (substituted) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Message,
    Broadcast,
    Command,
    ConsoleCommand,
}

impl TextTarget {
    fn deliver(self, viewer: &dyn Viewer, text: &str) {
        match self {
            Self::Message => viewer.send_message(text),
            Self::Broadcast => viewer.broadcast(text),
            Self::Command => viewer.perform_command(text),
            Self::ConsoleCommand => viewer.run_console_command(text),
        }
    }
}

/// Scalar text with the player placeholder replaced by the viewer's name.
#[derive(Debug, Clone)]
pub struct TextAction {
    target: TextTarget,
    placeholder: Arc<str>,
}

impl TextAction {
    pub fn new(target: TextTarget, placeholder: impl Into<String>) -> Self {
        Self { target, placeholder: Arc::from(placeholder.into()) }
    }
}

impl ActionParser for TextAction {
    fn parse(&self, fragment: Fragment<'_>, _: &dyn ParserContext) -> Result<Action, ReadError> {
        let text = fragment
            .as_string()
            .ok_or_else(|| ReadError::Structural("Expected text".into()))?;
        let target = self.target;
        let placeholder = Arc::clone(&self.placeholder);

        Ok(behavior::action(move |viewer| {
            if text.contains(&*placeholder) {
                target.deliver(viewer, &text.replace(&*placeholder, viewer.name()));
            } else {
                target.deliver(viewer, &text);
            }
        }))
    }
}

/// `{sound, volume?, pitch?, category?, seed?}`
#[derive(Debug, Clone)]
pub struct SoundParser {
    defaults: SoundDefaults,
}

impl SoundParser {
    pub fn new(defaults: SoundDefaults) -> Self {
        Self { defaults }
    }
}

impl ActionParser for SoundParser {
    fn parse(&self, fragment: Fragment<'_>, _: &dyn ParserContext) -> Result<Action, ReadError> {
        let object = fragment
            .as_object()
            .ok_or_else(|| ReadError::Structural("Expected sound object".into()))?;

        let key = Fragment::field(object, "sound")
            .as_string()
            .ok_or_else(|| ReadError::Structural("Missing or invalid sound".into()))?;
        let category = match Fragment::field(object, "category").as_string() {
            Some(name) => name
                .parse::<SoundCategory>()
                .map_err(ReadError::Structural)?,
            None => self.defaults.category,
        };
        let sound = Sound {
            key,
            category,
            volume: number(object, "volume", |f| f.as_f64())?.map_or(self.defaults.volume, |v| v as f32),
            pitch: number(object, "pitch", |f| f.as_f64())?.map_or(self.defaults.pitch, |p| p as f32),
            seed: number(object, "seed", |f| f.as_i64())?.unwrap_or(self.defaults.seed),
        };

        Ok(behavior::action(move |viewer| viewer.play_sound(&sound)))
    }
}

/// An optional numeric field: absent is `None`, present but not a number fails.
fn number<'a, T>(
    object: &'a Map<String, Value>,
    key: &str,
    convert: impl Fn(&Fragment<'a>) -> Option<T>,
) -> Result<Option<T>, ReadError> {
    let field = Fragment::field(object, key);
    if !field.is_present() {
        return Ok(None);
    }
    convert(&field).map(Some).ok_or_else(|| {
        let value = object.get(key).map(Value::to_string).unwrap_or_default();
        ReadError::Structural(format!("Invalid sound {key}: {value}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::InterfaceReader;
    use gridmenu_engine::harness::{Effect, RecordingViewer};
    use serde_json::json;

    fn parse_with(parser: &dyn ActionParser, value: serde_json::Value) -> Result<Action, ReadError> {
        let reader = InterfaceReader::new();
        parser.parse(Fragment::of(Some(&value)), &reader)
    }

    #[test]
    fn message_substitutes_player() {
        let parser = TextAction::new(TextTarget::Message, "<player>");
        let action = parse_with(&parser, json!("Hello <player>, bye <player>")).unwrap();
        let viewer = RecordingViewer::new("Alex");
        action(&viewer);
        assert_eq!(viewer.messages(), vec!["Hello Alex, bye Alex"]);
    }

    #[test]
    fn targets_reach_matching_viewer_call() {
        let viewer = RecordingViewer::new("Sam");
        for target in [TextTarget::Broadcast, TextTarget::Command, TextTarget::ConsoleCommand] {
            let parser = TextAction::new(target, "%p%");
            parse_with(&parser, json!("x %p%")).unwrap()(&viewer);
        }
        assert_eq!(
            viewer.effects(),
            vec![
                Effect::Broadcast("x Sam".into()),
                Effect::Command("x Sam".into()),
                Effect::ConsoleCommand("x Sam".into()),
            ]
        );
    }

    #[test]
    fn numeric_scalar_is_text() {
        let parser = TextAction::new(TextTarget::Message, "<player>");
        let viewer = RecordingViewer::new("Alex");
        parse_with(&parser, json!(42)).unwrap()(&viewer);
        assert_eq!(viewer.messages(), vec!["42"]);
    }

    #[test]
    fn sound_defaults_apply() {
        let parser = SoundParser::new(SoundDefaults::default());
        let viewer = RecordingViewer::new("Alex");
        parse_with(&parser, json!({"sound": "minecraft:ui.button.click"})).unwrap()(&viewer);
        assert_eq!(viewer.sounds(), vec![Sound::new("minecraft:ui.button.click")]);
    }

    #[test]
    fn sound_fields_override_defaults() {
        let parser = SoundParser::new(SoundDefaults::default());
        let viewer = RecordingViewer::new("Alex");
        let action = parse_with(
            &parser,
            json!({"sound": "a", "volume": 0.5, "pitch": 2, "category": "Players", "seed": 9}),
        )
        .unwrap();
        action(&viewer);
        assert_eq!(
            viewer.sounds(),
            vec![Sound {
                key: "a".into(),
                category: SoundCategory::Players,
                volume: 0.5,
                pitch: 2.0,
                seed: 9,
            }]
        );
    }

    #[test]
    fn sound_requires_key() {
        let parser = SoundParser::new(SoundDefaults::default());
        let err = parse_with(&parser, json!({"volume": 1})).err().unwrap();
        assert!(matches!(err, ReadError::Structural(_)));
    }

    #[test]
    fn non_numeric_sound_fields_fail() {
        let parser = SoundParser::new(SoundDefaults::default());
        let err = parse_with(&parser, json!({"sound": "a", "volume": "loud"})).err().unwrap();
        assert_eq!(err.to_string(), "Invalid sound volume: \"loud\"");
        let err = parse_with(&parser, json!({"sound": "a", "seed": [1]})).err().unwrap();
        assert!(matches!(err, ReadError::Structural(_)));

        // Numeric strings are still numbers
        let viewer = RecordingViewer::new("Alex");
        parse_with(&parser, json!({"sound": "a", "pitch": "1.5"})).unwrap()(&viewer);
        assert_eq!(viewer.sounds()[0].pitch, 1.5);
    }

    #[test]
    fn unknown_sound_category_fails() {
        let parser = SoundParser::new(SoundDefaults::default());
        let err = parse_with(&parser, json!({"sound": "a", "category": "loud"})).err().unwrap();
        assert_eq!(err.to_string(), "unknown sound category: loud");
    }
}
