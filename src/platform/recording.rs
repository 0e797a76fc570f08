//! Recording renderer and scripted input

use std::collections::BTreeSet;

use glam::Vec2;

use crate::renderer::{LabelId, Renderer};
use crate::sim::{BodyHandle, InputSource, Key, ShapeDescriptor};

/// One renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Clear,
    DrawShape {
        body: BodyHandle,
        shape: ShapeDescriptor,
        position: Vec2,
        color: u32,
    },
    DrawBar(f32),
    SetLabel {
        label: LabelId,
        text: String,
        position: Vec2,
    },
    ScrollBy(f32),
    Shake {
        duration_ms: f32,
        intensity: f32,
    },
    FadeOut(f32),
    FollowBody(BodyHandle),
    Decoration(Vec2),
}

/// Renderer that keeps every command it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    /// Take recorded commands, leaving the log empty
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Latest text and position set on a label
    pub fn label(&self, label: LabelId) -> Option<(&str, Vec2)> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::SetLabel {
                label: l,
                text,
                position,
            } if *l == label => Some((text.as_str(), *position)),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&RenderCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.commands.push(RenderCommand::Clear);
    }

    fn draw_shape(
        &mut self,
        body: BodyHandle,
        shape: &ShapeDescriptor,
        position: Vec2,
        color: u32,
    ) {
        self.commands.push(RenderCommand::DrawShape {
            body,
            shape: shape.clone(),
            position,
            color,
        });
    }

    fn draw_bar(&mut self, y: f32) {
        self.commands.push(RenderCommand::DrawBar(y));
    }

    fn set_label(&mut self, label: LabelId, text: &str, position: Vec2) {
        self.commands.push(RenderCommand::SetLabel {
            label,
            text: text.to_string(),
            position,
        });
    }

    fn scroll_by(&mut self, dy: f32) {
        self.commands.push(RenderCommand::ScrollBy(dy));
    }

    fn shake(&mut self, duration_ms: f32, intensity: f32) {
        self.commands.push(RenderCommand::Shake {
            duration_ms,
            intensity,
        });
    }

    fn fade_out(&mut self, duration_ms: f32) {
        self.commands.push(RenderCommand::FadeOut(duration_ms));
    }

    fn follow_body(&mut self, body: BodyHandle) {
        self.commands.push(RenderCommand::FollowBody(body));
    }

    fn spawn_decoration(&mut self, position: Vec2) {
        self.commands.push(RenderCommand::Decoration(position));
    }
}

/// Input source whose held keys are set by the caller
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: BTreeSet<Key>,
}

impl ScriptedInput {
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputSource for ScriptedInput {
    fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
