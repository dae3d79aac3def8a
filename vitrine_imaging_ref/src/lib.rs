// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Imaging Reference Backend.
//!
//! This crate provides a small, stateful implementation of
//! [`ImagingBackend`] for **IR recording and state tracing**.
//!
//! It does not rasterize. It is intended for tests and debugging that want
//! to assert on emitted ops and on the imaging state (transform, active
//! clips, effective opacity) at the time each op is applied.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Rect;
use vitrine_imaging::{
    Affine, ClipShape, Color, ContentId, DrawOp, ImagingBackend, ImagingOp, LayerOp, RecordedOps,
    StateOp, StrokeStyle,
};

/// Snapshot of the current imaging state inside the backend.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Number of active layers on the layer stack.
    pub layer_stack_depth: u32,
    /// The most recently pushed layer op, if any.
    pub layer_top: Option<LayerOp>,
    /// Clips of all active layers, outermost first.
    pub clips: Vec<ClipShape>,
    /// Product of the opacities of all active layers.
    pub opacity: f32,
    /// Current paint, if set.
    pub paint: Option<Color>,
    /// Current stroke style, if set.
    pub stroke: Option<StrokeStyle>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            layer_stack_depth: 0,
            layer_top: None,
            clips: Vec::new(),
            opacity: 1.0,
            paint: None,
            stroke: None,
        }
    }
}

/// Event recorded by the reference backend.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// A content draw together with the state it was drawn under.
#[derive(Clone, Copy, Debug)]
pub struct ContentDraw<'a> {
    /// The drawn content.
    pub content: ContentId,
    /// Destination rectangle in local coordinates.
    pub dst: Rect,
    /// State at the time of drawing.
    pub state: &'a StateSnapshot,
}

/// Simple reference implementation of the imaging backend.
///
/// This backend:
/// - Tracks current imaging state,
/// - Records high-level [`Event`]s as state and draw operations are applied,
/// - Supports recordings via `begin_record`/`end_record`.
#[derive(Default, Debug)]
pub struct RefBackend {
    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Underlying imaging ops, used to form `RecordedOps`.
    ops: Vec<ImagingOp>,
    /// Start index of the current recording, if any.
    recording_start: Option<usize>,
    /// Current imaging state.
    state: StateSnapshot,
    layer_stack: Vec<LayerOp>,
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of raw imaging operations.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Returns the current imaging state.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Returns every content draw in order, with its state.
    pub fn content_draws(&self) -> Vec<ContentDraw<'_>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Draw {
                    op: DrawOp::Content { content, dst },
                    state,
                } => Some(ContentDraw {
                    content: *content,
                    dst: *dst,
                    state,
                }),
                _ => None,
            })
            .collect()
    }

    /// Clears all recorded events and ops but keeps the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
        self.recording_start = None;
    }

    fn sync_layers(&mut self) {
        self.state.layer_stack_depth = u32::try_from(self.layer_stack.len())
            .expect("RefBackend: too many layer stack entries for u32");
        self.state.layer_top = self.layer_stack.last().cloned();
        self.state.clips = self
            .layer_stack
            .iter()
            .filter_map(|layer| layer.clip.clone())
            .collect();
        self.state.opacity = self
            .layer_stack
            .iter()
            .filter_map(|layer| layer.opacity)
            .product();
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetTransform(tx) => self.state.transform = *tx,
            StateOp::PushLayer(layer) => {
                self.layer_stack.push(layer.clone());
                self.sync_layers();
            }
            StateOp::PopLayer => {
                self.layer_stack.pop();
                self.sync_layers();
            }
            StateOp::SetPaint(color) => self.state.paint = Some(*color),
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
        }

        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }

    fn begin_record(&mut self) {
        self.recording_start = Some(self.ops.len());
    }

    fn end_record(&mut self) -> RecordedOps {
        let start = self.recording_start.take().unwrap_or(self.ops.len());
        RecordedOps {
            ops: Arc::from(&self.ops[start..]),
        }
    }
}
