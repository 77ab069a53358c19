//! The interaction engine.
//!
//! [`Editor`] owns every piece of mutable session state and is driven one
//! event at a time. Pointer gestures run through an explicit gesture
//! state; committed edits land in the [`HistoryManager`].

use crate::camera::Camera;
use crate::clipboard::{self, Clipboard};
use crate::config::EditorConfig;
use crate::elements::{DrawingElement, ElementId, ElementStyle, Text, normalized_rect};
use crate::handles::{self, HandleMarker, ResizeHandle};
use crate::history::{HistoryManager, HistorySnapshot};
use crate::input::{InputEvent, InputState, Key, Modifiers, MouseButton};
use crate::keymap::{self, EditorCommand};
use crate::render::RenderFrame;
use crate::selection::Selection;
use crate::snap::Grid;
use crate::store::ElementStore;
use crate::tools::{self, ToolKind, ToolManager};
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Default viewport size until the host reports one.
const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

/// Rotation applied by one rotate command, in degrees.
pub const ROTATION_STEP_DEGREES: f64 = 90.0;

/// What the host should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorResponse {
    /// Nothing visible changed.
    Unchanged,
    /// State changed; redraw.
    Redraw,
    /// Show the text-entry widget, then call [`Editor::commit_text`] or
    /// [`Editor::cancel_text`].
    BeginTextEntry(TextEntryRequest),
}

impl EditorResponse {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, EditorResponse::Unchanged)
    }
}

/// A request for text entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntryRequest {
    /// Baseline anchor in world coordinates.
    pub position: Point,
    /// Content to pre-fill when editing an existing label.
    pub existing: Option<String>,
    /// The label being edited, if any.
    pub target: Option<ElementId>,
}

/// Coarse gesture state, for hosts that change cursors or tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    Drawing,
    MovingSelection,
    ResizingSelection,
    BoxSelecting,
    Panning,
}

/// State of a selection move.
#[derive(Debug, Clone)]
struct MoveState {
    /// World point where the drag started.
    grab: Point,
    /// Selected elements as they were at grab time.
    originals: Vec<DrawingElement>,
}

/// State of a handle drag.
#[derive(Debug, Clone)]
struct ResizeState {
    handle: ResizeHandle,
    /// Element as it was when the drag started.
    original: DrawingElement,
    /// World to untransformed element space, fixed for the whole drag.
    to_local: Affine,
}

#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    /// The element being drawn already lives in the store.
    Drawing { id: ElementId },
    MovingSelection(MoveState),
    ResizingSelection(ResizeState),
    /// Corners of the marquee in world coordinates.
    BoxSelecting { origin: Point, current: Point },
    /// Pan captured at pointer-down; the pointer travel is added to it.
    Panning { pan_start: Vec2 },
}

impl Gesture {
    fn kind(&self) -> GestureKind {
        match self {
            Gesture::Idle => GestureKind::Idle,
            Gesture::Drawing { .. } => GestureKind::Drawing,
            Gesture::MovingSelection(_) => GestureKind::MovingSelection,
            Gesture::ResizingSelection(_) => GestureKind::ResizingSelection,
            Gesture::BoxSelecting { .. } => GestureKind::BoxSelecting,
            Gesture::Panning { .. } => GestureKind::Panning,
        }
    }
}

/// One editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    store: ElementStore,
    selection: Selection,
    camera: Camera,
    grid: Grid,
    tools: ToolManager,
    history: HistoryManager,
    clipboard: Clipboard,
    input: InputState,
    gesture: Gesture,
    pending_text: Option<TextEntryRequest>,
    viewport_size: Size,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Start an empty session.
    pub fn new(config: EditorConfig) -> Self {
        let grid = Grid::new(config.grid_size, config.show_grid, config.snap_to_grid);
        let camera = Camera::with_limits(config.min_zoom, config.max_zoom);
        let tools = ToolManager::new(config.default_style());
        let history = HistoryManager::new(HistorySnapshot::default(), config.history_limit);
        Self {
            config,
            store: ElementStore::new(),
            selection: Selection::new(),
            camera,
            grid,
            tools,
            history,
            clipboard: Clipboard::new(),
            input: InputState::new(),
            gesture: Gesture::Idle,
            pending_text: None,
            viewport_size: DEFAULT_VIEWPORT,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn style(&self) -> &ElementStyle {
        &self.tools.current_style
    }

    /// Style for elements drawn from now on. Existing elements keep theirs.
    pub fn set_style(&mut self, style: ElementStyle) {
        self.tools.current_style = style;
    }

    pub fn gesture(&self) -> GestureKind {
        self.gesture.kind()
    }

    /// The open text-entry request, if any.
    pub fn pending_text_entry(&self) -> Option<&TextEntryRequest> {
        self.pending_text.as_ref()
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    /// Box-selection marquee in world coordinates.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::BoxSelecting { origin, current } => Some(normalized_rect(origin, current)),
            _ => None,
        }
    }

    /// Handle markers for every selected resizable element.
    pub fn handle_markers(&self) -> Vec<HandleMarker> {
        self.selected_elements()
            .into_iter()
            .flat_map(handles::handle_markers)
            .collect()
    }

    /// Borrowed view of the current state for a renderer.
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::new(
            self.store.elements(),
            &self.selection,
            &self.camera,
            &self.grid,
            self.viewport_size,
        )
        .with_handles(self.handle_markers())
        .with_selection_rect(self.selection_rect())
    }

    /// Process one input event to completion.
    pub fn handle_event(&mut self, event: InputEvent) -> EditorResponse {
        self.input.observe(&event);
        match event {
            InputEvent::PointerDown {
                button,
                position,
                modifiers,
            } => self.pointer_down(button, position, modifiers),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { modifiers } => self.pointer_up(modifiers),
            InputEvent::Wheel { delta, modifiers } => self.wheel(delta, modifiers),
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
        }
    }

    fn pointer_down(&mut self, button: MouseButton, screen: Point, modifiers: Modifiers) -> EditorResponse {
        if !matches!(self.gesture, Gesture::Idle) {
            log::debug!("Ignoring {:?} press during {:?}", button, self.gesture.kind());
            return EditorResponse::Unchanged;
        }
        let world = self.camera.screen_to_world(screen);

        match button {
            MouseButton::Right | MouseButton::Middle => {
                if button == MouseButton::Right && self.tool() == ToolKind::Text {
                    if let Some(request) = self.text_edit_request_at(world) {
                        return self.begin_text_entry(request);
                    }
                }
                self.gesture = Gesture::Panning {
                    pan_start: self.camera.pan,
                };
                log::debug!("Panning from {:?}", screen);
                EditorResponse::Unchanged
            }
            MouseButton::Left => match self.tool() {
                tool if tool.creates_element() => self.begin_drawing(world),
                tool if tool.manipulates_selection() => self.pick(world, modifiers),
                ToolKind::Eraser => self.erase_at(world),
                _ => self.begin_text_entry(TextEntryRequest {
                    position: world,
                    existing: None,
                    target: None,
                }),
            },
        }
    }

    fn begin_drawing(&mut self, world: Point) -> EditorResponse {
        let Some(element) = self.tools.begin(world) else {
            return EditorResponse::Unchanged;
        };
        self.selection.clear();
        let id = self.store.push(element);
        self.gesture = Gesture::Drawing { id };
        log::debug!("Drawing {} at {:?}", self.tool().name(), world);
        EditorResponse::Redraw
    }

    fn text_edit_request_at(&self, world: Point) -> Option<TextEntryRequest> {
        let id = self.store.topmost_at(world, self.camera.zoom())?;
        let text = self.store.get(id)?.as_text()?;
        Some(TextEntryRequest {
            position: text.position,
            existing: Some(text.content.clone()),
            target: Some(id),
        })
    }

    fn begin_text_entry(&mut self, request: TextEntryRequest) -> EditorResponse {
        log::debug!("Text entry requested at {:?}", request.position);
        self.pending_text = Some(request.clone());
        EditorResponse::BeginTextEntry(request)
    }

    /// Erase the topmost element under the pointer. No drag-erasing.
    fn erase_at(&mut self, world: Point) -> EditorResponse {
        let Some(id) = self.store.topmost_at(world, self.camera.zoom()) else {
            return EditorResponse::Unchanged;
        };
        self.store.remove(id);
        self.selection.remove(id);
        self.commit("erase");
        EditorResponse::Redraw
    }

    /// Select/move tool press: resize, move or start a marquee.
    fn pick(&mut self, world: Point, modifiers: Modifiers) -> EditorResponse {
        let zoom = self.camera.zoom();

        for id in self.selection.front_to_back(&self.store) {
            let Some(element) = self.store.get(id) else {
                continue;
            };
            if let Some(handle) = handles::resize_handle(world, element, zoom) {
                log::debug!("Resizing {} via {:?}", id, handle);
                self.gesture = Gesture::ResizingSelection(ResizeState {
                    handle,
                    original: element.clone(),
                    to_local: element.render_transform().inverse(),
                });
                return EditorResponse::Redraw;
            }
        }

        if let Some(id) = self.store.topmost_at(world, zoom) {
            if modifiers.multi_select() {
                self.selection.toggle(id);
            } else if !self.selection.contains(id) {
                self.selection.select(id);
            }
            let originals: Vec<DrawingElement> = self.selected_elements().into_iter().cloned().collect();
            if !originals.is_empty() {
                log::debug!("Moving {} element(s)", originals.len());
                self.gesture = Gesture::MovingSelection(MoveState { grab: world, originals });
            }
            return EditorResponse::Redraw;
        }

        if self.tool() == ToolKind::Select && !modifiers.multi_select() {
            self.selection.clear();
        }
        self.gesture = Gesture::BoxSelecting {
            origin: world,
            current: world,
        };
        EditorResponse::Redraw
    }

    fn pointer_move(&mut self, screen: Point) -> EditorResponse {
        let world = self.camera.screen_to_world(screen);
        match &mut self.gesture {
            Gesture::Idle => EditorResponse::Unchanged,
            Gesture::Drawing { id } => {
                if let Some(element) = self.store.get_mut(*id) {
                    tools::extend(element, world);
                }
                EditorResponse::Redraw
            }
            Gesture::MovingSelection(state) => {
                let delta = world - state.grab;
                for original in &state.originals {
                    let mut moved = original.clone();
                    moved.translate(delta);
                    moved.translate(self.grid.snap_offset(moved.anchor()));
                    self.store.replace(moved);
                }
                EditorResponse::Redraw
            }
            Gesture::ResizingSelection(state) => {
                let local = self.grid.snap(state.to_local * world);
                let mut resized = state.original.clone();
                handles::apply_resize(&mut resized, state.handle, local);
                self.store.replace(resized);
                EditorResponse::Redraw
            }
            Gesture::BoxSelecting { current, .. } => {
                *current = world;
                EditorResponse::Redraw
            }
            Gesture::Panning { pan_start } => {
                if let Some(travel) = self.input.drag_delta() {
                    self.camera.pan = *pan_start + travel;
                }
                EditorResponse::Redraw
            }
        }
    }

    fn pointer_up(&mut self, modifiers: Modifiers) -> EditorResponse {
        let gesture = std::mem::take(&mut self.gesture);
        log::debug!("Ending {:?}", gesture.kind());
        match gesture {
            Gesture::Idle => EditorResponse::Unchanged,
            Gesture::Drawing { id } => {
                if let Some(element) = self.store.get_mut(id) {
                    tools::snap_on_commit(element, &self.grid);
                }
                self.commit("draw");
                EditorResponse::Redraw
            }
            Gesture::MovingSelection(_) => {
                self.commit_if_changed("move");
                EditorResponse::Redraw
            }
            Gesture::ResizingSelection(_) => {
                self.commit_if_changed("resize");
                EditorResponse::Redraw
            }
            Gesture::BoxSelecting { origin, current } => {
                let matches = self.store.ids_within(normalized_rect(origin, current));
                if modifiers.multi_select() {
                    self.selection.extend(matches);
                } else {
                    self.selection.replace(matches);
                }
                log::debug!("Box selected {} element(s)", self.selection.len());
                EditorResponse::Redraw
            }
            Gesture::Panning { .. } => EditorResponse::Unchanged,
        }
    }

    fn wheel(&mut self, delta: Vec2, modifiers: Modifiers) -> EditorResponse {
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite wheel delta {:?}", delta);
            return EditorResponse::Unchanged;
        }
        if modifiers.command() {
            let anchor = self.input.pointer_position.unwrap_or_else(|| self.viewport_center());
            self.camera
                .zoom_about(-delta.y * self.config.wheel_zoom_sensitivity, anchor);
        } else {
            self.camera.pan_by(-delta);
        }
        EditorResponse::Redraw
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers) -> EditorResponse {
        let step = if modifiers.shift {
            self.config.pan_step_large
        } else {
            self.config.pan_step
        };
        let pan = match key {
            Key::ArrowUp => Some(Vec2::new(0.0, step)),
            Key::ArrowDown => Some(Vec2::new(0.0, -step)),
            Key::ArrowLeft => Some(Vec2::new(step, 0.0)),
            Key::ArrowRight => Some(Vec2::new(-step, 0.0)),
            _ => None,
        };
        if let Some(pan) = pan {
            self.camera.pan_by(pan);
            return EditorResponse::Redraw;
        }
        match keymap::command_for(key, modifiers) {
            Some(command) => self.execute(command),
            None => EditorResponse::Unchanged,
        }
    }

    /// Run one editor command.
    pub fn execute(&mut self, command: EditorCommand) -> EditorResponse {
        log::debug!("Executing {:?}", command);
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Copy => self.copy(),
            EditorCommand::Cut => self.cut(),
            EditorCommand::Paste => self.paste(),
            EditorCommand::Duplicate => self.duplicate(),
            EditorCommand::DeleteSelection => self.delete_selection(),
            EditorCommand::ClearAll => self.clear_all(),
            EditorCommand::SelectAll => self.select_all(),
            EditorCommand::Rotate => self.rotate_selection(),
            EditorCommand::FlipHorizontal => self.flip_selection(true),
            EditorCommand::FlipVertical => self.flip_selection(false),
            EditorCommand::ToggleGrid => {
                self.grid.toggle_visible();
                EditorResponse::Redraw
            }
            EditorCommand::ToggleSnap => {
                self.grid.toggle_snap();
                log::info!("Snap to grid {}", if self.grid.snap_enabled { "on" } else { "off" });
                EditorResponse::Redraw
            }
            EditorCommand::ResetView => {
                self.camera.reset();
                EditorResponse::Redraw
            }
            EditorCommand::ZoomIn => self.zoom_by(self.config.zoom_step),
            EditorCommand::ZoomOut => self.zoom_by(-self.config.zoom_step),
            EditorCommand::Cancel => self.cancel(),
            EditorCommand::SetTool(tool) => {
                self.tools.set_tool(tool);
                EditorResponse::Redraw
            }
        }
    }

    /// Finish a text entry. Blank content is ignored.
    ///
    /// The request stays open while a pointer gesture is in progress.
    pub fn commit_text(&mut self, content: &str) -> EditorResponse {
        if self.gesture_in_progress("text") {
            return EditorResponse::Unchanged;
        }
        let Some(request) = self.pending_text.take() else {
            return EditorResponse::Unchanged;
        };
        if content.trim().is_empty() {
            return EditorResponse::Unchanged;
        }
        let edited = request
            .target
            .and_then(|id| self.store.get_mut(id))
            .and_then(DrawingElement::as_text_mut)
            .map(|text| text.content = content.to_string())
            .is_some();
        if !edited {
            let text = Text::new(request.position, content.to_string(), &self.tools.current_style);
            self.store.push(DrawingElement::Text(text));
        }
        self.commit(if edited { "text edit" } else { "text" });
        EditorResponse::Redraw
    }

    /// Abandon a text entry.
    pub fn cancel_text(&mut self) -> EditorResponse {
        self.pending_text = None;
        EditorResponse::Unchanged
    }

    pub fn undo(&mut self) -> EditorResponse {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                log::info!("Undo ({} of {})", self.history.cursor(), self.history.len() - 1);
                EditorResponse::Redraw
            }
            None => EditorResponse::Unchanged,
        }
    }

    pub fn redo(&mut self) -> EditorResponse {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                log::info!("Redo ({} of {})", self.history.cursor(), self.history.len() - 1);
                EditorResponse::Redraw
            }
            None => EditorResponse::Unchanged,
        }
    }

    /// Copy the selection. Does not touch history.
    pub fn copy(&mut self) -> EditorResponse {
        if self.selection.is_empty() {
            return EditorResponse::Unchanged;
        }
        let selection = &self.selection;
        self.clipboard
            .copy(self.store.iter().filter(|el| selection.contains(el.id())));
        log::info!("Copied {} element(s)", self.clipboard.len());
        EditorResponse::Unchanged
    }

    /// Copy then delete the selection, as one edit.
    pub fn cut(&mut self) -> EditorResponse {
        if self.selection.is_empty() || self.gesture_in_progress("cut") {
            return EditorResponse::Unchanged;
        }
        self.copy();
        self.remove_selected();
        self.commit("cut");
        EditorResponse::Redraw
    }

    /// Paste at the pointer, or at the configured default anchor.
    pub fn paste(&mut self) -> EditorResponse {
        let anchor = self
            .input
            .pointer_position
            .map(|screen| self.camera.screen_to_world(screen))
            .unwrap_or(self.config.default_paste_anchor);
        self.paste_at(anchor)
    }

    /// Paste with the first element's bounds origin at `anchor` (world).
    pub fn paste_at(&mut self, anchor: Point) -> EditorResponse {
        if self.clipboard.is_empty() || self.gesture_in_progress("paste") {
            return EditorResponse::Unchanged;
        }
        let pasted = self
            .clipboard
            .paste_at(anchor, self.config.paste_stagger, &self.grid);
        self.insert_and_select(pasted);
        self.commit("paste");
        EditorResponse::Redraw
    }

    /// Copy the selection in place, offset from the originals.
    pub fn duplicate(&mut self) -> EditorResponse {
        if self.selection.is_empty() || self.gesture_in_progress("duplicate") {
            return EditorResponse::Unchanged;
        }
        let copies = clipboard::duplicate(self.selected_elements(), self.config.duplicate_offset, &self.grid);
        self.insert_and_select(copies);
        self.commit("duplicate");
        EditorResponse::Redraw
    }

    pub fn delete_selection(&mut self) -> EditorResponse {
        if self.selection.is_empty() || self.gesture_in_progress("delete") {
            return EditorResponse::Unchanged;
        }
        self.remove_selected();
        self.commit("delete");
        EditorResponse::Redraw
    }

    /// Remove every element.
    pub fn clear_all(&mut self) -> EditorResponse {
        if self.store.is_empty() || self.gesture_in_progress("clear") {
            return EditorResponse::Unchanged;
        }
        self.store.clear();
        self.selection.clear();
        self.commit("clear");
        EditorResponse::Redraw
    }

    /// Select every element. Selection alone is not an edit.
    pub fn select_all(&mut self) -> EditorResponse {
        self.selection.replace(self.store.iter().map(DrawingElement::id));
        EditorResponse::Redraw
    }

    /// Add one rotation step to every selected element.
    pub fn rotate_selection(&mut self) -> EditorResponse {
        self.transform_selection("rotate", |el| {
            el.transform_mut().rotation_degrees += ROTATION_STEP_DEGREES;
        })
    }

    /// Mirror every selected element across its vertical (`horizontal = true`)
    /// or horizontal axis.
    pub fn flip_selection(&mut self, horizontal: bool) -> EditorResponse {
        self.transform_selection("flip", |el| {
            let transform = el.transform_mut();
            if horizontal {
                transform.flip_x = !transform.flip_x;
            } else {
                transform.flip_y = !transform.flip_y;
            }
        })
    }

    /// Abort a marquee, or clear the selection when idle.
    ///
    /// Draw, move and resize gestures are not cancellable.
    pub fn cancel(&mut self) -> EditorResponse {
        match self.gesture {
            Gesture::BoxSelecting { .. } => {
                self.gesture = Gesture::Idle;
                EditorResponse::Redraw
            }
            Gesture::Idle if !self.selection.is_empty() => {
                self.selection.clear();
                EditorResponse::Redraw
            }
            _ => EditorResponse::Unchanged,
        }
    }

    fn zoom_by(&mut self, delta: f64) -> EditorResponse {
        let center = self.viewport_center();
        self.camera.zoom_about(delta, center);
        EditorResponse::Redraw
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }

    /// Document edits wait for the pointer gesture to end, so nothing
    /// half-drawn or mid-drag is ever committed.
    fn gesture_in_progress(&self, label: &str) -> bool {
        let active = !matches!(self.gesture, Gesture::Idle);
        if active {
            log::debug!("Ignoring {} during {:?}", label, self.gesture.kind());
        }
        active
    }

    /// Selected elements in z-order.
    fn selected_elements(&self) -> Vec<&DrawingElement> {
        self.store
            .iter()
            .filter(|el| self.selection.contains(el.id()))
            .collect()
    }

    fn remove_selected(&mut self) {
        for id in self.selection.iter().collect::<Vec<_>>() {
            self.store.remove(id);
        }
        self.selection.clear();
    }

    fn insert_and_select(&mut self, elements: Vec<DrawingElement>) {
        let ids: Vec<ElementId> = elements.into_iter().map(|el| self.store.push(el)).collect();
        self.selection.replace(ids);
    }

    fn transform_selection(&mut self, label: &str, apply: impl Fn(&mut DrawingElement)) -> EditorResponse {
        if self.selection.is_empty() || self.gesture_in_progress(label) {
            return EditorResponse::Unchanged;
        }
        for id in self.selection.iter().collect::<Vec<_>>() {
            if let Some(element) = self.store.get_mut(id) {
                apply(element);
            }
        }
        self.commit(label);
        EditorResponse::Redraw
    }

    fn commit(&mut self, label: &str) {
        self.selection.retain_existing(&self.store);
        self.history.commit(HistorySnapshot {
            elements: self.store.elements().to_vec(),
            selection: self.selection.clone(),
        });
        log::info!("Committed {} ({} element(s))", label, self.store.len());
    }

    /// Commit only if the elements differ from the last committed state.
    fn commit_if_changed(&mut self, label: &str) {
        if self.store.elements() != self.history.current().elements.as_slice() {
            self.commit(label);
        }
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.store.restore(snapshot.elements);
        self.selection = snapshot.selection;
        self.gesture = Gesture::Idle;
    }
}
