//! Engine facade: one engine, pluggable view.
//!
//! Ties the input adapters, drag session controller, and reorder dispatcher
//! together over a single injected board handle and remote store. A rendering
//! layer feeds raw input plus the current layout geometry, observes the drag
//! preview and the visible board, and reacts to the returned events. Nothing
//! here renders; presentation stays entirely outside the engine.

use crate::dispatch::ReorderDispatcher;
use crate::drag::DragController;
use crate::error::Result;
use crate::input::{
    GestureEvent, KeyInput, KeyboardAdapter, PointerAdapter, PointerConfig, PointerInput,
};
use crate::remote::{BoardFilter, RemoteStore};
use crate::resolve::DropCandidate;
use crate::state::{BoardState, SharedBoard};
use crate::types::{Board, BoardTotals, CardId, MoveCommand, Slot};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Events the embedding layer must react to after feeding input
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A completed drag produced a move; hand it to [`BoardEngine::dispatch`]
    CommandReady(MoveCommand),
    /// Card chosen for the detail-modal collaborator
    CardSelected(CardId),
}

/// The board engine behind any board view.
pub struct BoardEngine {
    state: SharedBoard,
    dispatcher: ReorderDispatcher,
    controller: DragController,
    pointer: PointerAdapter,
    keyboard: KeyboardAdapter,
    filter: BoardFilter,
}

impl BoardEngine {
    /// Create an engine over the given remote store with an empty board;
    /// call [`refresh`](Self::refresh) to load the first snapshot.
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        let state = BoardState::shared();
        Self {
            dispatcher: ReorderDispatcher::new(store, state.clone()),
            state,
            controller: DragController::new(),
            pointer: PointerAdapter::new(),
            keyboard: KeyboardAdapter::new(),
            filter: BoardFilter::all(),
        }
    }

    /// Override the pointer tunables
    pub fn with_pointer_config(mut self, config: PointerConfig) -> Self {
        self.pointer = PointerAdapter::with_config(config);
        self
    }

    /// The injected board handle, for rendering layers that read state
    /// directly
    pub fn state(&self) -> &SharedBoard {
        &self.state
    }

    /// Board as it should be rendered right now, optimistic move included
    pub fn visible_board(&self) -> Board {
        self.state.lock().unwrap().visible()
    }

    /// Derived totals for the visible board
    pub fn totals(&self, now: DateTime<Utc>) -> BoardTotals {
        self.visible_board().totals(now)
    }

    /// Provisional drop slot of the active drag, for the rendering layer
    pub fn preview(&self) -> Option<Slot> {
        self.controller.preview()
    }

    /// The card currently being dragged, if any
    pub fn dragging(&self) -> Option<CardId> {
        self.controller.session().map(|session| session.card().clone())
    }

    /// The active filter
    pub fn filter(&self) -> &BoardFilter {
        &self.filter
    }

    /// Feed one raw pointer event plus the current layout geometry
    pub fn on_pointer(
        &mut self,
        input: PointerInput,
        candidates: &[DropCandidate],
    ) -> Vec<EngineEvent> {
        let gestures = self.pointer.on_input(input);
        self.feed(gestures, candidates)
    }

    /// Feed one keyboard command for the focused card plus the current
    /// layout geometry
    pub fn on_key(
        &mut self,
        key: KeyInput,
        focused: &CardId,
        candidates: &[DropCandidate],
    ) -> Vec<EngineEvent> {
        let board = self.state.lock().unwrap().board().clone();
        let gestures = self.keyboard.on_input(key, focused, &board, candidates);
        self.feed(gestures, candidates)
    }

    fn feed(
        &mut self,
        gestures: Vec<GestureEvent>,
        candidates: &[DropCandidate],
    ) -> Vec<EngineEvent> {
        if gestures.is_empty() {
            return Vec::new();
        }
        let board = self.state.lock().unwrap().board().clone();
        let mut out = Vec::new();
        for gesture in gestures {
            match gesture {
                GestureEvent::Select(id) => out.push(EngineEvent::CardSelected(id)),
                GestureEvent::Drag(event) => {
                    if let Some(command) = self.controller.on_event(event, &board, candidates) {
                        out.push(EngineEvent::CommandReady(command));
                    }
                }
            }
        }
        out
    }

    /// Send a completed move to the remote store and reconcile the outcome.
    /// The drag controller is already idle by the time this is called; a new
    /// drag may begin while this round-trip is outstanding.
    pub async fn dispatch(&self, command: MoveCommand) -> Result<()> {
        self.dispatcher.dispatch(command, &self.filter).await
    }

    /// Fetch an authoritative snapshot with the active filter and adopt it
    /// unless a newer one arrived first
    pub async fn refresh(&self) -> Result<bool> {
        self.dispatcher.refresh(&self.filter).await
    }

    /// Replace the active filter and refetch; any filter change yields a
    /// full board replacement
    pub async fn set_filter(&mut self, filter: BoardFilter) -> Result<bool> {
        self.filter = filter;
        self.refresh().await
    }
}
