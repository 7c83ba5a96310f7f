//! Focus tracking and the side effects of moving it.
//!
//! The [`Navigator`] owns the id of the focused node. Moving focus issues one
//! re-center command to the [`Viewport`] and then updates progress, in that
//! order, before returning. Animation is left to the viewport: the navigator
//! never waits for it, so a new request simply re-targets whatever is in
//! flight.

pub mod progress;

use std::collections::HashMap;

use crate::deck::NodeId;
use crate::graph::SlideGraph;
use crate::layout::{Direction, Neighbors};

pub use progress::{ProgressObserver, ProgressPolicy, ProgressTracker};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("navigation target '{0}' is not a node of this graph")]
    UnknownTarget(NodeId),

    #[error("start node '{0}' is not a node of this graph")]
    UnknownStart(NodeId),
}

/// Re-center animation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub duration_ms: u64,
    /// Padding used when a node does not request its own.
    pub padding: f64,
    /// Padding of the first fit when a session starts.
    pub initial_padding: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            padding: 0.1,
            initial_padding: 0.2,
        }
    }
}

/// Instruction to bring a node into view.
#[derive(Debug, Clone, PartialEq)]
pub struct RecenterCommand {
    pub target: NodeId,
    pub duration_ms: u64,
    pub padding: f64,
}

/// The rendering side that owns the camera.
pub trait Viewport {
    fn recenter(&mut self, command: &RecenterCommand);
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Moved(RecenterCommand),
    /// Already focused, or no link in the requested direction.
    Stayed,
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved(_))
    }
}

/// A way out of the focused node, as shown on its buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link<'a> {
    Neighbor(Direction, &'a str),
    /// "Back to hub" on detail cards and satellites.
    Hub(&'a str),
}

impl Link<'_> {
    pub fn target(&self) -> &str {
        match self {
            Link::Neighbor(_, target) | Link::Hub(target) => target,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Link::Neighbor(dir, _) => dir.label(),
            Link::Hub(_) => "⌂ Back to hub",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct NodeLinks {
    neighbors: Neighbors,
    hub: Option<NodeId>,
    fit_padding: Option<f64>,
}

#[derive(Debug)]
pub struct Navigator {
    links: HashMap<NodeId, NodeLinks>,
    start: NodeId,
    current: NodeId,
    progress: ProgressTracker,
    fit: FitOptions,
}

impl Navigator {
    /// Start a session focused on `start`.
    pub fn new(
        graph: &SlideGraph,
        start: &str,
        main_sequence: Vec<NodeId>,
        policy: ProgressPolicy,
    ) -> Result<Self, NavError> {
        let links: HashMap<NodeId, NodeLinks> = graph
            .nodes
            .iter()
            .map(|node| {
                (
                    node.id.clone(),
                    NodeLinks {
                        neighbors: node.neighbors.clone(),
                        hub: node.hub.clone(),
                        fit_padding: node.fit_padding,
                    },
                )
            })
            .collect();

        if !links.contains_key(start) {
            return Err(NavError::UnknownStart(start.to_string()));
        }

        let mut progress = ProgressTracker::new(main_sequence, policy);
        progress.update(start);

        Ok(Self {
            links,
            start: start.to_string(),
            current: start.to_string(),
            progress,
            fit: FitOptions::default(),
        })
    }

    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn subscribe(&mut self, observer: ProgressObserver) {
        self.progress.subscribe(observer);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.links.contains_key(id)
    }

    /// Command for the first fit of a session, framing the start node.
    pub fn initial_fit(&self) -> RecenterCommand {
        RecenterCommand {
            target: self.start.clone(),
            duration_ms: self.fit.duration_ms,
            padding: self.fit.initial_padding,
        }
    }

    fn recenter_for(&self, target: &str) -> RecenterCommand {
        let padding = self
            .links
            .get(target)
            .and_then(|l| l.fit_padding)
            .unwrap_or(self.fit.padding);
        RecenterCommand {
            target: target.to_string(),
            duration_ms: self.fit.duration_ms,
            padding,
        }
    }

    /// Move focus to `target`.
    ///
    /// Re-requesting the focused node is a no-op: no command is issued and
    /// progress is not touched. An id that is not in the graph is an
    /// authoring bug and is reported as an error.
    pub fn navigate_to(
        &mut self,
        target: &str,
        viewport: &mut dyn Viewport,
    ) -> Result<Transition, NavError> {
        if !self.links.contains_key(target) {
            log::error!("navigation to unknown node '{target}' from '{}'", self.current);
            return Err(NavError::UnknownTarget(target.to_string()));
        }
        if target == self.current {
            log::trace!("already at '{target}'");
            return Ok(Transition::Stayed);
        }

        self.current = target.to_string();
        let command = self.recenter_for(target);
        viewport.recenter(&command);
        self.progress.update(target);
        log::debug!("focused '{target}' (progress {:.0}%)", self.progress.value());
        Ok(Transition::Moved(command))
    }

    /// Follow the focused node's neighbor in `dir`. A dead end stays put.
    pub fn step(
        &mut self,
        dir: Direction,
        viewport: &mut dyn Viewport,
    ) -> Result<Transition, NavError> {
        let Some(target) = self.neighbor(dir).map(str::to_string) else {
            log::debug!("no {dir} neighbor on '{}'", self.current);
            return Ok(Transition::Stayed);
        };
        self.navigate_to(&target, viewport)
    }

    /// Follow the focused node's hub link, if it has one.
    pub fn back_to_hub(&mut self, viewport: &mut dyn Viewport) -> Result<Transition, NavError> {
        let Some(hub) = self.links.get(&self.current).and_then(|l| l.hub.clone()) else {
            return Ok(Transition::Stayed);
        };
        self.navigate_to(&hub, viewport)
    }

    pub fn neighbor(&self, dir: Direction) -> Option<&str> {
        self.links.get(&self.current)?.neighbors.get(dir)
    }

    /// Moves available from the focused node, neighbors first in
    /// left, up, down, right order, then the hub link.
    pub fn links(&self) -> Vec<Link<'_>> {
        let Some(node) = self.links.get(&self.current) else {
            return Vec::new();
        };
        let mut out: Vec<Link<'_>> = node
            .neighbors
            .iter()
            .map(|(dir, target)| Link::Neighbor(dir, target))
            .collect();
        if let Some(hub) = &node.hub {
            out.push(Link::Hub(hub));
        }
        out
    }
}
