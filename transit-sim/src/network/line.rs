//! Lines: ordered edge sets plus the trains running on them.

use serde::Serialize;

use crate::domain::{EdgeId, LineId, StationId};
use crate::routing::StationGraph;

use super::Train;

/// Full size of a line's menu icon.
pub const LINE_MENU_SIZE: f32 = 70.0;

/// Size multiplier for locked or unused lines.
pub const LINE_MENU_INACTIVE_MULTIPLIER: f32 = 0.4;

/// Icon colour of a locked line.
pub const LOCKED_COLOR: &str = "gray";

/// Derived display state for a line's menu entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuIcon {
    pub size: f32,
    pub color: String,
}

/// A player-built line.
///
/// Edges are kept in insertion order, which is construction order and not
/// necessarily a path. Trains are owned exclusively by their line.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    color: String,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) trains: Vec<Train>,
    unlocked: bool,
    hovered: bool,
}

impl Line {
    pub(crate) fn new(id: LineId, color: impl Into<String>) -> Self {
        Self {
            id,
            color: color.into(),
            edges: Vec::new(),
            trains: Vec::new(),
            unlocked: false,
            hovered: false,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub(crate) fn unlock(&mut self) {
        self.unlocked = true;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Menu icon for this line.
    ///
    /// Locked lines are small and grey; unlocked lines without track are
    /// small unless hovered.
    pub fn menu_icon(&self) -> MenuIcon {
        let inactive = LINE_MENU_SIZE * LINE_MENU_INACTIVE_MULTIPLIER;
        if !self.unlocked {
            return MenuIcon {
                size: inactive,
                color: LOCKED_COLOR.to_string(),
            };
        }
        let size = if self.edges.is_empty() && !self.hovered {
            inactive
        } else {
            LINE_MENU_SIZE
        };
        MenuIcon {
            size,
            color: self.color.clone(),
        }
    }

    /// Returns true if any edge of this line ends at `station`.
    pub fn has_edge_ending_at<G: StationGraph + ?Sized>(
        &self,
        station: StationId,
        graph: &G,
    ) -> bool {
        self.edges
            .iter()
            .filter_map(|id| graph.edge(*id))
            .any(|edge| edge.to() == station)
    }

    /// The edge a train takes after finishing its current one.
    ///
    /// Picks the first edge in line order, other than the current one, that
    /// touches the station the train has arrived at. Falls back to the
    /// current edge, which sends the train back the way it came.
    pub fn next_edge<G: StationGraph + ?Sized>(&self, train: &Train, graph: &G) -> EdgeId {
        let current = train.edge();
        let Some(arrived_at) = train.destination(graph) else {
            return current;
        };
        self.edges
            .iter()
            .copied()
            .filter(|id| *id != current)
            .find(|id| graph.edge(*id).is_some_and(|e| e.touches_station(arrived_at)))
            .unwrap_or(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_line_icon() {
        let line = Line::new(LineId(0), "red");
        let icon = line.menu_icon();
        assert_eq!(icon.color, "gray");
        assert_eq!(icon.size, LINE_MENU_SIZE * LINE_MENU_INACTIVE_MULTIPLIER);
    }

    #[test]
    fn unlocked_empty_line_icon() {
        let mut line = Line::new(LineId(0), "red");
        line.unlock();
        let icon = line.menu_icon();
        assert_eq!(icon.color, "red");
        assert_eq!(icon.size, LINE_MENU_SIZE * LINE_MENU_INACTIVE_MULTIPLIER);

        line.set_hovered(true);
        assert_eq!(line.menu_icon().size, LINE_MENU_SIZE);
    }

    #[test]
    fn unlocked_line_with_track_icon() {
        let mut line = Line::new(LineId(0), "blue");
        line.unlock();
        line.edges.push(EdgeId(0));
        assert_eq!(
            line.menu_icon(),
            MenuIcon {
                size: LINE_MENU_SIZE,
                color: "blue".to_string()
            }
        );
    }
}
