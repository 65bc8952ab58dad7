#![forbid(unsafe_code)]

use crate::coords::Coordinates;

/// Which edge of the target interval a new position is computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorEdge {
    Left,
    Right,
}

/// Slot relative to a target node used by inserts and moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    FirstChild,
    LastChild,
    PrevSibling,
    NextSibling,
}

impl Placement {
    pub const ALL: [Placement; 4] = [
        Placement::FirstChild,
        Placement::LastChild,
        Placement::PrevSibling,
        Placement::NextSibling,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstChild => "first_child",
            Self::LastChild => "last_child",
            Self::PrevSibling => "prev_sibling",
            Self::NextSibling => "next_sibling",
        }
    }

    pub fn anchor(self) -> AnchorEdge {
        match self {
            Self::FirstChild | Self::PrevSibling => AnchorEdge::Left,
            Self::LastChild | Self::NextSibling => AnchorEdge::Right,
        }
    }

    pub fn left_offset(self) -> i64 {
        match self {
            Self::FirstChild | Self::NextSibling => 1,
            Self::LastChild | Self::PrevSibling => 0,
        }
    }

    pub fn level_offset(self) -> i64 {
        match self {
            Self::FirstChild | Self::LastChild => 1,
            Self::PrevSibling | Self::NextSibling => 0,
        }
    }

    pub fn is_child_slot(self) -> bool {
        self.level_offset() > 0
    }

    /// A root has no siblings, so only child slots may target one.
    pub fn allows_root_target(self) -> bool {
        self.is_child_slot()
    }

    /// Coordinates of a freshly inserted leaf placed relative to `target`.
    pub fn insert_coordinates(self, target: &Coordinates) -> Coordinates {
        let anchor = match self.anchor() {
            AnchorEdge::Left => target.left,
            AnchorEdge::Right => target.right,
        };
        Coordinates::leaf(
            anchor + self.left_offset(),
            target.level + self.level_offset(),
            target.scope,
        )
    }

    /// Left coordinate the moved subtree root will occupy once the gap is open.
    pub fn move_destination(self, target: &Coordinates) -> i64 {
        let use_left = self.anchor() == AnchorEdge::Left;
        if self.is_child_slot() {
            if use_left {
                target.left + 1
            } else {
                target.right + self.left_offset()
            }
        } else if use_left {
            target.left
        } else {
            target.right + self.left_offset()
        }
    }

    pub fn level_delta(self, moving: &Coordinates, target: &Coordinates) -> i64 {
        target.level - moving.level + self.level_offset()
    }
}
