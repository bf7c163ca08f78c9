use std::collections::VecDeque;

use super::direction::Direction;
use super::food::Tint;
use super::grid::Cell;

/// One body segment of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    /// Colour picked up from the last food eaten, `None` until the first meal
    pub tint: Option<Tint>,
}

/// The snake body, stored tail first and head last
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    segments: VecDeque<Segment>,
    direction: Direction,
    grow_pending: bool,
    tint: Option<Tint>,
}

impl SnakeBody {
    /// Lay out a straight snake of `length` cells whose head sits on `head`,
    /// trailing away from `direction`. A length of 0 is treated as 1.
    pub fn initialize(length: usize, head: Cell, direction: Direction) -> Self {
        let length = length.max(1);
        let back = direction.opposite();

        let mut segments = VecDeque::with_capacity(length);
        let mut cell = head;
        segments.push_front(Segment { cell, tint: None });
        for _ in 1..length {
            cell = cell.step(back);
            segments.push_front(Segment { cell, tint: None });
        }

        Self {
            segments,
            direction,
            grow_pending: false,
            tint: None,
        }
    }

    /// Move one cell towards `direction` and return the cell the tail vacated.
    ///
    /// With growth pending the old tail is kept, so the snake ends up one
    /// segment longer; the returned cell is then where that extra segment sits.
    pub fn advance(&mut self, direction: Direction) -> Cell {
        self.direction = direction;
        let new_head = self.head().step(direction);
        self.segments.push_back(Segment {
            cell: new_head,
            tint: self.tint,
        });

        let vacated = match self.segments.pop_front() {
            Some(segment) => segment.cell,
            None => new_head,
        };

        if self.grow_pending {
            self.segments.push_front(Segment {
                cell: vacated,
                tint: self.tint,
            });
            self.grow_pending = false;
        }

        vacated
    }

    /// Make the next advance lengthen the snake
    pub fn schedule_growth(&mut self) {
        self.grow_pending = true;
    }

    pub fn is_growth_pending(&self) -> bool {
        self.grow_pending
    }

    /// Recolour the whole snake; later segments inherit the tint
    pub fn tint_all(&mut self, tint: Tint) {
        self.tint = Some(tint);
        for segment in &mut self.segments {
            segment.tint = Some(tint);
        }
    }

    pub fn head(&self) -> Cell {
        self.segments
            .back()
            .map(|segment| segment.cell)
            .expect("snake always has at least one segment")
    }

    pub fn tail(&self) -> Cell {
        self.segments
            .front()
            .map(|segment| segment.cell)
            .expect("snake always has at least one segment")
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a snake built through `initialize`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Occupied cells from tail to head
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(|segment| segment.cell)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// True when `cell` is taken by any segment other than the head
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        let body_len = self.segments.len().saturating_sub(1);
        self.segments
            .iter()
            .take(body_len)
            .any(|segment| segment.cell == cell)
    }
}
