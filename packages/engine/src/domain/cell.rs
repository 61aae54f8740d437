//! Cell - one grid site of the liquid/light simulation
//!
//! A cell is 4 bytes: kind tag, a reserved option byte and a signed 16-bit
//! liquid volume. Liquid is semantically a non-negative volume and every
//! write path clamps it to `0..=MAX_CELL_LIQUID`.
//!
//! Water sources are Solid cells with a nonzero liquid value. The solver only
//! ever subtracts outflow from AirOrWater cells, so a source keeps emitting
//! its full rate every tick and never drains.

/// Largest liquid volume a cell can hold (i16::MAX)
pub const MAX_CELL_LIQUID: i32 = i16::MAX as i32;

/// Cell type tag
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Empty air, or water when `liquid > 0`
    #[default]
    AirOrWater = 0,
    /// Wall; with nonzero liquid it is a water source
    Solid = 1,
    /// Sink for the brush layer; blocks flow unless holes drain
    Hole = 2,
}

impl CellKind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(CellKind::AirOrWater),
            1 => Some(CellKind::Solid),
            2 => Some(CellKind::Hole),
            _ => None,
        }
    }
}

/// Non-depleting flow rate of a water source cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceRate(pub i16);

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    /// Reserved tag byte, carried through ticks untouched
    pub option: u8,
    pub liquid: i16,
}

impl Cell {
    #[inline]
    pub const fn new(kind: CellKind, option: u8, liquid: i16) -> Self {
        Self { kind, option, liquid }
    }

    #[inline]
    pub const fn air() -> Self {
        Self::new(CellKind::AirOrWater, 0, 0)
    }

    /// AirOrWater cell holding `liquid` (negative input clamps to 0)
    #[inline]
    pub fn water(liquid: i32) -> Self {
        Self::new(CellKind::AirOrWater, 0, clamp_liquid(liquid))
    }

    #[inline]
    pub const fn solid() -> Self {
        Self::new(CellKind::Solid, 0, 0)
    }

    #[inline]
    pub const fn hole() -> Self {
        Self::new(CellKind::Hole, 0, 0)
    }

    /// Solid cell emitting `rate` into its neighbours every tick
    #[inline]
    pub fn source(rate: SourceRate) -> Self {
        Self::new(CellKind::Solid, 0, rate.0.max(0))
    }

    #[inline]
    pub fn is_air_or_water(&self) -> bool {
        self.kind == CellKind::AirOrWater
    }

    /// Flow-blocking test: Solid and Hole both block.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.kind != CellKind::AirOrWater
    }

    #[inline]
    pub fn is_source(&self) -> bool {
        self.kind == CellKind::Solid && self.liquid > 0
    }

    #[inline]
    pub fn source_rate(&self) -> Option<SourceRate> {
        if self.is_source() {
            Some(SourceRate(self.liquid))
        } else {
            None
        }
    }

    /// Blocking test used by the solver. With `holes_drain`, holes accept
    /// inflow (which phase 2 then discards) and only true walls block.
    #[inline]
    pub(crate) fn blocks_flow(&self, holes_drain: bool) -> bool {
        match self.kind {
            CellKind::AirOrWater => false,
            CellKind::Solid => true,
            CellKind::Hole => !holes_drain,
        }
    }
}

/// Clamp an i32 volume into the storable `0..=i16::MAX` range
#[inline]
pub fn clamp_liquid(v: i32) -> i16 {
    v.clamp(0, MAX_CELL_LIQUID) as i16
}

/// Phase 1 output for one cell, consumed by phase 2
///
/// `next` already has this cell's own outflow subtracted and any horizontal
/// inflow from its row neighbours folded in. Vertical transfers stay separate
/// because the rows above and below are computed concurrently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowDelta {
    pub next: Cell,
    pub to_bottom: i16,
    pub to_top: i16,
}

/// Full per-cell flow of one phase 1 evaluation (never leaves the row pass)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CellFlow {
    pub next: Cell,
    pub to_bottom: i16,
    pub to_top: i16,
    pub to_left: i16,
    pub to_right: i16,
}

impl CellFlow {
    #[inline]
    pub(crate) fn unchanged(cell: Cell) -> Self {
        Self {
            next: cell,
            ..Self::default()
        }
    }

    /// Drop the horizontal parts after folding `inflow` into `next`
    #[inline]
    pub(crate) fn publish(self, inflow: i32) -> FlowDelta {
        let mut next = self.next;
        next.liquid = clamp_liquid(next.liquid as i32 + inflow);
        FlowDelta {
            next,
            to_bottom: self.to_bottom,
            to_top: self.to_top,
        }
    }
}
