//! Partitioning of the circle into pie sectors.

use crate::angle::{FULL_TURN, normalize};
use crate::error::MenuError;
use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// 1-based sector identifier, assigned in insertion order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

/// Which of the two sector layouts the menu uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Sectors start at the rotation angle; the last sector absorbs `360 mod N`.
    #[strum(serialize = "plain")]
    Plain,
    /// Sectors start 120° past the rotation angle, the selected sector is
    /// widened by `360 mod N` and the drawing frame is offset so the icons face up.
    #[default]
    #[strum(to_string = "centered", serialize = "centered-with-remainder-bonus")]
    Centered,
}

impl LayoutMode {
    pub fn default_base_offset(&self) -> i32 {
        match self {
            Self::Plain => 0,
            Self::Centered => 120,
        }
    }

    fn awards_remainder(&self, item_selected: bool, is_last: bool) -> bool {
        match self {
            Self::Plain => is_last,
            Self::Centered => item_selected,
        }
    }

    fn setup_angle(&self, sector_angle: i32, rest_angle: i32) -> i32 {
        match self {
            Self::Plain => 0,
            Self::Centered => 270 - sector_angle / 2 - rest_angle - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorLayout {
    pub mode: LayoutMode,
    pub base_offset: i32,
}

impl SectorLayout {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            base_offset: mode.default_base_offset(),
        }
    }

    pub fn with_base_offset(mut self, base_offset: i32) -> Self {
        self.base_offset = base_offset;
        self
    }
}

impl Default for SectorLayout {
    fn default() -> Self {
        Self::new(LayoutMode::default())
    }
}

#[derive(Debug, Clone)]
pub struct MenuItem<I> {
    id: ItemId,
    start_angle: i32,
    sweep_angle: i32,
    selected: bool,
    icon: I,
}

impl<I> MenuItem<I> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Leading edge in the hit-testing frame, within `[0, 360)`.
    pub fn start_angle(&self) -> i32 {
        self.start_angle
    }

    pub fn sweep_angle(&self) -> i32 {
        self.sweep_angle
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn icon(&self) -> &I {
        &self.icon
    }
}

/// Angles derived by the last [`SectorModel::recompute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectorGeometry {
    pub sector_angle: i32,
    pub rest_angle: i32,
    pub setup_angle: i32,
}

#[derive(Debug, Clone)]
pub struct SectorModel<I> {
    items: Vec<MenuItem<I>>,
    layout: SectorLayout,
    geometry: SectorGeometry,
}

impl<I> SectorModel<I> {
    pub fn new(layout: SectorLayout) -> Self {
        Self {
            items: Vec::new(),
            layout,
            geometry: SectorGeometry::default(),
        }
    }

    /// Appends a sector and makes it the selected one.
    pub fn push(&mut self, icon: I) -> ItemId {
        let id = ItemId(self.items.len() as u32 + 1);
        self.items.iter_mut().for_each(|item| item.selected = false);
        self.items.push(MenuItem {
            id,
            start_angle: 0,
            sweep_angle: 0,
            selected: true,
            icon,
        });
        id
    }

    /// Adds every icon in order; the last one ends up selected.
    pub fn populate(&mut self, icons: impl IntoIterator<Item = I>) {
        for icon in icons {
            self.push(icon);
        }
    }

    pub fn recompute(&mut self, current_angle: i32) -> Result<SectorGeometry, MenuError> {
        if self.items.is_empty() {
            return Err(MenuError::Empty);
        }

        let total = self.items.len() as i32;
        let sector_angle = FULL_TURN / total;
        let rest_angle = FULL_TURN % total;
        let last = self.items.len() - 1;
        let mode = self.layout.mode;

        let mut cursor = normalize(current_angle + self.layout.base_offset);
        for (i, item) in self.items.iter_mut().enumerate() {
            item.start_angle = normalize(cursor);
            cursor += sector_angle;
            item.sweep_angle = sector_angle;
            if mode.awards_remainder(item.selected, i == last) {
                item.sweep_angle += rest_angle;
            }
        }

        self.geometry = SectorGeometry {
            sector_angle,
            rest_angle,
            setup_angle: mode.setup_angle(sector_angle, rest_angle),
        };
        Ok(self.geometry)
    }

    pub fn apply_selection(&mut self, id: ItemId) -> Result<(), MenuError> {
        if self.get(id).is_none() {
            return Err(MenuError::UnknownItem(id));
        }
        self.items
            .iter_mut()
            .for_each(|item| item.selected = item.id == id);
        Ok(())
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.items
            .iter()
            .find(|item| item.selected)
            .map(|item| item.id)
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuItem<I>> {
        id.index().and_then(|i| self.items.get(i))
    }

    pub fn items(&self) -> &[MenuItem<I>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn layout(&self) -> SectorLayout {
        self.layout
    }

    pub fn geometry(&self) -> SectorGeometry {
        self.geometry
    }
}
